//! # Visibility
//!
//! Activation policies, the [`VisibilityController`] state machine and the
//! derived [`RigDisplay`] flags consumed by renderers and the picker.

pub mod controller;
pub mod display;

pub use controller::{VisibilityController, VisibilityState};
pub use display::{Appearance, HandleDisplay, RigDisplay};

use crate::input::PointerKind;

/// When the rig becomes visible on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActivationPolicy {
    /// Fully visible from startup
    OnStart,
    /// Wireframe until a near pointer focuses the rig
    ByProximity,
    /// Wireframe until a far pointer focuses the rig
    ByPointer,
    /// Wireframe until any pointer focuses the rig
    ByProximityAndPointer,
    /// Hidden until activated explicitly
    #[default]
    Manual,
}

impl ActivationPolicy {
    /// Whether focus events from pointers of `kind` drive visibility
    pub fn accepts(self, kind: PointerKind) -> bool {
        match self {
            ActivationPolicy::OnStart | ActivationPolicy::Manual => false,
            ActivationPolicy::ByProximity => kind == PointerKind::Near,
            ActivationPolicy::ByPointer => kind == PointerKind::Far,
            ActivationPolicy::ByProximityAndPointer => true,
        }
    }

    pub fn starts_active(self) -> bool {
        self != ActivationPolicy::Manual
    }

    /// Whether the rig shows only its wireframe while nothing has focus
    pub fn rests_as_wireframe(self) -> bool {
        matches!(
            self,
            ActivationPolicy::ByProximity | ActivationPolicy::ByPointer | ActivationPolicy::ByProximityAndPointer
        )
    }
}
