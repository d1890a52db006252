//! # Visibility Controller
//!
//! Decides which parts of the rig are shown. The controller keeps only a few
//! flags (active, wireframe-only, grabbed handle, wire highlight); the
//! per-handle [`RigDisplay`] is derived from them on demand, so it can never
//! drift out of sync with the rig or the configuration.

use super::display::{Appearance, HandleDisplay, RigDisplay};
use super::ActivationPolicy;
use crate::input::PointerKind;
use crate::rig::{HandleRef, Rig, RigConfig};

/// Coarse visibility of the rig
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisibilityState {
    Inactive,
    WireframeOnly,
    FullyVisible,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityController {
    policy: ActivationPolicy,
    active: bool,
    wireframe_only: bool,
    grabbed: Option<HandleRef>,
    wires_highlighted: bool,
}

impl VisibilityController {
    /// Controller in the startup state for `policy`
    pub fn new(policy: ActivationPolicy) -> Self {
        Self {
            policy,
            active: policy.starts_active(),
            wireframe_only: policy.rests_as_wireframe(),
            grabbed: None,
            wires_highlighted: false,
        }
    }

    pub fn policy(&self) -> ActivationPolicy {
        self.policy
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn grabbed(&self) -> Option<HandleRef> {
        self.grabbed
    }

    pub fn wires_highlighted(&self) -> bool {
        self.wires_highlighted
    }

    pub fn state(&self) -> VisibilityState {
        if !self.active {
            VisibilityState::Inactive
        } else if self.wireframe_only {
            VisibilityState::WireframeOnly
        } else {
            VisibilityState::FullyVisible
        }
    }

    /// Show or hide the whole rig. Returns true if the state changed.
    pub fn activate(&mut self, active: bool) -> bool {
        if self.active == active {
            return false;
        }
        self.active = active;
        self.reset();
        true
    }

    /// Switch policy, returning the wireframe flag to the policy's resting state
    pub fn set_policy(&mut self, policy: ActivationPolicy) {
        self.policy = policy;
        self.wireframe_only = policy.rests_as_wireframe();
        self.reset();
    }

    /// A pointer's focus moved onto (`on_rig`) or away from the rig.
    ///
    /// The flag is tracked while inactive too, so activation shows the
    /// latest focus state. Returns true if the wireframe-only flag toggled.
    pub fn on_focus_changed(&mut self, kind: PointerKind, on_rig: bool) -> bool {
        if !self.policy.accepts(kind) {
            return false;
        }
        if on_rig != self.wireframe_only {
            return false;
        }

        self.wireframe_only = !on_rig;
        // An open grab keeps its display; the new flag applies once it ends
        if self.grabbed.is_none() {
            self.reset();
        }
        true
    }

    pub fn begin_grab(&mut self, handle: HandleRef) {
        self.grabbed = Some(handle);
    }

    pub fn end_grab(&mut self) {
        self.grabbed = None;
        self.reset();
    }

    /// Hide every handle and show the box in its grabbed appearance
    pub fn highlight_wires(&mut self) {
        self.wires_highlighted = true;
    }

    pub fn unhighlight_wires(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.wires_highlighted = false;
    }

    /// Per-visual display flags for `rig` under `config`
    pub fn display(&self, config: &RigConfig, rig: &Rig) -> RigDisplay {
        let mut display = RigDisplay::hidden();
        if !self.active {
            return display;
        }

        let handles_shown = !self.wireframe_only;
        for corner in rig.corners() {
            display.corners[corner.index] = HandleDisplay::shown(handles_shown && config.show_scale_handles);
        }
        for edge in rig.edges() {
            let axis_shown = edge.axis().is_some_and(|axis| config.show_rotation_handle_for(axis));
            display.edges[edge.index] = HandleDisplay::shown(handles_shown && axis_shown && !edge.flattened);
        }
        for link in rig.links() {
            display.links[link.edge] = config.show_wireframe && !link.flattened;
        }
        display.box_visible = config.show_box_display;

        if let Some(grabbed) = self.grabbed {
            display.corners = [HandleDisplay::HIDDEN; crate::rig::CORNER_COUNT];
            display.edges = [HandleDisplay::HIDDEN; crate::rig::EDGE_COUNT];
            let flattened = rig.handle(grabbed).flattened;
            let slot = match grabbed {
                HandleRef::Corner(i) => &mut display.corners[i],
                HandleRef::Edge(i) => &mut display.edges[i],
            };
            *slot = HandleDisplay {
                visible: !flattened,
                appearance: Appearance::Grabbed,
            };
            display.box_appearance = Appearance::Grabbed;
        } else if self.wires_highlighted {
            display.corners = [HandleDisplay::HIDDEN; crate::rig::CORNER_COUNT];
            display.edges = [HandleDisplay::HIDDEN; crate::rig::EDGE_COUNT];
            display.box_appearance = Appearance::Grabbed;
        }

        display
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::{BoundsMethod, ComputedBounds};
    use crate::math::{BoundingVolume, CardinalAxis};
    use crate::rig::RigBuilder;
    use crate::target::TargetTransform;
    use cgmath::Vector3;

    fn rig(flattened_axis: Option<CardinalAxis>) -> Rig {
        let volume = BoundingVolume::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.5, 0.5, 0.5));
        let bounds = ComputedBounds {
            local: volume,
            world: volume,
            method: BoundsMethod::AttachedPrimitive,
            flattened_axis,
        };
        RigBuilder::from_config(&RigConfig::default()).build(&bounds, &TargetTransform::default(), 0)
    }

    #[test]
    fn test_startup_state_per_policy() {
        let expected = [
            (ActivationPolicy::OnStart, VisibilityState::FullyVisible),
            (ActivationPolicy::ByProximity, VisibilityState::WireframeOnly),
            (ActivationPolicy::ByPointer, VisibilityState::WireframeOnly),
            (ActivationPolicy::ByProximityAndPointer, VisibilityState::WireframeOnly),
            (ActivationPolicy::Manual, VisibilityState::Inactive),
        ];
        for (policy, state) in expected {
            assert_eq!(VisibilityController::new(policy).state(), state, "{:?}", policy);
        }
    }

    #[test]
    fn test_activate_toggles_for_any_policy() {
        let mut manual = VisibilityController::new(ActivationPolicy::Manual);
        assert!(manual.activate(true));
        assert!(!manual.activate(true));
        assert_eq!(manual.state(), VisibilityState::FullyVisible);

        let mut proximity = VisibilityController::new(ActivationPolicy::ByProximity);
        assert!(proximity.activate(false));
        assert_eq!(proximity.state(), VisibilityState::Inactive);
        proximity.activate(true);
        assert_eq!(proximity.state(), VisibilityState::WireframeOnly);
    }

    #[test]
    fn test_focus_matches_pointer_kind() {
        let mut proximity = VisibilityController::new(ActivationPolicy::ByProximity);
        assert!(!proximity.on_focus_changed(PointerKind::Far, true));
        assert!(proximity.on_focus_changed(PointerKind::Near, true));
        assert_eq!(proximity.state(), VisibilityState::FullyVisible);
        assert!(proximity.on_focus_changed(PointerKind::Near, false));
        assert_eq!(proximity.state(), VisibilityState::WireframeOnly);

        let mut pointer = VisibilityController::new(ActivationPolicy::ByPointer);
        assert!(!pointer.on_focus_changed(PointerKind::Near, true));
        assert!(pointer.on_focus_changed(PointerKind::Far, true));

        let mut both = VisibilityController::new(ActivationPolicy::ByProximityAndPointer);
        assert!(both.on_focus_changed(PointerKind::Near, true));
        assert!(both.on_focus_changed(PointerKind::Far, false));
    }

    #[test]
    fn test_focus_while_inactive_applies_on_activation() {
        let mut controller = VisibilityController::new(ActivationPolicy::ByPointer);
        controller.activate(false);

        assert!(controller.on_focus_changed(PointerKind::Far, true));
        assert_eq!(controller.state(), VisibilityState::Inactive);

        controller.activate(true);
        assert_eq!(controller.state(), VisibilityState::FullyVisible);
    }

    #[test]
    fn test_on_start_and_manual_never_auto_toggle() {
        for policy in [ActivationPolicy::OnStart, ActivationPolicy::Manual] {
            let mut controller = VisibilityController::new(policy);
            controller.activate(true);
            for kind in [PointerKind::Near, PointerKind::Far] {
                assert!(!controller.on_focus_changed(kind, false));
                assert!(!controller.on_focus_changed(kind, true));
            }
            assert_eq!(controller.state(), VisibilityState::FullyVisible);
        }
    }

    #[test]
    fn test_wireframe_only_display() {
        let rig = rig(None);
        let display = VisibilityController::new(ActivationPolicy::ByPointer).display(&RigConfig::default(), &rig);

        assert!(!display.any_handle_visible());
        assert_eq!(display.visible_link_count(), 12);
    }

    #[test]
    fn test_fully_visible_respects_config() {
        let rig = rig(None);
        let config = RigConfig {
            show_scale_handles: false,
            show_rotation_handle_for_y: false,
            show_box_display: true,
            ..RigConfig::default()
        };
        let display = VisibilityController::new(ActivationPolicy::OnStart).display(&config, &rig);

        assert_eq!(display.visible_corner_count(), 0);
        assert_eq!(display.visible_edge_count(), 8);
        assert!(display.box_visible);
        assert_eq!(display.box_appearance, Appearance::Normal);
    }

    #[test]
    fn test_flattened_edges_hidden_in_every_state() {
        let rig = rig(Some(CardinalAxis::X));
        let config = RigConfig::default();
        let mut controller = VisibilityController::new(ActivationPolicy::OnStart);

        let display = controller.display(&config, &rig);
        assert_eq!(display.visible_edge_count(), 8);
        assert_eq!(display.visible_link_count(), 8);
        for i in crate::rig::flattened_edges(CardinalAxis::X) {
            assert!(!display.edges[i].visible);
        }

        controller.begin_grab(HandleRef::Edge(0));
        assert!(!controller.display(&config, &rig).any_handle_visible());
    }

    #[test]
    fn test_grab_shows_only_grabbed_handle() {
        let rig = rig(None);
        let config = RigConfig::default();
        let mut controller = VisibilityController::new(ActivationPolicy::ByProximity);
        controller.on_focus_changed(PointerKind::Near, true);

        controller.begin_grab(HandleRef::Corner(5));
        // Focus changes during a grab do not alter the display
        controller.on_focus_changed(PointerKind::Near, false);
        let display = controller.display(&config, &rig);

        assert_eq!(display.visible_corner_count(), 1);
        assert_eq!(display.visible_edge_count(), 0);
        assert_eq!(display.corners[5].appearance, Appearance::Grabbed);
        assert_eq!(display.box_appearance, Appearance::Grabbed);

        // Ending the grab re-derives from the latest focus
        controller.end_grab();
        assert_eq!(controller.state(), VisibilityState::WireframeOnly);
        assert!(!controller.display(&config, &rig).any_handle_visible());
    }

    #[test]
    fn test_highlight_and_unhighlight_wires() {
        let rig = rig(None);
        let config = RigConfig::default();
        let mut controller = VisibilityController::new(ActivationPolicy::OnStart);

        controller.highlight_wires();
        let display = controller.display(&config, &rig);
        assert!(!display.any_handle_visible());
        assert_eq!(display.box_appearance, Appearance::Grabbed);
        assert_eq!(display.visible_link_count(), 12);

        controller.unhighlight_wires();
        let display = controller.display(&config, &rig);
        assert_eq!(display.visible_corner_count(), 8);
        assert_eq!(display.visible_edge_count(), 12);
        assert_eq!(display.box_appearance, Appearance::Normal);
    }

    #[test]
    fn test_set_policy_resets_wireframe() {
        let mut controller = VisibilityController::new(ActivationPolicy::OnStart);
        controller.set_policy(ActivationPolicy::ByProximity);
        assert_eq!(controller.state(), VisibilityState::WireframeOnly);

        controller.set_policy(ActivationPolicy::Manual);
        assert_eq!(controller.state(), VisibilityState::FullyVisible);
    }
}
