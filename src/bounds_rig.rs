//! # Bounds Rig
//!
//! [`BoundsRig`] ties the pieces together for one target: it measures the
//! target, builds the handle rig, routes pointer events to the classifier and
//! solver, keeps the visibility state machine current and emits
//! [`RigEvent`]s.
//!
//! ## Lifecycle
//!
//! 1. **Init** - capture the initial scale, compute scale limits, build the rig
//! 2. **Tick** - called every frame; rebuilds if dirty, advances an open
//!    manipulation, re-derives handle positions from the target pose
//! 3. **Dispose** - release any open session and drop the rig
//!
//! Pointer events are delivered through [`BoundsRig::handle_event`] whenever
//! the host receives them, independent of the tick.
//!
//! ## Usage
//!
//! ```no_run
//! use bounds_rig::prelude::*;
//! use std::collections::HashMap;
//!
//! let geometry = SceneGeometry::new().with_root_collider(Aabb::new(
//!     Vector3::new(-0.5, -0.5, -0.5),
//!     Vector3::new(0.5, 0.5, 0.5),
//! ));
//! let mut target = TargetTransform::default();
//! let mut rig = BoundsRig::new(RigConfig::default(), Box::new(geometry));
//! rig.init(&mut target)?;
//! rig.activate(true);
//!
//! let pointers: HashMap<PointerId, PointerPose> = HashMap::new();
//! rig.tick(1.0 / 60.0, &mut target, &pointers);
//! # Ok::<(), bounds_rig::RigError>(())
//! ```

use std::collections::HashSet;

use cgmath::Vector3;

use crate::bounds::{BoundsCalculator, FlattenMode, GeometrySource};
use crate::error::Result;
use crate::events::{EventBus, RigEvent, SubscriptionId};
use crate::input::{Pointer, PointerEvent, PointerQuery, SourceId};
use crate::manipulation::{ManipulationSession, ManipulationSolver, ScaleLimits};
use crate::math::{Aabb, CardinalAxis, Ray};
use crate::render::RigInstances;
use crate::rig::{HandleClassifier, HandleRef, PickResult, Rig, RigBuilder, RigConfig, RigPicker, WireframeShape};
use crate::target::Target;
use crate::visibility::{ActivationPolicy, RigDisplay, VisibilityController, VisibilityState};

/// Line from the grabbed handle to the live grab point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tether {
    pub start: Vector3<f32>,
    pub end: Vector3<f32>,
}

/// Bounding-box manipulation rig for a single target
pub struct BoundsRig {
    config: RigConfig,
    calculator: BoundsCalculator,
    rig: Option<Rig>,
    next_generation: u64,
    dirty: bool,
    solver: ManipulationSolver,
    visibility: VisibilityController,
    limits: ScaleLimits,
    initial_scale: Vector3<f32>,
    events: EventBus,
    sources: HashSet<SourceId>,
    initialized: bool,
}

impl BoundsRig {
    /// Create a rig measuring its target through `geometry`.
    ///
    /// Nothing is measured or built until [`BoundsRig::init`].
    pub fn new(config: RigConfig, geometry: Box<dyn GeometrySource>) -> Self {
        let mut calculator = BoundsCalculator::new(geometry);
        calculator.set_bounds_override(config.bounds_override);

        let minimum = Vector3::new(config.scale_minimum, config.scale_minimum, config.scale_minimum);
        let maximum = Vector3::new(config.scale_maximum, config.scale_maximum, config.scale_maximum);

        Self {
            visibility: VisibilityController::new(config.activation),
            config,
            calculator,
            rig: None,
            next_generation: 0,
            dirty: false,
            solver: ManipulationSolver::new(),
            limits: ScaleLimits { minimum, maximum },
            initial_scale: Vector3::new(1.0, 1.0, 1.0),
            events: EventBus::new(),
            sources: HashSet::new(),
            initialized: false,
        }
    }

    /// Capture the target's initial state and build the rig.
    ///
    /// # Arguments
    ///
    /// * `target` - The object to manipulate; its current local scale becomes
    ///   the reference for relative scale limits
    ///
    /// # Errors
    ///
    /// Returns [`crate::RigError::InvalidScaleLimits`] if the configured
    /// limits are not usable. The rig stays uninitialized in that case.
    pub fn init(&mut self, target: &mut dyn Target) -> Result<()> {
        let initial_scale = target.local_scale();
        self.limits = compute_limits(
            initial_scale,
            self.config.scale_minimum,
            self.config.scale_maximum,
            self.config.scale_limits_relative,
        )?;
        self.initial_scale = initial_scale;

        self.visibility = VisibilityController::new(self.config.activation);
        self.initialized = true;
        self.rebuild(target);

        log::debug!(
            "rig initialized with {:?} activation, scale limits {:?}",
            self.config.activation,
            self.limits
        );
        Ok(())
    }

    /// Advance the rig by one frame.
    ///
    /// # Arguments
    ///
    /// * `delta_time` - Time elapsed since the last frame in seconds
    /// * `target` - The manipulated object
    /// * `pointers` - Live pointer poses, used to move the open session's grab point
    ///
    /// # Returns
    ///
    /// `true` if the target was modified this frame
    pub fn tick(&mut self, delta_time: f32, target: &mut dyn Target, pointers: &dyn PointerQuery) -> bool {
        if !self.initialized {
            log::warn!("tick called before init, ignoring");
            return false;
        }

        if self.dirty {
            self.rebuild(target);
        }

        let Some(rig) = self.rig.as_mut() else {
            return false;
        };
        rig.refresh(&target.pose());

        let mut modified = false;
        if let Some(pointer) = self.solver.session().map(|s| s.pointer) {
            if let Some(pose) = pointers.pointer_pose(pointer) {
                modified = self.solver.update(&pose, rig, &self.limits, target);
                if modified {
                    log::trace!("manipulation step after {:.4}s", delta_time);
                    rig.refresh(&target.pose());
                }
            }
        }
        modified
    }

    /// Release any open session and drop the rig
    pub fn dispose(&mut self) {
        self.release_session();
        self.rig = None;
        self.sources.clear();
        self.initialized = false;
        self.dirty = false;
        log::debug!("rig disposed");
    }

    /// Route one pointer event to the rig.
    ///
    /// Returns `true` if the event was consumed: a grab started, a session
    /// ended, or visibility changed.
    pub fn handle_event(&mut self, event: &PointerEvent, target: &dyn Target) -> bool {
        if !self.initialized {
            log::warn!("pointer event {:?} before init, ignoring", event);
            return false;
        }

        match event {
            PointerEvent::Down(pointer) => self.begin_grab(pointer, target),
            PointerEvent::Up(pointer) => {
                let ended = self.solver.end_for_pointer(*pointer);
                self.finish_session(ended)
            }
            PointerEvent::FocusChanged { kind, on_rig, .. } => self.visibility.on_focus_changed(*kind, *on_rig),
            PointerEvent::FocusExit(pointer) => {
                let ended = self.solver.end_for_pointer(*pointer);
                self.finish_session(ended)
            }
            PointerEvent::SourceDetected(source) => {
                self.sources.insert(*source);
                false
            }
            PointerEvent::SourceLost(source) => {
                self.sources.remove(source);
                let ended = self.solver.end_for_source(*source);
                self.finish_session(ended)
            }
        }
    }

    fn begin_grab(&mut self, pointer: &Pointer, target: &dyn Target) -> bool {
        let (Some(rig), Some(hit)) = (self.rig.as_ref(), pointer.hit) else {
            return false;
        };
        if self.solver.is_active() {
            log::debug!("{:?} pressed while a session is open, ignoring", pointer.id);
            return false;
        }

        let Some(handle) = HandleClassifier::new(rig).classify(hit.object) else {
            return false;
        };

        let display = self.visibility.display(&self.config, rig);
        let visible = match handle {
            HandleRef::Corner(i) => display.corners[i].visible,
            HandleRef::Edge(i) => display.edges[i].visible,
        };
        if !visible {
            log::debug!("{:?} hit hidden handle {:?}, ignoring", pointer.id, handle);
            return false;
        }

        let Some(session) = self.solver.begin(pointer, &hit, handle, rig, target) else {
            return false;
        };
        let started = session.kind.started_event();
        self.visibility.begin_grab(handle);
        self.events.emit(started);
        true
    }

    fn finish_session(&mut self, ended: Option<ManipulationSession>) -> bool {
        let Some(session) = ended else {
            return false;
        };
        self.visibility.end_grab();
        self.events.emit(session.kind.stopped_event());
        true
    }

    fn release_session(&mut self) -> bool {
        let ended = self.solver.end();
        self.finish_session(ended)
    }

    /// Show or hide the rig. Hiding it ends an open session.
    pub fn activate(&mut self, active: bool) {
        if !active {
            self.release_session();
        }
        if self.visibility.activate(active) {
            log::debug!("rig {}", if active { "activated" } else { "deactivated" });
        }
    }

    pub fn set_activation_policy(&mut self, policy: ActivationPolicy) {
        self.config.activation = policy;
        self.visibility.set_policy(policy);
    }

    /// Measure the target and rebuild every handle now.
    ///
    /// An open session is ended first; its handles do not survive the rebuild.
    pub fn rebuild_rig(&mut self, target: &mut dyn Target) {
        if !self.initialized {
            log::warn!("rebuild_rig called before init, ignoring");
            return;
        }
        self.rebuild(target);
    }

    fn rebuild(&mut self, target: &mut dyn Target) {
        self.release_session();
        // The previous handle set is gone before the new one exists
        self.rig = None;

        let bounds = self.calculator.compute_bounds(target, self.config.flatten);
        let generation = self.next_generation;
        self.next_generation += 1;
        self.rig = Some(RigBuilder::from_config(&self.config).build(&bounds, &target.pose(), generation));
        self.dirty = false;
    }

    /// Set scale limits, either as multiples of the scale captured at `init`
    /// or as absolute local scale values.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RigError::InvalidScaleLimits`] and keeps the current
    /// limits if `min`/`max` are not finite, negative or inverted.
    pub fn set_scale_limits(&mut self, min: f32, max: f32, relative_to_initial: bool) -> Result<()> {
        self.limits = compute_limits(self.initial_scale, min, max, relative_to_initial)?;
        self.config.scale_minimum = min;
        self.config.scale_maximum = max;
        self.config.scale_limits_relative = relative_to_initial;
        log::debug!("scale limits set to {:?}", self.limits);
        Ok(())
    }

    pub fn highlight_wires(&mut self) {
        self.visibility.highlight_wires();
    }

    pub fn unhighlight_wires(&mut self) {
        self.visibility.unhighlight_wires();
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(RigEvent) + 'static,
    {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Events emitted since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<RigEvent> {
        self.events.drain()
    }

    // Shape-affecting settings; the rig is rebuilt on the next tick

    pub fn set_padding(&mut self, padding: Vector3<f32>) {
        self.config.padding = padding;
        self.mark_dirty();
    }

    pub fn set_flatten(&mut self, flatten: FlattenMode) {
        self.config.flatten = flatten;
        self.mark_dirty();
    }

    pub fn set_scale_handle_size(&mut self, size: f32) {
        self.config.scale_handle_size = size;
        self.mark_dirty();
    }

    pub fn set_rotation_handle_diameter(&mut self, diameter: f32) {
        self.config.rotation_handle_diameter = diameter;
        self.mark_dirty();
    }

    pub fn set_wireframe_shape(&mut self, shape: WireframeShape) {
        self.config.wireframe_shape = shape;
        self.mark_dirty();
    }

    pub fn set_wireframe_edge_radius(&mut self, radius: f32) {
        self.config.wireframe_edge_radius = radius;
        self.mark_dirty();
    }

    pub fn set_show_wireframe(&mut self, show: bool) {
        self.config.show_wireframe = show;
        self.mark_dirty();
    }

    /// Use a target-local box instead of measuring the geometry
    pub fn set_bounds_override(&mut self, bounds_override: Option<Aabb>) {
        self.config.bounds_override = bounds_override;
        self.calculator.set_bounds_override(bounds_override);
        self.mark_dirty();
    }

    /// Replace the geometry provider after the target's shape changed
    pub fn set_geometry_source(&mut self, geometry: Box<dyn GeometrySource>) {
        self.calculator.set_source(geometry);
        self.mark_dirty();
    }

    fn mark_dirty(&mut self) {
        if self.initialized {
            self.dirty = true;
        }
    }

    // Visibility-only settings, applied immediately

    pub fn set_show_scale_handles(&mut self, show: bool) {
        self.config.show_scale_handles = show;
    }

    pub fn set_show_rotation_handle(&mut self, axis: CardinalAxis, show: bool) {
        self.config.set_show_rotation_handle_for(axis, show);
    }

    pub fn set_show_box_display(&mut self, show: bool) {
        self.config.show_box_display = show;
    }

    pub fn set_draw_tether_when_manipulating(&mut self, draw: bool) {
        self.config.draw_tether_when_manipulating = draw;
    }

    pub fn config(&self) -> &RigConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether a shape change is waiting for the next rebuild
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn rig(&self) -> Option<&Rig> {
        self.rig.as_ref()
    }

    pub fn visibility_state(&self) -> VisibilityState {
        self.visibility.state()
    }

    pub fn is_active(&self) -> bool {
        self.visibility.is_active()
    }

    pub fn display(&self) -> RigDisplay {
        self.rig
            .as_ref()
            .map_or_else(RigDisplay::hidden, |rig| self.visibility.display(&self.config, rig))
    }

    pub fn session(&self) -> Option<&ManipulationSession> {
        self.solver.session()
    }

    pub fn scale_limits(&self) -> ScaleLimits {
        self.limits
    }

    pub fn detected_sources(&self) -> &HashSet<SourceId> {
        &self.sources
    }

    /// Line to draw while manipulating, if tethering is enabled
    pub fn tether(&self) -> Option<Tether> {
        if !self.config.draw_tether_when_manipulating {
            return None;
        }
        let session = self.solver.session()?;
        let rig = self.rig.as_ref()?;
        Some(Tether {
            start: rig.handle(session.handle).world_position,
            end: session.current_grab_point,
        })
    }

    /// Instance data for every visual currently shown
    pub fn instances(&self) -> RigInstances {
        self.rig
            .as_ref()
            .map(|rig| RigInstances::build(rig, &self.visibility.display(&self.config, rig)))
            .unwrap_or_default()
    }

    /// Nearest visible handle along `ray`
    pub fn pick(&self, ray: &Ray) -> Option<PickResult> {
        let rig = self.rig.as_ref()?;
        let display = self.visibility.display(&self.config, rig);
        RigPicker::new(rig, &display, &self.config).pick(ray)
    }
}

fn compute_limits(initial_scale: Vector3<f32>, min: f32, max: f32, relative: bool) -> Result<ScaleLimits> {
    if relative {
        ScaleLimits::relative(initial_scale, min, max)
    } else {
        ScaleLimits::absolute(min, max)
    }
}
