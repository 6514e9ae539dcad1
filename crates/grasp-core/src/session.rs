//! [`GraspSession`] – grab-state machine and per-frame dispatcher.
//!
//! The session owns the manipulable object while any grab is active and
//! orchestrates every other component: grab/release events drive the state
//! machine, each frame tick routes to the swing/twist filters (single grab)
//! or the two-handed scaler (dual grab), and a release that returns the
//! session to idle synchronously runs the pose matcher before the call
//! returns.
//!
//! One asymmetry is deliberate: a grab can only start from the right side.
//! A left-side grab while idle is cancelled outright; the left hand can
//! only *join* an existing right-side grab to enter two-handed scaling.
//!
//! # Example
//!
//! ```rust
//! use grasp_core::hierarchy::NodeTree;
//! use grasp_core::session::{GrabOutcome, GraspSession};
//! use grasp_math::Pose;
//! use grasp_types::ManipulationConfig;
//!
//! let mut tree = NodeTree::new();
//! let rig = tree.insert("XR Origin", None);
//! let source = tree.insert("RightHand Controller", Some(rig));
//!
//! let mut session =
//!     GraspSession::new(Pose::identity(), ManipulationConfig::default()).unwrap();
//! assert_eq!(session.grab_begin(&tree, source), GrabOutcome::Accepted);
//! ```

use tracing::{debug, info, warn};

use grasp_math::{Pose, Quat, Vec3};
use grasp_types::{
    ErrorReport, GraspError, ManipulationConfig, SessionContext, Side, SourceKind, TargetConfig,
};

use crate::anchor::resolve_anchor;
use crate::classify::{classify_kind, classify_side};
use crate::frame::FrameInput;
use crate::hierarchy::{NodeId, NodeTree};
use crate::matcher;
use crate::object::ManipulableObject;
use crate::scaler::ScaleSession;
use crate::swing::SwingFilter;
use crate::twist::TwistFilter;

/// The guard sweeps the pose every this-many frames, independent of what
/// the frame otherwise did.
const GUARD_SWEEP_INTERVAL: u64 = 60;

// ────────────────────────────────────────────────────────────────────────────
// Public types
// ────────────────────────────────────────────────────────────────────────────

/// What a [`GraspSession::grab_begin`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrabOutcome {
    /// A right-side grab started (or replaced) the session's primary hold.
    Accepted,
    /// A left-side grab joined an existing hold; scaling is now active.
    Joined,
    /// The grab was cancelled: unknown source, unclassifiable side, or a
    /// left-side grab with nothing to join.
    Rejected,
}

/// Coarse session phase, mainly for hosts and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrabPhase {
    Idle,
    Single,
    Dual,
}

// ────────────────────────────────────────────────────────────────────────────
// Internal state
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct ActiveGrab {
    kind: SourceKind,
    anchor: NodeId,
    last_position: Option<Vec3>,
    last_orientation: Option<Quat>,
}

impl ActiveGrab {
    fn new(kind: SourceKind, anchor: NodeId) -> Self {
        Self {
            kind,
            anchor,
            last_position: None,
            last_orientation: None,
        }
    }

    fn clear_samples(&mut self) {
        self.last_position = None;
        self.last_orientation = None;
    }
}

enum GrabState {
    Idle,
    Single(ActiveGrab),
    Dual {
        primary: ActiveGrab,
        secondary: ActiveGrab,
        scaler: ScaleSession,
    },
}

type MatchHandler = Box<dyn FnMut(&ErrorReport)>;

// ────────────────────────────────────────────────────────────────────────────
// GraspSession
// ────────────────────────────────────────────────────────────────────────────

/// Owner of the grab-session state machine and the manipulated object.
pub struct GraspSession {
    object: ManipulableObject,
    config: ManipulationConfig,
    target: Option<TargetConfig>,
    state: GrabState,
    swing: SwingFilter,
    twist: TwistFilter,
    context: SessionContext,
    frame_count: u64,
    on_match: Option<MatchHandler>,
}

impl GraspSession {
    /// Create a session for an object spawned at `initial_pose`.
    ///
    /// # Errors
    ///
    /// [`GraspError::InvalidConfig`] when `config` fails validation.
    pub fn new(initial_pose: Pose, config: ManipulationConfig) -> Result<Self, GraspError> {
        config.validate()?;
        Ok(Self {
            object: ManipulableObject::new(initial_pose),
            config,
            target: None,
            state: GrabState::Idle,
            swing: SwingFilter::new(),
            twist: TwistFilter::new(),
            context: SessionContext::default(),
            frame_count: 0,
            on_match: None,
        })
    }

    // ── Registration surface ────────────────────────────────────────────────

    /// Set the target configuration for the current attempt.
    pub fn set_target(&mut self, target: TargetConfig) {
        self.target = Some(target);
    }

    /// Register the handler fired synchronously on a successful match.
    ///
    /// Replaces any previously registered handler; pair with
    /// [`GraspSession::clear_match_handler`] to bound its lifetime.
    pub fn set_match_handler(&mut self, handler: impl FnMut(&ErrorReport) + 'static) {
        self.on_match = Some(Box::new(handler));
    }

    /// Remove the registered match handler.
    pub fn clear_match_handler(&mut self) {
        self.on_match = None;
    }

    // ── Accessors ───────────────────────────────────────────────────────────

    /// The manipulated object.
    pub fn object(&self) -> &ManipulableObject {
        &self.object
    }

    /// Current coarse phase.
    pub fn phase(&self) -> GrabPhase {
        match self.state {
            GrabState::Idle => GrabPhase::Idle,
            GrabState::Single(_) => GrabPhase::Single,
            GrabState::Dual { .. } => GrabPhase::Dual,
        }
    }

    /// Per-attempt bookkeeping shared with the trial collaborator.
    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    /// Mutable context access (e.g. to clear between attempts).
    pub fn context_mut(&mut self) -> &mut SessionContext {
        &mut self.context
    }

    // ── Grab events ─────────────────────────────────────────────────────────

    /// Handle a grab-begin event from `source`.
    ///
    /// Side and kind are classified from the source's hierarchy path, and
    /// the tracking anchor is resolved here, inside the event — never
    /// lazily — so the first frame tick already has a stable anchor.
    pub fn grab_begin(&mut self, tree: &NodeTree, source: NodeId) -> GrabOutcome {
        self.context.record_grab_attempt();

        let Some(path) = tree.full_path(source) else {
            warn!("grab from unknown source node, cancelling");
            return GrabOutcome::Rejected;
        };
        let Some(side) = classify_side(&path) else {
            warn!(%path, "source path names no side, cancelling");
            return GrabOutcome::Rejected;
        };
        let kind = classify_kind(&path);
        let anchor = match kind {
            SourceKind::Hand => resolve_anchor(tree, source),
            SourceKind::Controller => source,
        };
        let grab = ActiveGrab::new(kind, anchor);

        match side {
            Side::Right => {
                // A (re-)grab restarts the motion filters from rest.
                self.swing.reset();
                self.twist.reset();
                self.state = match std::mem::replace(&mut self.state, GrabState::Idle) {
                    GrabState::Dual { secondary, .. } => {
                        let scaler = self.scale_baseline(tree, grab.anchor, secondary.anchor);
                        GrabState::Dual {
                            primary: grab,
                            secondary,
                            scaler,
                        }
                    }
                    _ => GrabState::Single(grab),
                };
                info!(%side, %kind, "grab started");
                GrabOutcome::Accepted
            }
            Side::Left => match std::mem::replace(&mut self.state, GrabState::Idle) {
                GrabState::Idle => {
                    debug!("left grab while idle cancelled, right must hold first");
                    GrabOutcome::Rejected
                }
                GrabState::Single(primary) | GrabState::Dual { primary, .. } => {
                    let scaler = self.scale_baseline(tree, primary.anchor, grab.anchor);
                    self.state = GrabState::Dual {
                        primary,
                        secondary: grab,
                        scaler,
                    };
                    info!(%kind, "left joined, two-handed scaling active");
                    GrabOutcome::Joined
                }
            },
        }
    }

    /// Handle a grab-end event for `side`.
    ///
    /// A release that returns the session to idle runs the pose matcher
    /// synchronously; the report (also delivered to the registered match
    /// handler and stored in the context) is returned to the caller.
    pub fn grab_end(&mut self, side: Side) -> Option<ErrorReport> {
        match (std::mem::replace(&mut self.state, GrabState::Idle), side) {
            (GrabState::Idle, _) => {
                debug!(%side, "release while idle ignored");
                None
            }
            (GrabState::Single(grab), Side::Left) => {
                // Left never held anything in a single grab; keep holding.
                self.state = GrabState::Single(grab);
                None
            }
            (GrabState::Dual { primary, .. }, Side::Left) => {
                info!("left released, scaling stopped, single-hand rotation resumes");
                self.state = GrabState::Single(primary);
                None
            }
            (GrabState::Single(_), Side::Right) | (GrabState::Dual { .. }, Side::Right) => {
                info!("right released, session idle");
                self.evaluate_match()
            }
        }
    }

    // ── Frame tick ──────────────────────────────────────────────────────────

    /// Advance one frame.
    ///
    /// Dual grab dispatches only to the scaler (rotation is suppressed
    /// while both hands hold the object); a single grab dispatches to the
    /// swing and twist filters of the active source kind.  Missing anchors
    /// or device samples skip the frame silently.
    pub fn update(&mut self, tree: &NodeTree, frame: &FrameInput) {
        self.frame_count += 1;
        if frame.reset_pressed {
            self.reset();
        }

        if frame.dt > 0.0 {
            let Self {
                state,
                swing,
                twist,
                object,
                config,
                ..
            } = &mut *self;
            match state {
                GrabState::Idle => {}
                GrabState::Dual {
                    primary,
                    secondary,
                    scaler,
                } => {
                    if let (Some(a), Some(b)) = (
                        tree.position(primary.anchor),
                        tree.position(secondary.anchor),
                    ) && let Some(scale) = scaler.update(a.distance(b), config)
                    {
                        object.set_scale(scale);
                    }
                }
                GrabState::Single(grab) => match grab.kind {
                    SourceKind::Hand => {
                        drive_hand(grab, swing, twist, object, config, tree, frame);
                    }
                    SourceKind::Controller => {
                        drive_controller(swing, twist, object, config, frame);
                    }
                },
            }
        }

        if self.frame_count % GUARD_SWEEP_INTERVAL == 0 {
            self.object.guard_sweep();
        }
    }

    /// Restore the object's origin pose and drop all accumulated motion:
    /// smoothing accumulators on both filter paths and the per-grab
    /// last-sample memory.
    pub fn reset(&mut self) {
        self.object.reset();
        self.swing.reset();
        self.twist.reset();
        match &mut self.state {
            GrabState::Idle => {}
            GrabState::Single(grab) => grab.clear_samples(),
            GrabState::Dual {
                primary, secondary, ..
            } => {
                primary.clear_samples();
                secondary.clear_samples();
            }
        }
        info!("object reset to origin pose");
    }

    // ── Internals ───────────────────────────────────────────────────────────

    fn scale_baseline(&self, tree: &NodeTree, a: NodeId, b: NodeId) -> ScaleSession {
        let distance = match (tree.position(a), tree.position(b)) {
            (Some(pa), Some(pb)) => pa.distance(pb),
            _ => f32::NAN,
        };
        ScaleSession::begin(distance, self.object.pose().scale)
    }

    fn evaluate_match(&mut self) -> Option<ErrorReport> {
        let Some(target) = &self.target else {
            debug!("no target configured, skipping match evaluation");
            return None;
        };
        let pose = self.object.pose();
        let report = matcher::evaluate(pose.orientation, pose.scale, target)?;
        self.context.store_report(report);
        if let Some(handler) = self.on_match.as_mut() {
            handler(&report);
        }
        Some(report)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Per-frame drive paths
// ────────────────────────────────────────────────────────────────────────────

fn drive_hand(
    grab: &mut ActiveGrab,
    swing: &mut SwingFilter,
    twist: &mut TwistFilter,
    object: &mut ManipulableObject,
    config: &ManipulationConfig,
    tree: &NodeTree,
    frame: &FrameInput,
) {
    let (Some(position), Some(orientation)) =
        (tree.position(grab.anchor), tree.orientation(grab.anchor))
    else {
        return;
    };
    if !position.is_finite() {
        return;
    }
    // First frame of the grab: seed only, rotate from the next frame on.
    let (Some(last_position), Some(last_orientation)) =
        (grab.last_position, grab.last_orientation)
    else {
        grab.last_position = Some(position);
        grab.last_orientation = Some(orientation);
        return;
    };

    let velocity = (position - last_position) / frame.dt;
    if let Some(step) = swing.update_hand(velocity, &frame.view, config, frame.dt) {
        object.rotate_world(Vec3::X, -step.pitch_deg);
        object.rotate_world(Vec3::Y, -step.yaw_deg);
    }

    let delta = orientation.mul(last_orientation.conjugate());
    let hand_forward = orientation.rotate(Vec3::Z);
    if let Some(roll) = twist.update_hand(delta, hand_forward, config, frame.dt) {
        object.rotate_world(frame.view.forward, roll);
    }

    grab.last_position = Some(position);
    grab.last_orientation = Some(orientation);
}

fn drive_controller(
    swing: &mut SwingFilter,
    twist: &mut TwistFilter,
    object: &mut ManipulableObject,
    config: &ManipulationConfig,
    frame: &FrameInput,
) {
    let Some(motion) = frame.right_motion.as_ref() else {
        return;
    };
    if let Some(step) = swing.update_controller(motion, config, frame.dt) {
        object.rotate_world(Vec3::X, -step.pitch_deg);
        object.rotate_world(Vec3::Y, -step.yaw_deg);
    }
    if let Some(roll) = twist.update_controller(motion, config, frame.dt) {
        object.rotate_world(frame.view.forward, roll);
    }
}
