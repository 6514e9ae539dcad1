//! [`SlicePlane`] – a grabbable plane constrained to one axis of travel.
//!
//! The complement of the main manipulable: while the right hand rotates and
//! scales the held object, the left hand drags a slicing plane back and
//! forth along a single clamped axis.  Movement is delta-based rather than
//! velocity-filtered — the plane tracks the grabber directly, with the
//! travel bounded to the configured range and everything off-axis discarded.
//!
//! Grabs reuse the session's classification and anchoring machinery: side
//! and kind come from the source's hierarchy path, hand grabs resolve a
//! tracking anchor, and by default only the left side may grab at all (the
//! mirror image of the object session's right-first rule).

use tracing::{debug, info, warn};

use grasp_math::{Vec3, inverse_lerp};
use grasp_types::{GraspError, SliceAxis, SliceConfig, Side, SourceKind};

use crate::anchor::resolve_anchor;
use crate::classify::{classify_kind, classify_side};
use crate::hierarchy::{NodeId, NodeTree};
use crate::session::GrabOutcome;

/// Axis travel below this per frame is not applied.
const MIN_APPLY_DELTA: f32 = 0.001;

#[derive(Debug, Clone, Copy)]
struct SliceGrab {
    anchor: NodeId,
    last_position: Option<Vec3>,
}

/// A slicing plane with its live position, origin, and optional active grab.
#[derive(Debug, Clone)]
pub struct SlicePlane {
    config: SliceConfig,
    position: Vec3,
    origin: Vec3,
    grab: Option<SliceGrab>,
}

impl SlicePlane {
    /// Create a plane at `position`.
    ///
    /// # Errors
    ///
    /// [`GraspError::InvalidConfig`] when `config` fails validation.
    pub fn new(position: Vec3, config: SliceConfig) -> Result<Self, GraspError> {
        config.validate()?;
        Ok(Self {
            config,
            position,
            origin: position,
            grab: None,
        })
    }

    /// Current position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Coordinate along the travel axis.
    pub fn axis_position(&self) -> f32 {
        axis_component(self.config.axis, self.position)
    }

    /// Where the plane sits in its travel range, `0.0` at `min_position`
    /// and `1.0` at `max_position`.
    pub fn progress(&self) -> f32 {
        inverse_lerp(
            self.config.min_position,
            self.config.max_position,
            self.axis_position(),
        )
    }

    /// Whether a grab is currently holding the plane.
    pub fn is_grabbed(&self) -> bool {
        self.grab.is_some()
    }

    /// Handle a grab-begin event from `source`.
    ///
    /// With `left_only` set (the default), any source that does not
    /// classify as the left side is cancelled outright.
    pub fn grab_begin(&mut self, tree: &NodeTree, source: NodeId) -> GrabOutcome {
        let Some(path) = tree.full_path(source) else {
            warn!("slice grab from unknown source node, cancelling");
            return GrabOutcome::Rejected;
        };
        let side = classify_side(&path);
        if self.config.left_only && side != Some(Side::Left) {
            debug!(%path, "non-left grab on a left-only slice, cancelling");
            return GrabOutcome::Rejected;
        }
        let kind = classify_kind(&path);
        let anchor = match kind {
            SourceKind::Hand => resolve_anchor(tree, source),
            SourceKind::Controller => source,
        };
        self.grab = Some(SliceGrab {
            anchor,
            last_position: None,
        });
        info!(axis = %self.config.axis, %kind, "slice grabbed");
        GrabOutcome::Accepted
    }

    /// Handle the grab-end event.
    pub fn grab_end(&mut self) {
        if self.grab.take().is_some() {
            info!(
                axis = %self.config.axis,
                position = self.axis_position(),
                progress = self.progress(),
                "slice released"
            );
        }
    }

    /// Advance one frame: move the plane by the grabber's delta along the
    /// travel axis, clamped to the configured range.
    ///
    /// Not grabbed, missing anchor, or non-finite sample ⇒ frame skipped.
    /// The first frame of a grab only seeds the delta baseline.
    pub fn update(&mut self, tree: &NodeTree) {
        let Some(grab) = &mut self.grab else {
            return;
        };
        let Some(current) = tree.position(grab.anchor) else {
            return;
        };
        if !current.is_finite() {
            return;
        }
        let Some(last) = grab.last_position else {
            grab.last_position = Some(current);
            return;
        };
        grab.last_position = Some(current);

        let travel = axis_component(self.config.axis, current - last) * self.config.movement_speed;
        let old = axis_component(self.config.axis, self.position);
        let new = (old + travel).clamp(self.config.min_position, self.config.max_position);
        if (new - old).abs() > MIN_APPLY_DELTA {
            set_axis_component(self.config.axis, &mut self.position, new);
        }
    }

    /// Restore the origin position.
    ///
    /// Also drops the grab's delta baseline: a reset must not replay the
    /// pre-reset grabber offset on the next frame.
    pub fn reset(&mut self) {
        self.position = self.origin;
        if let Some(grab) = &mut self.grab {
            grab.last_position = None;
        }
        info!(axis = %self.config.axis, "slice reset to origin position");
    }
}

fn axis_component(axis: SliceAxis, v: Vec3) -> f32 {
    match axis {
        SliceAxis::X => v.x,
        SliceAxis::Y => v.y,
        SliceAxis::Z => v.z,
    }
}

fn set_axis_component(axis: SliceAxis, v: &mut Vec3, value: f32) {
    match axis {
        SliceAxis::X => v.x = value,
        SliceAxis::Y => v.y = value,
        SliceAxis::Z => v.z = value,
    }
}
