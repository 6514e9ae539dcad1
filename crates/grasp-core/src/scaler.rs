//! Two-handed scaler – maps inter-anchor distance ratio to object scale.
//!
//! A scale session is created the moment both sides hold the object and
//! records the baseline: the distance between the two anchors and the scale
//! at that instant.  Each subsequent frame scales uniformly by the ratio of
//! current to baseline distance, clamped twice — once on the raw factor and
//! once componentwise against the configured scale bounds.

use grasp_math::Vec3;
use grasp_types::ManipulationConfig;
use tracing::{debug, warn};

/// Substitute baseline when the measured grab distance is unusable (m).
const DEFAULT_GRAB_DISTANCE: f32 = 0.3;

/// Anchor distances below this are sensor noise or overlapping hands (m).
const MIN_GRAB_DISTANCE: f32 = 0.01;

/// Anchor distances above this cannot be a two-handed grab (m).
const MAX_GRAB_DISTANCE: f32 = 10.0;

/// Raw distance-ratio clamp, before the per-component scale bounds.
const FACTOR_RANGE: (f32, f32) = (0.1, 10.0);

/// Baseline state of one two-handed scaling session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleSession {
    initial_distance: f32,
    scale_at_start: Vec3,
}

impl ScaleSession {
    /// Record the baseline for a dual grab that begins now.
    ///
    /// A degenerate initial distance (NaN, too close, too far) is replaced
    /// with [`DEFAULT_GRAB_DISTANCE`] so the session stays usable.
    pub fn begin(anchor_distance: f32, current_scale: Vec3) -> Self {
        let initial_distance = if anchor_distance.is_nan()
            || anchor_distance < MIN_GRAB_DISTANCE
            || anchor_distance > MAX_GRAB_DISTANCE
        {
            warn!(
                distance = anchor_distance,
                fallback = DEFAULT_GRAB_DISTANCE,
                "degenerate initial grab distance, using fallback"
            );
            DEFAULT_GRAB_DISTANCE
        } else {
            anchor_distance
        };
        debug!(initial_distance, ?current_scale, "two-handed scaling started");
        Self {
            initial_distance,
            scale_at_start: current_scale,
        }
    }

    /// Scale for the current frame, or `None` when the measured distance is
    /// degenerate and the frame should be skipped.
    pub fn update(&self, current_distance: f32, config: &ManipulationConfig) -> Option<Vec3> {
        if current_distance.is_nan() || current_distance < MIN_GRAB_DISTANCE {
            return None;
        }
        let factor =
            (current_distance / self.initial_distance).clamp(FACTOR_RANGE.0, FACTOR_RANGE.1);
        Some(
            (self.scale_at_start * factor)
                .clamp_components(config.min_scale, config.max_scale),
        )
    }
}
