//! Transform guard – validates and repairs degenerate poses.
//!
//! The distance ratios and feedback-smoothing loops in this crate can
//! produce NaN, infinities, or runaway scales under edge conditions
//! (near-zero distances, zero time deltas, corrupted upstream samples).
//! [`repair`] is the single recovery point: it never fails, it only resets
//! the offending field to a neutral value and reports what it touched.

use grasp_math::{Pose, Quat, Vec3};
use tracing::warn;

/// Scale components above this are treated as runaway state.
const MAX_SCALE_COMPONENT: f32 = 100.0;

/// Which pose fields a [`repair`] call had to reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Repair {
    pub position_reset: bool,
    pub scale_reset: bool,
    pub orientation_reset: bool,
}

impl Repair {
    /// `true` when any field was repaired.
    pub fn any(self) -> bool {
        self.position_reset || self.scale_reset || self.orientation_reset
    }
}

/// Validate `pose` in place, resetting degenerate fields:
///
/// - non-finite position → origin,
/// - non-finite, zero, or oversized scale component → `(1, 1, 1)`,
/// - non-finite orientation → identity.
pub fn repair(pose: &mut Pose) -> Repair {
    let mut repair = Repair::default();

    if !pose.position.is_finite() {
        warn!(position = ?pose.position, "invalid position, resetting to origin");
        pose.position = Vec3::ZERO;
        repair.position_reset = true;
    }

    if scale_is_degenerate(pose.scale) {
        warn!(scale = ?pose.scale, "invalid scale, resetting to (1,1,1)");
        pose.scale = Vec3::ONE;
        repair.scale_reset = true;
    }

    if !pose.orientation.is_finite() {
        warn!(orientation = ?pose.orientation, "invalid orientation, resetting to identity");
        pose.orientation = Quat::IDENTITY;
        repair.orientation_reset = true;
    }

    repair
}

fn scale_is_degenerate(scale: Vec3) -> bool {
    [scale.x, scale.y, scale.z]
        .iter()
        .any(|c| !c.is_finite() || *c == 0.0 || *c > MAX_SCALE_COMPONENT)
}
