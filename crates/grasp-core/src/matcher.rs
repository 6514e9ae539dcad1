//! Pose matcher – tolerance-based scoring of a final pose against the
//! active target configuration.
//!
//! Runs once per release-to-idle transition.  Rotation is judged first by
//! shortest-arc angular distance; only when it passes does scale get
//! checked, axis by axis against the worst offender.  A miss on either
//! produces no report at all — partial scores are never emitted.

use chrono::Utc;
use grasp_math::{Quat, Vec3};
use grasp_types::{ErrorReport, TargetConfig};
use tracing::{debug, info};

/// Compare `orientation`/`scale` to `target`.
///
/// Returns the normalized error report on a match, `None` when either the
/// rotation or the scale lies outside its tolerance window.
///
/// The three rotation slots of the report carry the same aggregate angular
/// distance percentage (no per-axis decomposition is measured), and the
/// aggregate is the rounded mean of the rotation and scale percentages.
pub fn evaluate(orientation: Quat, scale: Vec3, target: &TargetConfig) -> Option<ErrorReport> {
    let [ex, ey, ez] = target.rotation_euler_deg;
    let target_orientation = Quat::from_euler_deg(ex, ey, ez);
    let rotation_diff = orientation.angle_between_deg(target_orientation);

    if rotation_diff > target.rotation_tolerance_deg {
        debug!(
            rotation_diff,
            tolerance = target.rotation_tolerance_deg,
            "rotation outside tolerance, no match"
        );
        return None;
    }

    let errors = [
        (scale.x - target.scale[0]).abs(),
        (scale.y - target.scale[1]).abs(),
        (scale.z - target.scale[2]).abs(),
    ];
    let max_scale_error = errors.into_iter().fold(0.0f32, f32::max);

    if max_scale_error > target.scale_tolerance {
        debug!(
            max_scale_error,
            tolerance = target.scale_tolerance,
            "scale outside tolerance, no match"
        );
        return None;
    }

    let rotation_percent = rotation_diff / target.rotation_tolerance_deg * 100.0;
    let scale_percent = max_scale_error / target.scale_tolerance * 100.0;
    let rotation_slot = rotation_percent.round() as i32;

    let report = ErrorReport {
        rotation_x: rotation_slot,
        rotation_y: rotation_slot,
        rotation_z: rotation_slot,
        scale: scale_percent.round() as i32,
        aggregate: ((rotation_percent + scale_percent) / 2.0).round() as i32,
        matched_at: Utc::now(),
    };
    info!(
        rotation_diff,
        max_scale_error,
        aggregate = report.aggregate,
        "pose matched target"
    );
    Some(report)
}
