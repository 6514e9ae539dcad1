//! Twist filter – converts wrist/controller roll into smoothed roll
//! angular velocity.
//!
//! Hand path: the frame-to-frame orientation delta is decomposed into
//! angle + axis, and the component of that rotation around the hand's own
//! forward axis is taken as the twist.  Controller path: the device already
//! reports local angular velocity, so its Z component is used directly.
//! Both paths share one accumulator and one speed/smoothing/gate pipeline.
//!
//! The resulting increment is applied about the *viewer's* forward axis,
//! not the hand's — roll is expressed relative to what the user is looking
//! at, which reads as far more consistent than anatomical roll.

use grasp_math::{Quat, Vec3, lerp};
use grasp_types::ManipulationConfig;

use crate::frame::DeviceMotion;

/// Largest roll a single frame may apply, degrees.
const MAX_FRAME_STEP_DEG: f32 = 90.0;

/// Shared smoothed roll accumulator for both input paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwistFilter {
    velocity: f32,
}

impl TwistFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand path: twist extracted from the anchor's orientation delta.
    ///
    /// `delta` is `current ∘ inverse(last)`; `hand_forward` is the anchor's
    /// forward axis in world space.  Returns the clamped roll increment in
    /// degrees, or `None` below the gate.
    pub fn update_hand(
        &mut self,
        delta: Quat,
        hand_forward: Vec3,
        config: &ManipulationConfig,
        dt: f32,
    ) -> Option<f32> {
        if dt <= 0.0 {
            return None;
        }
        let (mut angle, axis) = delta.to_angle_axis_deg();
        if angle > 180.0 {
            angle -= 360.0;
        }
        // Project the rotation onto the forward axis: only the roll
        // component counts as twist.
        let twist = match axis.and_then(|a| a.normalized()) {
            Some(axis) => axis.dot(hand_forward) * angle,
            None => 0.0,
        };
        let target = twist / dt * config.twist_speed;
        self.advance(target, config, dt)
    }

    /// Controller path: device local angular velocity Z, rad/s → deg/s,
    /// through the identical smoothing pipeline.
    pub fn update_controller(
        &mut self,
        motion: &DeviceMotion,
        config: &ManipulationConfig,
        dt: f32,
    ) -> Option<f32> {
        if dt <= 0.0 {
            return None;
        }
        let local = motion
            .orientation
            .conjugate()
            .rotate(motion.angular_velocity);
        let target = local.z.to_degrees() * config.twist_speed;
        self.advance(target, config, dt)
    }

    fn advance(&mut self, target: f32, config: &ManipulationConfig, dt: f32) -> Option<f32> {
        self.velocity = lerp(self.velocity, target, 1.0 - config.twist_smoothing);
        if self.velocity.abs() <= config.angular_velocity_threshold {
            return None;
        }
        Some((self.velocity * dt).clamp(-MAX_FRAME_STEP_DEG, MAX_FRAME_STEP_DEG))
    }

    /// Zero the accumulator.
    pub fn reset(&mut self) {
        self.velocity = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> ManipulationConfig {
        ManipulationConfig::default()
    }

    #[test]
    fn roll_about_forward_axis_registers_as_twist() {
        let mut filter = TwistFilter::new();
        // 10° roll about the hand's forward axis in one 0.1 s frame.
        let delta = Quat::from_axis_angle_deg(Vec3::Z, 10.0);
        let step = filter
            .update_hand(delta, Vec3::Z, &cfg(), 0.1)
            .expect("above gate");
        // ω = 10/0.1 * 200 = 20000 deg/s; smoothed = 6000; step clamps to 90°.
        assert!((step - 90.0).abs() < 1e-3, "step={step}");
    }

    #[test]
    fn rotation_orthogonal_to_forward_is_not_twist() {
        let mut filter = TwistFilter::new();
        // Pitch about X while forward is Z: axis·forward = 0.
        let delta = Quat::from_axis_angle_deg(Vec3::X, 10.0);
        assert!(filter.update_hand(delta, Vec3::Z, &cfg(), 0.1).is_none());
    }

    #[test]
    fn reverse_roll_has_negative_sign() {
        let mut filter = TwistFilter::new();
        let delta = Quat::from_axis_angle_deg(Vec3::Z, -10.0);
        let step = filter
            .update_hand(delta, Vec3::Z, &cfg(), 0.1)
            .expect("above gate");
        assert!(step < 0.0);
    }

    #[test]
    fn long_way_round_angles_normalize_to_short_arc() {
        let mut filter = TwistFilter::new();
        // 350° about +Z decomposes as 350°; normalized to -10°.
        let delta = Quat::from_axis_angle_deg(Vec3::Z, 350.0);
        let step = filter
            .update_hand(delta, Vec3::Z, &cfg(), 0.1)
            .expect("above gate");
        assert!(step < 0.0, "step={step}");
    }

    #[test]
    fn identity_delta_stays_below_gate() {
        let mut filter = TwistFilter::new();
        assert!(filter
            .update_hand(Quat::IDENTITY, Vec3::Z, &cfg(), 0.1)
            .is_none());
    }

    #[test]
    fn controller_gyro_z_drives_twist() {
        let mut filter = TwistFilter::new();
        let motion = DeviceMotion {
            orientation: Quat::IDENTITY,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::Z * 0.5, // rad/s
        };
        let step = filter
            .update_controller(&motion, &cfg(), 0.1)
            .expect("above gate");
        // 0.5 rad/s ≈ 28.65 deg/s * 200 → smoothed 1718.9 → clamped 90°.
        assert!((step - 90.0).abs() < 1e-3, "step={step}");
    }

    #[test]
    fn sub_threshold_twist_is_gated() {
        let mut filter = TwistFilter::new();
        let mut config = cfg();
        config.twist_speed = 1.0;
        config.twist_smoothing = 0.0;
        let motion = DeviceMotion {
            orientation: Quat::IDENTITY,
            linear_velocity: Vec3::ZERO,
            // 0.05 rad/s ≈ 2.9 deg/s target, below the 5 deg/s gate.
            angular_velocity: Vec3::Z * 0.05,
        };
        assert!(filter.update_controller(&motion, &config, 0.1).is_none());
    }

    #[test]
    fn reset_clears_momentum() {
        let mut filter = TwistFilter::new();
        let delta = Quat::from_axis_angle_deg(Vec3::Z, 10.0);
        filter.update_hand(delta, Vec3::Z, &cfg(), 0.1);
        filter.reset();
        assert!(filter
            .update_hand(Quat::IDENTITY, Vec3::Z, &cfg(), 0.1)
            .is_none());
    }

    #[test]
    fn non_positive_dt_is_skipped() {
        let mut filter = TwistFilter::new();
        let delta = Quat::from_axis_angle_deg(Vec3::Z, 10.0);
        assert!(filter.update_hand(delta, Vec3::Z, &cfg(), 0.0).is_none());
    }
}
