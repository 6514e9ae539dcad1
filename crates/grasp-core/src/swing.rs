//! Swing filter – converts translational velocity into smoothed pitch/yaw
//! angular velocity.
//!
//! Two tuning paths share the filter: tracked hands (velocity derived by
//! differencing the anchor position, decomposed against the viewer's axes)
//! and controllers (device-reported velocity taken in the device's own
//! frame).  Each path keeps its own accumulator pair and its own speed and
//! smoothing constants, because hands and controllers have very different
//! noise profiles.
//!
//! Output is a per-frame rotation increment pair, already clamped, or
//! `None` when the smoothed velocities sit below the path's gate — resting
//! tremor must not creep into the object.

use grasp_math::{Vec3, lerp};
use grasp_types::ManipulationConfig;

use crate::frame::{DeviceMotion, ViewBasis};

/// Hand velocities above this are tracking glitches, not motion (m/s).
const MAX_HAND_SPEED: f32 = 10.0;

/// The hand path gates at this fraction of the configured velocity
/// threshold (hands need the extra sensitivity to register deliberate slow
/// moves).
const HAND_GATE_FACTOR: f32 = 0.5;

/// Largest rotation a single frame may apply, degrees.
const MAX_FRAME_STEP_DEG: f32 = 90.0;

/// Smoothed yaw/pitch pair produced for one frame, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwingStep {
    pub yaw_deg: f32,
    pub pitch_deg: f32,
}

#[derive(Debug, Clone, Copy, Default)]
struct AxisPair {
    yaw: f32,
    pitch: f32,
}

impl AxisPair {
    /// Advance both accumulators toward their targets and emit the clamped
    /// frame increments, gated on the smoothed magnitudes.
    fn advance(
        &mut self,
        yaw_target: f32,
        pitch_target: f32,
        smoothing: f32,
        gate: f32,
        dt: f32,
    ) -> Option<SwingStep> {
        let t = 1.0 - smoothing;
        self.yaw = lerp(self.yaw, yaw_target, t);
        self.pitch = lerp(self.pitch, pitch_target, t);

        if self.yaw.abs() <= gate && self.pitch.abs() <= gate {
            return None;
        }
        Some(SwingStep {
            yaw_deg: (self.yaw * dt).clamp(-MAX_FRAME_STEP_DEG, MAX_FRAME_STEP_DEG),
            pitch_deg: (self.pitch * dt).clamp(-MAX_FRAME_STEP_DEG, MAX_FRAME_STEP_DEG),
        })
    }
}

/// Translational-velocity → pitch/yaw filter with independent hand and
/// controller accumulators.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwingFilter {
    hand: AxisPair,
    controller: AxisPair,
}

impl SwingFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand path: anchor velocity decomposed against the viewer's axes.
    ///
    /// Returns `None` (no rotation this frame) for non-positive `dt` or
    /// when both smoothed velocities sit below the hand gate.
    pub fn update_hand(
        &mut self,
        velocity: Vec3,
        view: &ViewBasis,
        config: &ManipulationConfig,
        dt: f32,
    ) -> Option<SwingStep> {
        if dt <= 0.0 {
            return None;
        }
        let velocity = velocity.clamp_magnitude(MAX_HAND_SPEED);
        let right_component = velocity.dot(view.right);
        let forward_component = velocity.dot(view.forward);

        self.hand.advance(
            right_component * config.hand_rotation_speed,
            -forward_component * config.hand_rotation_speed,
            config.hand_rotation_smoothing,
            config.velocity_threshold * HAND_GATE_FACTOR,
            dt,
        )
    }

    /// Controller path: device-reported velocity, rotated into the device's
    /// local frame; local X drives yaw and local Z drives pitch directly.
    pub fn update_controller(
        &mut self,
        motion: &DeviceMotion,
        config: &ManipulationConfig,
        dt: f32,
    ) -> Option<SwingStep> {
        if dt <= 0.0 {
            return None;
        }
        let local = motion
            .orientation
            .conjugate()
            .rotate(motion.linear_velocity);

        self.controller.advance(
            local.x * config.rotation_speed,
            -local.z * config.rotation_speed,
            config.rotation_smoothing,
            config.velocity_threshold,
            dt,
        )
    }

    /// Zero every accumulator on both paths.
    pub fn reset(&mut self) {
        self.hand = AxisPair::default();
        self.controller = AxisPair::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grasp_math::Quat;

    const EPS: f32 = 1e-4;

    fn cfg() -> ManipulationConfig {
        ManipulationConfig::default()
    }

    #[test]
    fn rightward_hand_motion_yields_yaw() {
        let mut filter = SwingFilter::new();
        let view = ViewBasis::default();
        // 1 m/s along the viewer's right axis.
        let step = filter
            .update_hand(Vec3::X, &view, &cfg(), 0.1)
            .expect("above gate");
        // target = 1.0 * 300; smoothed = lerp(0, 300, 0.4) = 120; step = 12°.
        assert!((step.yaw_deg - 12.0).abs() < EPS, "yaw={}", step.yaw_deg);
        assert!(step.pitch_deg.abs() < EPS);
    }

    #[test]
    fn forward_hand_motion_yields_negative_pitch() {
        let mut filter = SwingFilter::new();
        let view = ViewBasis::default();
        let step = filter
            .update_hand(Vec3::Z, &view, &cfg(), 0.1)
            .expect("above gate");
        assert!(step.pitch_deg < 0.0);
        assert!(step.yaw_deg.abs() < EPS);
    }

    #[test]
    fn hand_velocity_is_magnitude_clamped() {
        let mut filter = SwingFilter::new();
        let view = ViewBasis::default();
        // 100 m/s glitch clamps to 10 m/s before the speed multiplier.
        let step = filter
            .update_hand(Vec3::X * 100.0, &view, &cfg(), 0.001)
            .expect("above gate");
        // target = 10 * 300 = 3000; smoothed = 1200; step = 1.2°.
        assert!((step.yaw_deg - 1.2).abs() < 1e-3, "yaw={}", step.yaw_deg);
    }

    #[test]
    fn frame_step_is_clamped_to_ninety_degrees() {
        let mut filter = SwingFilter::new();
        let view = ViewBasis::default();
        let step = filter
            .update_hand(Vec3::X * 10.0, &view, &cfg(), 1.0)
            .expect("above gate");
        assert!((step.yaw_deg - 90.0).abs() < EPS);
    }

    #[test]
    fn resting_hand_stays_below_gate() {
        let mut filter = SwingFilter::new();
        let view = ViewBasis::default();
        // Sub-gate tremor: smoothed velocity stays under 0.005 (= 0.01 × 0.5).
        let step = filter.update_hand(Vec3::X * 0.00001, &view, &cfg(), 0.01);
        assert!(step.is_none());
    }

    #[test]
    fn hand_gate_is_half_the_controller_gate() {
        // A smoothed velocity between the two gates passes as a hand but
        // not as a controller.
        let mut config = cfg();
        config.hand_rotation_speed = 1.0;
        config.rotation_speed = 1.0;
        config.hand_rotation_smoothing = 0.0;
        config.rotation_smoothing = 0.0;
        config.velocity_threshold = 1.0;

        let view = ViewBasis::default();
        let motion = DeviceMotion {
            orientation: Quat::IDENTITY,
            linear_velocity: Vec3::X * 0.7,
            angular_velocity: Vec3::ZERO,
        };

        let mut filter = SwingFilter::new();
        assert!(filter.update_hand(Vec3::X * 0.7, &view, &config, 0.1).is_some());
        assert!(filter.update_controller(&motion, &config, 0.1).is_none());
    }

    #[test]
    fn controller_velocity_is_taken_in_device_frame() {
        let mut filter = SwingFilter::new();
        let mut config = cfg();
        config.rotation_smoothing = 0.0; // smoothed == target

        // Device yawed -90° about Y: the inverse rotation maps the world +Z
        // velocity onto the device's local +X.
        let motion = DeviceMotion {
            orientation: Quat::from_axis_angle_deg(Vec3::Y, -90.0),
            linear_velocity: Vec3::Z * 0.1,
            angular_velocity: Vec3::ZERO,
        };
        let step = filter
            .update_controller(&motion, &config, 0.1)
            .expect("above gate");
        // local.x = 0.1, so yaw = 0.1 * 400 * dt = 4°.
        assert!((step.yaw_deg - 4.0).abs() < 1e-3, "yaw={}", step.yaw_deg);
        assert!(step.pitch_deg.abs() < 1e-3);
    }

    #[test]
    fn smoothing_converges_toward_target_over_frames() {
        let mut filter = SwingFilter::new();
        let view = ViewBasis::default();
        let mut last = 0.0;
        for _ in 0..40 {
            if let Some(step) = filter.update_hand(Vec3::X, &view, &cfg(), 0.1) {
                last = step.yaw_deg;
            }
        }
        // Steady state: 300 deg/s * 0.1 s = 30° per frame.
        assert!((last - 30.0).abs() < 0.1, "yaw={last}");
    }

    #[test]
    fn reset_zeroes_both_paths() {
        let mut filter = SwingFilter::new();
        let view = ViewBasis::default();
        filter.update_hand(Vec3::X, &view, &cfg(), 0.1);
        filter.reset();
        // Accumulators back at zero: tiny input stays below the gate again.
        assert!(filter
            .update_hand(Vec3::X * 0.00001, &view, &cfg(), 0.01)
            .is_none());
    }

    #[test]
    fn non_positive_dt_is_skipped() {
        let mut filter = SwingFilter::new();
        let view = ViewBasis::default();
        assert!(filter.update_hand(Vec3::X, &view, &cfg(), 0.0).is_none());
        assert!(filter.update_hand(Vec3::X, &view, &cfg(), -0.1).is_none());
    }
}
