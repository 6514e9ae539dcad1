//! [`ManipulableObject`] – the object being rotated and scaled.
//!
//! Owns the live pose plus the origin pose captured at construction, which
//! [`ManipulableObject::reset`] restores exactly.  Every mutation runs the
//! transform guard afterwards so degenerate values never survive a frame.

use grasp_math::{Pose, Quat, Vec3};

use crate::guard;

/// A manipulable object: live pose plus its recorded origin pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManipulableObject {
    pose: Pose,
    origin: Pose,
}

impl ManipulableObject {
    /// Create an object at `pose`, recording it as the origin for reset.
    ///
    /// The pose is guarded first so a corrupt spawn pose cannot become the
    /// recorded origin.
    pub fn new(mut pose: Pose) -> Self {
        guard::repair(&mut pose);
        Self { pose, origin: pose }
    }

    /// Current pose.
    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// The origin pose recorded at construction.
    pub fn origin(&self) -> &Pose {
        &self.origin
    }

    /// Rotate by `angle_deg` about a world-space axis.
    pub fn rotate_world(&mut self, axis: Vec3, angle_deg: f32) {
        let rotation = Quat::from_axis_angle_deg(axis, angle_deg);
        self.pose.orientation = rotation.mul(self.pose.orientation).normalized();
        guard::repair(&mut self.pose);
    }

    /// Replace the scale (already clamped by the caller's pipeline).
    pub fn set_scale(&mut self, scale: Vec3) {
        self.pose.scale = scale;
        guard::repair(&mut self.pose);
    }

    /// Restore orientation and scale from the origin pose exactly.
    ///
    /// Position is left alone: the object does not translate during
    /// manipulation, so the host keeps authority over where it sits.
    pub fn reset(&mut self) {
        self.pose.orientation = self.origin.orientation;
        self.pose.scale = self.origin.scale;
        guard::repair(&mut self.pose);
    }

    /// Run the transform guard over the current pose (low-frequency sweep).
    pub fn guard_sweep(&mut self) -> guard::Repair {
        guard::repair(&mut self.pose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn spawned() -> ManipulableObject {
        ManipulableObject::new(Pose::new(
            Vec3::new(0.0, 1.0, 0.5),
            Quat::from_axis_angle_deg(Vec3::Y, 15.0),
            Vec3::splat(1.5),
        ))
    }

    #[test]
    fn rotate_world_composes_in_world_space() {
        let mut obj = ManipulableObject::new(Pose::identity());
        obj.rotate_world(Vec3::Y, 90.0);
        obj.rotate_world(Vec3::Y, -30.0);
        let expected = Quat::from_axis_angle_deg(Vec3::Y, 60.0);
        assert!(obj.pose().orientation.angle_between_deg(expected) < EPS);
    }

    #[test]
    fn reset_restores_origin_exactly_after_arbitrary_mutation() {
        let mut obj = spawned();
        let origin = *obj.origin();
        obj.rotate_world(Vec3::X, 47.3);
        obj.rotate_world(Vec3::Z, -12.0);
        obj.set_scale(Vec3::splat(4.0));

        obj.reset();
        assert_eq!(obj.pose().orientation, origin.orientation);
        assert_eq!(obj.pose().scale, origin.scale);
    }

    #[test]
    fn corrupt_scale_is_repaired_on_set() {
        let mut obj = ManipulableObject::new(Pose::identity());
        obj.set_scale(Vec3::new(f32::NAN, 1.0, 1.0));
        assert_eq!(obj.pose().scale, Vec3::ONE);

        obj.set_scale(Vec3::new(150.0, 1.0, 1.0));
        assert_eq!(obj.pose().scale, Vec3::ONE);
    }

    #[test]
    fn corrupt_spawn_pose_cannot_become_origin() {
        let obj = ManipulableObject::new(Pose::new(
            Vec3::new(f32::NAN, 0.0, 0.0),
            Quat::IDENTITY,
            Vec3::ZERO,
        ));
        assert_eq!(obj.origin().position, Vec3::ZERO);
        assert_eq!(obj.origin().scale, Vec3::ONE);
    }

    #[test]
    fn guard_sweep_reports_repairs() {
        let mut obj = ManipulableObject::new(Pose::identity());
        assert!(!obj.guard_sweep().any());
    }
}
