//! [`Pose`] – position + orientation + scale bundle.

use crate::quat::Quat;
use crate::vec::Vec3;

/// The full spatial state of a manipulable object or tracked node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
    pub scale: Vec3,
}

impl Pose {
    /// Create a pose from its parts.
    pub const fn new(position: Vec3, orientation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            orientation,
            scale,
        }
    }

    /// Origin position, identity orientation, unit scale.
    pub const fn identity() -> Self {
        Self::new(Vec3::ZERO, Quat::IDENTITY, Vec3::ONE)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_pose_is_neutral() {
        let p = Pose::identity();
        assert_eq!(p.position, Vec3::ZERO);
        assert_eq!(p.orientation, Quat::IDENTITY);
        assert_eq!(p.scale, Vec3::ONE);
    }
}
