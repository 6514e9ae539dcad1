//! [`Quat`] – unit quaternion rotation (w, x, y, z convention).

use crate::vec::Vec3;

/// A unit quaternion representing a 3-D rotation.
///
/// Construction helpers keep the quaternion normalized; arithmetic on
/// already-unit inputs stays unit up to floating-point drift, which
/// [`Quat::normalized`] can shed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quat {
    pub w: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Quat {
    /// Create a quaternion from raw components.  The caller is responsible
    /// for providing a unit quaternion (|q| = 1).
    pub const fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self { w, x, y, z }
    }

    /// The identity rotation (no rotation).
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 0.0);

    /// Rotation of `angle_deg` degrees around `axis`.
    ///
    /// A degenerate (near-zero) axis yields the identity.
    pub fn from_axis_angle_deg(axis: Vec3, angle_deg: f32) -> Self {
        let Some(axis) = axis.normalized() else {
            return Self::IDENTITY;
        };
        let half = angle_deg.to_radians() * 0.5;
        let s = half.sin();
        Self::new(half.cos(), axis.x * s, axis.y * s, axis.z * s)
    }

    /// Rotation from Euler angles in degrees, applied in Z-X-Y order
    /// (roll about Z, then pitch about X, then yaw about Y), composed in
    /// world space as `qy * qx * qz`.
    pub fn from_euler_deg(x_deg: f32, y_deg: f32, z_deg: f32) -> Self {
        let qx = Self::from_axis_angle_deg(Vec3::X, x_deg);
        let qy = Self::from_axis_angle_deg(Vec3::Y, y_deg);
        let qz = Self::from_axis_angle_deg(Vec3::Z, z_deg);
        qy.mul(qx).mul(qz)
    }

    /// Hamilton product: compose two rotations (`self` applied after `rhs`).
    pub fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        )
    }

    /// Conjugate (== inverse for a unit quaternion).
    pub fn conjugate(self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    /// Rescale to unit length.  A degenerate quaternion collapses to the
    /// identity rather than propagating NaN.
    pub fn normalized(self) -> Self {
        let norm =
            (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt();
        if !norm.is_finite() || norm < 1e-6 {
            return Self::IDENTITY;
        }
        Self::new(self.w / norm, self.x / norm, self.y / norm, self.z / norm)
    }

    /// Rotate a vector by this quaternion: p' = q * p * q*.
    pub fn rotate(self, v: Vec3) -> Vec3 {
        let p = Self::new(0.0, v.x, v.y, v.z);
        let rotated = self.mul(p).mul(self.conjugate());
        Vec3::new(rotated.x, rotated.y, rotated.z)
    }

    /// Decompose into rotation angle (degrees, `[0, 360)`) and unit axis.
    ///
    /// Returns `None` for the axis when the rotation is too close to
    /// identity for the axis to be meaningful.
    pub fn to_angle_axis_deg(self) -> (f32, Option<Vec3>) {
        let q = self.normalized();
        let w = q.w.clamp(-1.0, 1.0);
        let angle = 2.0 * w.acos().to_degrees();
        let s = (1.0 - w * w).sqrt();
        if s < 1e-4 {
            return (angle, None);
        }
        (angle, Some(Vec3::new(q.x / s, q.y / s, q.z / s)))
    }

    /// Shortest-arc angular distance to `rhs`, in degrees, always in
    /// `[0, 180]`.
    pub fn angle_between_deg(self, rhs: Self) -> f32 {
        let a = self.normalized();
        let b = rhs.normalized();
        let dot =
            (a.w * b.w + a.x * b.x + a.y * b.y + a.z * b.z).abs().min(1.0);
        2.0 * dot.acos().to_degrees()
    }

    /// `true` when no component is NaN or infinite.
    pub fn is_finite(self) -> bool {
        self.w.is_finite() && self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn identity_rotate_is_noop() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        let r = Quat::IDENTITY.rotate(v);
        assert!((r.x - 1.0).abs() < EPS);
        assert!((r.y - 2.0).abs() < EPS);
        assert!((r.z - 3.0).abs() < EPS);
    }

    #[test]
    fn ninety_deg_yaw_rotates_z_to_x() {
        // Left-handed-free check: 90° about +Y maps +Z onto +X.
        let q = Quat::from_axis_angle_deg(Vec3::Y, 90.0);
        let r = q.rotate(Vec3::Z);
        assert!((r.x - 1.0).abs() < EPS, "x={}", r.x);
        assert!(r.y.abs() < EPS);
        assert!(r.z.abs() < EPS);
    }

    #[test]
    fn conjugate_is_inverse() {
        let q = Quat::from_axis_angle_deg(Vec3::new(1.0, 2.0, -0.5), 73.0);
        let prod = q.mul(q.conjugate());
        assert!((prod.w - 1.0).abs() < EPS);
        assert!(prod.x.abs() < EPS);
        assert!(prod.y.abs() < EPS);
        assert!(prod.z.abs() < EPS);
    }

    #[test]
    fn axis_angle_round_trip() {
        let q = Quat::from_axis_angle_deg(Vec3::X, 45.0);
        let (angle, axis) = q.to_angle_axis_deg();
        assert!((angle - 45.0).abs() < EPS);
        let axis = axis.unwrap();
        assert!((axis.x - 1.0).abs() < EPS);
        assert!(axis.y.abs() < EPS);
    }

    #[test]
    fn near_identity_has_no_axis() {
        let (angle, axis) = Quat::IDENTITY.to_angle_axis_deg();
        assert!(angle.abs() < EPS);
        assert!(axis.is_none());
    }

    #[test]
    fn angle_between_matches_constructed_rotation() {
        let a = Quat::IDENTITY;
        let b = Quat::from_axis_angle_deg(Vec3::Y, 30.0);
        assert!((a.angle_between_deg(b) - 30.0).abs() < EPS);
    }

    #[test]
    fn angle_between_takes_the_shortest_arc() {
        // 350° one way is 10° the other.
        let a = Quat::IDENTITY;
        let b = Quat::from_axis_angle_deg(Vec3::Y, 350.0);
        assert!((a.angle_between_deg(b) - 10.0).abs() < 1e-3);
    }

    #[test]
    fn angle_between_is_symmetric() {
        let a = Quat::from_axis_angle_deg(Vec3::X, 20.0);
        let b = Quat::from_axis_angle_deg(Vec3::Y, 60.0);
        assert!((a.angle_between_deg(b) - b.angle_between_deg(a)).abs() < EPS);
    }

    #[test]
    fn euler_single_axis_matches_axis_angle() {
        let e = Quat::from_euler_deg(0.0, 90.0, 0.0);
        let q = Quat::from_axis_angle_deg(Vec3::Y, 90.0);
        assert!(e.angle_between_deg(q) < EPS);

        let e = Quat::from_euler_deg(30.0, 0.0, 0.0);
        let q = Quat::from_axis_angle_deg(Vec3::X, 30.0);
        assert!(e.angle_between_deg(q) < EPS);
    }

    #[test]
    fn degenerate_axis_yields_identity() {
        let q = Quat::from_axis_angle_deg(Vec3::ZERO, 90.0);
        assert_eq!(q, Quat::IDENTITY);
    }

    #[test]
    fn normalized_recovers_from_drift() {
        let q = Quat::new(2.0, 0.0, 0.0, 0.0).normalized();
        assert!((q.w - 1.0).abs() < EPS);
    }

    #[test]
    fn is_finite_rejects_nan() {
        assert!(Quat::IDENTITY.is_finite());
        assert!(!Quat::new(f32::NAN, 0.0, 0.0, 0.0).is_finite());
    }
}
