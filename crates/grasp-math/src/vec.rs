//! [`Vec3`] – 3-component `f32` vector, plus the scalar [`lerp`] helper.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

/// A 3-D vector (position, velocity, scale, or axis depending on context).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    /// Create a new vector.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// All components one (the neutral scale).
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    /// World X axis.
    pub const X: Self = Self::new(1.0, 0.0, 0.0);

    /// World Y axis.
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);

    /// World Z axis.
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Vector with every component set to `v`.
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    /// Dot product.
    pub fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    /// Cross product (right-handed).
    pub fn cross(self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    /// Squared Euclidean length.
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Euclidean length.
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Distance between two points.
    pub fn distance(self, rhs: Self) -> f32 {
        (self - rhs).length()
    }

    /// Unit vector in the same direction, or `None` when the length is
    /// too small to normalize safely.
    pub fn normalized(self) -> Option<Self> {
        let len = self.length();
        if len < 1e-6 {
            return None;
        }
        Some(self / len)
    }

    /// Same direction, length capped at `max`.
    ///
    /// Vectors already within the cap are returned unchanged.
    pub fn clamp_magnitude(self, max: f32) -> Self {
        let len_sq = self.length_squared();
        if len_sq <= max * max {
            return self;
        }
        self * (max / len_sq.sqrt())
    }

    /// Clamp every component to `[min, max]` independently.
    pub fn clamp_components(self, min: f32, max: f32) -> Self {
        Self::new(
            self.x.clamp(min, max),
            self.y.clamp(min, max),
            self.z.clamp(min, max),
        )
    }

    /// `true` when no component is NaN or infinite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f32> for Vec3 {
    type Output = Self;
    fn div(self, rhs: f32) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// Linear interpolation between `a` and `b` with `t` clamped to `[0, 1]`.
///
/// Every smoothing accumulator in the filter pipeline is advanced with this
/// function, so the clamp guarantees the result never overshoots either
/// endpoint.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

/// Where `v` sits between `a` and `b`, as a fraction clamped to `[0, 1]`.
///
/// Degenerate ranges (`a == b`) report 0 rather than dividing by zero.
pub fn inverse_lerp(a: f32, b: f32, v: f32) -> f32 {
    if a == b {
        return 0.0;
    }
    ((v - a) / (b - a)).clamp(0.0, 1.0)
}
