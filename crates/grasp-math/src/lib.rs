//! `grasp-math` – minimal 3-D linear algebra for the manipulation core.
//!
//! Hand-rolled vector/quaternion types sized for a frame-tick filter
//! pipeline: no SIMD, no generics, `f32` throughout.
//!
//! # Modules
//!
//! - [`vec`] – [`Vec3`][vec::Vec3]: 3-component vector with the dot products,
//!   distance, and magnitude clamping the motion filters need, plus the
//!   scalar [`lerp`][vec::lerp] used by every smoothing accumulator and its
//!   inverse for range-normalized readouts.
//! - [`quat`] – [`Quat`][quat::Quat]: unit quaternion (w, x, y, z) with
//!   Hamilton product, axis-angle conversion in both directions, Euler-angle
//!   construction, and shortest-arc angular distance.
//! - [`pose`] – [`Pose`][pose::Pose]: position + orientation + scale bundle,
//!   the unit of state the transform guard validates.

pub mod pose;
pub mod quat;
pub mod vec;

pub use pose::Pose;
pub use quat::Quat;
pub use vec::{Vec3, inverse_lerp, lerp};
