//! Real-time grab, rotate and scale core for hand-tracked 3D object
//! manipulation.
//!
//! The crate turns raw tracking signals — grab/release events from hands or
//! controllers, per-frame anchor poses, device velocities — into smoothed,
//! clamped transform updates on a single held object, and scores the final
//! pose against a target when the object is let go.
//!
//! # Modules
//!
//! - [`session`]: grab-state machine and per-frame dispatcher, the crate's
//!   public entry point.
//! - [`hierarchy`]: minimal scene-node arena the session reads poses from.
//! - [`classify`]: side and source-kind classification from node paths.
//! - [`anchor`]: tracking-anchor resolution for hand grabs.
//! - [`swing`]: translational velocity → smoothed pitch/yaw filter.
//! - [`twist`]: wrist/controller roll → smoothed roll filter.
//! - [`scaler`]: two-handed distance-ratio scaling.
//! - [`slice`]: left-hand slicing plane constrained to one axis of travel.
//! - [`matcher`]: tolerance-based pose scoring on release.
//! - [`object`]: the manipulated object and its origin pose.
//! - [`guard`]: transform corruption detection and repair.
//! - [`frame`]: per-tick input types.

pub mod anchor;
pub mod classify;
pub mod frame;
pub mod guard;
pub mod hierarchy;
pub mod matcher;
pub mod object;
pub mod scaler;
pub mod session;
pub mod slice;
pub mod swing;
pub mod twist;

pub use frame::{DeviceMotion, FrameInput, ViewBasis};
pub use hierarchy::{NodeId, NodeTree};
pub use object::ManipulableObject;
pub use session::{GrabOutcome, GrabPhase, GraspSession};
pub use slice::SlicePlane;
