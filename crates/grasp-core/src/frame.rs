//! Per-tick input handed to [`GraspSession::update`](crate::session::GraspSession::update).

use grasp_math::{Quat, Vec3};

/// The viewer's horizontal reference axes for the current frame.
///
/// Swing decomposes hand velocity against these, and twist is always
/// applied about `forward` so that roll feels consistent with what the
/// user is looking at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBasis {
    pub forward: Vec3,
    pub right: Vec3,
}

impl ViewBasis {
    /// Basis from the viewer's world orientation (+Z forward, +X right in
    /// local space).
    pub fn from_orientation(orientation: Quat) -> Self {
        Self {
            forward: orientation.rotate(Vec3::Z),
            right: orientation.rotate(Vec3::X),
        }
    }
}

impl Default for ViewBasis {
    fn default() -> Self {
        Self {
            forward: Vec3::Z,
            right: Vec3::X,
        }
    }
}

/// Device-reported motion sample for one controller.
///
/// Velocities are world-frame as reported by the tracking runtime; the
/// filters rotate them into the device frame via `orientation`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceMotion {
    pub orientation: Quat,
    pub linear_velocity: Vec3,
    /// Angular velocity in rad/s.
    pub angular_velocity: Vec3,
}

/// Everything the session needs for one frame tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Elapsed time since the previous tick, seconds.  Non-positive values
    /// skip all continuous processing for the frame.
    pub dt: f32,
    pub view: ViewBasis,
    /// Right controller motion, when the runtime reports it.
    pub right_motion: Option<DeviceMotion>,
    /// Left controller motion, when the runtime reports it.
    pub left_motion: Option<DeviceMotion>,
    /// Dedicated reset input (controller button) held this frame.
    pub reset_pressed: bool,
}

impl FrameInput {
    /// Frame input with no device motion and no reset press.
    pub fn new(dt: f32, view: ViewBasis) -> Self {
        Self {
            dt,
            view,
            right_motion: None,
            left_motion: None,
            reset_pressed: false,
        }
    }
}
