//! `grasp-types` – shared data model of the manipulation core.
//!
//! Everything the session engine and its external collaborators exchange:
//! grab sides and source kinds, the tunable configuration surface, target
//! configurations, match error reports, the per-attempt session context, and
//! the crate-spanning error enum.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ────────────────────────────────────────────────────────────────────────────
// Sides and source kinds
// ────────────────────────────────────────────────────────────────────────────

/// Which side of the body a grab originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// What kind of interaction source is driving a grab.
///
/// Resolved once per grab from the source's hierarchy path; hands and
/// controllers run through differently tuned filter paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    Hand,
    Controller,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Hand => write!(f, "hand"),
            SourceKind::Controller => write!(f, "controller"),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Configuration
// ────────────────────────────────────────────────────────────────────────────

/// Tunable constants of the rotation/scale pipeline.
///
/// Every field has a serde default so a host can supply a partial config
/// file and inherit the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManipulationConfig {
    /// Controller swing speed multiplier (velocity → deg/s).
    #[serde(default = "default_rotation_speed")]
    pub rotation_speed: f32,

    /// Hand swing speed multiplier, tuned separately from controllers.
    #[serde(default = "default_hand_rotation_speed")]
    pub hand_rotation_speed: f32,

    /// Twist (roll) speed multiplier.
    #[serde(default = "default_twist_speed")]
    pub twist_speed: f32,

    /// Controller swing smoothing factor in `[0, 1)`; higher is smoother.
    #[serde(default = "default_rotation_smoothing")]
    pub rotation_smoothing: f32,

    /// Hand swing smoothing factor in `[0, 1)`.
    #[serde(default = "default_hand_rotation_smoothing")]
    pub hand_rotation_smoothing: f32,

    /// Twist smoothing factor in `[0, 1)`.
    #[serde(default = "default_twist_smoothing")]
    pub twist_smoothing: f32,

    /// Minimum smoothed swing velocity before rotation is applied (m/s
    /// scale).  The hand path gates at half this value.
    #[serde(default = "default_velocity_threshold")]
    pub velocity_threshold: f32,

    /// Minimum smoothed twist velocity before roll is applied (deg/s).
    #[serde(default = "default_angular_velocity_threshold")]
    pub angular_velocity_threshold: f32,

    /// Lower bound of each scale component.
    #[serde(default = "default_min_scale")]
    pub min_scale: f32,

    /// Upper bound of each scale component.
    #[serde(default = "default_max_scale")]
    pub max_scale: f32,
}

fn default_rotation_speed() -> f32 {
    400.0
}
fn default_hand_rotation_speed() -> f32 {
    300.0
}
fn default_twist_speed() -> f32 {
    200.0
}
fn default_rotation_smoothing() -> f32 {
    0.8
}
fn default_hand_rotation_smoothing() -> f32 {
    0.6
}
fn default_twist_smoothing() -> f32 {
    0.7
}
fn default_velocity_threshold() -> f32 {
    0.01
}
fn default_angular_velocity_threshold() -> f32 {
    5.0
}
fn default_min_scale() -> f32 {
    0.2
}
fn default_max_scale() -> f32 {
    5.0
}

impl Default for ManipulationConfig {
    fn default() -> Self {
        Self {
            rotation_speed: default_rotation_speed(),
            hand_rotation_speed: default_hand_rotation_speed(),
            twist_speed: default_twist_speed(),
            rotation_smoothing: default_rotation_smoothing(),
            hand_rotation_smoothing: default_hand_rotation_smoothing(),
            twist_smoothing: default_twist_smoothing(),
            velocity_threshold: default_velocity_threshold(),
            angular_velocity_threshold: default_angular_velocity_threshold(),
            min_scale: default_min_scale(),
            max_scale: default_max_scale(),
        }
    }
}

impl ManipulationConfig {
    /// Reject configurations the filter pipeline cannot run with.
    ///
    /// Smoothing factors must lie in `[0, 1)` (a factor of 1 would freeze
    /// the accumulators), speed constants must be positive, and the scale
    /// bounds must be ordered and positive.
    pub fn validate(&self) -> Result<(), GraspError> {
        for (name, v) in [
            ("rotation_smoothing", self.rotation_smoothing),
            ("hand_rotation_smoothing", self.hand_rotation_smoothing),
            ("twist_smoothing", self.twist_smoothing),
        ] {
            if !(0.0..1.0).contains(&v) {
                return Err(GraspError::InvalidConfig(format!(
                    "{name} must be in [0, 1), got {v}"
                )));
            }
        }
        for (name, v) in [
            ("rotation_speed", self.rotation_speed),
            ("hand_rotation_speed", self.hand_rotation_speed),
            ("twist_speed", self.twist_speed),
        ] {
            if !(v > 0.0) {
                return Err(GraspError::InvalidConfig(format!(
                    "{name} must be positive, got {v}"
                )));
            }
        }
        if !(self.min_scale > 0.0 && self.max_scale > self.min_scale) {
            return Err(GraspError::InvalidConfig(format!(
                "scale bounds must satisfy 0 < min < max, got [{}, {}]",
                self.min_scale, self.max_scale
            )));
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Slicing-plane configuration
// ────────────────────────────────────────────────────────────────────────────

/// World axis a slicing plane is allowed to travel along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SliceAxis {
    #[default]
    X,
    Y,
    Z,
}

impl std::fmt::Display for SliceAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SliceAxis::X => write!(f, "x"),
            SliceAxis::Y => write!(f, "y"),
            SliceAxis::Z => write!(f, "z"),
        }
    }
}

/// Tunable constants of a grabbable slicing plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliceConfig {
    /// The single axis the plane travels along.
    #[serde(default)]
    pub axis: SliceAxis,

    /// Lower bound of the axis coordinate.
    #[serde(default = "default_min_position")]
    pub min_position: f32,

    /// Upper bound of the axis coordinate.
    #[serde(default = "default_max_position")]
    pub max_position: f32,

    /// Grabber-delta → plane-travel multiplier.
    #[serde(default = "default_movement_speed")]
    pub movement_speed: f32,

    /// Restrict grabs to the left side (the right side keeps the object
    /// manipulation role).
    #[serde(default = "default_left_only")]
    pub left_only: bool,
}

fn default_min_position() -> f32 {
    -0.5
}
fn default_max_position() -> f32 {
    0.5
}
fn default_movement_speed() -> f32 {
    1.5
}
fn default_left_only() -> bool {
    true
}

impl Default for SliceConfig {
    fn default() -> Self {
        Self {
            axis: SliceAxis::default(),
            min_position: default_min_position(),
            max_position: default_max_position(),
            movement_speed: default_movement_speed(),
            left_only: default_left_only(),
        }
    }
}

impl SliceConfig {
    /// Reject configurations the plane cannot travel under.
    pub fn validate(&self) -> Result<(), GraspError> {
        if !(self.min_position < self.max_position) {
            return Err(GraspError::InvalidConfig(format!(
                "slice bounds must satisfy min < max, got [{}, {}]",
                self.min_position, self.max_position
            )));
        }
        if !(self.movement_speed > 0.0) {
            return Err(GraspError::InvalidConfig(format!(
                "movement_speed must be positive, got {}",
                self.movement_speed
            )));
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Target configuration
// ────────────────────────────────────────────────────────────────────────────

/// The goal pose an attempt must reach, with its tolerance window.
///
/// Supplied by the trial collaborator before each attempt.  The orientation
/// is given as Euler angles in degrees; the core converts them once per
/// match evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Target orientation as Euler angles (degrees, x/y/z).
    pub rotation_euler_deg: [f32; 3],

    /// Target scale per axis.
    pub scale: [f32; 3],

    /// Maximum angular distance from the target still counted as a match.
    #[serde(default = "default_rotation_tolerance")]
    pub rotation_tolerance_deg: f32,

    /// Maximum per-axis scale deviation still counted as a match.
    #[serde(default = "default_scale_tolerance")]
    pub scale_tolerance: f32,
}

fn default_rotation_tolerance() -> f32 {
    25.0
}
fn default_scale_tolerance() -> f32 {
    0.25
}

// ────────────────────────────────────────────────────────────────────────────
// Error report
// ────────────────────────────────────────────────────────────────────────────

/// Normalized error percentages produced for a successful match.
///
/// Only an aggregate angular distance is measured, so the three rotation
/// slots carry the same value; they are kept separate because the
/// downstream persistence format records five columns.  `aggregate` is the
/// rounded mean of the rotation percentage and the scale percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub rotation_x: i32,
    pub rotation_y: i32,
    pub rotation_z: i32,
    pub scale: i32,
    pub aggregate: i32,
    /// When the match was evaluated.
    pub matched_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Session context
// ────────────────────────────────────────────────────────────────────────────

/// Per-attempt bookkeeping shared with the trial collaborator.
///
/// Replaces a cross-scene mutable global: the session owns the context and
/// the collaborator reads it through the session's accessors after the
/// success signal fires.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionContext {
    manipulation_count: u32,
    last_report: Option<ErrorReport>,
}

impl SessionContext {
    /// Count one grab attempt (either side, accepted or rejected).
    pub fn record_grab_attempt(&mut self) {
        self.manipulation_count += 1;
    }

    /// Store the report of a successful match.
    pub fn store_report(&mut self, report: ErrorReport) {
        self.last_report = Some(report);
    }

    /// Number of grab attempts since the last reset.
    pub fn manipulation_count(&self) -> u32 {
        self.manipulation_count
    }

    /// The most recent match report, if any.
    pub fn report(&self) -> Option<&ErrorReport> {
        self.last_report.as_ref()
    }

    /// Remove and return the most recent match report.
    pub fn take_report(&mut self) -> Option<ErrorReport> {
        self.last_report.take()
    }

    /// Clear the context for a fresh attempt.
    pub fn clear(&mut self) {
        self.manipulation_count = 0;
        self.last_report = None;
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

/// Errors surfaced at the configuration/registration boundary.
///
/// The per-frame path never returns these: degenerate frame input is
/// locally recovered (skipped or repaired), never propagated.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GraspError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown hierarchy node: {0}")]
    UnknownNode(String),

    #[error("No target configuration active")]
    NoTarget,
}
