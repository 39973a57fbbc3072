//! Per-tick parking movement.
//!
//! The controller nudges the actor toward the parking spot one fixed step at
//! a time. X is corrected first; Z is only considered once X is aligned or
//! past. Motion is strictly increasing along each axis, so an actor that
//! starts beyond the target on an axis never moves along it. The heading
//! snaps to the direction of travel.
//!
//! Everything here is plain data and free functions over [`glam::Vec3`] so it
//! can be exercised without an ECS world.

use std::f32::consts::{FRAC_PI_2, PI};
use std::fmt;

use glam::Vec3;

/// One of the four fixed headings the actor can face.
///
/// Yaw is measured about the vertical axis with `0` facing `+Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    /// Travelling along `+X` (yaw `+90°`).
    PositiveX,
    /// Travelling along `+Z` (yaw `0°`).
    PositiveZ,
    /// Travelling along `-X` (yaw `-90°`).
    NegativeX,
    /// Travelling along `-Z` (yaw `-180°`).
    NegativeZ,
}

impl Heading {
    /// Yaw in radians for this heading.
    ///
    /// # Examples
    /// ```
    /// use valet::parking::Heading;
    /// assert_eq!(Heading::PositiveZ.yaw(), 0.0);
    /// assert!((Heading::PositiveX.yaw().to_degrees() - 90.0).abs() < 1e-4);
    /// ```
    #[must_use]
    pub const fn yaw(self) -> f32 {
        match self {
            Self::PositiveX => FRAC_PI_2,
            Self::PositiveZ => 0.0,
            Self::NegativeX => -FRAC_PI_2,
            Self::NegativeZ => -PI,
        }
    }
}

/// Axis-by-axis comparison of the actor against the target.
///
/// The `z_*` flags are masked by their `x_*` counterparts so at most one axis
/// is ever eligible for correction in each direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "Each flag is one independent axis/direction comparison."
)]
pub struct AxisComparison {
    /// Actor is behind the target along X.
    pub x_pos: bool,
    /// Actor is behind along Z and X needs no forward correction.
    pub z_pos: bool,
    /// Actor is beyond the target along X.
    pub x_neg: bool,
    /// Actor is beyond along Z and X is not beyond.
    pub z_neg: bool,
}

impl AxisComparison {
    /// Compares `actor` against `target` on the ground plane.
    ///
    /// The Y components are ignored.
    #[must_use]
    pub fn between(actor: Vec3, target: Vec3) -> Self {
        let x_pos = actor.x < target.x;
        let z_pos = actor.z < target.z && !x_pos;
        let x_neg = actor.x > target.x;
        let z_neg = actor.z > target.z && !x_neg;
        Self {
            x_pos,
            z_pos,
            x_neg,
            z_neg,
        }
    }

    /// Returns `true` when the actor overshoots the target on either axis.
    ///
    /// Retreat is never acted upon; this only feeds diagnostics.
    #[must_use]
    pub const fn wants_retreat(self) -> bool {
        self.x_neg || self.z_neg
    }
}

/// Which correction the controller applies on a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParkingPhase {
    /// Closing the gap along X.
    MovingX,
    /// X is settled; closing the gap along Z.
    MovingZ,
    /// Neither axis needs a forward correction.
    Idle,
}

impl ParkingPhase {
    /// Classifies the phase for the given positions.
    ///
    /// # Examples
    /// ```
    /// use glam::Vec3;
    /// use valet::parking::ParkingPhase;
    ///
    /// let phase = ParkingPhase::classify(Vec3::new(-1.0, 0.0, 0.0), Vec3::ZERO);
    /// assert_eq!(phase, ParkingPhase::MovingX);
    /// assert_eq!(ParkingPhase::classify(Vec3::ONE, Vec3::ONE), ParkingPhase::Idle);
    /// ```
    #[must_use]
    pub fn classify(actor: Vec3, target: Vec3) -> Self {
        Self::from_comparison(AxisComparison::between(actor, target))
    }

    /// Maps a comparison to the phase it selects.
    #[must_use]
    pub const fn from_comparison(comparison: AxisComparison) -> Self {
        if comparison.x_pos {
            Self::MovingX
        } else if comparison.z_pos {
            Self::MovingZ
        } else {
            Self::Idle
        }
    }

    /// Heading the actor takes while in this phase, if it moves at all.
    #[must_use]
    pub const fn heading(self) -> Option<Heading> {
        match self {
            Self::MovingX => Some(Heading::PositiveX),
            Self::MovingZ => Some(Heading::PositiveZ),
            Self::Idle => None,
        }
    }
}

impl fmt::Display for ParkingPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::MovingX => "moving along X",
            Self::MovingZ => "moving along Z",
            Self::Idle => "idle",
        };
        f.write_str(label)
    }
}

/// Position and yaw of the moving actor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ActorPose {
    /// World-space position.
    pub position: Vec3,
    /// Rotation about the vertical axis, in radians.
    pub yaw: f32,
}

impl ActorPose {
    /// Creates a pose at `position` facing `+Z`.
    #[must_use]
    pub const fn at(position: Vec3) -> Self {
        Self { position, yaw: 0.0 }
    }
}

/// Advances `pose` one step toward `target` and returns the phase acted on.
///
/// When the phase is [`ParkingPhase::Idle`] the pose is left untouched,
/// including its yaw. The actor may end up to one `step` past the target;
/// there is no snapping.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use valet::parking::{advance, ActorPose, ParkingPhase};
///
/// let mut pose = ActorPose::at(Vec3::new(0.0, 0.0, -1.0));
/// let phase = advance(&mut pose, Vec3::ZERO, 0.05);
/// assert_eq!(phase, ParkingPhase::MovingZ);
/// assert!((pose.position.z + 0.95).abs() < 1e-6);
/// ```
pub fn advance(pose: &mut ActorPose, target: Vec3, step: f32) -> ParkingPhase {
    let phase = ParkingPhase::classify(pose.position, target);
    match phase {
        ParkingPhase::MovingX => pose.position.x += step,
        ParkingPhase::MovingZ => pose.position.z += step,
        ParkingPhase::Idle => return phase,
    }
    if let Some(heading) = phase.heading() {
        pose.yaw = heading.yaw();
    }
    phase
}
