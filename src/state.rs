//! Simulation state owned by the ECS world.
//!
//! [`ParkingState`] is the single home for the actor, the parking spot and
//! the controller configuration. Systems and the debug panel borrow it
//! through Bevy's resource access instead of sharing globals.

use bevy::prelude::*;
use log::debug;

use crate::constants::{DEFAULT_ACTOR_START, DEFAULT_TARGET, STEP_SIZE};
use crate::parking::{advance, ActorPose, AxisComparison, ParkingPhase};

/// Load state of the actor.
///
/// The controller only drives a [`ActorSlot::Ready`] actor. While the model
/// is still loading the slot remembers where the actor will appear.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActorSlot {
    /// The model has not finished loading.
    Pending {
        /// Pose the actor takes once ready.
        spawn: ActorPose,
    },
    /// The model is in the scene and under controller authority.
    Ready(ActorPose),
}

impl ActorSlot {
    /// Returns the live pose, or `None` while pending.
    #[must_use]
    pub const fn pose(&self) -> Option<&ActorPose> {
        match self {
            Self::Ready(pose) => Some(pose),
            Self::Pending { .. } => None,
        }
    }

    /// Pose to present: the live pose, or the spawn pose while pending.
    #[must_use]
    pub const fn displayed_pose(&self) -> ActorPose {
        match *self {
            Self::Ready(pose) | Self::Pending { spawn: pose } => pose,
        }
    }

    /// Whether the actor is under controller authority.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Ground-plane axis of the parking spot that the panel can edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetAxis {
    /// The X coordinate.
    X,
    /// The Z coordinate.
    Z,
}

impl TargetAxis {
    /// Label shown next to the panel field.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Z => "z",
        }
    }
}

/// Parking spot position. Only X and Z are meaningful to the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParkingTarget {
    /// World-space centre of the spot.
    pub position: Vec3,
}

impl ParkingTarget {
    /// Reads one ground-plane axis.
    #[must_use]
    pub const fn axis(&self, axis: TargetAxis) -> f32 {
        match axis {
            TargetAxis::X => self.position.x,
            TargetAxis::Z => self.position.z,
        }
    }
}

impl Default for ParkingTarget {
    fn default() -> Self {
        Self {
            position: DEFAULT_TARGET,
        }
    }
}

/// Transition between two observed phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChange {
    /// Phase on the previous tick, `None` for the first tick.
    pub from: Option<ParkingPhase>,
    /// Phase on this tick.
    pub to: ParkingPhase,
}

/// Simulation state for the parking scene.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ParkingState {
    actor: ActorSlot,
    target: ParkingTarget,
    step: f32,
    phase: Option<ParkingPhase>,
    pending_change: Option<PhaseChange>,
    ticks: u64,
}

impl Default for ParkingState {
    fn default() -> Self {
        Self::new(DEFAULT_ACTOR_START, DEFAULT_TARGET, STEP_SIZE)
    }
}

impl ParkingState {
    /// Creates a state with a pending actor at `start` facing `+Z`.
    #[must_use]
    pub const fn new(start: Vec3, target: Vec3, step: f32) -> Self {
        Self {
            actor: ActorSlot::Pending {
                spawn: ActorPose::at(start),
            },
            target: ParkingTarget { position: target },
            step,
            phase: None,
            pending_change: None,
            ticks: 0,
        }
    }

    /// Current actor slot.
    #[must_use]
    pub const fn actor(&self) -> &ActorSlot {
        &self.actor
    }

    /// Current parking spot.
    #[must_use]
    pub const fn target(&self) -> &ParkingTarget {
        &self.target
    }

    /// Distance moved per tick.
    #[must_use]
    pub const fn step(&self) -> f32 {
        self.step
    }

    /// Phase acted on by the most recent tick, if any tick has run.
    #[must_use]
    pub const fn phase(&self) -> Option<ParkingPhase> {
        self.phase
    }

    /// Number of ticks that drove a ready actor.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Hands the actor to the controller at its spawn pose.
    ///
    /// Returns `true` on the transition and `false` if it was already ready.
    pub fn mark_actor_ready(&mut self) -> bool {
        match self.actor {
            ActorSlot::Pending { spawn } => {
                self.actor = ActorSlot::Ready(spawn);
                true
            }
            ActorSlot::Ready(_) => false,
        }
    }

    /// Moves the parking spot along one axis. Y is left untouched.
    pub fn set_target_axis(&mut self, axis: TargetAxis, value: f32) {
        match axis {
            TargetAxis::X => self.target.position.x = value,
            TargetAxis::Z => self.target.position.z = value,
        }
    }

    /// Runs one controller tick.
    ///
    /// Returns `None` while the actor is pending, otherwise the phase acted
    /// on. A phase transition is queued for [`Self::take_phase_change`].
    pub fn tick(&mut self) -> Option<ParkingPhase> {
        let ActorSlot::Ready(pose) = &mut self.actor else {
            return None;
        };

        let comparison = AxisComparison::between(pose.position, self.target.position);
        if comparison.wants_retreat() {
            debug!(
                "actor at {:?} overshoots target {:?}; retreat is disabled",
                pose.position, self.target.position
            );
        }

        let phase = advance(pose, self.target.position, self.step);
        self.ticks += 1;

        if self.phase != Some(phase) {
            self.pending_change = Some(PhaseChange {
                from: self.phase,
                to: phase,
            });
            self.phase = Some(phase);
        }
        Some(phase)
    }

    /// Takes the most recent unreported phase transition.
    pub const fn take_phase_change(&mut self) -> Option<PhaseChange> {
        self.pending_change.take()
    }
}
