//! Bevy plugin wiring the parking controller into the frame loop.
//!
//! Each `Update` the controller ticks [`ParkingState`], then the actor and
//! parking spot entities are brought in line with it. The systems are
//! chained so presentation always observes the pose produced this frame.

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::info;

use crate::parking::ParkingPhase;
use crate::state::ParkingState;

/// Marker for the entity whose transform mirrors the actor pose.
#[derive(Component, Reflect, Default, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component, Default)]
pub struct ParkedActor;

/// Marker for the entity drawn at the parking spot.
#[derive(Component, Reflect, Default, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component, Default)]
pub struct TargetMarker;

/// Event triggered whenever the controller switches phase.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParkingPhaseChanged {
    /// Phase before the transition; `None` on the first driven tick.
    pub from: Option<ParkingPhase>,
    /// Phase after the transition.
    pub to: ParkingPhase,
}

/// Ticks the controller and announces phase transitions.
pub fn parking_tick_system(mut commands: Commands, mut state: ResMut<ParkingState>) {
    if state.tick().is_none() {
        return;
    }
    if let Some(change) = state.take_phase_change() {
        commands.trigger(ParkingPhaseChanged {
            from: change.from,
            to: change.to,
        });
    }
}

/// Copies the actor pose onto every [`ParkedActor`] transform.
///
/// While the model is pending the spawn pose is presented so the scene root
/// appears in place once its children arrive.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
pub fn sync_actor_transform_system(
    state: Res<ParkingState>,
    mut actors: Query<&mut Transform, With<ParkedActor>>,
) {
    let pose = state.actor().displayed_pose();
    for mut transform in &mut actors {
        transform.translation = pose.position;
        transform.rotation = Quat::from_rotation_y(pose.yaw);
    }
}

/// Moves every [`TargetMarker`] to the parking spot.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
pub fn sync_target_marker_system(
    state: Res<ParkingState>,
    mut markers: Query<&mut Transform, With<TargetMarker>>,
) {
    for mut transform in &mut markers {
        transform.translation = state.target().position;
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn log_phase_change(event: On<ParkingPhaseChanged>) {
    let ParkingPhaseChanged { from, to } = event.event();
    match from {
        Some(previous) => info!("parking controller: {previous} -> {to}"),
        None => info!("parking controller started: {to}"),
    }
}

/// Plugin owning the parking simulation.
///
/// Inserts a default [`ParkingState`] unless the host already provided one,
/// and runs the tick and sync systems in `Update`.
///
/// # Examples
///
/// ```
/// use bevy::prelude::*;
/// use valet::ParkingPlugin;
///
/// let mut app = App::new();
/// app.add_plugins(MinimalPlugins).add_plugins(ParkingPlugin);
/// app.update();
/// ```
#[derive(Debug, Default)]
pub struct ParkingPlugin;

impl Plugin for ParkingPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<ParkedActor>();
        app.register_type::<TargetMarker>();
        app.init_resource::<ParkingState>();
        app.add_observer(log_phase_change);
        app.add_systems(
            Update,
            (
                parking_tick_system,
                sync_actor_transform_system,
                sync_target_marker_system,
            )
                .chain(),
        );
    }
}
