//! Headless Bevy harness for parking behaviour tests.
//!
//! rspec fixtures must be `Clone + Send + Sync`, which `App` is not. The app
//! is kept behind a mutex and the suites run serially, so the wrapper below
//! forwards `Send`/`Sync` for test use only.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bevy::prelude::*;
use rspec::{block::Suite, ConfigurationBuilder, Logger, Runner};
use valet::{ParkedActor, ParkingPlugin, ParkingState, TargetMarker};

/// Wrapper that forwards `Send` and `Sync` because access is mutex-guarded.
pub struct GuardedApp(pub App);

// SAFETY: the app is only reached through the mutex in `ParkingHarness`, and
// `run_serial` disables rspec's parallel runner, so no two threads ever touch
// the world at once.
unsafe impl Send for GuardedApp {}
unsafe impl Sync for GuardedApp {}

/// Shared fixture owning an app with the parking plugin, one actor and one
/// parking spot marker.
#[derive(Clone)]
pub struct ParkingHarness {
    app: Arc<Mutex<GuardedApp>>,
    actor: Entity,
    marker: Entity,
}

impl fmt::Debug for ParkingHarness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParkingHarness")
            .field("actor", &self.actor)
            .field("marker", &self.marker)
            .finish_non_exhaustive()
    }
}

impl ParkingHarness {
    /// Builds the harness around `state`.
    pub fn new(state: ParkingState) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(state);
        app.add_plugins(ParkingPlugin);
        let actor = app
            .world_mut()
            .spawn((ParkedActor, Transform::default()))
            .id();
        let marker = app
            .world_mut()
            .spawn((TargetMarker, Transform::default()))
            .id();
        Self {
            app: Arc::new(Mutex::new(GuardedApp(app))),
            actor,
            marker,
        }
    }

    fn guard(&self) -> MutexGuard<'_, GuardedApp> {
        self.app.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Advances the app by `frames` updates.
    pub fn tick(&self, frames: usize) {
        let mut app = self.guard();
        for _ in 0..frames {
            app.0.update();
        }
    }

    /// Mutates the simulation state in place.
    pub fn with_state<R>(&self, f: impl FnOnce(&mut ParkingState) -> R) -> R {
        let mut app = self.guard();
        let mut state = app.0.world_mut().resource_mut::<ParkingState>();
        f(&mut state)
    }

    /// Clones the current simulation state.
    pub fn state(&self) -> ParkingState {
        self.with_state(|state| state.clone())
    }

    /// Transform of the actor entity.
    pub fn actor_transform(&self) -> Transform {
        self.transform_of(self.actor)
    }

    /// Transform of the parking spot marker.
    pub fn marker_transform(&self) -> Transform {
        self.transform_of(self.marker)
    }

    fn transform_of(&self, entity: Entity) -> Transform {
        let app = self.guard();
        app.0
            .world()
            .get::<Transform>(entity)
            .copied()
            .unwrap_or_else(|| panic!("entity {entity:?} lost its Transform"))
    }
}

/// Runs an rspec suite serially so the guarded app stays on one thread.
pub fn run_serial<T>(suite: &Suite<T>)
where
    T: Clone + Send + Sync + fmt::Debug,
{
    let logger = Arc::new(Logger::new(std::io::stdout()));
    let config = ConfigurationBuilder::default()
        .parallel(false)
        .exit_on_failure(true)
        .build()
        .unwrap_or_else(|e| panic!("rspec configuration failed: {e}"));
    Runner::new(config, vec![logger]).run(suite);
}
