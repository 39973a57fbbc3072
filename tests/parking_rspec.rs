//! Behaviour tests for the parking controller running inside a Bevy app.
//!
//! The actor starts in the far corner and is driven to the default parking
//! spot: first along X, then along Z, then it rests.

#[path = "support/headless_app.rs"]
mod headless_app;

use std::f32::consts::FRAC_PI_2;

use approx::assert_relative_eq;
use bevy::prelude::*;
use headless_app::{run_serial, ParkingHarness};
use rspec::block::Context as Scenario;
use valet::{ParkingPhase, ParkingState};

/// Frames comfortably longer than the whole default manoeuvre.
const SETTLE_FRAMES: usize = 400;

fn yaw_of(transform: &Transform) -> f32 {
    transform.rotation.to_euler(EulerRot::YXZ).0
}

#[test]
fn car_parks_at_default_spot() {
    let harness = ParkingHarness::new(ParkingState::default());

    run_serial(&rspec::given(
        "a pending car at (-4, 0, -4) and a spot at (0.5, 0, 1)",
        harness,
        |scenario: &mut Scenario<ParkingHarness>| {
            scenario.when("frames run before the model is ready", |ctx| {
                ctx.before_all(|h| h.tick(10));

                ctx.then("the car stays at its spawn point", |h| {
                    let transform = h.actor_transform();
                    assert_eq!(transform.translation, Vec3::new(-4.0, 0.0, -4.0));
                    assert_eq!(h.state().ticks(), 0);
                });
            });

            scenario.when("the model becomes ready and one frame runs", |ctx| {
                ctx.before_all(|h| {
                    h.with_state(ParkingState::mark_actor_ready);
                    h.tick(1);
                });

                ctx.then("the car steps along +X facing +90°", |h| {
                    let transform = h.actor_transform();
                    assert_relative_eq!(transform.translation.x, -3.95, epsilon = 1e-5);
                    assert_relative_eq!(transform.translation.z, -4.0);
                    assert_relative_eq!(yaw_of(&transform), FRAC_PI_2, epsilon = 1e-5);
                });
            });

            scenario.when("the car has crossed the spot's X", |ctx| {
                ctx.before_all(|h| {
                    while h.state().phase() == Some(ParkingPhase::MovingX) {
                        h.tick(1);
                    }
                });

                ctx.then("it turns to face +Z and drives along Z", |h| {
                    let transform = h.actor_transform();
                    assert!(transform.translation.x >= 0.5);
                    assert!(transform.translation.x < 0.55 + 1e-4);
                    assert_relative_eq!(yaw_of(&transform), 0.0, epsilon = 1e-5);
                    assert_eq!(h.state().phase(), Some(ParkingPhase::MovingZ));
                });
            });

            scenario.when("plenty of frames have run", |ctx| {
                ctx.before_all(|h| h.tick(SETTLE_FRAMES));

                ctx.then("the car rests within one step past the spot", |h| {
                    let transform = h.actor_transform();
                    assert_eq!(h.state().phase(), Some(ParkingPhase::Idle));
                    assert!(transform.translation.z >= 1.0);
                    assert!(transform.translation.z < 1.05 + 1e-4);
                    assert_relative_eq!(yaw_of(&transform), 0.0, epsilon = 1e-5);
                });

                ctx.then("further frames change nothing", |h| {
                    let before = h.actor_transform();
                    h.tick(25);
                    assert_eq!(h.actor_transform(), before);
                });
            });
        },
    ));
}
