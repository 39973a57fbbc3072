//! Scene and simulation defaults shared across plugins.
//!
//! Values mirror the reference scene: a 10×10 ground plane, a car starting in
//! the far corner and a parking spot just past the origin.
use glam::Vec3;

/// Distance the actor covers per tick, in world units.
pub const STEP_SIZE: f32 = 0.05;

/// Where the actor starts before its model finishes loading.
pub const DEFAULT_ACTOR_START: Vec3 = Vec3::new(-4.0, 0.0, -4.0);
/// Default parking spot centre.
pub const DEFAULT_TARGET: Vec3 = Vec3::new(0.5, 0.0, 1.0);
/// Footprint of the parking spot marker (width, height, depth).
pub const PARKING_SPOT_SIZE: Vec3 = Vec3::new(1.0, 0.02, 2.0);

/// Lower bound the panel accepts for target coordinates.
pub const TARGET_MIN: f32 = -5.0;
/// Upper bound the panel accepts for target coordinates.
pub const TARGET_MAX: f32 = 5.0;
/// Slider increment for target fields.
pub const TARGET_STEP: f64 = 0.01;
/// Width of the debug panel in logical pixels.
pub const PANEL_WIDTH: f32 = 350.0;

/// Vertical field of view of the viewport camera.
pub const CAMERA_FOV_DEGREES: f32 = 64.0;
/// Near clipping plane.
pub const CAMERA_NEAR: f32 = 0.1;
/// Far clipping plane.
pub const CAMERA_FAR: f32 = 100.0;
/// Initial camera eye position; the camera looks at the origin.
pub const CAMERA_EYE: Vec3 = Vec3::new(1.0, 1.0, 1.0);
/// Fraction of orbit velocity applied (and shed) each frame.
pub const ORBIT_DAMPING: f32 = 0.05;

/// Edge length of the square ground plane.
pub const GROUND_SIZE: f32 = 10.0;
/// Grid cells along each edge of the ground plane, one per world unit.
pub const GROUND_SEGMENTS: u32 = 10;
/// Interior cut lines Bevy's plane builder needs for [`GROUND_SEGMENTS`] cells.
pub const GROUND_SUBDIVISIONS: u32 = GROUND_SEGMENTS - 1;

/// Asset path of the car model, relative to the asset root.
pub const DEFAULT_MODEL_PATH: &str = "models/car.glb";
