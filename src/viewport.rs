//! Orbit camera with inertial damping.
//!
//! Pointer input is accumulated into velocities; each frame a fixed fraction
//! of the velocity is applied and the same fraction is shed, so a flick keeps
//! easing after the button is released. Left drag orbits, right drag pans and
//! the wheel zooms.

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit};
use bevy::prelude::*;

use crate::constants::ORBIT_DAMPING;

/// Pixels per wheel line when the platform reports pixel scrolling.
const PIXELS_PER_LINE: f32 = 16.0;
/// Velocities below this magnitude are treated as settled.
const REST_EPSILON: f32 = 1e-5;

/// Tuning for the orbit controller.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct OrbitSettings {
    /// Radians of orbit per pixel of drag.
    pub rotate_sensitivity: f32,
    /// Fractional distance change per wheel line.
    pub zoom_sensitivity: f32,
    /// Focus travel per pixel of drag, scaled by the orbit distance.
    pub pan_sensitivity: f32,
    /// Fraction of velocity applied and shed each frame, in `(0, 1]`.
    pub damping: f32,
    /// Closest the camera may get to its focus.
    pub min_distance: f32,
    /// Furthest the camera may get from its focus.
    pub max_distance: f32,
    /// Lowest elevation in radians.
    pub min_pitch: f32,
    /// Highest elevation in radians.
    pub max_pitch: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            rotate_sensitivity: 0.01,
            zoom_sensitivity: 0.1,
            pan_sensitivity: 0.002,
            damping: ORBIT_DAMPING,
            min_distance: 0.5,
            max_distance: 40.0,
            min_pitch: -1.5,
            max_pitch: 1.5,
        }
    }
}

/// Pointer input gathered for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrbitInput {
    /// Drag delta to orbit with, in pixels.
    pub rotate: Vec2,
    /// Drag delta to pan with, in pixels.
    pub pan: Vec2,
    /// Wheel delta in lines; positive zooms in.
    pub zoom: f32,
}

impl OrbitInput {
    /// Whether this input would change any velocity.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rotate == Vec2::ZERO && self.pan == Vec2::ZERO && self.zoom == 0.0
    }
}

/// Whether the pointer currently belongs to an overlay such as the panel.
///
/// The panel writes this during the egui pass, after `Update`, so
/// [`orbit_camera_system`] sees the previous frame's value. A drag that starts
/// on the panel edge can therefore nudge the camera for one frame.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PointerCapture {
    /// The pointer is over, or interacting with, an overlay widget.
    pub over_ui: bool,
}

/// Spherical camera rig around a focus point.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    /// Point the camera looks at.
    pub focus: Vec3,
    /// Azimuth about +Y in radians, `0` placing the eye on +Z.
    pub yaw: f32,
    /// Elevation above the ground plane in radians.
    pub pitch: f32,
    /// Eye-to-focus distance.
    pub distance: f32,
    yaw_velocity: f32,
    pitch_velocity: f32,
    zoom_velocity: f32,
    pan_velocity: Vec3,
}

impl OrbitCamera {
    /// Builds a rig that reproduces an eye looking at `focus`.
    ///
    /// # Examples
    /// ```
    /// use bevy::math::Vec3;
    /// use valet::viewport::OrbitCamera;
    ///
    /// let rig = OrbitCamera::from_eye(Vec3::new(1.0, 1.0, 1.0), Vec3::ZERO);
    /// assert!((rig.eye() - Vec3::ONE).length() < 1e-5);
    /// ```
    #[must_use]
    pub fn from_eye(eye: Vec3, focus: Vec3) -> Self {
        let offset = eye - focus;
        let distance = offset.length();
        let (yaw, pitch) = if distance > f32::EPSILON {
            (
                offset.x.atan2(offset.z),
                (offset.y / distance).clamp(-1.0, 1.0).asin(),
            )
        } else {
            (0.0, 0.0)
        };
        Self {
            focus,
            yaw,
            pitch,
            distance,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
            zoom_velocity: 0.0,
            pan_velocity: Vec3::ZERO,
        }
    }

    /// Eye position implied by the current angles and distance.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.focus + Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw) * self.distance
    }

    /// Camera transform for the current rig.
    #[must_use]
    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(self.focus, Vec3::Y)
    }

    /// Whether any velocity is still decaying.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.yaw_velocity.abs() > REST_EPSILON
            || self.pitch_velocity.abs() > REST_EPSILON
            || self.zoom_velocity.abs() > REST_EPSILON
            || self.pan_velocity.length() > REST_EPSILON
    }

    /// Adds one frame of pointer input to the rig's velocities.
    pub fn apply_input(&mut self, input: OrbitInput, settings: &OrbitSettings) {
        self.yaw_velocity -= input.rotate.x * settings.rotate_sensitivity;
        self.pitch_velocity += input.rotate.y * settings.rotate_sensitivity;
        self.zoom_velocity += input.zoom * settings.zoom_sensitivity;

        if input.pan != Vec2::ZERO {
            let transform = self.transform();
            let scale = self.distance * settings.pan_sensitivity;
            self.pan_velocity += (transform.left() * input.pan.x + transform.up() * input.pan.y) * scale;
        }
    }

    /// Applies the damped share of each velocity and decays it.
    pub fn integrate(&mut self, settings: &OrbitSettings) {
        let damping = settings.damping.clamp(f32::EPSILON, 1.0);

        self.yaw += self.yaw_velocity * damping;
        self.pitch = (self.pitch + self.pitch_velocity * damping)
            .clamp(settings.min_pitch, settings.max_pitch);
        self.distance = (self.distance * (1.0 - self.zoom_velocity * damping))
            .clamp(settings.min_distance, settings.max_distance);
        self.focus += self.pan_velocity * damping;

        let decay = 1.0 - damping;
        self.yaw_velocity *= decay;
        self.pitch_velocity *= decay;
        self.zoom_velocity *= decay;
        self.pan_velocity *= decay;

        if !self.is_moving() {
            self.yaw_velocity = 0.0;
            self.pitch_velocity = 0.0;
            self.zoom_velocity = 0.0;
            self.pan_velocity = Vec3::ZERO;
        }
    }
}

/// Reads mouse input and drives every [`OrbitCamera`].
///
/// Input is ignored while [`PointerCapture::over_ui`] is set; velocities
/// already built up keep decaying.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
pub fn orbit_camera_system(
    buttons: Res<ButtonInput<MouseButton>>,
    motion: Res<AccumulatedMouseMotion>,
    scroll: Res<AccumulatedMouseScroll>,
    capture: Res<PointerCapture>,
    settings: Res<OrbitSettings>,
    mut cameras: Query<(&mut OrbitCamera, &mut Transform)>,
) {
    let input = if capture.over_ui {
        OrbitInput::default()
    } else {
        let lines = match scroll.unit {
            MouseScrollUnit::Line => scroll.delta.y,
            MouseScrollUnit::Pixel => scroll.delta.y / PIXELS_PER_LINE,
        };
        OrbitInput {
            rotate: if buttons.pressed(MouseButton::Left) {
                motion.delta
            } else {
                Vec2::ZERO
            },
            pan: if buttons.pressed(MouseButton::Right) {
                motion.delta
            } else {
                Vec2::ZERO
            },
            zoom: lines,
        }
    };

    for (mut rig, mut transform) in &mut cameras {
        if input.is_empty() && !rig.is_moving() {
            continue;
        }
        rig.apply_input(input, &settings);
        rig.integrate(&settings);
        *transform = rig.transform();
    }
}

/// Plugin installing the orbit controller.
#[derive(Debug, Default)]
pub struct ViewportPlugin;

impl Plugin for ViewportPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitSettings>();
        app.init_resource::<PointerCapture>();
        app.add_systems(Update, orbit_camera_system);
    }
}
