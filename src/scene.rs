//! Static scene: camera, ground plane, lights and the parking spot marker.
//!
//! Only built with the `render` feature. Window resizing and aspect ratio are
//! left to Bevy's camera and window plugins.

use bevy::pbr::wireframe::{Wireframe, WireframePlugin};
use bevy::prelude::*;

use crate::constants::{
    CAMERA_EYE, CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, GROUND_SIZE, GROUND_SUBDIVISIONS,
    PARKING_SPOT_SIZE,
};
use crate::simulation::TargetMarker;
use crate::state::ParkingState;
use crate::viewport::OrbitCamera;

/// Brightness of the ambient term attached to the camera.
const AMBIENT_BRIGHTNESS: f32 = 400.0;

/// Marker for the ground plane.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Ground;

fn spawn_camera(commands: &mut Commands) {
    let rig = OrbitCamera::from_eye(CAMERA_EYE, Vec3::ZERO);
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        rig.transform(),
        rig,
        AmbientLight {
            color: Color::WHITE,
            brightness: AMBIENT_BRIGHTNESS,
            ..default()
        },
        Name::new("ViewportCamera"),
    ));
}

/// Square grid with one cell per world unit.
fn ground_mesh() -> Mesh {
    Mesh::from(
        Plane3d::default()
            .mesh()
            .size(GROUND_SIZE, GROUND_SIZE)
            .subdivisions(GROUND_SUBDIVISIONS),
    )
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
fn setup_scene_system(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    state: Res<ParkingState>,
) {
    spawn_camera(&mut commands);

    commands.spawn((
        Name::new("Ground"),
        Ground,
        Mesh3d(meshes.add(ground_mesh())),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgba(1.0, 1.0, 1.0, 0.0),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        })),
        Wireframe,
        Transform::default(),
    ));

    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            illuminance: light_consts::lux::OVERCAST_DAY,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -0.8, 0.4, 0.0)),
    ));

    commands.spawn((
        Name::new("ParkingSpot"),
        TargetMarker,
        Mesh3d(meshes.add(Cuboid::from_size(PARKING_SPOT_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgba(0.2, 0.8, 0.35, 0.4),
            alpha_mode: AlphaMode::Blend,
            ..default()
        })),
        Transform::from_translation(state.target().position),
    ));
}

/// Plugin spawning the static scene.
#[derive(Debug, Default)]
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<WireframePlugin>() {
            app.add_plugins(WireframePlugin::default());
        }
        app.init_resource::<ParkingState>();
        app.add_systems(Startup, setup_scene_system);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::GROUND_SEGMENTS;

    #[test]
    fn ground_grid_has_one_cell_per_unit() {
        assert_eq!(GROUND_SEGMENTS, 10);
        // 11 vertex rows of 11 for a 10×10 grid.
        assert_eq!(ground_mesh().count_vertices(), 121);
    }
}
