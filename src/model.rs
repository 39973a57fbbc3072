//! Car model loading.
//!
//! `ModelPlugin` starts an asynchronous glTF load at startup and polls the
//! asset server every frame. The actor in [`ParkingState`] stays pending
//! until the scene and all of its dependencies are loaded. A failed load is
//! reported through [`ModelLoadError`] and leaves the actor pending.

use std::path::Path;

use bevy::prelude::*;
use log::error;
use thiserror::Error;

use crate::constants::DEFAULT_MODEL_PATH;

#[cfg(feature = "render")]
use bevy::asset::RecursiveDependencyLoadState;
#[cfg(feature = "render")]
use bevy::ecs::prelude::On;
#[cfg(feature = "render")]
use bevy::gltf::GltfAssetLabel;
#[cfg(feature = "render")]
use log::info;

#[cfg(feature = "render")]
use crate::simulation::{parking_tick_system, ParkedActor};
#[cfg(feature = "render")]
use crate::state::ParkingState;

/// Errors raised while loading the car model.
#[derive(Event, Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelLoadError {
    /// The configured path cannot address a file under the asset root.
    #[error("invalid model asset path {path:?}")]
    InvalidAssetPath {
        /// Path as configured.
        path: String,
    },
    /// The asset server reported a failure for the model or a dependency.
    #[error("failed to load model {path:?}: {detail}")]
    LoadFailed {
        /// Path as configured.
        path: String,
        /// Error reported by the asset server.
        detail: String,
    },
}

/// Newtype for an asset-server path (relative to the asset root).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelAssetPath(String);

impl ModelAssetPath {
    /// Wraps an asset path.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Borrows the underlying path.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModelAssetPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl Default for ModelAssetPath {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL_PATH)
    }
}

/// Runtime configuration for model loading.
#[derive(Resource, Clone, Debug, Default)]
pub struct ModelSettings {
    /// glTF file holding the car. Scene 0 is spawned.
    pub model: ModelAssetPath,
}

/// Rejects paths that would escape the asset root.
///
/// Absolute paths are rejected in every platform's spelling: rooted Unix
/// paths, Windows drive paths (`C:\car.glb`, `C:car.glb`) and UNC shares.
///
/// # Errors
///
/// Returns [`ModelLoadError::InvalidAssetPath`] for empty, absolute or
/// parent-relative paths.
pub fn validate_asset_path(path: &ModelAssetPath) -> Result<(), ModelLoadError> {
    let raw = path.as_str();
    if raw.is_empty()
        || is_absolute_anywhere(raw)
        || raw.split(['/', '\\']).any(|part| part == "..")
    {
        return Err(ModelLoadError::InvalidAssetPath {
            path: raw.to_owned(),
        });
    }
    Ok(())
}

fn is_absolute_anywhere(raw: &str) -> bool {
    let mut chars = raw.chars();
    let drive_prefix = matches!(
        (chars.next(), chars.next()),
        (Some(letter), Some(':')) if letter.is_ascii_alphabetic()
    );
    raw.starts_with(['/', '\\']) || drive_prefix || Path::new(raw).has_root()
}

/// Condensed view of the asset server's recursive load state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelLoadStatus {
    /// Still waiting on the model or one of its dependencies.
    Loading,
    /// The model and every dependency are available.
    Loaded,
    /// The load failed with the given detail.
    Failed(String),
}

#[cfg(feature = "render")]
impl From<&RecursiveDependencyLoadState> for ModelLoadStatus {
    fn from(state: &RecursiveDependencyLoadState) -> Self {
        match state {
            RecursiveDependencyLoadState::Loaded => Self::Loaded,
            RecursiveDependencyLoadState::Failed(err) => Self::Failed(err.to_string()),
            RecursiveDependencyLoadState::NotLoaded | RecursiveDependencyLoadState::Loading => {
                Self::Loading
            }
        }
    }
}

/// Tracks the in-flight model load.
#[cfg(feature = "render")]
#[derive(Resource, Debug, Default)]
pub struct ModelLoadTracking {
    handle: Option<Handle<Scene>>,
    path: Option<String>,
    has_finalised: bool,
}

#[cfg(feature = "render")]
impl ModelLoadTracking {
    /// Whether the load has reached a terminal state.
    #[must_use]
    pub const fn has_finalised(&self) -> bool {
        self.has_finalised
    }

    /// Folds one polled status into the tracker.
    ///
    /// A completed load hands the actor to the controller; a failed one
    /// leaves it pending and yields the error to report. Nothing changes once
    /// the load has finalised.
    pub fn resolve(
        &mut self,
        status: ModelLoadStatus,
        state: &mut ParkingState,
    ) -> Option<ModelLoadError> {
        if self.has_finalised {
            return None;
        }
        match status {
            ModelLoadStatus::Loading => None,
            ModelLoadStatus::Loaded => {
                self.has_finalised = true;
                if state.mark_actor_ready() {
                    info!("car model ready; parking controller engaged");
                }
                None
            }
            ModelLoadStatus::Failed(detail) => {
                self.has_finalised = true;
                Some(ModelLoadError::LoadFailed {
                    path: self.path.clone().unwrap_or_default(),
                    detail,
                })
            }
        }
    }
}

/// Starts loading the model and spawns the actor's scene root.
#[cfg(feature = "render")]
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
fn spawn_model_system(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    settings: Res<ModelSettings>,
    state: Res<ParkingState>,
    mut tracking: ResMut<ModelLoadTracking>,
) {
    if let Err(err) = validate_asset_path(&settings.model) {
        commands.trigger(err);
        tracking.has_finalised = true;
        return;
    }

    let path = settings.model.as_str().to_owned();
    let handle = asset_server.load(GltfAssetLabel::Scene(0).from_asset(path.clone()));
    let pose = state.actor().displayed_pose();
    commands.spawn((
        Name::new("Car"),
        ParkedActor,
        SceneRoot(handle.clone()),
        Transform::from_translation(pose.position).with_rotation(Quat::from_rotation_y(pose.yaw)),
    ));

    info!("loading car model from {path}");
    tracking.handle = Some(handle);
    tracking.path = Some(path);
    tracking.has_finalised = false;
}

/// Polls the model load and hands the actor to the controller when done.
#[cfg(feature = "render")]
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
pub fn poll_model_load_system(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut tracking: ResMut<ModelLoadTracking>,
    mut state: ResMut<ParkingState>,
) {
    if tracking.has_finalised {
        return;
    }
    let Some(handle) = tracking.handle.as_ref() else {
        return;
    };

    let status = ModelLoadStatus::from(&asset_server.recursive_dependency_load_state(handle.id()));
    if let Some(err) = tracking.resolve(status, &mut state) {
        commands.trigger(err);
    }
}

#[cfg(feature = "render")]
#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn log_model_error(event: On<ModelLoadError>) {
    error!(
        "model error: {}; the car stays at its start point",
        event.event()
    );
}

/// Plugin loading the car model and gating the controller on it.
///
/// Requires the asset, scene and glTF plugins (all part of
/// `DefaultPlugins`).
#[derive(Debug, Default)]
pub struct ModelPlugin;

impl Plugin for ModelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ModelSettings>();

        #[cfg(feature = "render")]
        {
            app.init_resource::<ParkingState>();
            app.init_resource::<ModelLoadTracking>();
            app.add_observer(log_model_error);
            app.add_systems(Startup, spawn_model_system);
            app.add_systems(Update, poll_model_load_system.before(parking_tick_system));
        }

        #[cfg(not(feature = "render"))]
        error!("ModelPlugin added without the `render` feature; the actor stays pending");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::default_path(DEFAULT_MODEL_PATH)]
    #[case::nested("vehicles/sedan/body.gltf")]
    #[case::dotted_name("models/car..v2.glb")]
    fn accepts_relative_paths(#[case] path: &str) {
        assert_eq!(validate_asset_path(&ModelAssetPath::from(path)), Ok(()));
    }

    #[rstest]
    #[case::empty("")]
    #[case::absolute("/models/car.glb")]
    #[case::parent("../car.glb")]
    #[case::nested_parent("models/../../car.glb")]
    #[case::windows_parent("models\\..\\car.glb")]
    #[case::windows_drive("C:\\car.glb")]
    #[case::windows_drive_relative("c:car.glb")]
    #[case::windows_unc("\\\\host\\share\\car.glb")]
    #[case::rooted_backslash("\\models\\car.glb")]
    fn rejects_paths_escaping_asset_root(#[case] path: &str) {
        assert_eq!(
            validate_asset_path(&ModelAssetPath::from(path)),
            Err(ModelLoadError::InvalidAssetPath {
                path: path.to_owned(),
            })
        );
    }

    #[test]
    fn load_error_mentions_path() {
        let err = ModelLoadError::LoadFailed {
            path: "models/car.glb".to_owned(),
            detail: "not found".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "failed to load model \"models/car.glb\": not found"
        );
    }

    #[cfg(feature = "render")]
    #[test]
    fn recursive_states_map_to_status() {
        assert_eq!(
            ModelLoadStatus::from(&RecursiveDependencyLoadState::Loading),
            ModelLoadStatus::Loading
        );
        assert_eq!(
            ModelLoadStatus::from(&RecursiveDependencyLoadState::NotLoaded),
            ModelLoadStatus::Loading
        );
        assert_eq!(
            ModelLoadStatus::from(&RecursiveDependencyLoadState::Loaded),
            ModelLoadStatus::Loaded
        );
    }

    #[cfg(feature = "render")]
    fn awaiting(path: &str) -> ModelLoadTracking {
        ModelLoadTracking {
            handle: None,
            path: Some(path.to_owned()),
            has_finalised: false,
        }
    }

    #[cfg(feature = "render")]
    #[test]
    fn loading_status_keeps_waiting() {
        let mut tracking = awaiting(DEFAULT_MODEL_PATH);
        let mut state = ParkingState::default();
        assert_eq!(tracking.resolve(ModelLoadStatus::Loading, &mut state), None);
        assert!(!tracking.has_finalised());
        assert!(!state.actor().is_ready());
    }

    #[cfg(feature = "render")]
    #[test]
    fn loaded_status_readies_actor() {
        let mut tracking = awaiting(DEFAULT_MODEL_PATH);
        let mut state = ParkingState::default();
        assert_eq!(tracking.resolve(ModelLoadStatus::Loaded, &mut state), None);
        assert!(tracking.has_finalised());
        assert!(state.actor().is_ready());
    }

    #[cfg(feature = "render")]
    #[test]
    fn failed_status_reports_and_keeps_actor_pending() {
        let mut tracking = awaiting("models/missing.glb");
        let mut state = ParkingState::default();
        let err = tracking.resolve(ModelLoadStatus::Failed("not found".to_owned()), &mut state);
        assert_eq!(
            err,
            Some(ModelLoadError::LoadFailed {
                path: "models/missing.glb".to_owned(),
                detail: "not found".to_owned(),
            })
        );
        assert!(tracking.has_finalised());
        assert!(!state.actor().is_ready());

        // A late success cannot revive a finalised load.
        assert_eq!(tracking.resolve(ModelLoadStatus::Loaded, &mut state), None);
        assert!(!state.actor().is_ready());
    }
}
