//! Scene configuration loaded from an optional JSON file.
//!
//! Every field has a default, so an empty object `{}` is a valid file.
//! Command-line overrides are applied on top of the file before validation.

use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::Deserialize;
use thiserror::Error;

use crate::constants::{
    DEFAULT_ACTOR_START, DEFAULT_MODEL_PATH, DEFAULT_TARGET, ORBIT_DAMPING, STEP_SIZE, TARGET_MAX,
    TARGET_MIN,
};
use crate::model::{validate_asset_path, ModelAssetPath, ModelSettings};
use crate::state::ParkingState;
use crate::viewport::OrbitSettings;

/// Errors raised while reading or validating a [`SceneConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid JSON for a scene config.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value is outside its accepted domain.
    #[error("invalid `{field}`: {detail}")]
    InvalidValue {
        /// Name of the offending field.
        field: &'static str,
        /// What is wrong with it.
        detail: String,
    },
}

/// User-facing scene configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    /// glTF asset holding the car, relative to the asset root.
    pub model_path: String,
    /// Starting actor position `[x, y, z]`.
    pub actor_start: [f32; 3],
    /// Initial parking spot `[x, y, z]`.
    pub target: [f32; 3],
    /// Distance covered per tick.
    pub step_size: f32,
    /// Orbit damping factor in `(0, 1]`.
    pub orbit_damping: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            model_path: DEFAULT_MODEL_PATH.to_owned(),
            actor_start: DEFAULT_ACTOR_START.to_array(),
            target: DEFAULT_TARGET.to_array(),
            step_size: STEP_SIZE,
            orbit_damping: ORBIT_DAMPING,
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    /// Replacement model path.
    pub model_path: Option<String>,
    /// Replacement target X.
    pub target_x: Option<f32>,
    /// Replacement target Z.
    pub target_z: Option<f32>,
}

impl SceneConfig {
    /// Parses a config from JSON text without validating it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed JSON or unknown fields.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a config file without validating it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not a valid config.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Applies command-line overrides.
    #[must_use]
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(model_path) = overrides.model_path {
            self.model_path = model_path;
        }
        if let Some(x) = overrides.target_x {
            self.target[0] = x;
        }
        if let Some(z) = overrides.target_z {
            self.target[2] = z;
        }
        self
    }

    /// Checks every value against its domain.
    ///
    /// Target X and Z must lie in the range the debug panel can edit.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError::InvalidValue`] encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_asset_path(&ModelAssetPath::new(self.model_path.as_str())).map_err(|err| {
            ConfigError::InvalidValue {
                field: "model_path",
                detail: err.to_string(),
            }
        })?;

        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err(invalid("step_size", "must be a positive finite number"));
        }
        if !(self.orbit_damping > 0.0 && self.orbit_damping <= 1.0) {
            return Err(invalid("orbit_damping", "must be in (0, 1]"));
        }
        if self.actor_start.iter().any(|c| !c.is_finite()) {
            return Err(invalid("actor_start", "coordinates must be finite"));
        }
        if self.target.iter().any(|c| !c.is_finite()) {
            return Err(invalid("target", "coordinates must be finite"));
        }
        let [x, _, z] = self.target;
        if !(TARGET_MIN..=TARGET_MAX).contains(&x) || !(TARGET_MIN..=TARGET_MAX).contains(&z) {
            return Err(ConfigError::InvalidValue {
                field: "target",
                detail: format!("x and z must be within [{TARGET_MIN}, {TARGET_MAX}]"),
            });
        }
        Ok(())
    }

    /// Builds the initial simulation state.
    #[must_use]
    pub fn parking_state(&self) -> ParkingState {
        ParkingState::new(
            Vec3::from_array(self.actor_start),
            Vec3::from_array(self.target),
            self.step_size,
        )
    }

    /// Builds the model loader settings.
    #[must_use]
    pub fn model_settings(&self) -> ModelSettings {
        ModelSettings {
            model: ModelAssetPath::new(self.model_path.as_str()),
        }
    }

    /// Builds the orbit controller settings.
    #[must_use]
    pub fn orbit_settings(&self) -> OrbitSettings {
        OrbitSettings {
            damping: self.orbit_damping,
            ..OrbitSettings::default()
        }
    }
}

fn invalid(field: &'static str, detail: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        detail: detail.to_owned(),
    }
}
