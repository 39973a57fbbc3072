#![cfg_attr(docsrs, feature(doc_cfg))]
//! Library crate for the valet parking demo.
//!
//! A car model is loaded into a 3D scene and driven, one fixed step per
//! frame, toward a parking spot the user can move from a debug panel. The
//! movement rules live in [`parking`] and are independent of the engine; the
//! remaining modules are Bevy plugins wiring them into a frame loop.
pub mod config;
pub mod constants;
pub mod logging;
pub mod model;
pub mod panel;
pub mod parking;
#[cfg(feature = "render")]
#[cfg_attr(docsrs, doc(cfg(feature = "render")))]
pub mod scene;
pub mod simulation;
pub mod state;
pub mod viewport;

use bevy::app::PluginGroupBuilder;
use bevy::prelude::*;

pub use config::{ConfigError, ConfigOverrides, SceneConfig};
pub use logging::init as init_logging;
pub use model::{ModelLoadError, ModelPlugin, ModelSettings};
pub use panel::{apply_panel_edit, PanelEdit, PanelPlugin, PanelSettings};
pub use parking::{advance, ActorPose, AxisComparison, Heading, ParkingPhase};
#[cfg(feature = "render")]
#[cfg_attr(docsrs, doc(cfg(feature = "render")))]
pub use scene::ScenePlugin;
pub use simulation::{ParkedActor, ParkingPhaseChanged, ParkingPlugin, TargetMarker};
pub use state::{ActorSlot, ParkingState, ParkingTarget, PhaseChange, TargetAxis};
pub use viewport::{OrbitCamera, OrbitSettings, ViewportPlugin};

/// Every plugin the demo needs on top of Bevy's `DefaultPlugins`.
///
/// Resources inserted before the group is added (for example a configured
/// [`ParkingState`]) are kept; the plugins only fill in defaults.
#[derive(Debug, Default)]
pub struct ValetPlugins;

impl PluginGroup for ValetPlugins {
    fn build(self) -> PluginGroupBuilder {
        with_scene(
            PluginGroupBuilder::start::<Self>()
                .add(ParkingPlugin)
                .add(ViewportPlugin)
                .add(PanelPlugin)
                .add(ModelPlugin),
        )
    }
}

#[cfg(feature = "render")]
fn with_scene(group: PluginGroupBuilder) -> PluginGroupBuilder {
    group.add(ScenePlugin)
}

#[cfg(not(feature = "render"))]
const fn with_scene(group: PluginGroupBuilder) -> PluginGroupBuilder {
    group
}

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use valet::prelude::*;
    //! ```

    pub use crate::parking::{advance, ActorPose, Heading, ParkingPhase};
    pub use crate::state::{ParkingState, TargetAxis};
    pub use crate::ParkingPlugin;
    pub use crate::ValetPlugins;
}
