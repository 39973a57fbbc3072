//! Binary entry point: parses flags, loads config and runs the Bevy app.
use std::path::PathBuf;

use anyhow::{anyhow, Context as _};
use bevy::log::LogPlugin;
use bevy::prelude::*;
use clap::Parser;
use log::info;
use valet::{init_logging, ConfigOverrides, SceneConfig, ValetPlugins};

/// Drive a car into a parking spot you can move around.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON scene configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Car model path relative to the asset directory
    #[arg(long, value_name = "PATH")]
    model: Option<String>,

    /// Initial parking spot X coordinate
    #[arg(long, allow_negative_numbers = true)]
    target_x: Option<f32>,

    /// Initial parking spot Z coordinate
    #[arg(long, allow_negative_numbers = true)]
    target_z: Option<f32>,
}

impl Args {
    fn load_config(&self) -> anyhow::Result<SceneConfig> {
        let base = match &self.config {
            Some(path) => SceneConfig::from_path(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => SceneConfig::default(),
        };
        let config = base.with_overrides(ConfigOverrides {
            model_path: self.model.clone(),
            target_x: self.target_x,
            target_z: self.target_z,
        });
        config.validate().context("invalid scene configuration")?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = args.load_config()?;
    info!(
        "parking {} from {:?} to {:?}",
        config.model_path, config.actor_start, config.target
    );

    let exit = App::new()
        .add_plugins(
            DefaultPlugins
                .build()
                .disable::<LogPlugin>()
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "valet".to_owned(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .insert_resource(config.parking_state())
        .insert_resource(config.model_settings())
        .insert_resource(config.orbit_settings())
        .add_plugins(ValetPlugins)
        .run();

    match exit {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => Err(anyhow!("app exited with code {code}")),
    }
}
