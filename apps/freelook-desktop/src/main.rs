mod app;
mod state;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use freelook_camera::{CameraConfig, MovementMode};
use freelook_render_wgpu::{ShaderLibrary, Stage};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use winit::event_loop::{ControlFlow, EventLoop};

use app::GpuApp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StageArg {
    /// Flat red triangle in clip space
    Triangle,
    /// Triangle through a fixed MVP transform
    Mvp,
    /// Indexed colored cube with depth testing
    Cube,
    /// Colored cube with the free-look camera
    Camera,
}

impl From<StageArg> for Stage {
    fn from(arg: StageArg) -> Self {
        match arg {
            StageArg::Triangle => Stage::Triangle,
            StageArg::Mvp => Stage::Mvp,
            StageArg::Cube => Stage::Cube,
            StageArg::Camera => Stage::Camera,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "freelook-desktop", about = "GPU demo stages ending in a free-look camera")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Which stage to run
    #[arg(long, value_enum, default_value_t = StageArg::Camera)]
    stage: StageArg,

    /// Camera config file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Degrees of rotation per pointer unit
    #[arg(long)]
    sensitivity: Option<f32>,

    /// Move continuously at SPEED units per second while keys are held,
    /// instead of one step per key press
    #[arg(long, value_name = "SPEED")]
    time_scaled: Option<f32>,

    /// Negate pointer deltas
    #[arg(long)]
    invert_look: bool,

    /// Directory of <stage>.wgsl files overriding the built-in shaders
    #[arg(long)]
    shader_dir: Option<PathBuf>,
}

/// Camera config from the file (or defaults) with command-line overrides.
fn resolve_config(cli: &Cli) -> Result<CameraConfig> {
    let mut config = match &cli.config {
        Some(path) => CameraConfig::load(path)?,
        None => CameraConfig::default(),
    };
    if let Some(sensitivity) = cli.sensitivity {
        config.sensitivity = sensitivity;
    }
    if let Some(speed) = cli.time_scaled {
        config.movement = MovementMode::TimeScaled { speed };
    }
    if cli.invert_look {
        config.invert_look = true;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    let config = resolve_config(&cli).inspect_err(|e| tracing::error!("invalid config: {e}"))?;
    let shaders = match &cli.shader_dir {
        Some(dir) => ShaderLibrary::from_dir(dir),
        None => ShaderLibrary::builtin(),
    };
    let stage = Stage::from(cli.stage);

    tracing::info!(%stage, movement = ?config.movement, "freelook-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(stage, &config, shaders);
    event_loop.run_app(&mut app)?;

    if let Some(err) = app.take_startup_error() {
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn cli_defaults_to_camera_stage() {
        let cli = Cli::parse_from(["freelook-desktop"]);
        assert_eq!(Stage::from(cli.stage), Stage::Camera);
        assert_eq!(resolve_config(&cli).unwrap(), CameraConfig::default());
    }

    #[test]
    fn cli_overrides_apply() {
        let cli = Cli::parse_from([
            "freelook-desktop",
            "--stage",
            "cube",
            "--sensitivity",
            "0.5",
            "--time-scaled",
            "3",
            "--invert-look",
        ]);
        assert_eq!(Stage::from(cli.stage), Stage::Cube);
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.sensitivity, 0.5);
        assert_eq!(config.movement, MovementMode::TimeScaled { speed: 3.0 });
        assert!(config.invert_look);
    }

    #[test]
    fn cli_overrides_file_values() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, r#"{{ "sensitivity": 0.25, "step": 2.0 }}"#).unwrap();
        let path = tmp.path().to_str().unwrap().to_owned();
        let cli = Cli::parse_from(["freelook-desktop", "--config", &path, "--sensitivity", "1.5"]);
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.sensitivity, 1.5);
        assert_eq!(config.step, 2.0);
    }

    #[test]
    fn invalid_override_is_rejected() {
        let cli = Cli::parse_from(["freelook-desktop", "--time-scaled", "0"]);
        assert!(resolve_config(&cli).is_err());
    }

    #[test]
    fn every_stage_arg_maps_to_a_stage() {
        for arg in StageArg::value_variants() {
            let stage = Stage::from(*arg);
            assert_eq!(
                arg.to_possible_value().unwrap().get_name(),
                stage.name()
            );
        }
    }
}
