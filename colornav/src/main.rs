//! colornav - ColorNavigator API client
//!
//! Each subcommand sends one request to the ColorNavigator API and prints the
//! decoded response. `colornav mock` serves an in-memory stand-in of the API.

mod commands;

use clap::{Parser, Subcommand};
use colornav_client::ColorNavigatorClient;
use colornav_core::config::{ClientConfig, ConfigLoader};
use colornav_core::models::{ColorModeIndex, KeyLock, SelfCalibrationAction};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line client for the ColorNavigator monitor calibration API
#[derive(Parser)]
#[command(name = "colornav")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (TOML or JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// API server host (overrides config and COLORNAV_HOST)
    #[arg(long, global = true)]
    host: Option<String>,

    /// API server port (overrides config and COLORNAV_PORT)
    #[arg(long, global = true)]
    port: Option<u16>,

    /// Monitor id; defaults to the first connected monitor
    #[arg(long, global = true)]
    monitor: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List connected monitors
    Monitors,

    /// Read and change color modes
    #[command(name = "color-modes")]
    ColorModes {
        #[command(subcommand)]
        action: ColorModeAction,
    },

    /// Read and change the key lock setting
    #[command(name = "key-lock")]
    KeyLock {
        #[command(subcommand)]
        action: KeyLockAction,
    },

    /// Inspect pixel values and control the cross marker
    Pixel {
        #[command(subcommand)]
        action: PixelAction,
    },

    /// Run or stop SelfCalibration
    Selfcalibration {
        /// RUN or STOP
        action: SelfCalibrationAction,
    },

    /// List and create calibration targets
    Targets {
        #[command(subcommand)]
        action: TargetAction,
    },

    /// Serve a mock ColorNavigator API with one demo monitor
    Mock {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:50005")]
        listen: SocketAddr,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
enum ColorModeAction {
    /// List all color modes
    List,

    /// Show one color mode
    Get {
        /// Color mode index (0 to 9)
        index: ColorModeIndex,
    },

    /// Switch the current color mode
    Select {
        /// Color mode index (0 to 9)
        index: ColorModeIndex,
    },

    /// Change color mode settings (PATCH)
    Update {
        /// Color mode index (0 to 9)
        index: ColorModeIndex,

        /// JSON file with the settings; a built-in Standard sample otherwise
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// List calibration results of an Advanced color mode
    CalibrationResults {
        /// Color mode index (0 to 9)
        index: ColorModeIndex,
    },

    /// List validation results; without arguments every Advanced mode is searched
    ValidationResults {
        /// Color mode index (0 to 9)
        index: Option<ColorModeIndex>,

        /// Calibration result id
        #[arg(requires = "index")]
        calibration_result_id: Option<String>,
    },
}

#[derive(Subcommand)]
enum KeyLockAction {
    /// Show the key lock setting
    Get,

    /// Change the key lock setting
    Set {
        /// OFF, MENU or ALL
        setting: KeyLock,
    },
}

#[derive(Subcommand)]
enum PixelAction {
    /// Read the pixel at a coordinate
    Inspect {
        #[arg(long)]
        x: u32,

        #[arg(long)]
        y: u32,

        /// Show the cross marker at the pixel
        #[arg(long)]
        show_marker: bool,
    },

    /// Show or hide the cross marker
    Marker {
        #[command(subcommand)]
        action: MarkerAction,
    },
}

#[derive(Subcommand)]
enum MarkerAction {
    /// Show the cross marker at a coordinate
    Show {
        #[arg(long)]
        x: u32,

        #[arg(long)]
        y: u32,

        /// Hide the marker again after this many seconds
        #[arg(long)]
        hide_after: Option<u64>,
    },

    /// Hide the cross marker
    Hide,
}

#[derive(Subcommand)]
enum TargetAction {
    /// List calibration targets
    List,

    /// Create a calibration target
    Create {
        /// JSON file with the target definition; a built-in sample otherwise
        #[arg(long)]
        definition: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let Cli {
        verbose,
        config,
        host,
        port,
        monitor,
        command,
    } = Cli::parse();

    let default_level = match (&command, verbose) {
        (_, true) => "debug",
        (Commands::Mock { .. }, false) => "info",
        _ => "warn",
    };
    init_tracing(default_level);

    match command {
        Commands::Version => {
            println!("colornav v{}", env!("CARGO_PKG_VERSION"));
        }

        Commands::Mock { listen } => {
            println!("🚀 Mock ColorNavigator API on http://{}", listen);
            colornav_mock::run_mock_server(listen, colornav_mock::MockState::demo()).await?;
        }

        command => {
            let config = load_config(config, host, port)?;
            let client = ColorNavigatorClient::new(&config)?;
            commands::run(&client, monitor.as_deref(), command).await?;
        }
    }

    Ok(())
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Config file (explicit or default), then environment, then flags
fn load_config(
    path: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<ClientConfig> {
    let mut config = ConfigLoader::load_or_default(path.as_deref())?;
    ConfigLoader::apply_env(&mut config)?;
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    tracing::debug!("Using ColorNavigator API at {}", config.base_url());
    Ok(config)
}
