//! MatrixRain CLI: inspect the connector table and exercise the title intro.
//!
//! Usage:
//!   matrixrain connectors [--json]    Print connector ratings and statistics
//!   matrixrain frames [OPTIONS]       Generate the intro frames and list them
//!   matrixrain play [OPTIONS]         Generate, then play the intro at the tick rate
//!   matrixrain config [--write]       Show the effective config, or write it out

use clap::{Args, Parser, Subcommand};
use matrixrain_common::config::AppConfig;

mod commands;
mod synthetic;

#[derive(Parser)]
#[command(
    name = "matrixrain",
    about = "Digital rain title intro toolkit",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Overrides for the configured intro defaults.
#[derive(Args, Debug, Clone)]
pub struct IntroArgs {
    /// Title text rendered into the source bitmap
    #[arg(short, long)]
    title: Option<String>,

    /// Window width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Window height in pixels
    #[arg(long)]
    height: Option<u32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the connector rating table and its statistics
    Connectors {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Generate the zoom frames and print per-frame metadata
    Frames {
        #[command(flatten)]
        intro: IntroArgs,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Generate the zoom frames and play them back
    Play {
        #[command(flatten)]
        intro: IntroArgs,

        /// Playback tick rate (Hz)
        #[arg(long)]
        rate: Option<u32>,
    },

    /// Show the effective configuration
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        write: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load();

    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    matrixrain_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Connectors { json } => commands::connectors::run(json),
        Commands::Frames { intro, json } => {
            let settings = commands::IntroSettings::resolve(&config, intro);
            commands::frames::run(settings, json)
        }
        Commands::Play { intro, rate } => {
            let settings = commands::IntroSettings::resolve(&config, intro);
            let rate = rate.unwrap_or(config.intro.tick_rate_hz);
            commands::play::run(settings, rate).await
        }
        Commands::Config { write } => commands::config::run(&config, write),
    }
}
