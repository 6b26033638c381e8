//! gaitrig CLI — inspect motion recordings and export skeleton projections.
//!
//! Usage:
//!   gaitrig info <FILE>                 Show recording information
//!   gaitrig check <FILE>                Check blueprint coverage of a recording
//!   gaitrig coords <FILE>               Export the coordinate table as JSON
//!   gaitrig trace <FILE> <SEGMENT>...   Export segment trajectories as JSON
//!   gaitrig frames <FILE>               Stream per-frame poses as JSON lines
//!   gaitrig locate                      Resolve a dataset recording path
//!   gaitrig config [--write]            Show or save the effective configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gaitrig_common::AppConfig;

mod commands;

use commands::{ProjectionArgs, SourceArgs};

#[derive(Parser)]
#[command(
    name = "gaitrig",
    about = "Skeleton-relative projections of motion-capture gait recordings",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to $XDG_CONFIG_HOME/gaitrig/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show recording information
    Info {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Check which blueprint segments a recording can supply
    Check {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        projection: ProjectionArgs,
    },

    /// Export the coordinate table for every limb group
    Coords {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        projection: ProjectionArgs,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export trajectories of individual segments
    Trace {
        #[command(flatten)]
        source: SourceArgs,

        /// Segment names, e.g. "Left Toe"
        #[arg(required = true, num_args = 1..)]
        segments: Vec<String>,

        #[command(flatten)]
        projection: ProjectionArgs,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Stream one JSON record per frame for a renderer
    Frames {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        projection: ProjectionArgs,

        /// Number of frames to emit (clamped to the recording)
        #[arg(long)]
        length: Option<usize>,

        /// First frame, in seconds from the start of the recording
        #[arg(long, default_value = "0.0")]
        from_secs: f64,

        /// Stop before this time, in seconds (overrides --length)
        #[arg(long)]
        to_secs: Option<f64>,

        /// Segment to draw a motion trail for (repeatable)
        #[arg(long = "trail")]
        trails: Vec<String>,

        /// Maximum number of points per trail
        #[arg(long)]
        trace_len: Option<usize>,

        /// Pace output at the configured frame interval
        #[arg(long)]
        realtime: bool,
    },

    /// Resolve the path of a dataset recording
    Locate {
        /// Recording set number
        #[arg(long)]
        set: Option<u32>,

        /// Gait type, e.g. "Normal"
        #[arg(long)]
        gait: Option<String>,

        /// Terrain, e.g. "Treadmill"
        #[arg(long)]
        terrain: Option<String>,
    },

    /// Show the effective configuration
    Config {
        /// Save it to the standard config location
        #[arg(long)]
        write: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // An explicit --config must load; the standard location falls back to
    // defaults, reported once logging is up.
    let (config, load_error) = match &cli.config {
        Some(path) => (
            AppConfig::load_from(path)
                .map_err(|e| anyhow::anyhow!("Failed to load config {}: {e}", path.display()))?,
            None,
        ),
        None => match AppConfig::load() {
            Ok(config) => (config, None),
            Err(e) => (AppConfig::default(), Some(e)),
        },
    };

    // Initialize logging
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    gaitrig_common::logging::init_logging(&logging)?;

    if let Some(e) = load_error {
        tracing::warn!(error = %e, "Ignoring unreadable config file, using defaults");
    }

    match cli.command {
        Commands::Info { source } => commands::info::run(&config, source),
        Commands::Check { source, projection } => {
            commands::check::run(&config, source, projection)
        }
        Commands::Coords {
            source,
            projection,
            output,
        } => commands::coords::run(&config, source, projection, output),
        Commands::Trace {
            source,
            segments,
            projection,
            output,
        } => commands::trace::run(&config, source, segments, projection, output),
        Commands::Frames {
            source,
            projection,
            length,
            from_secs,
            to_secs,
            trails,
            trace_len,
            realtime,
        } => commands::frames::run(
            &config, source, projection, length, from_secs, to_secs, trails, trace_len, realtime,
        ),
        Commands::Locate { set, gait, terrain } => {
            commands::locate::run(&config, set, gait, terrain)
        }
        Commands::Config { write } => commands::config::run(&config, write),
    }
}
