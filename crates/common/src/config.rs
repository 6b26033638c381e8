//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{GaitrigError, GaitrigResult};
use crate::frames::FrameRate;

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default projection settings for coordinate tables.
    #[serde(default)]
    pub projection: ProjectionDefaults,

    /// Default table loading settings.
    #[serde(default)]
    pub loader: LoaderDefaults,

    /// Default frame playback settings.
    #[serde(default)]
    pub playback: PlaybackDefaults,

    /// Where recordings are stored on disk.
    #[serde(default)]
    pub dataset: DatasetDefaults,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Default projection parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionDefaults {
    /// Two axis letters, first feeds the horizontal dimension (e.g. "yz").
    pub axes: String,

    /// Segment used as the coordinate origin.
    pub reference: String,
}

/// Default loader parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderDefaults {
    /// Column delimiter of plain-text segment position exports.
    pub delimiter: char,

    /// Leading rows after the header that never hold samples.
    pub skip_rows: usize,
}

/// Default playback parameters for frame-by-frame consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackDefaults {
    /// Number of frames a driver requests.
    pub length: usize,

    /// Delay between frames (milliseconds).
    pub interval_ms: u64,

    /// Maximum number of points in a motion trail.
    pub trace_len: usize,

    /// Recording sample rate (Hz).
    pub sample_rate_hz: f64,
}

/// Location of recordings laid out as `<root>/set<N>/<Gait>_Gait_<Terrain>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetDefaults {
    pub root: PathBuf,
    pub set: u32,
    pub gait: String,
    pub terrain: String,
    /// Exported sheet name, appended to the file stem.
    pub sheet: String,
    pub extension: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "gaitrig=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for ProjectionDefaults {
    fn default() -> Self {
        Self {
            axes: "yz".to_string(),
            reference: "Pelvis".to_string(),
        }
    }
}

impl Default for LoaderDefaults {
    fn default() -> Self {
        Self {
            delimiter: '\t',
            skip_rows: 1,
        }
    }
}

impl Default for PlaybackDefaults {
    fn default() -> Self {
        Self {
            length: 2000,
            interval_ms: 20,
            trace_len: 1000,
            sample_rate_hz: 60.0,
        }
    }
}

impl PlaybackDefaults {
    pub fn frame_rate(&self) -> FrameRate {
        FrameRate::new(self.sample_rate_hz)
    }

    /// Delay between emitted frames when pacing playback.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for DatasetDefaults {
    fn default() -> Self {
        Self {
            root: PathBuf::from("data"),
            set: 4,
            gait: "Normal".to_string(),
            terrain: "Treadmill".to_string(),
            sheet: "Segment Position".to_string(),
            extension: "tsv".to_string(),
        }
    }
}

impl DatasetDefaults {
    /// Path of the recording described by these settings.
    pub fn path(&self) -> PathBuf {
        self.path_for(self.set, &self.gait, &self.terrain)
    }

    /// Path of a specific recording under the configured root.
    pub fn path_for(&self, set: u32, gait: &str, terrain: &str) -> PathBuf {
        let sheet = self.sheet.replace(' ', "_");
        self.root.join(format!("set{set}")).join(format!(
            "{gait}_Gait_{terrain}_{sheet}.{}",
            self.extension
        ))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location.
    ///
    /// A missing file yields the defaults; an unreadable or invalid one is an
    /// error so the caller can report it once logging is up.
    pub fn load() -> GaitrigResult<Self> {
        let config_path = config_file_path();
        if !config_path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&config_path)
    }

    /// Load config from an explicit path.
    pub fn load_from(path: &Path) -> GaitrigResult<Self> {
        if !path.exists() {
            return Err(GaitrigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings no recording can be read or played back with.
    pub fn validate(&self) -> GaitrigResult<()> {
        let axes: Vec<char> = self
            .projection
            .axes
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        let known = axes
            .iter()
            .all(|c| matches!(c.to_ascii_lowercase(), 'x' | 'y' | 'z'));
        if axes.len() != 2 || !known {
            return Err(GaitrigError::config(format!(
                "projection.axes must name two of x, y, z, got {:?}",
                self.projection.axes
            )));
        }
        if self.projection.reference.trim().is_empty() {
            return Err(GaitrigError::config("projection.reference is empty"));
        }
        if matches!(self.loader.delimiter, '\n' | '\r') {
            return Err(GaitrigError::config("loader.delimiter cannot be a line break"));
        }
        if !(self.playback.sample_rate_hz.is_finite() && self.playback.sample_rate_hz > 0.0) {
            return Err(GaitrigError::config(format!(
                "playback.sample_rate_hz must be positive, got {}",
                self.playback.sample_rate_hz
            )));
        }
        Ok(())
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("gaitrig").join("config.json")
}
