use crate::error::{PlannerError, Result};
use crate::model::RouteModel;
use crate::planner::ExpansionMode;
use crate::types::NodeId;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "route_planner.toml";

/// Largest street grid `MapConfig::build_model` will allocate
pub const MAX_GRID_NODES: u32 = 1_000_000;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub planner: PlannerConfig,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct PlannerConfig {
    /// "first_visit" or "relaxing"
    #[serde(default)]
    pub expansion: ExpansionMode,
}

/// Synthetic street grid used by the command-line front end
#[derive(Debug, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_rows")]
    pub rows: u32,
    #[serde(default = "default_cols")]
    pub cols: u32,
    /// Meters per map unit (the map spans one unit on each axis)
    #[serde(default = "default_metric_scale")]
    pub metric_scale: f32,
    /// Street segments to cut, as pairs of intersection IDs (row-major)
    #[serde(default)]
    pub closed_streets: Vec<(u32, u32)>,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// tracing-subscriber filter directive, overridden by RUST_LOG
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

// Default values
fn default_rows() -> u32 { 10 }
fn default_cols() -> u32 { 10 }
fn default_metric_scale() -> f32 { 1000.0 }
fn default_log_filter() -> String { "route_planner=info".to_string() }

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
            metric_scale: default_metric_scale(),
            closed_streets: Vec::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl MapConfig {
    /// Build the street grid this section describes
    pub fn build_model(&self) -> Result<RouteModel> {
        let count = self
            .rows
            .checked_mul(self.cols)
            .filter(|&n| n <= MAX_GRID_NODES)
            .ok_or_else(|| {
                PlannerError::Config(format!(
                    "street grid {}x{} exceeds {} intersections",
                    self.rows, self.cols, MAX_GRID_NODES
                ))
            })? as usize;

        let mut model = RouteModel::lattice(self.rows, self.cols, self.metric_scale);
        for &(a, b) in &self.closed_streets {
            if a as usize >= count || b as usize >= count {
                warn!("Ignoring closed street {}-{}: outside the {}x{} grid", a, b, self.rows, self.cols);
                continue;
            }
            if !model.remove_edge(NodeId(a), NodeId(b)) {
                warn!("Ignoring closed street {}-{}: not a street segment", a, b);
            }
        }
        Ok(model)
    }
}

/// Where the active configuration came from.
///
/// The logging filter lives in the config itself, so the subscriber is
/// installed after loading; call `log` once it is up.
#[derive(Debug)]
pub enum ConfigSource {
    File(PathBuf),
    /// No config file; built-in defaults.
    Defaults,
    /// The file exists but could not be used; built-in defaults.
    Fallback { path: PathBuf, error: PlannerError },
}

impl ConfigSource {
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => info!("Loaded configuration from {}", path.display()),
            ConfigSource::Defaults => info!("No {} found, using default configuration", CONFIG_FILE),
            ConfigSource::Fallback { path, error } => {
                warn!("Failed to load {}: {}", path.display(), error);
                warn!("Using default configuration");
            }
        }
    }
}

impl Config {
    /// Load configuration from `route_planner.toml`, or use defaults if the
    /// file is missing or broken
    pub fn load() -> (Self, ConfigSource) {
        Self::load_or_default(Path::new(CONFIG_FILE))
    }

    pub fn load_or_default(path: &Path) -> (Self, ConfigSource) {
        if !path.exists() {
            return (Config::default(), ConfigSource::Defaults);
        }
        match Self::load_from(path) {
            Ok(config) => (config, ConfigSource::File(path.to_path_buf())),
            Err(error) => (
                Config::default(),
                ConfigSource::Fallback {
                    path: path.to_path_buf(),
                    error,
                },
            ),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}
