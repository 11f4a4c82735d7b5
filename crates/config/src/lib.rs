//! Scenario models and loaders for the lander descent solver.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// One descent scenario: a vehicle, the body it lands on, and optional search overrides.
#[derive(Debug, Deserialize, Clone)]
pub struct ScenarioConfig {
    pub name: String,
    pub vehicle: VehicleConfig,
    pub body: BodyConfig,
    #[serde(default)]
    pub initial: Option<InitialStateConfig>,
    #[serde(default)]
    pub search: SearchSettings,
}

/// Vehicle mass and engine description.
#[derive(Debug, Deserialize, Clone)]
pub struct VehicleConfig {
    pub name: String,
    pub dry_mass_kg: f64,
    pub propellant_mass_kg: f64,
    pub jet_speed_m_s: f64,
    pub flow_rate_kg_s: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BodyConfig {
    pub name: String,
    pub surface_gravity_m_s2: f64,
}

/// Initial vertical state; command-line values take precedence.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct InitialStateConfig {
    pub start_speed_m_s: f64,
    pub start_height_m: f64,
}

/// Optional overrides of the search grid. Unset keys keep the solver defaults.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct SearchSettings {
    pub fall_start_s: Option<f64>,
    pub fall_step_s: Option<f64>,
    pub burn_min_s: Option<f64>,
    pub burn_max_s: Option<f64>,
    pub burn_step_s: Option<f64>,
    pub height_tolerance_m: Option<f64>,
    pub speed_min_m_s: Option<f64>,
    pub speed_max_m_s: Option<f64>,
    pub max_evaluations: Option<u64>,
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("no scenarios found in {0}")]
    Empty(PathBuf),
    #[error("scenario `{0}` not found")]
    NotFound(String),
}

/// Load every scenario from a YAML list, a single TOML file, or a directory of TOML files.
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<ScenarioConfig>, ConfigError> {
    let path = path.as_ref();
    let scenarios: Vec<ScenarioConfig> = load_records(path)?;
    if scenarios.is_empty() {
        return Err(ConfigError::Empty(path.to_path_buf()));
    }
    Ok(scenarios)
}

/// Load a scenario by name, or the first one found when `name` is `None`.
pub fn load_scenario<P: AsRef<Path>>(
    path: P,
    name: Option<&str>,
) -> Result<ScenarioConfig, ConfigError> {
    let scenarios = load_scenarios(path)?;
    select(scenarios, name)
}

fn select(
    scenarios: Vec<ScenarioConfig>,
    name: Option<&str>,
) -> Result<ScenarioConfig, ConfigError> {
    match name {
        Some(requested) => scenarios
            .into_iter()
            .find(|s| s.name.eq_ignore_ascii_case(requested))
            .ok_or_else(|| ConfigError::NotFound(requested.to_string())),
        None => scenarios
            .into_iter()
            .next()
            .ok_or_else(|| ConfigError::NotFound("<first>".to_string())),
    }
}

fn load_records<T>(path: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
