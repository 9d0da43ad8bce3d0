//! Process configuration: the proximity radius and scoring defaults, read
//! from an optional JSON file.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

/// Where the server looks for its JSON configuration unless overridden.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable naming an alternate configuration path.
const CONFIG_PATH_ENV: &str = "TRAIL_QUIZ_BACK_CONFIG_PATH";
/// Acceptance radius applied when the config file does not set one.
const DEFAULT_PROXIMITY_RADIUS_M: f64 = 50.0;
/// Score awarded for questions that carry no per-question override.
const DEFAULT_POINTS_PER_QUESTION: u32 = 10;

#[derive(Debug, Clone)]
/// Runtime tuning knobs, fixed for the lifetime of the process.
pub struct AppConfig {
    proximity_radius_m: f64,
    points_per_question: u32,
}

impl AppConfig {
    /// Read the configuration file, staying on built-in defaults when it is
    /// absent or does not parse. Never fails; a quiz can always run.
    pub fn load() -> Self {
        let path = resolve_config_path();
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "no config file, using built-in defaults");
                return Self::default();
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "config file unreadable, using built-in defaults"
                );
                return Self::default();
            }
        };

        match serde_json::from_str::<RawConfig>(&contents) {
            Ok(raw) => {
                let config: Self = raw.into();
                info!(
                    path = %path.display(),
                    radius_m = config.proximity_radius_m,
                    points = config.points_per_question,
                    "loaded quiz configuration"
                );
                config
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "config file does not parse, using built-in defaults"
                );
                Self::default()
            }
        }
    }

    /// Acceptance radius in meters applied to every question.
    pub fn proximity_radius_m(&self) -> f64 {
        self.proximity_radius_m
    }

    /// Score awarded for a question without a per-question override.
    pub fn points_per_question(&self) -> u32 {
        self.points_per_question
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            proximity_radius_m: DEFAULT_PROXIMITY_RADIUS_M,
            points_per_question: DEFAULT_POINTS_PER_QUESTION,
        }
    }
}

#[derive(Debug, Deserialize)]
/// On-disk shape of the configuration file; every knob is optional.
struct RawConfig {
    proximity_radius_m: Option<f64>,
    points_per_question: Option<u32>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let proximity_radius_m = match value.proximity_radius_m {
            Some(radius) if radius.is_finite() && radius > 0.0 => radius,
            Some(radius) => {
                warn!(radius_m = radius, "ignoring non-positive proximity radius");
                DEFAULT_PROXIMITY_RADIUS_M
            }
            None => DEFAULT_PROXIMITY_RADIUS_M,
        };
        Self {
            proximity_radius_m,
            points_per_question: value
                .points_per_question
                .unwrap_or(DEFAULT_POINTS_PER_QUESTION),
        }
    }
}

/// Pick the configuration path, preferring the environment override.
fn resolve_config_path() -> PathBuf {
    match env::var_os(CONFIG_PATH_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => PathBuf::from(DEFAULT_CONFIG_PATH),
    }
}
