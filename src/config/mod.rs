use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::session::{normalize_stake_unit, parse_leading_int, placeholder_name, PLAYER_COUNT};

pub const CONFIG_FILE: &str = "tracker.toml";
pub const APP_DIR: &str = "mataan";

fn config_paths(filename: &str) -> Vec<PathBuf> {
	let mut paths = Vec::new();

	if let Some(config_dir) = dirs::config_dir() {
		paths.push(config_dir.join(APP_DIR).join(filename));
	}

	paths.push(PathBuf::from("config").join(filename));

	paths
}

fn find_config(filename: &str) -> Option<PathBuf> {
	config_paths(filename).into_iter().find(|p| p.exists())
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionDefaults {
	#[serde(default = "default_stake_unit")]
	pub stake_unit: i64,
	#[serde(default)]
	pub players: Vec<String>,
}

fn default_stake_unit() -> i64 {
	1
}

impl Default for SessionDefaults {
	fn default() -> Self {
		Self {
			stake_unit: default_stake_unit(),
			players: Vec::new(),
		}
	}
}

impl SessionDefaults {
	pub fn stake_unit(&self) -> i64 {
		normalize_stake_unit(self.stake_unit)
	}

	/// The configured stake applies only when none was given. A given stake
	/// that does not parse falls back to 1, like any other invalid stake.
	pub fn resolve_stake(&self, given: Option<&str>) -> i64 {
		match given {
			Some(raw) => normalize_stake_unit(parse_leading_int(raw).unwrap_or(1)),
			None => self.stake_unit(),
		}
	}

	/// Names from the command line win, then configured names, then placeholders.
	pub fn player_names(&self, given: &[String]) -> [String; PLAYER_COUNT] {
		std::array::from_fn(|i| {
			given
				.get(i)
				.or_else(|| self.players.get(i))
				.map(|s| s.trim().to_string())
				.filter(|s| !s.is_empty())
				.unwrap_or_else(|| placeholder_name(i))
		})
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
	#[serde(default)]
	pub state_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
	#[serde(default)]
	pub enabled: bool,
	#[serde(default = "default_log_dir")]
	pub dir: PathBuf,
}

fn default_log_dir() -> PathBuf {
	PathBuf::from("logs")
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			enabled: false,
			dir: default_log_dir(),
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackerConfig {
	#[serde(default)]
	pub defaults: SessionDefaults,
	#[serde(default)]
	pub storage: StorageConfig,
	#[serde(default)]
	pub logging: LoggingConfig,
}

pub fn parse_config(content: &str) -> Result<TrackerConfig, String> {
	toml::from_str(content).map_err(|e| format!("Failed to parse tracker config: {}", e))
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<TrackerConfig, String> {
	let content = fs::read_to_string(&path)
		.map_err(|e| format!("Failed to read {}: {}", path.as_ref().display(), e))?;

	parse_config(&content)
}

/// First config found on the search path, or built-in defaults.
pub fn load_config_auto() -> Result<TrackerConfig, String> {
	match find_config(CONFIG_FILE) {
		Some(path) => load_config(&path),
		None => Ok(TrackerConfig::default()),
	}
}
