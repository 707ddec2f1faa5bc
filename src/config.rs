use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

pub const ORDER_BY_OPTIONS: &[&str] = &["newest", "oldest", "relevance"];
pub const SECTION_OPTIONS: &[&str] = &[
    "all",
    "world",
    "politics",
    "business",
    "technology",
    "science",
    "sport",
    "culture",
    "environment",
    "football",
];
pub const MAX_RESULTS_OPTIONS: &[&str] = &["10", "20", "30", "50"];

/// Section value meaning "do not filter by section".
pub const ALL_SECTIONS: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_api_key")]
    pub api_key: String,

    #[serde(default = "default_max_results")]
    pub max_results: String,

    #[serde(default = "default_order_by")]
    pub order_by: String,

    #[serde(default = "default_section")]
    pub section: String,
}

fn default_endpoint() -> String {
    "https://content.guardianapis.com/search".to_string()
}

fn default_api_key() -> String {
    "test".to_string()
}

fn default_max_results() -> String {
    "20".to_string()
}

fn default_order_by() -> String {
    "newest".to_string()
}

fn default_section() -> String {
    ALL_SECTIONS.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: default_api_key(),
            max_results: default_max_results(),
            order_by: default_order_by(),
            section: default_section(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("newsfeed-reader")
            .join("config.toml")
    }

    pub fn cycle_order_by(&mut self) {
        self.order_by = next_option(ORDER_BY_OPTIONS, &self.order_by);
    }

    pub fn cycle_section(&mut self) {
        self.section = next_option(SECTION_OPTIONS, &self.section);
    }

    pub fn cycle_max_results(&mut self) {
        self.max_results = next_option(MAX_RESULTS_OPTIONS, &self.max_results);
    }
}

/// Value following `current` in `options`, wrapping around. Values not in
/// the list (hand-edited config) restart at the first option.
fn next_option(options: &[&str], current: &str) -> String {
    let next = options
        .iter()
        .position(|o| o.eq_ignore_ascii_case(current))
        .map(|i| (i + 1) % options.len())
        .unwrap_or(0);
    options[next].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn saved_preferences_are_read_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.order_by = "oldest".to_string();
        config.section = "Sport".to_string();
        config.max_results = "50".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "section = \"world\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.section, "world");
        assert_eq!(config.order_by, "newest");
        assert_eq!(config.max_results, "20");
        assert_eq!(config.api_key, "test");
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "section = [").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn cycling_wraps_and_recovers_from_unknown_values() {
        let mut config = Config::default();

        config.cycle_order_by();
        assert_eq!(config.order_by, "oldest");
        config.cycle_order_by();
        config.cycle_order_by();
        assert_eq!(config.order_by, "newest");

        config.section = "Sport".to_string();
        config.cycle_section();
        assert_eq!(config.section, "culture");

        config.max_results = "7".to_string();
        config.cycle_max_results();
        assert_eq!(config.max_results, "10");
    }
}
