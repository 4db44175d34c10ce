//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tl_core::ExpectedHours;

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the timelog file.
    pub timelog_path: PathBuf,

    /// Assumptions for expected working hours.
    #[serde(default)]
    pub expected: ExpectedHours,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("timelog_path", &self.timelog_path)
            .field("expected", &self.expected)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timelog_path: PathBuf::from("timelog.txt"),
            expected: ExpectedHours::default(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (TL_*, TL_EXPECTED__* for the table)
        figment = figment.merge(Env::prefixed("TL_").split("__"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for tl.
///
/// On Linux: `~/.config/tl`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("tl"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    #[test]
    fn test_dirs_config_path_ends_with_tl() {
        let path = dirs_config_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "tl");
    }

    #[test]
    fn test_default_config_reads_timelog_in_working_dir() {
        let config = Config::default();
        assert_eq!(config.timelog_path, PathBuf::from("timelog.txt"));
        assert_eq!(config.expected, ExpectedHours::default());
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "timelog_path = \"/var/log/work.txt\"\n\n[expected]\nworkhours_per_week = 40"
        )
        .unwrap();
        file.flush().unwrap();

        let config = Config::load_from(Some(file.path())).unwrap();
        assert_eq!(config.timelog_path, PathBuf::from("/var/log/work.txt"));
        assert_eq!(config.expected.workhours_per_week, 40);
        assert_eq!(config.expected.workdays_per_week, 5);
    }

    #[test]
    fn test_debug_lists_fields() {
        let debug = format!("{:?}", Config::default());
        assert!(debug.contains("timelog_path"));
        assert!(debug.contains("workhours_per_week: 35"));
    }
}
