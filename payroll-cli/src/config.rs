use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Default database URL when neither the flag nor the config file names one.
/// `mode=rwc` creates the file on first use.
pub const DEFAULT_DATABASE_URL: &str = "sqlite:payroll.db?mode=rwc";

/// Optional file configuration, read from `payroll.toml` in the working
/// directory (or an explicit `--config` path). A missing file is not an
/// error; a present-but-broken file is.
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct CliConfig {
    /// SQLite database URL, e.g. `sqlite:payroll.db?mode=rwc`.
    pub database: Option<String>,
}

impl CliConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.unwrap_or_else(|| Path::new("payroll.toml"));
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))
    }

    /// Resolves the database URL: explicit flag, then config file, then the
    /// default.
    pub fn database_url(&self, flag: Option<&str>) -> String {
        flag.map(str::to_string)
            .or_else(|| self.database.clone())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_database_url() {
        let config: CliConfig = toml::from_str(r#"database = "sqlite:custom.db""#).unwrap();

        assert_eq!(config.database.as_deref(), Some("sqlite:custom.db"));
    }

    #[test]
    fn empty_file_yields_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();

        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn flag_overrides_file_overrides_default() {
        let from_file = CliConfig {
            database: Some("sqlite:file.db".to_string()),
        };

        assert_eq!(
            from_file.database_url(Some("sqlite:flag.db")),
            "sqlite:flag.db"
        );
        assert_eq!(from_file.database_url(None), "sqlite:file.db");
        assert_eq!(CliConfig::default().database_url(None), DEFAULT_DATABASE_URL);
    }
}
