// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::infra::paths;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Overrides the default `<data_dir>/ledger.json` location.
    #[serde(default)]
    pub ledger_path: Option<PathBuf>,

    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Decimals printed for the summed hours.
    #[serde(default = "default_precision")]
    pub precision: usize,
    #[serde(default)]
    pub order: ExportOrder,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            precision: default_precision(),
            order: ExportOrder::default(),
        }
    }
}

fn default_precision() -> usize {
    2
}

/// Ordering of export rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportOrder {
    /// First-seen date, then first-seen description within the date.
    #[default]
    FirstSeen,
    /// Date ascending, then description ascending.
    Sorted,
}

impl Config {
    /// Load config from file, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = paths::config_file_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Ledger file to use: explicit override, then config, then default.
    pub fn resolve_ledger_path(&self, cli_override: Option<&Path>) -> PathBuf {
        cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.ledger_path.clone())
            .unwrap_or_else(paths::ledger_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_reasonable() {
        let c = Config::default();
        assert!(c.ledger_path.is_none());
        assert_eq!(c.export.precision, 2);
        assert_eq!(c.export.order, ExportOrder::FirstSeen);
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.export.precision, 2);
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
ledger_path = "/tmp/wbso/ledger.json"

[export]
precision = 8
order = "sorted"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.ledger_path,
            Some(PathBuf::from("/tmp/wbso/ledger.json"))
        );
        assert_eq!(config.export.precision, 8);
        assert_eq!(config.export.order, ExportOrder::Sorted);
    }

    #[test]
    fn test_partial_export_section() {
        let config: Config = toml::from_str("[export]\norder = \"first-seen\"\n").unwrap();
        assert_eq!(config.export.precision, 2);
        assert_eq!(config.export.order, ExportOrder::FirstSeen);
    }

    #[test]
    fn test_unknown_order_rejected() {
        let result: Result<Config, _> = toml::from_str("[export]\norder = \"random\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_roundtrip() {
        let config = Config {
            ledger_path: Some(PathBuf::from("ledger.json")),
            export: ExportConfig {
                precision: 4,
                order: ExportOrder::Sorted,
            },
        };
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.export.precision, 4);
        assert_eq!(deserialized.export.order, ExportOrder::Sorted);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_ledger_path_precedence() {
        let config = Config {
            ledger_path: Some(PathBuf::from("from-config.json")),
            ..Config::default()
        };
        assert_eq!(
            config.resolve_ledger_path(Some(Path::new("from-cli.json"))),
            PathBuf::from("from-cli.json")
        );
        assert_eq!(
            config.resolve_ledger_path(None),
            PathBuf::from("from-config.json")
        );
    }
}
