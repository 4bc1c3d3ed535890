use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    currency::{FormatOptions, LocaleConfig},
    errors::ReportError,
    utils::{write_atomic, DEFAULT_LOG_FILTER},
};

const APP_DIR: &str = "money_report";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    #[serde(default)]
    pub locale: LocaleConfig,
    #[serde(default)]
    pub format: FormatOptions,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            locale: LocaleConfig::default(),
            format: FormatOptions::default(),
            log_filter: default_log_filter(),
        }
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Uses `<user config dir>/money_report/config.json`.
    pub fn new() -> Result<Self, ReportError> {
        let base = dirs::config_dir().ok_or_else(|| {
            ReportError::Config("unable to determine the user configuration directory".into())
        })?;
        Ok(Self::with_path(base.join(APP_DIR).join(CONFIG_FILE)))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<EngineConfig, ReportError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(EngineConfig::default())
        }
    }

    pub fn save(&self, config: &EngineConfig) -> Result<(), ReportError> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::{CurrencyDisplay, NegativeStyle};

    #[test]
    fn absent_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_path(dir.path().join("config.json"));
        assert_eq!(manager.load().unwrap(), EngineConfig::default());
    }

    #[test]
    fn save_then_load_keeps_format_choices() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_path(dir.path().join("cfg").join("config.json"));
        let mut config = EngineConfig::default();
        config.format.currency_display = CurrencyDisplay::Code;
        config.format.negative_style = NegativeStyle::Parentheses;
        config.log_filter = "money_report_core=debug".into();
        manager.save(&config).unwrap();

        assert_eq!(manager.load().unwrap(), config);
    }

    #[test]
    fn partial_file_fills_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "log_filter": "warn" }"#).unwrap();
        let config = ConfigManager::with_path(&path).load().unwrap();
        assert_eq!(config.log_filter, "warn");
        assert_eq!(config.locale, LocaleConfig::default());
    }
}
