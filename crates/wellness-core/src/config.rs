//! Runtime configuration.
//!
//! Precedence: environment (`WELLNESS__*`) > config file (`WELLNESS_CONFIG`, default
//! `config/wellness`, optional) > built-in defaults.

use crate::emotional_map::DEFAULT_TAG_CAP;
use crate::recurrence::DEFAULT_RECURRENCE_THRESHOLD;
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_LLM_API_BASE: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_LLM_MODEL: &str = "openai/gpt-4o-mini";
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WellnessConfig {
    /// Matching turns before a topic's action plan is shown.
    pub recurrence_threshold: u32,
    /// Maximum tags on the emotional map.
    pub tag_cap: usize,
    /// Directory for the turn log, profile, phrases, exercise log and history.
    pub storage_path: PathBuf,
    /// When false the fallback reply is always used.
    pub llm_enabled: bool,
    pub llm_model: String,
    pub llm_api_base: String,
    pub llm_timeout_secs: u64,
}

impl Default for WellnessConfig {
    fn default() -> Self {
        Self {
            recurrence_threshold: DEFAULT_RECURRENCE_THRESHOLD,
            tag_cap: DEFAULT_TAG_CAP,
            storage_path: PathBuf::from("./data"),
            llm_enabled: true,
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            llm_api_base: DEFAULT_LLM_API_BASE.to_string(),
            llm_timeout_secs: DEFAULT_LLM_TIMEOUT_SECS,
        }
    }
}

impl WellnessConfig {
    /// Load config from `WELLNESS_CONFIG` (or `config/wellness`) and the environment.
    pub fn load() -> Result<Self, config::ConfigError> {
        let path =
            std::env::var("WELLNESS_CONFIG").unwrap_or_else(|_| "config/wellness".to_string());
        Self::load_from(&path)
    }

    /// Load from an explicit file path (extension optional). A missing file is not an error.
    pub fn load_from(path: &str) -> Result<Self, config::ConfigError> {
        let built = config::Config::builder()
            .set_default("recurrence_threshold", i64::from(DEFAULT_RECURRENCE_THRESHOLD))?
            .set_default("tag_cap", DEFAULT_TAG_CAP as i64)?
            .set_default("storage_path", "./data")?
            .set_default("llm_enabled", true)?
            .set_default("llm_model", DEFAULT_LLM_MODEL)?
            .set_default("llm_api_base", DEFAULT_LLM_API_BASE)?
            .set_default("llm_timeout_secs", DEFAULT_LLM_TIMEOUT_SECS as i64)?
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("WELLNESS").separator("__"))
            .build()?;

        built.try_deserialize()
    }
}

/// API key for the generator: `WELLNESS_LLM_API_KEY`, then `OPENROUTER_API_KEY`.
/// Blank values count as absent.
pub fn api_key_from_env() -> Option<String> {
    ["WELLNESS_LLM_API_KEY", "OPENROUTER_API_KEY"]
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let cfg = WellnessConfig::load_from(missing.to_str().unwrap()).unwrap();
        assert_eq!(cfg, WellnessConfig::default());
        assert_eq!(cfg.recurrence_threshold, 2);
        assert_eq!(cfg.tag_cap, 4);
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wellness.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "recurrence_threshold = 3").unwrap();
        writeln!(f, "llm_enabled = false").unwrap();
        writeln!(f, "storage_path = \"/tmp/wellness\"").unwrap();
        drop(f);

        let cfg = WellnessConfig::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.recurrence_threshold, 3);
        assert!(!cfg.llm_enabled);
        assert_eq!(cfg.storage_path, PathBuf::from("/tmp/wellness"));
        assert_eq!(cfg.tag_cap, 4);
        assert_eq!(cfg.llm_model, DEFAULT_LLM_MODEL);
    }
}
