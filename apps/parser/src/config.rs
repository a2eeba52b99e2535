use std::str::FromStr;

use anyhow::{Context, Result};

use crate::extraction::{Dictionaries, ExtractorSettings};

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5";
pub const DEFAULT_REFINE_TIMEOUT_SECS: u64 = 20;

/// Application configuration loaded from environment variables.
/// Fails at startup if a present variable cannot be parsed.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: Option<String>,
    pub enable_llm_refinement: bool,
    pub llm_model: String,
    pub refine_timeout_secs: u64,
    pub enforce_resume_gate: bool,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            anthropic_api_key: None,
            enable_llm_refinement: false,
            llm_model: DEFAULT_MODEL.to_string(),
            refine_timeout_secs: DEFAULT_REFINE_TIMEOUT_SECS,
            enforce_resume_gate: true,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        Ok(Config {
            anthropic_api_key: lookup("ANTHROPIC_API_KEY").filter(|k| !k.trim().is_empty()),
            enable_llm_refinement: parse_or(&lookup, "ENABLE_LLM_REFINEMENT", defaults.enable_llm_refinement)?,
            llm_model: lookup("LLM_MODEL").unwrap_or(defaults.llm_model),
            refine_timeout_secs: parse_or(&lookup, "REFINE_TIMEOUT_SECS", defaults.refine_timeout_secs)?,
            enforce_resume_gate: parse_or(&lookup, "ENFORCE_RESUME_GATE", defaults.enforce_resume_gate)?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }

    /// Refinement runs only when enabled and a key is available.
    pub fn refinement_enabled(&self) -> bool {
        self.enable_llm_refinement && self.anthropic_api_key.is_some()
    }

    pub fn extractor_settings(&self) -> ExtractorSettings {
        ExtractorSettings {
            enforce_gate: self.enforce_resume_gate,
            dictionaries: Dictionaries::default(),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.llm_model, DEFAULT_MODEL);
        assert_eq!(config.refine_timeout_secs, 20);
        assert!(config.enforce_resume_gate);
        assert!(!config.refinement_enabled());
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("ANTHROPIC_API_KEY", "sk-test"),
            ("ENABLE_LLM_REFINEMENT", "true"),
            ("REFINE_TIMEOUT_SECS", "5"),
            ("ENFORCE_RESUME_GATE", "false"),
        ]))
        .unwrap();
        assert!(config.refinement_enabled());
        assert_eq!(config.refine_timeout_secs, 5);
        assert!(!config.extractor_settings().enforce_gate);
    }

    #[test]
    fn test_invalid_value_fails() {
        let err = Config::from_lookup(lookup(&[("REFINE_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(err.to_string().contains("REFINE_TIMEOUT_SECS"));
    }

    #[test]
    fn test_blank_key_ignored() {
        let config = Config::from_lookup(lookup(&[
            ("ANTHROPIC_API_KEY", "  "),
            ("ENABLE_LLM_REFINEMENT", "true"),
        ]))
        .unwrap();
        assert!(!config.refinement_enabled());
    }
}
