//! Configuration from environment variables and defaults.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_PORT: u16 = 3010;
pub const DEFAULT_BIND: &str = "0.0.0.0";

/// Settings the query pipeline itself reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Run the dictionary spell-correction stage before tokenizing.
    pub spell_correction: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            spell_correction: true,
        }
    }
}

/// Top-level ContractNL configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractNlConfig {
    /// HTTP server port.
    pub port: u16,
    /// Address the HTTP listener binds to.
    pub bind: String,
    pub pipeline: PipelineConfig,
}

impl Default for ContractNlConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind: DEFAULT_BIND.into(),
            pipeline: PipelineConfig::default(),
        }
    }
}

impl ContractNlConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("CONTRACTNL_PORT").or_else(|| lookup("PORT")) {
            config.port = raw
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("invalid port: {}", raw)))?;
        }

        if let Some(bind) = lookup("CONTRACTNL_BIND") {
            let bind = bind.trim();
            if bind.is_empty() {
                return Err(Error::Config("CONTRACTNL_BIND is empty".into()));
            }
            config.bind = bind.to_string();
        }

        if let Some(raw) = lookup("CONTRACTNL_SPELL_CORRECTION") {
            config.pipeline.spell_correction = parse_flag(&raw).ok_or_else(|| {
                Error::Config(format!("invalid CONTRACTNL_SPELL_CORRECTION: {}", raw))
            })?;
        }

        Ok(config)
    }

    /// Socket address string for the HTTP listener.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ContractNlConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.bind, DEFAULT_BIND);
        assert!(config.pipeline.spell_correction);
        assert_eq!(config.listen_addr(), "0.0.0.0:3010");
    }

    #[test]
    fn test_port_precedence() {
        let config =
            ContractNlConfig::from_lookup(lookup_from(&[("PORT", "8080"), ("CONTRACTNL_PORT", "9090")]))
                .unwrap();
        assert_eq!(config.port, 9090);

        let config = ContractNlConfig::from_lookup(lookup_from(&[("PORT", "8080")])).unwrap();
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_spell_flag() {
        let config =
            ContractNlConfig::from_lookup(lookup_from(&[("CONTRACTNL_SPELL_CORRECTION", "off")]))
                .unwrap();
        assert!(!config.pipeline.spell_correction);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            ContractNlConfig::from_lookup(lookup_from(&[("CONTRACTNL_PORT", "http")])),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            ContractNlConfig::from_lookup(lookup_from(&[("CONTRACTNL_SPELL_CORRECTION", "maybe")])),
            Err(Error::Config(_))
        ));
    }
}
