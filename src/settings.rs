//! Parser settings
//!
//! Loaded from a JSON file next to the level pack. Missing fields fall back
//! to the standard symbol set.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sim::parser::{ActorTemplate, Dictionary, LevelParser, default_dictionary};

/// Level parser configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for coin phases
    pub seed: u64,
    /// Schema symbol -> actor template (keys are single characters)
    pub dictionary: BTreeMap<String, ActorTemplate>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0,
            dictionary: default_dictionary()
                .into_iter()
                .map(|(symbol, template)| (symbol.to_string(), template))
                .collect(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.symbols()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!(
            "Loaded settings from {} ({} symbols)",
            path.display(),
            settings.dictionary.len()
        );
        Ok(settings)
    }

    /// Validated symbol dictionary
    pub fn symbols(&self) -> Result<Dictionary, ConfigError> {
        self.dictionary
            .iter()
            .map(|(key, template)| {
                let mut chars = key.chars();
                let symbol = match (chars.next(), chars.next()) {
                    (Some(c), None) => c,
                    _ => return Err(ConfigError::InvalidSymbol(key.clone())),
                };
                if LevelParser::obstacle_from_symbol(symbol).is_some() {
                    return Err(ConfigError::ReservedSymbol(symbol));
                }
                Ok((symbol, *template))
            })
            .collect()
    }
}
