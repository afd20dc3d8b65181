//! Level packs
//!
//! A pack is a JSON array of schemas, each schema an array of row strings.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Levels bundled with the crate
const BUILTIN_LEVELS: &[&[&str]] = &[
    &[
        " | v    v",
        "         ",
        "    =    ",
        "o        ",
        "         ",
        " @       ",
        "xxx!     ",
        "         ",
    ],
    &[
        "      v  ",
        "    v    ",
        "  v      ",
        "        o",
        "        x",
        "@   x    ",
        "x        ",
        "         ",
    ],
    &[
        "        |           |  ",
        "                       ",
        "                       ",
        "                       ",
        "                       ",
        "                       ",
        "                       ",
        "                       ",
        "                       ",
        "     |                 ",
        "                       ",
        "         =      |      ",
        " @ |  o            o   ",
        "xxxxxxxxx!!!!!!!xxxxxxx",
        "                       ",
    ],
];

/// Ordered list of level schemas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelPack {
    pub levels: Vec<Vec<String>>,
}

impl LevelPack {
    pub fn builtin() -> Self {
        Self {
            levels: BUILTIN_LEVELS
                .iter()
                .map(|rows| rows.iter().map(|row| row.to_string()).collect())
                .collect(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let pack = Self::from_json(&std::fs::read_to_string(path)?)?;
        log::info!("Loaded {} levels from {}", pack.len(), path.display());
        Ok(pack)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &[String]> {
        self.levels.iter().map(Vec::as_slice)
    }
}

impl Default for LevelPack {
    fn default() -> Self {
        Self::builtin()
    }
}
