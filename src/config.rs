//! Autoplay settings, read from TOML.
//!
//! Every table and field is optional:
//!
//! ```toml
//! width = 10
//! height = 20
//!
//! [weights]
//! holes = 2.5
//!
//! [search]
//! parallel = true
//! ```

use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use brain_eval::EvalWeights;
use brain_search::SearchConfig;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoplayConfig {
    pub width: usize,
    pub height: usize,
    /// Stop once the stack is this close to the ceiling.
    pub top_margin: usize,
    pub weights: EvalWeights,
    pub search: SearchConfig,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 20,
            top_margin: 4,
            weights: EvalWeights::default(),
            search: SearchConfig::default(),
        }
    }
}

impl AutoplayConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).context("invalid autoplay config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("loading {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.width >= 4, "board width {} is narrower than a stick", self.width);
        ensure!(
            self.height > self.top_margin,
            "board height {} leaves no room under a top margin of {}",
            self.height,
            self.top_margin
        );
        Ok(())
    }

    /// Highest stack the game continues from.
    pub fn height_limit(&self) -> usize {
        self.height - self.top_margin
    }
}
