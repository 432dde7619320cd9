use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::{SimError, SimResult};

const DEFAULT_LOG_LEVEL: &str = "warn";
const DEFAULT_CELL_PADDING: usize = 3;
const DEFAULT_LABEL_WIDTH: usize = 15;
const DEFAULT_BANNER_WIDTH: usize = 236;

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

impl Config {
    /// Reads a TOML configuration file. Missing keys take their defaults.
    pub fn load(path: &Path) -> SimResult<Self> {
        let content =
            fs::read_to_string(path).map_err(|e| SimError::ConfigRead(path.to_path_buf(), e))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> SimResult<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct GeneralConfig {
    /// flexi_logger level specification, e.g. `"info"` or `"warn, mips_pipeline_sim=debug"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Dashes drawn on each side of a stage code.
    #[serde(default = "default_cell_padding")]
    pub cell_padding: usize,

    /// Width of the instruction column on the left of the diagram.
    #[serde(default = "default_label_width")]
    pub label_width: usize,

    /// Width of the `-` and `*` banner lines.
    #[serde(default = "default_banner_width")]
    pub banner_width: usize,
}

impl RenderConfig {
    /// Width of one stage cell, without its `|` separator.
    pub fn cell_width(&self) -> usize {
        2 * self.cell_padding + 1
    }

    /// Horizontal distance between consecutive issue slots (cell plus separator).
    pub fn base_width(&self) -> usize {
        self.cell_width() + 1
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cell_padding: DEFAULT_CELL_PADDING,
            label_width: DEFAULT_LABEL_WIDTH,
            banner_width: DEFAULT_BANNER_WIDTH,
        }
    }
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_cell_padding() -> usize {
    DEFAULT_CELL_PADDING
}

fn default_label_width() -> usize {
    DEFAULT_LABEL_WIDTH
}

fn default_banner_width() -> usize {
    DEFAULT_BANNER_WIDTH
}
