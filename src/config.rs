//! Decoder configuration.
//!
//! Can be built in code or loaded from a TOML file:
//!
//! ```toml
//! control_rom = "roms/sc55_control.bin"
//! model = "sc55"
//! wave_roms = ["roms/sc55_wave_a.bin", "roms/sc55_wave_b.bin"]
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, RomError};
use crate::model::SynthModel;

/// Where to find the ROM dumps and how to interpret them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Control ROM image
    pub control_rom: PathBuf,

    /// Force a model instead of identifying the image
    #[serde(default)]
    pub model: Option<SynthModel>,

    /// Wave ROM dumps, concatenated in order to form the waveform region.
    /// When empty, sample addresses index the control ROM image itself.
    #[serde(default)]
    pub wave_roms: Vec<PathBuf>,
}

impl Config {
    /// Configuration for a single ROM image with automatic model detection
    pub fn new(control_rom: impl Into<PathBuf>) -> Self {
        Self {
            control_rom: control_rom.into(),
            ..Self::default()
        }
    }

    /// Set an explicit model
    pub fn with_model(mut self, model: SynthModel) -> Self {
        self.model = Some(model);
        self
    }

    /// Add a wave ROM dump
    pub fn with_wave_rom(mut self, path: impl Into<PathBuf>) -> Self {
        self.wave_roms.push(path.into());
        self
    }

    /// Load a TOML configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| RomError::Config {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        Self::from_toml(&content).map_err(|detail| RomError::Config {
            path: path.to_path_buf(),
            detail,
        })
    }

    fn from_toml(content: &str) -> std::result::Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }
}
