//! Demo settings
//!
//! Read from an optional JSON file next to the binary. Every field has a
//! default, so a missing, partial or malformed file never blocks startup.

use serde::{Deserialize, Serialize};

/// Tunables for the demo binary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base RNG seed; `None` takes the system clock at startup
    pub seed: Option<u64>,
    /// Level the run starts on, clamped into 1..=12
    pub start_level: u32,
    /// Stop after this many frames; `None` runs until the game is quit
    pub max_frames: Option<u64>,
    /// Sleep each frame out to the 60 Hz cadence; off runs flat out
    pub paced: bool,
    /// Diagnostic log path; `None` disables the file sink
    pub diag_log: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            start_level: 1,
            max_frames: None,
            paced: true,
            diag_log: Some("prisms.log".into()),
        }
    }
}

impl Settings {
    /// Conventional settings file name
    pub const FILE: &'static str = "prisms.json";

    /// Load from `path`, falling back to defaults on any problem
    pub fn load(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(settings) => {
                    log::info!("settings loaded from {path}");
                    settings
                }
                Err(err) => {
                    log::warn!("settings file {path} is malformed ({err}); using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no settings file at {path}; using defaults");
                Self::default()
            }
        }
    }
}
