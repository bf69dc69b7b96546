//! Runtime configuration
//!
//! Loaded from JSON by the binary; every field has a default so a partial
//! (or absent) settings file still works.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for the deterministic simulation RNG
    pub seed: u64,
    /// Label prefixed to every score readout
    pub score_label: String,
    /// How long the headless demo runs, in simulated seconds
    pub demo_seconds: f32,
    /// Aspect ratio for the projection matrix
    pub aspect_ratio: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 1,
            score_label: "Space Tennis".to_owned(),
            demo_seconds: 120.0,
            aspect_ratio: 1280.0 / 720.0,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
