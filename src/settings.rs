//! Player preferences
//!
//! Stored as JSON in LocalStorage on the web; natively every run starts from
//! defaults (optionally with a quality preset from the command line).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Rendering budget: particle cap and glow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown quality preset {0:?} (expected low, medium or high)")]
pub struct UnknownPreset(pub String);

impl QualityPreset {
    /// Next preset in Low -> Medium -> High -> Low order
    pub fn cycled(self) -> Self {
        match self {
            QualityPreset::Low => QualityPreset::Medium,
            QualityPreset::Medium => QualityPreset::High,
            QualityPreset::High => QualityPreset::Low,
        }
    }

    /// Live particle budget
    pub fn max_particles(self) -> usize {
        match self {
            QualityPreset::Low => 150,
            QualityPreset::Medium => 600,
            QualityPreset::High => 2000,
        }
    }

    /// Shadow glow on the paddle and orbs
    pub fn glow_enabled(self) -> bool {
        self != QualityPreset::Low
    }
}

impl fmt::Display for QualityPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        })
    }
}

impl FromStr for QualityPreset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(QualityPreset::Low),
            "medium" | "med" => Ok(QualityPreset::Medium),
            "high" => Ok(QualityPreset::High),
            _ => Err(UnknownPreset(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub quality: QualityPreset,

    /// Translucent background wash instead of a hard clear
    pub trails: bool,
    /// Catch, crash, and switch bursts
    pub particles: bool,

    /// 0.0 - 1.0
    pub master_volume: f32,
    /// 0.0 - 1.0, scaled by master
    pub sfx_volume: f32,
    pub muted: bool,
    /// Speak the post-game commentary aloud
    pub voice_commentary: bool,

    /// Forces trails off
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            trails: true,
            particles: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            voice_commentary: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    const STORAGE_KEY: &'static str = "neon_flux_settings";

    /// Switch preset. Low also drops the trail wash; other presets bring it back.
    pub fn set_quality(&mut self, preset: QualityPreset) {
        self.quality = preset;
        self.trails = preset != QualityPreset::Low;
    }

    pub fn effective_trails(&self) -> bool {
        self.trails && !self.reduced_motion
    }

    /// Particle cap; zero when particles are switched off
    pub fn max_particles(&self) -> usize {
        if self.particles {
            self.quality.max_particles()
        } else {
            0
        }
    }

    /// Gain applied to cue tones, 0 when muted
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Parse stored JSON, falling back to defaults on anything unreadable
    pub fn from_json(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_else(|e| {
            log::warn!("Ignoring stored settings: {}", e);
            Self::default()
        })
    }

    #[cfg(target_arch = "wasm32")]
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        match Self::storage().and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten()) {
            Some(json) => {
                log::info!("Loaded settings from LocalStorage");
                Self::from_json(&json)
            }
            None => Self::default(),
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let Some(storage) = Self::storage() else {
            return;
        };
        match serde_json::to_string(self) {
            Ok(json) => {
                if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                    log::warn!("Settings not saved (storage full or blocked)");
                }
            }
            Err(e) => log::warn!("Settings not saved: {}", e),
        }
    }

    /// Defaults, with the preset named by `quality` when it parses
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_with(quality: Option<&str>) -> Self {
        let mut settings = Self::default();
        if let Some(name) = quality {
            match name.parse() {
                Ok(preset) => settings.set_quality(preset),
                Err(e) => log::warn!("{}; using {}", e, settings.quality),
            }
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_names() {
        assert_eq!("HIGH".parse(), Ok(QualityPreset::High));
        assert_eq!(" med ".parse(), Ok(QualityPreset::Medium));
        assert_eq!(
            "ultra".parse::<QualityPreset>(),
            Err(UnknownPreset("ultra".into()))
        );
        assert_eq!(QualityPreset::Low.to_string(), "Low");
    }

    #[test]
    fn test_preset_cycle_visits_all() {
        let mut preset = QualityPreset::Low;
        let mut seen = vec![];
        for _ in 0..3 {
            seen.push(preset);
            preset = preset.cycled();
        }
        assert_eq!(preset, QualityPreset::Low);
        assert_eq!(
            seen,
            vec![QualityPreset::Low, QualityPreset::Medium, QualityPreset::High]
        );
    }

    #[test]
    fn test_low_quality_drops_trails_and_glow() {
        let mut settings = Settings::default();
        settings.set_quality(QualityPreset::Low);
        assert!(!settings.effective_trails());
        assert_eq!(settings.max_particles(), 150);
        assert!(!settings.quality.glow_enabled());

        settings.set_quality(QualityPreset::High);
        assert!(settings.effective_trails());
        assert_eq!(settings.max_particles(), 2000);
    }

    #[test]
    fn test_reduced_motion_wins() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!settings.effective_trails());
    }

    #[test]
    fn test_particles_off_means_zero_cap() {
        let settings = Settings {
            particles: false,
            ..Default::default()
        };
        assert_eq!(settings.max_particles(), 0);
    }

    #[test]
    fn test_volume_and_mute() {
        let mut settings = Settings::default();
        assert!((settings.effective_sfx_volume() - 0.8).abs() < 1e-6);
        settings.muted = true;
        assert_eq!(settings.effective_sfx_volume(), 0.0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "quality": "High", "muted": true }"#);
        assert_eq!(settings.quality, QualityPreset::High);
        assert!(settings.muted);
        assert!(settings.trails);

        assert_eq!(Settings::from_json("not json"), Settings::default());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_load_with_quality_name() {
        assert_eq!(Settings::load_with(Some("low")).quality, QualityPreset::Low);
        assert!(!Settings::load_with(Some("low")).trails);
        assert_eq!(Settings::load_with(Some("bogus")), Settings::default());
        assert_eq!(Settings::load_with(None), Settings::default());
    }
}
