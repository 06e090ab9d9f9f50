//! Neon Flux - A color-matching reflex arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, collisions, scoring)
//! - `renderer`: Scene building and 2D canvas playback
//! - `driver`: Per-refresh frame driver and loop control
//! - `audio`: Cue voices and Web Audio playback
//! - `services`: Remote commentary, speech, and theme generation
//! - `settings`: Persisted player preferences

pub mod audio;
pub mod driver;
pub mod error;
#[cfg(target_arch = "wasm32")]
pub mod platform;
pub mod renderer;
pub mod services;
pub mod settings;
pub mod sim;

pub use error::{Result, ServiceError};
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Default play field size before a surface reports its real size
    pub const DEFAULT_FIELD_WIDTH: f32 = 800.0;
    pub const DEFAULT_FIELD_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PLAYER_WIDTH: f32 = 100.0;
    pub const PLAYER_HEIGHT: f32 = 15.0;
    /// Paddle top edge sits this far above the bottom of the field
    pub const PLAYER_BASELINE: f32 = 50.0;
    /// Fraction of the remaining distance covered per tick when tracking the pointer
    pub const PLAYER_LERP: f32 = 0.2;

    /// Orb defaults
    pub const ORB_RADIUS: f32 = 10.0;
    /// Horizontal inset on both sides of the field for new orbs
    pub const SPAWN_MARGIN: f32 = 20.0;
    /// Orbs appear just above the visible top edge
    pub const SPAWN_Y: f32 = -20.0;
    /// Base fall speed (pixels/tick) before the random bonus and difficulty scaling
    pub const ORB_BASE_SPEED: f32 = 3.0;
    pub const ORB_SPEED_JITTER: f32 = 2.0;
    /// Wobble phase advance per tick (radians)
    pub const WOBBLE_STEP: f32 = 0.05;
    /// Lateral drift per tick at the wobble peak (pixels)
    pub const WOBBLE_AMPLITUDE: f32 = 0.5;

    /// Spawn cadence at difficulty 1.0 (ticks between orbs)
    pub const BASE_SPAWN_INTERVAL: f64 = 60.0;
    /// Ticks between difficulty step-ups
    pub const DIFFICULTY_INTERVAL: u64 = 600;
    pub const DIFFICULTY_STEP: f64 = 0.1;

    /// Hit award is HIT_BASE_POINTS + COMBO_BONUS * combo-before-hit
    pub const HIT_BASE_POINTS: u64 = 10;
    pub const COMBO_BONUS: u64 = 5;

    /// Particle burst sizes
    pub const HIT_BURST: usize = 8;
    pub const CRASH_BURST: usize = 50;
    pub const SWITCH_BURST: usize = 10;

    /// Motion trail: alpha of the background wash painted every frame (0x50 / 0xFF)
    pub const TRAIL_ALPHA: f32 = 80.0 / 255.0;
    /// Glow radius for the paddle and orbs
    pub const PLAYER_GLOW: f32 = 20.0;
    pub const ORB_GLOW: f32 = 15.0;
}
