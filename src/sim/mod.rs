//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per display refresh, no wall-clock time
//! - Seeded RNG only
//! - Outward effects are queued as events, never called directly
//! - No rendering or platform dependencies

pub mod particles;
pub mod spawn;
pub mod state;
pub mod tick;

pub use particles::{emit_burst, update_particles};
pub use spawn::{difficulty_at, should_spawn, spawn_interval, spawn_orb};
pub use state::{
    AudioCue, GameEvent, GamePhase, GameState, Mode, Orb, Palette, ParseColorError, Particle,
    Player, Rgb,
};
pub use tick::{OrbOutcome, TickInput, tick, update_orbs};
