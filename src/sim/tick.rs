//! Per-frame simulation tick
//!
//! Advances the game one display refresh: intents, difficulty, spawning,
//! paddle easing, orb motion and collision resolution, particle aging.

use super::particles::{emit_burst, update_particles};
use super::spawn::{difficulty_at, should_spawn, spawn_orb};
use super::state::{AudioCue, GameEvent, GamePhase, GameState, Palette, Rgb};
use crate::consts::*;

/// Input side channel for a single tick
///
/// Written by input listeners between frames, read once at the top of the next tick.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Latest pointer x in field coordinates (persists across ticks)
    pub pointer_x: Option<f32>,
    /// Flip the paddle mode (click/tap/space)
    pub toggle: bool,
    /// Start or retry a session
    pub start: bool,
    /// Replacement theme from the theme generator
    pub palette: Option<Palette>,
}

impl TickInput {
    /// Clear one-shot intents after a tick consumed them
    pub fn clear_one_shots(&mut self) {
        self.toggle = false;
        self.start = false;
        self.palette = None;
    }
}

/// How a single orb left (or didn't leave) the field this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbOutcome {
    /// Still falling
    Falling,
    /// Same-mode catch
    Hit,
    /// Other-mode contact; ends the session
    Crash,
    /// Fell past the bottom edge
    Miss,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.start {
        state.start();
    }
    if let Some(palette) = input.palette {
        state.apply_palette(palette);
    }
    if input.toggle {
        state.toggle_mode();
    }

    match state.phase {
        GamePhase::Playing => {
            state.frame_counter += 1;

            if state.frame_counter % DIFFICULTY_INTERVAL == 0 {
                state.difficulty = difficulty_at(state.frame_counter);
                log::debug!(
                    "Difficulty {:.1} at tick {}",
                    state.difficulty,
                    state.frame_counter
                );
            }

            if should_spawn(state.frame_counter, state.difficulty) {
                let orb = spawn_orb(
                    &mut state.rng,
                    state.field.x,
                    state.difficulty,
                    &state.palette,
                );
                state.orbs.push(orb);
            }

            track_pointer(state, input);
            update_orbs(state);
        }
        // Menu and game over: the paddle still follows the pointer
        GamePhase::Menu | GamePhase::GameOver => track_pointer(state, input),
    }

    update_particles(&mut state.particles);
}

fn track_pointer(state: &mut GameState, input: &TickInput) {
    if let Some(pointer_x) = input.pointer_x {
        state.player.track(pointer_x, state.field.x);
    }
}

/// Move every orb and resolve its collision outcome
///
/// Orbs are evaluated newest first. A crash stops evaluation immediately:
/// orbs not yet reached neither move nor score this tick.
pub fn update_orbs(state: &mut GameState) {
    let mut i = state.orbs.len();
    while i > 0 {
        i -= 1;
        if resolve_orb(state, i) == OrbOutcome::Crash {
            return;
        }
    }
}

/// Advance orb `index` and apply its outcome. Removal keeps the spawn order
/// of the remaining orbs.
fn resolve_orb(state: &mut GameState, index: usize) -> OrbOutcome {
    let orb = &mut state.orbs[index];
    orb.advance();

    if state.player.overlaps(orb) {
        if orb.mode == state.player.mode {
            let orb = state.orbs.remove(index);
            let points = state.hit_points();
            emit_burst(
                &mut state.rng,
                &mut state.particles,
                orb.pos,
                orb.color,
                HIT_BURST,
                state.max_particles,
            );
            state.events.push(GameEvent::Cue(AudioCue::Catch {
                combo: state.combo + 1,
            }));
            state.report_hit(points);
            OrbOutcome::Hit
        } else {
            emit_burst(
                &mut state.rng,
                &mut state.particles,
                state.player.top_center(),
                Rgb::WHITE,
                CRASH_BURST,
                state.max_particles,
            );
            state.events.push(GameEvent::Cue(AudioCue::Crash));
            state.report_crash();
            OrbOutcome::Crash
        }
    } else if orb.pos.y > state.field.y {
        let orb = state.orbs.remove(index);
        // Other-mode orbs falling past are harmless
        if orb.mode == state.player.mode {
            state.report_miss();
        }
        OrbOutcome::Miss
    } else {
        OrbOutcome::Falling
    }
}
