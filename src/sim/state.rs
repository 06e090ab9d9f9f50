//! Game state and core simulation types
//!
//! Entities are plain data; the session state machine lives on [`GameState`].

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::particles::emit_burst;
use crate::consts::*;

/// Color category shared by the paddle and the orbs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Cyan,
    Magenta,
}

impl Mode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            Mode::Cyan => Mode::Magenta,
            Mode::Magenta => Mode::Cyan,
        }
    }
}

/// Error for color strings that are not `#rgb` / `#rrggbb`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color {0:?}")]
pub struct ParseColorError(pub String);

/// 24-bit sRGB color, serialized as a `#rrggbb` string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ParseColorError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(bad)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }
        let channel = |i: usize, len: usize| u8::from_str_radix(&hex[i..i + len], 16);
        match hex.len() {
            6 => Ok(Rgb::new(
                channel(0, 2).map_err(|_| bad())?,
                channel(2, 2).map_err(|_| bad())?,
                channel(4, 2).map_err(|_| bad())?,
            )),
            3 => {
                // #abc expands to #aabbcc
                let short = |i: usize| channel(i, 1).map(|v| v * 17).map_err(|_| bad());
                Ok(Rgb::new(short(0)?, short(1)?, short(2)?))
            }
            _ => Err(bad()),
        }
    }
}

impl TryFrom<String> for Rgb {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

/// Active 3-color theme: two accents plus a near-black background
///
/// Field names match the JSON the theme generator returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub cyan: Rgb,
    pub magenta: Rgb,
    pub bg: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            cyan: Rgb::new(0x00, 0xff, 0xff),
            magenta: Rgb::new(0xff, 0x00, 0xff),
            bg: Rgb::new(0x05, 0x05, 0x05),
        }
    }
}

impl Palette {
    /// Accent color for a mode
    pub fn color_for(&self, mode: Mode) -> Rgb {
        match mode {
            Mode::Cyan => self.cyan,
            Mode::Magenta => self.magenta,
        }
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
    pub mode: Mode,
    pub color: Rgb,
    /// Desired left edge (from the pointer, clamped to the field)
    pub target_x: f32,
}

impl Player {
    /// Paddle centered horizontally, resting on its baseline, in the default mode
    pub fn centered(field: Vec2, palette: &Palette) -> Self {
        let x = field.x / 2.0 - PLAYER_WIDTH / 2.0;
        Self {
            pos: Vec2::new(x, field.y - PLAYER_BASELINE),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            mode: Mode::default(),
            color: palette.color_for(Mode::default()),
            target_x: x,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn top_center(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y)
    }

    /// Ease toward the pointer: center the paddle under it, clamp to the field,
    /// then cover PLAYER_LERP of the remaining distance
    pub fn track(&mut self, pointer_x: f32, field_width: f32) {
        let max_x = (field_width - self.size.x).max(0.0);
        self.target_x = (pointer_x - self.size.x / 2.0).clamp(0.0, max_x);
        self.pos.x += (self.target_x - self.pos.x) * PLAYER_LERP;
    }

    /// Cheap overlap test: orb center must lie strictly inside the paddle's
    /// horizontal span, and the orb's vertical extent must cross the paddle
    pub fn overlaps(&self, orb: &Orb) -> bool {
        orb.pos.x > self.pos.x
            && orb.pos.x < self.pos.x + self.size.x
            && orb.pos.y + orb.radius > self.pos.y
            && orb.pos.y - orb.radius < self.pos.y + self.size.y
    }
}

/// A falling orb
#[derive(Debug, Clone, PartialEq)]
pub struct Orb {
    pub pos: Vec2,
    pub mode: Mode,
    /// Assigned at spawn; later palette changes don't recolor it
    pub color: Rgb,
    pub radius: f32,
    /// Pixels per tick
    pub speed: f32,
    /// Wobble phase (radians)
    pub wobble: f32,
}

impl Orb {
    /// Fall one tick and drift sideways along the wobble
    pub fn advance(&mut self) {
        self.pos.y += self.speed;
        self.wobble += WOBBLE_STEP;
        self.pos.x += self.wobble.sin() * WOBBLE_AMPLITUDE;
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Rgb,
    pub size: f32,
    /// 0-1, decreases by `decay` every tick; also the draw alpha
    pub life: f32,
    pub decay: f32,
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen; paddle follows the pointer, nothing spawns
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended on a mismatch; only `start` leaves this phase
    GameOver,
}

/// Fire-and-forget sound requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// Paddle changed mode
    Switch,
    /// Same-mode orb caught; `combo` is the streak after the catch
    Catch { combo: u32 },
    /// Paddle touched an orb of the other mode
    Crash,
    /// A live streak was broken by a missed same-mode orb
    Reset,
}

/// Outward notifications produced by a tick, drained by the frame driver
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    ScoreUpdate { score: u64, combo: u32 },
    GameOver { score: u64, max_combo: u32 },
    Cue(AudioCue),
    PhaseChanged(GamePhase),
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Spawn and particle randomness
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub player: Player,
    /// In spawn order, oldest first
    pub orbs: Vec<Orb>,
    /// Visual only
    pub particles: Vec<Particle>,
    pub score: u64,
    pub combo: u32,
    pub max_combo: u32,
    /// Spawn-rate and fall-speed multiplier, starts at 1.0
    pub difficulty: f64,
    /// Ticks spent Playing in this session
    pub frame_counter: u64,
    pub palette: Palette,
    /// Play field width and height
    pub field: Vec2,
    /// Particle budget; bursts beyond it are dropped
    pub max_particles: usize,
    /// Pending notifications for the frame driver
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed, sitting in the menu
    pub fn new(seed: u64) -> Self {
        let field = Vec2::new(DEFAULT_FIELD_WIDTH, DEFAULT_FIELD_HEIGHT);
        let palette = Palette::default();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            player: Player::centered(field, &palette),
            orbs: Vec::new(),
            particles: Vec::new(),
            score: 0,
            combo: 0,
            max_combo: 0,
            difficulty: 1.0,
            frame_counter: 0,
            palette,
            field,
            max_particles: usize::MAX,
            events: Vec::new(),
        }
    }

    /// Adapt to a new field size; the paddle stays on its baseline
    pub fn resize(&mut self, width: f32, height: f32) {
        self.field = Vec2::new(width, height);
        self.player.pos.y = height - PLAYER_BASELINE;
        let max_x = (width - self.player.size.x).max(0.0);
        self.player.pos.x = self.player.pos.x.clamp(0.0, max_x);
    }

    /// Points a same-mode catch would award right now
    pub fn hit_points(&self) -> u64 {
        HIT_BASE_POINTS + COMBO_BONUS * u64::from(self.combo)
    }

    /// Begin a fresh session. Valid from Menu or GameOver; returns false when ignored.
    pub fn start(&mut self) -> bool {
        if self.phase == GamePhase::Playing {
            log::debug!("start ignored: session already running");
            return false;
        }

        self.score = 0;
        self.combo = 0;
        self.max_combo = 0;
        self.difficulty = 1.0;
        self.frame_counter = 0;
        self.orbs.clear();
        self.particles.clear();
        self.player = Player::centered(self.field, &self.palette);
        self.set_phase(GamePhase::Playing);
        self.events.push(GameEvent::ScoreUpdate { score: 0, combo: 0 });

        log::info!("Session started (seed {})", self.seed);
        true
    }

    /// Credit a same-mode catch worth `points`
    pub fn report_hit(&mut self, points: u64) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.score += points;
        self.combo += 1;
        self.max_combo = self.max_combo.max(self.combo);
        self.events.push(GameEvent::ScoreUpdate {
            score: self.score,
            combo: self.combo,
        });
    }

    /// A same-mode orb slipped past the paddle
    pub fn report_miss(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        if self.combo > 0 {
            self.events.push(GameEvent::Cue(AudioCue::Reset));
        }
        self.combo = 0;
        self.events.push(GameEvent::ScoreUpdate {
            score: self.score,
            combo: self.combo,
        });
    }

    /// Mismatch collision: end the run and hand off the final tally
    pub fn report_crash(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.set_phase(GamePhase::GameOver);
        self.events.push(GameEvent::GameOver {
            score: self.score,
            max_combo: self.max_combo,
        });
        log::info!(
            "Game over: score {} max combo {} after {} ticks",
            self.score,
            self.max_combo,
            self.frame_counter
        );
    }

    /// Flip the paddle's mode. Only while Playing; returns false when ignored.
    pub fn toggle_mode(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        let player = &mut self.player;
        player.mode = player.mode.toggled();
        player.color = self.palette.color_for(player.mode);
        let (center, color) = (player.center(), player.color);

        self.events.push(GameEvent::Cue(AudioCue::Switch));
        emit_burst(
            &mut self.rng,
            &mut self.particles,
            center,
            color,
            SWITCH_BURST,
            self.max_particles,
        );
        true
    }

    /// Swap the theme. Orbs already in flight keep their colors; outside a
    /// session the paddle preview picks up the new accent.
    pub fn apply_palette(&mut self, palette: Palette) {
        self.palette = palette;
        if self.phase != GamePhase::Playing {
            self.player.color = palette.color_for(self.player.mode);
        }
        log::info!(
            "Palette applied: {} / {} on {}",
            palette.cyan,
            palette.magenta,
            palette.bg
        );
    }

    /// Take all pending events in emission order
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn set_phase(&mut self, phase: GamePhase) {
        self.phase = phase;
        self.events.push(GameEvent::PhaseChanged(phase));
    }
}
