//! End-to-end sessions through the frame driver

use glam::Vec2;
use neon_flux::Settings;
use neon_flux::consts::ORB_RADIUS;
use neon_flux::driver::{FrameDriver, GameHooks, MemorySurface};
use neon_flux::renderer::DrawCmd;
use neon_flux::sim::{AudioCue, GamePhase, Mode, Orb, Palette, Rgb};

#[derive(Default)]
struct Recorder {
    scores: Vec<(u64, u32)>,
    game_overs: Vec<(u64, u32)>,
    cues: Vec<AudioCue>,
    phases: Vec<GamePhase>,
}

impl GameHooks for Recorder {
    fn on_score_update(&mut self, score: u64, combo: u32) {
        self.scores.push((score, combo));
    }
    fn on_game_over(&mut self, score: u64, max_combo: u32) {
        self.game_overs.push((score, max_combo));
    }
    fn on_cue(&mut self, cue: AudioCue) {
        self.cues.push(cue);
    }
    fn on_phase_changed(&mut self, phase: GamePhase) {
        self.phases.push(phase);
    }
}

struct Harness {
    driver: FrameDriver,
    surface: MemorySurface,
    hooks: Recorder,
}

impl Harness {
    fn new(seed: u64) -> Self {
        Self {
            driver: FrameDriver::new(seed, &Settings::default()),
            surface: MemorySurface::new(800, 600),
            hooks: Recorder::default(),
        }
    }

    fn started(seed: u64) -> Self {
        let mut h = Self::new(seed);
        h.driver.input.start = true;
        h.frame();
        h.hooks = Recorder::default();
        h
    }

    fn frame(&mut self) -> Vec<DrawCmd> {
        assert!(self.driver.frame(Some(&mut self.surface), &mut self.hooks));
        self.surface.take_frame()
    }

    /// Orb resting just above the paddle's top edge
    fn drop_on_paddle(&mut self, mode: Mode) {
        let state = &mut self.driver.state;
        let p = &state.player;
        let orb = Orb {
            pos: Vec2::new(p.pos.x + p.size.x / 2.0, p.pos.y - 1.0),
            mode,
            color: state.palette.color_for(mode),
            radius: ORB_RADIUS,
            speed: 2.0,
            wobble: 0.0,
        };
        state.orbs.push(orb);
    }
}

#[test]
fn test_single_catch_reports_once() {
    let mut h = Harness::started(7);
    h.drop_on_paddle(Mode::Cyan);
    h.frame();

    assert_eq!(h.hooks.scores, vec![(10, 1)]);
    assert_eq!(h.hooks.cues, vec![AudioCue::Catch { combo: 1 }]);
    assert!(h.driver.state.orbs.is_empty());
    assert_eq!(h.driver.state.particles.len(), 8);
}

#[test]
fn test_catch_chain_then_crash() {
    let mut h = Harness::started(7);
    for _ in 0..3 {
        h.drop_on_paddle(Mode::Cyan);
        h.frame();
    }
    assert_eq!(h.driver.state.score, 10 + 15 + 20);

    h.driver.input.toggle = true;
    h.frame();
    assert_eq!(h.driver.state.player.mode, Mode::Magenta);

    h.drop_on_paddle(Mode::Cyan);
    h.frame();

    assert_eq!(h.hooks.game_overs, vec![(45, 3)]);
    assert_eq!(h.hooks.phases, vec![GamePhase::GameOver]);
    assert_eq!(
        h.hooks.cues.last(),
        Some(&AudioCue::Crash),
        "crash cue follows the catches and the switch"
    );

    // Frozen afterwards: nothing else is reported
    let frozen_counter = h.driver.state.frame_counter;
    for _ in 0..120 {
        h.frame();
    }
    assert_eq!(h.hooks.game_overs.len(), 1);
    assert_eq!(h.driver.state.frame_counter, frozen_counter);
}

#[test]
fn test_orbs_hidden_after_game_over() {
    let mut h = Harness::started(3);
    h.drop_on_paddle(Mode::Magenta);
    let frame = h.frame();
    assert_eq!(h.driver.state.phase, GamePhase::GameOver);

    // The crashing orb stays in the model but is no longer drawn
    assert_eq!(h.driver.state.orbs.len(), 1);
    let orb_color = h.driver.state.palette.magenta;
    assert!(!frame.iter().any(|cmd| matches!(
        cmd,
        DrawCmd::Circle { color, radius, .. } if *color == orb_color && *radius == ORB_RADIUS
    )));
}

#[test]
fn test_retry_resets_session() {
    let mut h = Harness::started(11);
    h.drop_on_paddle(Mode::Cyan);
    h.frame();
    h.drop_on_paddle(Mode::Magenta);
    h.frame();
    assert_eq!(h.driver.state.phase, GamePhase::GameOver);

    h.driver.input.start = true;
    h.frame();

    let state = &h.driver.state;
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!((state.score, state.combo, state.max_combo), (0, 0, 0));
    assert!(state.orbs.is_empty());
    assert_eq!(state.difficulty, 1.0);
    assert_eq!(state.frame_counter, 1);
    assert_eq!(h.hooks.scores.last(), Some(&(0, 0)));
}

#[test]
fn test_pointer_moves_paddle_everywhere() {
    let mut h = Harness::new(5);
    let start_x = h.driver.state.player.pos.x;
    h.driver.input.pointer_x = Some(700.0);
    h.frame();
    let menu_x = h.driver.state.player.pos.x;
    assert!(menu_x > start_x);

    // Pointer persists across frames
    h.frame();
    assert!(h.driver.state.player.pos.x > menu_x);
}

#[test]
fn test_theme_applies_to_new_orbs_only() {
    let mut h = Harness::started(9);
    h.driver.state.player.pos.x = -1000.0;
    let old_cyan = h.driver.state.palette.cyan;

    // Counter is 1 after the start frame; the first spawn lands on 60
    for _ in 0..58 {
        h.frame();
    }
    let first = h.driver.state.orbs.len();
    assert_eq!(first, 0);

    let volcano = Palette {
        cyan: Rgb::new(0xff, 0x45, 0x00),
        magenta: Rgb::new(0xff, 0xd7, 0x00),
        bg: Rgb::new(0x1a, 0x05, 0x00),
    };
    h.driver.input.palette = Some(volcano);
    h.frame();

    let state = &h.driver.state;
    assert_eq!(state.palette, volcano);
    // Paddle keeps its color until the next toggle
    assert_eq!(state.player.color, old_cyan);
    // The orb spawned on this frame already uses the new theme
    assert_eq!(state.orbs.len(), first + 1);
    let newest = state.orbs.last().unwrap();
    assert_eq!(newest.color, volcano.color_for(newest.mode));
}

#[test]
fn test_same_seed_same_session() {
    fn play(seed: u64) -> (u64, u32, usize, u64) {
        let mut h = Harness::started(seed);
        for i in 0..1500u32 {
            h.driver.input.pointer_x = Some((i * 37 % 800) as f32);
            h.driver.input.toggle = i % 97 == 0;
            h.frame();
        }
        let s = &h.driver.state;
        (s.score, s.max_combo, s.orbs.len(), s.frame_counter)
    }
    assert_eq!(play(2024), play(2024));
}
