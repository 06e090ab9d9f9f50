//! Frame driver
//!
//! One call to [`FrameDriver::frame`] per display refresh: adapt the surface
//! size, wash the previous frame, tick the simulation, dispatch its events,
//! and draw the entities. [`LoopControl`] keeps the self-rescheduling loop
//! single-instance and its cancellation idempotent.

use crate::renderer::{DrawCmd, SceneOptions, background, entities};
use crate::settings::Settings;
use crate::sim::{AudioCue, GameEvent, GamePhase, GameState, TickInput, tick};

/// A drawing surface the driver can size and paint
pub trait Surface {
    /// Size the surface is displayed at (layout size)
    fn display_size(&self) -> (u32, u32);
    /// Size of the drawing buffer
    fn backing_size(&self) -> (u32, u32);
    fn set_backing_size(&mut self, width: u32, height: u32);
    fn draw(&mut self, commands: &[DrawCmd]);
}

/// Outward collaborators fed from simulation events
///
/// Every method defaults to a no-op so consumers implement only what they show.
pub trait GameHooks {
    /// After every hit, every combo-breaking miss, and once with (0, 0) on start
    fn on_score_update(&mut self, _score: u64, _combo: u32) {}
    /// Exactly once per Playing -> GameOver transition
    fn on_game_over(&mut self, _score: u64, _max_combo: u32) {}
    /// Fire-and-forget sound request
    fn on_cue(&mut self, _cue: AudioCue) {}
    fn on_phase_changed(&mut self, _phase: GamePhase) {}
}

/// Combo above which the HUD badge switches to its hot style
pub const HOT_COMBO: u32 = 10;

/// HUD combo badge for the current combo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboBadge {
    pub label: String,
    pub hot: bool,
}

/// Badge to show, `None` while the combo is 1 or less
pub fn combo_badge(combo: u32) -> Option<ComboBadge> {
    (combo > 1).then(|| ComboBadge {
        label: format!("COMBO x{}", combo),
        hot: combo > HOT_COMBO,
    })
}

/// Hooks that ignore everything
#[derive(Debug, Default)]
pub struct NoHooks;

impl GameHooks for NoHooks {}

/// Owns the simulation and the input side channel
#[derive(Debug)]
pub struct FrameDriver {
    pub state: GameState,
    /// Written by input listeners, consumed at the top of each tick
    pub input: TickInput,
    options: SceneOptions,
    frames: u64,
}

impl FrameDriver {
    pub fn new(seed: u64, settings: &Settings) -> Self {
        let mut driver = Self {
            state: GameState::new(seed),
            input: TickInput::default(),
            options: SceneOptions::default(),
            frames: 0,
        };
        driver.apply_settings(settings);
        driver
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.options = SceneOptions {
            trails: settings.effective_trails(),
            glow: settings.quality.glow_enabled(),
        };
        self.state.max_particles = settings.max_particles();
    }

    /// Frames driven so far (including idle menu frames)
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one frame. Without a mounted surface (or before layout gives it a
    /// size) the frame is skipped and false is returned.
    pub fn frame<S, H>(&mut self, surface: Option<&mut S>, hooks: &mut H) -> bool
    where
        S: Surface + ?Sized,
        H: GameHooks + ?Sized,
    {
        let Some(surface) = surface else {
            return false;
        };
        let (width, height) = surface.display_size();
        if width == 0 || height == 0 {
            return false;
        }

        // Resize detection
        if surface.backing_size() != (width, height) {
            surface.set_backing_size(width, height);
        }
        if self.state.field.x != width as f32 || self.state.field.y != height as f32 {
            log::debug!("Field resized to {}x{}", width, height);
            self.state.resize(width as f32, height as f32);
        }

        surface.draw(&[background(&self.state, &self.options)]);

        let input = self.input.clone();
        self.input.clear_one_shots();
        tick(&mut self.state, &input);
        self.frames += 1;

        for event in self.state.drain_events() {
            dispatch(event, hooks);
        }

        surface.draw(&entities(&self.state, &self.options));
        true
    }
}

fn dispatch<H: GameHooks + ?Sized>(event: GameEvent, hooks: &mut H) {
    match event {
        GameEvent::ScoreUpdate { score, combo } => hooks.on_score_update(score, combo),
        GameEvent::GameOver { score, max_combo } => hooks.on_game_over(score, max_combo),
        GameEvent::Cue(cue) => hooks.on_cue(cue),
        GameEvent::PhaseChanged(phase) => hooks.on_phase_changed(phase),
    }
}

/// Lifecycle of the self-rescheduling frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Idle,
    /// Running, with the handle of the next scheduled callback if any
    Running { pending: Option<i32> },
    Stopped,
}

/// Bookkeeping for a request/cancel style frame loop (requestAnimationFrame)
#[derive(Debug, Default)]
pub struct LoopControl {
    state: LoopState,
}

impl LoopControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running { .. })
    }

    /// Claim the loop. Returns false if an instance is already running.
    pub fn begin(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.state = LoopState::Running { pending: None };
        true
    }

    /// Record the handle of the next scheduled callback
    pub fn scheduled(&mut self, handle: i32) {
        if let LoopState::Running { pending } = &mut self.state {
            *pending = Some(handle);
        }
    }

    /// The scheduled callback has started running
    pub fn fired(&mut self) {
        if let LoopState::Running { pending } = &mut self.state {
            *pending = None;
        }
    }

    /// Stop the loop. Returns the pending handle to cancel, exactly once.
    pub fn stop(&mut self) -> Option<i32> {
        match self.state {
            LoopState::Running { pending } => {
                self.state = LoopState::Stopped;
                pending
            }
            LoopState::Idle | LoopState::Stopped => None,
        }
    }
}

/// In-memory surface: records the commands of the last frame
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    pub display: (u32, u32),
    pub backing: (u32, u32),
    /// Commands drawn since the last `take_frame`
    pub commands: Vec<DrawCmd>,
    pub resizes: u32,
}

impl MemorySurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            display: (width, height),
            ..Default::default()
        }
    }

    pub fn take_frame(&mut self) -> Vec<DrawCmd> {
        std::mem::take(&mut self.commands)
    }
}

impl Surface for MemorySurface {
    fn display_size(&self) -> (u32, u32) {
        self.display
    }

    fn backing_size(&self) -> (u32, u32) {
        self.backing
    }

    fn set_backing_size(&mut self, width: u32, height: u32) {
        self.backing = (width, height);
        self.resizes += 1;
    }

    fn draw(&mut self, commands: &[DrawCmd]) {
        self.commands.extend_from_slice(commands);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_no_surface_skips_tick() {
        let mut driver = FrameDriver::new(1, &Settings::default());
        driver.input.start = true;
        assert!(!driver.frame(None::<&mut MemorySurface>, &mut NoHooks));
        assert_eq!(driver.state.phase, GamePhase::Menu);
        // Intent survives until a frame actually runs
        assert!(driver.input.start);
    }

    #[test]
    fn test_zero_sized_surface_skips_tick() {
        let mut driver = FrameDriver::new(1, &Settings::default());
        let mut surface = MemorySurface::new(0, 0);
        assert!(!driver.frame(Some(&mut surface), &mut NoHooks));
        assert_eq!(driver.frames(), 0);
    }

    #[test]
    fn test_resize_detection() {
        let mut driver = FrameDriver::new(1, &Settings::default());
        let mut surface = MemorySurface::new(1024, 768);

        driver.frame(Some(&mut surface), &mut NoHooks);
        driver.frame(Some(&mut surface), &mut NoHooks);
        assert_eq!(surface.resizes, 1);
        assert_eq!(driver.state.field.x, 1024.0);
        assert_eq!(driver.state.player.pos.y, 768.0 - 50.0);

        surface.display = (640, 480);
        driver.frame(Some(&mut surface), &mut NoHooks);
        assert_eq!(surface.resizes, 2);
        assert_eq!(surface.backing, (640, 480));
        assert_eq!(driver.state.field.y, 480.0);
    }

    #[test]
    fn test_frame_draws_wash_first() {
        let mut driver = FrameDriver::new(1, &Settings::default());
        let mut surface = MemorySurface::new(800, 600);
        driver.frame(Some(&mut surface), &mut NoHooks);

        let frame = surface.take_frame();
        assert!(matches!(frame[0], DrawCmd::Fill { .. }));
        assert!(matches!(frame[1], DrawCmd::Rect { .. }));
    }

    #[test]
    fn test_start_dispatches_hud_reset() {
        let mut driver = FrameDriver::new(1, &Settings::default());
        let mut surface = MemorySurface::new(800, 600);
        let mut hooks = Recorder::default();

        driver.input.start = true;
        driver.frame(Some(&mut surface), &mut hooks);

        assert!(!driver.input.start);
        assert_eq!(hooks.phases, vec![GamePhase::Playing]);
        assert_eq!(hooks.scores, vec![(0, 0)]);
        assert!(hooks.game_overs.is_empty());
    }

    #[test]
    fn test_toggle_is_one_shot() {
        let mut driver = FrameDriver::new(1, &Settings::default());
        let mut surface = MemorySurface::new(800, 600);
        let mut hooks = Recorder::default();

        driver.input.start = true;
        driver.frame(Some(&mut surface), &mut hooks);
        driver.input.toggle = true;
        driver.frame(Some(&mut surface), &mut hooks);
        driver.frame(Some(&mut surface), &mut hooks);

        assert_eq!(hooks.cues, vec![AudioCue::Switch]);
    }

    #[test]
    fn test_settings_flow_into_state() {
        let settings = Settings {
            particles: false,
            ..Default::default()
        };
        let driver = FrameDriver::new(1, &settings);
        assert_eq!(driver.state.max_particles, 0);
    }

    #[test]
    fn test_loop_single_instance() {
        let mut control = LoopControl::new();
        assert!(control.begin());
        assert!(!control.begin());
        control.scheduled(7);
        assert_eq!(control.state(), LoopState::Running { pending: Some(7) });
    }

    #[test]
    fn test_loop_stop_idempotent() {
        let mut control = LoopControl::new();
        assert_eq!(control.stop(), None);

        control.begin();
        control.scheduled(3);
        assert_eq!(control.stop(), Some(3));
        assert_eq!(control.stop(), None);
        assert!(!control.is_running());

        // Scheduling after stop is ignored
        control.scheduled(4);
        assert_eq!(control.state(), LoopState::Stopped);

        // Restart is allowed once stopped
        assert!(control.begin());
        control.scheduled(5);
        control.fired();
        assert_eq!(control.stop(), None);
    }

    #[test]
    fn test_combo_badge_hidden_until_chain() {
        assert_eq!(combo_badge(0), None);
        assert_eq!(combo_badge(1), None);

        let badge = combo_badge(2).unwrap();
        assert_eq!(badge.label, "COMBO x2");
        assert!(!badge.hot);

        assert!(!combo_badge(HOT_COMBO).unwrap().hot);
        assert!(combo_badge(HOT_COMBO + 1).unwrap().hot);
    }
}
