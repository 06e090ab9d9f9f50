//! Neon Flux entry point
//!
//! On the web the page loads the wasm module and `wasm_main` takes over. The
//! native binary runs one seeded headless session with an autopilot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    neon_flux::platform::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use neon_flux::Settings;
    use neon_flux::audio::tones_for;
    use neon_flux::consts::{DEFAULT_FIELD_HEIGHT, DEFAULT_FIELD_WIDTH};
    use neon_flux::driver::{FrameDriver, GameHooks, MemorySurface};
    use neon_flux::sim::{AudioCue, GamePhase, GameState, TickInput};

    /// Give up after ten minutes of simulated play
    const MAX_FRAMES: u64 = 60 * 60 * 10;

    /// Logs what a browser HUD would show
    #[derive(Default)]
    struct LogHooks {
        result: Option<(u64, u32)>,
        catches: u32,
    }

    impl GameHooks for LogHooks {
        fn on_score_update(&mut self, score: u64, combo: u32) {
            log::debug!("score {} combo x{}", score, combo);
        }

        fn on_game_over(&mut self, score: u64, max_combo: u32) {
            log::info!("Game over: score {} max combo {}", score, max_combo);
            self.result = Some((score, max_combo));
        }

        fn on_cue(&mut self, cue: AudioCue) {
            if matches!(cue, AudioCue::Catch { .. }) {
                self.catches += 1;
            }
            log::trace!("cue {:?} -> {} voice(s)", cue, tones_for(cue).len());
        }

        fn on_phase_changed(&mut self, phase: GamePhase) {
            log::info!("Phase: {:?}", phase);
        }
    }

    /// Chase the lowest same-mode orb; switch modes when the lowest orb over
    /// the paddle does not match.
    fn autopilot(state: &GameState, input: &mut TickInput) {
        let player = &state.player;
        let danger = state
            .orbs
            .iter()
            .filter(|o| o.pos.x > player.pos.x && o.pos.x < player.pos.x + player.size.x)
            .filter(|o| o.pos.y < player.pos.y && o.pos.y + o.speed * 3.0 > player.pos.y - o.radius)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));
        if let Some(orb) = danger {
            if orb.mode != player.mode {
                input.toggle = true;
            }
        }

        let target = state
            .orbs
            .iter()
            .filter(|o| o.mode == player.mode && o.pos.y < player.pos.y)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));
        if let Some(orb) = target {
            input.pointer_x = Some(orb.pos.x);
        }
    }

    pub fn run(seed: u64, quality: Option<&str>) {
        let settings = Settings::load_with(quality);
        log::info!("Quality preset: {}", settings.quality);
        let mut driver = FrameDriver::new(seed, &settings);
        let mut surface =
            MemorySurface::new(DEFAULT_FIELD_WIDTH as u32, DEFAULT_FIELD_HEIGHT as u32);
        let mut hooks = LogHooks::default();

        log::info!("Headless session with seed {}", seed);
        driver.input.start = true;

        while hooks.result.is_none() && driver.frames() < MAX_FRAMES {
            if driver.state.phase == GamePhase::Playing {
                autopilot(&driver.state, &mut driver.input);
            }
            driver.frame(Some(&mut surface), &mut hooks);
            surface.take_frame();
        }

        match hooks.result {
            Some((score, max_combo)) => println!(
                "Seed {}: score {} (max combo {}, {} catches) after {} frames",
                seed,
                score,
                max_combo,
                hooks.catches,
                driver.frames()
            ),
            None => println!(
                "Seed {}: still alive after {} frames, score {}",
                seed,
                driver.frames(),
                driver.state.score
            ),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Neon Flux (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|arg| arg.parse().ok()).unwrap_or(42);
    let quality = args.next();
    headless::run(seed, quality.as_deref());
}
