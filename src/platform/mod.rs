//! Browser platform layer
//!
//! Wires the frame driver to the page:
//! - `animation`: requestAnimationFrame loop with idempotent stop
//! - `input`: pointer, touch, keyboard, and button listeners
//! - `hud`: DOM text, overlays, and the post-game commentary task

pub mod animation;
pub mod hud;
pub mod input;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::audio::AudioManager;
use crate::driver::FrameDriver;
use crate::renderer::CanvasSurface;
use crate::services::{GeminiClient, GeminiConfig};
use crate::settings::Settings;

pub use animation::AnimationLoop;
pub use hud::DomHud;

/// Everything one page session owns
pub struct App {
    pub driver: FrameDriver,
    pub surface: Option<CanvasSurface>,
    pub hud: DomHud,
    audio: Rc<RefCell<AudioManager>>,
    settings: Settings,
}

pub type SharedApp = Rc<RefCell<App>>;

impl App {
    pub fn new(seed: u64, surface: Option<CanvasSurface>, settings: Settings) -> Self {
        let audio = Rc::new(RefCell::new(AudioManager::new()));
        audio.borrow_mut().apply_settings(&settings);
        let config = GeminiConfig::default();
        if config.api_key.is_none() {
            log::warn!("GEMINI_API_KEY not set at build time; commentary will use fallbacks");
        }
        let hud = DomHud::new(audio.clone(), GeminiClient::new(config), &settings);
        hud::apply_palette_css(&Default::default());

        Self {
            driver: FrameDriver::new(seed, &settings),
            surface,
            hud,
            audio,
            settings,
        }
    }

    /// One display refresh
    pub fn frame(&mut self) -> bool {
        let Self {
            driver,
            surface,
            hud,
            ..
        } = self;
        driver.frame(surface.as_mut(), hud)
    }

    pub fn resume_audio(&self) {
        self.audio.borrow().resume();
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn apply_settings(&mut self, settings: Settings) {
        self.driver.apply_settings(&settings);
        self.hud.apply_settings(&settings);
        settings.save();
        self.settings = settings;
    }
}

pub fn run() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }

    log::info!("Neon Flux starting...");

    let settings = Settings::load();
    let surface = CanvasSurface::from_id("canvas");
    if surface.is_none() {
        log::error!("No #canvas with a 2D context; frames will be skipped");
    }
    let canvas = surface.as_ref().map(|s| s.canvas().clone());

    let seed = js_sys::Date::now() as u64;
    let app: SharedApp = Rc::new(RefCell::new(App::new(seed, surface, settings)));
    log::info!("Game initialized with seed: {}", seed);

    if let Some(canvas) = &canvas {
        input::setup_input_handlers(canvas, app.clone());
    }
    input::setup_buttons(app.clone());
    hud::set_visible("menu", true);
    hud::set_visible("hud", false);
    hud::set_visible("game-over", false);

    let animation = AnimationLoop::new();
    AnimationLoop::start(&animation, app);
    setup_teardown(animation);

    log::info!("Neon Flux running!");
}

/// Stop the loop when the page goes away
fn setup_teardown(animation: Rc<AnimationLoop>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
        animation.stop();
    });
    let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
    closure.forget();
}
