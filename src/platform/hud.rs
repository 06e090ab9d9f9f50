//! DOM HUD and the post-game commentary task

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;

use crate::audio::AudioManager;
use crate::driver::{GameHooks, combo_badge};
use crate::services::{ANALYZING, GeminiClient, SPEECH_SAMPLE_RATE, commentary_or_fallback};
use crate::settings::Settings;
use crate::sim::{AudioCue, GamePhase, Palette};

fn document() -> Option<web_sys::Document> {
    web_sys::window()?.document()
}

pub(crate) fn set_text(id: &str, text: &str) {
    if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
        el.set_text_content(Some(text));
    }
}

/// Add or remove `class` without touching the element's other classes
fn set_class(id: &str, class: &str, on: bool) {
    if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
        let _ = el.class_list().toggle_with_force(class, on);
    }
}

pub(crate) fn set_visible(id: &str, visible: bool) {
    set_class(id, "hidden", !visible);
}

/// Expose palette colors to the page stylesheet as CSS variables
pub(crate) fn apply_palette_css(palette: &Palette) {
    let Some(root) = document().and_then(|d| d.document_element()) else {
        return;
    };
    let style = format!(
        "--neon-cyan: {}; --neon-magenta: {}; --neon-bg: {};",
        palette.cyan, palette.magenta, palette.bg
    );
    let _ = root.set_attribute("style", &style);
}

/// Browser-side consumer of simulation events
pub struct DomHud {
    audio: Rc<RefCell<AudioManager>>,
    client: Rc<GeminiClient>,
    /// Bumped on every new session; commentary for an older one is dropped
    session: Rc<Cell<u64>>,
    voice: bool,
}

impl DomHud {
    pub fn new(audio: Rc<RefCell<AudioManager>>, client: GeminiClient, settings: &Settings) -> Self {
        Self {
            audio,
            client: Rc::new(client),
            session: Rc::new(Cell::new(0)),
            voice: settings.voice_commentary && !settings.muted,
        }
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.voice = settings.voice_commentary && !settings.muted;
        self.audio.borrow_mut().apply_settings(settings);
    }

    pub fn client(&self) -> Rc<GeminiClient> {
        self.client.clone()
    }

    fn spawn_commentary(&self, score: u64, max_combo: u32) {
        let session = self.session.get();
        let current = self.session.clone();
        let client = self.client.clone();
        let audio = self.audio.clone();
        let voice = self.voice;

        spawn_local(async move {
            let text = commentary_or_fallback(client.generate_commentary(score, max_combo).await);
            if current.get() != session {
                log::debug!("Dropping commentary for an old session");
                return;
            }
            set_text("commentary", &text);

            if !voice {
                return;
            }
            match client.generate_speech(&text).await {
                Ok(samples) if current.get() == session => {
                    audio.borrow().play_pcm(&samples, SPEECH_SAMPLE_RATE);
                }
                Ok(_) => log::debug!("Dropping speech for an old session"),
                Err(e) => log::warn!("Speech generation failed, staying silent: {}", e),
            }
        });
    }
}

impl GameHooks for DomHud {
    fn on_score_update(&mut self, score: u64, combo: u32) {
        set_text("hud-score", &score.to_string());
        match combo_badge(combo) {
            Some(badge) => {
                set_text("hud-combo", &badge.label);
                set_class("hud-combo", "hot", badge.hot);
                set_visible("hud-combo", true);
            }
            None => set_visible("hud-combo", false),
        }
    }

    fn on_game_over(&mut self, score: u64, max_combo: u32) {
        set_text("final-score", &score.to_string());
        set_text("final-combo", &max_combo.to_string());
        set_text("commentary", ANALYZING);
        self.spawn_commentary(score, max_combo);
    }

    fn on_cue(&mut self, cue: AudioCue) {
        self.audio.borrow().play(cue);
    }

    fn on_phase_changed(&mut self, phase: GamePhase) {
        if phase == GamePhase::Playing {
            self.session.set(self.session.get() + 1);
            set_text("commentary", "");
        }
        set_visible("menu", phase == GamePhase::Menu);
        set_visible("hud", phase == GamePhase::Playing);
        set_visible("game-over", phase == GamePhase::GameOver);
    }
}
