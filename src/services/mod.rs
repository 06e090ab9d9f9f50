//! Remote generation collaborators
//!
//! Post-game commentary, its spoken rendition, and palette themes all come
//! from the Gemini REST API. The request/response model and decoding are
//! plain Rust; the `fetch` client is wasm only. None of this runs inside a
//! tick: callers turn every failure into a fallback.

pub mod gemini;
pub mod speech;

#[cfg(target_arch = "wasm32")]
pub mod client;

#[cfg(target_arch = "wasm32")]
pub use client::GeminiClient;
pub use gemini::{GenerateRequest, GenerateResponse, parse_theme};
pub use speech::{SPEECH_SAMPLE_RATE, decode_pcm16};

use crate::error::{Result, ServiceError};

/// Shown when the service could not be reached
pub const FALLBACK_CONNECTION_LOST: &str = "CONNECTION LOST.";
/// Shown when the service answered with nothing to say
pub const FALLBACK_EMPTY: &str = "SYSTEM ERROR. REBOOTING.";
/// Placeholder while a commentary request is in flight
pub const ANALYZING: &str = "CORE ANALYZING...";

/// Endpoint and model selection
#[derive(Debug, Clone, PartialEq)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub text_model: String,
    pub speech_model: String,
    pub voice: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: option_env!("GEMINI_API_KEY")
                .filter(|key| !key.is_empty())
                .map(str::to_owned),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_owned(),
            text_model: "gemini-3-flash-preview".to_owned(),
            speech_model: "gemini-2.5-flash-preview-tts".to_owned(),
            voice: "Fenrir".to_owned(),
        }
    }
}

impl GeminiConfig {
    /// `generateContent` URL for `model`
    pub fn endpoint(&self, model: &str) -> Result<String> {
        let key = self.api_key.as_deref().ok_or(ServiceError::MissingApiKey)?;
        Ok(format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url.trim_end_matches('/'),
            model,
            key
        ))
    }
}

pub fn commentary_prompt(score: u64, max_combo: u32) -> String {
    format!(
        "The player just finished a game of NEON FLUX.\n\
         Score: {score}. Max Combo: {max_combo}.\n\
         You are the Game Core. Speak in a robotic, slightly condescending or begrudgingly impressed tone.\n\
         Keep it under 15 words."
    )
}

pub const THEME_INSTRUCTION: &str = "You are a design system for a neon game. \
Return a JSON object with 3 hex color codes based on the user's theme.\n\
- cyan and magenta should be high contrast and neon/bright.\n\
- bg should be very dark, almost black.\n\
Example for \"Volcano\": { \"cyan\": \"#FF4500\", \"magenta\": \"#FFD700\", \"bg\": \"#1a0500\" }";

pub fn theme_prompt(theme: &str) -> String {
    format!("Theme: {}", theme.trim())
}

/// Commentary text, or the canned line for the failure
pub fn commentary_or_fallback(result: Result<String>) -> String {
    match result {
        Ok(text) if !text.trim().is_empty() => text.trim().to_owned(),
        Ok(_) | Err(ServiceError::EmptyResponse) => {
            log::warn!("Commentary came back empty, using fallback");
            FALLBACK_EMPTY.to_owned()
        }
        Err(e) => {
            log::error!("Commentary generation failed: {}", e);
            FALLBACK_CONNECTION_LOST.to_owned()
        }
    }
}
