//! Browser `fetch` client for the generation services

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use super::gemini::{GenerateRequest, GenerateResponse, parse_theme};
use super::speech::decode_pcm16;
use super::GeminiConfig;
use crate::error::{Result, ServiceError};
use crate::sim::Palette;

fn js_error(err: JsValue) -> ServiceError {
    ServiceError::Transport(format!("{:?}", err))
}

#[derive(Debug, Clone, Default)]
pub struct GeminiClient {
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self { config }
    }

    /// Short in-character remark on a finished session
    pub async fn generate_commentary(&self, score: u64, max_combo: u32) -> Result<String> {
        let response = self
            .post(&self.config.text_model, &GenerateRequest::commentary(score, max_combo))
            .await?;
        response.text().ok_or(ServiceError::EmptyResponse)
    }

    /// Spoken `text` as mono samples at [`super::SPEECH_SAMPLE_RATE`]
    pub async fn generate_speech(&self, text: &str) -> Result<Vec<f32>> {
        let response = self
            .post(
                &self.config.speech_model,
                &GenerateRequest::speech(text, &self.config),
            )
            .await?;
        let audio = response.inline_audio().ok_or(ServiceError::EmptyResponse)?;
        decode_pcm16(audio)
    }

    pub async fn generate_theme(&self, theme: &str) -> Result<Palette> {
        let response = self
            .post(&self.config.text_model, &GenerateRequest::theme(theme))
            .await?;
        parse_theme(&response)
    }

    async fn post(&self, model: &str, body: &GenerateRequest) -> Result<GenerateResponse> {
        let url = self.config.endpoint(model)?;
        let window = web_sys::window().ok_or_else(|| ServiceError::transport("no window"))?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from_str(&serde_json::to_string(body)?));

        let request = Request::new_with_str_and_init(&url, &opts).map_err(js_error)?;
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(js_error)?;

        let reply = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_error)?;
        let reply: Response = reply.dyn_into().map_err(js_error)?;
        if !reply.ok() {
            return Err(ServiceError::Http {
                status: reply.status(),
            });
        }

        let text = JsFuture::from(reply.text().map_err(js_error)?)
            .await
            .map_err(js_error)?
            .as_string()
            .ok_or(ServiceError::EmptyResponse)?;
        Ok(serde_json::from_str(&text)?)
    }
}
