//! `generateContent` request and response bodies

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{GeminiConfig, THEME_INSTRUCTION, commentary_prompt, theme_prompt};
use crate::error::{Result, ServiceError};
use crate::sim::Palette;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    fn text(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part {
                text: Some(text.into()),
                inline_data: None,
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

/// Base64 payload with its MIME type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(default)]
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech_config: Option<serde_json::Value>,
}

impl GenerateRequest {
    /// One-line verdict on a finished session
    pub fn commentary(score: u64, max_combo: u32) -> Self {
        Self {
            contents: vec![Content::text(commentary_prompt(score, max_combo))],
            system_instruction: None,
            generation_config: None,
        }
    }

    /// Spoken rendition of `text` in a prebuilt voice
    pub fn speech(text: &str, config: &GeminiConfig) -> Self {
        Self {
            contents: vec![Content::text(text)],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                response_modalities: Some(vec!["AUDIO".to_owned()]),
                speech_config: Some(json!({
                    "voiceConfig": {
                        "prebuiltVoiceConfig": { "voiceName": config.voice }
                    }
                })),
                ..Default::default()
            }),
        }
    }

    /// Palette for a free-text theme, constrained to `{cyan, magenta, bg}`
    pub fn theme(theme: &str) -> Self {
        Self {
            contents: vec![Content::text(theme_prompt(theme))],
            system_instruction: Some(Content::text(THEME_INSTRUCTION)),
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_owned()),
                response_schema: Some(json!({
                    "type": "OBJECT",
                    "properties": {
                        "cyan": { "type": "STRING" },
                        "magenta": { "type": "STRING" },
                        "bg": { "type": "STRING" }
                    },
                    "required": ["cyan", "magenta", "bg"]
                })),
                ..Default::default()
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

impl GenerateResponse {
    fn first_parts(&self) -> &[Part] {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or_default()
    }

    /// Concatenated text parts of the first candidate
    pub fn text(&self) -> Option<String> {
        let text: String = self
            .first_parts()
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }

    /// Base64 audio of the first inline part
    pub fn inline_audio(&self) -> Option<&str> {
        self.first_parts()
            .iter()
            .find_map(|p| p.inline_data.as_ref())
            .map(|d| d.data.as_str())
            .filter(|d| !d.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ThemeReply {
    cyan: String,
    magenta: String,
    bg: String,
}

/// Validate a theme reply into a palette
pub fn parse_theme(response: &GenerateResponse) -> Result<Palette> {
    let text = response.text().ok_or(ServiceError::EmptyResponse)?;
    let reply: ThemeReply = serde_json::from_str(text.trim())?;
    Ok(Palette {
        cyan: reply.cyan.trim().parse()?,
        magenta: reply.magenta.trim().parse()?,
        bg: reply.bg.trim().parse()?,
    })
}
