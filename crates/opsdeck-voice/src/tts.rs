//! Text-to-speech over the external synthesis API.

use crate::config::SpeechConfig;
use crate::error::VoiceError;
use serde::Serialize;

/// Maximum text input size for synthesis (64 KiB). Prevents resource
/// exhaustion from oversized requests.
const MAX_TTS_INPUT_BYTES: usize = 64 * 1024;

#[derive(Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    voice: &'a str,
    input: &'a str,
    response_format: &'a str,
}

/// Client for `POST {base_url}/audio/speech`.
#[derive(Debug, Clone)]
pub struct TtsClient {
    client: reqwest::Client,
    config: SpeechConfig,
}

impl TtsClient {
    pub fn new(config: SpeechConfig) -> Result<Self, VoiceError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| VoiceError::Config(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// Synthesizes the reply text to encoded MP3 bytes.
    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>, VoiceError> {
        if text.len() > MAX_TTS_INPUT_BYTES {
            return Err(VoiceError::Tts(format!(
                "text exceeds maximum size: {} bytes (limit: {} bytes)",
                text.len(),
                MAX_TTS_INPUT_BYTES
            )));
        }

        let request = SpeechRequest {
            model: &self.config.tts_model,
            voice: &self.config.tts_voice,
            input: text,
            response_format: "mp3",
        };

        let response = self
            .client
            .post(format!("{}/audio/speech", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| VoiceError::Tts(format!("synthesis request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(VoiceError::Tts(format!(
                "synthesis API returned {}: {}",
                status,
                body.trim()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| VoiceError::Tts(format!("failed to read synthesized audio: {}", e)))?;
        Ok(bytes.to_vec())
    }
}
