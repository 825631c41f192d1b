//! Speech-to-text over the external transcription API.

use crate::config::SpeechConfig;
use crate::error::VoiceError;

/// Maximum WAV input size for transcription uploads (25 MiB, the API's own
/// file limit).
const MAX_STT_INPUT_BYTES: usize = 25 * 1024 * 1024;

/// Client for `POST {base_url}/audio/transcriptions`.
#[derive(Debug, Clone)]
pub struct SttClient {
    client: reqwest::Client,
    config: SpeechConfig,
}

impl SttClient {
    pub fn new(config: SpeechConfig) -> Result<Self, VoiceError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| VoiceError::Config(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// Transcribes a 16 kHz mono WAV buffer to plain text.
    pub async fn transcribe(&self, wav: &[u8]) -> Result<String, VoiceError> {
        if wav.len() > MAX_STT_INPUT_BYTES {
            return Err(VoiceError::Stt(format!(
                "audio data exceeds maximum size: {} bytes (limit: {} bytes)",
                wav.len(),
                MAX_STT_INPUT_BYTES
            )));
        }

        let part = reqwest::multipart::Part::bytes(wav.to_vec())
            .file_name("audio-file.wav")
            .mime_str("audio/wav")
            .map_err(|e| VoiceError::Stt(format!("failed to build upload part: {}", e)))?;
        let form = reqwest::multipart::Form::new()
            .text("model", self.config.stt_model.clone())
            .text("response_format", "text")
            .part("file", part);

        let response = self
            .client
            .post(format!("{}/audio/transcriptions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| VoiceError::Stt(format!("transcription request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(VoiceError::Stt(format!(
                "transcription API returned {}: {}",
                status,
                body.trim()
            )));
        }

        // response_format=text means the body is the transcript itself.
        let text = response
            .text()
            .await
            .map_err(|e| VoiceError::Stt(format!("failed to read transcript: {}", e)))?;
        Ok(text.trim().to_string())
    }
}
