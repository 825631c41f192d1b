use std::fmt;
use std::time::Duration;

/// Default API base for the external speech capabilities
/// (OpenAI-compatible).
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default speech-to-text model.
pub const DEFAULT_STT_MODEL: &str = "whisper-large-v3-turbo";

/// Default text-to-speech model and voice.
pub const DEFAULT_TTS_MODEL: &str = "playai-tts";
pub const DEFAULT_TTS_VOICE: &str = "Celeste-PlayAI";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration shared by the STT and TTS clients.
#[derive(Clone)]
pub struct SpeechConfig {
    pub api_key: String,
    pub base_url: String,
    pub stt_model: String,
    pub tts_model: String,
    pub tts_voice: String,
    /// Hard deadline for one STT or TTS request.
    pub timeout: Duration,
}

impl SpeechConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            stt_model: DEFAULT_STT_MODEL.to_string(),
            tts_model: DEFAULT_TTS_MODEL.to_string(),
            tts_voice: DEFAULT_TTS_VOICE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl fmt::Debug for SpeechConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpeechConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("stt_model", &self.stt_model)
            .field("tts_model", &self.tts_model)
            .field("tts_voice", &self.tts_voice)
            .field("timeout", &self.timeout)
            .finish()
    }
}
