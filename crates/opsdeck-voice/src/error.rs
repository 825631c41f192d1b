use thiserror::Error;

#[derive(Debug, Error)]
pub enum VoiceError {
    /// The audio container could not be decoded/resampled.
    #[error("decode error: {0}")]
    Decode(String),

    /// Playback-duration measurement failed.
    #[error("probe error: {0}")]
    Probe(String),

    /// Speech-to-text failed.
    #[error("STT error: {0}")]
    Stt(String),

    /// Text-to-speech failed.
    #[error("TTS error: {0}")]
    Tts(String),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}
