//! Server configuration loading from file and environment variables.

use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;
use thiserror::Error;

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Network settings for the voice backend.
    #[serde(default)]
    pub server: ServerConfig,

    /// Front-end origin allowed on the realtime channel (and CORS).
    #[serde(default)]
    pub frontend: FrontendConfig,

    /// Address handed to clients for the voice WebSocket.
    #[serde(default)]
    pub voice: VoiceConfig,

    /// External speech API (STT + TTS).
    #[serde(default)]
    pub speech: SpeechSettings,

    /// External reasoning API.
    #[serde(default)]
    pub agent: AgentSettings,

    /// Audio tool binaries.
    #[serde(default)]
    pub audio: AudioSettings,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Network configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Front-end origin allow-list (a single origin plus local loopback,
/// which is always accepted).
#[derive(Debug, Clone, Deserialize)]
pub struct FrontendConfig {
    #[serde(default = "default_frontend_origin")]
    pub origin: String,
}

/// Client-facing voice channel address.
#[derive(Debug, Clone, Deserialize)]
pub struct VoiceConfig {
    #[serde(default = "default_voice_ws_url")]
    pub public_ws_url: String,
}

/// Speech API settings. The key is usually supplied via `GROQ_API_KEY`.
#[derive(Clone, Deserialize)]
pub struct SpeechSettings {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
    #[serde(default = "default_stt_model")]
    pub stt_model: String,
    #[serde(default = "default_tts_model")]
    pub tts_model: String,
    #[serde(default = "default_tts_voice")]
    pub tts_voice: String,
    /// Request timeout in seconds for STT/TTS calls.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for SpeechSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechSettings")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("stt_model", &self.stt_model)
            .field("tts_model", &self.tts_model)
            .field("tts_voice", &self.tts_voice)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Reasoning API settings. Shares `GROQ_API_KEY` with the speech settings
/// unless a separate key is configured.
#[derive(Clone, Deserialize)]
pub struct AgentSettings {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
    #[serde(default = "default_agent_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Request timeout in seconds for completion calls.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for AgentSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentSettings")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Paths to the audio tool binaries.
#[derive(Debug, Clone, Deserialize)]
pub struct AudioSettings {
    #[serde(default = "default_ffmpeg")]
    pub ffmpeg_binary: String,
    #[serde(default = "default_ffprobe")]
    pub ffprobe_binary: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "opsdeck_server=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
}

fn default_port() -> u16 {
    7861
}

fn default_frontend_origin() -> String {
    "http://localhost:5000".to_string()
}

fn default_voice_ws_url() -> String {
    "ws://127.0.0.1:7861/voice".to_string()
}

fn default_api_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_stt_model() -> String {
    "whisper-large-v3-turbo".to_string()
}

fn default_tts_model() -> String {
    "playai-tts".to_string()
}

fn default_tts_voice() -> String {
    "Celeste-PlayAI".to_string()
}

fn default_agent_model() -> String {
    "meta-llama/llama-4-scout-17b-16e-instruct".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_ffmpeg() -> String {
    "ffmpeg".to_string()
}

fn default_ffprobe() -> String {
    "ffprobe".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            origin: default_frontend_origin(),
        }
    }
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            public_ws_url: default_voice_ws_url(),
        }
    }
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_api_base_url(),
            stt_model: default_stt_model(),
            tts_model: default_tts_model(),
            tts_voice: default_tts_voice(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_api_base_url(),
            model: default_agent_model(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            ffmpeg_binary: default_ffmpeg(),
            ffprobe_binary: default_ffprobe(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl SpeechSettings {
    /// Builds the speech-client config.
    pub fn to_speech_config(&self) -> opsdeck_voice::SpeechConfig {
        let mut config = opsdeck_voice::SpeechConfig::new(&self.api_key);
        config.base_url = self.base_url.clone();
        config.stt_model = self.stt_model.clone();
        config.tts_model = self.tts_model.clone();
        config.tts_voice = self.tts_voice.clone();
        config.timeout = Duration::from_secs(self.timeout_secs);
        config
    }
}

impl AgentSettings {
    /// Builds the chat-client config.
    pub fn to_agent_config(&self) -> opsdeck_agent::AgentConfig {
        let mut config = opsdeck_agent::AgentConfig::new(&self.api_key);
        config.base_url = self.base_url.clone();
        config.model = self.model.clone();
        config.max_tokens = self.max_tokens;
        config.timeout = Duration::from_secs(self.timeout_secs);
        config
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `OPSDECK_HOST` overrides `server.host`
/// - `OPSDECK_PORT` overrides `server.port`
/// - `OPSDECK_FRONTEND_ORIGIN` overrides `frontend.origin`
/// - `OPSDECK_VOICE_WS_URL` overrides `voice.public_ws_url`
/// - `GROQ_API_KEY` overrides `speech.api_key` and `agent.api_key`
/// - `OPSDECK_FFMPEG` / `OPSDECK_FFPROBE` override the audio binaries
/// - `OPSDECK_LOG_LEVEL` overrides `logging.level`
/// - `OPSDECK_LOG_JSON` overrides `logging.json` (set to "true" to enable)
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    // Environment variable overrides
    if let Ok(host) = std::env::var("OPSDECK_HOST") {
        if let Ok(parsed) = host.parse() {
            config.server.host = parsed;
        }
    }
    if let Ok(port) = std::env::var("OPSDECK_PORT") {
        if let Ok(parsed) = port.parse() {
            config.server.port = parsed;
        }
    }
    if let Ok(origin) = std::env::var("OPSDECK_FRONTEND_ORIGIN") {
        config.frontend.origin = origin;
    }
    if let Ok(url) = std::env::var("OPSDECK_VOICE_WS_URL") {
        config.voice.public_ws_url = url;
    }
    if let Ok(key) = std::env::var("GROQ_API_KEY") {
        config.speech.api_key = key.clone();
        config.agent.api_key = key;
    }
    if let Ok(ffmpeg) = std::env::var("OPSDECK_FFMPEG") {
        config.audio.ffmpeg_binary = ffmpeg;
    }
    if let Ok(ffprobe) = std::env::var("OPSDECK_FFPROBE") {
        config.audio.ffprobe_binary = ffprobe;
    }
    if let Ok(level) = std::env::var("OPSDECK_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Ok(json) = std::env::var("OPSDECK_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }

    Ok(config)
}
