//! Audio transcoding and duration measurement via ffmpeg/ffprobe
//! subprocesses on stdin/stdout.

use crate::error::VoiceError;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Maximum audio input size (10 MiB). Prevents OOM from oversized payloads.
const MAX_AUDIO_INPUT_BYTES: usize = 10 * 1024 * 1024;

/// Timeout for the transcode process.
const TRANSCODE_TIMEOUT: Duration = Duration::from_secs(15);

/// Timeout for the duration probe.
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Fallback playback-rate estimate when the probe fails: bytes per second
/// of encoded audio. Deliberately low so the estimated duration overshoots
/// and the navigation signal never fires mid-playback.
const FALLBACK_BYTES_PER_SECOND: f64 = 16_000.0;

/// Wraps the ffmpeg/ffprobe binaries for decode, resample, and duration
/// measurement.
#[derive(Debug, Clone)]
pub struct AudioConverter {
    ffmpeg: PathBuf,
    ffprobe: PathBuf,
}

impl AudioConverter {
    pub fn new(ffmpeg: impl Into<PathBuf>, ffprobe: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
        }
    }

    /// Decodes a compressed utterance (WebM/Opus or anything else ffmpeg
    /// recognizes) into 16 kHz mono s16 WAV.
    pub async fn transcode_to_wav(&self, audio: &[u8]) -> Result<Vec<u8>, VoiceError> {
        if audio.len() > MAX_AUDIO_INPUT_BYTES {
            return Err(VoiceError::Decode(format!(
                "audio data exceeds maximum size: {} bytes (limit: {} bytes)",
                audio.len(),
                MAX_AUDIO_INPUT_BYTES
            )));
        }

        let mut command = Command::new(&self.ffmpeg);
        command
            .arg("-hide_banner")
            .arg("-loglevel")
            .arg("error")
            .arg("-i")
            .arg("pipe:0")
            .arg("-ar")
            .arg("16000")
            .arg("-ac")
            .arg("1")
            .arg("-f")
            .arg("wav")
            .arg("pipe:1")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let output = run_with_input(command, audio, TRANSCODE_TIMEOUT)
            .await
            .map_err(VoiceError::Decode)?;
        Ok(output)
    }

    /// Measures the playback duration of an encoded audio buffer.
    pub async fn measure_duration(&self, audio: &[u8]) -> Result<Duration, VoiceError> {
        let mut command = Command::new(&self.ffprobe);
        command
            .arg("-v")
            .arg("error")
            .arg("-show_entries")
            .arg("format=duration")
            .arg("-of")
            .arg("csv=p=0")
            .arg("-i")
            .arg("pipe:0")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let output = run_with_input(command, audio, PROBE_TIMEOUT)
            .await
            .map_err(VoiceError::Probe)?;

        let text = String::from_utf8_lossy(&output);
        let seconds: f64 = text
            .trim()
            .parse()
            .map_err(|_| VoiceError::Probe(format!("unparseable duration: {:?}", text.trim())))?;
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(VoiceError::Probe(format!("invalid duration: {}", seconds)));
        }
        Ok(Duration::from_secs_f64(seconds))
    }

    /// Duration with a byte-length fallback when the probe fails. The
    /// fallback overshoots on purpose; the caller only uses it to wait out
    /// playback.
    pub async fn measure_duration_or_estimate(&self, audio: &[u8]) -> Duration {
        match self.measure_duration(audio).await {
            Ok(duration) => duration,
            Err(e) => {
                let estimate = Duration::from_secs_f64(audio.len() as f64 / FALLBACK_BYTES_PER_SECOND);
                tracing::warn!(
                    estimate_secs = estimate.as_secs_f64(),
                    "duration probe failed, falling back to byte estimate: {}",
                    e
                );
                estimate
            }
        }
    }
}

/// Spawns the command, feeds `input` on stdin, and returns stdout.
///
/// The stdin write runs on its own task so a full stdout buffer cannot
/// deadlock against a blocked write.
async fn run_with_input(
    mut command: Command,
    input: &[u8],
    timeout: Duration,
) -> Result<Vec<u8>, String> {
    let mut child = command
        .spawn()
        .map_err(|e| format!("failed to spawn process: {}", e))?;

    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| "failed to open stdin".to_string())?;
    let input_owned = input.to_vec();
    let write_task = tokio::spawn(async move {
        let result = stdin.write_all(&input_owned).await;
        drop(stdin); // close to signal EOF
        result
    });

    let output = tokio::time::timeout(timeout, child.wait_with_output())
        .await
        .map_err(|_| format!("process timed out after {} seconds", timeout.as_secs()))?
        .map_err(|e| format!("failed to read process output: {}", e))?;

    match write_task.await {
        Ok(Ok(())) => {}
        // A broken pipe is expected when the process exits early; its
        // status and stderr carry the real error.
        Ok(Err(e)) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
        Ok(Err(e)) => return Err(format!("failed to write to stdin: {}", e)),
        Err(e) => return Err(format!("stdin task failed: {}", e)),
    }

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("process failed: {}", stderr.trim()));
    }

    Ok(output.stdout)
}
