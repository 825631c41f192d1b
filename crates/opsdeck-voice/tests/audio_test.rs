//! AudioConverter behavior against mock ffmpeg/ffprobe binaries.
//!
//! The mock scripts read stdin and write predictable bytes to stdout, so
//! the subprocess plumbing (pipes, EOF, exit status) is exercised without
//! a real ffmpeg install.

use opsdeck_voice::{AudioConverter, VoiceError};
use std::path::PathBuf;
use std::time::Duration;

/// Writes an executable shell script into the temp dir.
async fn write_script(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    tokio::fs::write(&path, body).await.expect("failed to write mock script");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = tokio::fs::metadata(&path)
            .await
            .expect("mock script metadata")
            .permissions();
        perms.set_mode(0o755);
        tokio::fs::set_permissions(&path, perms)
            .await
            .expect("failed to set mock script permissions");
    }
    path
}

#[tokio::test]
async fn transcode_returns_process_stdout() {
    let dir = tempfile::tempdir().expect("temp dir");
    let ffmpeg = write_script(
        &dir,
        "mock_ffmpeg.sh",
        "#!/bin/sh\ncat > /dev/null\nprintf 'RIFF_MOCK_WAV_16K_MONO'",
    )
    .await;
    let ffprobe = write_script(&dir, "mock_ffprobe.sh", "#!/bin/sh\nprintf '0'").await;

    let converter = AudioConverter::new(&ffmpeg, &ffprobe);
    let wav = converter
        .transcode_to_wav(b"pretend-webm-bytes")
        .await
        .expect("transcode should succeed");
    assert_eq!(wav, b"RIFF_MOCK_WAV_16K_MONO");
}

#[tokio::test]
async fn transcode_failure_carries_stderr() {
    let dir = tempfile::tempdir().expect("temp dir");
    let ffmpeg = write_script(
        &dir,
        "mock_ffmpeg.sh",
        "#!/bin/sh\ncat > /dev/null\necho 'Invalid data found when processing input' >&2\nexit 1",
    )
    .await;
    let ffprobe = write_script(&dir, "mock_ffprobe.sh", "#!/bin/sh\nprintf '0'").await;

    let converter = AudioConverter::new(&ffmpeg, &ffprobe);
    let err = converter
        .transcode_to_wav(b"garbage")
        .await
        .expect_err("failing process must error");
    match err {
        VoiceError::Decode(reason) => {
            assert!(reason.contains("Invalid data"), "stderr should surface: {}", reason)
        }
        other => panic!("expected Decode error, got {:?}", other),
    }
}

#[tokio::test]
async fn transcode_rejects_oversized_input_without_spawning() {
    let converter = AudioConverter::new("/nonexistent/ffmpeg", "/nonexistent/ffprobe");
    let oversized = vec![0u8; 10 * 1024 * 1024 + 1];
    let err = converter
        .transcode_to_wav(&oversized)
        .await
        .expect_err("oversized input must be rejected");
    assert!(matches!(err, VoiceError::Decode(_)));
}

#[tokio::test]
async fn missing_binary_is_a_decode_error() {
    let converter = AudioConverter::new("/nonexistent/ffmpeg", "/nonexistent/ffprobe");
    let err = converter
        .transcode_to_wav(b"bytes")
        .await
        .expect_err("missing binary must error");
    match err {
        VoiceError::Decode(reason) => assert!(reason.contains("spawn"), "got: {}", reason),
        other => panic!("expected Decode error, got {:?}", other),
    }
}

#[tokio::test]
async fn measure_duration_parses_probe_output() {
    let dir = tempfile::tempdir().expect("temp dir");
    let ffmpeg = write_script(&dir, "mock_ffmpeg.sh", "#!/bin/sh\ncat > /dev/null").await;
    let ffprobe = write_script(
        &dir,
        "mock_ffprobe.sh",
        "#!/bin/sh\ncat > /dev/null\nprintf '2.50'",
    )
    .await;

    let converter = AudioConverter::new(&ffmpeg, &ffprobe);
    let duration = converter
        .measure_duration(b"mp3-bytes")
        .await
        .expect("probe should succeed");
    assert_eq!(duration, Duration::from_millis(2500));
}

#[tokio::test]
async fn unparseable_probe_output_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let ffmpeg = write_script(&dir, "mock_ffmpeg.sh", "#!/bin/sh\ncat > /dev/null").await;
    let ffprobe = write_script(
        &dir,
        "mock_ffprobe.sh",
        "#!/bin/sh\ncat > /dev/null\nprintf 'N/A'",
    )
    .await;

    let converter = AudioConverter::new(&ffmpeg, &ffprobe);
    let err = converter
        .measure_duration(b"mp3-bytes")
        .await
        .expect_err("unparseable output must error");
    assert!(matches!(err, VoiceError::Probe(_)));
}

#[tokio::test]
async fn duration_estimate_falls_back_on_probe_failure() {
    let converter = AudioConverter::new("/nonexistent/ffmpeg", "/nonexistent/ffprobe");

    // 32000 bytes at the 16 kB/s fallback rate ≈ 2 s.
    let audio = vec![0u8; 32_000];
    let duration = converter.measure_duration_or_estimate(&audio).await;
    assert!(
        (duration.as_secs_f64() - 2.0).abs() < 0.01,
        "expected ~2s estimate, got {:?}",
        duration
    );
}
