use std::process::{Command, Stdio};

/// Runs `program <version_flag>` and reports whether it exited successfully.
fn is_runnable(program: &str, version_flag: &str) -> bool {
    Command::new(program)
        .arg(version_flag)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Verifies that the external tools a download needs are installed and accessible.
///
/// Checks for:
/// - the downloader (yt-dlp by default), which fetches the streams
/// - ffmpeg, which merges video and audio into one container
///
/// # Returns
///
/// * `Result<(), Vec<String>>` - Ok if all dependencies are available, or
///   Err containing one message per missing tool
pub fn check_dependencies(downloader: &str) -> Result<(), Vec<String>> {
    let mut missing = Vec::new();

    if !is_runnable(downloader, "--version") {
        missing.push(format!("{} is not installed or not accessible.", downloader));
    }

    if !is_runnable("ffmpeg", "-version") {
        missing.push("ffmpeg is not installed or not accessible.".to_string());
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(missing)
    }
}

/// Where to get a missing tool, keyed off the message from [`check_dependencies`].
pub fn install_hint(message: &str) -> Option<&'static str> {
    if message.contains("ffmpeg") {
        Some("Download ffmpeg from: https://www.ffmpeg.org/download.html")
    } else if message.contains("yt-dlp") {
        Some("Download the latest release of yt-dlp from: https://github.com/yt-dlp/yt-dlp/releases")
    } else {
        None
    }
}
