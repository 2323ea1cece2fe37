use std::{
    path::Path,
    process::{Command, ExitStatus},
};

use crate::{
    errors::{AppError, Result},
    utils::settings::Settings,
};

use super::common::build_ytdlp_command_args;

/// Runs the downloader for one URL and waits for it to finish.
///
/// Must be called after the menu has released the terminal: the child inherits
/// stdin/stdout/stderr so its own progress output reaches the user directly.
pub fn run_download(
    settings: &Settings,
    download_dir: &Path,
    descriptor: &str,
    url: &str,
) -> Result<ExitStatus> {
    let cmd_args = build_ytdlp_command_args(settings, download_dir, descriptor, url);
    tracing::info!(program = %settings.downloader, args = ?cmd_args, "starting download");

    let status = Command::new(&settings.downloader)
        .args(&cmd_args)
        .status()
        .map_err(|e| {
            AppError::Download(format!("Failed to start {}: {}", settings.downloader, e))
        })?;

    if status.success() {
        tracing::info!(%url, "download completed");
    } else {
        tracing::warn!(%url, code = ?status.code(), "download failed");
    }

    Ok(status)
}
