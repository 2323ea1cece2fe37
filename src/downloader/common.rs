use std::path::Path;

use crate::utils::{dependencies::check_dependencies, settings::Settings};
use anyhow::{Error, Result};

/// Builds the command arguments for the downloader
///
/// # Parameters
///
/// * `settings` - Loaded settings (merge format, output template, custom args)
/// * `download_dir` - Directory the output template is joined onto
/// * `descriptor` - Format selector produced by the quality menu
/// * `url` - The URL to download
///
/// # Returns
///
/// A vector of strings containing all command arguments, with the URL last
pub fn build_ytdlp_command_args(
    settings: &Settings,
    download_dir: &Path,
    descriptor: &str,
    url: &str,
) -> Vec<String> {
    let mut cmd_args = vec![
        "--format".to_string(),
        descriptor.to_string(),
        "--merge-output-format".to_string(),
        settings.merge_output_format.as_str().to_string(),
        "--output".to_string(),
        settings.output_path(download_dir),
    ];

    // Custom arguments were validated against the flags above when settings loaded
    cmd_args.extend(settings.parse_custom_args());

    cmd_args.push(url.to_string());

    cmd_args
}

/// Validates dependencies, joining every problem into one error
pub fn validate_dependencies(settings: &Settings) -> Result<()> {
    check_dependencies(&settings.downloader).map_err(|errors| Error::msg(errors.join("\n")))
}
