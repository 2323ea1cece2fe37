use clap::{Parser, error::ErrorKind};
use std::path::PathBuf;

use crate::errors::AppError;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Video URL to download
    pub url: String,
    /// Download directory
    #[arg(short, long, default_value = ".")]
    pub download_dir: PathBuf,
    /// Settings file path (defaults to the platform config directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// One-line usage string printed when the positional argument is missing or repeated.
pub fn usage() -> String {
    format!("Usage: {} <YouTube video URL>", env!("CARGO_PKG_NAME"))
}

/// Sorts a clap parse failure into a usage error or a clap-handled display.
///
/// Help and version requests are handed back untouched so clap can print them and
/// exit 0. Everything else (missing URL, extra positionals, unknown flags) becomes
/// [`AppError::Usage`] carrying [`usage`].
pub fn into_usage_error(err: clap::Error) -> std::result::Result<AppError, clap::Error> {
    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => Err(err),
        _ => Ok(AppError::Usage(usage())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_url_parses() {
        let args = Args::try_parse_from(["picker", "https://youtu.be/abc"]).unwrap();
        assert_eq!(args.url, "https://youtu.be/abc");
        assert_eq!(args.download_dir, PathBuf::from("."));
        assert!(args.config.is_none());
    }

    #[test]
    fn test_missing_url_is_usage_error() {
        let err = Args::try_parse_from(["picker"]).unwrap_err();
        let app_err = into_usage_error(err).unwrap();
        assert!(matches!(app_err, AppError::Usage(ref msg) if msg == &usage()));
        assert_eq!(app_err.exit_code(), 1);
    }

    #[test]
    fn test_two_urls_is_usage_error() {
        let err = Args::try_parse_from(["picker", "https://a", "https://b"]).unwrap_err();
        assert!(matches!(into_usage_error(err), Ok(AppError::Usage(_))));
    }

    #[test]
    fn test_help_is_left_to_clap() {
        let err = Args::try_parse_from(["picker", "--help"]).unwrap_err();
        assert!(into_usage_error(err).is_err());
    }

    #[test]
    fn test_download_dir_and_config_flags() {
        let args = Args::try_parse_from([
            "picker",
            "-d",
            "/tmp/videos",
            "--config",
            "/tmp/settings.json",
            "https://youtu.be/abc",
        ])
        .unwrap();
        assert_eq!(args.download_dir, PathBuf::from("/tmp/videos"));
        assert_eq!(args.config, Some(PathBuf::from("/tmp/settings.json")));
    }

    #[test]
    fn test_usage_names_the_url_argument() {
        assert!(usage().starts_with("Usage: "));
        assert!(usage().ends_with("<YouTube video URL>"));
    }
}
