use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::BufReader,
    path::{Path, PathBuf},
};

/// Flags the picker sets itself and that custom arguments must not override
const CONFLICTING_FLAGS: &[&str] = &[
    "-f",
    "--format",
    "--merge-output-format",
    "-o",
    "--output",
];

/// Container the downloaded streams are merged into
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MergeFormat {
    #[default]
    Mp4,
    Mkv,
    Webm,
}

impl MergeFormat {
    pub const fn as_str(&self) -> &'static str {
        match self {
            MergeFormat::Mp4 => "mp4",
            MergeFormat::Mkv => "mkv",
            MergeFormat::Webm => "webm",
        }
    }
}

/// Settings for the quality picker
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Downloader executable, looked up on PATH
    pub downloader: String,
    /// Container for the merged video and audio streams
    pub merge_output_format: MergeFormat,
    /// yt-dlp output template, relative to the download directory
    pub output_template: String,
    /// Custom yt-dlp arguments (shell-style, validated for conflicts)
    pub custom_ytdlp_args: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            downloader: "yt-dlp".to_string(),
            merge_output_format: MergeFormat::default(),
            output_template: "%(title)s - [%(id)s].%(ext)s".to_string(),
            custom_ytdlp_args: String::new(),
        }
    }
}

impl Settings {
    /// Default settings file location in the platform config directory
    pub fn default_path() -> PathBuf {
        let mut config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.push(env!("CARGO_PKG_NAME"));
        config_dir.push("settings.json");
        config_dir
    }

    /// Validate custom yt-dlp arguments for conflicts
    ///
    /// Returns Ok(()) if valid, or Err with a description of the conflict.
    pub fn validate_custom_args(args: &str) -> std::result::Result<(), String> {
        if args.trim().is_empty() {
            return Ok(());
        }

        let parsed = match shlex::split(args) {
            Some(args) => args,
            None => return Err("Invalid argument syntax (unmatched quotes)".to_string()),
        };

        for arg in &parsed {
            for conflict in CONFLICTING_FLAGS {
                if arg == *conflict || arg.starts_with(&format!("{}=", conflict)) {
                    return Err(format!(
                        "'{}' conflicts with the quality picker's own handling",
                        conflict
                    ));
                }
            }
        }

        Ok(())
    }

    /// Parse custom arguments into a vector of strings
    ///
    /// Returns an empty vector if parsing fails or args is empty.
    pub fn parse_custom_args(&self) -> Vec<String> {
        if self.custom_ytdlp_args.trim().is_empty() {
            return Vec::new();
        }

        match shlex::split(&self.custom_ytdlp_args) {
            Some(args) => args,
            None => {
                tracing::warn!(
                    args = %self.custom_ytdlp_args,
                    "custom yt-dlp args have malformed shell syntax, ignoring them"
                );
                Vec::new()
            }
        }
    }

    /// Load settings from `path`, creating it with defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let default_settings = Self::default();
            default_settings.save_to(path)?;
            tracing::info!(path = %path.display(), "wrote default settings");
            return Ok(default_settings);
        }

        let file = File::open(path)
            .with_context(|| format!("Failed to open settings file: {:?}", path))?;
        let reader = BufReader::new(file);

        let settings: Self = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse settings file: {:?}", path))?;

        if settings.downloader.trim().is_empty() {
            bail!("'downloader' must name an executable");
        }
        if let Err(conflict) = Self::validate_custom_args(&settings.custom_ytdlp_args) {
            bail!("Invalid custom_ytdlp_args: {}", conflict);
        }

        Ok(settings)
    }

    /// Save settings using atomic write (write to temp file, then rename).
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let temp_path = path.with_extension("json.tmp");
        let settings_json = serde_json::to_string_pretty(self)?;

        fs::write(&temp_path, &settings_json)
            .with_context(|| format!("Failed to write temp settings file: {:?}", temp_path))?;

        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to rename temp settings to: {:?}", path))
    }

    /// Output template joined onto the download directory
    pub fn output_path(&self, download_dir: &Path) -> String {
        download_dir
            .join(&self.output_template)
            .to_string_lossy()
            .to_string()
    }
}
