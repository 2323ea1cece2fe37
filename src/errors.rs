use std::result;
use thiserror::Error;

pub type Result<T> = result::Result<T, AppError>;

/// Exit status used for usage errors, interrupts and every other fatal failure.
pub const EXIT_FAILURE: u8 = 1;

/// Application-wide error enum
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Usage(String),

    #[error("Interrupted")]
    Interrupted,

    #[error("Missing dependency: {0}")]
    Dependency(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Download error: {0}")]
    Download(String),

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Process exit status reported for this error.
    ///
    /// Every failure currently exits with 1; the match keeps the mapping explicit
    /// so a new variant has to pick its status.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Usage(_)
            | AppError::Interrupted
            | AppError::Dependency(_)
            | AppError::Config(_)
            | AppError::Download(_)
            | AppError::Terminal(_)
            | AppError::Io(_) => EXIT_FAILURE,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Config(format!("{:#}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_error_displays_message_verbatim() {
        let err = AppError::Usage("Usage: picker <YouTube video URL>".to_string());
        assert_eq!(err.to_string(), "Usage: picker <YouTube video URL>");
    }

    #[test]
    fn test_interrupt_and_usage_exit_with_one() {
        assert_eq!(AppError::Interrupted.exit_code(), 1);
        assert_eq!(AppError::Usage(String::new()).exit_code(), 1);
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::other("boom");
        let err: AppError = io.into();
        assert!(matches!(err, AppError::Io(_)));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_anyhow_error_becomes_config_error() {
        let err: AppError = anyhow::anyhow!("bad settings").into();
        assert!(matches!(err, AppError::Config(ref msg) if msg == "bad settings"));
    }
}
