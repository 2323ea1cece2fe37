mod app_state;
mod args;
mod downloader;
mod errors;
mod logging;
mod ui;
mod utils;

use std::{fs, process::ExitCode};

use clap::Parser;

use crate::{
    args::{Args, into_usage_error},
    downloader::{common::validate_dependencies, worker::run_download},
    errors::{AppError, EXIT_FAILURE, Result},
    ui::tui::{Outcome, install_interrupt_flag, run_tui},
    utils::{dependencies::install_hint, link::VideoUrl, settings::Settings},
};

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => match into_usage_error(err) {
            Ok(usage) => {
                println!("{}", usage);
                return ExitCode::from(usage.exit_code());
            }
            Err(err) => err.exit(),
        },
    };

    let _logging = logging::init();

    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            report(&err);
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(args: &Args) -> Result<ExitCode> {
    let video_url = VideoUrl::parse(&args.url)?;

    let settings_path = args.config.clone().unwrap_or_else(Settings::default_path);
    let settings = Settings::load_from(&settings_path)?;

    validate_dependencies(&settings).map_err(|e| AppError::Dependency(e.to_string()))?;

    let interrupts = install_interrupt_flag()?;

    tracing::info!(url = %video_url, host = ?video_url.host(), "starting quality menu");
    let outcome = run_tui(&video_url, interrupts)?;

    match &outcome {
        Outcome::Confirmed { descriptor, .. } => {
            fs::create_dir_all(&args.download_dir)?;
            let status = run_download(
                &settings,
                &args.download_dir,
                descriptor,
                video_url.as_str(),
            )?;
            let code = status
                .code()
                .and_then(|c| u8::try_from(c).ok())
                .unwrap_or(EXIT_FAILURE);
            Ok(ExitCode::from(code))
        }
        Outcome::Cancelled => Ok(ExitCode::from(outcome.exit_code().unwrap_or(0))),
        Outcome::Interrupted => Err(AppError::Interrupted),
    }
}

/// Prints a fatal error after the terminal has been restored.
fn report(err: &AppError) {
    match err {
        AppError::Interrupted => tracing::info!("exiting after interrupt"),
        AppError::Usage(usage) => println!("{}", usage),
        AppError::Dependency(missing) => {
            tracing::error!(%missing, "missing dependencies");
            for line in missing.lines() {
                eprintln!("Error: {}", line);
                if let Some(hint) = install_hint(line) {
                    eprintln!("{}", hint);
                }
            }
        }
        other => {
            tracing::error!(error = %other, "fatal error");
            eprintln!("Error: {}", other);
        }
    }
}
