mod input;
mod render;
mod terminal;

use crate::{
    app_state::{OptionModel, Selection},
    downloader::format::format_descriptor,
    errors::Result,
    utils::link::VideoUrl,
};

use input::{Action, interpret};
use render::render;
pub use terminal::{InterruptGuard, install_interrupt_flag};
use terminal::{CrosstermSession, SessionEvent, TerminalSession};

/// How a menu session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The user asked to download; carries the picked tiers and the yt-dlp selector.
    Confirmed {
        selection: Selection,
        descriptor: String,
    },
    /// The user quit from the menu.
    Cancelled,
    /// An interrupt arrived while waiting for input.
    Interrupted,
}

impl Outcome {
    /// Exit status for outcomes that end the process without downloading.
    pub fn exit_code(&self) -> Option<u8> {
        match self {
            Outcome::Confirmed { .. } => None,
            Outcome::Cancelled => Some(0),
            Outcome::Interrupted => Some(1),
        }
    }
}

/// Runs the read-mutate-render loop on an already open session.
///
/// The model is consumed when the loop ends, so nothing can change the selection
/// after the outcome exists.
pub fn run_session<S: TerminalSession>(session: &mut S, video_url: &VideoUrl) -> Result<Outcome> {
    let mut model = OptionModel::new();

    loop {
        session.draw(&render(&model, video_url.as_str()))?;

        let key_code = match session.next_event()? {
            SessionEvent::Key(key_code) => key_code,
            SessionEvent::Interrupt => {
                tracing::info!("session interrupted");
                return Ok(Outcome::Interrupted);
            }
        };

        match interpret(key_code, &mut model) {
            Action::Continue => {}
            Action::Confirm => return Ok(confirm(model)),
            Action::Cancel => {
                tracing::info!("session cancelled by user");
                return Ok(Outcome::Cancelled);
            }
        }
    }
}

fn confirm(model: OptionModel) -> Outcome {
    let selection = model.selection();
    let descriptor = format_descriptor(&selection);
    tracing::info!(
        video = selection.video.label(),
        audio = selection.audio.label(),
        %descriptor,
        "selection confirmed"
    );
    Outcome::Confirmed {
        selection,
        descriptor,
    }
}

/// Opens a session, runs it, and releases it before returning.
///
/// The session is dropped on every path out of this function (outcome, error or
/// panic), which is what restores the terminal.
pub fn run_scoped<S, F>(open: F, video_url: &VideoUrl) -> Result<Outcome>
where
    S: TerminalSession,
    F: FnOnce() -> Result<S>,
{
    let mut session = open()?;
    run_session(&mut session, video_url)
}

/// Runs the quality menu on the real terminal.
///
/// `interrupts` is released together with the terminal, so termination signals
/// arriving after the menu closes are no longer held back.
pub fn run_tui(video_url: &VideoUrl, interrupts: InterruptGuard) -> Result<Outcome> {
    run_scoped(|| CrosstermSession::open(interrupts), video_url)
}
