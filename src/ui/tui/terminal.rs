use std::{
    io::{self, Stdout},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, prelude::CrosstermBackend};

use crate::errors::{AppError, Result};

use super::render::{MenuFrame, draw_menu};

/// How often a pending key read looks at the interrupt flag.
const INTERRUPT_CHECK_INTERVAL: Duration = Duration::from_millis(100);

/// Something the session loop can react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Key(KeyCode),
    Interrupt,
}

/// The terminal capabilities the menu needs.
///
/// Implementations own the terminal for their whole lifetime and must give it back
/// in `Drop`, so every exit path out of a session restores the user's shell.
pub trait TerminalSession {
    /// Blocks until the next key press or an interrupt.
    fn next_event(&mut self) -> Result<SessionEvent>;

    /// Replaces the screen contents with `menu`.
    fn draw(&mut self, menu: &MenuFrame) -> Result<()>;
}

/// SIGINT/SIGTERM registration that lives as long as a menu session.
///
/// While held, the first signal only raises the flag so the key read can end the
/// session and restore the terminal; a second one terminates the process. Once
/// dropped, every later signal takes its default action, so a download started
/// after the menu closed can still be stopped.
pub struct InterruptGuard {
    interrupted: Arc<AtomicBool>,
    released: Arc<AtomicBool>,
}

impl InterruptGuard {
    fn unregistered() -> Self {
        Self {
            interrupted: Arc::new(AtomicBool::new(false)),
            released: Arc::new(AtomicBool::new(false)),
        }
    }

    fn pending_event(&self) -> Option<SessionEvent> {
        pending_interrupt(&self.interrupted)
    }
}

impl Drop for InterruptGuard {
    fn drop(&mut self) {
        self.released.store(true, Ordering::SeqCst);
    }
}

/// Registers the termination signals for the duration of a session.
#[cfg(unix)]
pub fn install_interrupt_flag() -> Result<InterruptGuard> {
    use signal_hook::consts::signal::{SIGINT, SIGTERM};

    let guard = InterruptGuard::unregistered();
    for signal in [SIGINT, SIGTERM] {
        // Conditions are checked before the flag below is set, so only a repeat
        // signal (or any signal after release) falls through to the default action.
        signal_hook::flag::register_conditional_default(signal, Arc::clone(&guard.released))?;
        signal_hook::flag::register_conditional_default(
            signal,
            Arc::clone(&guard.interrupted),
        )?;
        signal_hook::flag::register(signal, Arc::clone(&guard.interrupted))?;
    }
    Ok(guard)
}

/// Ctrl+C still arrives as a key event in raw mode, so nothing is registered here.
#[cfg(not(unix))]
pub fn install_interrupt_flag() -> Result<InterruptGuard> {
    Ok(InterruptGuard::unregistered())
}

/// Interrupt event if `flag` has been raised.
fn pending_interrupt(flag: &AtomicBool) -> Option<SessionEvent> {
    flag.load(Ordering::SeqCst).then_some(SessionEvent::Interrupt)
}

/// Maps a raw key press to a session event. Ctrl+C is an interrupt, not a key.
pub fn classify_key(key: KeyEvent) -> SessionEvent {
    match key.code {
        KeyCode::Char('c' | 'C') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            SessionEvent::Interrupt
        }
        code => SessionEvent::Key(code),
    }
}

/// Raw-mode, alternate-screen session on stdout with the cursor hidden.
pub struct CrosstermSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    restored: bool,
    // Dropped after the terminal is restored, which hands signals back.
    interrupts: InterruptGuard,
}

impl CrosstermSession {
    pub fn open(interrupts: InterruptGuard) -> Result<Self> {
        enable_raw_mode()?;

        let setup = execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)
            .and_then(|()| Terminal::new(CrosstermBackend::new(io::stdout())));

        match setup {
            Ok(terminal) => {
                tracing::debug!("terminal session opened");
                Ok(Self {
                    terminal,
                    restored: false,
                    interrupts,
                })
            }
            Err(err) => {
                let _ = restore_terminal();
                Err(AppError::Terminal(err.to_string()))
            }
        }
    }

    /// Hands the terminal back. Safe to call more than once.
    pub fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        tracing::debug!("terminal session restored");
        restore_terminal()
    }
}

impl TerminalSession for CrosstermSession {
    fn next_event(&mut self) -> Result<SessionEvent> {
        loop {
            if let Some(interrupt) = self.interrupts.pending_event() {
                return Ok(interrupt);
            }

            if event::poll(INTERRUPT_CHECK_INTERVAL)?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                return Ok(classify_key(key));
            }
        }
    }

    fn draw(&mut self, menu: &MenuFrame) -> Result<()> {
        self.terminal.draw(|f| draw_menu(f, menu))?;
        Ok(())
    }
}

impl Drop for CrosstermSession {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            tracing::warn!(error = %e, "failed to restore terminal");
        }
    }
}

/// Best-effort restore: tries every step even if one fails.
fn restore_terminal() -> io::Result<()> {
    let mut first_err: Option<io::Error> = None;

    if let Err(err) = disable_raw_mode() {
        first_err.get_or_insert(err);
    }
    if let Err(err) = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show) {
        first_err.get_or_insert(err);
    }

    match first_err {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_c_is_an_interrupt() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(classify_key(key), SessionEvent::Interrupt);
    }

    #[test]
    fn test_plain_c_is_a_key() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        assert_eq!(classify_key(key), SessionEvent::Key(KeyCode::Char('c')));
    }

    #[test]
    fn test_arrow_keys_pass_through() {
        for code in [KeyCode::Up, KeyCode::Down, KeyCode::Left, KeyCode::Right] {
            let key = KeyEvent::new(code, KeyModifiers::NONE);
            assert_eq!(classify_key(key), SessionEvent::Key(code));
        }
    }

    #[test]
    fn test_shifted_quit_key_passes_through() {
        let key = KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::SHIFT);
        assert_eq!(classify_key(key), SessionEvent::Key(KeyCode::Char('Q')));
    }

    #[test]
    fn test_raised_flag_is_a_pending_interrupt() {
        let flag = AtomicBool::new(true);
        assert_eq!(pending_interrupt(&flag), Some(SessionEvent::Interrupt));
    }

    #[test]
    fn test_lowered_flag_keeps_waiting() {
        let flag = AtomicBool::new(false);
        assert_eq!(pending_interrupt(&flag), None);
    }

    #[test]
    fn test_guard_reports_raised_flag() {
        let guard = InterruptGuard::unregistered();
        assert_eq!(guard.pending_event(), None);

        guard.interrupted.store(true, Ordering::SeqCst);
        assert_eq!(guard.pending_event(), Some(SessionEvent::Interrupt));
    }

    #[test]
    fn test_dropping_guard_releases_signals() {
        let guard = InterruptGuard::unregistered();
        let released = Arc::clone(&guard.released);
        assert!(!released.load(Ordering::SeqCst));

        drop(guard);
        assert!(released.load(Ordering::SeqCst));
    }

    /// Set in the re-executed test binary that actually receives the signals.
    #[cfg(unix)]
    const SIGNAL_CHILD_ENV: &str = "YTDLP_QUALITY_PICKER_SIGNAL_CHILD";

    /// A SIGTERM during the session only raises the flag; one after the session
    /// has released its guard terminates the process. Signals are raised in a
    /// re-executed copy of this test so the test runner itself survives.
    #[cfg(unix)]
    #[test]
    fn test_sigterm_after_session_terminates_process() {
        use signal_hook::consts::signal::SIGTERM;
        use std::os::unix::process::ExitStatusExt;
        use std::process::Command;

        if std::env::var_os(SIGNAL_CHILD_ENV).is_some() {
            let guard = install_interrupt_flag().unwrap();
            signal_hook::low_level::raise(SIGTERM).unwrap();
            assert_eq!(guard.pending_event(), Some(SessionEvent::Interrupt));
            println!("flag-raised");

            drop(guard);
            signal_hook::low_level::raise(SIGTERM).unwrap();
            std::thread::sleep(Duration::from_millis(500));
            println!("still-alive");
            std::process::exit(3);
        }

        let output = Command::new(std::env::current_exe().unwrap())
            .args([
                "--exact",
                "ui::tui::terminal::tests::test_sigterm_after_session_terminates_process",
                "--nocapture",
                "--test-threads=1",
            ])
            .env(SIGNAL_CHILD_ENV, "1")
            .output()
            .unwrap();

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("flag-raised"), "child output: {}", stdout);
        assert!(!stdout.contains("still-alive"), "child output: {}", stdout);
        assert_eq!(output.status.signal(), Some(SIGTERM));
    }
}
