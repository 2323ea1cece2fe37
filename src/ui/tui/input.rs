use crossterm::event::KeyCode;

use crate::app_state::OptionModel;

/// Result of handling a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Keep reading input
    Continue,
    /// Download with the current selection
    Confirm,
    /// Quit without downloading
    Cancel,
}

/// Applies one key to the model.
///
/// Up/Down move focus between the two groups, Left/Right move the selection inside
/// the focused group. Both saturate at the ends of their range.
pub fn interpret(key_code: KeyCode, model: &mut OptionModel) -> Action {
    let focus = model.current_focus();

    match key_code {
        KeyCode::Up => {
            model.set_focus(focus.index() as isize - 1);
            Action::Continue
        }
        KeyCode::Down => {
            model.set_focus(focus.index() as isize + 1);
            Action::Continue
        }
        KeyCode::Left => {
            let index = model.current_index(focus) as isize;
            model.set_index(focus, index - 1);
            Action::Continue
        }
        KeyCode::Right => {
            let index = model.current_index(focus) as isize;
            model.set_index(focus, index + 1);
            Action::Continue
        }
        KeyCode::Char('d' | 'D' | 'y' | 'Y') => Action::Confirm,
        KeyCode::Char('q' | 'Q' | 'n' | 'N') => Action::Cancel,
        _ => Action::Continue,
    }
}
