//! Keyboard input dispatch.
//!
//! Printable characters always go to the focused field, so control keys are
//! the non-printable ones: Enter runs, Tab switches field, arrows or F1–F3
//! switch view, Esc / Ctrl-C quit.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, View};

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('c') {
            app.running = false;
        }
        return;
    }

    match key.code {
        KeyCode::Esc => app.running = false,
        KeyCode::Enter => {
            app.request_analysis();
        }
        KeyCode::Tab | KeyCode::BackTab => app.focus = app.focus.toggle(),
        KeyCode::Right => app.view = app.view.next(),
        KeyCode::Left => app.view = app.view.prev(),
        KeyCode::F(1) => app.view = View::Market,
        KeyCode::F(2) => app.view = View::MonteCarlo,
        KeyCode::F(3) => app.view = View::Spectrum,
        KeyCode::Backspace => app.pop_char(),
        KeyCode::Char(c) => app.push_char(c),
        _ => {}
    }
}
