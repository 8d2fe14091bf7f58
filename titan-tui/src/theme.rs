//! Dark terminal palette and shared styles.
//!
//! # Color Palette
//! - **Accent**: Electric blue (focus, primary series)
//! - **Positive**: Emerald (bullish, spectrum bars)
//! - **Negative**: Red (bearish, errors, reflexivity)
//! - **Warning**: Amber (neutral signal, warnings)
//! - **Neutral**: Purple (section headings)
//! - **Muted**: Gray (labels, axes, secondary text)

use ratatui::style::{Color, Modifier, Style};

use titan_core::SignalKind;

pub const ACCENT: Color = Color::Rgb(59, 130, 246);
pub const POSITIVE: Color = Color::Rgb(16, 185, 129);
pub const NEGATIVE: Color = Color::Rgb(239, 68, 68);
pub const WARNING: Color = Color::Rgb(250, 204, 21);
pub const NEUTRAL: Color = Color::Rgb(167, 139, 250);
pub const MUTED: Color = Color::Rgb(107, 114, 128);
pub const TEXT: Color = Color::White;
/// Faint path color so fifty overlapping lines stay readable.
pub const PATH: Color = Color::Rgb(37, 79, 148);

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn text_bold() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

/// Emerald for bullish, red for bearish, amber otherwise.
pub fn signal_color(kind: SignalKind) -> Color {
    match kind {
        SignalKind::Bullish => POSITIVE,
        SignalKind::Bearish => NEGATIVE,
        SignalKind::Neutral => WARNING,
    }
}
