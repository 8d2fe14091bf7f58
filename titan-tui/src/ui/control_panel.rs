//! System control — ticker and capital inputs plus the EXECUTE button.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{AppState, Focus};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(" System Control ")
        .title_style(theme::panel_title(true));

    let lines = vec![
        Line::from(Span::styled("TICKER", theme::muted())),
        field(&app.ticker_input, app.focus == Focus::Ticker),
        Line::from(Span::styled("CAPITAL", theme::muted())),
        field(&app.capital_input, app.focus == Focus::Capital),
        Line::from(""),
        button(app.loading),
    ];

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn field(value: &str, focused: bool) -> Line<'static> {
    if focused {
        Line::from(vec![
            Span::styled("> ", theme::accent_bold()),
            Span::styled(value.to_string(), theme::text_bold()),
            Span::styled("_", theme::accent()),
        ])
    } else {
        Line::from(vec![
            Span::raw("  "),
            Span::styled(value.to_string(), Style::default().fg(theme::TEXT)),
        ])
    }
}

fn button(loading: bool) -> Line<'static> {
    let (label, style) = if loading {
        ("[ PROCESSING... ]", theme::warning())
    } else {
        ("[ EXECUTE ]", theme::accent_bold())
    };
    Line::from(Span::styled(label, style)).alignment(Alignment::Center)
}
