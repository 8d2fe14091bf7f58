//! Top-level UI layout — controls and metric cards on the left, the active
//! view on the right, status bar along the bottom.

pub mod chart_panel;
pub mod control_panel;
pub mod metrics_panel;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use ratatui::Frame;

use crate::app::{AppState, View};
use crate::theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_header(f, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(20)])
        .split(rows[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(6)])
        .split(columns[0]);
    control_panel::render(f, left[0], app);
    metrics_panel::render(f, left[1], app);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(columns[1]);
    draw_view_bar(f, right[0], app);
    draw_view(f, right[1], app);

    status_bar::render(f, rows[2], app);
}

fn draw_header(f: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(" Q-FUND ", theme::text_bold()),
        Span::styled("TITAN", theme::accent_bold()),
        Span::styled("   SYNTHETIC DATA", theme::muted()),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

/// Ticker of the displayed report on the left, view tabs on the right.
fn draw_view_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(false));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(28)])
        .split(inner);

    let ticker = app
        .report
        .as_ref()
        .map(|r| r.ticker.as_str())
        .unwrap_or(app.ticker_input.as_str());
    f.render_widget(
        Paragraph::new(Span::styled(format!(" {ticker}"), theme::text_bold())),
        halves[0],
    );

    let tabs = Tabs::new(View::ALL.iter().map(|v| v.label()))
        .select(app.view.index())
        .style(theme::muted())
        .highlight_style(theme::text_bold())
        .divider(" ");
    f.render_widget(tabs, halves[1]);
}

fn draw_view(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" {} ", app.view.label()))
        .title_style(theme::panel_title(true));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(report) = &app.report else {
        chart_panel::render_empty(f, inner, app.loading);
        return;
    };
    match app.view {
        View::Market => chart_panel::render_market(f, inner, &report.series),
        View::MonteCarlo => chart_panel::render_monte_carlo(f, inner, report),
        View::Spectrum => chart_panel::render_spectrum(f, inner, &report.spectrum),
    }
}
