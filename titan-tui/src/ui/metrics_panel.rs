//! Metric cards — signal, VaR, Kelly, and the terminal-price spread.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use titan_runner::{fmt_pct, fmt_usd, AnalysisReport};

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(false))
        .title(" Metrics ")
        .title_style(theme::neutral());

    let lines = match &app.report {
        Some(report) => metric_lines(report),
        None => vec![Line::from(Span::styled("No analysis yet.", theme::muted()))],
    };

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn metric_lines(report: &AnalysisReport) -> Vec<Line<'static>> {
    let signal_style = Style::default()
        .fg(theme::signal_color(report.signal.kind))
        .add_modifier(Modifier::BOLD);
    let summary = &report.ensemble_summary;

    vec![
        label("Signal"),
        Line::from(Span::styled(report.signal.kind.label(), signal_style)),
        sub(format!("momentum {}", fmt_pct(report.signal.momentum))),
        Line::from(""),
        label("VaR (95%)"),
        value(fmt_usd(report.risk.var_cash)),
        sub(fmt_pct(report.risk.var_pct)),
        Line::from(""),
        label("Kelly"),
        value(fmt_pct(report.risk.kelly)),
        Line::from(""),
        label(format!("Terminal ({} paths)", summary.path_count)),
        value(fmt_usd(summary.median_terminal)),
        sub(format!(
            "{} .. {}",
            fmt_usd(summary.p05_terminal),
            fmt_usd(summary.p95_terminal)
        )),
        sub(format!("P(below start) {}", fmt_pct(summary.prob_below_start))),
    ]
}

fn label(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(text.into().to_uppercase(), theme::muted()))
}

fn value(text: String) -> Line<'static> {
    Line::from(Span::styled(text, theme::text_bold()))
}

fn sub(text: String) -> Line<'static> {
    Line::from(Span::styled(text, theme::muted()))
}
