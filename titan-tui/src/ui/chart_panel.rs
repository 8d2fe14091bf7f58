//! Chart views — market history, Monte Carlo fan, spectrum bars.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Bar, BarChart, BarGroup, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use titan_core::{Series, SpectrumPoint};
use titan_runner::{fmt_usd, AnalysisReport};

use crate::theme;

pub fn render_empty(f: &mut Frame, area: Rect, loading: bool) {
    let msg = if loading {
        "Running analysis..."
    } else {
        "Press Enter to run an analysis."
    };
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(msg, theme::muted())),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

/// Close line on top, reflexivity bars underneath on their own scale.
pub fn render_market(f: &mut Frame, area: Rect, series: &Series) {
    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        render_empty(f, area, false);
        return;
    };

    let halves = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let closes: Vec<(f64, f64)> = series
        .points()
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.close))
        .collect();
    let reflexivity: Vec<(f64, f64)> = series
        .points()
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.reflexivity))
        .collect();

    let x_max = (series.len().saturating_sub(1) as f64).max(1.0);
    let x_labels = vec![
        Span::styled(first.date.format("%m-%d").to_string(), theme::muted()),
        Span::styled(last.date.format("%m-%d").to_string(), theme::muted()),
    ];

    let (y_min, y_max) = padded_bounds(closes.iter().map(|&(_, y)| y));
    let close_chart = Chart::new(vec![Dataset::default()
        .name("close")
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(theme::ACCENT))
        .graph_type(GraphType::Line)
        .data(&closes)])
    .x_axis(
        Axis::default()
            .style(theme::muted())
            .bounds([0.0, x_max])
            .labels(x_labels),
    )
    .y_axis(
        Axis::default()
            .title(Span::styled("Close", theme::muted()))
            .style(theme::muted())
            .bounds([y_min, y_max])
            .labels(vec![
                Span::styled(format!("{y_min:.0}"), theme::muted()),
                Span::styled(format!("{y_max:.0}"), theme::muted()),
            ]),
    );
    f.render_widget(close_chart, halves[0]);

    let r_max = reflexivity
        .iter()
        .map(|&(_, r)| r.abs())
        .fold(0.0_f64, f64::max)
        .max(1e-9);
    let reflex_chart = Chart::new(vec![Dataset::default()
        .name("reflexivity")
        .marker(symbols::Marker::Braille)
        .style(theme::negative())
        .graph_type(GraphType::Bar)
        .data(&reflexivity)])
    .x_axis(Axis::default().style(theme::muted()).bounds([0.0, x_max]))
    .y_axis(
        Axis::default()
            .title(Span::styled("Reflex", theme::muted()))
            .style(theme::muted())
            .bounds([-r_max, r_max])
            .labels(vec![
                Span::styled(format!("{:.2}", -r_max), theme::muted()),
                Span::styled(format!("{r_max:.2}"), theme::muted()),
            ]),
    );
    f.render_widget(reflex_chart, halves[1]);
}

/// Every simulated path as its own faint line.
pub fn render_monte_carlo(f: &mut Frame, area: Rect, report: &AnalysisReport) {
    let ensemble = &report.ensemble;
    let Some((lo, hi)) = ensemble.price_bounds() else {
        render_empty(f, area, false);
        return;
    };

    let lines: Vec<Vec<(f64, f64)>> = ensemble
        .paths
        .iter()
        .map(|path| {
            path.points()
                .iter()
                .map(|p| (p.step as f64, p.price))
                .collect()
        })
        .collect();
    let datasets = lines
        .iter()
        .map(|data| {
            Dataset::default()
                .marker(symbols::Marker::Braille)
                .style(Style::default().fg(theme::PATH))
                .graph_type(GraphType::Line)
                .data(data)
        })
        .collect();

    let (y_min, y_max) = padded_bounds([lo, hi].into_iter());
    let x_max = (ensemble.days as f64).max(1.0);
    let summary = &report.ensemble_summary;

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title(Span::styled("Day", theme::muted()))
                .style(theme::muted())
                .bounds([0.0, x_max])
                .labels(vec![
                    Span::styled("0", theme::muted()),
                    Span::styled(ensemble.days.to_string(), theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(
                    format!("mean {}", fmt_usd(summary.mean_terminal)),
                    theme::muted(),
                ))
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format!("{y_min:.0}"), theme::muted()),
                    Span::styled(format!("{y_max:.0}"), theme::muted()),
                ]),
        );
    f.render_widget(chart, area);
}

/// Amplitude per frequency bin. Bars are integer-valued, so amplitudes are
/// scaled by 100 and the real value is printed on the bar.
pub fn render_spectrum(f: &mut Frame, area: Rect, spectrum: &[SpectrumPoint]) {
    if spectrum.is_empty() {
        render_empty(f, area, false);
        return;
    }

    // One column of gap per bar; bars past the right edge are clipped.
    let n = u16::try_from(spectrum.len()).unwrap_or(u16::MAX).max(1);
    let bar_width = (area.width.saturating_sub(n) / n).max(1);

    let bars: Vec<Bar> = spectrum
        .iter()
        .map(|p| {
            Bar::default()
                .value((p.amplitude.max(0.0) * 100.0).round() as u64)
                .text_value(format!("{:.0}", p.amplitude))
                .label(Line::from(p.frequency.to_string()))
                .style(theme::positive())
        })
        .collect();

    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1)
        .value_style(theme::text_bold())
        .label_style(theme::muted());
    f.render_widget(chart, area);
}

/// Min and max of `values` widened by 5% of the range so lines clear the border.
fn padded_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let padding = ((max - min).abs() * 0.05).max(1e-6);
    (min - padding, max + padding)
}
