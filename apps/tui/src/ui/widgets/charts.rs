use crate::api::models::Series;
use crate::app::display::ResultChart;
use crate::ui::widgets::theme::Palette;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph,
};
use ratatui::Frame;
use std::f64::consts::TAU;

pub fn render_result_chart(f: &mut Frame<'_>, area: Rect, chart: &ResultChart, palette: &Palette) {
    match chart {
        ResultChart::Forecast(series) => render_forecast(f, area, series, palette),
        ResultChart::FeatureImportance(series) => render_feature_bars(f, area, series, palette),
        ResultChart::Patterns(series) => render_pattern_pie(f, area, series, palette),
    }
}

fn chart_block<'a>(title: &'a str, palette: &Palette) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent))
}

fn render_empty(f: &mut Frame<'_>, area: Rect, title: &str, palette: &Palette) {
    let paragraph = Paragraph::new("No data")
        .block(chart_block(title, palette))
        .alignment(ratatui::layout::Alignment::Center);
    f.render_widget(paragraph, area);
}

/// Line chart of congestion over the forecast's time labels.
pub fn render_forecast(f: &mut Frame<'_>, area: Rect, series: &Series, palette: &Palette) {
    if series.data.is_empty() {
        render_empty(f, area, "Forecast", palette);
        return;
    }

    #[allow(clippy::cast_precision_loss)]
    let points: Vec<(f64, f64)> = series
        .data
        .iter()
        .enumerate()
        .map(|(index, value)| (index as f64, *value))
        .collect();

    let y_max = series.data.iter().copied().fold(0.0_f64, f64::max).max(1.2);
    #[allow(clippy::cast_precision_loss)]
    let x_max = (points.len().saturating_sub(1)).max(1) as f64;

    let first = series.labels.first().cloned().unwrap_or_default();
    let middle = series
        .labels
        .get(series.labels.len() / 2)
        .cloned()
        .unwrap_or_default();
    let last = series.labels.last().cloned().unwrap_or_default();

    let dataset = Dataset::default()
        .name("Predicted Congestion")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(palette.series_color(0)))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(chart_block("24-Hour Forecast", palette))
        .x_axis(
            Axis::default()
                .title("Time")
                .style(Style::default().fg(palette.muted))
                .bounds([0.0, x_max])
                .labels(vec![Span::raw(first), Span::raw(middle), Span::raw(last)]),
        )
        .y_axis(
            Axis::default()
                .title("Level")
                .style(Style::default().fg(palette.muted))
                .bounds([0.0, y_max])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw(format!("{:.1}", y_max / 2.0)),
                    Span::raw(format!("{y_max:.1}")),
                ]),
        );

    f.render_widget(chart, area);
}

/// Horizontal bars of feature weights, shown as percentages.
pub fn render_feature_bars(f: &mut Frame<'_>, area: Rect, series: &Series, palette: &Palette) {
    if series.data.is_empty() {
        render_empty(f, area, "Prediction Factors", palette);
        return;
    }

    let shares = feature_shares(series);
    let longest = shares.iter().copied().max().unwrap_or(0).max(1);

    let bars: Vec<Bar<'_>> = series
        .labels
        .iter()
        .zip(shares)
        .enumerate()
        .map(|(index, (label, percent))| {
            Bar::default()
                .value(percent)
                .label(TextLine::from(label.to_string()))
                .text_value(format!("{percent}%"))
                .style(Style::default().fg(palette.series_color(index)))
                .value_style(
                    Style::default()
                        .fg(palette.selected_fg)
                        .bg(palette.series_color(index))
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(chart_block("Prediction Factors", palette))
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .max(longest)
        .bar_gap(0)
        .bar_width(1);

    f.render_widget(chart, area);
}

/// Pie of pattern shares drawn with radial strokes, legend on the right.
pub fn render_pattern_pie(f: &mut Frame<'_>, area: Rect, series: &Series, palette: &Palette) {
    let total: f64 = series.data.iter().filter(|v| **v > 0.0).sum();
    if total <= 0.0 {
        render_empty(f, area, "Pattern Distribution", palette);
        return;
    }

    let block = chart_block("Pattern Distribution", palette);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let slices = pie_slices(series, total);
    let pie = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-1.0, 1.0])
        .y_bounds([-1.0, 1.0])
        .paint(|ctx| {
            for (index, (start, end)) in slices.iter().enumerate() {
                let color = palette.series_color(index);
                let steps = ((end - start) / TAU * 180.0).ceil().max(1.0);
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                for step in 0..=steps as u32 {
                    let angle = (end - start).mul_add(f64::from(step) / steps, *start);
                    ctx.draw(&CanvasLine {
                        x1: 0.0,
                        y1: 0.0,
                        x2: angle.cos() * 0.9,
                        y2: angle.sin() * 0.9,
                        color,
                    });
                }
            }
        });
    f.render_widget(pie, halves[0]);

    let legend: Vec<TextLine<'_>> = series
        .points()
        .enumerate()
        .map(|(index, (label, value))| {
            TextLine::from(vec![
                Span::styled("■ ", Style::default().fg(palette.series_color(index))),
                Span::styled(
                    format!("{label}: {:.0}%", value / total * 100.0),
                    Style::default().fg(palette.text),
                ),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(legend), halves[1]);
}

/// Start and end angle of each slice, clockwise from twelve o'clock.
fn pie_slices(series: &Series, total: f64) -> Vec<(f64, f64)> {
    let mut start = TAU / 4.0;
    series
        .data
        .iter()
        .map(|value| {
            let sweep = value.max(0.0) / total * TAU;
            let slice = (start - sweep, start);
            start -= sweep;
            slice
        })
        .collect()
}

/// Each weight as a whole percentage of the positive total, whatever scale
/// the service reports in.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn feature_shares(series: &Series) -> Vec<u64> {
    let total: f64 = series.data.iter().filter(|v| **v > 0.0).sum();
    series
        .data
        .iter()
        .map(|value| {
            if total > 0.0 {
                (value.max(0.0) / total * 100.0).round() as u64
            } else {
                0
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_cover_the_full_circle() {
        let series = Series {
            labels: vec!["a".into(), "b".into(), "c".into()],
            data: vec![50.0, 30.0, 20.0],
        };
        let slices = pie_slices(&series, 100.0);
        let swept: f64 = slices.iter().map(|(start, end)| end - start).sum();
        assert!((swept - TAU).abs() < 1e-9);
        assert!((slices[0].1 - TAU / 4.0).abs() < 1e-12);
        assert!((slices[0].0 - slices[1].1).abs() < 1e-12);
    }

    fn weights(data: Vec<f64>) -> Series {
        Series {
            labels: data.iter().map(|v| format!("f{v}")).collect(),
            data,
        }
    }

    #[test]
    fn weights_are_shares_of_their_total() {
        assert_eq!(feature_shares(&weights(vec![45.0, 30.0, 25.0])), vec![45, 30, 25]);
        assert_eq!(feature_shares(&weights(vec![0.6, 0.3, 0.1])), vec![60, 30, 10]);
        assert_eq!(feature_shares(&weights(vec![3.0, 1.0, -2.0])), vec![75, 25, 0]);
        assert_eq!(feature_shares(&weights(vec![0.0, 0.0])), vec![0, 0]);
    }
}
