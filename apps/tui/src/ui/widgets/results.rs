use crate::app::display::{PanelBody, ResultLine, ResultsPanel};
use crate::ui::widgets::charts::render_result_chart;
use crate::ui::widgets::theme::Palette;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

fn result_line<'a>(line: &'a ResultLine, palette: &Palette) -> TextLine<'a> {
    match line {
        ResultLine::Field {
            label,
            value,
            accent,
        } => {
            let value_style = accent.map_or_else(
                || Style::default().fg(palette.text),
                |(r, g, b)| Style::default().fg(Color::Rgb(r, g, b)).add_modifier(Modifier::BOLD),
            );
            TextLine::from(vec![
                Span::styled(format!("{label}: "), Style::default().fg(palette.muted)),
                Span::styled(value.as_str(), value_style),
            ])
        }
        ResultLine::Headline(text) => TextLine::from(Span::styled(
            text.as_str(),
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        )),
        ResultLine::Text(text) => {
            TextLine::from(Span::styled(text.as_str(), Style::default().fg(palette.text)))
        }
    }
}

pub fn render_results(f: &mut Frame<'_>, area: Rect, panel: &ResultsPanel, palette: &Palette) {
    let block = Block::default()
        .title(panel.heading.as_str())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border));

    let lines: Vec<TextLine<'_>> = match &panel.body {
        PanelBody::Empty => vec![TextLine::from(Span::styled(
            "Results will appear here.",
            Style::default().fg(palette.muted),
        ))],
        PanelBody::Placeholder(text) => vec![TextLine::from(Span::styled(
            text.as_str(),
            Style::default().fg(palette.muted),
        ))],
        PanelBody::Lines(lines) => lines.iter().map(|line| result_line(line, palette)).collect(),
        PanelBody::Error(message) => vec![TextLine::from(Span::styled(
            message.as_str(),
            Style::default().fg(palette.error).add_modifier(Modifier::BOLD),
        ))],
    };

    let Some(chart) = panel.chart.as_ref() else {
        let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
        return;
    };

    let inner = block.inner(area);
    f.render_widget(block, area);

    #[allow(clippy::cast_possible_truncation)]
    let text_height = (lines.len() as u16 + 1).min(inner.height / 2);
    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(text_height), Constraint::Min(3)])
        .split(inner);

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), split[0]);
    render_result_chart(f, split[1], chart, palette);
}
