use crate::app::App;
use crate::ui::widgets::theme::Palette;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use throbber_widgets_tui::Throbber;

pub fn render_header(f: &mut Frame<'_>, area: Rect, title: &str, subtitle: &str, palette: &Palette) {
    let header = Paragraph::new(TextLine::from(vec![
        Span::styled(
            title.to_string(),
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {subtitle}"), Style::default().fg(palette.muted)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.accent)),
    )
    .alignment(Alignment::Left);

    f.render_widget(header, area);
}

/// Status line, spinner while busy, and key hints.
pub fn render_footer(
    app: &App,
    f: &mut Frame<'_>,
    area: Rect,
    hints: &[(&str, &str)],
    palette: &Palette,
) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(palette.border));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(inner);

    if app.is_busy() {
        let throbber = Throbber::default()
            .label("Working...")
            .style(Style::default().fg(palette.text))
            .throbber_style(Style::default().fg(palette.accent).add_modifier(Modifier::BOLD));
        let mut state = app.spinner.clone();
        f.render_stateful_widget(throbber, columns[0], &mut state);
    } else {
        let status = Paragraph::new(Span::styled(
            app.status_message.as_str(),
            Style::default().fg(palette.muted),
        ));
        f.render_widget(status, columns[0]);
    }

    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, action) in hints {
        spans.push(Span::styled(*key, palette.key_hint()));
        spans.push(Span::styled(format!(": {action}  "), Style::default().fg(palette.muted)));
    }
    f.render_widget(
        Paragraph::new(TextLine::from(spans)).alignment(Alignment::Right),
        columns[1],
    );
}

/// A menu row, highlighted when selected.
pub fn menu_line<'a>(text: String, selected: bool, palette: &Palette) -> TextLine<'a> {
    if selected {
        TextLine::from(Span::styled(format!("> {text}"), palette.selected()))
    } else {
        TextLine::from(Span::styled(format!("  {text}"), Style::default().fg(palette.text)))
    }
}
