use crate::ui::widgets::theme::Palette;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::Buffer;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget, Wrap};
use ratatui::Frame;

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1]);

    horizontal_layout[1]
}

pub struct ClearWidget;

impl Widget for ClearWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        ratatui::widgets::Clear.render(area, buf);
    }
}

/// Modal message that must be dismissed before anything else responds.
pub fn render_alert(f: &mut Frame<'_>, message: &str, palette: &Palette) {
    let area = centered_rect(50, 20, f.area());
    f.render_widget(ClearWidget, area);

    let text = vec![
        TextLine::from(""),
        TextLine::from(Span::styled(
            message.to_string(),
            Style::default().fg(palette.error).add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        TextLine::from(vec![
            Span::styled("Enter", palette.key_hint()),
            Span::raw(" to dismiss"),
        ]),
    ];

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .title("Notice")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.error)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

const HELP_ENTRIES: [(&str, &str); 14] = [
    ("F1", "Toggle this help"),
    ("q", "Quit"),
    ("t", "Toggle dark/light theme"),
    ("Esc", "Back"),
    ("Tab / Shift+Tab", "Move between controls"),
    ("Arrows", "Move the map crosshair or change a choice"),
    ("Enter / Space", "Place the marker or activate the control"),
    ("Mouse click", "Select a location or road on the map"),
    ("+ / -", "Zoom the map"),
    ("p", "Submit the prediction"),
    ("0-9 and -", "Type the forecast date (YYYY-MM-DD)"),
    ("/", "Filter roads by name"),
    ("r", "Retry loading roads"),
    ("1-6", "Pick a model on the selection screen"),
];

pub fn render_help(f: &mut Frame<'_>, palette: &Palette) {
    let area = centered_rect(60, 70, f.area());
    f.render_widget(ClearWidget, area);

    let lines: Vec<TextLine<'_>> = HELP_ENTRIES
        .iter()
        .map(|(key, action)| {
            TextLine::from(vec![
                Span::styled(format!("{key:>16}"), palette.key_hint()),
                Span::raw("  "),
                Span::styled(*action, Style::default().fg(palette.text)),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title("Help")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.accent)),
    );
    f.render_widget(paragraph, area);
}
