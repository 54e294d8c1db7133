use crate::app::state::HomeEntry;
use crate::app::App;
use crate::ui::screens::common::{menu_line, render_footer, render_header};
use crate::ui::widgets::popup::centered_rect;
use crate::ui::widgets::theme::Palette;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_home(app: &App, f: &mut Frame<'_>, palette: &Palette) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(
        f,
        rows[0],
        "Traffic Prediction Dashboard",
        &format!("Service: {}", app.api_url),
        palette,
    );

    let menu_area = centered_rect(50, 60, rows[1]);
    let mut lines = vec![
        TextLine::from(Span::styled(
            "Predict congestion and speed across the city.",
            Style::default().fg(palette.muted),
        )),
        TextLine::from(""),
    ];
    lines.extend(
        HomeEntry::ALL
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                menu_line(
                    format!("{}. {}", index + 1, entry.label()),
                    index == app.home_index,
                    palette,
                )
            }),
    );

    let menu = Paragraph::new(lines)
        .block(
            Block::default()
                .title("Start")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.accent)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(menu, menu_area);

    render_footer(
        app,
        f,
        rows[2],
        &[("↑/↓", "Select"), ("Enter", "Open"), ("e", "Last model"), ("F1", "Help"), ("q", "Quit")],
        palette,
    );
}
