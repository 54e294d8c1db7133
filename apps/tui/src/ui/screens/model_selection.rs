use crate::app::App;
use crate::ui::screens::common::{render_footer, render_header};
use crate::ui::widgets::theme::Palette;
use crate::variant::Variant;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_model_selection(app: &App, f: &mut Frame<'_>, palette: &Palette) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(12),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(
        f,
        rows[0],
        "Choose a Prediction Model",
        "Each model answers a different question",
        palette,
    );

    let card_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(rows[1]);

    for (row_index, row) in card_rows.iter().enumerate() {
        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 2); 2])
            .split(*row);
        for (column, area) in cards.iter().enumerate() {
            if let Some(variant) = Variant::from_index(row_index * 2 + column) {
                render_card(f, *area, variant, variant.index() == app.model_index, palette);
            }
        }
    }

    render_footer(
        app,
        f,
        rows[2],
        &[("↑/↓", "Select"), ("Enter/1-6", "Choose"), ("Esc", "Back"), ("F1", "Help")],
        palette,
    );
}

fn render_card(f: &mut Frame<'_>, area: Rect, variant: Variant, selected: bool, palette: &Palette) {
    let profile = variant.profile();
    let title_style = if selected {
        palette.selected()
    } else {
        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
    };

    let lines = vec![
        TextLine::from(Span::styled(profile.title, title_style)),
        TextLine::from(Span::styled(profile.tagline, Style::default().fg(palette.text))),
    ];

    let card = Paragraph::new(lines)
        .block(
            Block::default()
                .title(format!(" {} ", variant.index() + 1))
                .borders(Borders::ALL)
                .border_style(palette.block_border(selected)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(card, area);
}
