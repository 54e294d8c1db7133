use crate::app::expert::{ExpertDashboard, ExpertFocus};
use crate::app::App;
use crate::domain::LocalEvent;
use crate::ui::layout::dashboard_areas;
use crate::ui::screens::common::{render_footer, render_header};
use crate::ui::widgets::map::{render_map, MapWidgetState};
use crate::ui::widgets::results::render_results;
use crate::ui::widgets::theme::Palette;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_expert(app: &App, f: &mut Frame<'_>, palette: &Palette) {
    let Some(dashboard) = app.expert.as_ref() else {
        return;
    };
    let profile = dashboard.variant().profile();
    let areas = dashboard_areas(f.area());

    render_header(f, areas.header, profile.title, profile.tagline, palette);
    render_controls(dashboard, f, areas.controls, palette);
    render_map(
        f,
        areas.map,
        &MapWidgetState {
            view: &dashboard.map_view,
            surface: &dashboard.surface,
            title: "Map",
            focused: dashboard.focus == ExpertFocus::Map,
        },
        palette,
    );
    render_results(f, areas.results, &dashboard.results, palette);
    render_footer(
        app,
        f,
        areas.footer,
        &[("Tab", "Next"), ("Enter", "Select"), ("p", "Predict"), ("Esc", "Models"), ("F1", "Help")],
        palette,
    );
}

fn render_controls(dashboard: &ExpertDashboard, f: &mut Frame<'_>, area: Rect, palette: &Palette) {
    let order = dashboard.focus_order();
    let constraints: Vec<Constraint> = order
        .iter()
        .map(|focus| match focus {
            ExpertFocus::Map => Constraint::Length(5),
            _ => Constraint::Length(4),
        })
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (step, (focus, section)) in order.iter().zip(sections.iter()).enumerate() {
        let focused = dashboard.focus == *focus;
        let (title, lines) = match focus {
            ExpertFocus::Map => (
                format!("Step {}: Select Location", step + 1),
                vec![
                    TextLine::from(vec![
                        Span::styled("Selected: ", Style::default().fg(palette.muted)),
                        Span::styled(dashboard.map_selection.label(), Style::default().fg(palette.text)),
                    ]),
                    TextLine::from(Span::styled(
                        "Click the map or press Enter at the crosshair",
                        Style::default().fg(palette.muted),
                    )),
                ],
            ),
            ExpertFocus::Time => (
                format!("Step {}: Prediction Time", step + 1),
                vec![time_line(dashboard, palette)],
            ),
            ExpertFocus::Event => (
                format!("Step {}: Local Event", step + 1),
                vec![event_line(dashboard.selection.event().unwrap_or_default(), focused, palette)],
            ),
            ExpertFocus::Date => (
                format!("Step {}: Forecast Date", step + 1),
                vec![date_line(dashboard, focused, palette)],
            ),
            ExpertFocus::Submit => (String::new(), vec![submit_line(dashboard, focused, palette)]),
        };

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(palette.block_border(focused)),
            )
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, *section);
    }
}

fn time_line<'a>(dashboard: &ExpertDashboard, palette: &Palette) -> TextLine<'a> {
    let selected = dashboard.selection.prediction_time();
    let spans: Vec<Span<'a>> = dashboard
        .variant()
        .profile()
        .layout
        .time_options
        .iter()
        .map(|option| {
            let style = if *option == selected {
                palette.selected()
            } else {
                Style::default().fg(palette.text)
            };
            Span::styled(format!(" {} ", option.label()), style)
        })
        .collect();
    TextLine::from(spans)
}

fn event_line<'a>(event: LocalEvent, focused: bool, palette: &Palette) -> TextLine<'a> {
    let arrows = Style::default().fg(if focused { palette.focus } else { palette.muted });
    TextLine::from(vec![
        Span::styled("◀ ", arrows),
        Span::styled(
            event.label(),
            Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ▶", arrows),
    ])
}

fn date_line<'a>(dashboard: &ExpertDashboard, focused: bool, palette: &Palette) -> TextLine<'a> {
    let text = if dashboard.date_input.is_empty() && !focused {
        Span::styled("YYYY-MM-DD", Style::default().fg(palette.muted))
    } else {
        Span::styled(dashboard.date_input.clone(), Style::default().fg(palette.text))
    };
    let cursor = if focused { "█" } else { "" };
    let status = if dashboard.selection.selected_date().is_some() {
        Span::styled("  ✓", Style::default().fg(ratatui::style::Color::Green))
    } else {
        Span::raw("")
    };
    TextLine::from(vec![text, Span::styled(cursor, Style::default().fg(palette.focus)), status])
}

fn submit_line<'a>(dashboard: &ExpertDashboard, focused: bool, palette: &Palette) -> TextLine<'a> {
    let style = if dashboard.submit.is_busy() {
        Style::default().fg(palette.muted).add_modifier(Modifier::ITALIC)
    } else if focused {
        palette.selected()
    } else {
        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
    };
    TextLine::from(Span::styled(format!("[ {} ]", dashboard.submit.label()), style))
}
