use crate::app::roads::{RoadDashboard, RoadFocus, RoadsStatus};
use crate::app::App;
use crate::domain::{PredictionTime, PredictionType};
use crate::ui::layout::dashboard_areas;
use crate::ui::screens::common::{render_footer, render_header};
use crate::ui::widgets::map::{render_map, MapWidgetState};
use crate::ui::widgets::results::render_results;
use crate::ui::widgets::theme::Palette;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

pub fn render_roads(app: &App, f: &mut Frame<'_>, palette: &Palette) {
    let Some(dashboard) = app.roads.as_ref() else {
        return;
    };
    let areas = dashboard_areas(f.area());

    render_header(
        f,
        areas.header,
        "Road Dashboard",
        "Congestion and speed for a chosen road",
        palette,
    );
    render_controls(dashboard, f, areas.controls, palette);
    render_map(
        f,
        areas.map,
        &MapWidgetState {
            view: &dashboard.map_view,
            surface: &dashboard.surface,
            title: "Roads",
            focused: false,
        },
        palette,
    );
    render_results(f, areas.results, &dashboard.results, palette);

    let hints: &[(&str, &str)] = if matches!(dashboard.status, RoadsStatus::Failed(_)) {
        &[("r", "Retry"), ("Esc", "Home"), ("F1", "Help")]
    } else {
        &[("/", "Filter"), ("Tab", "Next"), ("p", "Predict"), ("Esc", "Home"), ("F1", "Help")]
    };
    render_footer(app, f, areas.footer, hints, palette);
}

fn render_controls(dashboard: &RoadDashboard, f: &mut Frame<'_>, area: Rect, palette: &Palette) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),    // Road list
            Constraint::Length(3), // Time
            Constraint::Length(3), // Type
            Constraint::Length(3), // Submit
        ])
        .split(area);

    render_road_list(dashboard, f, sections[0], palette);

    let time_spans = PredictionTime::ALL
        .iter()
        .map(|time| option_span(time.label(), *time == dashboard.prediction_time, palette))
        .collect::<Vec<_>>();
    render_choice(f, sections[1], "Prediction Time", time_spans, dashboard.focus == RoadFocus::Time, palette);

    let type_spans = PredictionType::ALL
        .iter()
        .map(|kind| option_span(kind.label(), *kind == dashboard.prediction_type, palette))
        .collect::<Vec<_>>();
    render_choice(f, sections[2], "Prediction Type", type_spans, dashboard.focus == RoadFocus::Type, palette);

    let focused = dashboard.focus == RoadFocus::Submit;
    let style = if dashboard.submit.is_busy() {
        Style::default().fg(palette.muted).add_modifier(Modifier::ITALIC)
    } else if focused {
        palette.selected()
    } else {
        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
    };
    let submit = Paragraph::new(Span::styled(format!("[ {} ]", dashboard.submit.label()), style)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(palette.block_border(focused)),
    );
    f.render_widget(submit, sections[3]);
}

fn option_span<'a>(label: &'a str, selected: bool, palette: &Palette) -> Span<'a> {
    let style = if selected {
        palette.selected()
    } else {
        Style::default().fg(palette.text)
    };
    Span::styled(format!(" {label} "), style)
}

fn render_choice(
    f: &mut Frame<'_>,
    area: Rect,
    title: &str,
    spans: Vec<Span<'_>>,
    focused: bool,
    palette: &Palette,
) {
    let paragraph = Paragraph::new(TextLine::from(spans)).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(palette.block_border(focused)),
    );
    f.render_widget(paragraph, area);
}

fn render_road_list(dashboard: &RoadDashboard, f: &mut Frame<'_>, area: Rect, palette: &Palette) {
    let focused = dashboard.focus == RoadFocus::Roads;
    let title = if dashboard.filtering || !dashboard.filter.is_empty() {
        format!("Roads (filter: {}{})", dashboard.filter, if dashboard.filtering { "█" } else { "" })
    } else {
        "Roads".to_string()
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(palette.block_border(focused));

    let message = match &dashboard.status {
        RoadsStatus::Loading => Some("Loading roads...".to_string()),
        RoadsStatus::Failed(reason) => Some(reason.clone()),
        RoadsStatus::Loaded if dashboard.roads.is_empty() => Some("No roads available".to_string()),
        RoadsStatus::Loaded => None,
    };
    if let Some(message) = message {
        let paragraph = Paragraph::new(Span::styled(message, Style::default().fg(palette.muted))).block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem<'_>> = dashboard
        .visible_roads()
        .into_iter()
        .filter_map(|index| {
            let road = dashboard.roads.get(index)?;
            let marker = if dashboard.selected == Some(index) { "● " } else { "  " };
            Some(ListItem::new(TextLine::from(vec![
                Span::styled(marker, Style::default().fg(palette.focus)),
                Span::styled(road.name.as_str(), Style::default().fg(palette.text)),
            ])))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(palette.selected());
    let mut state = ListState::default();
    state.select(Some(dashboard.list_index));
    f.render_stateful_widget(list, area, &mut state);
}
