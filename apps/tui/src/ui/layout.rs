use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};

/// Regions shared by both dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardAreas {
    pub header: Rect,
    pub controls: Rect,
    pub map: Rect,
    pub results: Rect,
    pub footer: Rect,
}

pub fn dashboard_areas(area: Rect) -> DashboardAreas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(10),   // Body
            Constraint::Length(3), // Shortcuts and status
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(34), Constraint::Percentage(66)])
        .split(rows[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(columns[1]);

    DashboardAreas {
        header: rows[0],
        controls: columns[0],
        map: right[0],
        results: right[1],
        footer: rows[2],
    }
}

/// The drawable inside of the bordered map block.
///
/// Mouse clicks are translated against this same rectangle.
pub fn map_canvas(area: Rect) -> Rect {
    dashboard_areas(area).map.inner(Margin::new(1, 1))
}
