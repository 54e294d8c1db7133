use crate::map::{MapSurface, MapView};
use crate::ui::widgets::theme::Palette;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

const GRID_DIVISIONS: u32 = 4;

pub struct MapWidgetState<'a> {
    pub view: &'a MapView,
    pub surface: &'a MapSurface,
    pub title: &'a str,
    pub focused: bool,
}

/// Draws the map grid, road polylines, markers and the keyboard crosshair.
pub fn render_map(f: &mut Frame<'_>, area: Rect, map: &MapWidgetState<'_>, palette: &Palette) {
    let view = map.view;
    let [lat_min, lat_max] = view.lat_bounds();
    let [lng_min, lng_max] = view.lng_bounds();

    let block = Block::default()
        .title(map.title)
        .borders(Borders::ALL)
        .border_style(palette.block_border(map.focused));

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([lng_min, lng_max])
        .y_bounds([lat_min, lat_max])
        .paint(|ctx| {
            for i in 1..GRID_DIVISIONS {
                let fraction = f64::from(i) / f64::from(GRID_DIVISIONS);
                let x = fraction.mul_add(view.span_lng, lng_min);
                let y = fraction.mul_add(view.span_lat, lat_min);
                ctx.draw(&CanvasLine {
                    x1: x,
                    y1: lat_min,
                    x2: x,
                    y2: lat_max,
                    color: palette.map_grid,
                });
                ctx.draw(&CanvasLine {
                    x1: lng_min,
                    y1: y,
                    x2: lng_max,
                    y2: y,
                    color: palette.map_grid,
                });
            }
            ctx.layer();

            for line in map.surface.polylines() {
                let color = palette.layer(line.color);
                for pair in line.points.windows(2) {
                    ctx.draw(&CanvasLine {
                        x1: pair[0].lng,
                        y1: pair[0].lat,
                        x2: pair[1].lng,
                        y2: pair[1].lat,
                        color,
                    });
                }
            }
            ctx.layer();

            for marker in map.surface.markers() {
                let color = palette.layer(marker.color);
                ctx.draw(&Circle {
                    x: marker.position.lng,
                    y: marker.position.lat,
                    radius: view.span_lat / 60.0,
                    color,
                });
                ctx.print(
                    marker.position.lng,
                    marker.position.lat,
                    Span::styled("●", Style::default().fg(color)),
                );
            }

            if map.focused {
                ctx.print(
                    view.cursor.lng,
                    view.cursor.lat,
                    Span::styled(
                        "+",
                        Style::default().fg(palette.focus).add_modifier(Modifier::BOLD),
                    ),
                );
            }

            ctx.print(
                lng_min,
                lat_min,
                Span::styled(
                    format!("{:.3}, {:.3}", view.cursor.lat, view.cursor.lng),
                    Style::default().fg(palette.muted),
                ),
            );
        });

    f.render_widget(canvas, area);
}
