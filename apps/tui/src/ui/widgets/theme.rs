use crate::domain::Theme;
use crate::map::LayerColor;
use ratatui::style::{Color, Modifier, Style};

/// Colors for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub focus: Color,
    pub selected_fg: Color,
    pub selected_bg: Color,
    pub map_grid: Color,
    pub map_default: Color,
    pub error: Color,
    pub series: [Color; 6],
}

pub const fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette {
            text: Color::White,
            muted: Color::Gray,
            accent: Color::Cyan,
            border: Color::DarkGray,
            focus: Color::Yellow,
            selected_fg: Color::Black,
            selected_bg: Color::Cyan,
            map_grid: Color::DarkGray,
            map_default: Color::Rgb(0x34, 0x98, 0xdb),
            error: Color::LightRed,
            series: [
                Color::Rgb(0xe9, 0x45, 0x60),
                Color::Rgb(0x0f, 0x9b, 0xd8),
                Color::Rgb(0xf5, 0xa6, 0x23),
                Color::Rgb(0x2e, 0xcc, 0x71),
                Color::Rgb(0x9b, 0x59, 0xb6),
                Color::Rgb(0x1a, 0xbc, 0x9c),
            ],
        },
        Theme::Light => Palette {
            text: Color::Black,
            muted: Color::DarkGray,
            accent: Color::Blue,
            border: Color::Gray,
            focus: Color::Magenta,
            selected_fg: Color::White,
            selected_bg: Color::Blue,
            map_grid: Color::Gray,
            map_default: Color::Rgb(0x1f, 0x4e, 0x79),
            error: Color::Red,
            series: [
                Color::Rgb(0xc0, 0x39, 0x2b),
                Color::Rgb(0x29, 0x80, 0xb9),
                Color::Rgb(0xd3, 0x54, 0x00),
                Color::Rgb(0x27, 0xae, 0x60),
                Color::Rgb(0x8e, 0x44, 0xad),
                Color::Rgb(0x16, 0xa0, 0x85),
            ],
        },
    }
}

impl Palette {
    pub const fn layer(&self, color: LayerColor) -> Color {
        match color {
            LayerColor::Default => self.map_default,
            LayerColor::Highlight => self.focus,
            LayerColor::Green => Color::Green,
            LayerColor::Orange => Color::Rgb(0xff, 0xa5, 0x00),
            LayerColor::Red => Color::Red,
        }
    }

    pub const fn series_color(&self, index: usize) -> Color {
        self.series[index % self.series.len()]
    }

    pub fn block_border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.focus)
        } else {
            Style::default().fg(self.border)
        }
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.selected_fg)
            .bg(self.selected_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn key_hint(&self) -> Style {
        Style::default().fg(self.focus).add_modifier(Modifier::BOLD)
    }
}
