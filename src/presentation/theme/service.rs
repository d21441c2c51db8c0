use ratatui::style::{Color, Modifier, Style};

use crate::infrastructure::config::ThemeName;

/// Palette of a named theme, as hex strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColors {
    pub background: &'static str,
    pub auxiliary_background: &'static str,
    pub title_text: &'static str,
    pub body_text: &'static str,
    pub auxiliary_text: &'static str,
    pub tint: &'static str,
    pub border: &'static str,
}

impl ThemeColors {
    #[must_use]
    pub const fn for_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Light => Self {
                background: "#ffffff",
                auxiliary_background: "#efeff4",
                title_text: "#0d0e12",
                body_text: "#2f343d",
                auxiliary_text: "#9ca2a8",
                tint: "#1d74f5",
                border: "#e1e5e8",
            },
            ThemeName::Dark => Self {
                background: "#030b1b",
                auxiliary_background: "#07152a",
                title_text: "#f9f9f9",
                body_text: "#e8ebed",
                auxiliary_text: "#9297a2",
                tint: "#1d74f5",
                border: "#0f213d",
            },
            ThemeName::Black => Self {
                background: "#000000",
                auxiliary_background: "#080808",
                title_text: "#f9f9f9",
                body_text: "#e8ebed",
                auxiliary_text: "#b2b8c6",
                tint: "#1e9bfe",
                border: "#1f2329",
            },
        }
    }
}

/// Resolved terminal styles for a theme.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub accent: Color,
    pub base_style: Style,
    pub title_style: Style,
    pub auxiliary_style: Style,
    pub field_style: Style,
    pub border_style: Style,
    pub focused_border_style: Style,
    pub selection_style: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeName::default())
    }
}

impl Theme {
    #[must_use]
    pub fn new(name: ThemeName) -> Self {
        Self::from_colors(&ThemeColors::for_name(name))
    }

    #[must_use]
    pub fn from_colors(colors: &ThemeColors) -> Self {
        let background = parse_color(colors.background);
        let auxiliary_background = parse_color(colors.auxiliary_background);
        let accent = parse_color(colors.tint);

        Self {
            accent,
            base_style: Style::default()
                .bg(background)
                .fg(parse_color(colors.body_text)),
            title_style: Style::default()
                .fg(parse_color(colors.title_text))
                .add_modifier(Modifier::BOLD),
            auxiliary_style: Style::default().fg(parse_color(colors.auxiliary_text)),
            field_style: Style::default()
                .bg(auxiliary_background)
                .fg(parse_color(colors.body_text)),
            border_style: Style::default().fg(parse_color(colors.border)),
            focused_border_style: Style::default().fg(accent),
            selection_style: Style::default().bg(accent).fg(background),
        }
    }
}

fn parse_color(s: &str) -> Color {
    parse_hex_color(s).map_or(Color::Reset, |(r, g, b)| Color::Rgb(r, g, b))
}

fn parse_hex_color(s: &str) -> Result<(u8, u8, u8), ()> {
    let s = s.trim_start_matches('#');

    if !s.is_ascii() {
        return Err(());
    }

    if s.len() == 6 {
        let r = u8::from_str_radix(&s[0..2], 16).map_err(|_| ())?;
        let g = u8::from_str_radix(&s[2..4], 16).map_err(|_| ())?;
        let b = u8::from_str_radix(&s[4..6], 16).map_err(|_| ())?;
        Ok((r, g, b))
    } else if s.len() == 3 {
        let r = u8::from_str_radix(&s[0..1].repeat(2), 16).map_err(|_| ())?;
        let g = u8::from_str_radix(&s[1..2].repeat(2), 16).map_err(|_| ())?;
        let b = u8::from_str_radix(&s[2..3].repeat(2), 16).map_err(|_| ())?;
        Ok((r, g, b))
    } else {
        Err(())
    }
}
