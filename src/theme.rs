//! Centralized colors for all UI components.
//!
//! Render code takes a [`Palette`] and never hardcodes `Color::*` values.
//! Two palettes exist, toggled at runtime: a dark one (deep blue background,
//! cyan accents) and a light one.

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn from_dark_mode(dark: bool) -> Self {
        if dark { ThemeMode::Dark } else { ThemeMode::Light }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn palette(self) -> &'static Palette {
        match self {
            ThemeMode::Light => &LIGHT,
            ThemeMode::Dark => &DARK,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub text: Color,
    pub text_dim: Color,
    pub background: Color,
    pub surface: Color,
    pub accent: Color,
    pub border_focused: Color,
    pub border_unfocused: Color,
    pub selection_fg: Color,
    pub selection_bg: Color,
    pub header_fg: Color,
    pub header_bg: Color,
    pub category: Color,
    pub checked: Color,
    pub error: Color,
    pub warning: Color,
    pub hint_key: Color,
}

pub const DARK: Palette = Palette {
    text: Color::Rgb(236, 236, 244),
    text_dim: Color::Rgb(130, 133, 158),
    background: Color::Rgb(26, 26, 46),
    surface: Color::Rgb(35, 35, 58),
    accent: Color::Rgb(0, 217, 255),
    border_focused: Color::Rgb(0, 217, 255),
    border_unfocused: Color::Rgb(90, 92, 119),
    selection_fg: Color::Rgb(26, 26, 46),
    selection_bg: Color::Rgb(0, 217, 255),
    header_fg: Color::Rgb(236, 236, 244),
    header_bg: Color::Rgb(55, 55, 85),
    category: Color::Rgb(255, 184, 108),
    checked: Color::Rgb(90, 92, 119),
    error: Color::Rgb(224, 108, 117),
    warning: Color::Rgb(255, 217, 61),
    hint_key: Color::Rgb(189, 147, 249),
};

pub const LIGHT: Palette = Palette {
    text: Color::Rgb(33, 37, 41),
    text_dim: Color::Rgb(108, 117, 125),
    background: Color::Rgb(250, 250, 250),
    surface: Color::Rgb(238, 240, 243),
    accent: Color::Rgb(13, 110, 253),
    border_focused: Color::Rgb(13, 110, 253),
    border_unfocused: Color::Rgb(173, 181, 189),
    selection_fg: Color::Rgb(255, 255, 255),
    selection_bg: Color::Rgb(13, 110, 253),
    header_fg: Color::Rgb(255, 255, 255),
    header_bg: Color::Rgb(25, 135, 84),
    category: Color::Rgb(25, 135, 84),
    checked: Color::Rgb(173, 181, 189),
    error: Color::Rgb(220, 53, 69),
    warning: Color::Rgb(204, 140, 0),
    hint_key: Color::Rgb(111, 66, 193),
};

impl Palette {
    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn border(&self, focused: bool) -> Style {
        let color = if focused {
            self.border_focused
        } else {
            self.border_unfocused
        };
        Style::default().fg(color)
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.selection_fg)
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn checked_item(&self) -> Style {
        Style::default()
            .fg(self.checked)
            .add_modifier(Modifier::CROSSED_OUT)
    }
}

/// Shared cursor style for text inputs.
pub const CURSOR: Style = Style::new().add_modifier(Modifier::REVERSED);
