use crate::settings::ColorTheme;
use ratatui::style::{Color, Modifier, Style};

fn rgb(value: u32) -> Color {
    Color::Rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)
}

/// Terminal styles derived from a color theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub base: Style,
    pub empty_cell: Style,
    pub letter: Style,
    pub new_letter: Style,
    pub selected: Style,
    pub link: Style,
    pub title: Style,
    pub border: Style,
    pub active_border: Style,
    pub notice: Style,
    pub error: Style,
    pub message: Style,
    pub game_over: Style,
}

impl Palette {
    pub fn new(theme: &ColorTheme) -> Self {
        let accent = Style::default()
            .fg(rgb(theme.accent_text))
            .add_modifier(Modifier::BOLD);
        Palette {
            base: Style::default().fg(rgb(theme.text)).bg(rgb(theme.background)),
            empty_cell: Style::default()
                .fg(rgb(theme.inactive_text))
                .bg(rgb(theme.empty_cell)),
            letter: Style::default().fg(rgb(theme.text)).bg(rgb(theme.cell)),
            new_letter: Style::default()
                .fg(rgb(theme.bright_text))
                .bg(rgb(theme.accent_background))
                .add_modifier(Modifier::BOLD),
            selected: accent.bg(rgb(theme.cell)),
            link: Style::default().fg(rgb(theme.accent_text)),
            title: accent,
            border: Style::default().fg(rgb(theme.border)),
            active_border: Style::default().fg(rgb(theme.selected_border)),
            notice: Style::default().fg(rgb(theme.dim_text)),
            error: Style::default().fg(rgb(theme.error_text)),
            message: Style::default().fg(rgb(theme.accent_text)),
            game_over: Style::default()
                .fg(rgb(theme.bright_text))
                .add_modifier(Modifier::BOLD),
        }
    }
}
