/// Colors of one selectable look, as `0xRRGGBB` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorTheme {
    pub name: &'static str,
    pub background: u32,
    /// Cells holding a letter.
    pub cell: u32,
    pub empty_cell: u32,
    pub accent_background: u32,
    pub text: u32,
    pub inactive_text: u32,
    pub dim_text: u32,
    pub bright_text: u32,
    pub accent_text: u32,
    pub error_text: u32,
    pub border: u32,
    pub selected_border: u32,
}

pub const DARK: ColorTheme = ColorTheme {
    name: "Dark",
    background: 0x333333,
    cell: 0x404040,
    empty_cell: 0x222222,
    accent_background: 0x996010,
    text: 0xEEEEEE,
    inactive_text: 0xAAAAAA,
    dim_text: 0xCCCCCC,
    bright_text: 0xFFFFFF,
    accent_text: 0xCC8811,
    error_text: 0xFF9999,
    border: 0x606060,
    selected_border: 0xCCCCCC,
};

pub const CYBER: ColorTheme = ColorTheme {
    name: "Cyber",
    background: 0x502780,
    cell: 0x774288,
    empty_cell: 0x402060,
    accent_background: 0x009985,
    text: 0xF0F6F2,
    inactive_text: 0xAAB0AC,
    dim_text: 0xCCD2CE,
    bright_text: 0xFFFFFF,
    accent_text: 0x00FFB0,
    error_text: 0xFFAAAA,
    border: 0x108070,
    selected_border: 0xB0FFE7,
};

pub const SPRING: ColorTheme = ColorTheme {
    name: "Spring",
    background: 0xD2F2D4,
    cell: 0xF0FFF2,
    empty_cell: 0xC0E0C2,
    accent_background: 0xF0E010,
    text: 0x111111,
    inactive_text: 0x444444,
    dim_text: 0x505050,
    bright_text: 0x000000,
    accent_text: 0x999000,
    error_text: 0x772222,
    border: 0xB2D2B4,
    selected_border: 0x224424,
};

pub const LIGHT: ColorTheme = ColorTheme {
    name: "Light",
    background: 0xE0E0E0,
    cell: 0xF5F5F5,
    empty_cell: 0xCCCCCC,
    accent_background: 0xDD9011,
    text: 0x111111,
    inactive_text: 0x444444,
    dim_text: 0x505050,
    bright_text: 0x000000,
    accent_text: 0xAA7010,
    error_text: 0x772222,
    border: 0xBBBBBB,
    selected_border: 0x222222,
};

pub const DEFAULT_INDEX: usize = 0;

/// Selectable color themes, default first.
pub fn themes() -> [ColorTheme; 4] {
    [DARK, CYBER, SPRING, LIGHT]
}

/// Theme at `index`, or the default theme when there is none.
pub fn theme(index: usize) -> ColorTheme {
    themes().get(index).copied().unwrap_or(DARK)
}

/// `index` when it names a theme, otherwise the default index.
pub fn checked_index(index: usize) -> usize {
    if index < themes().len() {
        index
    } else {
        DEFAULT_INDEX
    }
}
