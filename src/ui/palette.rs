use ratatui::style::Color;

/// Colors used across the UI.
#[derive(Clone, Copy, Debug)]
pub struct Palette {
    /// Canvas background.
    pub base: Color,
    /// Darkest shade, used for text on highlights.
    pub crust: Color,
    /// Panel borders.
    pub surface2: Color,
    /// Muted labels.
    pub overlay1: Color,
    /// Primary text.
    pub text: Color,
    /// Secondary text.
    pub subtext0: Color,
    /// Focus accent.
    pub sapphire: Color,
    /// Headings.
    pub mauve: Color,
    /// Ratings and success messages.
    pub green: Color,
    /// Episode counts and warnings.
    pub yellow: Color,
    /// Failure notices.
    pub red: Color,
    /// Selection background.
    pub lavender: Color,
}

/// Catppuccin Mocha.
pub const MOCHA: Palette = Palette {
    base: Color::Rgb(0x1e, 0x1e, 0x2e),
    crust: Color::Rgb(0x11, 0x11, 0x1b),
    surface2: Color::Rgb(0x58, 0x5b, 0x70),
    overlay1: Color::Rgb(0x7f, 0x84, 0x9c),
    text: Color::Rgb(0xcd, 0xd6, 0xf4),
    subtext0: Color::Rgb(0xa6, 0xad, 0xc8),
    sapphire: Color::Rgb(0x74, 0xc7, 0xec),
    mauve: Color::Rgb(0xcb, 0xa6, 0xf7),
    green: Color::Rgb(0xa6, 0xe3, 0xa1),
    yellow: Color::Rgb(0xf9, 0xe2, 0xaf),
    red: Color::Rgb(0xf3, 0x8b, 0xa8),
    lavender: Color::Rgb(0xb4, 0xbe, 0xfe),
};

/// Active palette.
#[must_use]
pub const fn theme() -> Palette {
    MOCHA
}
