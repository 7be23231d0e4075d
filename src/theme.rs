use ratatui::style::Color;

/// A named color theme. Cycled at runtime with Ctrl+T and persisted in prefs.
pub struct Theme {
  pub name: &'static str,
  pub bg: Color,
  pub fg: Color,
  pub accent: Color,
  pub muted: Color,
  pub border: Color,
  pub status: Color,
  pub error: Color,
  pub star: Color,
  pub highlight_fg: Color,
  pub highlight_bg: Color,
  pub stripe_bg: Color,
  pub key_fg: Color,
  pub key_bg: Color,
}

pub const THEMES: [Theme; 3] = [
  Theme {
    name: "midnight",
    bg: Color::Rgb(16, 18, 28),
    fg: Color::Rgb(214, 219, 230),
    accent: Color::Rgb(130, 170, 255),
    muted: Color::Rgb(110, 118, 140),
    border: Color::Rgb(58, 64, 86),
    status: Color::Rgb(137, 221, 255),
    error: Color::Rgb(240, 113, 120),
    star: Color::Rgb(255, 203, 107),
    highlight_fg: Color::Rgb(16, 18, 28),
    highlight_bg: Color::Rgb(130, 170, 255),
    stripe_bg: Color::Rgb(22, 25, 37),
    key_fg: Color::Rgb(16, 18, 28),
    key_bg: Color::Rgb(110, 118, 140),
  },
  Theme {
    name: "velvet",
    bg: Color::Rgb(24, 16, 28),
    fg: Color::Rgb(228, 217, 230),
    accent: Color::Rgb(224, 132, 188),
    muted: Color::Rgb(132, 112, 140),
    border: Color::Rgb(74, 56, 84),
    status: Color::Rgb(194, 153, 255),
    error: Color::Rgb(255, 121, 121),
    star: Color::Rgb(255, 214, 111),
    highlight_fg: Color::Rgb(24, 16, 28),
    highlight_bg: Color::Rgb(224, 132, 188),
    stripe_bg: Color::Rgb(31, 22, 37),
    key_fg: Color::Rgb(24, 16, 28),
    key_bg: Color::Rgb(132, 112, 140),
  },
  Theme {
    name: "matinee",
    bg: Color::Rgb(28, 25, 16),
    fg: Color::Rgb(232, 226, 205),
    accent: Color::Rgb(255, 183, 77),
    muted: Color::Rgb(140, 130, 104),
    border: Color::Rgb(84, 75, 50),
    status: Color::Rgb(255, 213, 128),
    error: Color::Rgb(229, 115, 115),
    star: Color::Rgb(255, 213, 79),
    highlight_fg: Color::Rgb(28, 25, 16),
    highlight_bg: Color::Rgb(255, 183, 77),
    stripe_bg: Color::Rgb(36, 32, 21),
    key_fg: Color::Rgb(28, 25, 16),
    key_bg: Color::Rgb(140, 130, 104),
  },
];
