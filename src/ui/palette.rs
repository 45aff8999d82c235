use crate::data::Theme;
use ratatui::style::Color;

/// Colors for every widget, derived from the active theme each frame. This
/// is the one place theme-aware styling lives; widgets take a `Palette`
/// instead of reading the theme store themselves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    /// Out-of-month padding days, separators, hints.
    pub dim: Color,
    pub header: Color,
    pub event: Color,
    pub selected_fg: Color,
    pub selected_bg: Color,
    pub error: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Palette {
        match theme {
            Theme::Light => Palette {
                bg: Color::White,
                fg: Color::Black,
                dim: Color::Gray,
                header: Color::Blue,
                event: Color::Rgb(21, 101, 192),
                selected_fg: Color::White,
                selected_bg: Color::Blue,
                error: Color::Red,
            },
            Theme::Dark => Palette {
                bg: Color::Rgb(24, 26, 32),
                fg: Color::Rgb(220, 222, 228),
                dim: Color::DarkGray,
                header: Color::Cyan,
                event: Color::Rgb(97, 175, 239),
                selected_fg: Color::Black,
                selected_bg: Color::Cyan,
                error: Color::Rgb(224, 108, 117),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_and_dark_palettes_differ() {
        assert_ne!(
            Palette::for_theme(Theme::Light),
            Palette::for_theme(Theme::Dark)
        );
    }

    #[test]
    fn test_palette_follows_theme_toggle() {
        use crate::data::ThemeStore;
        let mut store = ThemeStore::default();
        let before = Palette::for_theme(store.theme());
        store.toggle();
        let after = Palette::for_theme(store.theme());
        assert_ne!(before, after);
        store.toggle();
        assert_eq!(Palette::for_theme(store.theme()), before);
    }
}
