use ratatui::style::{Color, Style};

use crate::errors::Result;
use crate::models::NoteColor;
use crate::store::{DARK_MODE_KEY, Store};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Colors for the whole frame in one mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub base: Style,
    pub accent: Color,
    pub muted: Color,
    pub note_text: Color,
}

impl Theme {
    /// Only the stored string `"true"` selects dark mode.
    pub fn load(store: &Store) -> Result<Theme> {
        let theme = match store.get(DARK_MODE_KEY)?.as_deref() {
            Some("true") => Theme::Dark,
            _ => Theme::Light,
        };
        tracing::debug!(?theme, "initial theme");

        Ok(theme)
    }

    pub fn toggle(&mut self, store: &Store) -> Result<Theme> {
        *self = match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        };
        store.set(DARK_MODE_KEY, if self.is_dark() { "true" } else { "false" })?;
        tracing::debug!(theme = ?self, "toggled theme");

        Ok(*self)
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    /// Label of the toggle button: the mode one press would switch to.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Light => "Dark Mode",
            Theme::Dark => "Light Mode",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                base: Style::new().fg(Color::Black).bg(Color::White),
                accent: Color::Blue,
                muted: Color::Gray,
                note_text: Color::Black,
            },
            Theme::Dark => Palette {
                base: Style::new().fg(Color::White).bg(Color::Black),
                accent: Color::Yellow,
                muted: Color::DarkGray,
                note_text: Color::Black,
            },
        }
    }

    pub fn note_background(self, color: NoteColor) -> Color {
        match (self, color) {
            (Theme::Light, NoteColor::Yellow) => Color::Rgb(255, 242, 117),
            (Theme::Light, NoteColor::Blue) => Color::Rgb(157, 214, 255),
            (Theme::Light, NoteColor::Pink) => Color::Rgb(255, 179, 222),
            (Theme::Dark, NoteColor::Yellow) => Color::Rgb(201, 184, 62),
            (Theme::Dark, NoteColor::Blue) => Color::Rgb(84, 140, 186),
            (Theme::Dark, NoteColor::Pink) => Color::Rgb(186, 104, 150),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_flag_is_light() {
        let store = Store::in_memory().unwrap();
        assert_eq!(Theme::load(&store).unwrap(), Theme::Light);
        store.set(DARK_MODE_KEY, "yes").unwrap();
        assert_eq!(Theme::load(&store).unwrap(), Theme::Light);
    }

    #[test]
    fn toggle_persists_flag_and_flips_label() {
        let store = Store::in_memory().unwrap();
        let mut theme = Theme::load(&store).unwrap();
        assert_eq!(theme.toggle_label(), "Dark Mode");

        assert_eq!(theme.toggle(&store).unwrap(), Theme::Dark);
        assert_eq!(store.get(DARK_MODE_KEY).unwrap().as_deref(), Some("true"));
        assert_eq!(theme.toggle_label(), "Light Mode");
        assert_eq!(Theme::load(&store).unwrap(), Theme::Dark);
    }

    #[test]
    fn double_toggle_restores_state() {
        let store = Store::in_memory().unwrap();
        store.set(DARK_MODE_KEY, "true").unwrap();
        let mut theme = Theme::load(&store).unwrap();
        let label = theme.toggle_label();

        theme.toggle(&store).unwrap();
        assert_eq!(store.get(DARK_MODE_KEY).unwrap().as_deref(), Some("false"));
        theme.toggle(&store).unwrap();

        assert_eq!(theme, Theme::Dark);
        assert_eq!(theme.toggle_label(), label);
        assert_eq!(store.get(DARK_MODE_KEY).unwrap().as_deref(), Some("true"));
    }
}
