// Theme management: one persisted identifier, projected onto a palette.

use crate::store::KeyValueStore;
use crossterm::style::Color;
use log::{info, warn};

pub const THEME_KEY: &str = "preferred-theme";
pub const DEFAULT_THEME: &str = "dark";

/// Identifiers that have a palette and therefore a control in the theme menu.
pub const THEME_IDS: [&str; 4] = ["dark", "light", "matrix", "amber"];

pub struct Palette {
    pub fg: Color,
    pub muted: Color,
    pub accent: Color, // links, prompt glyph
    pub pink: Color,   // featured heading
    pub cyan: Color,   // secondary heading, tags
    pub error: Color,
    pub highlight: Color,
}

pub const DARK: Palette = Palette {
    fg: Color::Rgb { r: 205, g: 214, b: 244 },
    muted: Color::Rgb { r: 108, g: 112, b: 134 },
    accent: Color::Rgb { r: 166, g: 227, b: 161 },
    pink: Color::Rgb { r: 245, g: 194, b: 231 },
    cyan: Color::Rgb { r: 148, g: 226, b: 213 },
    error: Color::Rgb { r: 243, g: 139, b: 168 },
    highlight: Color::Rgb { r: 249, g: 226, b: 175 },
};

pub const LIGHT: Palette = Palette {
    fg: Color::Rgb { r: 76, g: 79, b: 105 },
    muted: Color::Rgb { r: 140, g: 143, b: 161 },
    accent: Color::Rgb { r: 64, g: 160, b: 43 },
    pink: Color::Rgb { r: 234, g: 118, b: 203 },
    cyan: Color::Rgb { r: 23, g: 146, b: 153 },
    error: Color::Rgb { r: 210, g: 15, b: 57 },
    highlight: Color::Rgb { r: 223, g: 142, b: 29 },
};

pub const MATRIX: Palette = Palette {
    fg: Color::Rgb { r: 0, g: 255, b: 65 },
    muted: Color::Rgb { r: 0, g: 143, b: 17 },
    accent: Color::Rgb { r: 0, g: 255, b: 65 },
    pink: Color::Rgb { r: 180, g: 255, b: 180 },
    cyan: Color::Rgb { r: 0, g: 200, b: 120 },
    error: Color::Rgb { r: 255, g: 80, b: 80 },
    highlight: Color::Rgb { r: 220, g: 255, b: 220 },
};

pub const AMBER: Palette = Palette {
    fg: Color::Rgb { r: 255, g: 176, b: 0 },
    muted: Color::Rgb { r: 160, g: 110, b: 0 },
    accent: Color::Rgb { r: 255, g: 204, b: 0 },
    pink: Color::Rgb { r: 255, g: 140, b: 60 },
    cyan: Color::Rgb { r: 255, g: 220, b: 120 },
    error: Color::Rgb { r: 255, g: 90, b: 40 },
    highlight: Color::Rgb { r: 255, g: 235, b: 160 },
};

/// Palette for a theme identifier. Unknown identifiers render as dark.
pub fn palette(theme: &str) -> &'static Palette {
    match theme {
        "light" => &LIGHT,
        "matrix" => &MATRIX,
        "amber" => &AMBER,
        _ => &DARK,
    }
}

/// A theme toggle as shown to the user. `active` is derived from the
/// manager's current theme on every call, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeControl {
    pub id: &'static str,
    pub active: bool,
}

/// Owns the current theme and persists every change through the store.
pub struct ThemeManager<S: KeyValueStore> {
    store: S,
    current: String,
}

impl<S: KeyValueStore> ThemeManager<S> {
    pub fn new(store: S) -> Self {
        ThemeManager {
            store,
            current: DEFAULT_THEME.to_string(),
        }
    }

    /// Apply the persisted theme, or `dark` when nothing (or an empty
    /// string) was saved.
    pub fn init_theme(&mut self) {
        let saved = self
            .store
            .get(THEME_KEY)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_THEME.to_string());
        self.set_theme(&saved);
    }

    /// Any identifier is accepted and stored as given. A failed write is
    /// logged; the theme still applies for this session.
    pub fn set_theme(&mut self, name: &str) {
        self.current = name.to_string();
        match self.store.set(THEME_KEY, name) {
            Ok(()) => info!("event=theme_set theme={name}"),
            Err(e) => warn!("event=theme_persist status=error theme={name} error={e:#}"),
        }
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn palette(&self) -> &'static Palette {
        palette(&self.current)
    }

    pub fn controls(&self) -> Vec<ThemeControl> {
        THEME_IDS
            .iter()
            .map(|&id| ThemeControl {
                id,
                active: id == self.current,
            })
            .collect()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
