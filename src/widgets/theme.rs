//! Light/dark theme with persisted preference

use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Storage key of the saved theme
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Value of the document's `data-theme` attribute
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Toggle button label: the theme you would switch to
    pub fn icon(self) -> &'static str {
        match self {
            Theme::Dark => "☀️",
            Theme::Light => "🌙",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown theme: {0}")]
pub struct ThemeParseError(pub String);

impl FromStr for Theme {
    type Err = ThemeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ThemeParseError(other.to_string())),
        }
    }
}

/// Key/value storage for user preferences
pub trait ThemeStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&self, key: &str, value: &str);
}

#[derive(Debug, Default)]
pub struct MemoryThemeStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryThemeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(self, key: &str, value: &str) -> Self {
        self.save(key, value);
        self
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn save(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

/// Current theme backed by a store
pub struct ThemeController<S> {
    store: S,
    current: Cell<Theme>,
}

impl<S: ThemeStore> ThemeController<S> {
    /// Restore the saved theme; missing or unreadable values mean light
    pub fn new(store: S) -> Self {
        let current = match store.load(THEME_KEY) {
            Some(saved) => saved.parse().unwrap_or_else(|e: ThemeParseError| {
                tracing::debug!("{}, using default", e);
                Theme::default()
            }),
            None => Theme::default(),
        };

        Self {
            store,
            current: Cell::new(current),
        }
    }

    pub fn current(&self) -> Theme {
        self.current.get()
    }

    /// Flip and persist the theme, returning the new one
    pub fn toggle(&self) -> Theme {
        let next = self.current().toggled();
        self.set(next);
        next
    }

    pub fn set(&self, theme: Theme) {
        self.current.set(theme);
        self.store.save(THEME_KEY, theme.as_str());
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
