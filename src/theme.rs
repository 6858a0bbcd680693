//! Display theme
//!
//! Light or dark, persisted under [`THEME_KEY`] independently of the
//! session. Unknown stored values fall back to light.

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use crate::error::ClientResult;
use crate::storage::{KeyValueStore, THEME_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Value of the `data-theme` attribute and of the stored string
    pub fn as_str(&self) -> &'static str {
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

    /// Toggle button icon: offers the opposite theme
    pub fn icon_class(&self) -> &'static str {
        match self {
            Theme::Dark => "fas fa-sun",
            Theme::Light => "fas fa-moon",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme: {other:?}")),
        }
    }
}

/// Reads and writes the persisted theme
pub struct ThemeStore<S> {
    store: Rc<S>,
}

impl<S> Clone for ThemeStore<S> {
    fn clone(&self) -> Self {
        Self {
            store: Rc::clone(&self.store),
        }
    }
}

impl<S: KeyValueStore> ThemeStore<S> {
    pub fn new(store: Rc<S>) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Theme {
        self.store
            .get(THEME_KEY)
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    pub fn save(&self, theme: Theme) -> ClientResult<()> {
        self.store.set(THEME_KEY, theme.as_str())
    }
}
