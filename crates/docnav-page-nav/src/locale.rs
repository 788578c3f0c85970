//! Per-locale theme settings for page navigation.

use serde::{Deserialize, Serialize};

/// Hint labels shown above the previous/next links.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaLocales {
    /// Label of the previous link.
    pub prev: String,
    /// Label of the next link.
    pub next: String,
}

impl Default for MetaLocales {
    fn default() -> Self {
        Self {
            prev: "Prev".to_owned(),
            next: "Next".to_owned(),
        }
    }
}

/// Theme settings of one locale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeLocaleSettings {
    /// Show previous links derived from the sidebar.
    pub prev_link: bool,
    /// Show next links derived from the sidebar.
    pub next_link: bool,
    /// Hint labels.
    pub meta_locales: MetaLocales,
}

impl Default for ThemeLocaleSettings {
    fn default() -> Self {
        Self {
            prev_link: true,
            next_link: true,
            meta_locales: MetaLocales::default(),
        }
    }
}
