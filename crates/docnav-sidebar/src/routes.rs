//! Route metadata lookup.
//!
//! Bare sidebar paths and frontmatter link strings carry no display text, so
//! the text and icon come from the pages the router knows about. The
//! [`RouteSource`] trait abstracts that lookup; [`RouteTable`] is the
//! in-memory implementation loaded from the site's generated route data.
//!
//! # Route Data Format
//!
//! ```json
//! {
//!     "/guide/": {"title": "Guide"},
//!     "/guide/intro.html": {
//!         "title": "Introduction",
//!         "shortTitle": "Intro",
//!         "icon": "book",
//!         "headers": [{"level": 2, "title": "Setup", "slug": "setup"}]
//!     }
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::DataError;

/// Heading of a page, as extracted by the site build.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageHeader {
    /// Heading level (2 for `##`).
    pub level: u8,
    /// Heading text.
    pub title: String,
    /// Anchor slug.
    pub slug: String,
    /// Nested headings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PageHeader>,
}

/// Metadata of a routable page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Full page title.
    pub title: String,
    /// Short title used in the sidebar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_title: Option<String>,
    /// Page icon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Page headings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<PageHeader>,
}

impl PageInfo {
    /// Page info with only a title.
    #[must_use]
    pub fn titled(title: &str) -> Self {
        Self {
            title: title.to_owned(),
            short_title: None,
            icon: None,
            headers: Vec::new(),
        }
    }
}

/// Source of page metadata keyed by route path.
pub trait RouteSource {
    /// Look up a page by normalized route path (no query or hash).
    fn page(&self, path: &str) -> Option<&PageInfo>;
}

/// In-memory route table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteTable {
    pages: HashMap<String, PageInfo>,
}

impl RouteTable {
    /// Parse a route table from JSON.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Load a route table from a JSON file.
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let content = std::fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content).map_err(|source| DataError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Register a page under a route path.
    pub fn insert(&mut self, path: &str, page: PageInfo) {
        self.pages.insert(path.to_owned(), page);
    }

    /// Number of known routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Check if no routes are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl RouteSource for RouteTable {
    fn page(&self, path: &str) -> Option<&PageInfo> {
        self.pages.get(path)
    }
}
