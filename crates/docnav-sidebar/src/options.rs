//! Raw sidebar configuration as written by site authors.
//!
//! A sidebar is configured in one of three shapes:
//!
//! ```toml
//! # Derive from the page structure of the current locale
//! sidebar = "structure"
//!
//! # One explicit list for the whole site
//! sidebar = ["/", "/guide/", { text = "API", prefix = "/api/", children = ["a.md", "b.md"] }]
//!
//! # One list per path prefix
//! [sidebar]
//! "/guide/" = ["intro.md", "setup.md"]
//! "/api/" = "structure"
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::{Deserialize, Serialize, Serializer};

const STRUCTURE: &str = "structure";

/// The `"structure"` sentinel: derive items from the page layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Structure;

impl Serialize for Structure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(STRUCTURE)
    }
}

impl<'de> Deserialize<'de> for Structure {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StructureVisitor;

        impl Visitor<'_> for StructureVisitor {
            type Value = Structure;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "the string \"{STRUCTURE}\"")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Structure, E> {
                if value == STRUCTURE {
                    Ok(Structure)
                } else {
                    Err(E::invalid_value(Unexpected::Str(value), &self))
                }
            }
        }

        deserializer.deserialize_str(StructureVisitor)
    }
}

/// A single sidebar entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SidebarItem {
    /// Page path, relative to the enclosing prefix.
    Path(String),
    /// Page or group with explicit options.
    Options(SidebarItemOptions),
}

impl From<&str> for SidebarItem {
    fn from(path: &str) -> Self {
        Self::Path(path.to_owned())
    }
}

impl From<SidebarItemOptions> for SidebarItem {
    fn from(options: SidebarItemOptions) -> Self {
        Self::Options(options)
    }
}

/// Explicit sidebar entry options.
///
/// An entry with `children` is a group; anything else is a page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarItemOptions {
    /// Display text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Icon name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Link target, relative to the enclosing prefix unless absolute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Prefix for the children of a group, relative to the enclosing prefix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Group children.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<SidebarChildren>,
    /// Whether the group can be collapsed.
    #[serde(default)]
    pub collapsible: bool,
    /// Whether a collapsible group starts expanded.
    #[serde(default)]
    pub expanded: bool,
}

/// Children of a sidebar group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SidebarChildren {
    /// Take the children from the structure table.
    Structure(Structure),
    /// Explicit children.
    Items(Vec<SidebarItem>),
}

/// List bound to a path prefix in a multi-sidebar config.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SidebarEntry {
    /// Take the list from the structure table.
    Structure(Structure),
    /// Explicit list.
    Items(Vec<SidebarItem>),
}

/// Top-level sidebar configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SidebarOptions {
    /// Derive from the structure table entry of the route locale.
    Structure(Structure),
    /// One list for every route.
    Items(Vec<SidebarItem>),
    /// Lists keyed by path prefix.
    Prefixed(BTreeMap<String, SidebarEntry>),
    /// Anything else. Resolves to an empty sidebar.
    Unrecognized(serde_json::Value),
}

impl Default for SidebarOptions {
    fn default() -> Self {
        Self::Structure(Structure)
    }
}
