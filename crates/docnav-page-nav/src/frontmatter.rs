//! Page frontmatter relevant to navigation.
//!
//! Pages override their previous/next links in YAML frontmatter:
//!
//! ```yaml
//! ---
//! prev: false                 # hide the previous link
//! next: ../advanced/index.md  # link to another page, relative to this one
//! ---
//! ```
//!
//! or with an inline link:
//!
//! ```yaml
//! ---
//! next:
//!   text: Changelog
//!   link: https://example.com/changelog
//! ---
//! ```
//!
//! An inline link without `text` is titled from the target page. One without
//! `link` hides the navigation link.

use gray_matter::Matter;
use gray_matter::engine::YAML;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::{Mapping, Value};

/// Frontmatter value of `prev` or `next`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NavOverride {
    /// `false` hides the link; `true` keeps the default.
    Enabled(bool),
    /// Route path (relative to the page) or external URL.
    Path(String),
    /// Inline link. Any mapping is one, whatever keys it has.
    Link(NavLink),
    /// Any other value. Keeps the default.
    Other(Value),
}

impl<'de> Deserialize<'de> for NavOverride {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from)
    }
}

impl From<Value> for NavOverride {
    fn from(value: Value) -> Self {
        match value {
            Value::Bool(enabled) => Self::Enabled(enabled),
            Value::String(path) => Self::Path(path),
            Value::Mapping(mapping) => Self::Link(NavLink::from_mapping(&mapping)),
            other => Self::Other(other),
        }
    }
}

/// Inline `prev`/`next` link. Every field is optional.
///
/// A missing `text` is taken from the target page; a missing `link` hides
/// the navigation link.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NavLink {
    /// Display text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Route path or external URL, used as is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Icon name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl NavLink {
    /// Read the string fields of a mapping; other keys and non-string values
    /// are ignored.
    fn from_mapping(mapping: &Mapping) -> Self {
        let field = |key: &str| mapping.get(key).and_then(Value::as_str).map(str::to_owned);

        Self {
            text: field("text"),
            link: field("link"),
            icon: field("icon"),
        }
    }
}

/// Navigation fields of a page's frontmatter.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PageFrontmatter {
    /// Page title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Page icon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Previous link override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<NavOverride>,
    /// Next link override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<NavOverride>,
}

impl PageFrontmatter {
    /// Parse frontmatter from YAML content.
    ///
    /// Empty content returns a default instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed.
    pub fn from_yaml(content: &str) -> Result<Self, FrontmatterError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(trimmed)
            .map_err(|e| FrontmatterError::Parse(format!("Invalid YAML: {e}")))
    }

    /// Extract frontmatter from a Markdown document.
    ///
    /// Documents without a frontmatter block return a default instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the frontmatter block is malformed.
    pub fn from_markdown(content: &str) -> Result<Self, FrontmatterError> {
        let matter = Matter::<YAML>::new();
        let parsed = matter
            .parse::<serde_yaml::Value>(content)
            .map_err(|e| FrontmatterError::Parse(format!("Invalid frontmatter: {e}")))?;

        match parsed.data {
            None | Some(serde_yaml::Value::Null) => Ok(Self::default()),
            Some(data) => serde_yaml::from_value(data)
                .map_err(|e| FrontmatterError::Parse(format!("Invalid frontmatter: {e}"))),
        }
    }
}

/// Error type for frontmatter parsing.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    /// YAML parsing error.
    #[error("{0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_empty_yaml() {
        let frontmatter = PageFrontmatter::from_yaml("  \n").unwrap();

        assert_eq!(frontmatter, PageFrontmatter::default());
    }

    #[test]
    fn test_parse_disabled_prev() {
        let frontmatter = PageFrontmatter::from_yaml("prev: false").unwrap();

        assert_eq!(frontmatter.prev, Some(NavOverride::Enabled(false)));
        assert!(frontmatter.next.is_none());
    }

    #[test]
    fn test_parse_path_next() {
        let frontmatter = PageFrontmatter::from_yaml("next: ../advanced/index.md").unwrap();

        assert_eq!(
            frontmatter.next,
            Some(NavOverride::Path("../advanced/index.md".to_owned()))
        );
    }

    #[test]
    fn test_parse_inline_link() {
        let yaml = r"
title: Getting Started
next:
  text: Changelog
  link: https://example.com/changelog
  icon: history
";

        let frontmatter = PageFrontmatter::from_yaml(yaml).unwrap();

        assert_eq!(frontmatter.title.as_deref(), Some("Getting Started"));
        assert_eq!(
            frontmatter.next,
            Some(NavOverride::Link(NavLink {
                text: Some("Changelog".to_owned()),
                link: Some("https://example.com/changelog".to_owned()),
                icon: Some("history".to_owned()),
            }))
        );
    }

    #[test]
    fn test_parse_partial_object_is_link() {
        let frontmatter =
            PageFrontmatter::from_yaml("prev:\n  text: Only text\nnext:\n  link: /elsewhere/\n")
                .unwrap();

        assert_eq!(
            frontmatter.prev,
            Some(NavOverride::Link(NavLink {
                text: Some("Only text".to_owned()),
                ..Default::default()
            }))
        );
        assert_eq!(
            frontmatter.next,
            Some(NavOverride::Link(NavLink {
                link: Some("/elsewhere/".to_owned()),
                ..Default::default()
            }))
        );
    }

    #[test]
    fn test_parse_object_ignores_non_string_fields() {
        let frontmatter =
            PageFrontmatter::from_yaml("next:\n  link: /a/\n  text: 3\n  order: 1\n").unwrap();

        assert_eq!(
            frontmatter.next,
            Some(NavOverride::Link(NavLink {
                link: Some("/a/".to_owned()),
                ..Default::default()
            }))
        );
    }

    #[test]
    fn test_parse_list_is_other() {
        let frontmatter = PageFrontmatter::from_yaml("next: [a, b]").unwrap();

        assert!(matches!(frontmatter.next, Some(NavOverride::Other(_))));
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let result = PageFrontmatter::from_yaml("prev: [unclosed");

        assert!(result.is_err());
    }

    #[test]
    fn test_from_markdown_with_frontmatter() {
        let markdown = "---\ntitle: Intro\nprev: false\nnext: setup.md\n---\n\n# Intro\n";

        let frontmatter = PageFrontmatter::from_markdown(markdown).unwrap();

        assert_eq!(frontmatter.title.as_deref(), Some("Intro"));
        assert_eq!(frontmatter.prev, Some(NavOverride::Enabled(false)));
        assert_eq!(frontmatter.next, Some(NavOverride::Path("setup.md".to_owned())));
    }

    #[test]
    fn test_from_markdown_without_frontmatter() {
        let frontmatter = PageFrontmatter::from_markdown("# Just a heading\n").unwrap();

        assert_eq!(frontmatter, PageFrontmatter::default());
    }

    #[test]
    fn test_from_markdown_ignores_unrelated_keys() {
        let markdown = "---\ntags: [a, b]\norder: 3\n---\nBody\n";

        let frontmatter = PageFrontmatter::from_markdown(markdown).unwrap();

        assert_eq!(frontmatter, PageFrontmatter::default());
    }
}
