//! Generated sidebar structure table.
//!
//! The site build walks the page layout and emits one ordered item list per
//! path prefix. Sidebars and groups configured with `"structure"` read their
//! items from here instead of from explicit configuration.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::DataError;
use crate::options::SidebarItem;

/// Mapping from path prefix to ordered sidebar items.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SidebarStructureTable {
    entries: HashMap<String, Vec<SidebarItem>>,
}

impl SidebarStructureTable {
    /// Parse a structure table from JSON.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Load a structure table from a JSON file.
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

    /// Items generated for a prefix.
    #[must_use]
    pub fn get(&self, prefix: &str) -> Option<&[SidebarItem]> {
        self.entries.get(prefix).map(Vec::as_slice)
    }

    /// Set the items for a prefix.
    pub fn insert(&mut self, prefix: &str, items: Vec<SidebarItem>) {
        self.entries.insert(prefix.to_owned(), items);
    }
}

impl FromIterator<(String, Vec<SidebarItem>)> for SidebarStructureTable {
    fn from_iter<I: IntoIterator<Item = (String, Vec<SidebarItem>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{SidebarChildren, SidebarItemOptions, Structure};

    #[test]
    fn test_parse_structure_table() {
        let json = r#"{
            "/": ["", {"text": "Guide", "prefix": "guide/", "children": "structure"}],
            "/guide/": ["intro.md", "setup.md"]
        }"#;

        let table = SidebarStructureTable::from_json(json).unwrap();

        let root = table.get("/").unwrap();
        assert_eq!(root[0], SidebarItem::from(""));
        assert_eq!(
            root[1],
            SidebarItem::Options(SidebarItemOptions {
                text: Some("Guide".to_owned()),
                prefix: Some("guide/".to_owned()),
                children: Some(SidebarChildren::Structure(Structure)),
                ..Default::default()
            })
        );
        assert_eq!(table.get("/guide/").unwrap().len(), 2);
    }

    #[test]
    fn test_missing_prefix_returns_none() {
        let table = SidebarStructureTable::default();

        assert!(table.get("/").is_none());
    }

    #[test]
    fn test_collect_from_pairs() {
        let table: SidebarStructureTable =
            [("/".to_owned(), vec![SidebarItem::from("a.md")])]
                .into_iter()
                .collect();

        assert_eq!(table.get("/"), Some([SidebarItem::from("a.md")].as_slice()));
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sidebar.json");
        std::fs::write(&path, "[1, 2]").unwrap();

        let err = SidebarStructureTable::load(&path).unwrap_err();

        assert!(matches!(err, DataError::Json { .. }));
        assert!(err.to_string().contains("sidebar.json"));
    }
}
