//! Sidebar tree resolution.
//!
//! Turns raw [`SidebarOptions`] into a tree of [`ResolvedSidebarItem`]s for
//! the current route. Links are resolved against the enclosing prefix once,
//! here, and never again downstream.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::link::{
    LinkDescriptor, decode_route_path, is_link_internal, normalize_route, resolve_link_info,
    resolve_prefix, route_key,
};
use crate::options::{SidebarChildren, SidebarEntry, SidebarItem, SidebarItemOptions, SidebarOptions};
use crate::routes::{PageHeader, RouteSource};
use crate::structure::SidebarStructureTable;

/// Heading link shown under a sidebar page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidebarHeader {
    /// Heading text.
    pub title: String,
    /// Page link with the heading anchor.
    pub link: String,
    /// Nested headings within the depth limit.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SidebarHeader>,
}

/// Resolved page entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidebarPage {
    /// Display text.
    pub text: String,
    /// Route path or external URL. Entries without a link are plain labels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Icon name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Page headings down to the configured depth.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<SidebarHeader>,
}

/// Resolved group entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidebarGroup {
    /// Display text.
    pub text: String,
    /// Optional group landing page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Icon name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Prefix the children were resolved against. Always ends with `/`.
    pub prefix: String,
    /// Whether the group can be collapsed.
    pub collapsible: bool,
    /// Whether a collapsible group starts expanded.
    pub expanded: bool,
    /// Group members in configuration order.
    pub children: Vec<ResolvedSidebarItem>,
}

/// Node of the resolved sidebar tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResolvedSidebarItem {
    Page(SidebarPage),
    Group(SidebarGroup),
}

impl ResolvedSidebarItem {
    /// Display text.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Page(page) => &page.text,
            Self::Group(group) => &group.text,
        }
    }

    /// Link target, if the item is navigable.
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        match self {
            Self::Page(page) => page.link.as_deref(),
            Self::Group(group) => group.link.as_deref(),
        }
    }

    /// Icon name.
    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        match self {
            Self::Page(page) => page.icon.as_deref(),
            Self::Group(group) => group.icon.as_deref(),
        }
    }

    /// Group members; empty for pages.
    #[must_use]
    pub fn children(&self) -> &[ResolvedSidebarItem] {
        match self {
            Self::Page(_) => &[],
            Self::Group(group) => &group.children,
        }
    }

    /// Link descriptor for navigable items.
    #[must_use]
    pub fn to_link_descriptor(&self) -> Option<LinkDescriptor> {
        self.link().map(|link| LinkDescriptor {
            text: self.text().to_owned(),
            link: link.to_owned(),
            icon: self.icon().map(str::to_owned),
        })
    }
}

/// Inputs of a sidebar resolution for one route.
#[derive(Clone, Copy, Debug)]
pub struct ResolveSidebarOptions<'a> {
    /// Sidebar configuration of the route's locale.
    pub config: &'a SidebarOptions,
    /// How many heading levels to list under each page.
    pub header_depth: usize,
    /// Locale prefix of the route (e.g. `/` or `/zh/`).
    pub route_locale: &'a str,
    /// Current route path, possibly percent-encoded.
    pub route_path: &'a str,
}

/// Resolve the sidebar for a route.
///
/// Convenience wrapper around [`SidebarResolver`].
#[must_use]
pub fn resolve_sidebar_items(
    options: &ResolveSidebarOptions<'_>,
    structure: &SidebarStructureTable,
    routes: &dyn RouteSource,
) -> Vec<ResolvedSidebarItem> {
    SidebarResolver::new(structure, routes)
        .with_header_depth(options.header_depth)
        .resolve(options.config, options.route_locale, options.route_path)
}

/// Resolves sidebar configuration into [`ResolvedSidebarItem`] trees.
///
/// Resolution is pure: the same inputs always produce equal trees.
pub struct SidebarResolver<'a> {
    structure: &'a SidebarStructureTable,
    routes: &'a dyn RouteSource,
    header_depth: usize,
}

impl<'a> SidebarResolver<'a> {
    /// Create a resolver listing no page headings.
    #[must_use]
    pub fn new(structure: &'a SidebarStructureTable, routes: &'a dyn RouteSource) -> Self {
        Self {
            structure,
            routes,
            header_depth: 0,
        }
    }

    /// Set how many heading levels to list under each page.
    #[must_use]
    pub fn with_header_depth(mut self, header_depth: usize) -> Self {
        self.header_depth = header_depth;
        self
    }

    /// Resolve the sidebar for a route.
    ///
    /// # Arguments
    ///
    /// * `config` - Sidebar configuration
    /// * `route_locale` - Locale prefix, used with the `"structure"` sentinel
    /// * `route_path` - Current route path, used to pick a prefixed list
    ///
    /// # Returns
    ///
    /// Resolved items in configuration order. Empty when the configuration
    /// is unrecognized or no prefix matches the route.
    #[must_use]
    pub fn resolve(
        &self,
        config: &SidebarOptions,
        route_locale: &str,
        route_path: &str,
    ) -> Vec<ResolvedSidebarItem> {
        match config {
            SidebarOptions::Structure(_) => {
                self.resolve_items(self.structure_items(route_locale), route_locale)
            }
            SidebarOptions::Items(items) => self.resolve_items(items, ""),
            SidebarOptions::Prefixed(config) => self.resolve_prefixed(config, route_path),
            SidebarOptions::Unrecognized(_) => Vec::new(),
        }
    }

    /// Resolve the list of the most specific prefix matching the route.
    fn resolve_prefixed(
        &self,
        config: &BTreeMap<String, SidebarEntry>,
        route_path: &str,
    ) -> Vec<ResolvedSidebarItem> {
        let route_path = decode_route_path(route_path);

        let mut prefixes: Vec<&String> = config.keys().collect();
        prefixes.sort_by_key(|prefix| Reverse(prefix.len()));

        let Some(prefix) = prefixes
            .into_iter()
            .find(|prefix| route_path.starts_with(prefix.as_str()))
        else {
            tracing::warn!(route = %route_path, "{route_path} is missing sidebar config.");
            return Vec::new();
        };

        tracing::debug!(route = %route_path, prefix = %prefix, "Selected sidebar config");

        let items = match &config[prefix] {
            SidebarEntry::Structure(_) => self.structure_items(prefix),
            SidebarEntry::Items(items) => items.as_slice(),
        };
        self.resolve_items(items, prefix)
    }

    /// Resolve a list of items against a prefix.
    #[must_use]
    pub fn resolve_items(&self, items: &[SidebarItem], prefix: &str) -> Vec<ResolvedSidebarItem> {
        items
            .iter()
            .map(|item| self.resolve_item(item, prefix))
            .collect()
    }

    /// Resolve a single item against the prefix of its enclosing list.
    #[must_use]
    pub fn resolve_item(&self, item: &SidebarItem, path_prefix: &str) -> ResolvedSidebarItem {
        match item {
            SidebarItem::Path(path) => {
                let info =
                    resolve_link_info(self.routes, &resolve_prefix(path_prefix, path), false, None);
                ResolvedSidebarItem::Page(SidebarPage {
                    headers: self.page_headers(&info.link),
                    text: info.text,
                    link: Some(info.link),
                    icon: info.icon,
                })
            }
            SidebarItem::Options(options) => self.resolve_options(options, path_prefix),
        }
    }

    fn resolve_options(
        &self,
        options: &SidebarItemOptions,
        path_prefix: &str,
    ) -> ResolvedSidebarItem {
        let link = options.link.as_deref().map(|link| {
            if is_link_internal(link) {
                normalize_route(&resolve_prefix(path_prefix, link))
            } else {
                link.to_owned()
            }
        });

        let text = options
            .text
            .clone()
            .or_else(|| {
                let link = link.as_deref()?;
                self.routes
                    .page(route_key(link))
                    .map(|page| page.short_title.as_ref().unwrap_or(&page.title).clone())
            })
            .or_else(|| link.clone())
            .unwrap_or_default();

        let Some(children) = &options.children else {
            return ResolvedSidebarItem::Page(SidebarPage {
                headers: link
                    .as_deref()
                    .map(|link| self.page_headers(link))
                    .unwrap_or_default(),
                text,
                link,
                icon: options.icon.clone(),
            });
        };

        let prefix = resolve_prefix(path_prefix, options.prefix.as_deref().unwrap_or_default());
        let children = match children {
            SidebarChildren::Structure(_) => self.structure_items(&prefix),
            SidebarChildren::Items(items) => items.as_slice(),
        };

        ResolvedSidebarItem::Group(SidebarGroup {
            children: self.resolve_items(children, &prefix),
            text,
            link,
            icon: options.icon.clone(),
            prefix,
            collapsible: options.collapsible,
            expanded: options.expanded,
        })
    }

    /// Structure table items for a prefix, empty when the build produced none.
    fn structure_items(&self, prefix: &str) -> &'a [SidebarItem] {
        let structure: &'a SidebarStructureTable = self.structure;
        if let Some(items) = structure.get(prefix) {
            items
        } else {
            tracing::warn!(prefix, "No generated sidebar structure for prefix");
            &[]
        }
    }

    /// Headings of a known page, limited to the configured depth.
    fn page_headers(&self, link: &str) -> Vec<SidebarHeader> {
        if self.header_depth == 0 {
            return Vec::new();
        }
        let Some(page) = self.routes.page(route_key(link)) else {
            return Vec::new();
        };

        // Depth 1 lists `##` headings, depth 2 adds `###`, and so on.
        let max_level = self.header_depth.saturating_add(1);
        collect_headers(&page.headers, route_key(link), max_level)
    }
}

fn collect_headers(headers: &[PageHeader], link: &str, max_level: usize) -> Vec<SidebarHeader> {
    headers
        .iter()
        .filter(|header| usize::from(header.level) <= max_level)
        .map(|header| SidebarHeader {
            title: header.title.clone(),
            link: format!("{link}#{}", header.slug),
            children: collect_headers(&header.children, link, max_level),
        })
        .collect()
}
