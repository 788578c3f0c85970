//! Sidebar tree resolution for docnav.
//!
//! This crate provides:
//! - [`SidebarOptions`]: Raw sidebar configuration (structure sentinel, list, or
//!   prefix mapping)
//! - [`SidebarResolver`]: Resolution of that configuration into a tree of
//!   [`ResolvedSidebarItem`]s for the current route
//! - Link helpers shared with page navigation ([`resolve_link_info`] and friends)
//!
//! # Quick Start
//!
//! ```
//! use docnav_sidebar::{RouteTable, SidebarOptions, SidebarResolver, SidebarStructureTable};
//!
//! let structure = SidebarStructureTable::default();
//! let routes = RouteTable::default();
//! let config: SidebarOptions =
//!     serde_json::from_str(r#"{"/guide/": ["intro.md", "setup.md"]}"#).unwrap();
//!
//! let items = SidebarResolver::new(&structure, &routes).resolve(&config, "/", "/guide/intro.html");
//!
//! assert_eq!(items.len(), 2);
//! assert_eq!(items[0].link(), Some("/guide/intro.html"));
//! ```

use std::path::PathBuf;

mod link;
mod options;
mod resolver;
mod routes;
mod structure;

pub use link::{
    LinkDescriptor, decode_route_path, ensure_ending_slash, is_link_absolute, is_link_external,
    is_link_internal, is_link_with_protocol, normalize_route, resolve_link_info, resolve_prefix,
    resolve_relative, route_key,
};
pub use options::{
    SidebarChildren, SidebarEntry, SidebarItem, SidebarItemOptions, SidebarOptions, Structure,
};
pub use resolver::{
    ResolveSidebarOptions, ResolvedSidebarItem, SidebarGroup, SidebarHeader, SidebarPage,
    SidebarResolver, resolve_sidebar_items,
};
pub use routes::{PageHeader, PageInfo, RouteSource, RouteTable};
pub use structure::SidebarStructureTable;

/// Error loading generated site data.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// File could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// File is not valid JSON for the expected shape.
    #[error("Invalid data in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
