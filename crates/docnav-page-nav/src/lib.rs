//! Previous/next page navigation for docnav.
//!
//! This crate provides:
//! - [`PageFrontmatter`]: Per-page `prev`/`next` overrides
//! - [`resolve_page_nav_link`]: Link resolution from frontmatter, locale
//!   settings and sidebar order
//! - [`PageNav`]: Cached links of the current page, recomputed when inputs change
//! - [`KeyEvents`]: Alt+Arrow keyboard shortcuts bound for a scoped lifetime
//!
//! # Quick Start
//!
//! ```
//! use docnav_page_nav::{PageFrontmatter, PageNav, ThemeLocaleSettings};
//! use docnav_sidebar::{RouteTable, SidebarOptions, SidebarResolver, SidebarStructureTable};
//!
//! let structure = SidebarStructureTable::default();
//! let routes = RouteTable::default();
//! let config: SidebarOptions = serde_yaml::from_str("[a, b, c]").unwrap();
//! let sidebar = SidebarResolver::new(&structure, &routes).resolve(&config, "/", "/b");
//!
//! let nav = PageNav::new(
//!     &routes,
//!     ThemeLocaleSettings::default(),
//!     PageFrontmatter::default(),
//!     "/b",
//!     sidebar,
//! );
//!
//! assert_eq!(nav.prev().map(|link| link.link.as_str()), Some("/a"));
//! assert_eq!(nav.next().map(|link| link.link.as_str()), Some("/c"));
//! ```

mod frontmatter;
mod keyboard;
mod locale;
mod resolver;
mod state;

pub use frontmatter::{FrontmatterError, NavLink, NavOverride, PageFrontmatter};
pub use keyboard::{Key, KeyEvent, KeyEvents, KeyListener, KeyOutcome, Navigator, bind_page_nav_keys};
pub use locale::{MetaLocales, ThemeLocaleSettings};
pub use resolver::{
    FrontmatterNav, NavDirection, PageNavInput, resolve_from_frontmatter,
    resolve_from_sidebar_items, resolve_page_nav_link,
};
pub use state::{NavLinkView, PageNav, PageNavView};
