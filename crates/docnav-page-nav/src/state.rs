//! Derived previous/next state of the current page.
//!
//! [`PageNav`] owns the inputs the links depend on and computes each link
//! on first access. Changing an input drops the cached links, so they are
//! recomputed on demand; setting an input to its current value keeps them.

use std::cell::OnceCell;

use docnav_sidebar::{LinkDescriptor, ResolvedSidebarItem, RouteSource};
use serde::Serialize;

use crate::frontmatter::PageFrontmatter;
use crate::locale::ThemeLocaleSettings;
use crate::resolver::{NavDirection, PageNavInput, resolve_page_nav_link};

/// Previous/next links of the current page.
pub struct PageNav<'r> {
    routes: &'r dyn RouteSource,
    locale: ThemeLocaleSettings,
    frontmatter: PageFrontmatter,
    route_path: String,
    page_path: String,
    sidebar_items: Vec<ResolvedSidebarItem>,
    prev: OnceCell<Option<LinkDescriptor>>,
    next: OnceCell<Option<LinkDescriptor>>,
}

/// One rendered navigation link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavLinkView {
    /// Hint label (e.g. "Prev").
    pub hint: String,
    /// Link target.
    #[serde(flatten)]
    pub link: LinkDescriptor,
}

/// What the rendering layer needs to draw the page navigation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageNavView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<NavLinkView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<NavLinkView>,
}

impl<'r> PageNav<'r> {
    /// Create navigation state for a page.
    ///
    /// `page_path` is used both as the route path and the page path; use
    /// [`PageNav::set_route`] when they differ.
    #[must_use]
    pub fn new(
        routes: &'r dyn RouteSource,
        locale: ThemeLocaleSettings,
        frontmatter: PageFrontmatter,
        page_path: &str,
        sidebar_items: Vec<ResolvedSidebarItem>,
    ) -> Self {
        Self {
            routes,
            locale,
            frontmatter,
            route_path: page_path.to_owned(),
            page_path: page_path.to_owned(),
            sidebar_items,
            prev: OnceCell::new(),
            next: OnceCell::new(),
        }
    }

    /// Previous link, if any.
    pub fn prev(&self) -> Option<&LinkDescriptor> {
        self.prev
            .get_or_init(|| self.compute(NavDirection::Prev))
            .as_ref()
    }

    /// Next link, if any.
    pub fn next(&self) -> Option<&LinkDescriptor> {
        self.next
            .get_or_init(|| self.compute(NavDirection::Next))
            .as_ref()
    }

    /// Link in the given direction.
    pub fn link(&self, direction: NavDirection) -> Option<&LinkDescriptor> {
        match direction {
            NavDirection::Prev => self.prev(),
            NavDirection::Next => self.next(),
        }
    }

    /// View model for rendering, or `None` when there is nothing to show.
    #[must_use]
    pub fn view(&self) -> Option<PageNavView> {
        let hint = |text: &str, link: Option<&LinkDescriptor>| {
            link.map(|link| NavLinkView {
                hint: text.to_owned(),
                link: link.clone(),
            })
        };

        let prev = hint(&self.locale.meta_locales.prev, self.prev());
        let next = hint(&self.locale.meta_locales.next, self.next());

        if prev.is_none() && next.is_none() {
            None
        } else {
            Some(PageNavView { prev, next })
        }
    }

    /// Replace the page frontmatter.
    pub fn set_frontmatter(&mut self, frontmatter: PageFrontmatter) {
        if self.frontmatter != frontmatter {
            self.frontmatter = frontmatter;
            self.invalidate();
        }
    }

    /// Replace the locale settings.
    pub fn set_locale(&mut self, locale: ThemeLocaleSettings) {
        if self.locale != locale {
            self.locale = locale;
            self.invalidate();
        }
    }

    /// Replace the route path and the page path.
    pub fn set_route(&mut self, route_path: &str, page_path: &str) {
        if self.route_path != route_path || self.page_path != page_path {
            route_path.clone_into(&mut self.route_path);
            page_path.clone_into(&mut self.page_path);
            self.invalidate();
        }
    }

    /// Replace the resolved sidebar.
    pub fn set_sidebar_items(&mut self, sidebar_items: Vec<ResolvedSidebarItem>) {
        if self.sidebar_items != sidebar_items {
            self.sidebar_items = sidebar_items;
            self.invalidate();
        }
    }

    /// Check whether the links are currently cached.
    #[must_use]
    pub fn is_cached(&self) -> bool {
        self.prev.get().is_some() || self.next.get().is_some()
    }

    fn invalidate(&mut self) {
        self.prev.take();
        self.next.take();
    }

    fn compute(&self, direction: NavDirection) -> Option<LinkDescriptor> {
        tracing::debug!(page = %self.page_path, ?direction, "Resolving page navigation");
        resolve_page_nav_link(
            &PageNavInput {
                frontmatter: &self.frontmatter,
                locale: &self.locale,
                sidebar_items: &self.sidebar_items,
                route_path: &self.route_path,
                page_path: &self.page_path,
                routes: self.routes,
            },
            direction,
        )
    }
}
