//! Previous/next link resolution.
//!
//! A link is chosen in priority order:
//! 1. Frontmatter `false` hides it
//! 2. A frontmatter inline link or path is used as is
//! 3. The locale setting for the direction may hide it
//! 4. Otherwise the neighbour of the current page in sidebar order is used

use docnav_sidebar::{LinkDescriptor, ResolvedSidebarItem, RouteSource, resolve_link_info};

use crate::frontmatter::{NavLink, NavOverride, PageFrontmatter};
use crate::locale::ThemeLocaleSettings;

/// Navigation direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavDirection {
    Prev,
    Next,
}

impl NavDirection {
    /// Offset of the target in sidebar order.
    #[must_use]
    pub fn offset(self) -> isize {
        match self {
            Self::Prev => -1,
            Self::Next => 1,
        }
    }

    fn frontmatter(self, frontmatter: &PageFrontmatter) -> Option<&NavOverride> {
        match self {
            Self::Prev => frontmatter.prev.as_ref(),
            Self::Next => frontmatter.next.as_ref(),
        }
    }

    fn enabled(self, locale: &ThemeLocaleSettings) -> bool {
        match self {
            Self::Prev => locale.prev_link,
            Self::Next => locale.next_link,
        }
    }
}

/// Outcome of reading a frontmatter override.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FrontmatterNav {
    /// Link explicitly hidden.
    Disabled,
    /// Link given by the page.
    Link(LinkDescriptor),
    /// No override; use the default.
    Unset,
}

/// Read a `prev`/`next` frontmatter value.
///
/// Path strings are resolved relative to `route_path` and titled from
/// `routes`. Inline links keep their `link` as written; a missing `text` is
/// filled in the same way as for path strings. An inline link without `link`
/// disables the navigation link.
#[must_use]
pub fn resolve_from_frontmatter(
    value: Option<&NavOverride>,
    routes: &dyn RouteSource,
    route_path: &str,
) -> FrontmatterNav {
    match value {
        Some(NavOverride::Enabled(false)) => FrontmatterNav::Disabled,
        Some(NavOverride::Link(NavLink { link: None, .. })) => FrontmatterNav::Disabled,
        Some(NavOverride::Link(NavLink {
            text,
            link: Some(link),
            icon,
        })) => {
            let text = text
                .clone()
                .unwrap_or_else(|| resolve_link_info(routes, link, true, Some(route_path)).text);
            FrontmatterNav::Link(LinkDescriptor {
                text,
                link: link.clone(),
                icon: icon.clone(),
            })
        }
        Some(NavOverride::Path(path)) => {
            FrontmatterNav::Link(resolve_link_info(routes, path, true, Some(route_path)))
        }
        Some(NavOverride::Enabled(true) | NavOverride::Other(_)) | None => FrontmatterNav::Unset,
    }
}

/// Find the neighbour of the current page in sidebar order.
///
/// Searches the list for an item linking to `current_path`; when found, the
/// item at `offset` from it in the same list is the target, if it exists and
/// has a link. Lists without the page are searched depth-first through
/// their groups.
#[must_use]
pub fn resolve_from_sidebar_items(
    items: &[ResolvedSidebarItem],
    current_path: &str,
    offset: isize,
) -> Option<LinkDescriptor> {
    if let Some(index) = items
        .iter()
        .position(|item| item.link() == Some(current_path))
    {
        return index
            .checked_add_signed(offset)
            .and_then(|target| items.get(target))
            .and_then(ResolvedSidebarItem::to_link_descriptor);
    }

    items
        .iter()
        .filter(|item| matches!(item, ResolvedSidebarItem::Group(_)))
        .find_map(|item| resolve_from_sidebar_items(item.children(), current_path, offset))
}

/// Everything the previous/next links depend on.
#[derive(Clone, Copy)]
pub struct PageNavInput<'a> {
    /// Current page frontmatter.
    pub frontmatter: &'a PageFrontmatter,
    /// Theme settings of the route locale.
    pub locale: &'a ThemeLocaleSettings,
    /// Resolved sidebar of the route.
    pub sidebar_items: &'a [ResolvedSidebarItem],
    /// Route path the page was reached by, base of relative frontmatter links.
    pub route_path: &'a str,
    /// Canonical path of the page, matched against sidebar links.
    pub page_path: &'a str,
    /// Page metadata for titling frontmatter paths.
    pub routes: &'a dyn RouteSource,
}

/// Resolve the previous or next link of a page.
#[must_use]
pub fn resolve_page_nav_link(
    input: &PageNavInput<'_>,
    direction: NavDirection,
) -> Option<LinkDescriptor> {
    match resolve_from_frontmatter(
        direction.frontmatter(input.frontmatter),
        input.routes,
        input.route_path,
    ) {
        FrontmatterNav::Disabled => None,
        FrontmatterNav::Link(link) => Some(link),
        FrontmatterNav::Unset if !direction.enabled(input.locale) => None,
        FrontmatterNav::Unset => {
            resolve_from_sidebar_items(input.sidebar_items, input.page_path, direction.offset())
        }
    }
}

#[cfg(test)]
mod tests {
    use docnav_sidebar::{
        PageInfo, RouteTable, SidebarChildren, SidebarItem, SidebarItemOptions, SidebarOptions,
        SidebarResolver, SidebarStructureTable,
    };
    use pretty_assertions::assert_eq;

    use super::*;

    fn sidebar(config: SidebarOptions) -> Vec<ResolvedSidebarItem> {
        let structure = SidebarStructureTable::default();
        let routes = RouteTable::default();
        SidebarResolver::new(&structure, &routes).resolve(&config, "/", "/")
    }

    fn flat_sidebar() -> Vec<ResolvedSidebarItem> {
        sidebar(SidebarOptions::Items(vec![
            SidebarItem::from("a"),
            SidebarItem::from("b"),
            SidebarItem::from("c"),
        ]))
    }

    fn link(text: &str, link: &str) -> LinkDescriptor {
        LinkDescriptor {
            text: text.to_owned(),
            link: link.to_owned(),
            icon: None,
        }
    }

    fn nav(
        frontmatter: &PageFrontmatter,
        locale: &ThemeLocaleSettings,
        items: &[ResolvedSidebarItem],
        page_path: &str,
        direction: NavDirection,
    ) -> Option<LinkDescriptor> {
        let routes = RouteTable::default();
        resolve_page_nav_link(
            &PageNavInput {
                frontmatter,
                locale,
                sidebar_items: items,
                route_path: page_path,
                page_path,
                routes: &routes,
            },
            direction,
        )
    }

    #[test]
    fn test_flat_sidebar_neighbours() {
        let items = flat_sidebar();
        let frontmatter = PageFrontmatter::default();
        let locale = ThemeLocaleSettings::default();

        assert_eq!(
            nav(&frontmatter, &locale, &items, "/b", NavDirection::Prev),
            Some(link("/a", "/a"))
        );
        assert_eq!(
            nav(&frontmatter, &locale, &items, "/b", NavDirection::Next),
            Some(link("/c", "/c"))
        );
    }

    #[test]
    fn test_first_and_last_pages_have_one_neighbour() {
        let items = flat_sidebar();
        let frontmatter = PageFrontmatter::default();
        let locale = ThemeLocaleSettings::default();

        assert_eq!(nav(&frontmatter, &locale, &items, "/a", NavDirection::Prev), None);
        assert_eq!(nav(&frontmatter, &locale, &items, "/c", NavDirection::Next), None);
    }

    #[test]
    fn test_page_missing_from_sidebar() {
        let items = flat_sidebar();
        let frontmatter = PageFrontmatter::default();
        let locale = ThemeLocaleSettings::default();

        assert_eq!(nav(&frontmatter, &locale, &items, "/z", NavDirection::Next), None);
        assert_eq!(nav(&frontmatter, &locale, &[], "/a", NavDirection::Next), None);
    }

    #[test]
    fn test_group_children_neighbours() {
        let items = sidebar(SidebarOptions::Items(vec![SidebarItem::Options(
            SidebarItemOptions {
                text: Some("G".to_owned()),
                prefix: Some("g/".to_owned()),
                children: Some(SidebarChildren::Items(vec![
                    SidebarItem::from("x"),
                    SidebarItem::from("y"),
                ])),
                ..Default::default()
            },
        )]));
        let frontmatter = PageFrontmatter::default();
        let locale = ThemeLocaleSettings::default();

        assert_eq!(
            nav(&frontmatter, &locale, &items, "/g/x", NavDirection::Next),
            Some(link("/g/y", "/g/y"))
        );
        // Neighbours never cross group boundaries
        assert_eq!(nav(&frontmatter, &locale, &items, "/g/x", NavDirection::Prev), None);
    }

    #[test]
    fn test_neighbour_without_link_is_skipped() {
        let items = sidebar(SidebarOptions::Items(vec![
            SidebarItem::Options(SidebarItemOptions {
                text: Some("Label".to_owned()),
                ..Default::default()
            }),
            SidebarItem::from("a"),
        ]));
        let frontmatter = PageFrontmatter::default();
        let locale = ThemeLocaleSettings::default();

        assert_eq!(nav(&frontmatter, &locale, &items, "/a", NavDirection::Prev), None);
    }

    #[test]
    fn test_group_with_link_is_a_neighbour() {
        let items = sidebar(SidebarOptions::Items(vec![
            SidebarItem::from("a"),
            SidebarItem::Options(SidebarItemOptions {
                text: Some("Guide".to_owned()),
                link: Some("/guide/".to_owned()),
                prefix: Some("/guide/".to_owned()),
                children: Some(SidebarChildren::Items(vec![SidebarItem::from("intro")])),
                ..Default::default()
            }),
        ]));
        let frontmatter = PageFrontmatter::default();
        let locale = ThemeLocaleSettings::default();

        assert_eq!(
            nav(&frontmatter, &locale, &items, "/a", NavDirection::Next),
            Some(link("Guide", "/guide/"))
        );
    }

    #[test]
    fn test_search_continues_past_groups_without_neighbour() {
        // "/x" is the last page of the first group and the first page of the
        // second; only the second group has a next neighbour.
        let group = |text: &str, children: &[&str]| {
            SidebarItem::Options(SidebarItemOptions {
                text: Some(text.to_owned()),
                children: Some(SidebarChildren::Items(
                    children.iter().copied().map(SidebarItem::from).collect(),
                )),
                ..Default::default()
            })
        };
        let items = sidebar(SidebarOptions::Items(vec![
            group("One", &["w", "x"]),
            group("Two", &["x", "y"]),
        ]));
        let frontmatter = PageFrontmatter::default();
        let locale = ThemeLocaleSettings::default();

        assert_eq!(
            nav(&frontmatter, &locale, &items, "/x", NavDirection::Next),
            Some(link("/y", "/y"))
        );
        assert_eq!(
            nav(&frontmatter, &locale, &items, "/x", NavDirection::Prev),
            Some(link("/w", "/w"))
        );
    }

    #[test]
    fn test_frontmatter_false_suppresses_sidebar_neighbour() {
        let items = flat_sidebar();
        let frontmatter = PageFrontmatter::from_yaml("prev: false").unwrap();
        let locale = ThemeLocaleSettings::default();

        assert_eq!(nav(&frontmatter, &locale, &items, "/b", NavDirection::Prev), None);
        assert_eq!(
            nav(&frontmatter, &locale, &items, "/b", NavDirection::Next),
            Some(link("/c", "/c"))
        );
    }

    #[test]
    fn test_frontmatter_true_keeps_default() {
        let items = flat_sidebar();
        let frontmatter = PageFrontmatter::from_yaml("next: true").unwrap();
        let locale = ThemeLocaleSettings::default();

        assert_eq!(
            nav(&frontmatter, &locale, &items, "/b", NavDirection::Next),
            Some(link("/c", "/c"))
        );
    }

    #[test]
    fn test_frontmatter_inline_link_wins() {
        let items = flat_sidebar();
        let frontmatter =
            PageFrontmatter::from_yaml("next:\n  text: Elsewhere\n  link: /elsewhere.html\n")
                .unwrap();
        let locale = ThemeLocaleSettings {
            next_link: false,
            ..Default::default()
        };

        assert_eq!(
            nav(&frontmatter, &locale, &items, "/b", NavDirection::Next),
            Some(link("Elsewhere", "/elsewhere.html"))
        );
    }

    #[test]
    fn test_frontmatter_object_without_text_wins() {
        let items = flat_sidebar();
        let frontmatter = PageFrontmatter::from_yaml("next:\n  link: /elsewhere/\n").unwrap();
        let locale = ThemeLocaleSettings::default();

        assert_eq!(
            nav(&frontmatter, &locale, &items, "/b", NavDirection::Next),
            Some(link("/elsewhere/", "/elsewhere/"))
        );
    }

    #[test]
    fn test_frontmatter_object_without_text_titled_from_route() {
        let mut routes = RouteTable::default();
        routes.insert("/guide/setup.html", PageInfo::titled("Setup"));
        let frontmatter =
            PageFrontmatter::from_yaml("prev:\n  link: setup.md\n  icon: gear\n").unwrap();

        let result = resolve_from_frontmatter(
            frontmatter.prev.as_ref(),
            &routes,
            "/guide/intro.html",
        );

        assert_eq!(
            result,
            FrontmatterNav::Link(LinkDescriptor {
                text: "Setup".to_owned(),
                link: "setup.md".to_owned(),
                icon: Some("gear".to_owned()),
            })
        );
    }

    #[test]
    fn test_frontmatter_object_without_link_hides() {
        let items = flat_sidebar();
        let frontmatter = PageFrontmatter::from_yaml("prev:\n  text: Only text\n").unwrap();
        let locale = ThemeLocaleSettings::default();

        assert_eq!(nav(&frontmatter, &locale, &items, "/b", NavDirection::Prev), None);
        assert_eq!(
            nav(&frontmatter, &locale, &items, "/b", NavDirection::Next),
            Some(link("/c", "/c"))
        );
    }

    #[test]
    fn test_frontmatter_path_resolved_relative_to_route() {
        let mut routes = RouteTable::default();
        routes.insert(
            "/guide/advanced/",
            PageInfo {
                short_title: Some("Adv".to_owned()),
                ..PageInfo::titled("Advanced Topics")
            },
        );
        let frontmatter = PageFrontmatter::from_yaml("next: advanced/README.md").unwrap();

        let result = resolve_from_frontmatter(
            frontmatter.next.as_ref(),
            &routes,
            "/guide/intro.html",
        );

        assert_eq!(
            result,
            FrontmatterNav::Link(link("Advanced Topics", "/guide/advanced/"))
        );
    }

    #[test]
    fn test_frontmatter_external_path() {
        let routes = RouteTable::default();
        let value = NavOverride::Path("https://example.com".to_owned());

        let result = resolve_from_frontmatter(Some(&value), &routes, "/guide/");

        assert_eq!(
            result,
            FrontmatterNav::Link(link("https://example.com", "https://example.com"))
        );
    }

    #[test]
    fn test_frontmatter_unset_variants() {
        let routes = RouteTable::default();

        assert_eq!(resolve_from_frontmatter(None, &routes, "/"), FrontmatterNav::Unset);
        assert_eq!(
            resolve_from_frontmatter(Some(&NavOverride::Enabled(true)), &routes, "/"),
            FrontmatterNav::Unset
        );
        assert_eq!(
            resolve_from_frontmatter(
                Some(&NavOverride::Other(serde_yaml::Value::Null)),
                &routes,
                "/"
            ),
            FrontmatterNav::Unset
        );
    }

    #[test]
    fn test_locale_disables_sidebar_fallback() {
        let items = flat_sidebar();
        let frontmatter = PageFrontmatter::default();
        let locale = ThemeLocaleSettings {
            prev_link: false,
            ..Default::default()
        };

        assert_eq!(nav(&frontmatter, &locale, &items, "/b", NavDirection::Prev), None);
        assert_eq!(
            nav(&frontmatter, &locale, &items, "/b", NavDirection::Next),
            Some(link("/c", "/c"))
        );
    }

    #[test]
    fn test_locale_does_not_disable_frontmatter_path() {
        let items = flat_sidebar();
        let frontmatter = PageFrontmatter::from_yaml("prev: /a").unwrap();
        let locale = ThemeLocaleSettings {
            prev_link: false,
            ..Default::default()
        };

        assert_eq!(
            nav(&frontmatter, &locale, &items, "/c", NavDirection::Prev),
            Some(link("/a", "/a"))
        );
    }

    #[test]
    fn test_offsets() {
        assert_eq!(NavDirection::Prev.offset(), -1);
        assert_eq!(NavDirection::Next.offset(), 1);
    }
}
