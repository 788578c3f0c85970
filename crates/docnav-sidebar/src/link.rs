//! Link classification and resolution helpers.
//!
//! Sidebar entries and frontmatter values refer to pages either by absolute
//! route path (`/guide/intro.html`), by a path relative to a prefix
//! (`intro.md`), or by an external URL (`https://example.com`). These helpers
//! turn all of them into the route paths that the router knows about.
//!
//! # Route Normalization
//!
//! Markdown source paths are mapped to routes:
//! - `README.md` and `index.md` map to their directory (`/guide/`)
//! - Other `.md` files map to `.html` (`/guide/intro.html`)
//! - Query strings and hashes are preserved

use std::borrow::Cow;

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};

use crate::routes::RouteSource;

/// A resolved, navigable link target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDescriptor {
    /// Display text.
    pub text: String,
    /// Route path or external URL.
    pub link: String,
    /// Optional icon name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Check whether a link starts with a URL scheme (`https:`, `mailto:`, ...).
#[must_use]
pub fn is_link_with_protocol(link: &str) -> bool {
    let Some((scheme, _)) = link.split_once(':') else {
        return false;
    };

    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Check whether a link points outside of the site.
#[must_use]
pub fn is_link_external(link: &str) -> bool {
    link.starts_with("//") || is_link_with_protocol(link)
}

/// Check whether a link is a site route.
#[must_use]
pub fn is_link_internal(link: &str) -> bool {
    !is_link_external(link)
}

/// Check whether a link is an absolute route path.
#[must_use]
pub fn is_link_absolute(link: &str) -> bool {
    link.starts_with('/')
}

/// Append a trailing slash unless the path already ends with one or names an
/// `.html` page. An empty path becomes `/`.
#[must_use]
pub fn ensure_ending_slash(path: &str) -> Cow<'_, str> {
    if path.ends_with('/') || path.ends_with(".html") {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("{path}/"))
    }
}

/// Join a path onto a prefix.
///
/// Absolute and external paths are returned unchanged.
///
/// # Examples
///
/// ```
/// use docnav_sidebar::resolve_prefix;
///
/// assert_eq!(resolve_prefix("/guide/", "intro.md"), "/guide/intro.md");
/// assert_eq!(resolve_prefix("/guide", "intro.md"), "/guide/intro.md");
/// assert_eq!(resolve_prefix("", "intro.md"), "/intro.md");
/// assert_eq!(resolve_prefix("/guide/", "/api/"), "/api/");
/// assert_eq!(resolve_prefix("/guide/", ""), "/guide/");
/// ```
#[must_use]
pub fn resolve_prefix(prefix: &str, path: &str) -> String {
    if is_link_absolute(path) || is_link_with_protocol(path) {
        path.to_owned()
    } else {
        format!("{}{path}", ensure_ending_slash(prefix))
    }
}

/// Split a link into its path and its `?query#hash` suffix.
fn split_suffix(link: &str) -> (&str, &str) {
    match link.find(['?', '#']) {
        Some(idx) => link.split_at(idx),
        None => (link, ""),
    }
}

/// Strip the query string and hash from a route, leaving the lookup key.
#[must_use]
pub fn route_key(link: &str) -> &str {
    split_suffix(link).0
}

/// Fold `.` and `..` segments of an absolute path.
fn remove_dot_segments(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').collect();
    let last = segments.len() - 1;
    let mut output: Vec<&str> = Vec::with_capacity(segments.len());

    for (i, segment) in segments.iter().enumerate() {
        match *segment {
            "." => {}
            ".." => {
                // Never pop the leading empty segment of an absolute path
                if output.len() > 1 {
                    output.pop();
                }
            }
            other => output.push(other),
        }
        if i == last && matches!(*segment, "." | "..") {
            output.push("");
        }
    }

    output.join("/")
}

/// Normalize an internal link into the route path the router serves.
///
/// # Examples
///
/// ```
/// use docnav_sidebar::normalize_route;
///
/// assert_eq!(normalize_route("/guide/README.md"), "/guide/");
/// assert_eq!(normalize_route("/guide/intro.md#setup"), "/guide/intro.html#setup");
/// assert_eq!(normalize_route("/guide/./a/../intro"), "/guide/intro");
/// ```
#[must_use]
pub fn normalize_route(link: &str) -> String {
    let (path, suffix) = split_suffix(link);

    let path = if is_link_absolute(path) {
        Cow::Owned(remove_dot_segments(path))
    } else {
        Cow::Borrowed(path)
    };

    let (dir, file) = match path.rfind('/') {
        Some(idx) => path.split_at(idx + 1),
        None => ("", path.as_ref()),
    };

    let is_index =
        file.eq_ignore_ascii_case("README.md") || file.eq_ignore_ascii_case("index.md");

    if is_index {
        format!("{dir}{suffix}")
    } else if let Some(stem) = file.strip_suffix(".md") {
        format!("{dir}{stem}.html{suffix}")
    } else {
        format!("{path}{suffix}")
    }
}

/// Resolve a link relative to the route it appears on.
///
/// Absolute links and external links are returned unchanged. A link that is
/// only a query or a hash attaches to the current route.
#[must_use]
pub fn resolve_relative(base: &str, link: &str) -> String {
    if is_link_absolute(link) || is_link_external(link) {
        return link.to_owned();
    }

    let base_path = route_key(base);
    if link.is_empty() || link.starts_with(['?', '#']) {
        return format!("{base_path}{link}");
    }

    let dir = match base_path.rfind('/') {
        Some(idx) => &base_path[..=idx],
        None => "/",
    };

    let (path, suffix) = split_suffix(link);
    let joined = if is_link_absolute(dir) {
        format!("{dir}{path}")
    } else {
        format!("/{dir}{path}")
    };

    format!("{}{suffix}", remove_dot_segments(&joined))
}

/// Characters whose escapes stay encoded when decoding a route path.
const RESERVED: &[u8] = b";/?:@&=+$,#";

/// Percent-decode a route path for display and prefix matching.
///
/// Escapes of reserved characters (`%2F`, `%3F`, ...) are kept, so an
/// encoded slash never forms a new path segment.
///
/// ```
/// use docnav_sidebar::decode_route_path;
///
/// assert_eq!(decode_route_path("/%E6%8C%87%E5%8D%97/"), "/指南/");
/// assert_eq!(decode_route_path("/a%2Fb%20c/"), "/a%2Fb c/");
/// ```
#[must_use]
pub fn decode_route_path(path: &str) -> String {
    let mut decoded = String::with_capacity(path.len());
    let mut rest = path;

    // Reserved characters are ASCII, so splitting at their escapes never
    // cuts a multi-byte sequence.
    while let Some(idx) = find_reserved_escape(rest) {
        decoded.push_str(&percent_decode_str(&rest[..idx]).decode_utf8_lossy());
        decoded.push_str(&rest[idx..idx + 3]);
        rest = &rest[idx + 3..];
    }
    decoded.push_str(&percent_decode_str(rest).decode_utf8_lossy());

    decoded
}

/// Byte offset of the first `%XX` escape of a reserved character.
fn find_reserved_escape(path: &str) -> Option<usize> {
    path.match_indices('%').map(|(idx, _)| idx).find(|&idx| {
        path.get(idx + 1..idx + 3)
            .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
            .and_then(|hex| u8::from_str_radix(hex, 16).ok())
            .is_some_and(|byte| RESERVED.contains(&byte))
    })
}

/// Resolve a link into a [`LinkDescriptor`] using route metadata.
///
/// External links become their own text. Internal links are resolved against
/// `current` (when given), normalized, and looked up in `routes`; the page
/// title becomes the text, falling back to the link itself for unknown pages.
///
/// With `prefer_full` the page's full title is used, otherwise its short
/// title when it has one.
#[must_use]
pub fn resolve_link_info(
    routes: &dyn RouteSource,
    link: &str,
    prefer_full: bool,
    current: Option<&str>,
) -> LinkDescriptor {
    if is_link_external(link) {
        return LinkDescriptor {
            text: link.to_owned(),
            link: link.to_owned(),
            icon: None,
        };
    }

    let absolute = match current {
        Some(base) => resolve_relative(base, link),
        None => link.to_owned(),
    };
    let route = normalize_route(&absolute);

    match routes.page(route_key(&route)) {
        Some(page) => LinkDescriptor {
            text: if prefer_full {
                page.title.clone()
            } else {
                page.short_title.clone().unwrap_or_else(|| page.title.clone())
            },
            icon: page.icon.clone(),
            link: route,
        },
        None => LinkDescriptor {
            text: route.clone(),
            link: route,
            icon: None,
        },
    }
}
