//! `docnav page-nav` command implementation.

use std::path::PathBuf;

use clap::Args;
use docnav_page_nav::{PageFrontmatter, PageNav, PageNavView};

use super::sidebar::resolve_sidebar;
use super::{DataArgs, Site, page_path};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the page-nav command.
#[derive(Args)]
pub(crate) struct PageNavArgs {
    /// Route path of the page (e.g. /guide/intro.html).
    #[arg(short, long)]
    route: String,

    /// Markdown source of the page, read for `prev`/`next` frontmatter.
    #[arg(short, long)]
    page: Option<PathBuf>,

    #[command(flatten)]
    data: DataArgs,
}

impl PageNavArgs {
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let site = self.data.load()?;

        let frontmatter = match &self.page {
            Some(path) => {
                let content = std::fs::read_to_string(path)?;
                PageFrontmatter::from_markdown(&content).map_err(|source| {
                    CliError::Frontmatter {
                        path: path.clone(),
                        source,
                    }
                })?
            }
            None => PageFrontmatter::default(),
        };

        let view = resolve_page_nav(&site, &self.route, frontmatter);
        if view.is_none() {
            output.warning(&format!("No page navigation for {}", self.route));
        }
        output.json(&view)
    }
}

/// Resolve the previous/next links of a page with the settings of its locale.
///
/// The route is normalized first, so encoded paths and Markdown source paths
/// match the sidebar links.
pub(crate) fn resolve_page_nav(
    site: &Site,
    route_path: &str,
    frontmatter: PageFrontmatter,
) -> Option<PageNavView> {
    let page_path = page_path(route_path);
    let locale = site.config.route_locale(&page_path);
    let sidebar = resolve_sidebar(site, &page_path, Some(locale));

    PageNav::new(
        &site.routes,
        site.config.locale_settings(locale),
        frontmatter,
        &page_path,
        sidebar,
    )
    .view()
}
