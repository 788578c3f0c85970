//! `docnav sidebar` command implementation.

use clap::Args;
use docnav_sidebar::{ResolvedSidebarItem, SidebarResolver};

use super::{DataArgs, Site, page_path};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the sidebar command.
#[derive(Args)]
pub(crate) struct SidebarArgs {
    /// Route path of the current page (e.g. /guide/intro.html).
    #[arg(short, long)]
    route: String,

    /// Locale prefix (default: derived from the route and configured locales).
    #[arg(short, long)]
    locale: Option<String>,

    #[command(flatten)]
    data: DataArgs,
}

impl SidebarArgs {
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let site = self.data.load()?;
        let items = resolve_sidebar(&site, &page_path(&self.route), self.locale.as_deref());

        if items.is_empty() {
            output.warning(&format!("No sidebar items for {}", self.route));
        }
        output.json(&items)
    }
}

/// Resolve the sidebar of a route with the configuration of its locale.
pub(crate) fn resolve_sidebar(
    site: &Site,
    route_path: &str,
    locale: Option<&str>,
) -> Vec<ResolvedSidebarItem> {
    let locale = locale.unwrap_or_else(|| site.config.route_locale(route_path));

    SidebarResolver::new(&site.structure, &site.routes)
        .with_header_depth(site.config.theme.header_depth)
        .resolve(site.config.sidebar(locale), locale, route_path)
}
