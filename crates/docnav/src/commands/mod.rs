//! CLI command implementations.

pub(crate) mod page_nav;
pub(crate) mod sidebar;

use std::path::{Path, PathBuf};

use clap::Args;
use docnav_config::{CliSettings, Config};
use docnav_sidebar::{
    RouteTable, SidebarStructureTable, decode_route_path, normalize_route, route_key,
};

use crate::error::CliError;

pub(crate) use page_nav::PageNavArgs;
pub(crate) use sidebar::SidebarArgs;

/// Options shared by commands that read generated site data.
#[derive(Args)]
pub(crate) struct DataArgs {
    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Sidebar structure table (overrides config).
    #[arg(long)]
    structure: Option<PathBuf>,

    /// Route table (overrides config).
    #[arg(long)]
    routes: Option<PathBuf>,

    /// Heading levels listed under sidebar pages (overrides config).
    #[arg(long)]
    header_depth: Option<usize>,
}

/// Configuration and generated data of a site.
pub(crate) struct Site {
    pub(crate) config: Config,
    pub(crate) structure: SidebarStructureTable,
    pub(crate) routes: RouteTable,
}

impl DataArgs {
    /// Load configuration, then the data files it points at.
    pub(crate) fn load(&self) -> Result<Site, CliError> {
        let cli_settings = CliSettings {
            header_depth: self.header_depth,
            structure_path: self.structure.clone(),
            routes_path: self.routes.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        Site::load(config)
    }
}

impl Site {
    /// Load the data files of a configuration.
    ///
    /// A missing structure table is treated as empty, since sites with an
    /// explicit sidebar never generate one. A missing route table is an error.
    pub(crate) fn load(config: Config) -> Result<Self, CliError> {
        let structure = load_optional(&config.data_resolved.structure_path)?;
        let routes = RouteTable::load(&config.data_resolved.routes_path)?;

        tracing::debug!(
            structure = %config.data_resolved.structure_path.display(),
            routes = routes.len(),
            "Loaded site data"
        );

        Ok(Self {
            config,
            structure,
            routes,
        })
    }
}

/// Route path as sidebar links spell it: decoded, without query or hash,
/// and with Markdown sources mapped to their routes.
pub(crate) fn page_path(route: &str) -> String {
    normalize_route(route_key(&decode_route_path(route)))
}

fn load_optional(path: &Path) -> Result<SidebarStructureTable, CliError> {
    if path.exists() {
        Ok(SidebarStructureTable::load(path)?)
    } else {
        tracing::debug!(path = %path.display(), "No sidebar structure table");
        Ok(SidebarStructureTable::default())
    }
}
