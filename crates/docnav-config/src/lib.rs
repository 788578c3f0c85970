//! Configuration management for docnav.
//!
//! Parses `docnav.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Example
//!
//! ```toml
//! [theme]
//! sidebar = "structure"
//! header_depth = 2
//!
//! [locales."/zh/"]
//! prev_link = false
//! meta_locales = { prev = "上一页", next = "下一页" }
//!
//! [data]
//! structure = "${DOCNAV_DATA:-.temp}/sidebar.json"
//! routes = "${DOCNAV_DATA:-.temp}/routes.json"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! Data paths support `${VAR}` and `${VAR:-default}`.

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use docnav_page_nav::{MetaLocales, ThemeLocaleSettings};
use docnav_sidebar::SidebarOptions;
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override sidebar heading depth.
    pub header_depth: Option<usize>,
    /// Override structure table path.
    pub structure_path: Option<PathBuf>,
    /// Override route table path.
    pub routes_path: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docnav.toml";

/// Deepest heading level a sidebar can list (`######`).
const MAX_HEADER_DEPTH: usize = 6;

/// Root locale.
const ROOT_LOCALE: &str = "/";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Theme configuration.
    pub theme: ThemeConfig,
    /// Per-locale overrides keyed by locale prefix (`/`, `/zh/`).
    pub locales: BTreeMap<String, LocaleConfig>,
    /// Generated data paths (relative strings from TOML).
    data: DataConfigRaw,

    /// Resolved data configuration (set after loading).
    #[serde(skip)]
    pub data_resolved: DataConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Theme configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Sidebar used by locales without their own.
    pub sidebar: SidebarOptions,
    /// Heading levels listed under sidebar pages.
    pub header_depth: usize,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            sidebar: SidebarOptions::default(),
            header_depth: 2,
        }
    }
}

/// Locale overrides. Unset fields fall back to the root locale.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Locale sidebar.
    pub sidebar: Option<SidebarOptions>,
    /// Show previous links derived from the sidebar.
    pub prev_link: Option<bool>,
    /// Show next links derived from the sidebar.
    pub next_link: Option<bool>,
    /// Hint labels.
    pub meta_locales: Option<MetaLocales>,
}

/// Raw data configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DataConfigRaw {
    structure: Option<String>,
    routes: Option<String>,
}

/// Resolved data file locations.
#[derive(Debug, Default)]
pub struct DataConfig {
    /// Generated sidebar structure table (JSON).
    pub structure_path: PathBuf,
    /// Generated route table (JSON).
    pub routes_path: PathBuf,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`data.routes`").
        field: String,
        /// Error message (e.g., "${`DOCNAV_DATA`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docnav.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(header_depth) = settings.header_depth {
            self.theme.header_depth = header_depth;
        }
        if let Some(structure_path) = &settings.structure_path {
            self.data_resolved.structure_path.clone_from(structure_path);
        }
        if let Some(routes_path) = &settings.routes_path {
            self.data_resolved.routes_path.clone_from(routes_path);
        }
    }

    /// Locale prefix of a route: the longest configured locale the decoded
    /// route path starts with, or `/`.
    #[must_use]
    pub fn route_locale(&self, route_path: &str) -> &str {
        let route_path = docnav_sidebar::decode_route_path(route_path);
        self.locales
            .keys()
            .filter(|locale| route_path.starts_with(locale.as_str()))
            .max_by_key(|locale| locale.len())
            .map_or(ROOT_LOCALE, String::as_str)
    }

    /// Sidebar configuration of a locale, falling back to the theme sidebar.
    #[must_use]
    pub fn sidebar(&self, locale: &str) -> &SidebarOptions {
        self.locales
            .get(locale)
            .and_then(|config| config.sidebar.as_ref())
            .unwrap_or(&self.theme.sidebar)
    }

    /// Page navigation settings of a locale.
    ///
    /// Unset fields fall back to the root locale, then to defaults.
    #[must_use]
    pub fn locale_settings(&self, locale: &str) -> ThemeLocaleSettings {
        let defaults = ThemeLocaleSettings::default();
        let root = self.locales.get(ROOT_LOCALE);
        let own = self.locales.get(locale);

        let pick = |field: fn(&LocaleConfig) -> Option<bool>, default: bool| {
            own.and_then(field)
                .or_else(|| root.and_then(field))
                .unwrap_or(default)
        };

        ThemeLocaleSettings {
            prev_link: pick(|config| config.prev_link, defaults.prev_link),
            next_link: pick(|config| config.next_link, defaults.next_link),
            meta_locales: own
                .and_then(|config| config.meta_locales.clone())
                .or_else(|| root.and_then(|config| config.meta_locales.clone()))
                .unwrap_or(defaults.meta_locales),
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_config_from(current)
    }

    /// Search for config file in a directory and its parents.
    fn discover_config_from(mut current: PathBuf) -> Option<PathBuf> {
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            theme: ThemeConfig::default(),
            locales: BTreeMap::new(),
            data: DataConfigRaw::default(),
            data_resolved: DataConfig {
                structure_path: base.join("sidebar.json"),
                routes_path: base.join("routes.json"),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading and resolution
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_theme()?;
        self.validate_locales()?;
        self.validate_data()?;
        Ok(())
    }

    /// Validate theme configuration.
    fn validate_theme(&self) -> Result<(), ConfigError> {
        if self.theme.header_depth > MAX_HEADER_DEPTH {
            return Err(ConfigError::Validation(format!(
                "theme.header_depth cannot exceed {MAX_HEADER_DEPTH}"
            )));
        }
        Ok(())
    }

    /// Validate locale keys.
    fn validate_locales(&self) -> Result<(), ConfigError> {
        for locale in self.locales.keys() {
            if !locale.starts_with('/') || !locale.ends_with('/') {
                return Err(ConfigError::Validation(format!(
                    "locales key \"{locale}\" must start and end with /"
                )));
            }
        }
        Ok(())
    }

    /// Validate data paths.
    fn validate_data(&self) -> Result<(), ConfigError> {
        if let Some(structure) = &self.data.structure {
            require_non_empty(structure, "data.structure")?;
        }
        if let Some(routes) = &self.data.routes {
            require_non_empty(routes, "data.routes")?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref structure) = self.data.structure {
            self.data.structure = Some(expand::expand_env(structure, "data.structure")?);
        }
        if let Some(ref routes) = self.data.routes {
            self.data.routes = Some(expand::expand_env(routes, "data.routes")?);
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.data_resolved = DataConfig {
            structure_path: resolve(self.data.structure.as_deref(), "sidebar.json"),
            routes_path: resolve(self.data.routes.as_deref(), "routes.json"),
        };
    }
}
