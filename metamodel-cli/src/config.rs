//! Configuration file loading for metamodel.
//!
//! Discovers and loads `metamodel.toml` from the project root.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use metamodel_load::{LoadSettings, OrderScope};
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "metamodel.toml";

/// Top-level configuration from metamodel.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MetamodelConfig {
    /// Where schema documents live and how they are numbered.
    pub load: LoadConfig,

    /// Defaults for `inspect` output.
    pub output: OutputConfig,
}

/// Load section of the config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    /// Schema directory, relative to the project root.
    pub schema_dir: Utf8PathBuf,

    /// Glob pattern for schema documents inside `schema_dir`.
    pub pattern: String,

    /// Numbering scope for member declaration order.
    pub order_scope: OrderScope,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            schema_dir: Utf8PathBuf::from("schema"),
            pattern: LoadSettings::default().pattern,
            order_scope: OrderScope::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Output section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,

    /// Only show members whose type holds text.
    pub strings_only: bool,
}

/// Discover the metamodel.toml config file.
///
/// Returns `None` if no config file is found in `root`.
pub fn discover_config(root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a metamodel.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<MetamodelConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<MetamodelConfig> {
    let config: MetamodelConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from the project root, or return default if not found.
pub fn load_or_default(root: &Utf8Path) -> anyhow::Result<MetamodelConfig> {
    match discover_config(root) {
        Some(path) => load_config(&path),
        None => Ok(MetamodelConfig::default()),
    }
}

/// Merged configuration combining config file and CLI arguments.
#[derive(Debug, Clone)]
pub struct MergedConfig {
    /// Schema directory, already joined onto the project root.
    pub schema_dir: Utf8PathBuf,
    pub load: LoadSettings,
    pub format: OutputFormat,
    pub strings_only: bool,
}

/// CLI overrides; `None`/`false` means "use the config file".
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub schema_dir: Option<Utf8PathBuf>,
    pub pattern: Option<String>,
    pub order_scope: Option<OrderScope>,
    pub format: Option<OutputFormat>,
    pub strings_only: bool,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: MetamodelConfig,
}

impl ConfigMerger {
    pub fn new(config: MetamodelConfig) -> Self {
        Self { config }
    }

    /// Merge with CLI arguments. Relative schema directories resolve against `root`.
    pub fn merge(self, root: &Utf8Path, cli: CliOverrides) -> MergedConfig {
        let schema_dir = cli.schema_dir.unwrap_or(self.config.load.schema_dir);
        let schema_dir = if schema_dir.is_absolute() {
            schema_dir
        } else {
            root.join(schema_dir)
        };

        MergedConfig {
            schema_dir,
            load: LoadSettings {
                pattern: cli.pattern.unwrap_or(self.config.load.pattern),
                order_scope: cli.order_scope.unwrap_or(self.config.load.order_scope),
            },
            format: cli.format.unwrap_or(self.config.output.format),
            // CLI flag turns filtering on; it cannot turn a config default off.
            strings_only: cli.strings_only || self.config.output.strings_only,
        }
    }
}
