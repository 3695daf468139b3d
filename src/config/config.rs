//! Explorer configuration
//!
//! Every field has a default, so `{}` is a complete config describing the
//! subnet metagraph layout.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::filter::{FilterCompiler, FilterSlot};
use crate::observability::{log_event_with_fields, Event, Severity};
use crate::planner::SortSpec;
use crate::relation::DEFAULT_RELATION_NAME;
use crate::schema::Schema;

use super::errors::{ConfigError, ConfigResult};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// Delimited source file
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,

    /// Name queries use in FROM
    #[serde(default = "default_relation")]
    pub relation: String,

    /// Column layout of the source
    #[serde(default = "Schema::metagraph")]
    pub schema: Schema,

    /// ORDER BY appended to the default and composed queries
    #[serde(default = "default_order")]
    pub default_order: SortSpec,

    /// Filter inputs, in clause order
    #[serde(default = "FilterSlot::metagraph_defaults")]
    pub filters: Vec<FilterSlot>,

    /// Minimum severity written to stderr
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_data_path() -> PathBuf {
    PathBuf::from("subnets.csv")
}

fn default_relation() -> String {
    DEFAULT_RELATION_NAME.to_string()
}

fn default_order() -> SortSpec {
    SortSpec::desc("alpha_price_tao")
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            relation: default_relation(),
            schema: Schema::metagraph(),
            default_order: default_order(),
            filters: FilterSlot::metagraph_defaults(),
            log_level: default_log_level(),
        }
    }
}

impl ExplorerConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: ExplorerConfig =
            serde_json::from_str(&content).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?;

        config.validate()?;

        let path_text = path.display().to_string();
        log_event_with_fields(Event::ConfigLoaded, &[("path", path_text.as_str())]);
        Ok(config)
    }

    /// Loads `path` if given, else the defaults
    pub fn load_or_default(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.relation.is_empty()
            || self.relation.starts_with(|c: char| c.is_ascii_digit())
            || !self
                .relation
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(ConfigError::Invalid(format!(
                "relation name '{}' must be a non-empty identifier",
                self.relation
            )));
        }

        self.schema.validate_structure()?;

        if self.schema.index_of(&self.default_order.field).is_none() {
            return Err(ConfigError::Invalid(format!(
                "default_order column '{}' is not in the schema",
                self.default_order.field
            )));
        }

        self.filter_compiler()?;
        self.log_severity()?;

        Ok(())
    }

    /// Builds the filter compiler for the configured slots
    pub fn filter_compiler(&self) -> ConfigResult<FilterCompiler> {
        Ok(FilterCompiler::new(
            self.relation.clone(),
            &self.schema,
            self.filters.clone(),
            self.default_order.clone(),
        )?)
    }

    /// Parsed log level
    pub fn log_severity(&self) -> ConfigResult<Severity> {
        self.log_level.parse().map_err(ConfigError::Invalid)
    }
}
