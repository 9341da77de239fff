//! Configuration file.
//!
//! The process-level defaults and a few behaviour switches live in a TOML
//! file:
//!
//! ```toml
//! [indexing]
//! include = "[include]"
//! managed_fields = "summary,internalNotes"
//! custom_field_map = "title:heading|tags+:keywords"
//! link_fields_to_embed = "related"
//! min_template_priority = 200
//!
//! [eligibility]
//! container_inheritance = "recursive"
//! index_session_preview = false
//!
//! [links]
//! on_unresolved = "fail"
//! ```
//!
//! The `[indexing]` strings use the same grammar as template metadata and
//! degrade the same way. The file is looked up at an explicit path, then
//! `$PAGESIFT_CONFIG`, then `<config_dir>/pagesift/config.toml`. A missing
//! file means defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use pagesift_core::{Error, Result};

use crate::eligibility::ContainerInheritance;
use crate::processor::UnresolvedLinks;
use crate::settings::{IndexingSettings, RawSettings};

/// Environment variable pointing at a configuration file.
pub const CONFIG_ENV_VAR: &str = "PAGESIFT_CONFIG";

/// Project name, used for the configuration directory.
pub const PROJECT_NAME: &str = "pagesift";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PagesiftConfig {
    /// Process-level default indexing settings.
    #[serde(default)]
    pub indexing: IndexingConfig,
    /// Eligibility switches.
    #[serde(default)]
    pub eligibility: EligibilityConfig,
    /// Link following behaviour.
    #[serde(default)]
    pub links: LinksConfig,
}

/// Raw default settings strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexingConfig {
    /// Include/exclude marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<String>,
    /// Comma-separated managed fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed_fields: Option<String>,
    /// Custom field map.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_field_map: Option<String>,
    /// Comma-separated link fields to embed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_fields_to_embed: Option<String>,
    /// Minimum template priority, as a number or a string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_template_priority: Option<PriorityValue>,
}

/// A priority given either as a TOML integer or as a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriorityValue {
    /// Integer form.
    Number(i64),
    /// String form, parsed leniently.
    Text(String),
}

impl PriorityValue {
    fn as_raw(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

/// Eligibility switches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EligibilityConfig {
    /// How container `NoIndex` markers are inherited.
    #[serde(default)]
    pub container_inheritance: ContainerInheritance,
    /// Whether session-preview publishes produce documents.
    #[serde(default)]
    pub index_session_preview: bool,
}

/// Link following behaviour.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinksConfig {
    /// What to do when a followed link does not resolve.
    #[serde(default)]
    pub on_unresolved: UnresolvedLinks,
}

impl PagesiftConfig {
    /// Parses configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(format!("Invalid configuration: {e}")))
    }

    /// Serializes the configuration to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Default location: `<config_dir>/pagesift/config.toml`.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(PROJECT_NAME).join("config.toml"))
    }

    /// Resolves which file to read: explicit path, then the environment
    /// variable, then the default location.
    pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
            && !path.trim().is_empty()
        {
            return Some(PathBuf::from(path));
        }
        Self::default_config_path()
    }

    /// Loads the configuration, falling back to defaults if no file exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match Self::resolve_config_path(explicit) {
            Some(path) if path.exists() => Self::load_from_path(&path),
            Some(path) => {
                log::debug!("No configuration at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Reads and parses a specific file.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Process-level default settings.
    ///
    /// Everything not configured falls back to the built-in default:
    /// include by default, nothing managed or mapped, no links followed,
    /// priority threshold 0.
    pub fn default_settings(&self) -> IndexingSettings {
        let priority = self
            .indexing
            .min_template_priority
            .as_ref()
            .map(PriorityValue::as_raw);
        let configured = IndexingSettings::from_raw(&RawSettings {
            include: self.indexing.include.as_deref(),
            managed_fields: self.indexing.managed_fields.as_deref(),
            custom_field_map: self.indexing.custom_field_map.as_deref(),
            link_fields_to_embed: self.indexing.link_fields_to_embed.as_deref(),
            min_template_priority: priority.as_deref(),
        });
        let builtin = IndexingSettings::process_default();

        IndexingSettings {
            exclude_by_default: configured.exclude_by_default.or(builtin.exclude_by_default),
            managed_fields: configured.managed_fields.or(builtin.managed_fields),
            field_map: configured.field_map.or(builtin.field_map),
            link_fields_to_embed: configured
                .link_fields_to_embed
                .or(builtin.link_fields_to_embed),
            min_template_priority: configured
                .min_template_priority
                .or(builtin.min_template_priority),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
