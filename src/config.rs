//! Navbar configuration loaded from TOML or JSON.
//!
//! `NavbarConfig` captures the settings the navbar consults while filling a
//! page: where the navbar lives, where the language switcher sits inside it,
//! and how language links are built. Unknown keys are kept in
//! [`NavbarConfig::extra`] so structures can reference them through
//! `{"config": "key"}` link targets, for example a site root URL shared by
//! several links.

use std::fs;

use camino::Utf8Path;
use indexmap::IndexMap;
use navglot_common::i18n::value_text;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Error raised when configuration or navbar structure cannot be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read `{path}`")]
    Read {
        /// The path that was read.
        path: String,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The TOML document did not match the expected shape.
    #[error("invalid TOML configuration: {0}")]
    Toml(#[source] Box<toml::de::Error>),
    /// The JSON document did not match the expected shape.
    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<toml::de::Error> for ConfigError {
    fn from(error: toml::de::Error) -> Self {
        Self::Toml(Box::new(error))
    }
}

/// Settings for [`crate::Navbar`].
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct NavbarConfig {
    /// Selector of the element the navbar is rendered into.
    pub container: String,
    /// Selector, inside the container, of the language switcher panel.
    ///
    /// Blank values disable the switcher.
    pub languages: Option<String>,
    /// Page the language links point at, resolved against
    /// [`Self::base_url`]. Empty means the base itself.
    pub language_page: String,
    /// Query-string key carrying the language code.
    pub language_query: String,
    /// Base for resolving [`Self::language_page`]. Empty means the current
    /// page location.
    pub base_url: String,
    /// Any other keys, available to `{"config": "key"}` link targets.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            container: String::from("nav"),
            languages: None,
            language_page: String::new(),
            language_query: String::from("lang"),
            base_url: String::new(),
            extra: IndexMap::new(),
        }
    }
}

impl NavbarConfig {
    /// Parse a TOML document.
    ///
    /// # Examples
    ///
    /// ```
    /// use navglot::NavbarConfig;
    ///
    /// let config = NavbarConfig::from_toml_str("container = \"#navbar\"\nsite = \"https://x.test\"\n")?;
    /// assert_eq!(config.container, "#navbar");
    /// assert_eq!(config.language_query, "lang");
    /// assert_eq!(config.lookup("site").as_deref(), Some("https://x.test"));
    /// # Ok::<(), navglot::ConfigError>(())
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Parse a JSON document.
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Read a configuration file; `.json` files are parsed as JSON and
    /// anything else as TOML.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let source = read(path)?;
        match path.extension() {
            Some(extension) if extension.eq_ignore_ascii_case("json") => {
                Self::from_json_str(&source)
            }
            _ => Self::from_toml_str(&source),
        }
    }

    /// The language switcher selector, ignoring blank values.
    #[must_use]
    pub fn languages(&self) -> Option<&str> {
        self.languages
            .as_deref()
            .map(str::trim)
            .filter(|selector| !selector.is_empty())
    }

    /// Value of configuration key `key` as text.
    ///
    /// Known settings resolve to their current value; other keys come from
    /// [`Self::extra`].
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<String> {
        match key {
            "container" => Some(self.container.clone()),
            "languages" => Some(self.languages.clone().unwrap_or_default()),
            "language_page" => Some(self.language_page.clone()),
            "language_query" => Some(self.language_query.clone()),
            "base_url" => Some(self.base_url.clone()),
            other => self.extra.get(other).map(value_text),
        }
    }
}

pub(crate) fn read(path: &Utf8Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_string(),
        source,
    })
}
