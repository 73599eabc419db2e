use std::fs;

use camino::Utf8Path;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Error raised when language packs cannot be loaded or registered.
#[derive(Debug, Error)]
pub enum I18nError {
    /// The pack file could not be read.
    #[error("failed to read language packs from `{path}`")]
    Read {
        /// The path that was read.
        path: String,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The pack document is not a mapping of codes to valid packs.
    #[error("failed to parse language packs: {0}")]
    Parse(#[from] serde_json::Error),
    /// An alias pointed at a code that has no pack.
    #[error("cannot alias `{alias}` to unregistered language `{target}`")]
    UnknownAlias {
        /// The code being registered.
        alias: String,
        /// The code it should have pointed at.
        target: String,
    },
}

/// A single language's display name, message templates, and attribute groups.
///
/// Attribute groups are any other top-level fields of the pack (for example
/// number formatting tables or per-language asset names) and are kept as raw
/// JSON so callers can index them freely.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct LocalePack {
    language: String,
    #[serde(default)]
    messages: IndexMap<String, String>,
    #[serde(flatten)]
    groups: IndexMap<String, Value>,
}

impl LocalePack {
    /// Create a pack with a display name and no messages.
    #[must_use]
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..Self::default()
        }
    }

    /// Add a message template.
    #[must_use]
    pub fn with_message(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.messages.insert(key.into(), template.into());
        self
    }

    /// Add an attribute group.
    #[must_use]
    pub fn with_group(mut self, name: impl Into<String>, value: Value) -> Self {
        self.groups.insert(name.into(), value);
        self
    }

    /// Human-readable name of the language, shown in language switchers.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Message template for `key`.
    #[must_use]
    pub fn template(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    /// Raw attribute group named `name`.
    #[must_use]
    pub fn group(&self, name: &str) -> Option<&Value> {
        self.groups.get(name)
    }

    /// Any top-level field, including `language` and `messages`, as JSON.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<Value> {
        match name {
            "language" => Some(Value::String(self.language.clone())),
            "messages" => Some(Value::Object(
                self.messages
                    .iter()
                    .map(|(key, template)| (key.clone(), Value::String(template.clone())))
                    .collect(),
            )),
            other => self.group(other).cloned(),
        }
    }
}

/// Parse a JSON object mapping language codes to packs, keeping its order.
///
/// # Errors
///
/// Returns [`I18nError::Parse`] for malformed documents.
pub fn parse_packs(source: &str) -> Result<IndexMap<String, LocalePack>, I18nError> {
    Ok(serde_json::from_str(source)?)
}

/// Read and parse a pack file.
///
/// # Errors
///
/// Returns [`I18nError::Read`] when the file cannot be read and
/// [`I18nError::Parse`] when it is malformed.
pub fn load_packs(path: &Utf8Path) -> Result<IndexMap<String, LocalePack>, I18nError> {
    let source = fs::read_to_string(path).map_err(|source| I18nError::Read {
        path: path.to_string(),
        source,
    })?;
    parse_packs(&source)
}
