use std::rc::Rc;

use camino::Utf8Path;
use indexmap::IndexMap;
use log::debug;
use serde_json::{Map, Value};

use super::format::vsprintf;
use super::number::NumberFormat;
use super::pack::{I18nError, LocalePack, load_packs, parse_packs};

/// What a message lookup yields when the active pack lacks the key.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum MessageFallback {
    /// Describe the lookup as `key(arg1,arg2)`, or the bare key without
    /// arguments.
    #[default]
    Describe,
    /// Yield nothing so callers keep their current content.
    Keep,
    /// Yield this text.
    Text(String),
}

impl From<Option<&str>> for MessageFallback {
    fn from(fallback: Option<&str>) -> Self {
        fallback.map_or(Self::Describe, |text| Self::Text(text.to_owned()))
    }
}

/// Language packs keyed by code plus the active selection.
///
/// Packs are shared through [`Rc`], so one pack may be registered under
/// several codes with [`LocaleRegistry::alias`]. "Is this the active
/// language" always compares pack identity rather than codes, which makes
/// every alias of the active pack count as active.
///
/// Lookups never fail: missing packs, messages, groups and keys degrade to
/// the caller's fallback or to the key itself.
///
/// ```
/// use navglot_common::i18n::{LocalePack, LocaleRegistry};
///
/// let mut registry = LocaleRegistry::new(
///     [
///         ("en", LocalePack::new("English").with_message("hello", "Hello %s")),
///         ("nl", LocalePack::new("Nederlands").with_message("hello", "Hallo %s")),
///     ],
///     "en",
/// );
/// assert_eq!(registry.message("hello", &["Ada"], None), "Hello Ada");
///
/// registry.select("nl");
/// assert_eq!(registry.message("hello", &["Ada"], None), "Hallo Ada");
/// assert_eq!(registry.message("bye", &["Ada"], None), "bye(Ada)");
/// ```
#[derive(Clone, Debug, Default)]
pub struct LocaleRegistry {
    specs: IndexMap<String, Rc<LocalePack>>,
    lang: String,
    selected: Option<Rc<LocalePack>>,
}

impl LocaleRegistry {
    /// Build a registry from `(code, pack)` pairs, selecting `lang`.
    ///
    /// When `lang` has no pack the registry starts without an active pack
    /// and every lookup uses its fallback until [`Self::select`] succeeds.
    #[must_use]
    pub fn new<I, C>(packs: I, lang: &str) -> Self
    where
        I: IntoIterator<Item = (C, LocalePack)>,
        C: Into<String>,
    {
        let specs: IndexMap<String, Rc<LocalePack>> = packs
            .into_iter()
            .map(|(code, pack)| (code.into(), Rc::new(pack)))
            .collect();
        let selected = specs.get(lang).cloned();
        if selected.is_none() {
            debug!(target: "navglot::i18n", "no language pack for initial language `{lang}`");
        }
        Self {
            specs,
            lang: lang.to_owned(),
            selected,
        }
    }

    /// Build a registry from a JSON object of packs keyed by code.
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::Parse`] when `source` is not such an object.
    pub fn from_json(source: &str, lang: &str) -> Result<Self, I18nError> {
        Ok(Self::new(parse_packs(source)?, lang))
    }

    /// Build a registry from a JSON pack file.
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::Read`] or [`I18nError::Parse`].
    pub fn load(path: &Utf8Path, lang: &str) -> Result<Self, I18nError> {
        Ok(Self::new(load_packs(path)?, lang))
    }

    /// Register or replace the pack for `code`.
    pub fn register(&mut self, code: impl Into<String>, pack: LocalePack) {
        let key = code.into();
        let shared = Rc::new(pack);
        if key == self.lang {
            self.selected = Some(Rc::clone(&shared));
        }
        self.specs.insert(key, shared);
    }

    /// Register `alias` as another code for the pack of `target`.
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::UnknownAlias`] when `target` has no pack.
    pub fn alias(&mut self, alias: impl Into<String>, target: &str) -> Result<(), I18nError> {
        let code = alias.into();
        let Some(pack) = self.specs.get(target).cloned() else {
            return Err(I18nError::UnknownAlias {
                alias: code,
                target: target.to_owned(),
            });
        };
        if code == self.lang {
            self.selected = Some(Rc::clone(&pack));
        }
        self.specs.insert(code, pack);
        Ok(())
    }

    /// Make `code` the active language if it has a pack.
    ///
    /// Unknown codes leave the selection untouched. Returns the active pack
    /// either way.
    pub fn select(&mut self, code: &str) -> Option<&LocalePack> {
        let Some(pack) = self.specs.get(code).cloned() else {
            debug!(target: "navglot::i18n", "ignoring selection of unknown language `{code}`");
            return self.selected.as_deref();
        };
        self.selected = Some(pack);
        code.clone_into(&mut self.lang);
        self.selected.as_deref()
    }

    /// Code of the active language.
    #[must_use]
    pub fn lang(&self) -> &str {
        &self.lang
    }

    /// The active pack, if the active code has one.
    #[must_use]
    pub fn selected(&self) -> Option<&LocalePack> {
        self.selected.as_deref()
    }

    /// Registered codes in registration order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.specs.keys().map(String::as_str)
    }

    /// Pack registered for `code`.
    #[must_use]
    pub fn pack(&self, code: &str) -> Option<&LocalePack> {
        self.specs.get(code).map(Rc::as_ref)
    }

    /// Whether the pack registered for `code` is the active pack object.
    #[must_use]
    pub fn is_active(&self, code: &str) -> bool {
        match (self.specs.get(code), &self.selected) {
            (Some(pack), Some(selected)) => Rc::ptr_eq(pack, selected),
            _ => false,
        }
    }

    /// Resolve message `key` with positional `args`.
    ///
    /// Missing messages yield `fallback` when given, otherwise a description
    /// such as `key(a,b)`.
    #[must_use]
    pub fn message<S: AsRef<str>>(&self, key: &str, args: &[S], fallback: Option<&str>) -> String {
        self.resolve_message(key, args, &MessageFallback::from(fallback))
            .unwrap_or_else(|| describe(key, args))
    }

    /// Resolve message `key`, applying `fallback` when the key is missing.
    ///
    /// Returns `None` only for [`MessageFallback::Keep`].
    #[must_use]
    pub fn resolve_message<S: AsRef<str>>(
        &self,
        key: &str,
        args: &[S],
        fallback: &MessageFallback,
    ) -> Option<String> {
        if let Some(template) = self.template(key) {
            return Some(vsprintf(template, args));
        }
        match fallback {
            MessageFallback::Describe => Some(describe(key, args)),
            MessageFallback::Keep => None,
            MessageFallback::Text(text) => Some(text.clone()),
        }
    }

    /// Value of `key` in top-level field `group` of the active pack, or
    /// `fallback`, or `key`.
    ///
    /// Any field can be indexed, `messages` included, so
    /// `attribute("messages", "hello", None)` yields the raw template.
    #[must_use]
    pub fn attribute(&self, group: &str, key: &str, fallback: Option<&str>) -> String {
        self.get(group)
            .and_then(|values| values.get(key).map(value_text))
            .unwrap_or_else(|| fallback.unwrap_or(key).to_owned())
    }

    /// Number formatting conventions of the active pack.
    ///
    /// Without an active pack the `en-US` convention applies.
    #[must_use]
    pub fn number_format(&self) -> NumberFormat {
        self.selected
            .as_deref()
            .map(NumberFormat::from_pack)
            .unwrap_or_default()
    }

    /// Look up the active language in an external table keyed by code, then
    /// optionally `key` inside it.
    ///
    /// Missing entries yield `fallback`, else `key` as a string, else `None`.
    #[must_use]
    pub fn retrieve(
        &self,
        specs: &Map<String, Value>,
        key: Option<&str>,
        fallback: Option<&Value>,
    ) -> Option<Value> {
        let entry = specs.get(&self.lang);
        key.map_or(entry, |name| entry.and_then(|value| value.get(name)))
            .or(fallback)
            .cloned()
            .or_else(|| key.map(|name| Value::String(name.to_owned())))
    }

    /// Raw top-level field `group` of the active pack.
    #[must_use]
    pub fn get(&self, group: &str) -> Option<Value> {
        self.selected.as_deref().and_then(|pack| pack.field(group))
    }

    fn template(&self, key: &str) -> Option<&str> {
        self.selected.as_deref().and_then(|pack| pack.template(key))
    }
}

fn describe<S: AsRef<str>>(key: &str, args: &[S]) -> String {
    if args.is_empty() {
        return key.to_owned();
    }
    let joined: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
    format!("{key}({})", joined.join(","))
}

/// Render a JSON value as text the way it would be interpolated into markup.
#[must_use]
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
