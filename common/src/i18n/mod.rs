//! Language packs, message lookup and language navigation.
//!
//! [`LocaleRegistry`] owns the packs and the active language. Message
//! templates are printf-style and formatted by [`vsprintf`]. The registry
//! also drives the page: it fills language switchers through
//! [`LocaleRegistry::generate_navigation`] and substitutes `data-message`
//! markers through [`LocaleRegistry::update_messages`], both against any
//! [`crate::dom::Platform`].
//!
//! Packs may also carry number formatting conventions, exposed as a
//! [`NumberFormat`] through [`LocaleRegistry::number_format`].
//!
//! Lookups never fail. Missing packs, keys and groups fall back to the
//! caller's fallback or to the key itself; only loading returns
//! [`I18nError`].

mod format;
mod messages;
mod navigation;
mod number;
mod pack;
mod registry;

pub use format::vsprintf;
pub use navigation::{
    ActiveTarget, NavigationBase, NavigationRequest, navigation_href, separator_for,
    strip_language,
};
pub use number::NumberFormat;
pub use pack::{I18nError, LocalePack, load_packs, parse_packs};
pub use registry::{LocaleRegistry, MessageFallback, value_text};
