//! Locale registry and platform seam shared by the navglot navbar.
//!
//! [`i18n`] holds language packs, message formatting and the language
//! switcher. [`dom`] defines the [`dom::Platform`] trait the rest of the
//! workspace renders through, plus [`dom::MemoryDom`] for hosts without a
//! browser.

pub mod dom;
pub mod i18n;

pub use dom::{Event, EventTarget, Listener, ListenerId, MemoryDom, NodeId, Platform, listener};
pub use i18n::{I18nError, LocalePack, LocaleRegistry, MessageFallback};
