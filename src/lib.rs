//! Localised navigation bars rendered through an injectable DOM platform.
//!
//! A [`Navbar`] combines a [`NavbarConfig`], a
//! [`navglot_common::i18n::LocaleRegistry`] and a declarative structure of
//! [`NavItem`]s. Filling it renders the structure into the page, populates
//! the language switcher, and wires the burger and fullscreen toggles.

pub mod config;
pub mod markup;
pub mod navbar;

pub use config::{ConfigError, NavbarConfig};
pub use navbar::{LinkTarget, LocaleText, NavItem, NavNode, Navbar, load_structure, parse_structure};
