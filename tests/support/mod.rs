//! Shared fixtures for the navbar suites.
//!
//! Builds the reference page: an in-memory document at
//! `https://example.test/` holding an empty `#navbar`, the English and Dutch
//! packs from `tests/fixtures/locales.json`, and the structure from
//! `tests/fixtures/navbar.json`.
pub mod page;
