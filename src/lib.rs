//! Localized field values for content frameworks.
//!
//! A [`LocalizedValueMap`] holds one text value per language for a single
//! field instance. Writes are validated against the deployment's available
//! languages and never fail; reads resolve a fallback value when the wanted
//! language is missing.

pub mod config;
pub mod i18n;
pub mod storage;

pub use storage::{LocalizedValueMap, DEFAULT_VALUE_KEY};
