//! Language lookups consumed by localized field storage.
//!
//! # Architecture
//!
//! - `availability`: capability traits for the site-wide language list and
//!   the per-request language settings, plus a plain request value
//! - `registry`: validated language table implementing `LanguageAvailability`
//!
//! # Example
//!
//! ```rust
//! use i18nfield::i18n::{LanguageAvailability, LanguageRegistry, RequestLanguage};
//!
//! let registry = LanguageRegistry::builtin();
//! assert_eq!(registry.default_language(), "en");
//! assert!(registry.is_available("es"));
//!
//! let request = RequestLanguage::new().with_current_language("es");
//! # let _ = request;
//! ```

mod availability;
mod registry;

pub use availability::{LanguageAvailability, RequestLanguage, RequestLanguageContext};
pub use registry::{is_valid_code, LanguageConfig, LanguageRegistry, RegistryError};
