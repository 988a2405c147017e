//! Language registry: a validated table of the languages a deployment supports.
//!
//! The registry is the stock [`LanguageAvailability`] implementation. Hosts
//! that already track languages elsewhere can implement the trait directly
//! and skip this module.

use crate::i18n::LanguageAvailability;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;
use thiserror::Error;

/// Configuration for a supported language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageConfig {
    /// Language code (e.g., "en", "pt-BR")
    pub code: String,

    /// English name of the language (e.g., "English", "Spanish")
    pub name: String,

    /// Native name of the language (e.g., "English", "Español")
    pub native_name: String,

    /// Whether this is the site-wide default language (exactly one must be true)
    pub is_default: bool,

    /// Whether values may be stored for this language
    pub enabled: bool,
}

impl LanguageConfig {
    /// An enabled, non-default language.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        native_name: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            native_name: native_name.into(),
            is_default: false,
            enabled: true,
        }
    }

    /// An enabled language whose names are just its code.
    pub fn from_code(code: impl Into<String>) -> Self {
        let code = code.into();
        Self::new(code.clone(), code.clone(), code)
    }

    /// Mark this language as the site-wide default.
    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Mark this language as disabled.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Reasons a language table is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("language registry must contain at least one language")]
    Empty,

    #[error("invalid language code: '{0}'")]
    InvalidCode(String),

    #[error("duplicate language code: '{0}'")]
    DuplicateCode(String),

    #[error("no default language configured")]
    NoDefault,

    #[error("multiple default languages configured: {}", .0.join(", "))]
    MultipleDefaults(Vec<String>),

    #[error("default language '{0}' is disabled")]
    DefaultDisabled(String),

    #[error("default language '{0}' is not in the language list")]
    UnknownDefault(String),
}

/// Validated table of supported languages.
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

static CODE_REGEX: OnceLock<Regex> = OnceLock::new();

/// Check that `code` looks like a language code ("en", "pt-BR", "zh-Hant").
pub fn is_valid_code(code: &str) -> bool {
    let regex = CODE_REGEX.get_or_init(|| {
        Regex::new(r"^[a-z]{2,3}(-[A-Za-z0-9]{2,8})*$").expect("language code pattern is valid")
    });
    regex.is_match(code)
}

impl LanguageRegistry {
    /// Build a registry from language configurations.
    ///
    /// # Errors
    /// Fails when the table is empty, a code is malformed or repeated, or
    /// there is not exactly one enabled default language.
    pub fn new(languages: Vec<LanguageConfig>) -> Result<Self, RegistryError> {
        if languages.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut seen = HashSet::new();
        for lang in &languages {
            if !is_valid_code(&lang.code) {
                return Err(RegistryError::InvalidCode(lang.code.clone()));
            }
            if !seen.insert(lang.code.as_str()) {
                return Err(RegistryError::DuplicateCode(lang.code.clone()));
            }
        }

        let defaults: Vec<&LanguageConfig> =
            languages.iter().filter(|lang| lang.is_default).collect();
        match defaults.as_slice() {
            [] => return Err(RegistryError::NoDefault),
            [single] if !single.enabled => {
                return Err(RegistryError::DefaultDisabled(single.code.clone()))
            }
            [_] => {}
            many => {
                return Err(RegistryError::MultipleDefaults(
                    many.iter().map(|lang| lang.code.clone()).collect(),
                ))
            }
        }

        Ok(Self { languages })
    }

    /// Build a registry from bare codes, naming `default` as the default.
    ///
    /// Language names fall back to the code itself, except for languages
    /// found in the built-in table, which keep their names.
    pub fn from_codes<I, S>(codes: I, default: &str) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let builtin = builtin_languages();
        let languages: Vec<LanguageConfig> = codes
            .into_iter()
            .map(|code| {
                let code = code.into();
                let mut config = builtin
                    .iter()
                    .find(|lang| lang.code == code)
                    .cloned()
                    .unwrap_or_else(|| LanguageConfig::from_code(code.clone()));
                config.is_default = code == default;
                config
            })
            .collect();

        if !languages.is_empty() && !languages.iter().any(|lang| lang.is_default) {
            return Err(RegistryError::UnknownDefault(default.to_string()));
        }

        Self::new(languages)
    }

    /// The built-in language table: German, English (default), Spanish,
    /// French and Portuguese.
    pub fn builtin() -> Self {
        Self {
            languages: builtin_languages(),
        }
    }

    /// Get a language configuration by its code.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Get all enabled languages.
    pub fn list_enabled(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().filter(|lang| lang.enabled).collect()
    }

    /// Get all languages (including disabled ones).
    pub fn list_all(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().collect()
    }

    /// Get the default language configuration.
    ///
    /// Construction guarantees exactly one default exists.
    pub fn default_config(&self) -> &LanguageConfig {
        self.languages
            .iter()
            .find(|lang| lang.is_default)
            .unwrap_or(&self.languages[0])
    }

    /// Check if a language code is supported and enabled.
    pub fn is_enabled(&self, code: &str) -> bool {
        self.get_by_code(code)
            .map(|lang| lang.enabled)
            .unwrap_or(false)
    }
}

impl LanguageAvailability for LanguageRegistry {
    fn default_language(&self) -> String {
        self.default_config().code.clone()
    }

    fn available_languages(&self) -> Vec<String> {
        self.list_enabled()
            .into_iter()
            .map(|lang| lang.code.clone())
            .collect()
    }

    fn is_available(&self, code: &str) -> bool {
        self.is_enabled(code)
    }

    fn language_listing(&self) -> Vec<(String, String)> {
        self.list_enabled()
            .into_iter()
            .map(|lang| (lang.code.clone(), lang.native_name.clone()))
            .collect()
    }
}

fn builtin_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig::new("de", "German", "Deutsch"),
        LanguageConfig::new("en", "English", "English").as_default(),
        LanguageConfig::new("es", "Spanish", "Español"),
        LanguageConfig::new("fr", "French", "Français"),
        LanguageConfig::new("pt", "Portuguese", "Português"),
    ]
}
