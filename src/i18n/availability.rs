//! Capability interfaces consulted by localized field storage.
//!
//! Storage never looks up languages through ambient global state. The host
//! hands it a [`LanguageAvailability`] when the value map is created and an
//! optional [`RequestLanguageContext`] whenever a fallback has to be resolved.

/// Process-wide view of the languages a deployment supports.
///
/// Implementations are shared read-only between every value map of a
/// deployment, hence the `Send + Sync` bound.
pub trait LanguageAvailability: Send + Sync {
    /// The site-wide default language code (e.g., "en").
    fn default_language(&self) -> String;

    /// All language codes values may currently be stored under.
    fn available_languages(&self) -> Vec<String>;

    /// Check whether `code` is one of the available languages.
    fn is_available(&self, code: &str) -> bool {
        self.available_languages().iter().any(|lang| lang == code)
    }

    /// Available languages paired with a display name.
    ///
    /// The provided implementation has no names to offer and repeats the code.
    fn language_listing(&self) -> Vec<(String, String)> {
        self.available_languages()
            .into_iter()
            .map(|code| (code.clone(), code))
            .collect()
    }
}

/// Language settings of the request currently being served.
pub trait RequestLanguageContext {
    /// Default language negotiated for this request, if any.
    fn default_language(&self) -> Option<&str>;

    /// Language the request is rendered in, if known.
    fn current_language(&self) -> Option<&str>;
}

/// Plain request language settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestLanguage {
    default_language: Option<String>,
    current_language: Option<String>,
}

impl RequestLanguage {
    /// Settings with neither a default nor a current language.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request's default language.
    pub fn with_default_language(mut self, code: impl Into<String>) -> Self {
        self.default_language = Some(code.into());
        self
    }

    /// Set the language the request is rendered in.
    pub fn with_current_language(mut self, code: impl Into<String>) -> Self {
        self.current_language = Some(code.into());
        self
    }
}

impl RequestLanguageContext for RequestLanguage {
    fn default_language(&self) -> Option<&str> {
        self.default_language.as_deref()
    }

    fn current_language(&self) -> Option<&str> {
        self.current_language.as_deref()
    }
}
