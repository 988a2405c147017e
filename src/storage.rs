//! Storage for localized field values.
//!
//! A [`LocalizedValueMap`] maps language codes to text for one field
//! instance. Assignment and lookup are total: values for unavailable
//! languages and empty values are dropped without an error, and missing
//! entries read as `None`. Rendering code can therefore bind and display
//! fields without handling failures.

use crate::i18n::{LanguageAvailability, RequestLanguageContext};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Reserved key holding a value that belongs to no particular language.
///
/// Maps built with [`LocalizedValueMap::from_text`] store their text here.
pub const DEFAULT_VALUE_KEY: &str = "__default_value";

/// Language code to text mapping with validation on write.
///
/// Entries keep insertion order. Every key is either an available language
/// (at the time it was written) or [`DEFAULT_VALUE_KEY`], and no value is
/// ever empty.
#[derive(Clone)]
pub struct LocalizedValueMap {
    entries: IndexMap<String, String>,
    default_language: Option<String>,
    required: bool,
    languages: Arc<dyn LanguageAvailability>,
}

impl LocalizedValueMap {
    /// Create an empty map validating keys against `languages`.
    pub fn new(languages: Arc<dyn LanguageAvailability>) -> Self {
        Self {
            entries: IndexMap::new(),
            default_language: None,
            required: false,
            languages,
        }
    }

    /// Create a map from `(code, text)` pairs.
    ///
    /// Each pair goes through [`set`](Self::set), so pairs with unavailable
    /// codes or empty text are dropped.
    pub fn from_entries<I, K, V>(languages: Arc<dyn LanguageAvailability>, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = Self::new(languages);
        map.update(entries);
        map
    }

    /// Create a map holding `text` under [`DEFAULT_VALUE_KEY`].
    ///
    /// Used when a plain, language-less value is bound to a localized field.
    /// Empty text yields an empty map.
    pub fn from_text(languages: Arc<dyn LanguageAvailability>, text: impl Into<String>) -> Self {
        let mut map = Self::new(languages);
        map.set(DEFAULT_VALUE_KEY, text);
        map
    }

    /// Set the instance-level fallback language.
    pub fn with_default_language(mut self, code: impl Into<String>) -> Self {
        self.default_language = Some(code.into());
        self
    }

    /// Set whether text conversion must always produce a value.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// The instance-level fallback language, if set.
    pub fn default_language(&self) -> Option<&str> {
        self.default_language.as_deref()
    }

    /// Set or clear the instance-level fallback language.
    pub fn set_default_language(&mut self, code: Option<String>) {
        self.default_language = code;
    }

    /// Whether text conversion always falls back to a stored value.
    pub fn required(&self) -> bool {
        self.required
    }

    /// Set whether text conversion must always produce a value.
    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    /// The language availability service this map validates against.
    pub fn languages(&self) -> &Arc<dyn LanguageAvailability> {
        &self.languages
    }

    /// Store `value` under `key`.
    ///
    /// - An empty `value` removes `key` instead.
    /// - [`DEFAULT_VALUE_KEY`] is always accepted.
    /// - Any other key must be an available language; otherwise the value is
    ///   discarded.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        if value.is_empty() {
            self.entries.shift_remove(&key);
            return;
        }

        if key == DEFAULT_VALUE_KEY || self.languages.is_available(&key) {
            self.entries.insert(key, value);
        } else {
            debug!("Ignoring value for unavailable language '{}'", key);
        }
    }

    /// Alias for [`set`](Self::set).
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.set(key, value);
    }

    /// Remove `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.shift_remove(key)
    }

    /// Apply [`set`](Self::set) to every pair in order.
    ///
    /// Rejected pairs are skipped; the rest are still applied.
    pub fn update<I, K, V>(&mut self, source: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in source {
            self.set(key, value);
        }
    }

    /// Get the value stored under `key`.
    ///
    /// Never fails; unknown or unavailable keys simply have no value.
    ///
    /// # Returns
    /// * `Some(&str)` if a value is stored for `key`
    /// * `None` if `key` is absent
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Resolve the value to show when no specific language is asked for.
    ///
    /// A single entry is returned whatever its key. With more entries the
    /// first language holding a value wins, in this order: the map's own
    /// default language, the request's default language, the site default
    /// language. Failing all of those, the first stored entry is returned.
    pub fn get_default_value(&self, context: Option<&dyn RequestLanguageContext>) -> Option<&str> {
        match self.entries.len() {
            0 => return None,
            1 => return self.first_value(),
            _ => {}
        }

        let site_default = self.languages.default_language();
        let candidates = [
            self.default_language.as_deref(),
            context.and_then(|ctx| ctx.default_language()),
            Some(site_default.as_str()),
        ];

        let value = candidates
            .into_iter()
            .flatten()
            .find_map(|code| self.get(code))
            .or_else(|| {
                debug!("No fallback language has a value, using first entry");
                self.first_value()
            });
        value
    }

    /// The value text conversion renders, before formatting.
    ///
    /// The active language is the request's current language, or the site
    /// default when there is no request. Required maps always fall back to
    /// [`get_default_value`](Self::get_default_value); optional maps only
    /// fall back to the language-less value.
    pub fn text_value(&self, context: Option<&dyn RequestLanguageContext>) -> Option<&str> {
        if self.required {
            return self.get_default_value(context);
        }

        let site_default;
        let active = match context.and_then(|ctx| ctx.current_language()) {
            Some(code) => code,
            None => {
                site_default = self.languages.default_language();
                site_default.as_str()
            }
        };

        self.get(active).or_else(|| self.get(DEFAULT_VALUE_KEY))
    }

    /// Render the map as text.
    ///
    /// A missing value renders as an empty string, not as a "None" marker.
    /// Use [`text_value`](Self::text_value) to tell a missing value apart
    /// from rendered text.
    pub fn to_text(&self, context: Option<&dyn RequestLanguageContext>) -> String {
        self.display(context).to_string()
    }

    /// UTF-8 bytes of [`to_text`](Self::to_text).
    pub fn to_bytes(&self, context: Option<&dyn RequestLanguageContext>) -> Vec<u8> {
        self.to_text(context).into_bytes()
    }

    /// Adapter formatting the map through [`fmt::Display`].
    pub fn display<'a>(
        &'a self,
        context: Option<&'a dyn RequestLanguageContext>,
    ) -> LocalizedDisplay<'a> {
        LocalizedDisplay { map: self, context }
    }

    /// Copy all entries, the reserved key included, into a plain map.
    pub fn to_dict(&self) -> IndexMap<String, String> {
        self.entries.clone()
    }

    /// Independent copy sharing only the availability service.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Stored keys in insertion order, the reserved key included.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Stored values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(String::as_str)
    }

    /// `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Number of stored entries, the reserved key included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no value is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if a value is stored under `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Whether a language-less value is stored.
    pub fn has_default_value(&self) -> bool {
        self.contains_key(DEFAULT_VALUE_KEY)
    }

    fn first_value(&self) -> Option<&str> {
        self.entries.values().next().map(String::as_str)
    }
}

/// [`fmt::Display`] adapter returned by [`LocalizedValueMap::display`].
pub struct LocalizedDisplay<'a> {
    map: &'a LocalizedValueMap,
    context: Option<&'a dyn RequestLanguageContext>,
}

impl fmt::Display for LocalizedDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.map.text_value(self.context).unwrap_or_default())
    }
}

impl fmt::Debug for LocalizedValueMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalizedValueMap")
            .field("entries", &self.entries)
            .field("default_language", &self.default_language)
            .field("required", &self.required)
            .finish_non_exhaustive()
    }
}

impl PartialEq for LocalizedValueMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
            && self.default_language == other.default_language
            && self.required == other.required
    }
}

impl PartialEq<IndexMap<String, String>> for LocalizedValueMap {
    fn eq(&self, other: &IndexMap<String, String>) -> bool {
        self.entries == *other
    }
}

impl PartialEq<HashMap<String, String>> for LocalizedValueMap {
    fn eq(&self, other: &HashMap<String, String>) -> bool {
        self.entries.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K, V> Extend<(K, V)> for LocalizedValueMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.update(iter);
    }
}

/// Serializes as the plain entry mapping; attributes are field settings,
/// not content.
impl Serialize for LocalizedValueMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}
