use crate::i18n::LanguageRegistry;
use anyhow::{bail, Context, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // Languages
    pub languages: Option<Vec<String>>,
    pub default_language: Option<String>,

    // Field settings
    pub required: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Languages - comma-separated codes, built-in table when unset
            languages: std::env::var("I18NFIELD_LANGUAGES")
                .ok()
                .map(|v| parse_language_list(&v))
                .filter(|codes| !codes.is_empty()),
            default_language: std::env::var("I18NFIELD_DEFAULT_LANGUAGE")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),

            // Field settings
            required: match std::env::var("I18NFIELD_REQUIRED") {
                Ok(v) => parse_bool(&v).context("I18NFIELD_REQUIRED must be a boolean")?,
                Err(_) => false,
            },
        })
    }

    /// Build the language registry described by this configuration.
    pub fn registry(&self) -> Result<LanguageRegistry> {
        let Some(codes) = &self.languages else {
            let registry = LanguageRegistry::builtin();
            if let Some(default) = &self.default_language {
                let codes: Vec<String> = registry
                    .list_all()
                    .into_iter()
                    .map(|lang| lang.code.clone())
                    .collect();
                return LanguageRegistry::from_codes(codes, default)
                    .context("Invalid I18NFIELD_DEFAULT_LANGUAGE");
            }
            return Ok(registry);
        };

        let default = match &self.default_language {
            Some(default) => default.as_str(),
            None if codes.iter().any(|code| code == "en") => "en",
            None => codes.first().map(String::as_str).unwrap_or("en"),
        };

        LanguageRegistry::from_codes(codes.iter().cloned(), default)
            .context("Invalid I18NFIELD_LANGUAGES / I18NFIELD_DEFAULT_LANGUAGE")
    }
}

fn parse_language_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("Unrecognized boolean value: '{}'", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::LanguageAvailability;
    use serial_test::serial;

    fn clear_env() {
        std::env::remove_var("I18NFIELD_LANGUAGES");
        std::env::remove_var("I18NFIELD_DEFAULT_LANGUAGE");
        std::env::remove_var("I18NFIELD_REQUIRED");
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = Config::from_env().expect("defaults load");

        assert_eq!(config.languages, None);
        assert_eq!(config.default_language, None);
        assert!(!config.required);

        let registry = config.registry().expect("builtin registry");
        assert_eq!(registry.default_language(), "en");
        assert_eq!(registry.available_languages().len(), 5);
    }

    #[test]
    #[serial]
    fn test_from_env_language_list() {
        clear_env();
        std::env::set_var("I18NFIELD_LANGUAGES", " es, en ,,nl ");
        std::env::set_var("I18NFIELD_DEFAULT_LANGUAGE", "es");
        std::env::set_var("I18NFIELD_REQUIRED", "yes");

        let config = Config::from_env().expect("config loads");
        clear_env();

        assert_eq!(
            config.languages,
            Some(vec!["es".to_string(), "en".to_string(), "nl".to_string()])
        );
        assert!(config.required);

        let registry = config.registry().expect("valid registry");
        assert_eq!(registry.default_language(), "es");
        assert_eq!(registry.available_languages(), vec!["es", "en", "nl"]);
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_required() {
        clear_env();
        std::env::set_var("I18NFIELD_REQUIRED", "sometimes");

        let result = Config::from_env();
        clear_env();

        assert!(result.is_err());
    }

    #[test]
    fn test_registry_defaults_to_english_when_listed() {
        let config = Config {
            languages: Some(vec!["fr".to_string(), "en".to_string()]),
            default_language: None,
            required: false,
        };
        let registry = config.registry().expect("valid registry");
        assert_eq!(registry.default_language(), "en");
    }

    #[test]
    fn test_registry_defaults_to_first_language() {
        let config = Config {
            languages: Some(vec!["fr".to_string(), "de".to_string()]),
            default_language: None,
            required: false,
        };
        let registry = config.registry().expect("valid registry");
        assert_eq!(registry.default_language(), "fr");
    }

    #[test]
    fn test_registry_builtin_with_other_default() {
        let config = Config {
            languages: None,
            default_language: Some("pt".to_string()),
            required: false,
        };
        let registry = config.registry().expect("valid registry");
        assert_eq!(registry.default_language(), "pt");
        assert_eq!(registry.get_by_code("pt").unwrap().native_name, "Português");
    }

    #[test]
    fn test_registry_unknown_default() {
        let config = Config {
            languages: Some(vec!["fr".to_string()]),
            default_language: Some("en".to_string()),
            required: false,
        };
        let err = config.registry().unwrap_err();
        assert!(format!("{:#}", err).contains("not in the language list"));
    }

    #[test]
    fn test_registry_invalid_code() {
        let config = Config {
            languages: Some(vec!["en".to_string(), "Klingon!".to_string()]),
            default_language: None,
            required: false,
        };
        assert!(config.registry().is_err());
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("TRUE").unwrap());
        assert!(parse_bool("1").unwrap());
        assert!(!parse_bool("off").unwrap());
        assert!(parse_bool("maybe").is_err());
    }
}
