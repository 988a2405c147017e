//! Resolve a localized field value from the command line.
//!
//! Usage:
//!   i18nfield [FILE] [--language CODE] [--default-language CODE]
//!
//! Reads a JSON object of `language code -> text` from FILE (or stdin),
//! binds it to a localized value map using the configured languages and
//! prints the stored entries, the fallback value and the rendered text.
//!
//! Optional environment variables:
//! - I18NFIELD_LANGUAGES (comma-separated codes, defaults to de,en,es,fr,pt)
//! - I18NFIELD_DEFAULT_LANGUAGE (defaults to en)
//! - I18NFIELD_REQUIRED (defaults to false)

use anyhow::{bail, Context, Result};
use i18nfield::config::Config;
use i18nfield::i18n::{LanguageAvailability, RequestLanguage, RequestLanguageContext};
use i18nfield::LocalizedValueMap;
use indexmap::IndexMap;
use std::io::Read;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Default)]
struct Args {
    file: Option<String>,
    language: Option<String>,
    default_language: Option<String>,
    help: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => parsed.help = true,
            "--language" => {
                parsed.language = Some(args.next().context("--language needs a value")?);
            }
            "--default-language" => {
                parsed.default_language =
                    Some(args.next().context("--default-language needs a value")?);
            }
            flag if flag.starts_with("--") => bail!("Unknown option: {}", flag),
            _ if parsed.file.is_some() => bail!("Only one input file may be given"),
            _ => parsed.file = Some(arg),
        }
    }

    Ok(parsed)
}

fn print_usage() {
    println!(
        r#"
Resolve a localized field value

USAGE:
    i18nfield [FILE] [--language CODE] [--default-language CODE]

ARGS:
    FILE                     JSON object of language code -> text (stdin when omitted)

OPTIONS:
    --language CODE          Language the request is rendered in
    --default-language CODE  Fallback language stored on the field value
    -h, --help               Show this message

ENVIRONMENT VARIABLES:
    I18NFIELD_LANGUAGES          Comma-separated available languages (default: de,en,es,fr,pt)
    I18NFIELD_DEFAULT_LANGUAGE   Site default language (default: en)
    I18NFIELD_REQUIRED           Always render a fallback value (default: false)
"#
    );
}

fn read_input(file: Option<&str>) -> Result<IndexMap<String, String>> {
    let raw = match file {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    serde_json::from_str(&raw).context("Input must be a JSON object of strings")
}

fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging on stderr; stdout carries the report
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("i18nfield=info".parse()?),
        )
        .init();

    let args = parse_args(std::env::args().skip(1))?;
    if args.help {
        print_usage();
        return Ok(());
    }

    let config = Config::from_env()?;
    let registry = config.registry()?;
    info!(
        "Available languages: {} (default: {})",
        registry.available_languages().join(", "),
        registry.default_language()
    );

    let input = read_input(args.file.as_deref())?;
    let submitted = input.len();

    let mut value = LocalizedValueMap::from_entries(Arc::new(registry), input)
        .with_required(config.required);
    value.set_default_language(args.default_language);

    if value.len() < submitted {
        info!(
            "Dropped {} of {} entries with unavailable languages or empty text",
            submitted - value.len(),
            submitted
        );
    }

    let request = args
        .language
        .map(|code| RequestLanguage::new().with_current_language(code));
    let context = request.as_ref().map(|r| r as &dyn RequestLanguageContext);

    let report = serde_json::json!({
        "entries": &value,
        "default_value": value.get_default_value(context),
        "text": value.to_text(context),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
