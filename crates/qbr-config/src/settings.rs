//! Run settings: raw capture, prompting, and validation.

use std::io;
use std::sync::OnceLock;

use chrono::NaiveDate;
use qbr_common::TimeWindow;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::prompt::SettingsPrompt;

/// Errors from settings resolution and validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("API token must not be empty")]
    MissingToken,

    #[error("invalid UTC offset '{0}': expected [+-]HH:00")]
    InvalidOffset(String),

    #[error("invalid date range '{0}': expected YYYY-MM-DD/YYYY-MM-DD")]
    InvalidDateRange(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Settings as captured from flags or the environment, before prompting.
#[derive(Debug, Clone, Default)]
pub struct RawSettings {
    pub api_token: Option<String>,
    pub app_tokens: Option<String>,
    pub utc_offset: Option<String>,
    pub date_range: Option<String>,
}

/// Fully resolved and validated settings for one reporting run.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub api_token: String,
    /// `None` means "all apps" (no `app_token__in` filter).
    pub app_tokens: Option<Vec<String>>,
    pub utc_offset: String,
    pub window: TimeWindow,
}

/// Fill gaps in `raw` through `prompt`, then validate everything.
pub fn resolve(
    raw: RawSettings,
    prompt: &mut dyn SettingsPrompt,
) -> Result<RunSettings, ConfigError> {
    let api_token = match raw.api_token {
        Some(token) => token,
        None => prompt.ask("API token:")?,
    };
    if api_token.trim().is_empty() {
        return Err(ConfigError::MissingToken);
    }

    let app_tokens_input = match raw.app_tokens {
        Some(tokens) => tokens,
        None => prompt.ask("App token(s), space-separated (or 'all'):")?,
    };
    let app_tokens = parse_app_tokens(&app_tokens_input);

    // Flag and env values may carry stray whitespace; trim before validating.
    let utc_offset = match raw.utc_offset {
        Some(offset) => offset,
        None => prompt.ask("UTC offset for the report (e.g. +00:00, -03:00):")?,
    }
    .trim()
    .to_string();
    validate_utc_offset(&utc_offset)?;

    let date_range = match raw.date_range {
        Some(range) => range,
        None => prompt.ask("Date range (e.g. 2024-01-01/2024-01-31):")?,
    };
    let window = parse_date_range(date_range.trim())?;

    debug!(
        offset = %utc_offset,
        apps = app_tokens.as_ref().map(|t| t.len()).unwrap_or(0),
        "settings resolved"
    );

    Ok(RunSettings {
        api_token: api_token.trim().to_string(),
        app_tokens,
        utc_offset,
        window,
    })
}

/// The literal `all` (any case) or a blank answer means "no app filter".
fn parse_app_tokens(input: &str) -> Option<Vec<String>> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
        return None;
    }
    Some(trimmed.split_whitespace().map(str::to_string).collect())
}

fn offset_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[+-]\d{2}:00$").expect("static pattern"))
}

fn validate_utc_offset(offset: &str) -> Result<(), ConfigError> {
    if offset_pattern().is_match(offset) {
        Ok(())
    } else {
        Err(ConfigError::InvalidOffset(offset.to_string()))
    }
}

fn parse_date_range(range: &str) -> Result<TimeWindow, ConfigError> {
    let (start, end) = range
        .split_once('/')
        .ok_or_else(|| ConfigError::InvalidDateRange(range.to_string()))?;

    let parse = |raw: &str| {
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map_err(|_| ConfigError::InvalidDateRange(range.to_string()))
    };
    Ok(TimeWindow::new(parse(start)?, parse(end)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Prompt answering from a fixed script.
    struct Scripted(Vec<&'static str>);

    impl SettingsPrompt for Scripted {
        fn ask(&mut self, _question: &str) -> io::Result<String> {
            Ok(self.0.remove(0).to_string())
        }
    }

    fn raw_all_set() -> RawSettings {
        RawSettings {
            api_token: Some("tok-123".into()),
            app_tokens: Some("abc def".into()),
            utc_offset: Some("-03:00".into()),
            date_range: Some("2024-01-01/2024-01-31".into()),
        }
    }

    #[test]
    fn resolves_without_prompting_when_complete() {
        let mut prompt = Scripted(vec![]);
        let settings = resolve(raw_all_set(), &mut prompt).unwrap();
        assert_eq!(settings.api_token, "tok-123");
        assert_eq!(
            settings.app_tokens,
            Some(vec!["abc".to_string(), "def".to_string()])
        );
        assert_eq!(settings.utc_offset, "-03:00");
    }

    #[test]
    fn prompts_for_missing_values() {
        let mut prompt = Scripted(vec!["tok-xyz", "all", "+01:00", "2024-03-01/2024-03-31"]);
        let settings = resolve(RawSettings::default(), &mut prompt).unwrap();
        assert_eq!(settings.api_token, "tok-xyz");
        assert!(settings.app_tokens.is_none());
        assert_eq!(settings.utc_offset, "+01:00");
    }

    #[test]
    fn all_keyword_clears_the_app_filter() {
        assert!(parse_app_tokens("all").is_none());
        assert!(parse_app_tokens("ALL").is_none());
        assert!(parse_app_tokens("  ").is_none());
        assert_eq!(
            parse_app_tokens("one two"),
            Some(vec!["one".to_string(), "two".to_string()])
        );
    }

    #[test]
    fn rejects_malformed_offsets() {
        for bad in ["+1:00", "03:00", "+03:30", "-3:00", "utc"] {
            assert!(validate_utc_offset(bad).is_err(), "accepted {bad}");
        }
        for good in ["+00:00", "-03:00", "+11:00"] {
            assert!(validate_utc_offset(good).is_ok(), "rejected {good}");
        }
    }

    #[test]
    fn rejects_ranges_without_separator_or_bad_dates() {
        assert!(matches!(
            parse_date_range("2024-01-01 2024-01-31"),
            Err(ConfigError::InvalidDateRange(_))
        ));
        assert!(matches!(
            parse_date_range("2024-13-01/2024-01-31"),
            Err(ConfigError::InvalidDateRange(_))
        ));
    }

    #[test]
    fn surrounding_whitespace_from_env_values_is_tolerated() {
        let raw = RawSettings {
            api_token: Some(" tok-123 ".into()),
            app_tokens: Some("all".into()),
            utc_offset: Some(" +00:00 ".into()),
            date_range: Some(" 2024-01-01/2024-01-31 ".into()),
        };
        let mut prompt = Scripted(vec![]);
        let settings = resolve(raw, &mut prompt).unwrap();
        assert_eq!(settings.api_token, "tok-123");
        assert_eq!(settings.utc_offset, "+00:00");
    }

    #[test]
    fn empty_token_is_an_error() {
        let mut prompt = Scripted(vec![""]);
        let err = resolve(RawSettings::default(), &mut prompt).unwrap_err();
        assert!(matches!(err, ConfigError::MissingToken));
    }
}
