// src/config.rs
use anyhow::{bail, Context, Result};

const DEFAULT_LANGUAGE: &str = "es";
const DEFAULT_INTERVAL_SECS: u64 = 6 * 3600;
const DEFAULT_TZ: &str = "UTC";
const DEFAULT_KEYWORDS: &str =
    "final de temporada,evento en vivo,live event,season finale,gran evento,big bang";

/// Immutable startup configuration, read once from the environment. Nothing
/// here is reloaded at runtime.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bot_token: String,
    /// Absent only in capture mode, where delivery is disabled.
    pub chat_id: Option<String>,
    pub language: String,
    pub interval_secs: u64,
    /// Informational; logged in the startup banner.
    pub schedule_tz: String,
    /// Lowercased, trimmed, deduplication not needed.
    pub keywords: Vec<String>,
    /// `SHOW_LOG_GROUP_ID=true`: log incoming chat ids instead of delivering.
    pub capture_chat_ids: bool,
}

impl AppConfig {
    /// Missing required variables are the only process-fatal errors.
    pub fn from_env() -> Result<Self> {
        let capture_chat_ids = env_flag("SHOW_LOG_GROUP_ID");

        let bot_token =
            std::env::var("TELEGRAM_BOT_TOKEN").context("TELEGRAM_BOT_TOKEN missing")?;
        let chat_id = std::env::var("TELEGRAM_CHAT_ID")
            .ok()
            .filter(|s| !s.trim().is_empty());
        if chat_id.is_none() && !capture_chat_ids {
            bail!("TELEGRAM_CHAT_ID missing (set SHOW_LOG_GROUP_ID=true to discover one)");
        }

        let language =
            std::env::var("NEWS_LANGUAGE").unwrap_or_else(|_| DEFAULT_LANGUAGE.to_string());
        let interval_secs = std::env::var("CHECK_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_INTERVAL_SECS);
        let schedule_tz = std::env::var("SCHEDULE_TZ").unwrap_or_else(|_| DEFAULT_TZ.to_string());
        let keywords = parse_keywords(
            &std::env::var("SEASON_EVENT_KEYWORDS")
                .unwrap_or_else(|_| DEFAULT_KEYWORDS.to_string()),
        );

        Ok(Self {
            bot_token,
            chat_id,
            language,
            interval_secs,
            schedule_tz,
            keywords,
            capture_chat_ids,
        })
    }
}

/// Comma-separated keyword list: trimmed, case-folded, empties dropped.
pub fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| v.to_lowercase() == "true")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn clear_bot_env() {
        for name in [
            "TELEGRAM_BOT_TOKEN",
            "TELEGRAM_CHAT_ID",
            "NEWS_LANGUAGE",
            "CHECK_INTERVAL_SECS",
            "SCHEDULE_TZ",
            "SEASON_EVENT_KEYWORDS",
            "SHOW_LOG_GROUP_ID",
        ] {
            env::remove_var(name);
        }
    }

    #[test]
    fn keywords_are_trimmed_folded_and_filtered() {
        let parsed = parse_keywords(" Evento EN Vivo , big bang ,, LIVE EVENT ,");
        assert_eq!(parsed, vec!["evento en vivo", "big bang", "live event"]);
    }

    #[test]
    fn empty_keyword_string_parses_to_nothing() {
        assert!(parse_keywords("").is_empty());
        assert!(parse_keywords(" , ,").is_empty());
    }

    #[serial_test::serial]
    #[test]
    fn defaults_apply_when_only_required_vars_are_set() {
        clear_bot_env();
        env::set_var("TELEGRAM_BOT_TOKEN", "token");
        env::set_var("TELEGRAM_CHAT_ID", "-100123");

        let cfg = AppConfig::from_env().unwrap();
        assert_eq!(cfg.language, "es");
        assert_eq!(cfg.interval_secs, 21_600);
        assert_eq!(cfg.schedule_tz, "UTC");
        assert!(cfg.keywords.contains(&"evento en vivo".to_string()));
        assert!(!cfg.capture_chat_ids);

        clear_bot_env();
    }

    #[serial_test::serial]
    #[test]
    fn chat_id_is_required_unless_capturing() {
        clear_bot_env();
        env::set_var("TELEGRAM_BOT_TOKEN", "token");
        assert!(AppConfig::from_env().is_err());

        env::set_var("SHOW_LOG_GROUP_ID", "true");
        let cfg = AppConfig::from_env().unwrap();
        assert!(cfg.capture_chat_ids);
        assert!(cfg.chat_id.is_none());

        clear_bot_env();
    }

    #[serial_test::serial]
    #[test]
    fn unparseable_interval_falls_back_to_default() {
        clear_bot_env();
        env::set_var("TELEGRAM_BOT_TOKEN", "token");
        env::set_var("TELEGRAM_CHAT_ID", "1");
        env::set_var("CHECK_INTERVAL_SECS", "cada seis horas");

        let cfg = AppConfig::from_env().unwrap();
        assert_eq!(cfg.interval_secs, 21_600);

        clear_bot_env();
    }
}
