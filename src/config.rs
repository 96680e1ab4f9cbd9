//! Runtime configuration read from the environment.

use chrono::FixedOffset;
use std::env;

use crate::errors::ConfigError;
use crate::services::period::WeekStart;

const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Asia/Jakarta, the zone every period is evaluated in unless overridden
const DEFAULT_UTC_OFFSET_HOURS: i32 = 7;

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub telegram_api_url: String,
    /// `None` runs the bot against the in-memory store
    pub database_url: Option<String>,
    pub bind_addr: String,
    pub reference_offset: FixedOffset,
    pub week_start: WeekStart,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let telegram_bot_token =
            get("TELEGRAM_BOT_TOKEN").ok_or(ConfigError::Missing("TELEGRAM_BOT_TOKEN"))?;

        let offset_hours = match get("LEDGER_UTC_OFFSET_HOURS") {
            Some(raw) => raw.trim().parse::<i32>().map_err(|_| ConfigError::Invalid {
                key: "LEDGER_UTC_OFFSET_HOURS",
                value: raw.clone(),
            })?,
            None => DEFAULT_UTC_OFFSET_HOURS,
        };
        let reference_offset = offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .ok_or(ConfigError::Invalid {
                key: "LEDGER_UTC_OFFSET_HOURS",
                value: offset_hours.to_string(),
            })?;

        let week_start = match get("LEDGER_WEEK_START") {
            Some(raw) => raw.parse::<WeekStart>().map_err(|_| ConfigError::Invalid {
                key: "LEDGER_WEEK_START",
                value: raw.clone(),
            })?,
            None => WeekStart::default(),
        };

        Ok(Self {
            telegram_bot_token,
            telegram_api_url: get("TELEGRAM_API_URL")
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
            database_url: get("DATABASE_URL"),
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            reference_offset,
            week_start,
        })
    }
}
