use chrono::Duration;
use std::env;

pub const DEFAULT_API_BASE: &str = "https://openapi.programming-hero.com/api";
const DEFAULT_NOTICE_TTL_SECS: i64 = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct WidgetConfig {
    pub api_base: String,
    pub notice_ttl: Duration,
    pub modal_add_button: bool,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            notice_ttl: Duration::seconds(DEFAULT_NOTICE_TTL_SECS),
            modal_add_button: true,
        }
    }
}

impl WidgetConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let api_base = lookup("PLANT_API_BASE")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.api_base);

        let notice_ttl = lookup("PLANT_NOTICE_TTL_SECS")
            .and_then(|value| value.trim().parse::<i64>().ok())
            .filter(|secs| *secs >= 0)
            .and_then(Duration::try_seconds)
            .unwrap_or(defaults.notice_ttl);

        let modal_add_button = lookup("PLANT_MODAL_ADD_BUTTON")
            .map(|value| !matches!(value.trim(), "0" | "false" | "no" | "off"))
            .unwrap_or(defaults.modal_add_button);

        Self {
            api_base,
            notice_ttl,
            modal_add_button,
        }
    }
}
