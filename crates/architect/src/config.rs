use crate::prelude::*;
use architect_core::generation::DEFAULT_TEMPERATURE;
use architect_core::i18n::Locale;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Environment variables consulted for the UI locale, in priority order.
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// Generation service flags shared by every command that talks to the API.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ApiOptions {
    /// API key for the generation service (falls back to GEMINI_API_KEY, then API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Model used for generation
    #[arg(long, env = "GEMINI_MODEL")]
    pub model: Option<String>,

    /// Base URL of the generation API
    #[arg(long, env = "GEMINI_BASE_URL")]
    pub base_url: Option<String>,

    /// Sampling temperature
    #[arg(long)]
    pub temperature: Option<f32>,
}

impl ApiOptions {
    /// Build the final configuration: environment first, then CLI overrides.
    pub fn resolve(self) -> Result<GeminiConfig, Error> {
        let config = match GeminiConfig::from_env() {
            Ok(config) => config,
            Err(error) => match &self.api_key {
                Some(api_key) => GeminiConfig::new(api_key.clone()),
                None => return Err(error),
            },
        };

        Ok(config.with_overrides(self))
    }
}

/// Generation service configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
}

impl GeminiConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Load configuration from environment variables
    /// Uses GEMINI_API_KEY if set, otherwise falls back to API_KEY
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let api_key = lookup("GEMINI_API_KEY")
            .or_else(|| lookup("API_KEY"))
            .filter(|key| !key.trim().is_empty())
            .ok_or(Error::MissingApiKey)?;

        let mut config = Self::new(api_key);
        if let Some(base_url) = lookup("GEMINI_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(model) = lookup("GEMINI_MODEL") {
            config.model = model;
        }

        Ok(config)
    }

    /// Apply CLI overrides to the configuration
    pub fn with_overrides(mut self, options: ApiOptions) -> Self {
        if let Some(api_key) = options.api_key {
            self.api_key = api_key;
        }
        if let Some(base_url) = options.base_url {
            self.base_url = base_url;
        }
        if let Some(model) = options.model {
            self.model = model;
        }
        if let Some(temperature) = options.temperature {
            self.temperature = temperature;
        }
        self.base_url = self.base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

/// Pick the UI locale: explicit flag first, then the POSIX locale variables.
pub fn resolve_locale(explicit: Option<&str>) -> Locale {
    resolve_locale_with(explicit, |name| std::env::var(name).ok())
}

fn resolve_locale_with(explicit: Option<&str>, lookup: impl Fn(&str) -> Option<String>) -> Locale {
    explicit
        .map(str::to_string)
        .or_else(|| {
            LOCALE_VARS
                .iter()
                .find_map(|name| lookup(name).filter(|value| !value.is_empty()))
        })
        .map(|tag| Locale::detect(&tag))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_lookup_prefers_gemini_key() {
        let vars = env(&[("GEMINI_API_KEY", "gemini"), ("API_KEY", "generic")]);
        let config = GeminiConfig::from_lookup(|name| vars.get(name).cloned()).unwrap();
        assert_eq!(config.api_key, "gemini");
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_from_lookup_falls_back_to_api_key() {
        let vars = env(&[("API_KEY", "generic"), ("GEMINI_MODEL", "gemini-pro")]);
        let config = GeminiConfig::from_lookup(|name| vars.get(name).cloned()).unwrap();
        assert_eq!(config.api_key, "generic");
        assert_eq!(config.model, "gemini-pro");
    }

    #[test]
    fn test_from_lookup_without_key_fails() {
        let vars = env(&[("API_KEY", "  ")]);
        let result = GeminiConfig::from_lookup(|name| vars.get(name).cloned());
        assert_eq!(result, Err(Error::MissingApiKey));
    }

    #[test]
    fn test_overrides_replace_values_and_trim_base_url() {
        let config = GeminiConfig::new("key".into()).with_overrides(ApiOptions {
            api_key: None,
            model: Some("custom".into()),
            base_url: Some("http://localhost:8080/v1/".into()),
            temperature: Some(0.5),
        });

        assert_eq!(config.api_key, "key");
        assert_eq!(
            config.endpoint(),
            "http://localhost:8080/v1/models/custom:generateContent"
        );
        assert_eq!(config.temperature, 0.5);
    }

    #[test]
    fn test_resolve_locale_order() {
        let vars = env(&[("LANG", "zh_TW.UTF-8"), ("LC_ALL", "en_US.UTF-8")]);
        assert_eq!(
            resolve_locale_with(None, |name| vars.get(name).cloned()),
            Locale::En
        );
        assert_eq!(
            resolve_locale_with(Some("zh-HK"), |name| vars.get(name).cloned()),
            Locale::ZhTw
        );

        let vars = env(&[("LC_ALL", ""), ("LANG", "zh_TW.UTF-8")]);
        assert_eq!(
            resolve_locale_with(None, |name| vars.get(name).cloned()),
            Locale::ZhTw
        );
    }

    #[test]
    fn test_resolve_locale_defaults_to_english() {
        assert_eq!(resolve_locale_with(None, |_| None), Locale::En);
    }
}
