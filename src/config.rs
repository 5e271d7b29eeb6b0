use crate::page::LOG_PANELS;
use serde::Deserialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub backend: BackendConfig,
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
    /// Session login for backends that gate `/api/*` behind a cookie.
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl BackendConfig {
    /// Username and password, when both are configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(u), Some(p)) => Some((u.as_str(), p.as_str())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollingConfig {
    #[serde(default = "default_bandwidth_interval_ms")]
    pub bandwidth_interval_ms: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            bandwidth_interval_ms: default_bandwidth_interval_ms(),
        }
    }
}

fn default_bandwidth_interval_ms() -> u64 {
    2000
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    /// Known tab panel ids; each gets a `tab-btn-<id>` button.
    #[serde(default = "default_tabs")]
    pub tabs: Vec<String>,
    /// Tab shown at startup (first tab when omitted).
    #[serde(default)]
    pub default_tab: Option<String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tabs: default_tabs(),
            default_tab: None,
        }
    }
}

impl UiConfig {
    pub fn initial_tab(&self) -> Option<&str> {
        self.default_tab
            .as_deref()
            .or_else(|| self.tabs.first().map(String::as_str))
    }
}

fn default_tabs() -> Vec<String> {
    LOG_PANELS.iter().map(|t| t.to_string()).collect()
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.backend.base_url.is_empty(),
            "backend.base_url must be non-empty"
        );
        if let Err(e) = reqwest::Url::parse(&self.backend.base_url) {
            anyhow::bail!(
                "backend.base_url is not a valid URL ({}): {}",
                self.backend.base_url,
                e
            );
        }
        anyhow::ensure!(
            self.backend.username.is_some() == self.backend.password.is_some(),
            "backend.username and backend.password must be set together"
        );
        anyhow::ensure!(
            self.polling.bandwidth_interval_ms > 0,
            "polling.bandwidth_interval_ms must be > 0, got {}",
            self.polling.bandwidth_interval_ms
        );
        anyhow::ensure!(!self.ui.tabs.is_empty(), "ui.tabs must be non-empty");
        let mut seen = HashSet::new();
        for tab in &self.ui.tabs {
            anyhow::ensure!(!tab.trim().is_empty(), "ui.tabs entries must be non-blank");
            anyhow::ensure!(
                LOG_PANELS.contains(&tab.as_str()),
                "ui.tabs entry {:?} has no panel; expected one of {:?}",
                tab,
                LOG_PANELS
            );
            anyhow::ensure!(seen.insert(tab.as_str()), "ui.tabs has duplicate id {:?}", tab);
        }
        if let Some(default_tab) = &self.ui.default_tab {
            anyhow::ensure!(
                seen.contains(default_tab.as_str()),
                "ui.default_tab {:?} is not one of ui.tabs",
                default_tab
            );
        }
        Ok(())
    }
}
