use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::common::{TranscriptMode, VisitorIdentity};

pub const DEFAULT_CONFIG_PATH: &str = "config/widget.json";
pub const BACKEND_URL_ENV: &str = "WEBCHAT_BACKEND_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub backend_url: String,
    pub transcript_path: String,
    pub send_path: String,
    pub poll_interval_ms: u64,
    /// Unset means the transport's own default.
    pub request_timeout_secs: Option<u64>,
    pub transcript_mode: TranscriptMode,
    pub window_title: String,
    pub visitor: VisitorIdentity,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:5000".to_string(),
            transcript_path: "/transcript".to_string(),
            send_path: "/messageToGenesys".to_string(),
            poll_interval_ms: 2000,
            request_timeout_secs: None,
            transcript_mode: TranscriptMode::Full,
            window_title: "Web Chat".to_string(),
            visitor: VisitorIdentity::default(),
        }
    }
}

impl WidgetConfig {
    pub fn poll_interval(&self) -> Duration {
        // a zero period would make tokio's interval panic
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            if !url.trim().is_empty() {
                log::info!("Backend URL overridden by {BACKEND_URL_ENV}");
                self.backend_url = url;
            }
        }
    }
}

pub fn load_config(path: &str) -> WidgetConfig {
    let path = Path::new(path);
    match fs::read_to_string(path) {
        Ok(content) => parse_config(&content).unwrap_or_else(|err| {
            log::warn!("Failed to parse config file {}: {err}", path.display());
            WidgetConfig::default()
        }),
        Err(err) => {
            log::info!(
                "Config file {} not found ({err}); using defaults",
                path.display()
            );
            WidgetConfig::default()
        }
    }
}

fn parse_config(content: &str) -> serde_json::Result<WidgetConfig> {
    serde_json::from_str(content)
}
