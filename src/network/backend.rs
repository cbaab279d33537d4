use reqwest::{Client, Url};

use crate::common::{ChatMessage, OutgoingPayload};
use crate::config::WidgetConfig;
use crate::error::WidgetError;

const TRANSCRIPT_ENDPOINT: &str = "transcript";
const SEND_ENDPOINT: &str = "send";

/// HTTP side of the widget: one GET for the transcript, one POST per message.
#[derive(Debug, Clone)]
pub struct Backend {
    http: Client,
    transcript_url: Url,
    send_url: Url,
}

impl Backend {
    pub fn new(config: &WidgetConfig) -> Result<Self, WidgetError> {
        let base = parse_url(&config.backend_url)?;
        let transcript_url = join(&base, &config.transcript_path)?;
        let send_url = join(&base, &config.send_path)?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            transcript_url,
            send_url,
        })
    }

    pub fn transcript_url(&self) -> &Url {
        &self.transcript_url
    }

    pub fn send_url(&self) -> &Url {
        &self.send_url
    }

    pub async fn fetch_transcript(&self) -> Result<Vec<ChatMessage>, WidgetError> {
        let response = self.http.get(self.transcript_url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(WidgetError::Status {
                endpoint: TRANSCRIPT_ENDPOINT,
                status,
            });
        }

        Ok(response.json::<Vec<ChatMessage>>().await?)
    }

    /// Posts one message. The response body is never read.
    pub async fn post_message(&self, payload: &OutgoingPayload) -> Result<(), WidgetError> {
        let response = self
            .http
            .post(self.send_url.clone())
            .json(payload)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(WidgetError::Status {
                endpoint: SEND_ENDPOINT,
                status,
            });
        }

        Ok(())
    }
}

fn parse_url(raw: &str) -> Result<Url, WidgetError> {
    Url::parse(raw.trim()).map_err(|err| WidgetError::InvalidUrl {
        url: raw.to_string(),
        reason: err.to_string(),
    })
}

fn join(base: &Url, path: &str) -> Result<Url, WidgetError> {
    base.join(path).map_err(|err| WidgetError::InvalidUrl {
        url: format!("{base}{path}"),
        reason: err.to_string(),
    })
}
