use async_trait::async_trait;
use log::debug;
use reqwest::Client as HttpClient;

use super::{ AskTransport, ChatError };
use crate::config::WidgetConfig;
use crate::models::chat::{ AskRequest, AskResponse };

#[derive(Debug, Clone)]
pub struct HttpAskClient {
    http: HttpClient,
    url: String,
}

impl HttpAskClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(),
            url: url.into(),
        }
    }

    pub fn from_config(config: &WidgetConfig) -> Self {
        Self::new(config.ask_url())
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl AskTransport for HttpAskClient {
    async fn ask(&self, message: &str) -> Result<AskResponse, ChatError> {
        let req = AskRequest { message: message.to_string() };
        debug!("POST {} ({} chars)", self.url, message.chars().count());

        // `.json()` sets Content-Type: application/json.
        let resp = self.http
            .post(&self.url)
            .json(&req)
            .send().await
            .map_err(|e| ChatError::NetworkFailure(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ChatError::ServerError { status: status.as_u16() });
        }

        let body = resp.text().await.map_err(|e| ChatError::NetworkFailure(e.to_string()))?;
        serde_json
            ::from_str::<AskResponse>(&body)
            .map_err(|e| ChatError::MalformedResponse(e.to_string()))
    }
}
