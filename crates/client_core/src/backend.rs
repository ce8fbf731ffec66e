//! Access to the simulation service over its JSON HTTP interface.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{HistoryEntry, LeaderProfile, SimulationResult},
    error::ConsoleError,
    protocol::{SimulationRequest, HISTORY_PATH, LEADERS_PATH, SIMULATE_PATH},
};
use tracing::debug;

const ERROR_BODY_PREVIEW_CHARS: usize = 200;

#[async_trait]
pub trait SimulationBackend: Send + Sync {
    async fn simulate(&self, request: &SimulationRequest)
        -> Result<SimulationResult, ConsoleError>;
    async fn history(&self) -> Result<Vec<HistoryEntry>, ConsoleError>;
    async fn leaders(&self) -> Result<Vec<LeaderProfile>, ConsoleError>;
}

pub struct HttpSimulationBackend {
    http: Client,
    api_url: String,
}

impl HttpSimulationBackend {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), api_url)
    }

    pub fn with_client(http: Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { http, api_url }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.api_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ConsoleError> {
        let url = self.endpoint(path);
        debug!(%url, "GET");
        let res = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(ConsoleError::network)?;
        decode_json(res).await
    }
}

#[async_trait]
impl SimulationBackend for HttpSimulationBackend {
    async fn simulate(
        &self,
        request: &SimulationRequest,
    ) -> Result<SimulationResult, ConsoleError> {
        let url = self.endpoint(SIMULATE_PATH);
        debug!(%url, "POST");
        let res = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(ConsoleError::network)?;
        decode_json(res).await
    }

    async fn history(&self) -> Result<Vec<HistoryEntry>, ConsoleError> {
        self.get_json(HISTORY_PATH).await
    }

    async fn leaders(&self) -> Result<Vec<LeaderProfile>, ConsoleError> {
        self.get_json(LEADERS_PATH).await
    }
}

async fn decode_json<T: DeserializeOwned>(res: Response) -> Result<T, ConsoleError> {
    let status = res.status();
    let body = res.text().await.map_err(ConsoleError::network)?;
    if !status.is_success() {
        return Err(ConsoleError::Server {
            status: status.as_u16(),
            message: body_preview(&body),
        });
    }
    Ok(serde_json::from_str(&body)?)
}

fn body_preview(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= ERROR_BODY_PREVIEW_CHARS {
        return trimmed.to_string();
    }
    let mut preview: String = trimmed.chars().take(ERROR_BODY_PREVIEW_CHARS).collect();
    preview.push_str("...");
    preview
}

#[cfg(test)]
#[path = "tests/backend_tests.rs"]
mod tests;
