//! HTTP client for the fetch/analyze backend.
//!
//! The two calls are independent requests; sequencing them is the
//! workflow's job. Any non-2xx response body is surfaced verbatim as the
//! error message.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::ClientError;
use crate::models::{
    AnalysisReport, AnalyzeRequest, AnalyzeResponse, FetchRequest, FetchResponse, StatusResponse,
};

/// The backend operations the workflow depends on.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Clone/fetch the repository and return the backend-side path handle.
    async fn fetch_repository(&self, url: &str) -> Result<String, ClientError>;

    /// Analyze a repository previously returned by [`fetch_repository`](Self::fetch_repository).
    async fn analyze_repository(&self, local_path: &str) -> Result<AnalysisReport, ClientError>;
}

pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("deadrepo-doctor/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Liveness probe against `GET /`.
    pub async fn ping(&self) -> anyhow::Result<String> {
        let status: StatusResponse = self
            .client
            .get(format!("{}/", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(status.status)
    }

    /// POST `body` to `route` and decode the JSON reply. Every failure is
    /// wrapped by `phase` so the caller gets the error kind of its step.
    async fn post_json<T, R>(
        &self,
        route: &str,
        body: &T,
        phase: fn(String) -> ClientError,
    ) -> Result<R, ClientError>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, route);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| phase(e.to_string()))?;

        let status = response.status();
        debug!(%url, %status, "backend responded");
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let text = text.trim();
            return Err(phase(if text.is_empty() {
                format!("{} failed with status {}", route, status.as_u16())
            } else {
                text.to_string()
            }));
        }

        response.json().await.map_err(|e| phase(e.to_string()))
    }
}

#[async_trait]
impl AnalysisBackend for HttpBackend {
    #[instrument(skip(self))]
    async fn fetch_repository(&self, url: &str) -> Result<String, ClientError> {
        let body: FetchResponse = self
            .post_json("/api/fetch", &FetchRequest { repo_url: url }, ClientError::Fetch)
            .await?;
        Ok(body.local_path)
    }

    #[instrument(skip(self))]
    async fn analyze_repository(&self, local_path: &str) -> Result<AnalysisReport, ClientError> {
        let body: AnalyzeResponse = self
            .post_json("/api/analyze", &AnalyzeRequest { local_path }, ClientError::Analysis)
            .await?;
        Ok(body.analysis_report)
    }
}
