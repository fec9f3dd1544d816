use std::time::Duration;

use compiler_panel_core::{CompileRequest, CompileResult};
use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use url::Url;

use crate::wire::{WireRequest, WireResponse};
use crate::{CompileError, FailureKind};

/// Default endpoint of a locally running compile service.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:10240/compile";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 8 * 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait CompileClient: Send + Sync {
    async fn compile(&self, request: &CompileRequest) -> Result<CompileResult, CompileError>;
}

/// Posts compile requests to the service over HTTP.
#[derive(Debug, Clone)]
pub struct ReqwestCompileClient {
    settings: ClientSettings,
}

impl ReqwestCompileClient {
    pub fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, CompileError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| CompileError::new(FailureKind::Network, err.to_string()))
    }

    fn too_large(&self, actual: u64) -> CompileError {
        CompileError::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual: Some(actual),
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
impl CompileClient for ReqwestCompileClient {
    async fn compile(&self, request: &CompileRequest) -> Result<CompileResult, CompileError> {
        let endpoint = Url::parse(&self.settings.endpoint)
            .map_err(|err| CompileError::new(FailureKind::InvalidEndpoint, err.to_string()))?;
        let body = serde_json::to_vec(&WireRequest::from(request))
            .map_err(|err| CompileError::new(FailureKind::MalformedBody, err.to_string()))?;
        let client = self.build_client()?;

        let response = client
            .post(endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(CompileError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(self.too_large(content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(self.too_large(next_len));
            }
            bytes.extend_from_slice(&chunk);
        }

        let parsed: WireResponse = serde_json::from_slice(&bytes)
            .map_err(|err| CompileError::new(FailureKind::MalformedBody, err.to_string()))?;
        Ok(parsed.into())
    }
}

fn map_reqwest_error(err: reqwest::Error) -> CompileError {
    if err.is_timeout() {
        return CompileError::new(FailureKind::Timeout, err.to_string());
    }
    CompileError::new(FailureKind::Network, err.to_string())
}
