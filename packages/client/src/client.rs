use async_trait::async_trait;
use onboard_core::{FlowError, FlowResult, FormRecord, RecordSink};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, error, info};
use url::Url;

use crate::error::{ClientError, ClientResult};
use crate::types::{ErrorBody, LoginRequest, LoginResponse};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const LOGIN_PATH: &str = "auth/login";
const SAVE_USER_DATA_PATH: &str = "auth/save-user-data";

/// HTTP API client for the onboarding service
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| ClientError::config(format!("invalid base url {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::config(format!("{base_url} cannot be a base url")));
        }
        // Keep any path prefix when joining endpoint paths
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::config(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::config(e.to_string()))
    }

    /// Exchange credentials for an opaque auth token
    pub async fn login(&self, credentials: &LoginRequest) -> ClientResult<LoginResponse> {
        let url = self.endpoint(LOGIN_PATH)?;
        debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .json(credentials)
            .send()
            .await
            .map_err(ClientError::http)?;

        let response = Self::check_status(response).await?;
        let body = response
            .json::<LoginResponse>()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

        info!("Login succeeded for {}", credentials.email);
        Ok(body)
    }

    /// Persist the full onboarding record
    pub async fn save_user_data(&self, record: &FormRecord) -> ClientResult<()> {
        let url = self.endpoint(SAVE_USER_DATA_PATH)?;
        debug!("POST {} ({} fields set)", url, record.len());

        let response = self
            .client
            .post(url)
            .json(record)
            .send()
            .await
            .map_err(ClientError::http)?;

        Self::check_status(response).await?;
        info!("User data saved");
        Ok(())
    }

    async fn check_status(response: Response) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.error.or(body.message))
            .unwrap_or_else(|| {
                if text.is_empty() {
                    status.to_string()
                } else {
                    text
                }
            });

        error!("Request failed with {}: {}", status, message);
        Err(ClientError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl RecordSink for ApiClient {
    async fn save_record(&self, record: &FormRecord) -> FlowResult<()> {
        self.save_user_data(record)
            .await
            .map_err(|e| FlowError::network(SAVE_USER_DATA_PATH, e.to_string()))
    }
}
