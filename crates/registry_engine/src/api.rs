use std::time::Duration;

use registry_logging::{registry_debug, registry_warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::types::{DataEnvelope, ErrorBody};
use crate::{ApiError, FailureKind, NewUser, UserRecord};

#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Prefix for every endpoint, e.g. `http://localhost:5000/api`.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl ApiSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(15),
        }
    }
}

/// The user REST contract: create, list, delete.
#[async_trait::async_trait]
pub trait UsersApi: Send + Sync {
    /// Any 2xx answer with a JSON body counts as created.
    async fn create_user(&self, user: &NewUser) -> Result<(), ApiError>;

    async fn list_users(&self) -> Result<Vec<UserRecord>, ApiError>;

    async fn delete_user(&self, id: i64) -> Result<(), ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestUsersApi {
    settings: ApiSettings,
    client: reqwest::Client,
}

impl ReqwestUsersApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        // Fail early on a bad base URL rather than on the first request.
        parse_base(&settings.base_url)?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = parse_base(&self.settings.base_url)?;
        {
            let mut path = url.path_segments_mut().map_err(|()| {
                ApiError::new(FailureKind::InvalidUrl, "base url cannot carry a path")
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    /// Sends a request and returns the status and raw body. Transport
    /// failures are mapped here; status handling is left to the caller.
    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> Result<(StatusCode, Vec<u8>), ApiError> {
        registry_debug!("{} {}", method, url);
        let mut request = self.client.request(method, url).header(ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        Ok((status, bytes.to_vec()))
    }
}

#[async_trait::async_trait]
impl UsersApi for ReqwestUsersApi {
    async fn create_user(&self, user: &NewUser) -> Result<(), ApiError> {
        let url = self.endpoint(&["users"])?;
        let body = serde_json::to_vec(user)
            .map_err(|err| ApiError::new(FailureKind::MalformedResponse, err.to_string()))?;
        let (status, bytes) = self.send(Method::POST, url, Some(body)).await?;
        if !status.is_success() {
            return Err(rejection(status, &bytes));
        }
        ensure_json(&bytes)
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, ApiError> {
        let url = self.endpoint(&["users"])?;
        let (status, bytes) = self.send(Method::GET, url, None).await?;
        if !status.is_success() {
            return Err(rejection(status, &bytes));
        }
        decode_data(&bytes)
    }

    async fn delete_user(&self, id: i64) -> Result<(), ApiError> {
        let id = id.to_string();
        let url = self.endpoint(&["users", &id])?;
        let (status, bytes) = self.send(Method::DELETE, url, None).await?;
        if !status.is_success() {
            return Err(rejection(status, &bytes));
        }
        Ok(())
    }
}

fn parse_base(base_url: &str) -> Result<Url, ApiError> {
    let url = Url::parse(base_url.trim())
        .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ApiError::new(
            FailureKind::InvalidUrl,
            format!("unsupported scheme {other}"),
        )),
    }
}

fn decode_data<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice::<DataEnvelope<T>>(bytes)
        .map(|envelope| envelope.data)
        .map_err(|err| {
            registry_warn!("Unreadable success body: {}", err);
            ApiError::new(FailureKind::MalformedResponse, err.to_string())
        })
}

fn ensure_json(bytes: &[u8]) -> Result<(), ApiError> {
    serde_json::from_slice::<serde_json::Value>(bytes)
        .map(|_| ())
        .map_err(|err| {
            registry_warn!("Create answered with a non-JSON body: {}", err);
            ApiError::new(FailureKind::MalformedResponse, err.to_string())
        })
}

/// Non-2xx: pick up `{"message": ...}` when the body has one.
fn rejection(status: StatusCode, bytes: &[u8]) -> ApiError {
    let body: ErrorBody = serde_json::from_slice(bytes).unwrap_or_default();
    ApiError::rejected(status.as_u16(), body.message)
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
