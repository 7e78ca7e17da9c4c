//! The configured HTTP client.
//!
//! Every request goes through [`ApiClient::execute`], which attaches the
//! bearer token and an `x-request-id`, logs the outcome, and maps non-2xx
//! responses onto [`ApiError`]. A 401 signs the user out exactly once no
//! matter how many requests observe it.

use std::time::Instant;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use schoolhub_auth::SessionManager;
use schoolhub_cache::QueryCache;
use schoolhub_config::ApiConfig;
use schoolhub_core::ErrorBody;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};

use crate::error::{ApiError, SESSION_EXPIRED_MESSAGE};
use crate::resource::{Resource, ResourceApi};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    sessions: SessionManager,
    cache: QueryCache,
}

impl ApiClient {
    pub fn new(
        config: ApiConfig,
        sessions: SessionManager,
        cache: QueryCache,
    ) -> Result<Self, ApiError> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()
            .map_err(ApiError::Transport)?;

        Ok(Self {
            http,
            config,
            sessions,
            cache,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// CRUD access to one REST collection.
    pub fn resource<R: Resource>(&self) -> ResourceApi<'_, R> {
        ResourceApi::new(self)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, ApiError> {
        let body = self
            .execute(Method::GET, path, query, None::<&()>)
            .await?;
        decode(path, &body)
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.execute(Method::POST, path, &[], Some(body)).await?;
        decode(path, &body)
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.execute(Method::PUT, path, &[], Some(body)).await?;
        decode(path, &body)
    }

    /// PUT whose response body is ignored.
    pub async fn put_unit<B>(&self, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.execute(Method::PUT, path, &[], Some(body)).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(Method::DELETE, path, &[], None::<&()>).await?;
        Ok(())
    }

    /// Sends one request and returns the raw body of a 2xx response.
    pub async fn execute<B>(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&B>,
    ) -> Result<Vec<u8>, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let request_id = uuid::Uuid::new_v4().to_string();
        let mut request = self
            .http
            .request(method.clone(), self.config.endpoint(path))
            .header(REQUEST_ID_HEADER, &request_id);

        if !query.is_empty() {
            request = request.query(query);
        }
        let sent_token = self.sessions.token();
        if let Some(token) = &sent_token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        debug!(request_id = %request_id, method = %method, path = %path, "Sending request");

        let start = Instant::now();
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                error!(
                    request_id = %request_id,
                    method = %method,
                    path = %path,
                    error = %e,
                    "Request failed"
                );
                return Err(ApiError::Transport(e));
            }
        };
        let status = response.status();
        let bytes = response.bytes().await.map_err(ApiError::Transport)?;
        let latency = start.elapsed();

        match status.as_u16() {
            400..=499 => {
                warn!(
                    request_id = %request_id,
                    method = %method,
                    path = %path,
                    status = %status.as_u16(),
                    latency_ms = %latency.as_millis(),
                    "Client error"
                );
            }
            500..=599 => {
                error!(
                    request_id = %request_id,
                    method = %method,
                    path = %path,
                    status = %status.as_u16(),
                    latency_ms = %latency.as_millis(),
                    "Server error"
                );
            }
            _ => {
                info!(
                    request_id = %request_id,
                    method = %method,
                    path = %path,
                    status = %status.as_u16(),
                    latency_ms = %latency.as_millis(),
                    "Request completed"
                );
            }
        }

        if status.is_success() {
            return Ok(bytes.to_vec());
        }

        let body = ErrorBody::parse(&bytes);
        if status == StatusCode::UNAUTHORIZED {
            let signed_out = sent_token
                .as_deref()
                .is_some_and(|token| self.sessions.invalidate(token));
            if signed_out {
                self.cache.clear().await;
            }
            return Err(ApiError::Unauthorized {
                message: body
                    .server_message()
                    .unwrap_or_else(|| SESSION_EXPIRED_MESSAGE.to_string()),
            });
        }

        Err(ApiError::Status {
            status: status.as_u16(),
            message: body.into_message(),
        })
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url)
            .field("sessions", &self.sessions)
            .finish()
    }
}

fn decode<T: DeserializeOwned>(path: &str, body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(path = %path, error = %e, "Response body did not match the expected shape");
        ApiError::Decode(e)
    })
}
