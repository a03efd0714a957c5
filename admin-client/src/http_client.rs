use crate::error::AdminClientError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Whole-request timeout. `None` means a hung request waits forever.
    pub request_timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: None,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Thin JSON pass-through over a fixed base URL. No retries, no backoff.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(config: ClientConfig) -> Result<Self, AdminClientError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(AdminClientError::InvalidUrl("base URL is empty".into()));
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(AdminClientError::InvalidUrl(format!(
                "{} (expected http:// or https://)",
                base_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder()
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(5));
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    // -------- Базовые методы --------

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AdminClientError> {
        self.get_with_query(path, &[]).await
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, AdminClientError> {
        let mut request = self.client.get(self.url(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        self.send_json("GET", path, request).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, AdminClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.post(self.url(path)).json(body);
        self.send_json("POST", path, request).await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, AdminClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.patch(self.url(path)).json(body);
        self.send_json("PATCH", path, request).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), AdminClientError> {
        tracing::debug!("DELETE {}", path);
        let response = self.client.delete(self.url(path)).send().await?;
        Self::check_status(response).await.map(|_| ())
    }

    // -------- Ресурсные сокращения --------

    pub async fn get_by_id<T: DeserializeOwned>(
        &self,
        resource: &str,
        id: i64,
    ) -> Result<T, AdminClientError> {
        self.get(&format!("{}/{}", resource, id)).await
    }

    pub async fn create<B, T>(&self, resource: &str, data: &B) -> Result<T, AdminClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.post(resource, data).await
    }

    pub async fn update<B, T>(
        &self,
        resource: &str,
        id: i64,
        data: &B,
    ) -> Result<T, AdminClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.patch(&format!("{}/{}", resource, id), data).await
    }

    pub async fn remove(&self, resource: &str, id: i64) -> Result<(), AdminClientError> {
        self.delete(&format!("{}/{}", resource, id)).await
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: &str,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T, AdminClientError> {
        tracing::debug!("{} {}", method, path);
        let response = request.send().await?;
        let response = Self::check_status(response).await?;

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            tracing::warn!("{} {}: unexpected response body: {}", method, path, e);
            AdminClientError::SerializationError(format!("{}: {}", path, e))
        })
    }

    async fn check_status(response: Response) -> Result<Response, AdminClientError> {
        let status = response.status();

        match status {
            s if s.is_success() => Ok(response),
            StatusCode::NOT_FOUND => Err(AdminClientError::NotFound),
            StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
                let error_text = response.text().await?;
                Err(AdminClientError::InvalidRequest(error_text))
            }
            _ => {
                let error_text = response.text().await?;
                Err(AdminClientError::ServerError {
                    status: status.as_u16(),
                    message: error_text,
                })
            }
        }
    }
}
