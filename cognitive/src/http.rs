//! HTTP client implementation for the Nimbus Cognition API.

use std::time::Duration;

use bytes::Bytes;
use futures::{Stream, StreamExt};
use reqwest::{
    Client as ReqwestClient, Response, StatusCode,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT},
};
use serde::{Serialize, de::DeserializeOwned};

use crate::error::{Error, Result};

/// HTTP client for the Nimbus Cognition API.
pub struct HttpClient {
    client: ReqwestClient,
    base_url: String,
    ws_url: String,
    auth: AuthConfig,
    max_retries: u32,
}

/// Authentication configuration.
#[derive(Clone)]
pub struct AuthConfig {
    pub api_key: String,
}

impl HttpClient {
    /// Creates a new HTTP client.
    pub fn new(
        base_url: String,
        ws_url: String,
        auth: AuthConfig,
        max_retries: u32,
    ) -> Result<Self> {
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(300))
            .build()?;

        Ok(Self {
            client,
            base_url,
            ws_url,
            auth,
            max_retries,
        })
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the WebSocket URL.
    pub fn ws_url(&self) -> &str {
        &self.ws_url
    }

    /// Returns the authentication configuration.
    pub fn auth(&self) -> &AuthConfig {
        &self.auth
    }

    /// Makes an HTTP request to the API with retry support.
    pub async fn request<T, R>(&self, method: &str, path: &str, body: Option<&T>) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let mut last_err = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s, ...
                let backoff = Duration::from_secs(1 << (attempt - 1));
                tokio::time::sleep(backoff).await;
            }

            match self.do_request(method, path, body).await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    if e.is_retryable() {
                        last_err = Some(e);
                        continue;
                    }
                    return Err(e);
                }
            }
        }

        Err(last_err.unwrap_or_else(|| Error::Other("max retries exceeded".to_string())))
    }

    /// Performs a single HTTP request.
    async fn do_request<T, R>(&self, method: &str, path: &str, body: Option<&T>) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);

        let mut request = match method {
            "GET" => self.client.get(&url),
            "POST" => self.client.post(&url),
            "PUT" => self.client.put(&url),
            "DELETE" => self.client.delete(&url),
            _ => return Err(Error::Other(format!("unsupported method: {}", method))),
        };

        request = request.headers(self.default_headers());

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Posts a raw binary body (audio, image) and parses a JSON response.
    ///
    /// Query parameters are appended to the path as-is.
    pub async fn request_binary<R>(
        &self,
        path: &str,
        body: Vec<u8>,
        content_type: &str,
        query: &[(&str, String)],
    ) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.auth.api_key)).unwrap(),
        );
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_str(content_type)
                .map_err(|e| Error::Other(format!("invalid content type: {}", e)))?,
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .query(query)
            .body(body)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Makes a request whose successful response body is raw bytes.
    ///
    /// The `accept` header selects the response representation (e.g. an
    /// audio MIME type for synthesis).
    pub async fn fetch_binary<T>(
        &self,
        method: &str,
        path: &str,
        body: Option<&T>,
        accept: &str,
    ) -> Result<Bytes>
    where
        T: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);

        let mut request = match method {
            "GET" => self.client.get(&url),
            "POST" => self.client.post(&url),
            _ => return Err(Error::Other(format!("unsupported method: {}", method))),
        };

        let mut headers = self.default_headers();
        headers.insert(
            ACCEPT,
            HeaderValue::from_str(accept)
                .map_err(|e| Error::Other(format!("invalid accept type: {}", e)))?,
        );
        request = request.headers(headers);

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;

        if response.status() != StatusCode::OK {
            return Err(self.handle_error_response(response).await);
        }

        response.bytes().await.map_err(Error::from)
    }

    /// Makes a streaming request whose successful response body is raw
    /// bytes, e.g. chunked audio from synthesis.
    pub async fn stream_binary<T>(
        &self,
        method: &str,
        path: &str,
        body: Option<&T>,
        accept: &str,
    ) -> Result<impl Stream<Item = Result<Bytes>> + use<T>>
    where
        T: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);

        let mut request = match method {
            "GET" => self.client.get(&url),
            "POST" => self.client.post(&url),
            _ => return Err(Error::Other(format!("unsupported method: {}", method))),
        };

        let mut headers = self.default_headers();
        headers.insert(
            ACCEPT,
            HeaderValue::from_str(accept)
                .map_err(|e| Error::Other(format!("invalid accept type: {}", e)))?,
        );
        request = request.headers(headers);

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;

        if response.status() != StatusCode::OK {
            return Err(self.handle_error_response(response).await);
        }

        Ok(response.bytes_stream().map(|r| r.map_err(Error::from)))
    }

    /// Builds the WebSocket handshake request for a streaming endpoint.
    ///
    /// The bearer-style token travels in the custom `X-Api-Token` header,
    /// with a fresh `X-Api-Connect-Id` per connection.
    pub fn ws_request(&self, path_and_query: &str) -> Result<http::Request<()>> {
        use tokio_tungstenite::tungstenite::client::IntoClientRequest;

        let ws_url = format!("{}{}", self.ws_url, path_and_query);
        let connect_id = uuid::Uuid::new_v4().to_string();

        let mut request = ws_url
            .into_client_request()
            .map_err(|e| Error::Other(format!("build ws request: {}", e)))?;

        let headers = request.headers_mut();
        headers.insert("X-Api-Token", self.auth.api_key.parse().unwrap());
        headers.insert("X-Api-Connect-Id", connect_id.parse().unwrap());

        Ok(request)
    }

    /// Returns default headers for API requests.
    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.auth.api_key)).unwrap(),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers
    }

    /// Handles the API response.
    async fn handle_response<R>(&self, response: Response) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let status = response.status();
        let req_id = request_id(&response);
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(self.parse_error(&body, status.as_u16(), &req_id));
        }

        serde_json::from_slice(&body).map_err(Error::from)
    }

    /// Handles an error response.
    async fn handle_error_response(&self, response: Response) -> Error {
        let status = response.status().as_u16();
        let req_id = request_id(&response);

        match response.bytes().await {
            Ok(body) => self.parse_error(&body, status, &req_id),
            Err(e) => Error::Http(e),
        }
    }

    /// Parses an error response body.
    fn parse_error(&self, body: &[u8], http_status: u16, req_id: &str) -> Error {
        if let Ok(api_resp) = serde_json::from_slice::<ErrorEnvelope>(body) {
            if !api_resp.error.is_empty() {
                let code = if api_resp.code != 0 {
                    api_resp.code
                } else {
                    http_status as i32
                };
                return Error::api_with_req_id(code, api_resp.error, req_id, http_status);
            }
        }

        Error::api_with_req_id(
            http_status as i32,
            String::from_utf8_lossy(body).to_string(),
            req_id,
            http_status,
        )
    }
}

const USER_AGENT_VALUE: &str = "nimbus-cognitive-rust/1.0";

fn request_id(response: &Response) -> String {
    response
        .headers()
        .get("X-Request-Id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}

/// API error envelope.
#[derive(Debug, serde::Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    error: String,
}
