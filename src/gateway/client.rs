use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use serde::de::DeserializeOwned;
use url::Url;

use super::request::{ApiResponse, AuthMode, PendingRequest};
use crate::config::Config;
use crate::errors::ClientError;
use crate::middleware::auth::{Anonymous, AuthInterceptor, TokenRefresher};
use crate::session::SessionManager;

/// HTTP client for the clinic backend.
/// Wraps reqwest with the bearer/refresh interceptor.
pub struct ApiGateway {
    base: Url,
    client: ClientWithMiddleware,
    session: Arc<SessionManager>,
}

impl ApiGateway {
    pub fn new(config: &Config, session: Arc<SessionManager>) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs));
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let bare = builder.build()?;

        let refresher = TokenRefresher::new(bare.clone(), config.api_url.join("token/refresh/")?);
        let client = ClientBuilder::new(bare)
            .with(AuthInterceptor::new(session.clone(), refresher))
            .build();

        Ok(Self {
            base: config.api_url.clone(),
            client,
            session,
        })
    }

    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base.join(path.trim_start_matches('/'))?)
    }

    /// Send one request. Non-2xx statuses come back as errors, with 400 bodies
    /// parsed into field messages.
    pub async fn send(&self, req: PendingRequest) -> Result<ApiResponse, ClientError> {
        let url = self.url(&req.path)?;
        let mut builder = self
            .client
            .request(req.method.clone(), url)
            .headers(req.headers);

        if let Some(body) = &req.body {
            builder = builder
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(serde_json::to_vec(body)?);
        }
        if req.auth == AuthMode::Anonymous {
            builder = builder.with_extension(Anonymous);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;

        if status.is_success() {
            tracing::debug!(method = %req.method, path = %req.path, status = %status, "Backend call succeeded");
            Ok(ApiResponse { status, body })
        } else {
            let err = ClientError::from_status(status, &body);
            tracing::warn!(method = %req.method, path = %req.path, status = %status, "Backend call failed: {}", err);
            Err(err)
        }
    }

    pub async fn send_json<T: DeserializeOwned>(&self, req: PendingRequest) -> Result<T, ClientError> {
        let req = req.header(ACCEPT, HeaderValue::from_static("application/json"));
        self.send(req).await?.json()
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.send_json(PendingRequest::get(path)).await
    }
}
