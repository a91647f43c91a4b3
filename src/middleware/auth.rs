//! Bearer-token interceptor for the backend client.
//!
//! Attaches the stored access token to every outgoing request. When the
//! backend answers 401, exchanges the refresh token once and replays the
//! request with the new access token. The refresh call goes through the bare
//! `reqwest::Client`, never through this middleware.

use std::sync::Arc;

use async_trait::async_trait;
use http::Extensions;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Request, Response, StatusCode};
use reqwest_middleware::{Middleware, Next};
use url::Url;

use crate::errors::ClientError;
use crate::models::token::{RefreshRequest, RefreshedToken};
use crate::session::{Refreshed, SessionManager};

/// Request extension: send without credentials and never refresh.
#[derive(Debug, Clone, Copy)]
pub struct Anonymous;

/// Request extension set once the request has been through a refresh.
#[derive(Debug, Clone, Copy)]
pub struct Retried;

/// Exchanges a refresh token at `POST /token/refresh/`.
#[derive(Clone)]
pub struct TokenRefresher {
    client: reqwest::Client,
    url: Url,
}

impl TokenRefresher {
    pub fn new(client: reqwest::Client, url: Url) -> Self {
        Self { client, url }
    }

    pub async fn exchange(&self, refresh: String) -> Result<Refreshed, ClientError> {
        let resp = self
            .client
            .post(self.url.clone())
            .json(&RefreshRequest { refresh })
            .send()
            .await?;

        let status = resp.status();
        let body = resp.bytes().await?;
        if !status.is_success() {
            return Err(ClientError::from_status(status, &body));
        }

        let token: RefreshedToken = serde_json::from_slice(&body)?;
        Ok(Refreshed {
            access: token.access,
            refresh: token.refresh,
        })
    }
}

pub struct AuthInterceptor {
    session: Arc<SessionManager>,
    refresher: TokenRefresher,
}

impl AuthInterceptor {
    pub fn new(session: Arc<SessionManager>, refresher: TokenRefresher) -> Self {
        Self { session, refresher }
    }
}

fn to_middleware_error(err: ClientError) -> reqwest_middleware::Error {
    match err {
        ClientError::Transport(e) => reqwest_middleware::Error::Reqwest(e),
        other => reqwest_middleware::Error::Middleware(anyhow::Error::new(other)),
    }
}

fn attach_bearer(req: &mut Request, token: &str) -> Result<(), ClientError> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|e| ClientError::MalformedCredential(e.to_string()))?;
    value.set_sensitive(true);
    req.headers_mut().insert(AUTHORIZATION, value);
    Ok(())
}

#[async_trait]
impl Middleware for AuthInterceptor {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        if extensions.get::<Anonymous>().is_some() {
            return next.run(req, extensions).await;
        }

        let sent_with = self.session.access().map_err(to_middleware_error)?;
        if let Some(token) = sent_with.as_deref() {
            attach_bearer(&mut req, token).map_err(to_middleware_error)?;
        }

        let replay = req.try_clone();
        let response = next.clone().run(req, extensions).await?;

        if response.status() != StatusCode::UNAUTHORIZED || extensions.get::<Retried>().is_some() {
            return Ok(response);
        }

        let Some(mut replay) = replay else {
            tracing::warn!("401 on a request with a streaming body, cannot replay it");
            return Ok(response);
        };

        extensions.insert(Retried);
        tracing::info!(path = %replay.url().path(), "Access token rejected, trying to refresh");

        let fresh = self
            .session
            .refresh_with(sent_with.as_deref(), |refresh| self.refresher.exchange(refresh))
            .await
            .map_err(|e| {
                if matches!(e, ClientError::SessionInvalid) {
                    tracing::warn!("Token refresh failed, session cleared");
                }
                to_middleware_error(e)
            })?;

        attach_bearer(&mut replay, &fresh).map_err(to_middleware_error)?;
        tracing::debug!(path = %replay.url().path(), "Retrying request with refreshed token");
        next.run(replay, extensions).await
    }
}
