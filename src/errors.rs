use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::views::View;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Refresh failed or no refresh credential was stored. Credentials are gone.
    #[error("session is no longer valid, log in again")]
    SessionInvalid,

    /// 401 that survived a refresh, or a 401 on a request that never refreshes.
    #[error("not authorized: {detail}")]
    Unauthorized { detail: String },

    #[error("validation failed: {messages}")]
    Validation { messages: String, body: Value },

    #[error("backend returned {status}: {detail}")]
    Api { status: StatusCode, detail: String },

    #[error("malformed credential: {0}")]
    MalformedCredential(String),

    #[error("you cannot deactivate yourself while there are doctors present")]
    SelfDeactivationBlocked,

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("session storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ClientError {
    /// View the operator must be sent to, if this error ends the session.
    pub fn redirect(&self) -> Option<View> {
        match self {
            ClientError::SessionInvalid
            | ClientError::Unauthorized { .. }
            | ClientError::MalformedCredential(_) => Some(View::Login),
            _ => None,
        }
    }

    /// Build the error for a non-2xx backend response.
    pub fn from_status(status: StatusCode, body: &[u8]) -> Self {
        let parsed: Option<Value> = serde_json::from_slice(body).ok();

        if status == StatusCode::BAD_REQUEST {
            if let Some(value) = parsed {
                return ClientError::Validation {
                    messages: field_messages(&value),
                    body: value,
                };
            }
        }

        let detail = parsed
            .as_ref()
            .and_then(|v| v.get("detail"))
            .and_then(|v| v.as_str())
            .map(String::from)
            .unwrap_or_else(|| {
                let text = String::from_utf8_lossy(body);
                if text.trim().is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("unexpected response")
                        .to_string()
                } else {
                    text.chars().take(200).collect()
                }
            });

        if status == StatusCode::UNAUTHORIZED {
            ClientError::Unauthorized { detail }
        } else {
            ClientError::Api { status, detail }
        }
    }
}

impl From<reqwest_middleware::Error> for ClientError {
    fn from(err: reqwest_middleware::Error) -> Self {
        match err {
            reqwest_middleware::Error::Reqwest(e) => ClientError::Transport(e),
            reqwest_middleware::Error::Middleware(e) => match e.downcast::<ClientError>() {
                Ok(inner) => inner,
                Err(other) => ClientError::Internal(other),
            },
        }
    }
}

/// Flatten a field-level validation body into one line.
///
/// `{"user": {"username": ["taken"]}, "name": "required"}` becomes
/// `user: username: taken | name: required`. Object key order follows the body.
pub fn field_messages(body: &Value) -> String {
    match body {
        Value::Object(fields) => fields
            .iter()
            .map(|(field, value)| match value {
                Value::Array(items) => {
                    let joined: Vec<String> = items.iter().map(scalar_text).collect();
                    format!("{}: {}", field, joined.join(", "))
                }
                Value::Object(_) => format!("{}: {}", field, field_messages(value)),
                other => format!("{}: {}", field, scalar_text(other)),
            })
            .collect::<Vec<_>>()
            .join(" | "),
        other => scalar_text(other),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(_) => field_messages(value),
        other => other.to_string(),
    }
}
