use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::errors::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Attach the stored access token and refresh on 401.
    Bearer,
    /// Login and registration: no header, no refresh.
    Anonymous,
}

/// An outbound call before it is sent.
///
/// The one-shot "already retried" marker is not a field here: it is set on the
/// request's extension map by the auth interceptor so it follows the replayed
/// copy.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub headers: HeaderMap,
    pub auth: AuthMode,
}

impl PendingRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            headers: HeaderMap::new(),
            auth: AuthMode::Bearer,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn post<B: Serialize>(path: impl Into<String>, body: &B) -> Result<Self, ClientError> {
        Self::new(Method::POST, path).json(body)
    }

    pub fn put<B: Serialize>(path: impl Into<String>, body: &B) -> Result<Self, ClientError> {
        Self::new(Method::PUT, path).json(body)
    }

    pub fn patch<B: Serialize>(path: impl Into<String>, body: &B) -> Result<Self, ClientError> {
        Self::new(Method::PATCH, path).json(body)
    }

    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self, ClientError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn anonymous(mut self) -> Self {
        self.auth = AuthMode::Anonymous;
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// A 2xx response with its body fully read.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl ApiResponse {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builders_default_to_bearer() {
        let req = PendingRequest::get("/doctors/");
        assert_eq!(req.method, Method::GET);
        assert_eq!(req.auth, AuthMode::Bearer);
        assert!(req.body.is_none());
    }

    #[test]
    fn test_post_serializes_body() {
        let req = PendingRequest::post("/token/", &json!({"username": "u"}))
            .unwrap()
            .anonymous();
        assert_eq!(req.body, Some(json!({"username": "u"})));
        assert_eq!(req.auth, AuthMode::Anonymous);
    }

    #[test]
    fn test_header_overrides_previous_value() {
        use reqwest::header::ACCEPT;
        let req = PendingRequest::get("/patients/")
            .header(ACCEPT, HeaderValue::from_static("text/plain"))
            .header(ACCEPT, HeaderValue::from_static("application/json"));
        assert_eq!(req.headers.get_all(ACCEPT).iter().count(), 1);
        assert_eq!(req.headers[ACCEPT], "application/json");
    }

    #[test]
    fn test_response_json() {
        let resp = ApiResponse {
            status: StatusCode::OK,
            body: Bytes::from_static(br#"[{"id": 1}]"#),
        };
        let rows: Vec<Value> = resp.json().unwrap();
        assert_eq!(rows[0]["id"], 1);
    }
}
