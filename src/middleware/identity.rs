//! Identity decoding. Reads the role and subject claims out of an access JWT.
//!
//! The console never holds the backend's signing key, so the signature is not
//! verified here; the backend re-checks every token it receives. Expiry is not
//! checked either: an expired token still names its holder, and the gateway's
//! refresh flow deals with expiry on the next request.

use std::collections::HashSet;
use std::fmt;

use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::Deserialize;

use crate::errors::ClientError;

/// Permission class carried in the `role` claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Admin,
    Doctor,
    /// Any other value, including a missing claim (empty string).
    Unrecognized(String),
}

impl Role {
    /// Exact match; any other spelling is unrecognized.
    pub fn from_claim(s: &str) -> Self {
        match s {
            "admin" => Role::Admin,
            "doctor" => Role::Doctor,
            _ => Role::Unrecognized(s.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::Doctor => "doctor",
            Role::Unrecognized(raw) => raw,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Unrecognized(raw) if raw.is_empty() => f.write_str("<none>"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Who the stored access credential says the caller is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub role: Role,
    /// `user_id` claim, falling back to `sub`.
    pub subject: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AccessClaims {
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    user_id: Option<serde_json::Value>,
    #[serde(default)]
    sub: Option<serde_json::Value>,
}

fn claim_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Decode the identity from an access token without verifying its signature.
pub fn decode_identity(token: &str) -> Result<Identity, ClientError> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims = HashSet::new();

    let data = decode::<AccessClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map_err(|e| ClientError::MalformedCredential(e.to_string()))?;

    let claims = data.claims;
    let subject = claims
        .user_id
        .as_ref()
        .and_then(claim_text)
        .or_else(|| claims.sub.as_ref().and_then(claim_text));

    Ok(Identity {
        role: Role::from_claim(claims.role.as_deref().unwrap_or_default()),
        subject,
    })
}
