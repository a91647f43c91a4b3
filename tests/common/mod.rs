#![allow(dead_code)]

use std::sync::Arc;

use clinic::api::ClinicApi;
use clinic::config::{self, Config};
use clinic::gateway::ApiGateway;
use clinic::session::memory::MemoryStore;
use clinic::session::{Credentials, SessionManager};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;
use wiremock::MockServer;

pub fn config_for(server: &MockServer) -> Config {
    config_with(server, &[])
}

/// Config pointing at `server`, with extra `QUICKCARE_*` settings.
pub fn config_with(server: &MockServer, extra: &[(&str, &str)]) -> Config {
    let uri = server.uri();
    let extra: Vec<(String, String)> = extra
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    config::from_lookup(move |key| {
        if key == "QUICKCARE_API_URL" {
            return Some(uri.clone());
        }
        extra.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
    })
    .unwrap()
}

pub fn session(access: Option<&str>, refresh: Option<&str>) -> Arc<SessionManager> {
    Arc::new(SessionManager::new(MemoryStore::with_credentials(Credentials {
        access: access.map(String::from),
        refresh: refresh.map(String::from),
    })))
}

pub fn api_for(server: &MockServer, session: Arc<SessionManager>) -> ClinicApi {
    ClinicApi::new(ApiGateway::new(&config_for(server), session).unwrap())
}

/// An HS256 token as the backend would issue it.
pub fn jwt(role: &str, user_id: i64, exp: u64) -> String {
    encode(
        &Header::default(),
        &json!({"token_type": "access", "role": role, "user_id": user_id, "exp": exp}),
        &EncodingKey::from_secret(b"backend-signing-key"),
    )
    .unwrap()
}
