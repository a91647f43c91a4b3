//! Typed wrappers over the clinic REST endpoints.
//! Every protected call goes through the authenticated gateway.

use std::sync::Arc;

use crate::gateway::ApiGateway;
use crate::session::SessionManager;

pub mod auth;
pub mod catalog;
pub mod discharges;
pub mod doctors;
pub mod patients;
pub mod users;

pub struct ClinicApi {
    gateway: ApiGateway,
}

impl ClinicApi {
    pub fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &ApiGateway {
        &self.gateway
    }

    pub fn session(&self) -> &Arc<SessionManager> {
        self.gateway.session()
    }
}
