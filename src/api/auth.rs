use super::ClinicApi;
use crate::errors::ClientError;
use crate::gateway::PendingRequest;
use crate::middleware::identity::{decode_identity, Identity};
use crate::models::token::{LoginRequest, TokenPair};
use crate::models::user::AdminRegistration;

impl ClinicApi {
    /// Register the superuser account. Sent without credentials.
    pub async fn register_admin(&self, username: &str, password: &str) -> Result<(), ClientError> {
        let req = PendingRequest::post("/users/register/", &AdminRegistration::new(username, password))?
            .anonymous();
        self.gateway.send(req).await?;
        tracing::info!(username = %username, "Superuser registered");
        Ok(())
    }

    /// Exchange username/password for a credential pair and persist it.
    ///
    /// Returns the identity decoded from the new access token so the caller can
    /// pick a landing view.
    pub async fn login(&self, username: &str, password: &str) -> Result<Identity, ClientError> {
        let req = PendingRequest::post(
            "/token/",
            &LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            },
        )?
        .anonymous();

        let pair: TokenPair = self.gateway.send_json(req).await?;
        // Decode before storing: an undecodable pair never reaches the session.
        let identity = decode_identity(&pair.access)?;
        self.session().set_credentials(&pair.access, &pair.refresh)?;

        tracing::info!(username = %username, role = %identity.role, "Logged in");
        Ok(identity)
    }

    /// Forget both credentials. Never touches the network.
    pub fn logout(&self) -> Result<(), ClientError> {
        self.session().clear()?;
        tracing::info!("Logged out");
        Ok(())
    }

    /// Identity of the stored access token, if any.
    pub fn whoami(&self) -> Result<Option<Identity>, ClientError> {
        match self.session().access()? {
            Some(token) => Ok(Some(decode_identity(&token)?)),
            None => Ok(None),
        }
    }
}
