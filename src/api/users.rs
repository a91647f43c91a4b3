use super::ClinicApi;
use crate::errors::ClientError;
use crate::gateway::PendingRequest;
use crate::models::user::User;

impl ClinicApi {
    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        self.gateway.get_json("/users/").await
    }

    /// `DELETE /users/{id}/`. The backend deactivates rather than deletes.
    pub async fn deactivate_user(&self, user_id: i64) -> Result<(), ClientError> {
        self.gateway
            .send(PendingRequest::delete(format!("/users/{}/", user_id)))
            .await?;
        tracing::info!(user_id, "User deactivated");
        Ok(())
    }
}
