use super::ClinicApi;
use crate::errors::ClientError;
use crate::gateway::PendingRequest;
use crate::models::patient::DischargeRecord;

impl ClinicApi {
    pub async fn list_discharged(&self) -> Result<Vec<DischargeRecord>, ClientError> {
        self.gateway.get_json("/discharges/").await
    }

    /// Remove a discharged patient's record.
    pub async fn delete_discharged(&self, discharge_id: i64) -> Result<(), ClientError> {
        self.gateway
            .send(PendingRequest::delete(format!("/discharges/{}/", discharge_id)))
            .await?;
        tracing::info!(discharge_id, "Discharged patient deleted");
        Ok(())
    }
}
