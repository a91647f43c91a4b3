use super::ClinicApi;
use crate::errors::ClientError;
use crate::gateway::PendingRequest;
use crate::models::doctor::{Doctor, DoctorUpdate, NewDoctor};

impl ClinicApi {
    pub async fn list_doctors(&self) -> Result<Vec<Doctor>, ClientError> {
        self.gateway.get_json("/doctors/").await
    }

    pub async fn get_doctor(&self, id: i64) -> Result<Doctor, ClientError> {
        self.gateway.get_json(&format!("/doctors/{}/", id)).await
    }

    pub async fn create_doctor(&self, doctor: &NewDoctor) -> Result<Doctor, ClientError> {
        tracing::debug!(name = %doctor.name, username = %doctor.user.username, "Creating doctor");
        let created: Doctor = self
            .gateway
            .send_json(PendingRequest::post("/doctors/", doctor)?)
            .await?;
        tracing::info!(doctor_id = created.id, "Doctor created");
        Ok(created)
    }

    pub async fn update_doctor(&self, id: i64, update: &DoctorUpdate) -> Result<Doctor, ClientError> {
        self.gateway
            .send_json(PendingRequest::put(format!("/doctors/{}/", id), update)?)
            .await
    }

    pub async fn delete_doctor(&self, id: i64) -> Result<(), ClientError> {
        self.gateway
            .send(PendingRequest::delete(format!("/doctors/{}/", id)))
            .await?;
        tracing::info!(doctor_id = id, "Doctor removed");
        Ok(())
    }
}
