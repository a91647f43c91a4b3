use super::ClinicApi;
use crate::errors::ClientError;
use crate::gateway::PendingRequest;
use crate::models::patient::{DischargeRequest, NewPatient, Patient, PatientAssignment};

impl ClinicApi {
    pub async fn list_patients(&self) -> Result<Vec<Patient>, ClientError> {
        self.gateway.get_json("/patients/").await
    }

    pub async fn get_patient(&self, id: i64) -> Result<Patient, ClientError> {
        self.gateway.get_json(&format!("/patients/{}/", id)).await
    }

    pub async fn admit_patient(&self, patient: &NewPatient) -> Result<Patient, ClientError> {
        let admitted: Patient = self
            .gateway
            .send_json(PendingRequest::post("/patients/", patient)?)
            .await?;
        tracing::info!(patient_id = admitted.id, "Patient admitted");
        Ok(admitted)
    }

    pub async fn assign_disease(&self, patient_id: i64, disease_id: i64) -> Result<Patient, ClientError> {
        self.assign(
            patient_id,
            PatientAssignment {
                disease: Some(disease_id),
                ..Default::default()
            },
        )
        .await
    }

    pub async fn assign_treatment(&self, patient_id: i64, treatment_id: i64) -> Result<Patient, ClientError> {
        self.assign(
            patient_id,
            PatientAssignment {
                treatment: Some(treatment_id),
                ..Default::default()
            },
        )
        .await
    }

    async fn assign(&self, patient_id: i64, assignment: PatientAssignment) -> Result<Patient, ClientError> {
        self.gateway
            .send_json(PendingRequest::patch(format!("/patients/{}/", patient_id), &assignment)?)
            .await
    }

    pub async fn discharge_patient(&self, patient_id: i64) -> Result<(), ClientError> {
        self.gateway
            .send(PendingRequest::post(
                "/discharges/",
                &DischargeRequest { patient: patient_id },
            )?)
            .await?;
        tracing::info!(patient_id, "Patient discharged");
        Ok(())
    }
}
