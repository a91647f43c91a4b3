use crate::api::ClinicApi;
use crate::errors::ClientError;
use crate::models::catalog::{Disease, Treatment};
use crate::models::doctor::Doctor;
use crate::models::patient::Patient;

#[derive(Debug, Clone)]
pub struct DoctorDashboard {
    pub doctors: Vec<Doctor>,
    pub patients: Vec<Patient>,
    pub diseases: Vec<Disease>,
    pub treatments: Vec<Treatment>,
}

impl DoctorDashboard {
    pub async fn load(api: &ClinicApi) -> Result<Self, ClientError> {
        Ok(Self {
            doctors: api.list_doctors().await?,
            patients: api.list_patients().await?,
            diseases: api.list_diseases().await?,
            treatments: api.list_treatments().await?,
        })
    }

    /// Patients still under care.
    pub fn active_patients(&self) -> impl Iterator<Item = &Patient> {
        self.patients.iter().filter(|p| !p.discharged)
    }

    pub fn disease_name(&self, id: Option<i64>) -> Option<&str> {
        let id = id?;
        self.diseases.iter().find(|d| d.id == id).map(|d| d.name.as_str())
    }

    pub fn treatment_name(&self, id: Option<i64>) -> Option<&str> {
        let id = id?;
        self.treatments.iter().find(|t| t.id == id).map(|t| t.name.as_str())
    }
}
