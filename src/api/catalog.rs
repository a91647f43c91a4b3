use super::ClinicApi;
use crate::errors::ClientError;
use crate::models::catalog::{Disease, Treatment};

impl ClinicApi {
    pub async fn list_diseases(&self) -> Result<Vec<Disease>, ClientError> {
        self.gateway.get_json("/diseases/").await
    }

    pub async fn list_treatments(&self) -> Result<Vec<Treatment>, ClientError> {
        self.gateway.get_json("/treatments/").await
    }
}
