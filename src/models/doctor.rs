use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub specialty: Option<String>,
    /// Backing user account id.
    #[serde(default)]
    pub user: Option<i64>,
}

/// Login account created alongside a doctor.
#[derive(Debug, Clone, Serialize)]
pub struct DoctorAccount {
    pub username: String,
    pub password: String,
    pub role: &'static str,
}

/// Body of `POST /doctors/`.
#[derive(Debug, Clone, Serialize)]
pub struct NewDoctor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    pub user: DoctorAccount,
}

impl NewDoctor {
    pub fn new(
        name: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            specialty: None,
            user: DoctorAccount {
                username: username.into(),
                password: password.into(),
                role: "doctor",
            },
        }
    }
}

/// Body of `PUT /doctors/{id}/`.
#[derive(Debug, Clone, Serialize)]
pub struct DoctorUpdate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_doctor_nests_account_with_doctor_role() {
        let body = serde_json::to_value(NewDoctor::new("Dr. Grey", "mgrey", "s3cret")).unwrap();
        assert_eq!(
            body,
            json!({
                "name": "Dr. Grey",
                "user": {"username": "mgrey", "password": "s3cret", "role": "doctor"}
            })
        );
    }
}
