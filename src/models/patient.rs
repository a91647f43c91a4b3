use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<String>,
    /// Assigned disease id.
    #[serde(default)]
    pub disease: Option<i64>,
    /// Assigned treatment id.
    #[serde(default)]
    pub treatment: Option<i64>,
    /// Attending doctor id.
    #[serde(default)]
    pub doctor: Option<i64>,
    #[serde(default)]
    pub admitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub discharged: bool,
}

/// Body of `POST /patients/`.
#[derive(Debug, Clone, Serialize)]
pub struct NewPatient {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

/// Partial update for `PATCH /patients/{id}/`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PatientAssignment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disease: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub treatment: Option<i64>,
}

/// Body of `POST /discharges/`.
#[derive(Debug, Clone, Serialize)]
pub struct DischargeRequest {
    pub patient: i64,
}

/// Row of `GET /discharges/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DischargeRecord {
    pub discharge_id: i64,
    pub patient_name: String,
    #[serde(deserialize_with = "date_or_datetime")]
    pub discharge_date: NaiveDate,
    #[serde(default)]
    pub doctor_name: Option<String>,
}

/// Accept either `2024-05-01` or a full RFC 3339 timestamp.
fn date_or_datetime<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(date) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_patient_tolerates_sparse_rows() {
        let p: Patient = serde_json::from_value(json!({"id": 9, "name": "Ana"})).unwrap();
        assert_eq!(p.disease, None);
        assert!(!p.discharged);
    }

    #[test]
    fn test_assignment_only_sends_set_fields() {
        let body = serde_json::to_value(PatientAssignment {
            disease: Some(4),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(body, json!({"disease": 4}));
    }

    #[test]
    fn test_discharge_record_parses_dates() {
        let rec: DischargeRecord = serde_json::from_value(json!({
            "discharge_id": 3,
            "patient_name": "Ana",
            "discharge_date": "2024-05-01T10:00:00Z",
            "doctor_name": "Dr. Grey"
        }))
        .unwrap();
        assert_eq!(rec.discharge_date.to_string(), "2024-05-01");

        let plain: DischargeRecord = serde_json::from_value(json!({
            "discharge_id": 4,
            "patient_name": "Ben",
            "discharge_date": "2024-06-02"
        }))
        .unwrap();
        assert_eq!(plain.discharge_date, NaiveDate::from_ymd_opt(2024, 6, 2).unwrap());
        assert!(plain.doctor_name.is_none());
    }
}
