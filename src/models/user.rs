use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl User {
    /// Users shown on the admin dashboard: anyone with a role who is not a superuser.
    pub fn is_managed(&self) -> bool {
        self.role.as_deref().is_some_and(|r| !r.is_empty()) && !self.is_superuser
    }

    pub fn is_doctor(&self) -> bool {
        self.role.as_deref() == Some("doctor")
    }
}

/// Body of `POST /users/register/` for the initial superuser.
#[derive(Debug, Clone, Serialize)]
pub struct AdminRegistration {
    pub username: String,
    pub password: String,
    pub role: &'static str,
    pub is_staff: bool,
}

impl AdminRegistration {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role: "admin",
            is_staff: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_managed_users_exclude_superusers_and_roleless() {
        let users: Vec<User> = serde_json::from_value(json!([
            {"id": 1, "username": "root", "role": "admin", "is_superuser": true},
            {"id": 2, "username": "alice", "role": "admin"},
            {"id": 3, "username": "bob", "role": "doctor"},
            {"id": 4, "username": "ghost"},
            {"id": 5, "username": "blank", "role": ""}
        ]))
        .unwrap();

        let managed: Vec<&str> = users
            .iter()
            .filter(|u| u.is_managed())
            .map(|u| u.username.as_str())
            .collect();
        assert_eq!(managed, vec!["alice", "bob"]);
        assert!(users[2].is_doctor());
        assert!(users[0].is_active);
    }

    #[test]
    fn test_admin_registration_body() {
        let body = serde_json::to_value(AdminRegistration::new("root", "pw")).unwrap();
        assert_eq!(
            body,
            json!({"username": "root", "password": "pw", "role": "admin", "is_staff": true})
        );
    }
}
