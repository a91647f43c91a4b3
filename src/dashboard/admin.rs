use crate::api::ClinicApi;
use crate::errors::ClientError;
use crate::middleware::identity::Identity;
use crate::models::doctor::{Doctor, NewDoctor};
use crate::models::patient::DischargeRecord;
use crate::models::user::User;

#[derive(Debug, Clone)]
pub struct AdminDashboard {
    /// Users with a role, superusers excluded.
    pub users: Vec<User>,
    /// The logged-in admin, matched by the token's subject.
    pub current_user: Option<User>,
    pub discharged: Vec<DischargeRecord>,
}

impl AdminDashboard {
    pub async fn load(api: &ClinicApi, identity: &Identity) -> Result<Self, ClientError> {
        let all = api.list_users().await?;
        let discharged = api.list_discharged().await?;
        Ok(Self::from_parts(all, identity, discharged))
    }

    pub fn from_parts(all: Vec<User>, identity: &Identity, discharged: Vec<DischargeRecord>) -> Self {
        let current_user = identity
            .subject
            .as_deref()
            .and_then(|sub| all.iter().find(|u| u.id.to_string() == sub))
            .cloned();
        let users = all.into_iter().filter(User::is_managed).collect();
        Self {
            users,
            current_user,
            discharged,
        }
    }

    /// An admin may not deactivate themself while any doctor account remains.
    pub fn ensure_can_deactivate(&self, target_id: i64) -> Result<(), ClientError> {
        let is_self = self.current_user.as_ref().is_some_and(|u| u.id == target_id);
        if is_self && self.users.iter().any(User::is_doctor) {
            return Err(ClientError::SelfDeactivationBlocked);
        }
        Ok(())
    }

    pub async fn deactivate(&self, api: &ClinicApi, target_id: i64) -> Result<(), ClientError> {
        self.ensure_can_deactivate(target_id)?;
        api.deactivate_user(target_id).await
    }

    pub async fn create_doctor(
        api: &ClinicApi,
        name: &str,
        username: &str,
        password: &str,
    ) -> Result<Doctor, ClientError> {
        api.create_doctor(&NewDoctor::new(name, username, password)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::identity::Role;
    use serde_json::json;

    fn users() -> Vec<User> {
        serde_json::from_value(json!([
            {"id": 1, "username": "root", "role": "admin", "is_superuser": true},
            {"id": 2, "username": "alice", "role": "admin"},
            {"id": 3, "username": "house", "role": "doctor"}
        ]))
        .unwrap()
    }

    fn admin(subject: &str) -> Identity {
        Identity {
            role: Role::Admin,
            subject: Some(subject.to_string()),
        }
    }

    #[test]
    fn test_from_parts_filters_and_finds_current_user() {
        let dash = AdminDashboard::from_parts(users(), &admin("2"), vec![]);
        let names: Vec<&str> = dash.users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["alice", "house"]);
        assert_eq!(dash.current_user.unwrap().username, "alice");
    }

    #[test]
    fn test_superuser_is_still_current_user() {
        let dash = AdminDashboard::from_parts(users(), &admin("1"), vec![]);
        assert_eq!(dash.current_user.unwrap().username, "root");
    }

    #[test]
    fn test_self_deactivation_blocked_while_doctors_exist() {
        let dash = AdminDashboard::from_parts(users(), &admin("2"), vec![]);
        assert!(matches!(
            dash.ensure_can_deactivate(2),
            Err(ClientError::SelfDeactivationBlocked)
        ));
        assert!(dash.ensure_can_deactivate(3).is_ok());
    }

    #[test]
    fn test_self_deactivation_allowed_without_doctors() {
        let no_doctors: Vec<User> = users().into_iter().filter(|u| !u.is_doctor()).collect();
        let dash = AdminDashboard::from_parts(no_doctors, &admin("2"), vec![]);
        assert!(dash.ensure_can_deactivate(2).is_ok());
    }
}
