use crate::middleware::identity::{decode_identity, Identity, Role};
use crate::session::SessionManager;
use crate::views::View;

/// Why a navigation was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenialReason {
    NoCredential,
    MalformedCredential,
    RoleNotPermitted(Role),
}

/// Outcome of one navigation attempt.
#[derive(Debug)]
pub enum Access<T> {
    Granted(T),
    Denied { redirect: View, reason: DenialReason },
}

impl<T> Access<T> {
    pub fn is_granted(&self) -> bool {
        matches!(self, Access::Granted(_))
    }
}

/// Pre-render role check for a protected view.
///
/// Holds no state between navigations; every call to [`RouteGuard::check`]
/// reads and decodes the stored credential afresh.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    allowed: Vec<Role>,
}

impl RouteGuard {
    pub fn new(allowed: &[Role]) -> Self {
        Self {
            allowed: allowed.to_vec(),
        }
    }

    /// Guard for a view, or `None` if the view is public.
    pub fn for_view(view: View) -> Option<Self> {
        view.allowed_roles().map(Self::new)
    }

    /// Unchecked → Decoding → Granted | Denied.
    pub fn check(&self, session: &SessionManager) -> Access<Identity> {
        let token = match session.access() {
            Ok(Some(token)) => token,
            Ok(None) => return Self::deny(DenialReason::NoCredential),
            Err(e) => {
                tracing::warn!("Route guard could not read session: {}", e);
                return Self::deny(DenialReason::NoCredential);
            }
        };

        let identity = match decode_identity(&token) {
            Ok(identity) => identity,
            Err(e) => {
                tracing::warn!("Route guard rejected stored credential: {}", e);
                return Self::deny(DenialReason::MalformedCredential);
            }
        };

        if self.allowed.contains(&identity.role) {
            Access::Granted(identity)
        } else {
            tracing::warn!(role = %identity.role, "Route guard denied navigation");
            Self::deny(DenialReason::RoleNotPermitted(identity.role))
        }
    }

    /// Run `content` only when access is granted.
    pub fn render<T, F>(&self, session: &SessionManager, content: F) -> Access<T>
    where
        F: FnOnce(&Identity) -> T,
    {
        match self.check(session) {
            Access::Granted(identity) => Access::Granted(content(&identity)),
            Access::Denied { redirect, reason } => Access::Denied { redirect, reason },
        }
    }

    fn deny<T>(reason: DenialReason) -> Access<T> {
        Access::Denied {
            redirect: View::Login,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::memory::MemoryStore;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    fn token_for(role: &str) -> String {
        encode(
            &Header::default(),
            &json!({"role": role, "user_id": 1, "exp": 9999999999u64}),
            &EncodingKey::from_secret(b"k"),
        )
        .unwrap()
    }

    fn session_with(access: Option<String>) -> SessionManager {
        let session = SessionManager::new(MemoryStore::default());
        if let Some(access) = access {
            session.set_credentials(&access, "refresh").unwrap();
        }
        session
    }

    #[test]
    fn test_admin_token_admin_route_granted() {
        let session = session_with(Some(token_for("admin")));
        let guard = RouteGuard::new(&[Role::Admin]);
        let rendered = guard.render(&session, |id| format!("hello {}", id.role));
        match rendered {
            Access::Granted(body) => assert_eq!(body, "hello admin"),
            other => panic!("expected grant, got {:?}", other),
        }
    }

    #[test]
    fn test_doctor_token_admin_route_redirects_to_login() {
        let session = session_with(Some(token_for("doctor")));
        let guard = RouteGuard::new(&[Role::Admin]);
        match guard.check(&session) {
            Access::Denied { redirect, reason } => {
                assert_eq!(redirect, View::Login);
                assert_eq!(reason, DenialReason::RoleNotPermitted(Role::Doctor));
            }
            other => panic!("expected denial, got {:?}", other),
        }
    }

    #[test]
    fn test_no_credential_denied_for_any_allow_list() {
        let session = session_with(None);
        for allowed in [
            vec![],
            vec![Role::Admin],
            vec![Role::Doctor],
            vec![Role::Admin, Role::Doctor],
        ] {
            let access = RouteGuard::new(&allowed).check(&session);
            assert!(matches!(
                access,
                Access::Denied { reason: DenialReason::NoCredential, .. }
            ));
        }
    }

    #[test]
    fn test_malformed_credential_fails_closed() {
        let session = session_with(Some("garbage.token".into()));
        let guard = RouteGuard::new(&[Role::Admin, Role::Doctor]);
        let mut rendered = false;
        let access = guard.render(&session, |_| rendered = true);
        assert!(!rendered);
        assert!(matches!(
            access,
            Access::Denied { reason: DenialReason::MalformedCredential, .. }
        ));
    }

    #[test]
    fn test_unrecognized_role_denied() {
        let session = session_with(Some(token_for("nurse")));
        let guard = RouteGuard::new(&[Role::Admin, Role::Doctor]);
        assert!(!guard.check(&session).is_granted());
    }

    #[test]
    fn test_role_case_must_match_exactly() {
        for (role, allowed) in [("ADMIN", Role::Admin), ("Doctor", Role::Doctor)] {
            let session = session_with(Some(token_for(role)));
            match RouteGuard::new(&[allowed]).check(&session) {
                Access::Denied { redirect, reason } => {
                    assert_eq!(redirect, View::Login);
                    assert_eq!(
                        reason,
                        DenialReason::RoleNotPermitted(Role::Unrecognized(role.to_string()))
                    );
                }
                other => panic!("'{}' was granted: {:?}", role, other),
            }
        }
    }

    #[test]
    fn test_rechecks_on_every_navigation() {
        let session = session_with(Some(token_for("admin")));
        let guard = RouteGuard::for_view(View::AdminDashboard).unwrap();
        assert!(guard.check(&session).is_granted());

        session.clear().unwrap();
        assert!(!guard.check(&session).is_granted());
    }

    #[test]
    fn test_public_views_have_no_guard() {
        assert!(RouteGuard::for_view(View::Login).is_none());
        assert!(RouteGuard::for_view(View::Signup).is_none());
    }
}
