//! Console views and the roles each one admits.

use std::fmt;
use std::str::FromStr;

use crate::middleware::identity::Role;

const ADMIN_ONLY: &[Role] = &[Role::Admin];
const DOCTOR_ONLY: &[Role] = &[Role::Doctor];

/// A navigable view. Paths mirror the web front end's routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Signup,
    Login,
    AdminDashboard,
    DoctorDashboard,
}

impl View {
    pub fn path(&self) -> &'static str {
        match self {
            View::Signup => "/",
            View::Login => "/login",
            View::AdminDashboard => "/admin/dashboard",
            View::DoctorDashboard => "/doctor/dashboard",
        }
    }

    /// Roles permitted to render this view. `None` means the view is public.
    pub fn allowed_roles(&self) -> Option<&'static [Role]> {
        match self {
            View::Signup | View::Login => None,
            View::AdminDashboard => Some(ADMIN_ONLY),
            View::DoctorDashboard => Some(DOCTOR_ONLY),
        }
    }

    /// Landing view after a successful login.
    pub fn landing_for(role: &Role) -> View {
        match role {
            Role::Admin => View::AdminDashboard,
            Role::Doctor => View::DoctorDashboard,
            Role::Unrecognized(_) => View::Login,
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_end_matches('/') {
            "" | "signup" => Ok(View::Signup),
            "/login" | "login" => Ok(View::Login),
            "/admin/dashboard" | "admin" => Ok(View::AdminDashboard),
            "/doctor/dashboard" | "doctor" => Ok(View::DoctorDashboard),
            other => Err(format!("unknown view '{}'", other)),
        }
    }
}
