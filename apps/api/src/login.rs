//! Role selection. Navigational only: the chosen role is trusted as sent and
//! nothing is remembered between requests.

use std::str::FromStr;

use axum::{extract::Query, response::Redirect, Form};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::render::{redirect_with_notice, FlashQuery, NoticeCode, Page};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Employer,
    Student,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Employer, Role::Student];

    pub fn landing_path(self) -> &'static str {
        match self {
            Role::Admin => "/admin",
            Role::Employer => "/employer",
            Role::Student => "/",
        }
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "admin" => Ok(Role::Admin),
            "employer" => Ok(Role::Employer),
            "student" => Ok(Role::Student),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginView {
    pub roles: [Role; 3],
}

/// GET /login
pub async fn handle_login_form(Query(flash): Query<FlashQuery>) -> Page<LoginView> {
    Page::new("login.html", LoginView { roles: Role::ALL }).with_flash(&flash)
}

/// POST /login
pub async fn handle_login(Form(form): Form<LoginForm>) -> Redirect {
    match form.role.as_deref().map(Role::from_str) {
        Some(Ok(role)) => {
            info!(?role, "role selected");
            Redirect::to(role.landing_path())
        }
        _ => {
            warn!(role = ?form.role, "invalid role selected");
            redirect_with_notice("/login", NoticeCode::InvalidRole)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("employer".parse::<Role>(), Ok(Role::Employer));
        assert_eq!("student".parse::<Role>(), Ok(Role::Student));
        assert!("Admin ".parse::<Role>().is_err());
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn test_landing_paths() {
        assert_eq!(Role::Admin.landing_path(), "/admin");
        assert_eq!(Role::Employer.landing_path(), "/employer");
        assert_eq!(Role::Student.landing_path(), "/");
    }
}
