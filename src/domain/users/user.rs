use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    User,
    Buyer,
    #[serde(rename = "Problem Solver")]
    ProblemSolver,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Buyer => "Buyer",
            Role::ProblemSolver => "Problem Solver",
            Role::Admin => "Admin",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "User" => Some(Role::User),
            "Buyer" => Some(Role::Buyer),
            "Problem Solver" => Some(Role::ProblemSolver),
            "Admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Roles a regular account may ask an admin for.
    pub fn is_requestable(&self) -> bool {
        matches!(self, Role::Buyer | Role::ProblemSolver)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleRequestStatus {
    Pending,
    Rejected,
}

impl RoleRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleRequestStatus::Pending => "pending",
            RoleRequestStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRequest {
    pub requested_role: Role,
    pub status: RoleRequestStatus,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverProfile {
    pub bio: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub phone: Option<String>,
    pub github: Option<String>,
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub role_request: Option<RoleRequest>,
    pub profile: Option<SolverProfile>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: &str, email: &str, role: Role, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            email: normalize_email(email),
            role,
            role_request: None,
            profile: None,
            created_at: now,
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }

    /// Files (or replaces) a pending request for a working role.
    pub fn request_role(
        &mut self,
        requested: Role,
        profile: Option<SolverProfile>,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if !requested.is_requestable() {
            return Err(DomainError::Invalid("Invalid role requested"));
        }
        if self.role == Role::Admin {
            return Err(DomainError::Invalid("Admins cannot request a role change"));
        }
        if self.role == requested {
            return Err(DomainError::Invalid("You already have this role"));
        }
        self.role_request = Some(RoleRequest {
            requested_role: requested,
            status: RoleRequestStatus::Pending,
            submitted_at: now,
        });
        if requested == Role::ProblemSolver {
            if let Some(p) = profile {
                self.profile = Some(p);
            }
        }
        Ok(())
    }

    pub fn approve_role_request(&mut self) -> Result<Role, DomainError> {
        let req = self
            .pending_request()
            .ok_or(DomainError::Invalid("No pending role request"))?;
        let granted = req.requested_role;
        self.role = granted;
        self.role_request = None;
        Ok(granted)
    }

    pub fn reject_role_request(&mut self) -> Result<(), DomainError> {
        match self.role_request.as_mut() {
            Some(req) if req.status == RoleRequestStatus::Pending => {
                req.status = RoleRequestStatus::Rejected;
                Ok(())
            }
            _ => Err(DomainError::Invalid("No pending role request")),
        }
    }

    pub fn pending_request(&self) -> Option<&RoleRequest> {
        self.role_request
            .as_ref()
            .filter(|r| r.status == RoleRequestStatus::Pending)
    }

    pub fn skills(&self) -> Vec<String> {
        self.profile
            .as_ref()
            .map(|p| p.skills.clone())
            .unwrap_or_default()
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Splits a comma separated list, trimming entries and dropping empties.
pub fn parse_list(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> User {
        User::new("Ada", "Ada@Example.com ", role, Utc::now())
    }

    #[test]
    fn role_wire_names_round_trip() {
        for role in [Role::User, Role::Buyer, Role::ProblemSolver, Role::Admin] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(
            serde_json::to_string(&Role::ProblemSolver).unwrap(),
            "\"Problem Solver\""
        );
        assert_eq!(Role::parse("Solver"), None);
    }

    #[test]
    fn new_user_normalizes_email() {
        assert_eq!(user(Role::User).email, "ada@example.com");
    }

    #[test]
    fn only_working_roles_can_be_requested() {
        let mut u = user(Role::User);
        assert_eq!(
            u.request_role(Role::Admin, None, Utc::now()),
            Err(DomainError::Invalid("Invalid role requested"))
        );
        assert!(u.role_request.is_none());
        u.request_role(Role::Buyer, None, Utc::now()).unwrap();
        assert_eq!(u.pending_request().unwrap().requested_role, Role::Buyer);
    }

    #[test]
    fn requesting_current_role_is_rejected() {
        let mut u = user(Role::Buyer);
        assert!(u.request_role(Role::Buyer, None, Utc::now()).is_err());
        let mut admin = user(Role::Admin);
        assert!(admin.request_role(Role::Buyer, None, Utc::now()).is_err());
    }

    #[test]
    fn solver_request_stores_profile() {
        let mut u = user(Role::User);
        let profile = SolverProfile {
            bio: Some("rustacean".into()),
            skills: parse_list("rust, sql ,,axum"),
            phone: None,
            github: Some("ada".into()),
        };
        u.request_role(Role::ProblemSolver, Some(profile), Utc::now())
            .unwrap();
        assert_eq!(u.skills(), vec!["rust", "sql", "axum"]);
    }

    #[test]
    fn approval_grants_role_and_clears_request() {
        let mut u = user(Role::User);
        u.request_role(Role::ProblemSolver, None, Utc::now())
            .unwrap();
        assert_eq!(u.approve_role_request(), Ok(Role::ProblemSolver));
        assert_eq!(u.role, Role::ProblemSolver);
        assert!(u.role_request.is_none());
        assert!(u.approve_role_request().is_err());
    }

    #[test]
    fn rejection_keeps_request_marked_rejected() {
        let mut u = user(Role::User);
        u.request_role(Role::Buyer, None, Utc::now()).unwrap();
        u.reject_role_request().unwrap();
        assert_eq!(u.role, Role::User);
        assert_eq!(
            u.role_request.as_ref().map(|r| r.status),
            Some(RoleRequestStatus::Rejected)
        );
        assert!(u.pending_request().is_none());
        assert!(u.reject_role_request().is_err());
    }
}
