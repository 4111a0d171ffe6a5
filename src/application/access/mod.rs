use crate::domain::errors::DomainError;
use crate::domain::projects::project::Project;
use crate::domain::users::user::{Role, User};

/// How a signed-in user relates to a given project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Capability {
    Browse,
    Assignee,
    Owner,
    Oversight,
}

// Presentation layer is responsible for loading the User from the session.

pub fn resolve_project(user: &User, project: &Project) -> Capability {
    if user.has_role(Role::Admin) {
        Capability::Oversight
    } else if project.is_owned_by(user.id) {
        Capability::Owner
    } else if project.is_assigned_to(user.id) {
        Capability::Assignee
    } else {
        Capability::Browse
    }
}

/// Owners and admins see every proposal; everyone else only their own.
pub fn sees_all_proposals(cap: Capability) -> bool {
    cap >= Capability::Owner
}

/// Drops proposals the user is not allowed to read.
pub fn redact_proposals(user: &User, project: &mut Project) {
    if !sees_all_proposals(resolve_project(user, project)) {
        project.requests.retain(|r| r.solver_id == user.id);
    }
}

pub fn require_role(user: &User, role: Role) -> Result<(), DomainError> {
    if user.has_role(role) {
        return Ok(());
    }
    Err(DomainError::Forbidden(match role {
        Role::Buyer => "Forbidden: Buyer role required",
        Role::ProblemSolver => "Forbidden: Problem Solver role required",
        Role::Admin => "Forbidden: Admin role required",
        Role::User => "Forbidden",
    }))
}
