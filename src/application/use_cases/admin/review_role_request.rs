use uuid::Uuid;

use crate::application::errors::ServiceResult;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::errors::DomainError;
use crate::domain::users::user::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleDecision {
    Approve,
    Reject,
}

impl RoleDecision {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "approve" => Some(RoleDecision::Approve),
            "reject" => Some(RoleDecision::Reject),
            _ => None,
        }
    }
}

pub struct ReviewRoleRequest<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> ReviewRoleRequest<'a, R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        decision: Option<RoleDecision>,
    ) -> ServiceResult<User> {
        let mut user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::NotFound("User"))?;
        let decision = decision.ok_or(DomainError::Invalid("Invalid action"))?;
        match decision {
            RoleDecision::Approve => {
                let role = user.approve_role_request()?;
                tracing::info!(user_id = %user.id, role = role.as_str(), "role_request_approved");
            }
            RoleDecision::Reject => {
                user.reject_role_request()?;
                tracing::info!(user_id = %user.id, "role_request_rejected");
            }
        }
        if !self.repo.save(&user).await? {
            return Err(DomainError::NotFound("User").into());
        }
        Ok(user)
    }
}
