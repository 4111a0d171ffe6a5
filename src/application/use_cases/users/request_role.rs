use uuid::Uuid;

use crate::application::errors::ServiceResult;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::errors::DomainError;
use crate::domain::users::user::{Role, SolverProfile, User};

pub struct RequestRole<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> RequestRole<'a, R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        requested: Role,
        profile: Option<SolverProfile>,
    ) -> ServiceResult<User> {
        let mut user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::NotFound("User"))?;
        user.request_role(requested, profile, chrono::Utc::now())?;
        if !self.repo.save(&user).await? {
            return Err(DomainError::NotFound("User").into());
        }
        tracing::info!(user_id = %user.id, requested = requested.as_str(), "role_requested");
        Ok(user)
    }
}
