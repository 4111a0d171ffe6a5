use uuid::Uuid;

use crate::application::errors::ServiceResult;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::errors::DomainError;
use crate::domain::users::user::{SolverProfile, User};

pub struct GetProfile<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> GetProfile<'a, R> {
    pub async fn execute(&self, user_id: Uuid) -> ServiceResult<User> {
        Ok(self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::NotFound("User"))?)
    }
}

pub struct UpdateProfile<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> UpdateProfile<'a, R> {
    pub async fn execute(&self, user_id: Uuid, profile: SolverProfile) -> ServiceResult<User> {
        let mut user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::NotFound("User"))?;
        user.profile = Some(profile);
        if !self.repo.save(&user).await? {
            return Err(DomainError::NotFound("User").into());
        }
        Ok(user)
    }
}
