use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString},
};
use password_hash::rand_core::OsRng;

use crate::application::errors::ServiceResult;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::errors::DomainError;
use crate::domain::users::user::{Role, SolverProfile, User};

pub struct Register<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: Role,
    pub profile: Option<SolverProfile>,
}

pub(crate) fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();
    Ok(hash)
}

impl<'a, R: UserRepository + ?Sized> Register<'a, R> {
    pub async fn execute(&self, req: &RegisterRequest) -> ServiceResult<User> {
        if req.name.trim().is_empty() || req.password.is_empty() {
            return Err(DomainError::Invalid("Name, email and password are required").into());
        }
        if !req.email.contains('@') {
            return Err(DomainError::Invalid("A valid email is required").into());
        }
        if req.role == Role::Admin {
            return Err(DomainError::Invalid("Invalid role").into());
        }
        let mut user = User::new(&req.name, &req.email, req.role, chrono::Utc::now());
        if req.role == Role::ProblemSolver {
            user.profile = Some(req.profile.clone().unwrap_or_default());
        }
        let hash = hash_password(&req.password)?;
        if !self.repo.insert(&user, &hash).await? {
            return Err(DomainError::Conflict("User with this email already exists.").into());
        }
        tracing::info!(user_id = %user.id, role = user.role.as_str(), "user_registered");
        Ok(user)
    }
}
