use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::auth::register::hash_password;
use crate::domain::users::user::{Role, User, normalize_email};

/// Creates the bootstrap admin account when it does not exist yet.
pub struct SeedAdmin<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> SeedAdmin<'a, R> {
    pub async fn execute(&self, name: &str, email: &str, password: &str) -> anyhow::Result<bool> {
        let email = normalize_email(email);
        if let Some(existing) = self.repo.find_credentials(&email).await? {
            if existing.user.role != Role::Admin {
                tracing::warn!(user_id = %existing.user.id, "admin_seed_email_taken_by_non_admin");
            }
            return Ok(false);
        }
        let user = User::new(name, &email, Role::Admin, chrono::Utc::now());
        let created = self.repo.insert(&user, &hash_password(password)?).await?;
        if created {
            tracing::info!(user_id = %user.id, "admin_seeded");
        }
        Ok(created)
    }
}
