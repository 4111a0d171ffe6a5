use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};

use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::{User, normalize_email};

pub struct Login<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl<'a, R: UserRepository + ?Sized> Login<'a, R> {
    pub async fn execute(&self, req: &LoginRequest) -> anyhow::Result<Option<User>> {
        let creds = match self
            .repo
            .find_credentials(&normalize_email(&req.email))
            .await?
        {
            Some(c) => c,
            None => return Ok(None),
        };
        let parsed =
            PasswordHash::new(&creds.password_hash).map_err(|e| anyhow::anyhow!(e.to_string()))?;
        if Argon2::default()
            .verify_password(req.password.as_bytes(), &parsed)
            .is_ok()
        {
            Ok(Some(creds.user))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::MemoryUserRepository;
    use crate::application::use_cases::auth::register::hash_password;
    use crate::domain::users::user::Role;

    #[tokio::test]
    async fn verifies_password() {
        let user = User::new("Lin", "lin@example.com", Role::Buyer, chrono::Utc::now());
        let repo =
            MemoryUserRepository::with_users(vec![(user.clone(), hash_password("s3cret").unwrap())]);
        let uc = Login { repo: &repo };

        let ok = uc
            .execute(&LoginRequest {
                email: " Lin@Example.com".into(),
                password: "s3cret".into(),
            })
            .await
            .unwrap();
        assert_eq!(ok.map(|u| u.id), Some(user.id));

        let bad = uc
            .execute(&LoginRequest {
                email: "lin@example.com".into(),
                password: "wrong".into(),
            })
            .await
            .unwrap();
        assert!(bad.is_none());

        let missing = uc
            .execute(&LoginRequest {
                email: "nobody@example.com".into(),
                password: "s3cret".into(),
            })
            .await
            .unwrap();
        assert!(missing.is_none());
    }
}
