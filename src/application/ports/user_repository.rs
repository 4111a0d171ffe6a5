use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::users::user::User;

#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Returns false when the email is already taken.
    async fn insert(&self, user: &User, password_hash: &str) -> anyhow::Result<bool>;
    async fn find_credentials(&self, email: &str) -> anyhow::Result<Option<UserCredentials>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    async fn find_many(&self, ids: &[Uuid]) -> anyhow::Result<Vec<User>>;
    // Persists role, pending role request and profile.
    async fn save(&self, user: &User) -> anyhow::Result<bool>;
    async fn list_all(&self) -> anyhow::Result<Vec<User>>;
    async fn search(&self, query: &str) -> anyhow::Result<Vec<User>>;
    async fn count(&self) -> anyhow::Result<i64>;
}
