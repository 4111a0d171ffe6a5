use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use uuid::Uuid;

use crate::application::ports::user_repository::{UserCredentials, UserRepository};
use crate::domain::users::user::{Role, RoleRequest, SolverProfile, User};
use crate::infrastructure::db::{PgPool, contains_pattern};

const USER_COLUMNS: &str = "id, name, email, role, role_request, profile, created_at";

pub struct SqlxUserRepository {
    pub pool: PgPool,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_user(r: &PgRow) -> anyhow::Result<User> {
    let role: String = r.try_get("role")?;
    let role_request: Option<Json<RoleRequest>> = r.try_get("role_request")?;
    let profile: Option<Json<SolverProfile>> = r.try_get("profile")?;
    Ok(User {
        id: r.try_get("id")?,
        name: r.try_get("name")?,
        email: r.try_get("email")?,
        role: Role::parse(&role).ok_or_else(|| anyhow::anyhow!("unknown role: {role}"))?,
        role_request: role_request.map(|j| j.0),
        profile: profile.map(|j| j.0),
        created_at: r.try_get("created_at")?,
    })
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn insert(&self, user: &User, password_hash: &str) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"INSERT INTO users (id, name, email, password_hash, role, role_request, profile, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
               ON CONFLICT (email) DO NOTHING"#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(password_hash)
        .bind(user.role.as_str())
        .bind(user.role_request.as_ref().map(Json))
        .bind(user.profile.as_ref().map(Json))
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn find_credentials(&self, email: &str) -> anyhow::Result<Option<UserCredentials>> {
        let sql = format!("SELECT {USER_COLUMNS}, password_hash FROM users WHERE email = $1");
        let row = sqlx::query(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        let Some(r) = row else {
            return Ok(None);
        };
        Ok(Some(UserCredentials {
            user: map_user(&r)?,
            password_hash: r.try_get("password_hash")?,
        }))
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(map_user).transpose()
    }

    async fn find_many(&self, ids: &[Uuid]) -> anyhow::Result<Vec<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ANY($1)");
        let rows = sqlx::query(&sql)
            .bind(ids.to_vec())
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(map_user).collect()
    }

    async fn save(&self, user: &User) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"UPDATE users SET name = $2, role = $3, role_request = $4, profile = $5
               WHERE id = $1"#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(user.role.as_str())
        .bind(user.role_request.as_ref().map(Json))
        .bind(user.profile.as_ref().map(Json))
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn list_all(&self) -> anyhow::Result<Vec<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(map_user).collect()
    }

    async fn search(&self, query: &str) -> anyhow::Result<Vec<User>> {
        let like = contains_pattern(query);
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users
             WHERE name ILIKE $1 ESCAPE '\\' OR email ILIKE $1 ESCAPE '\\'
             ORDER BY created_at DESC"
        );
        let rows = sqlx::query(&sql)
            .bind(like)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(map_user).collect()
    }

    async fn count(&self) -> anyhow::Result<i64> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }
}
