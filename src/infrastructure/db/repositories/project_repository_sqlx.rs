use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use uuid::Uuid;

use crate::application::ports::project_repository::{
    ProjectCounts, ProjectFilter, ProjectRepository,
};
use crate::domain::projects::project::{
    AssignmentDetails, Project, ProjectStatus, Proposal, Task,
};
use crate::infrastructure::db::{PgPool, contains_pattern};

const PROJECT_COLUMNS: &str = "id, title, description, tech_stack, budget, buyer_id, \
     assigned_solver_id, assignment, requests, tasks, status, created_at";

pub struct SqlxProjectRepository {
    pub pool: PgPool,
}

impl SqlxProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_project(r: &PgRow) -> anyhow::Result<Project> {
    let status: String = r.try_get("status")?;
    let assignment: Option<Json<AssignmentDetails>> = r.try_get("assignment")?;
    let requests: Json<Vec<Proposal>> = r.try_get("requests")?;
    let tasks: Json<Vec<Task>> = r.try_get("tasks")?;
    Ok(Project {
        id: r.try_get("id")?,
        title: r.try_get("title")?,
        description: r.try_get("description")?,
        tech_stack: r.try_get("tech_stack")?,
        budget: r.try_get("budget")?,
        buyer_id: r.try_get("buyer_id")?,
        assigned_solver_id: r.try_get("assigned_solver_id")?,
        assignment: assignment.map(|j| j.0),
        requests: requests.0,
        tasks: tasks.0,
        status: ProjectStatus::parse(&status)
            .ok_or_else(|| anyhow::anyhow!("unknown project status: {status}"))?,
        created_at: r.try_get("created_at")?,
    })
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepository {
    async fn insert(&self, project: &Project) -> anyhow::Result<()> {
        sqlx::query(
            r#"INSERT INTO projects (id, title, description, tech_stack, budget, buyer_id,
                   assigned_solver_id, assignment, requests, tasks, status, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)"#,
        )
        .bind(project.id)
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.tech_stack)
        .bind(project.budget)
        .bind(project.buyer_id)
        .bind(project.assigned_solver_id)
        .bind(project.assignment.as_ref().map(Json))
        .bind(Json(&project.requests))
        .bind(Json(&project.tasks))
        .bind(project.status.as_str())
        .bind(project.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Project>> {
        let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(map_project).transpose()
    }

    async fn save(&self, project: &Project) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"UPDATE projects SET
                   title = $2, description = $3, tech_stack = $4, budget = $5,
                   assigned_solver_id = $6, assignment = $7, requests = $8, tasks = $9,
                   status = $10
               WHERE id = $1"#,
        )
        .bind(project.id)
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.tech_stack)
        .bind(project.budget)
        .bind(project.assigned_solver_id)
        .bind(project.assignment.as_ref().map(Json))
        .bind(Json(&project.requests))
        .bind(Json(&project.tasks))
        .bind(project.status.as_str())
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn list(&self, filter: ProjectFilter) -> anyhow::Result<Vec<Project>> {
        let rows = match filter {
            ProjectFilter::All => {
                let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at DESC");
                sqlx::query(&sql).fetch_all(&self.pool).await?
            }
            ProjectFilter::Status(status) => {
                let sql = format!(
                    "SELECT {PROJECT_COLUMNS} FROM projects WHERE status = $1 ORDER BY created_at DESC"
                );
                sqlx::query(&sql)
                    .bind(status.as_str())
                    .fetch_all(&self.pool)
                    .await?
            }
            ProjectFilter::OwnedBy(buyer_id) => {
                let sql = format!(
                    "SELECT {PROJECT_COLUMNS} FROM projects WHERE buyer_id = $1 ORDER BY created_at DESC"
                );
                sqlx::query(&sql)
                    .bind(buyer_id)
                    .fetch_all(&self.pool)
                    .await?
            }
            ProjectFilter::AppliedBy(solver_id) => {
                let sql = format!(
                    "SELECT {PROJECT_COLUMNS} FROM projects WHERE requests @> $1 ORDER BY created_at DESC"
                );
                sqlx::query(&sql)
                    .bind(Json(serde_json::json!([{ "solver_id": solver_id }])))
                    .fetch_all(&self.pool)
                    .await?
            }
            ProjectFilter::AssignedTo(solver_id) => {
                let sql = format!(
                    "SELECT {PROJECT_COLUMNS} FROM projects WHERE assigned_solver_id = $1 ORDER BY created_at DESC"
                );
                sqlx::query(&sql)
                    .bind(solver_id)
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        rows.iter().map(map_project).collect()
    }

    async fn search(&self, query: &str) -> anyhow::Result<Vec<Project>> {
        let like = contains_pattern(query);
        let sql = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects
             WHERE title ILIKE $1 ESCAPE '\\' OR description ILIKE $1 ESCAPE '\\'
             ORDER BY created_at DESC"
        );
        let rows = sqlx::query(&sql)
            .bind(like)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(map_project).collect()
    }

    async fn counts(&self) -> anyhow::Result<ProjectCounts> {
        let row = sqlx::query(
            r#"SELECT COUNT(*) AS total,
                      COUNT(*) FILTER (WHERE status = 'assigned') AS assigned,
                      COUNT(*) FILTER (WHERE status = 'completed') AS completed
               FROM projects"#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(ProjectCounts {
            total: row.try_get("total")?,
            assigned: row.try_get("assigned")?,
            completed: row.try_get("completed")?,
        })
    }
}
