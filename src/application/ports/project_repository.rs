use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::projects::project::{Project, ProjectStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectFilter {
    All,
    Status(ProjectStatus),
    OwnedBy(Uuid),
    AppliedBy(Uuid),
    AssignedTo(Uuid),
}

impl ProjectFilter {
    pub fn matches(&self, project: &Project) -> bool {
        match self {
            ProjectFilter::All => true,
            ProjectFilter::Status(s) => project.status == *s,
            ProjectFilter::OwnedBy(id) => project.buyer_id == *id,
            ProjectFilter::AppliedBy(id) => project.proposal_by(*id).is_some(),
            ProjectFilter::AssignedTo(id) => project.assigned_solver_id == Some(*id),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectCounts {
    pub total: i64,
    pub assigned: i64,
    pub completed: i64,
}

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn insert(&self, project: &Project) -> anyhow::Result<()>;
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Project>>;
    // Writes the whole aggregate back; false when the row is gone.
    async fn save(&self, project: &Project) -> anyhow::Result<bool>;
    /// Newest first.
    async fn list(&self, filter: ProjectFilter) -> anyhow::Result<Vec<Project>>;
    async fn search(&self, query: &str) -> anyhow::Result<Vec<Project>>;
    async fn counts(&self) -> anyhow::Result<ProjectCounts>;
}
