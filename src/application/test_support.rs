//! In-memory port implementations for use case and router tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::project_repository::{
    ProjectCounts, ProjectFilter, ProjectRepository,
};
use crate::application::ports::user_repository::{UserCredentials, UserRepository};
use crate::domain::projects::project::{Project, ProjectStatus};
use crate::domain::users::user::User;

#[derive(Default)]
pub struct MemoryUserRepository {
    rows: Mutex<HashMap<Uuid, (User, String)>>,
    lost_writes: bool,
}

impl MemoryUserRepository {
    pub fn with_users(users: Vec<(User, String)>) -> Self {
        Self {
            rows: Mutex::new(users.into_iter().map(|(u, h)| (u.id, (u, h))).collect()),
            lost_writes: false,
        }
    }

    /// Every `save` reports that the row no longer exists.
    pub fn losing_writes(mut self) -> Self {
        self.lost_writes = true;
        self
    }

    fn sorted(&self, pred: impl Fn(&User) -> bool) -> Vec<User> {
        let rows = self.rows.lock().unwrap();
        let mut out: Vec<User> = rows
            .values()
            .map(|(u, _)| u)
            .filter(|u| pred(u))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(&self, user: &User, password_hash: &str) -> anyhow::Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        if rows.values().any(|(u, _)| u.email == user.email) {
            return Ok(false);
        }
        rows.insert(user.id, (user.clone(), password_hash.to_string()));
        Ok(true)
    }

    async fn find_credentials(&self, email: &str) -> anyhow::Result<Option<UserCredentials>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .values()
            .find(|(u, _)| u.email == email)
            .map(|(u, h)| UserCredentials {
                user: u.clone(),
                password_hash: h.clone(),
            }))
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        Ok(self.rows.lock().unwrap().get(&id).map(|(u, _)| u.clone()))
    }

    async fn find_many(&self, ids: &[Uuid]) -> anyhow::Result<Vec<User>> {
        let rows = self.rows.lock().unwrap();
        Ok(ids
            .iter()
            .filter_map(|id| rows.get(id).map(|(u, _)| u.clone()))
            .collect())
    }

    async fn save(&self, user: &User) -> anyhow::Result<bool> {
        if self.lost_writes {
            return Ok(false);
        }
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(&user.id) {
            Some((stored, _)) => {
                *stored = user.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_all(&self) -> anyhow::Result<Vec<User>> {
        Ok(self.sorted(|_| true))
    }

    async fn search(&self, query: &str) -> anyhow::Result<Vec<User>> {
        let q = query.to_lowercase();
        Ok(self.sorted(|u| {
            u.name.to_lowercase().contains(&q) || u.email.to_lowercase().contains(&q)
        }))
    }

    async fn count(&self) -> anyhow::Result<i64> {
        Ok(self.rows.lock().unwrap().len() as i64)
    }
}

#[derive(Default)]
pub struct MemoryProjectRepository {
    rows: Mutex<HashMap<Uuid, Project>>,
}

impl MemoryProjectRepository {
    fn sorted(&self, pred: impl Fn(&Project) -> bool) -> Vec<Project> {
        let rows = self.rows.lock().unwrap();
        let mut out: Vec<Project> = rows.values().filter(|p| pred(p)).cloned().collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out
    }
}

#[async_trait]
impl ProjectRepository for MemoryProjectRepository {
    async fn insert(&self, project: &Project) -> anyhow::Result<()> {
        self.rows
            .lock()
            .unwrap()
            .insert(project.id, project.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Project>> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn save(&self, project: &Project) -> anyhow::Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(&project.id) {
            Some(stored) => {
                *stored = project.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list(&self, filter: ProjectFilter) -> anyhow::Result<Vec<Project>> {
        Ok(self.sorted(|p| filter.matches(p)))
    }

    async fn search(&self, query: &str) -> anyhow::Result<Vec<Project>> {
        let q = query.to_lowercase();
        Ok(self.sorted(|p| {
            p.title.to_lowercase().contains(&q) || p.description.to_lowercase().contains(&q)
        }))
    }

    async fn counts(&self) -> anyhow::Result<ProjectCounts> {
        let rows = self.rows.lock().unwrap();
        Ok(ProjectCounts {
            total: rows.len() as i64,
            assigned: rows
                .values()
                .filter(|p| p.status == ProjectStatus::Assigned)
                .count() as i64,
            completed: rows
                .values()
                .filter(|p| p.status == ProjectStatus::Completed)
                .count() as i64,
        })
    }
}
