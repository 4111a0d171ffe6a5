use std::collections::HashMap;

use crate::application::dto::projects::{PersonDto, ProjectViewDto};
use crate::application::ports::user_repository::UserRepository;
use crate::domain::projects::project::Project;

/// Resolves buyer, assignee and applicant references with a single lookup.
pub async fn populate<U>(users: &U, projects: Vec<Project>) -> anyhow::Result<Vec<ProjectViewDto>>
where
    U: UserRepository + ?Sized,
{
    let mut ids: Vec<_> = projects
        .iter()
        .flat_map(|p| p.referenced_users())
        .collect();
    ids.sort();
    ids.dedup();
    let people: HashMap<_, _> = if ids.is_empty() {
        HashMap::new()
    } else {
        users
            .find_many(&ids)
            .await?
            .iter()
            .map(|u| (u.id, PersonDto::from(u)))
            .collect()
    };
    Ok(projects
        .into_iter()
        .map(|project| {
            let refs = project.referenced_users();
            let people = refs
                .iter()
                .filter_map(|id| people.get(id).map(|p| (*id, p.clone())))
                .collect();
            ProjectViewDto { project, people }
        })
        .collect())
}

pub async fn populate_one<U>(users: &U, project: Project) -> anyhow::Result<ProjectViewDto>
where
    U: UserRepository + ?Sized,
{
    let mut views = populate(users, vec![project]).await?;
    views
        .pop()
        .ok_or_else(|| anyhow::anyhow!("populate returned no project"))
}
