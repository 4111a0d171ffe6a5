use std::collections::HashMap;

use uuid::Uuid;

use crate::domain::projects::project::Project;
use crate::domain::users::user::User;

/// Public slice of a user referenced from a project.
#[derive(Debug, Clone)]
pub struct PersonDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub skills: Vec<String>,
}

impl From<&User> for PersonDto {
    fn from(u: &User) -> Self {
        PersonDto {
            id: u.id,
            name: u.name.clone(),
            email: u.email.clone(),
            skills: u.skills(),
        }
    }
}

/// A project with the users it references resolved.
#[derive(Debug, Clone)]
pub struct ProjectViewDto {
    pub project: Project,
    pub people: HashMap<Uuid, PersonDto>,
}

impl ProjectViewDto {
    pub fn person(&self, id: Uuid) -> Option<&PersonDto> {
        self.people.get(&id)
    }
}
