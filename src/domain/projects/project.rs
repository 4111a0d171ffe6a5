use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Open,
    Assigned,
    Completed,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Open => "open",
            ProjectStatus::Assigned => "assigned",
            ProjectStatus::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "open" => Some(ProjectStatus::Open),
            "assigned" => Some(ProjectStatus::Assigned),
            "completed" => Some(ProjectStatus::Completed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ProposalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalStatus::Pending => "pending",
            ProposalStatus::Accepted => "accepted",
            ProposalStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Submitted,
    Accepted,
    Rejected,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Submitted => "submitted",
            TaskStatus::Accepted => "accepted",
            TaskStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    Approve,
    Reject,
}

impl ReviewDecision {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "approve" | "accept" => Some(ReviewDecision::Approve),
            "reject" => Some(ReviewDecision::Reject),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: Uuid,
    pub solver_id: Uuid,
    pub estimated_modules: Option<i32>,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub phone_number: Option<String>,
    pub status: ProposalStatus,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub zip_url: String,
    pub note: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub status: TaskStatus,
    pub submission: Option<Submission>,
    pub feedback: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentDetails {
    pub estimated_modules: Option<i32>,
    pub estimated_deadline: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    pub budget: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct ProposalDraft {
    pub estimated_modules: Option<i32>,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub phone_number: Option<String>,
}

/// Partial update: `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct ProposalEdit {
    pub estimated_modules: Option<i32>,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
}

/// Partial update: `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct TaskEdit {
    pub title: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub accepted: usize,
    pub total: usize,
    pub estimated_modules: Option<i32>,
}

impl Progress {
    /// Accepted work against the agreed module estimate, or against the
    /// task count when no estimate was given. Capped at 100.
    pub fn percent(&self) -> u8 {
        let denominator = self
            .estimated_modules
            .filter(|m| *m > 0)
            .map(|m| m as usize)
            .unwrap_or(self.total);
        if denominator == 0 {
            return 0;
        }
        ((self.accepted * 100) / denominator).min(100) as u8
    }
}

#[derive(Debug, Clone)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    pub budget: Option<i64>,
    pub buyer_id: Uuid,
    pub assigned_solver_id: Option<Uuid>,
    pub assignment: Option<AssignmentDetails>,
    pub requests: Vec<Proposal>,
    pub tasks: Vec<Task>,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
}

impl Project {
    pub fn new(buyer_id: Uuid, draft: NewProject, now: DateTime<Utc>) -> Result<Self, DomainError> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(DomainError::Invalid("Title is required"));
        }
        let description = draft.description.trim();
        if description.is_empty() {
            return Err(DomainError::Invalid("Description is required"));
        }
        if draft.budget.is_some_and(|b| b < 0) {
            return Err(DomainError::Invalid("Budget cannot be negative"));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: description.to_string(),
            tech_stack: draft.tech_stack,
            budget: draft.budget,
            buyer_id,
            assigned_solver_id: None,
            assignment: None,
            requests: Vec::new(),
            tasks: Vec::new(),
            status: ProjectStatus::Open,
            created_at: now,
        })
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.buyer_id == user_id
    }

    pub fn is_assigned_to(&self, user_id: Uuid) -> bool {
        self.assigned_solver_id == Some(user_id)
    }

    pub fn ensure_owner(&self, user_id: Uuid) -> Result<(), DomainError> {
        if self.is_owned_by(user_id) {
            Ok(())
        } else {
            Err(DomainError::Forbidden("You are not the buyer of this project."))
        }
    }

    pub fn ensure_assigned_solver(&self, user_id: Uuid) -> Result<(), DomainError> {
        if self.is_assigned_to(user_id) {
            Ok(())
        } else {
            Err(DomainError::Forbidden("You are not assigned to this project."))
        }
    }

    pub fn proposal_by(&self, solver_id: Uuid) -> Option<&Proposal> {
        self.requests.iter().find(|r| r.solver_id == solver_id)
    }

    pub fn task(&self, task_id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    fn task_mut(&mut self, task_id: Uuid) -> Result<&mut Task, DomainError> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or(DomainError::NotFound("Task"))
    }

    fn ensure_in_progress(&self) -> Result<(), DomainError> {
        if self.status == ProjectStatus::Assigned {
            Ok(())
        } else {
            Err(DomainError::Invalid("Project is not in progress."))
        }
    }

    pub fn apply(
        &mut self,
        solver_id: Uuid,
        draft: ProposalDraft,
        now: DateTime<Utc>,
    ) -> Result<Uuid, DomainError> {
        if self.is_owned_by(solver_id) {
            return Err(DomainError::Forbidden("You cannot apply to your own project."));
        }
        if self.proposal_by(solver_id).is_some() {
            return Err(DomainError::Conflict("You have already applied to this project."));
        }
        if self.status != ProjectStatus::Open {
            return Err(DomainError::Invalid("Project is not open for applications."));
        }
        let id = Uuid::new_v4();
        self.requests.push(Proposal {
            id,
            solver_id,
            estimated_modules: draft.estimated_modules,
            description: draft.description,
            deadline: draft.deadline,
            phone_number: draft.phone_number,
            status: ProposalStatus::Pending,
            submitted_at: now,
        });
        Ok(id)
    }

    pub fn edit_proposal(
        &mut self,
        solver_id: Uuid,
        request_id: Uuid,
        edit: ProposalEdit,
    ) -> Result<(), DomainError> {
        let idx = self
            .requests
            .iter()
            .position(|r| r.id == request_id)
            .ok_or(DomainError::NotFound("Request"))?;
        if self.requests[idx].solver_id != solver_id {
            return Err(DomainError::Forbidden("This request does not belong to you."));
        }
        if self
            .assigned_solver_id
            .is_some_and(|assigned| assigned != solver_id)
        {
            return Err(DomainError::Forbidden(
                "Project already assigned to another solver. Cannot edit.",
            ));
        }
        if self.status != ProjectStatus::Open {
            return Err(DomainError::Invalid(
                "Project is already assigned. Cannot edit proposal.",
            ));
        }
        let req = &mut self.requests[idx];
        if let Some(d) = edit.description.filter(|d| !d.trim().is_empty()) {
            req.description = Some(d);
        }
        if let Some(m) = edit.estimated_modules {
            req.estimated_modules = Some(m);
        }
        if let Some(d) = edit.deadline {
            req.deadline = Some(d);
        }
        Ok(())
    }

    /// Hands the project to one applicant. The chosen proposal is accepted and
    /// every other pending proposal is rejected.
    pub fn assign(
        &mut self,
        buyer_id: Uuid,
        solver_id: Uuid,
        details: AssignmentDetails,
    ) -> Result<(), DomainError> {
        self.ensure_owner(buyer_id)?;
        if self.status != ProjectStatus::Open || self.assigned_solver_id.is_some() {
            return Err(DomainError::Conflict("Project is already assigned."));
        }
        if self.proposal_by(solver_id).is_none() {
            return Err(DomainError::Invalid("Solver has not applied to this project."));
        }
        for req in self.requests.iter_mut() {
            if req.solver_id == solver_id {
                req.status = ProposalStatus::Accepted;
            } else if req.status == ProposalStatus::Pending {
                req.status = ProposalStatus::Rejected;
            }
        }
        self.assigned_solver_id = Some(solver_id);
        self.assignment = Some(details);
        self.status = ProjectStatus::Assigned;
        Ok(())
    }

    pub fn add_task(&mut self, solver_id: Uuid, draft: TaskDraft) -> Result<Uuid, DomainError> {
        self.ensure_assigned_solver(solver_id)?;
        self.ensure_in_progress()?;
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(DomainError::Invalid("Title is required"));
        }
        let id = Uuid::new_v4();
        self.tasks.push(Task {
            id,
            title: title.to_string(),
            description: draft.description,
            deadline: draft.deadline,
            status: TaskStatus::Pending,
            submission: None,
            feedback: None,
        });
        Ok(id)
    }

    pub fn update_task(
        &mut self,
        solver_id: Uuid,
        task_id: Uuid,
        edit: TaskEdit,
    ) -> Result<(), DomainError> {
        self.ensure_assigned_solver(solver_id)?;
        let task = self.task_mut(task_id)?;
        if task.status == TaskStatus::Accepted {
            return Err(DomainError::Invalid("Cannot edit an accepted task."));
        }
        if let Some(t) = edit.title.filter(|t| !t.trim().is_empty()) {
            task.title = t.trim().to_string();
        }
        if let Some(d) = edit.description.filter(|d| !d.trim().is_empty()) {
            task.description = Some(d);
        }
        if let Some(d) = edit.deadline {
            task.deadline = Some(d);
        }
        Ok(())
    }

    pub fn delete_task(&mut self, solver_id: Uuid, task_id: Uuid) -> Result<(), DomainError> {
        self.ensure_assigned_solver(solver_id)?;
        let task = self.task(task_id).ok_or(DomainError::NotFound("Task"))?;
        if task.status == TaskStatus::Accepted {
            return Err(DomainError::Invalid("Cannot delete an accepted task."));
        }
        self.tasks.retain(|t| t.id != task_id);
        Ok(())
    }

    pub fn submit_task(
        &mut self,
        solver_id: Uuid,
        task_id: Uuid,
        zip_url: String,
        note: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        self.ensure_assigned_solver(solver_id)?;
        self.ensure_in_progress()?;
        let task = self.task_mut(task_id)?;
        if task.status == TaskStatus::Accepted {
            return Err(DomainError::Invalid("Cannot resubmit an accepted task."));
        }
        if zip_url.trim().is_empty() {
            return Err(DomainError::Invalid("A submission file URL is required"));
        }
        task.status = TaskStatus::Submitted;
        task.submission = Some(Submission {
            zip_url,
            note,
            submitted_at: now,
        });
        Ok(())
    }

    /// Ad-hoc delivery: records a new task that is already submitted.
    pub fn submit_work(
        &mut self,
        solver_id: Uuid,
        title: String,
        zip_url: String,
        note: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Uuid, DomainError> {
        let id = self.add_task(
            solver_id,
            TaskDraft {
                title,
                description: note.clone(),
                deadline: None,
            },
        )?;
        if let Err(e) = self.submit_task(solver_id, id, zip_url, note, now) {
            self.tasks.retain(|t| t.id != id);
            return Err(e);
        }
        Ok(id)
    }

    pub fn review_task(
        &mut self,
        buyer_id: Uuid,
        task_id: Uuid,
        decision: ReviewDecision,
        feedback: Option<String>,
    ) -> Result<TaskStatus, DomainError> {
        self.ensure_owner(buyer_id)?;
        let task = self.task_mut(task_id)?;
        if task.status != TaskStatus::Submitted {
            return Err(DomainError::Invalid("Only submitted tasks can be reviewed."));
        }
        if let Some(f) = feedback.filter(|f| !f.trim().is_empty()) {
            task.feedback = Some(f);
        }
        task.status = match decision {
            ReviewDecision::Approve => TaskStatus::Accepted,
            ReviewDecision::Reject => TaskStatus::Rejected,
        };
        Ok(task.status)
    }

    pub fn complete(&mut self, buyer_id: Uuid) -> Result<(), DomainError> {
        self.ensure_owner(buyer_id)?;
        self.ensure_in_progress()?;
        if self.tasks.is_empty() || self.tasks.iter().any(|t| t.status != TaskStatus::Accepted) {
            return Err(DomainError::Invalid(
                "All tasks must be accepted before completing the project.",
            ));
        }
        self.status = ProjectStatus::Completed;
        Ok(())
    }

    pub fn progress(&self) -> Progress {
        Progress {
            accepted: self
                .tasks
                .iter()
                .filter(|t| t.status == TaskStatus::Accepted)
                .count(),
            total: self.tasks.len(),
            estimated_modules: self.assignment.as_ref().and_then(|a| a.estimated_modules),
        }
    }

    /// Every user id referenced by the aggregate.
    pub fn referenced_users(&self) -> Vec<Uuid> {
        let mut ids = vec![self.buyer_id];
        ids.extend(self.assigned_solver_id);
        ids.extend(self.requests.iter().map(|r| r.solver_id));
        ids.sort();
        ids.dedup();
        ids
    }
}
