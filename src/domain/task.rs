use crate::domain::id::{CourseId, SubTaskId, TaskId};
use crate::error::{Result, StudyFlowError};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Planner status of a study task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "To Do")]
    Todo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Done")]
    Done,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Todo => write!(f, "To Do"),
            Self::InProgress => write!(f, "In Progress"),
            Self::Done => write!(f, "Done"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
        }
    }
}

/// Checklist item inside a task
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubTask {
    pub id: SubTaskId,
    pub title: String,
    pub is_completed: bool,
}

impl SubTask {
    pub fn new(title: String) -> Self {
        Self {
            id: SubTaskId::generate(),
            title,
            is_completed: false,
        }
    }

    pub fn toggle(&mut self) {
        self.is_completed = !self.is_completed;
    }
}

/// A course that tasks can be filed under
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Course {
    pub fn new(name: String) -> Self {
        Self {
            id: CourseId::generate(),
            name,
            color: None,
            created_at: Utc::now(),
        }
    }
}

/// A study planner task
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Priority,
    /// Estimated effort in hours
    #[serde(default, rename = "estimatedTime", skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_id: Option<CourseId>,
    #[serde(default)]
    pub sub_tasks: Vec<SubTask>,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task in the To Do state
    pub fn new(title: String, priority: Priority) -> Self {
        Self {
            id: TaskId::generate(),
            title,
            description: None,
            due_date: None,
            priority,
            estimated_hours: None,
            course_id: None,
            sub_tasks: Vec::new(),
            status: TaskStatus::Todo,
            created_at: Utc::now(),
        }
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_course(mut self, course_id: CourseId) -> Self {
        self.course_id = Some(course_id);
        self
    }

    pub fn with_estimate(mut self, hours: f64) -> Self {
        self.estimated_hours = Some(hours).filter(|h| h.is_finite() && *h >= 0.0);
        self
    }

    pub fn set_description(&mut self, description: String) {
        self.description = Some(description);
    }

    pub fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }

    /// Adds a sub-task and returns its id
    pub fn add_sub_task(&mut self, title: String) -> SubTaskId {
        let sub_task = SubTask::new(title);
        let id = sub_task.id.clone();
        self.sub_tasks.push(sub_task);
        id
    }

    pub fn toggle_sub_task(&mut self, id: &SubTaskId) -> Result<()> {
        self.sub_tasks
            .iter_mut()
            .find(|st| &st.id == id)
            .map(SubTask::toggle)
            .ok_or_else(|| StudyFlowError::SubTaskNotFound(id.to_string()))
    }

    pub fn remove_sub_task(&mut self, id: &SubTaskId) -> Result<()> {
        let pos = self
            .sub_tasks
            .iter()
            .position(|st| &st.id == id)
            .ok_or_else(|| StudyFlowError::SubTaskNotFound(id.to_string()))?;
        self.sub_tasks.remove(pos);
        Ok(())
    }

    /// Share of completed sub-tasks; 0.0 when there are none
    pub fn sub_task_progress(&self) -> f64 {
        if self.sub_tasks.is_empty() {
            return 0.0;
        }
        let completed = self.sub_tasks.iter().filter(|st| st.is_completed).count();
        completed as f64 / self.sub_tasks.len() as f64
    }

    /// Case-insensitive match on title or description
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self
                .description
                .as_ref()
                .map(|d| d.to_lowercase().contains(&query))
                .unwrap_or(false)
    }
}

/// Planner list filter
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub course_id: Option<CourseId>,
    pub search: String,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        let course_matches = match &self.course_id {
            Some(course_id) => task.course_id.as_ref() == Some(course_id),
            None => true,
        };
        course_matches && task.matches_search(&self.search)
    }

    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|task| self.matches(task)).collect()
    }
}

/// Tasks split by status, each in input order
#[derive(Debug, Default)]
pub struct StatusColumns<'a> {
    pub todo: Vec<&'a Task>,
    pub in_progress: Vec<&'a Task>,
    pub done: Vec<&'a Task>,
}

pub fn partition_by_status<'a, I>(tasks: I) -> StatusColumns<'a>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut columns = StatusColumns::default();
    for task in tasks {
        match task.status {
            TaskStatus::Todo => columns.todo.push(task),
            TaskStatus::InProgress => columns.in_progress.push(task),
            TaskStatus::Done => columns.done.push(task),
        }
    }
    columns
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub todo: usize,
    pub in_progress: usize,
    pub done: usize,
}

impl StatusCounts {
    pub fn tally(tasks: &[Task]) -> Self {
        let columns = partition_by_status(tasks);
        Self {
            todo: columns.todo.len(),
            in_progress: columns.in_progress.len(),
            done: columns.done.len(),
        }
    }
}

/// Open tasks due between `today` and `today + window_days` (inclusive),
/// soonest first, at most `limit` of them
pub fn upcoming_tasks(tasks: &[Task], today: NaiveDate, window_days: u32, limit: usize) -> Vec<&Task> {
    let horizon = today
        .checked_add_signed(Duration::days(i64::from(window_days)))
        .unwrap_or(NaiveDate::MAX);
    let mut upcoming: Vec<&Task> = tasks
        .iter()
        .filter(|task| task.status != TaskStatus::Done)
        .filter(|task| {
            task.due_date
                .map(|due| {
                    let day = due.date_naive();
                    day >= today && day <= horizon
                })
                .unwrap_or(false)
        })
        .collect();
    upcoming.sort_by_key(|task| task.due_date);
    upcoming.truncate(limit);
    upcoming
}

/// Detaches every task from a deleted course
pub fn clear_course(tasks: &mut [Task], course_id: &CourseId) -> usize {
    let mut cleared = 0;
    for task in tasks
        .iter_mut()
        .filter(|task| task.course_id.as_ref() == Some(course_id))
    {
        task.course_id = None;
        cleared += 1;
    }
    cleared
}
