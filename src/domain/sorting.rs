use crate::domain::task::{Priority, Task, TaskStatus};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::str::FromStr;

/// Fields available for sorting planner tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Title,
    Status,
    Created,
    Due,
    Priority,
    Estimate,
    Progress,
}

/// Sort order direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "title" => Ok(SortField::Title),
            "status" => Ok(SortField::Status),
            "created" => Ok(SortField::Created),
            "due" => Ok(SortField::Due),
            "priority" => Ok(SortField::Priority),
            "estimate" => Ok(SortField::Estimate),
            "progress" => Ok(SortField::Progress),
            _ => Err(format!(
                "Invalid sort field '{}'. Valid fields: title, status, created, due, priority, estimate, progress",
                s
            )),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Ascending),
            "desc" => Ok(SortOrder::Descending),
            _ => Err(format!(
                "Invalid sort order '{}'. Valid orders: asc, desc",
                s
            )),
        }
    }
}

/// Sorts planner tasks in place by the given field and direction.
///
/// The sort is stable. Tasks without a due date or estimate sort last in
/// either direction.
///
/// # Examples
/// ```
/// use studyflow_core::domain::sorting::{sort_tasks, SortField, SortOrder};
/// use studyflow_core::domain::task::{Priority, Task};
///
/// let mut tasks = vec![
///     Task::new("Chemistry".to_string(), Priority::Low),
///     Task::new("algebra".to_string(), Priority::High),
///     Task::new("Biology".to_string(), Priority::Medium),
/// ];
///
/// sort_tasks(&mut tasks, SortField::Title, SortOrder::Ascending);
/// assert_eq!(tasks[0].title, "algebra");
///
/// sort_tasks(&mut tasks, SortField::Priority, SortOrder::Descending);
/// assert_eq!(tasks[0].title, "algebra");
/// ```
pub fn sort_tasks(tasks: &mut [Task], field: SortField, order: SortOrder) {
    tasks.sort_by(|a, b| {
        let cmp = match field {
            SortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortField::Status => status_rank(a.status).cmp(&status_rank(b.status)),
            SortField::Created => a.created_at.cmp(&b.created_at),
            SortField::Due => return compare_option_dates(a.due_date, b.due_date, order),
            SortField::Priority => priority_rank(a.priority).cmp(&priority_rank(b.priority)),
            SortField::Estimate => {
                return compare_option_hours(a.estimated_hours, b.estimated_hours, order)
            }
            SortField::Progress => a
                .sub_task_progress()
                .partial_cmp(&b.sub_task_progress())
                .unwrap_or(Ordering::Equal),
        };

        apply_order(cmp, order)
    });
}

fn apply_order(cmp: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Ascending => cmp,
        SortOrder::Descending => cmp.reverse(),
    }
}

/// Workflow order: To Do → In Progress → Done
fn status_rank(status: TaskStatus) -> u8 {
    match status {
        TaskStatus::Todo => 0,
        TaskStatus::InProgress => 1,
        TaskStatus::Done => 2,
    }
}

fn priority_rank(priority: Priority) -> u8 {
    match priority {
        Priority::Low => 0,
        Priority::Medium => 1,
        Priority::High => 2,
    }
}

fn compare_option_dates(
    a: Option<DateTime<Utc>>,
    b: Option<DateTime<Utc>>,
    order: SortOrder,
) -> Ordering {
    match (a, b) {
        (Some(a_date), Some(b_date)) => apply_order(a_date.cmp(&b_date), order),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare_option_hours(a: Option<f64>, b: Option<f64>, order: SortOrder) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => apply_order(a.partial_cmp(&b).unwrap_or(Ordering::Equal), order),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
