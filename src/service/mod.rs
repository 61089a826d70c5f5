//! Store-backed operations used by the UI layer.
//!
//! Each operation reads the collections it needs, applies the pure domain
//! logic and replaces the collections it changed.

pub mod habits;
pub mod kanban;
pub mod planner;

pub use habits::HabitTracker;
pub use kanban::KanbanBoardService;
pub use planner::Planner;

use crate::error::{Result, StudyFlowError};

pub(crate) fn require_name(name: &str, what: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(StudyFlowError::InvalidInput(format!(
            "{} name cannot be empty",
            what
        )));
    }
    Ok(trimmed.to_string())
}
