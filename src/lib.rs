//! # StudyFlow Core
//!
//! Derived-state logic for the StudyFlow study planner: habit streaks,
//! kanban card reordering and planner task views.
//!
//! The pure computations live in [`domain`] and take everything they need
//! as arguments, including the "as of" date. The [`service`] types wire
//! them to a key-value [`Storage`] backend that holds whole collections.

pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod storage;

// Re-export commonly used types
pub use config::{load_config, AppConfig};
pub use domain::{
    apply_card_move, compute_streak,
    board::{Board, Column},
    card::Card,
    habit::{Habit, HabitLogEntry},
    reorder::{DropTarget, MoveInstruction},
    streak::Streak,
    task::{Task, TaskStatus},
};
pub use error::{Result, StudyFlowError};
pub use service::{HabitTracker, KanbanBoardService, Planner};
pub use storage::{CollectionKey, Collections, FileStorage, MemoryStorage, Storage};
