pub mod board;
pub mod card;
pub mod habit;
pub mod id;
pub mod reorder;
pub mod sorting;
pub mod streak;
pub mod task;

pub use board::{partition_columns, Board, Column, ColumnPartition};
pub use card::{renumber_positions, restore_order, Card};
pub use habit::{
    completion_series, log_for, parse_calendar_date, upsert_log, DailyValue, Habit,
    HabitFrequency, HabitLogEntry, LogValue, TrackingType,
};
pub use id::{BoardId, CardId, CourseId, HabitId, LogEntryId, SubTaskId, TaskId};
pub use reorder::{apply_card_move, DropTarget, MoveInstruction};
pub use sorting::{sort_tasks, SortField, SortOrder};
pub use streak::{compute_streak, Streak};
pub use task::{
    clear_course, partition_by_status, upcoming_tasks, Course, Priority, StatusColumns,
    StatusCounts, SubTask, Task, TaskFilter, TaskStatus,
};
