use thiserror::Error;

pub type Result<T> = std::result::Result<T, StudyFlowError>;

#[derive(Debug, Error)]
pub enum StudyFlowError {
    #[error("Habit not found: {0}")]
    HabitNotFound(String),

    #[error("Board not found: {0}")]
    BoardNotFound(String),

    #[error("Card not found: {0}")]
    CardNotFound(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Course not found: {0}")]
    CourseNotFound(String),

    #[error("Sub-task not found: {0}")]
    SubTaskNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid collection key: {0}")]
    InvalidCollectionKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("{0}")]
    Other(String),
}
