use crate::domain::card::Card;
use crate::domain::id::BoardId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Workflow stage of a kanban card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    #[serde(rename = "To Do")]
    Todo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Done")]
    Done,
}

impl Column {
    /// Columns in board display order
    pub const ALL: [Column; 3] = [Column::Todo, Column::InProgress, Column::Done];

    /// Identifier used for the column's drop target
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Column {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(|c: char| c == '_' || c == '-', " ").as_str() {
            "to do" | "todo" => Ok(Column::Todo),
            "in progress" | "inprogress" => Ok(Column::InProgress),
            "done" => Ok(Column::Done),
            _ => Err(format!(
                "Invalid column '{}'. Valid columns: To Do, In Progress, Done",
                s
            )),
        }
    }
}

/// A kanban board; cards reference it through their `board_id`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: BoardId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Board {
    pub fn new(name: String) -> Self {
        Self {
            id: BoardId::generate(),
            name,
            created_at: Utc::now(),
        }
    }
}

/// Cards of one board split by column, each in collection order
#[derive(Debug, Default)]
pub struct ColumnPartition<'a> {
    pub todo: Vec<&'a Card>,
    pub in_progress: Vec<&'a Card>,
    pub done: Vec<&'a Card>,
}

impl<'a> ColumnPartition<'a> {
    /// Gets the cards of a column
    pub fn column(&self, column: Column) -> &[&'a Card] {
        match column {
            Column::Todo => &self.todo,
            Column::InProgress => &self.in_progress,
            Column::Done => &self.done,
        }
    }

    fn column_mut(&mut self, column: Column) -> &mut Vec<&'a Card> {
        match column {
            Column::Todo => &mut self.todo,
            Column::InProgress => &mut self.in_progress,
            Column::Done => &mut self.done,
        }
    }

    pub fn len(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Splits the cards of `board_id` into their columns
pub fn partition_columns<'a>(cards: &'a [Card], board_id: &BoardId) -> ColumnPartition<'a> {
    let mut partition = ColumnPartition::default();
    for card in cards.iter().filter(|card| &card.board_id == board_id) {
        partition.column_mut(card.column).push(card);
    }
    partition
}
