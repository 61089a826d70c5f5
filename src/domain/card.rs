use crate::domain::board::Column;
use crate::domain::id::{BoardId, CardId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A kanban card.
///
/// The card's place in its column is its position in the card collection
/// filtered to the same board and column. `position` mirrors that order as a
/// dense 0-based rank and is rewritten by [`renumber_positions`]; it is absent
/// on cards stored by writers that never tracked it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub column: Column,
    pub board_id: BoardId,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}

impl Card {
    pub fn new(title: String, board_id: BoardId, column: Column) -> Self {
        Self {
            id: CardId::generate(),
            title,
            description: None,
            due_date: None,
            column,
            board_id,
            created_at: Utc::now(),
            position: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<CardId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn set_title(&mut self, title: String) {
        self.title = title;
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description.filter(|d| !d.trim().is_empty());
    }

    pub fn set_due_date(&mut self, due_date: Option<DateTime<Utc>>) {
        self.due_date = due_date;
    }
}

/// Rewrites every card's `position` as its rank within its (board, column),
/// following collection order.
pub fn renumber_positions(cards: &mut [Card]) {
    let mut next: Vec<(BoardId, Column, u32)> = Vec::new();
    for card in cards.iter_mut() {
        match next
            .iter_mut()
            .find(|(board, column, _)| board == &card.board_id && *column == card.column)
        {
            Some((_, _, rank)) => {
                card.position = Some(*rank);
                *rank += 1;
            }
            None => {
                card.position = Some(0);
                next.push((card.board_id.clone(), card.column, 1));
            }
        }
    }
}

/// Restores collection order from stored positions.
///
/// Cards are stably sorted by `position` within each (board, column); a card
/// without one sorts by its rank in the collection. The slots each group
/// occupies in the collection are kept, so other groups are not disturbed.
/// Positions are renumbered afterwards.
pub fn restore_order(cards: &mut Vec<Card>) {
    let mut groups: Vec<((BoardId, Column), Vec<usize>)> = Vec::new();
    for (index, card) in cards.iter().enumerate() {
        let key = (card.board_id.clone(), card.column);
        match groups.iter_mut().find(|(k, _)| k == &key) {
            Some((_, slots)) => slots.push(index),
            None => groups.push((key, vec![index])),
        }
    }

    let mut slotted: Vec<Option<Card>> = cards.drain(..).map(Some).collect();
    let mut ordered: Vec<Option<Card>> = vec![None; slotted.len()];
    for (_, slots) in groups {
        let mut members: Vec<(u32, Card)> = slots
            .iter()
            .filter_map(|&slot| slotted[slot].take())
            .zip(0u32..)
            .map(|(card, rank)| (card.position.unwrap_or(rank), card))
            .collect();
        members.sort_by_key(|(key, _)| *key);
        for (slot, (_, card)) in slots.into_iter().zip(members) {
            ordered[slot] = Some(card);
        }
    }

    cards.extend(ordered.into_iter().flatten());
    renumber_positions(cards);
}
