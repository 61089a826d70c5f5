use crate::domain::board::Column;
use crate::domain::card::{renumber_positions, Card};
use crate::domain::id::CardId;
use std::str::FromStr;
use tracing::debug;

/// Where a dragged card was dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// Onto another card
    Card(CardId),
    /// Onto a column header
    Column(Column),
}

/// A single drag-and-drop move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveInstruction {
    pub dragged: CardId,
    pub target: DropTarget,
}

impl MoveInstruction {
    pub fn onto_card(dragged: impl Into<CardId>, target: impl Into<CardId>) -> Self {
        Self {
            dragged: dragged.into(),
            target: DropTarget::Card(target.into()),
        }
    }

    pub fn onto_column(dragged: impl Into<CardId>, column: Column) -> Self {
        Self {
            dragged: dragged.into(),
            target: DropTarget::Column(column),
        }
    }

    /// Builds an instruction from raw drop-event identifiers.
    ///
    /// Returns `None` when a column header target does not name a column.
    pub fn from_drop(dragged_id: &str, target_id: &str, target_is_column_header: bool) -> Option<Self> {
        if target_is_column_header {
            let column = Column::from_str(target_id).ok()?;
            Some(Self::onto_column(dragged_id, column))
        } else {
            Some(Self::onto_card(dragged_id, target_id))
        }
    }
}

/// Applies a drag-and-drop move and returns the reordered collection.
///
/// Column order is the collection order filtered to a (board, column).
///
/// * Column header of the card's own column: unchanged.
/// * Column header of another column: the card joins that column at the end.
/// * Card in the same column: the dragged card takes the target's slot and
///   the cards in between shift by one.
/// * Card in another column: the dragged card joins the target's column
///   immediately before the target.
///
/// Moving a card onto itself, onto an unknown card, or onto a card of another
/// board returns the input unchanged. No card is added or removed and board
/// ids never change. After an effective move, positions are renumbered.
pub fn apply_card_move(cards: &[Card], instruction: &MoveInstruction) -> Vec<Card> {
    let Some(from) = cards.iter().position(|c| c.id == instruction.dragged) else {
        debug!(card = %instruction.dragged, "Ignoring move of unknown card");
        return cards.to_vec();
    };

    let mut next = cards.to_vec();
    match &instruction.target {
        DropTarget::Column(column) => {
            if cards[from].column == *column {
                return next;
            }
            let mut card = next.remove(from);
            card.column = *column;
            next.push(card);
        }
        DropTarget::Card(target_id) => {
            if *target_id == instruction.dragged {
                return next;
            }
            let Some(to) = cards.iter().position(|c| &c.id == target_id) else {
                debug!(card = %instruction.dragged, target = %target_id, "Ignoring move onto unknown card");
                return next;
            };

            let dragged = &cards[from];
            let target = &cards[to];
            if dragged.board_id != target.board_id {
                debug!(card = %dragged.id, target = %target.id, "Ignoring move across boards");
                return next;
            }

            if dragged.column == target.column {
                let card = next.remove(from);
                next.insert(to, card);
            } else {
                let column = target.column;
                let mut card = next.remove(from);
                card.column = column;
                let before = if from < to { to - 1 } else { to };
                next.insert(before, card);
            }
        }
    }

    renumber_positions(&mut next);
    next
}
