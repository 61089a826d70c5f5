use crate::{
    domain::{
        apply_card_move, renumber_positions, restore_order, Board, BoardId, Card, CardId, Column,
        MoveInstruction,
    },
    error::{Result, StudyFlowError},
    service::require_name,
    storage::{CollectionKey, Collections},
};
use tracing::{info, warn};

/// Kanban boards and their cards
pub struct KanbanBoardService {
    collections: Collections,
}

impl KanbanBoardService {
    pub fn new(collections: Collections) -> Self {
        Self { collections }
    }

    pub async fn boards(&self) -> Result<Vec<Board>> {
        self.collections.read(CollectionKey::Boards).await
    }

    /// All cards, in column order
    pub async fn cards(&self) -> Result<Vec<Card>> {
        let mut cards: Vec<Card> = self.collections.read(CollectionKey::Cards).await?;
        restore_order(&mut cards);
        Ok(cards)
    }

    /// Cards of one board, in column order
    pub async fn board_cards(&self, board_id: &BoardId) -> Result<Vec<Card>> {
        let mut cards = self.cards().await?;
        cards.retain(|card| &card.board_id == board_id);
        Ok(cards)
    }

    async fn save_cards(&self, cards: &mut [Card]) -> Result<()> {
        renumber_positions(cards);
        self.collections.write(CollectionKey::Cards, cards).await
    }

    pub async fn create_board(&self, name: &str) -> Result<Board> {
        let board = Board::new(require_name(name, "Board")?);
        let mut boards = self.boards().await?;
        boards.push(board.clone());
        self.collections.write(CollectionKey::Boards, &boards).await?;
        Ok(board)
    }

    /// Deletes a board and its cards, returning how many cards went with it
    pub async fn delete_board(&self, board_id: &BoardId) -> Result<usize> {
        let mut boards = self.boards().await?;
        let before = boards.len();
        boards.retain(|b| &b.id != board_id);
        if boards.len() == before {
            return Err(StudyFlowError::BoardNotFound(board_id.to_string()));
        }

        let mut cards = self.cards().await?;
        let card_count = cards.len();
        cards.retain(|card| &card.board_id != board_id);
        let removed = card_count - cards.len();

        self.collections.write(CollectionKey::Boards, &boards).await?;
        self.save_cards(&mut cards).await?;
        info!(board = %board_id, removed_cards = removed, "Deleted board");
        Ok(removed)
    }

    /// Adds a card at the end of `column`
    pub async fn add_card(&self, board_id: &BoardId, title: &str, column: Column) -> Result<Card> {
        let boards = self.boards().await?;
        if !boards.iter().any(|b| &b.id == board_id) {
            return Err(StudyFlowError::BoardNotFound(board_id.to_string()));
        }

        let card = Card::new(require_name(title, "Card")?, board_id.clone(), column);
        let mut cards = self.cards().await?;
        cards.push(card);
        self.save_cards(&mut cards).await?;

        cards
            .last()
            .cloned()
            .ok_or_else(|| StudyFlowError::Other("Card list unexpectedly empty".to_string()))
    }

    /// Updates a card's editable fields; its board, column and position are kept
    pub async fn update_card(&self, updated: Card) -> Result<()> {
        let mut cards = self.cards().await?;
        let card = cards
            .iter_mut()
            .find(|c| c.id == updated.id)
            .ok_or_else(|| StudyFlowError::CardNotFound(updated.id.to_string()))?;
        card.title = updated.title;
        card.description = updated.description;
        card.due_date = updated.due_date;
        self.save_cards(&mut cards).await
    }

    pub async fn delete_card(&self, card_id: &CardId) -> Result<()> {
        let mut cards = self.cards().await?;
        let before = cards.len();
        cards.retain(|c| &c.id != card_id);
        if cards.len() == before {
            return Err(StudyFlowError::CardNotFound(card_id.to_string()));
        }
        self.save_cards(&mut cards).await
    }

    /// Applies a drag-and-drop move and persists the result.
    ///
    /// Stale instructions leave the stored cards untouched.
    pub async fn move_card(&self, instruction: &MoveInstruction) -> Result<Vec<Card>> {
        let cards = self.cards().await?;
        let mut moved = apply_card_move(&cards, instruction);
        if moved == cards {
            if !cards.iter().any(|c| c.id == instruction.dragged) {
                warn!(card = %instruction.dragged, "Dropped card no longer exists");
            }
            return Ok(cards);
        }
        self.save_cards(&mut moved).await?;
        Ok(moved)
    }
}
