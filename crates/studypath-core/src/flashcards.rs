//! Flashcard viewer state. Nothing is persisted; the deck lives only as long
//! as the page that shows it.

use crate::error::StudyError;
use crate::model::Flashcard;

/// A non-empty deck with a cursor that wraps around.
#[derive(Debug, Clone)]
pub struct FlashcardDeck {
    cards: Vec<Flashcard>,
    index: usize,
}

impl FlashcardDeck {
    pub fn new(cards: Vec<Flashcard>) -> Result<Self, StudyError> {
        if cards.is_empty() {
            return Err(StudyError::NotFound("flashcards for this level".into()));
        }
        Ok(Self { cards, index: 0 })
    }

    pub fn current(&self) -> &Flashcard {
        &self.cards[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Advance to the next card, wrapping to the first after the last.
    pub fn next_card(&mut self) -> &Flashcard {
        self.index = (self.index + 1) % self.cards.len();
        self.current()
    }
}
