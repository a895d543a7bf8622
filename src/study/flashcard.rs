//! Flashcard session: a random draw walked with a clamped cursor

use rand::RngCore;

use crate::catalog::{CatalogError, CharacterRecord, GradeFilter};

use super::CharacterSource;

#[derive(Debug, Clone)]
pub struct FlashcardSession {
    filter: GradeFilter,
    cards: Vec<CharacterRecord>,
    index: usize,
    revealed: bool,
}

impl FlashcardSession {
    /// Draw `count` random cards for the filter. An empty draw is a valid session.
    pub fn start<S: CharacterSource + ?Sized>(
        source: &S,
        filter: GradeFilter,
        count: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Self, CatalogError> {
        let cards = source.random_sample(filter, count, rng)?;
        log::debug!("Started flashcards with {} cards ({})", cards.len(), filter);
        Ok(Self {
            filter,
            cards,
            index: 0,
            revealed: false,
        })
    }

    pub fn filter(&self) -> GradeFilter {
        self.filter
    }

    pub fn cards(&self) -> &[CharacterRecord] {
        &self.cards
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&CharacterRecord> {
        self.cards.get(self.index)
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn flip(&mut self) {
        if !self.cards.is_empty() {
            self.revealed = !self.revealed;
        }
    }

    /// Move forward; stays on the last card
    pub fn next(&mut self) {
        if self.index + 1 < self.cards.len() {
            self.index += 1;
        }
        self.revealed = false;
    }

    /// Move back; stays on the first card
    pub fn prev(&mut self) {
        self.index = self.index.saturating_sub(1);
        self.revealed = false;
    }

    pub fn has_next(&self) -> bool {
        self.index + 1 < self.cards.len()
    }

    pub fn has_prev(&self) -> bool {
        self.index > 0
    }
}
