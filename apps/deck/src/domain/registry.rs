//! Card registry: the fixed card universe and its two ordered collections.
//!
//! Every card is in exactly one of `available` or `selected`. Migrations
//! move an id from one list to the end of the other in a single `&mut self`
//! call, so no observer ever sees a card in both or neither.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::domain::cards::{Card, CardId};
use crate::errors::domain::DeckError;

/// Which collection a card currently belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Available,
    Selected,
}

#[derive(Debug, Clone)]
pub struct CardRegistry {
    cards: HashMap<CardId, Card>,
    available: Vec<CardId>,
    selected: Vec<CardId>,
}

impl CardRegistry {
    /// Build the registry from seed cards; all start out available, in seed order.
    pub fn new(seed: Vec<Card>) -> Result<Self, DeckError> {
        let mut cards = HashMap::with_capacity(seed.len());
        let mut available = Vec::with_capacity(seed.len());
        for card in seed {
            let id = card.id.clone();
            if cards.insert(id.clone(), card).is_some() {
                return Err(DeckError::DuplicateCard(id));
            }
            available.push(id);
        }
        Ok(Self {
            cards,
            available,
            selected: Vec::new(),
        })
    }

    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.cards.get(id)
    }

    pub fn available(&self) -> &[CardId] {
        &self.available
    }

    /// Selected ids in insertion order; the last one is the top of the stack.
    pub fn selected(&self) -> &[CardId] {
        &self.selected
    }

    pub fn universe_len(&self) -> usize {
        self.cards.len()
    }

    pub fn collection_of(&self, id: &CardId) -> Option<Collection> {
        if self.available.contains(id) {
            Some(Collection::Available)
        } else if self.selected.contains(id) {
            Some(Collection::Selected)
        } else {
            None
        }
    }

    /// Move a card from `available` to the top of `selected`.
    pub fn move_to_selected(&mut self, id: &CardId) -> Result<(), DeckError> {
        let pos = self.position_in(Collection::Available, id)?;
        let card = self.available.remove(pos);
        self.selected.push(card);
        debug!(card = %id, selected = self.selected.len(), "card filed into deck");
        Ok(())
    }

    /// Move a card from `selected` to the end of `available`.
    pub fn move_to_available(&mut self, id: &CardId) -> Result<(), DeckError> {
        let pos = self.position_in(Collection::Selected, id)?;
        let card = self.selected.remove(pos);
        self.available.push(card);
        debug!(card = %id, available = self.available.len(), "card returned to pager");
        Ok(())
    }

    /// Verify that the two collections partition the universe.
    pub fn check_partition(&self) -> Result<(), DeckError> {
        let mut seen = HashSet::with_capacity(self.cards.len());
        for id in self.available.iter().chain(self.selected.iter()) {
            if !self.cards.contains_key(id) {
                return Err(DeckError::partition(format!("{id} is not in the universe")));
            }
            if !seen.insert(id) {
                return Err(DeckError::partition(format!("{id} appears twice")));
            }
        }
        if seen.len() != self.cards.len() {
            return Err(DeckError::partition(format!(
                "{} of {} cards placed",
                seen.len(),
                self.cards.len()
            )));
        }
        Ok(())
    }

    fn position_in(&self, collection: Collection, id: &CardId) -> Result<usize, DeckError> {
        let list = match collection {
            Collection::Available => &self.available,
            Collection::Selected => &self.selected,
        };
        list.iter().position(|c| c == id).ok_or_else(|| {
            if !self.cards.contains_key(id) {
                DeckError::UnknownCard(id.clone())
            } else {
                match collection {
                    Collection::Available => DeckError::NotAvailable(id.clone()),
                    Collection::Selected => DeckError::NotSelected(id.clone()),
                }
            }
        })
    }
}
