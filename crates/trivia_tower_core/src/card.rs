//! Cards dealt for a level and the deck that holds them.

use derive_getters::Getters;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

use crate::level::Level;
use crate::presentation::CardView;

/// Position of a card in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
#[display("card {}", _0)]
pub struct CardId(pub usize);

impl CardId {
    /// Index into the deck.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Game-relevant state of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, strum::Display)]
pub enum CardState {
    /// Face down and available.
    #[default]
    Unmatched,
    /// Flipped and waiting for resolution.
    Selected,
    /// Part of a found pair.
    Matched,
}

/// One label on the board.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Card {
    id: CardId,
    label: String,
    state: CardState,
}

impl Card {
    /// True once the card's pair has been found.
    pub fn is_matched(&self) -> bool {
        self.state == CardState::Matched
    }
}

/// The cards of the active level, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Deals every label of `level` in a uniformly random order.
    #[instrument(skip(level, rng), fields(pairs = level.pair_count()))]
    pub fn shuffled<R: Rng + ?Sized>(level: &Level, rng: &mut R) -> Self {
        let mut labels: Vec<String> = level.labels().map(str::to_string).collect();
        labels.shuffle(rng);
        debug!(cards = labels.len(), "Dealt shuffled deck");
        Self::from_labels(labels)
    }

    /// Deals the labels in the given order.
    pub fn from_labels(labels: Vec<String>) -> Self {
        let cards = labels
            .into_iter()
            .enumerate()
            .map(|(index, label)| Card {
                id: CardId(index),
                label,
                state: CardState::Unmatched,
            })
            .collect();
        Self { cards }
    }

    /// All cards in display order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Looks up a card.
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.index())
    }

    /// Finds the first card carrying `label`.
    pub fn find(&self, label: &str) -> Option<&Card> {
        self.cards.iter().find(|card| card.label == label)
    }

    /// Number of cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// True when no level has been dealt.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards not yet matched, in display order.
    pub fn unmatched(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|card| !card.is_matched())
    }

    /// What the presentation needs to draw the board.
    pub fn views(&self) -> Vec<CardView> {
        self.cards
            .iter()
            .map(|card| CardView::new(card.id, card.label.clone()))
            .collect()
    }

    pub(crate) fn set_state(&mut self, id: CardId, state: CardState) {
        if let Some(card) = self.cards.get_mut(id.index()) {
            card.state = state;
        }
    }
}
