//! Symmetric label-to-partner lookup and the hint search built on it.

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::card::{Card, CardId};
use crate::level::Level;

/// Maps every label of a level to its partner, in both directions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartnerLookup {
    partners: HashMap<String, String>,
}

impl PartnerLookup {
    /// Builds the lookup for a level.
    #[instrument(skip(level), fields(pairs = level.pair_count()))]
    pub fn for_level(level: &Level) -> Self {
        let mut partners = HashMap::with_capacity(level.pair_count() * 2);
        for pair in level.pairs() {
            partners.insert(pair.term_a().clone(), pair.term_b().clone());
            partners.insert(pair.term_b().clone(), pair.term_a().clone());
        }
        Self { partners }
    }

    /// Partner of `label`, if it belongs to the level.
    pub fn partner_of(&self, label: &str) -> Option<&str> {
        self.partners.get(label).map(String::as_str)
    }

    /// True when the two labels form a declared pair.
    ///
    /// A label never matches itself.
    pub fn is_match(&self, first: &str, second: &str) -> bool {
        first != second && self.partner_of(first) == Some(second)
    }

    /// First matchable pair among `cards`, scanning in display order.
    ///
    /// Returns the ids of the scanned card and its partner.
    #[instrument(skip(self, cards))]
    pub fn find_hint<'a>(&self, cards: impl IntoIterator<Item = &'a Card>) -> Option<(CardId, CardId)> {
        let cards: Vec<&Card> = cards.into_iter().collect();
        for (i, card) in cards.iter().enumerate() {
            let Some(partner) = self.partner_of(card.label()) else {
                continue;
            };
            let found = cards
                .iter()
                .enumerate()
                .find(|(j, other)| *j != i && other.label() == partner);
            if let Some((_, other)) = found {
                debug!(first = %card.id(), second = %other.id(), "Hint pair found");
                return Some((*card.id(), *other.id()));
            }
        }
        debug!("No matchable pair among remaining cards");
        None
    }
}
