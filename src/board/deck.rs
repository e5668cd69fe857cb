//! Player and infection decks.
//!
//! A deck is a fixed sequence of cards plus a draw pointer. Drawing never
//! removes a card; it only advances the pointer, so the cards before the
//! pointer are the drawn pile and the cards after it are the remainder.
//! Cards are never destroyed, only reordered by a reshuffle.
//!
//! ## Shuffling
//!
//! `shuffle_range` swaps every position `i` in the range with a uniformly
//! chosen position from the same range. Full shuffles and the epidemic
//! reshuffle of the drawn pile `[0, pointer)` use the same procedure.

use std::ops::Range;

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{CityId, Colour, GameRng};

/// A city card in the player deck or a hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CityCard {
    pub city: CityId,
    pub colour: Colour,
}

/// A card in the player deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerCard {
    City(CityCard),
    Epidemic,
}

impl PlayerCard {
    /// The city card, or `None` for an epidemic.
    #[must_use]
    pub fn as_city(self) -> Option<CityCard> {
        match self {
            PlayerCard::City(card) => Some(card),
            PlayerCard::Epidemic => None,
        }
    }

    #[must_use]
    pub fn is_epidemic(self) -> bool {
        matches!(self, PlayerCard::Epidemic)
    }
}

/// A card in the infection deck. There is exactly one per city.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InfectionCard {
    pub city: CityId,
}

/// An ordered deck with a monotonic draw pointer.
///
/// ```
/// use pandemic_ai::board::Deck;
///
/// let mut deck = Deck::new(vec!['a', 'b', 'c']);
/// assert_eq!(deck.draw(), Some('a'));
/// assert_eq!(deck.remaining(), 2);
/// deck.rewind();
/// assert_eq!(deck.draw(), Some('a'));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deck<T: Clone> {
    cards: Vector<T>,
    pointer: usize,
}

impl<T: Clone> Deck<T> {
    /// Create a deck in the given order with nothing drawn.
    #[must_use]
    pub fn new(cards: Vec<T>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
            pointer: 0,
        }
    }

    /// Draw the card at the pointer and advance.
    ///
    /// Returns `None` once every card has been drawn; callers treat that as
    /// deck exhaustion.
    pub fn draw(&mut self) -> Option<T> {
        let card = self.cards.get(self.pointer)?.clone();
        self.pointer += 1;
        Some(card)
    }

    /// Shuffle the cards from `start` to the end of the deck.
    pub fn shuffle_from(&mut self, start: usize, rng: &mut GameRng) {
        self.shuffle_range(start..self.cards.len(), rng);
    }

    /// Shuffle the cards in `range` in place.
    ///
    /// The range is clamped to the deck; an empty range does nothing.
    pub fn shuffle_range(&mut self, range: Range<usize>, rng: &mut GameRng) {
        let range = range.start..range.end.min(self.cards.len());
        if range.is_empty() {
            return;
        }
        for i in range.clone() {
            let j = rng.gen_range_usize(range.clone());
            self.cards.swap(i, j);
        }
    }

    /// Reset the draw pointer to the top of the deck.
    pub fn rewind(&mut self) {
        self.pointer = 0;
    }

    /// Total cards, drawn or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards left to draw.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.pointer
    }

    /// Position of the next draw.
    #[must_use]
    pub fn pointer(&self) -> usize {
        self.pointer
    }

    /// Check if every card has been drawn.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.pointer >= self.cards.len()
    }

    /// Cards already drawn, oldest first.
    pub fn drawn(&self) -> impl Iterator<Item = &T> {
        self.cards.iter().take(self.pointer)
    }

    /// Cards still to be drawn, next first.
    pub fn undrawn(&self) -> impl Iterator<Item = &T> {
        self.cards.iter().skip(self.pointer)
    }

    /// Every card in deck order.
    pub fn cards(&self) -> impl Iterator<Item = &T> {
        self.cards.iter()
    }
}
