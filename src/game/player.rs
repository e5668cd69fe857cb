//! Players and roster entries.

use im::Vector;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::board::CityCard;
use crate::core::{CityId, Colour, PawnId, Role};

/// One seat at the table as requested before setup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSpec {
    /// Display name. Unnamed players become `Player N`.
    pub name: Option<String>,
    pub role: Role,
    pub pawn: PawnId,
}

impl PlayerSpec {
    #[must_use]
    pub fn new(role: Role, pawn: PawnId) -> Self {
        Self { name: None, role, pawn }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// `count` unnamed seats with distinct roles (in role order) and pawns.
    ///
    /// ```
    /// use pandemic_ai::game::PlayerSpec;
    ///
    /// let roster = PlayerSpec::roster(3);
    /// assert_eq!(roster.len(), 3);
    /// assert_ne!(roster[0].role, roster[1].role);
    /// ```
    #[must_use]
    pub fn roster(count: usize) -> Vec<PlayerSpec> {
        Role::iter()
            .take(count)
            .enumerate()
            .map(|(i, role)| PlayerSpec::new(role, PawnId(i as u8)))
            .collect()
    }
}

/// A player in a running game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub pawn: PawnId,
    pub role: Role,
    pub location: CityId,
    pub hand: Vector<CityCard>,
}

impl Player {
    /// Cards of `colour` in hand.
    #[must_use]
    pub fn cards_of(&self, colour: Colour) -> usize {
        self.hand.iter().filter(|card| card.colour == colour).count()
    }

    /// Index of the hand card for `city`, if held.
    #[must_use]
    pub fn card_for(&self, city: CityId) -> Option<usize> {
        self.hand.iter().position(|card| card.city == city)
    }

    #[must_use]
    pub fn hand_size(&self) -> usize {
        self.hand.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player {
            name: "Ana".into(),
            pawn: PawnId(0),
            role: Role::Medic,
            location: CityId(0),
            hand: Vector::from(vec![
                CityCard { city: CityId(3), colour: Colour::Blue },
                CityCard { city: CityId(7), colour: Colour::Red },
                CityCard { city: CityId(4), colour: Colour::Blue },
            ]),
        }
    }

    #[test]
    fn test_hand_queries() {
        let player = player();
        assert_eq!(player.cards_of(Colour::Blue), 2);
        assert_eq!(player.cards_of(Colour::Black), 0);
        assert_eq!(player.card_for(CityId(7)), Some(1));
        assert_eq!(player.card_for(CityId(1)), None);
        assert_eq!(player.hand_size(), 3);
    }

    #[test]
    fn test_roster_is_unique() {
        let roster = PlayerSpec::roster(4);
        for (i, a) in roster.iter().enumerate() {
            for b in &roster[i + 1..] {
                assert_ne!(a.role, b.role);
                assert_ne!(a.pawn, b.pawn);
            }
        }
        assert_eq!(roster[0].name, None);
        assert_eq!(
            PlayerSpec::new(Role::Scientist, PawnId(2)).with_name("Kim").name.as_deref(),
            Some("Kim")
        );
    }
}
