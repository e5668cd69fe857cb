//! Disease colours, cure progress, player roles and per-colour storage.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter, EnumString};

/// One of the four disease colours. Every city, city card and cube has one.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
    Serialize, Deserialize, Display, EnumIter, EnumString, EnumCountMacro,
)]
#[strum(ascii_case_insensitive)]
pub enum Colour {
    Red,
    Blue,
    Yellow,
    Black,
}

impl Colour {
    /// Position of this colour in `Colour::iter()` order.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Progress against one disease.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum CureStatus {
    #[default]
    Uncured,
    Cured,
    Eradicated,
}

impl CureStatus {
    /// Cured or eradicated.
    #[must_use]
    pub const fn is_cured(self) -> bool {
        matches!(self, CureStatus::Cured | CureStatus::Eradicated)
    }
}

/// Player role. Roles are identity only; none grants a special ability.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Role {
    #[strum(to_string = "Contingency Planner", serialize = "ContingencyPlanner")]
    ContingencyPlanner,
    #[strum(to_string = "Dispatcher")]
    Dispatcher,
    #[strum(to_string = "Medic")]
    Medic,
    #[strum(to_string = "Operations Expert", serialize = "OperationsExpert")]
    OperationsExpert,
    #[strum(to_string = "Quarantine Specialist", serialize = "QuarantineSpecialist")]
    QuarantineSpecialist,
    #[strum(to_string = "Researcher")]
    Researcher,
    #[strum(to_string = "Scientist")]
    Scientist,
}

/// Fixed-size per-colour storage, indexable by `Colour`.
///
/// ```
/// use pandemic_ai::core::{Colour, ColourMap};
///
/// let mut cubes: ColourMap<u32> = ColourMap::with_value(24);
/// cubes[Colour::Black] -= 3;
/// assert_eq!(cubes[Colour::Black], 21);
/// assert_eq!(cubes[Colour::Red], 24);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColourMap<T> {
    data: [T; Colour::COUNT],
}

impl<T> ColourMap<T> {
    /// Build each entry from its colour.
    pub fn new(mut factory: impl FnMut(Colour) -> T) -> Self {
        Self {
            data: [
                factory(Colour::Red),
                factory(Colour::Blue),
                factory(Colour::Yellow),
                factory(Colour::Black),
            ],
        }
    }

    /// All entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Iterate over (Colour, &T) pairs in colour order.
    pub fn iter(&self) -> impl Iterator<Item = (Colour, &T)> {
        Colour::iter().zip(self.data.iter())
    }

    /// Iterate over entries in colour order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T> Index<Colour> for ColourMap<T> {
    type Output = T;

    fn index(&self, colour: Colour) -> &Self::Output {
        &self.data[colour.index()]
    }
}

impl<T> IndexMut<Colour> for ColourMap<T> {
    fn index_mut(&mut self, colour: Colour) -> &mut Self::Output {
        &mut self.data[colour.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_colour_parse_ignores_case() {
        assert_eq!(Colour::from_str("blue").unwrap(), Colour::Blue);
        assert_eq!(Colour::from_str("BLACK").unwrap(), Colour::Black);
        assert!(Colour::from_str("green").is_err());
    }

    #[test]
    fn test_colour_index_matches_iteration_order() {
        for (i, colour) in Colour::iter().enumerate() {
            assert_eq!(colour.index(), i);
        }
        assert_eq!(Colour::COUNT, 4);
    }

    #[test]
    fn test_role_labels() {
        assert_eq!(Role::OperationsExpert.to_string(), "Operations Expert");
        assert_eq!(Role::Medic.to_string(), "Medic");
        assert_eq!(Role::from_str("quarantinespecialist").unwrap(), Role::QuarantineSpecialist);
        assert_eq!(Role::iter().count(), 7);
    }

    #[test]
    fn test_cure_status() {
        assert!(!CureStatus::Uncured.is_cured());
        assert!(CureStatus::Cured.is_cured());
        assert!(CureStatus::Eradicated.is_cured());
    }

    #[test]
    fn test_colour_map_iter() {
        let map = ColourMap::new(|c| c.index() * 2);
        let pairs: Vec<_> = map.iter().map(|(c, v)| (c, *v)).collect();
        assert_eq!(
            pairs,
            vec![(Colour::Red, 0), (Colour::Blue, 2), (Colour::Yellow, 4), (Colour::Black, 6)]
        );
    }
}
