//! Fixed-capacity token pools (disease cubes, research stations).
//!
//! Every token exists from setup onwards and is either in the pool
//! (`location == None`) or on a city. Pools never grow or shrink.
//!
//! ## Relocation discipline
//!
//! A token must be cleared before it is placed somewhere else. Placing a
//! token that already has a location is a bug in the caller and panics.

use im::Vector;
use thiserror::Error;

use crate::core::{CityId, Colour, CubeId, StationId};

/// No free token left for an allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PoolError {
    #[error("no {0} cubes left in the pool")]
    CubesExhausted(Colour),

    #[error("no research stations left in the pool")]
    StationsExhausted,
}

/// A placeable token.
pub trait Token: Clone {
    /// City the token sits on, or `None` while in the pool.
    fn location(&self) -> Option<CityId>;

    /// Raw location write. Use `place` and `clear` instead.
    fn set_location(&mut self, location: Option<CityId>);

    /// Put the token on a city.
    ///
    /// Panics if the token is already on the board.
    fn place(&mut self, city: CityId) {
        if let Some(current) = self.location() {
            panic!("Token already placed at {:?}; clear it before placing at {:?}", current, city);
        }
        self.set_location(Some(city));
    }

    /// Return the token to the pool.
    fn clear(&mut self) {
        self.set_location(None);
    }
}

/// A disease cube.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cube {
    pub id: CubeId,
    pub colour: Colour,
    pub location: Option<CityId>,
}

impl Token for Cube {
    fn location(&self) -> Option<CityId> {
        self.location
    }

    fn set_location(&mut self, location: Option<CityId>) {
        self.location = location;
    }
}

/// A research station.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Station {
    pub id: StationId,
    pub location: Option<CityId>,
}

impl Token for Station {
    fn location(&self) -> Option<CityId> {
        self.location
    }

    fn set_location(&mut self, location: Option<CityId>) {
        self.location = location;
    }
}

/// A fixed set of tokens, indexed by creation order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenPool<T: Token> {
    tokens: Vector<T>,
}

impl<T: Token> TokenPool<T> {
    /// Total tokens, placed or not.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.tokens.len()
    }

    /// Get a token by index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.tokens.get(index)
    }

    /// Index of the first unplaced token matching `filter`.
    fn find_free(&self, filter: impl Fn(&T) -> bool) -> Option<usize> {
        self.tokens
            .iter()
            .position(|token| token.location().is_none() && filter(token))
    }

    /// Place the token at `index` on a city. Panics if it is already placed.
    pub fn place(&mut self, index: usize, city: CityId) {
        self.tokens[index].place(city);
    }

    /// Return the token at `index` to the pool.
    pub fn clear(&mut self, index: usize) {
        self.tokens[index].clear();
    }

    /// Tokens currently on the board.
    pub fn placed(&self) -> impl Iterator<Item = &T> {
        self.tokens.iter().filter(|token| token.location().is_some())
    }

    /// Iterate over every token.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.tokens.iter()
    }
}

/// All disease cubes.
pub type CubePool = TokenPool<Cube>;

/// All research stations.
pub type StationPool = TokenPool<Station>;

impl TokenPool<Cube> {
    /// Create `per_colour` cubes of every colour, all in the pool.
    pub fn cubes(per_colour: usize, colours: impl IntoIterator<Item = Colour>) -> Self {
        let mut tokens = Vector::new();
        for colour in colours {
            for _ in 0..per_colour {
                tokens.push_back(Cube {
                    id: CubeId(tokens.len() as u16),
                    colour,
                    location: None,
                });
            }
        }
        Self { tokens }
    }

    /// Find a free cube of `colour`.
    pub fn allocate(&self, colour: Colour) -> Result<CubeId, PoolError> {
        self.find_free(|cube| cube.colour == colour)
            .map(|index| CubeId(index as u16))
            .ok_or(PoolError::CubesExhausted(colour))
    }

    /// Cubes of `colour` still in the pool.
    #[must_use]
    pub fn in_pool(&self, colour: Colour) -> usize {
        self.tokens
            .iter()
            .filter(|cube| cube.colour == colour && cube.location.is_none())
            .count()
    }

    /// Cubes of `colour` on the board.
    #[must_use]
    pub fn on_board(&self, colour: Colour) -> usize {
        self.tokens
            .iter()
            .filter(|cube| cube.colour == colour && cube.location.is_some())
            .count()
    }

    /// Total cubes of `colour`.
    #[must_use]
    pub fn total(&self, colour: Colour) -> usize {
        self.tokens.iter().filter(|cube| cube.colour == colour).count()
    }

    /// Colour of a cube.
    #[must_use]
    pub fn colour_of(&self, cube: CubeId) -> Colour {
        self.tokens[cube.index()].colour
    }
}

impl TokenPool<Station> {
    /// Create `count` stations, all in the pool.
    #[must_use]
    pub fn stations(count: usize) -> Self {
        let tokens = (0..count)
            .map(|i| Station {
                id: StationId(i as u8),
                location: None,
            })
            .collect();
        Self { tokens }
    }

    /// Find a free station.
    pub fn allocate(&self) -> Result<StationId, PoolError> {
        self.find_free(|_| true)
            .map(|index| StationId(index as u8))
            .ok_or(PoolError::StationsExhausted)
    }

    /// Stations still in the pool.
    #[must_use]
    pub fn in_pool(&self) -> usize {
        self.tokens.iter().filter(|s| s.location.is_none()).count()
    }
}
