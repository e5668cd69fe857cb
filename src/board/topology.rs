//! Static city graph.
//!
//! The topology is built once through a `TopologyBuilder` and is read-only
//! afterwards. Game states share it through an `Arc`, so cloning a state
//! never copies the graph.
//!
//! ## Invariants
//!
//! - Every edge is stored in both directions
//! - No self-loops, no duplicate edges
//! - City names are unique
//!
//! ```
//! use pandemic_ai::board::TopologyBuilder;
//! use pandemic_ai::core::Colour;
//!
//! let mut builder = TopologyBuilder::new();
//! let lima = builder.add_city("Lima", Colour::Yellow).unwrap();
//! let santiago = builder.add_city("Santiago", Colour::Yellow).unwrap();
//! builder.connect(lima, santiago).unwrap();
//!
//! let topology = builder.build();
//! assert_eq!(topology.neighbours_of(lima), &[santiago]);
//! assert_eq!(topology.neighbours_of(santiago), &[lima]);
//! ```

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use thiserror::Error;

use crate::core::{CityId, Colour};

/// Errors raised while building a topology.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    #[error("city '{0}' is already defined")]
    DuplicateCity(String),

    #[error("unknown city '{0}'")]
    UnknownCityName(String),

    #[error("unknown city id {0}")]
    UnknownCity(CityId),

    #[error("'{0}' cannot be connected to itself")]
    SelfLoop(String),

    #[error("'{a}' and '{b}' are already connected")]
    DuplicateEdge { a: String, b: String },

    #[error("too many cities (limit {0})")]
    TooManyCities(usize),
}

/// A city on the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct City {
    pub id: CityId,
    pub name: String,
    pub colour: Colour,
    pub neighbours: SmallVec<[CityId; 6]>,
}

/// Read-only undirected city graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Topology {
    cities: Vec<City>,
    by_name: FxHashMap<String, CityId>,
}

impl Topology {
    /// Number of cities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Check if the graph has no cities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Look up a city. Panics on an id from another topology.
    #[must_use]
    pub fn city(&self, id: CityId) -> &City {
        &self.cities[id.index()]
    }

    /// Look up a city, or `None` if the id is out of range.
    #[must_use]
    pub fn get(&self, id: CityId) -> Option<&City> {
        self.cities.get(id.index())
    }

    /// Find a city by its exact name.
    #[must_use]
    pub fn city_by_name(&self, name: &str) -> Option<CityId> {
        self.by_name.get(name).copied()
    }

    /// Neighbours of a city, in insertion order.
    #[must_use]
    pub fn neighbours_of(&self, id: CityId) -> &[CityId] {
        &self.cities[id.index()].neighbours
    }

    /// Check if two cities share an edge.
    #[must_use]
    pub fn are_neighbours(&self, a: CityId, b: CityId) -> bool {
        self.get(a).is_some_and(|city| city.neighbours.contains(&b))
    }

    /// Display name of a city.
    #[must_use]
    pub fn name_of(&self, id: CityId) -> &str {
        &self.cities[id.index()].name
    }

    /// Colour of a city.
    #[must_use]
    pub fn colour_of(&self, id: CityId) -> Colour {
        self.cities[id.index()].colour
    }

    /// Iterate over cities in id order.
    pub fn cities(&self) -> impl Iterator<Item = &City> {
        self.cities.iter()
    }

    /// Iterate over city ids in order.
    pub fn city_ids(&self) -> impl Iterator<Item = CityId> {
        (0..self.cities.len() as u16).map(CityId)
    }

    /// Number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.cities.iter().map(|c| c.neighbours.len()).sum::<usize>() / 2
    }
}

/// Incremental builder for a `Topology`.
#[derive(Clone, Debug, Default)]
pub struct TopologyBuilder {
    cities: Vec<City>,
    by_name: FxHashMap<String, CityId>,
}

impl TopologyBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a city and return its id. Names must be unique.
    pub fn add_city(&mut self, name: impl Into<String>, colour: Colour) -> Result<CityId, TopologyError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(TopologyError::DuplicateCity(name));
        }
        if self.cities.len() >= u16::MAX as usize {
            return Err(TopologyError::TooManyCities(u16::MAX as usize));
        }

        let id = CityId(self.cities.len() as u16);
        self.by_name.insert(name.clone(), id);
        self.cities.push(City {
            id,
            name,
            colour,
            neighbours: SmallVec::new(),
        });
        Ok(id)
    }

    /// Connect two cities in both directions.
    ///
    /// All checks run before either side is touched, so a failed call
    /// leaves the graph unchanged.
    pub fn connect(&mut self, a: CityId, b: CityId) -> Result<(), TopologyError> {
        let city_a = self.cities.get(a.index()).ok_or(TopologyError::UnknownCity(a))?;
        let city_b = self.cities.get(b.index()).ok_or(TopologyError::UnknownCity(b))?;

        if a == b {
            return Err(TopologyError::SelfLoop(city_a.name.clone()));
        }
        if city_a.neighbours.contains(&b) || city_b.neighbours.contains(&a) {
            return Err(TopologyError::DuplicateEdge {
                a: city_a.name.clone(),
                b: city_b.name.clone(),
            });
        }

        self.cities[a.index()].neighbours.push(b);
        self.cities[b.index()].neighbours.push(a);
        Ok(())
    }

    /// Connect two cities by name.
    pub fn connect_by_name(&mut self, a: &str, b: &str) -> Result<(), TopologyError> {
        let id_a = self.lookup(a)?;
        let id_b = self.lookup(b)?;
        self.connect(id_a, id_b)
    }

    /// Number of cities added so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> Topology {
        Topology {
            cities: self.cities,
            by_name: self.by_name,
        }
    }

    fn lookup(&self, name: &str) -> Result<CityId, TopologyError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| TopologyError::UnknownCityName(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> (TopologyBuilder, [CityId; 3]) {
        let mut builder = TopologyBuilder::new();
        let a = builder.add_city("A", Colour::Blue).unwrap();
        let b = builder.add_city("B", Colour::Blue).unwrap();
        let c = builder.add_city("C", Colour::Red).unwrap();
        (builder, [a, b, c])
    }

    #[test]
    fn test_connect_is_symmetric() {
        let (mut builder, [a, b, c]) = triangle();
        builder.connect(a, b).unwrap();
        builder.connect_by_name("B", "C").unwrap();

        let topology = builder.build();
        assert!(topology.are_neighbours(a, b));
        assert!(topology.are_neighbours(b, a));
        assert!(topology.are_neighbours(c, b));
        assert!(!topology.are_neighbours(a, c));
        assert_eq!(topology.edge_count(), 2);
    }

    #[test]
    fn test_duplicate_edge_fails_atomically() {
        let (mut builder, [a, b, _]) = triangle();
        builder.connect(a, b).unwrap();

        let err = builder.connect(b, a).unwrap_err();
        assert_eq!(err, TopologyError::DuplicateEdge { a: "B".into(), b: "A".into() });

        let topology = builder.build();
        assert_eq!(topology.neighbours_of(a), &[b]);
        assert_eq!(topology.neighbours_of(b), &[a]);
    }

    #[test]
    fn test_self_loop_rejected() {
        let (mut builder, [a, _, _]) = triangle();
        assert_eq!(builder.connect(a, a), Err(TopologyError::SelfLoop("A".into())));
    }

    #[test]
    fn test_unknown_cities_rejected() {
        let (mut builder, [a, _, _]) = triangle();
        assert_eq!(
            builder.connect(a, CityId(99)),
            Err(TopologyError::UnknownCity(CityId(99)))
        );
        assert_eq!(
            builder.connect_by_name("A", "Z"),
            Err(TopologyError::UnknownCityName("Z".into()))
        );
    }

    #[test]
    fn test_duplicate_city_rejected() {
        let (mut builder, _) = triangle();
        assert_eq!(
            builder.add_city("A", Colour::Black),
            Err(TopologyError::DuplicateCity("A".into()))
        );
        assert_eq!(builder.len(), 3);
    }

    #[test]
    fn test_lookups() {
        let (builder, [_, b, c]) = triangle();
        let topology = builder.build();

        assert_eq!(topology.city_by_name("B"), Some(b));
        assert_eq!(topology.city_by_name("b"), None);
        assert_eq!(topology.name_of(c), "C");
        assert_eq!(topology.colour_of(c), Colour::Red);
        assert!(topology.get(CityId(3)).is_none());
        assert_eq!(topology.city_ids().count(), 3);
    }
}
