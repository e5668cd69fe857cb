//! Text map loader.
//!
//! ## Format
//!
//! Line oriented, two sections separated by a `--` line:
//!
//! ```text
//! # comment
//! Atlanta;Blue
//! Chicago;Blue
//! --
//! Atlanta;Chicago
//! ```
//!
//! City records are `Name;Colour` (colour names are case-insensitive), edge
//! records are `CityA;CityB`. Blank lines and `#` comments are skipped
//! anywhere. Errors carry the 1-based line number.

use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use super::topology::{Topology, TopologyBuilder, TopologyError};
use crate::core::Colour;

const SEPARATOR: &str = "--";
const STANDARD_MAP: &str = include_str!("../../data/map.txt");

/// Errors raised while loading a map.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("failed to read map: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: expected 'Name;Colour', found '{text}'")]
    MalformedCity { line: usize, text: String },

    #[error("line {line}: unknown colour '{colour}'")]
    UnknownColour { line: usize, colour: String },

    #[error("line {line}: expected 'CityA;CityB', found '{text}'")]
    MalformedEdge { line: usize, text: String },

    #[error("line {line}: {source}")]
    Topology {
        line: usize,
        #[source]
        source: TopologyError,
    },

    #[error("map has no '--' line between cities and connections")]
    MissingSeparator,

    #[error("map defines no cities")]
    Empty,
}

impl Topology {
    /// The built-in 48-city world map.
    pub fn standard() -> Result<Topology, MapError> {
        parse_map(STANDARD_MAP)
    }
}

/// Read and parse a map file.
pub fn load_map(path: impl AsRef<Path>) -> Result<Topology, MapError> {
    let text = std::fs::read_to_string(path)?;
    parse_map(&text)
}

/// Parse map text into a topology.
pub fn parse_map(text: &str) -> Result<Topology, MapError> {
    let mut builder = TopologyBuilder::new();
    let mut in_edges = false;

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if trimmed == SEPARATOR {
            in_edges = true;
            continue;
        }

        let Some((left, right)) = split_record(trimmed) else {
            return Err(if in_edges {
                MapError::MalformedEdge { line, text: trimmed.to_string() }
            } else {
                MapError::MalformedCity { line, text: trimmed.to_string() }
            });
        };

        if in_edges {
            builder
                .connect_by_name(left, right)
                .map_err(|source| MapError::Topology { line, source })?;
        } else {
            let colour = Colour::from_str(right).map_err(|_| MapError::UnknownColour {
                line,
                colour: right.to_string(),
            })?;
            builder
                .add_city(left, colour)
                .map_err(|source| MapError::Topology { line, source })?;
        }
    }

    if !in_edges {
        return Err(MapError::MissingSeparator);
    }
    if builder.is_empty() {
        return Err(MapError::Empty);
    }

    Ok(builder.build())
}

fn split_record(line: &str) -> Option<(&str, &str)> {
    let (left, right) = line.split_once(';')?;
    let (left, right) = (left.trim(), right.trim());
    if left.is_empty() || right.is_empty() || right.contains(';') {
        return None;
    }
    Some((left, right))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_small_map() {
        let text = "# tiny\nA;blue\nB;RED\n\n--\nA;B\n";
        let topology = parse_map(text).unwrap();

        let a = topology.city_by_name("A").unwrap();
        let b = topology.city_by_name("B").unwrap();
        assert_eq!(topology.colour_of(a), Colour::Blue);
        assert_eq!(topology.colour_of(b), Colour::Red);
        assert!(topology.are_neighbours(a, b));
    }

    #[test]
    fn test_unknown_colour_reports_line() {
        let err = parse_map("A;Blue\nB;Green\n--\n").unwrap_err();
        assert!(matches!(err, MapError::UnknownColour { line: 2, ref colour } if colour == "Green"));
    }

    #[test]
    fn test_malformed_records() {
        let err = parse_map("A;Blue\nB\n--\n").unwrap_err();
        assert!(matches!(err, MapError::MalformedCity { line: 2, .. }));

        let err = parse_map("A;Blue\nB;Blue\n--\nA;B;C\n").unwrap_err();
        assert!(matches!(err, MapError::MalformedEdge { line: 4, .. }));
    }

    #[test]
    fn test_duplicate_edge_reports_line() {
        let err = parse_map("A;Blue\nB;Blue\n--\nA;B\nB;A\n").unwrap_err();
        assert!(matches!(
            err,
            MapError::Topology { line: 5, source: TopologyError::DuplicateEdge { .. } }
        ));
    }

    #[test]
    fn test_edge_to_unknown_city() {
        let err = parse_map("A;Blue\n--\nA;Nowhere\n").unwrap_err();
        assert!(matches!(
            err,
            MapError::Topology { line: 3, source: TopologyError::UnknownCityName(_) }
        ));
    }

    #[test]
    fn test_missing_separator_and_empty() {
        assert!(matches!(parse_map("A;Blue\n"), Err(MapError::MissingSeparator)));
        assert!(matches!(parse_map("# nothing\n--\n"), Err(MapError::Empty)));
    }

    #[test]
    fn test_standard_map() {
        let topology = Topology::standard().unwrap();
        assert_eq!(topology.len(), 48);
        assert_eq!(topology.edge_count(), 93);

        for colour in [Colour::Red, Colour::Blue, Colour::Yellow, Colour::Black] {
            let count = topology.cities().filter(|c| c.colour == colour).count();
            assert_eq!(count, 12, "{colour} city count");
        }

        let atlanta = topology.city_by_name("Atlanta").unwrap();
        let names: Vec<_> = topology
            .neighbours_of(atlanta)
            .iter()
            .map(|id| topology.name_of(*id))
            .collect();
        assert_eq!(names.len(), 3);
        assert!(names.contains(&"Chicago"));
        assert!(names.contains(&"Washington"));
        assert!(names.contains(&"Miami"));
    }

    #[test]
    fn test_standard_map_is_symmetric() {
        let topology = Topology::standard().unwrap();
        for city in topology.cities() {
            for &neighbour in &city.neighbours {
                assert!(topology.are_neighbours(neighbour, city.id));
            }
        }
    }
}
