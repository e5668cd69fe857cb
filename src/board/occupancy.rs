//! Board occupancy: which stations, pawns and cubes sit on each city.
//!
//! `Board` owns the cube and station pools together with the per-city
//! records, so the two views can only change together. Every mutation goes
//! through a method here that updates both sides.

use im::Vector;
use smallvec::SmallVec;
use strum::IntoEnumIterator;

use super::pools::{CubePool, PoolError, StationPool};
use crate::core::{CityId, Colour, CubeId, PawnId, StationId};

/// Tokens on one city.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CityOccupancy {
    pub stations: SmallVec<[StationId; 1]>,
    pub pawns: SmallVec<[PawnId; 4]>,
    pub cubes: SmallVec<[CubeId; 6]>,
}

/// Per-city occupancy plus the token pools.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cities: Vector<CityOccupancy>,
    cubes: CubePool,
    stations: StationPool,
}

impl Board {
    /// Create an empty board for `city_count` cities with full pools.
    #[must_use]
    pub fn new(city_count: usize, cubes_per_colour: usize, stations: usize) -> Self {
        Self {
            cities: (0..city_count).map(|_| CityOccupancy::default()).collect(),
            cubes: CubePool::cubes(cubes_per_colour, Colour::iter()),
            stations: StationPool::stations(stations),
        }
    }

    /// Tokens on a city.
    #[must_use]
    pub fn occupancy(&self, city: CityId) -> &CityOccupancy {
        &self.cities[city.index()]
    }

    /// The cube pool.
    #[must_use]
    pub fn cube_pool(&self) -> &CubePool {
        &self.cubes
    }

    /// The station pool.
    #[must_use]
    pub fn station_pool(&self) -> &StationPool {
        &self.stations
    }

    // === Cubes ===

    /// Move one cube of `colour` from the pool onto a city.
    pub fn place_cube(&mut self, city: CityId, colour: Colour) -> Result<CubeId, PoolError> {
        let cube = self.cubes.allocate(colour)?;
        self.cubes.place(cube.index(), city);
        self.cities[city.index()].cubes.push(cube);
        Ok(cube)
    }

    /// Return one cube of `colour` on `city` to the pool.
    ///
    /// Returns `false` if the city has no cube of that colour.
    pub fn remove_cube(&mut self, city: CityId, colour: Colour) -> bool {
        let occupancy = &mut self.cities[city.index()];
        let Some(position) = occupancy
            .cubes
            .iter()
            .position(|cube| self.cubes.colour_of(*cube) == colour)
        else {
            return false;
        };
        let cube = occupancy.cubes.remove(position);
        self.cubes.clear(cube.index());
        true
    }

    /// Return every cube of `colour` on `city` to the pool.
    ///
    /// Returns how many were removed.
    pub fn remove_all_cubes(&mut self, city: CityId, colour: Colour) -> usize {
        let mut removed = 0;
        while self.remove_cube(city, colour) {
            removed += 1;
        }
        removed
    }

    /// Cubes of `colour` on a city.
    #[must_use]
    pub fn cube_count(&self, city: CityId, colour: Colour) -> usize {
        self.cities[city.index()]
            .cubes
            .iter()
            .filter(|cube| self.cubes.colour_of(**cube) == colour)
            .count()
    }

    /// Distinct cube colours present on a city, in colour order.
    #[must_use]
    pub fn colours_at(&self, city: CityId) -> SmallVec<[Colour; 4]> {
        Colour::iter()
            .filter(|colour| self.cube_count(city, *colour) > 0)
            .collect()
    }

    /// Cubes of `colour` anywhere on the board.
    #[must_use]
    pub fn cubes_on_board(&self, colour: Colour) -> usize {
        self.cubes.on_board(colour)
    }

    /// Cubes of `colour` left in the pool.
    #[must_use]
    pub fn cubes_in_pool(&self, colour: Colour) -> usize {
        self.cubes.in_pool(colour)
    }

    /// Cubes on the board, all colours.
    #[must_use]
    pub fn total_cubes_on_board(&self) -> usize {
        self.cubes.placed().count()
    }

    // === Stations ===

    /// Move a station from the pool onto a city.
    pub fn place_station(&mut self, city: CityId) -> Result<StationId, PoolError> {
        let station = self.stations.allocate()?;
        self.stations.place(station.index(), city);
        self.cities[city.index()].stations.push(station);
        Ok(station)
    }

    /// Check if a city hosts a research station.
    #[must_use]
    pub fn has_station(&self, city: CityId) -> bool {
        !self.cities[city.index()].stations.is_empty()
    }

    /// Cities hosting a research station, in station order.
    #[must_use]
    pub fn station_cities(&self) -> SmallVec<[CityId; 8]> {
        self.stations.placed().filter_map(|s| s.location).collect()
    }

    /// Stations on the board.
    #[must_use]
    pub fn stations_on_board(&self) -> usize {
        self.stations.placed().count()
    }

    // === Pawns ===

    /// Put a pawn on a city at setup.
    pub fn add_pawn(&mut self, pawn: PawnId, city: CityId) {
        self.cities[city.index()].pawns.push(pawn);
    }

    /// Move a pawn between cities.
    ///
    /// Panics if the pawn is not on `from`.
    pub fn move_pawn(&mut self, pawn: PawnId, from: CityId, to: CityId) {
        let pawns = &mut self.cities[from.index()].pawns;
        let Some(position) = pawns.iter().position(|p| *p == pawn) else {
            panic!("{} is not on city {}", pawn, from);
        };
        pawns.remove(position);
        self.cities[to.index()].pawns.push(pawn);
    }

    /// Pawns on a city.
    #[must_use]
    pub fn pawns_at(&self, city: CityId) -> &[PawnId] {
        &self.cities[city.index()].pawns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        Board::new(4, 3, 2)
    }

    #[test]
    fn test_place_and_remove_cubes() {
        let mut board = board();
        let city = CityId(1);

        board.place_cube(city, Colour::Red).unwrap();
        board.place_cube(city, Colour::Red).unwrap();
        board.place_cube(city, Colour::Black).unwrap();

        assert_eq!(board.cube_count(city, Colour::Red), 2);
        assert_eq!(board.colours_at(city).as_slice(), &[Colour::Red, Colour::Black]);
        assert_eq!(board.cubes_in_pool(Colour::Red), 1);

        assert!(board.remove_cube(city, Colour::Red));
        assert_eq!(board.cube_count(city, Colour::Red), 1);
        assert!(!board.remove_cube(city, Colour::Blue));

        assert_eq!(board.remove_all_cubes(city, Colour::Red), 1);
        assert_eq!(board.cubes_on_board(Colour::Red), 0);
        assert_eq!(board.cubes_in_pool(Colour::Red), 3);
        assert_eq!(board.total_cubes_on_board(), 1);
    }

    #[test]
    fn test_cube_exhaustion() {
        let mut board = board();
        for i in 0..3 {
            board.place_cube(CityId(i), Colour::Yellow).unwrap();
        }
        assert_eq!(
            board.place_cube(CityId(3), Colour::Yellow),
            Err(PoolError::CubesExhausted(Colour::Yellow))
        );
        assert_eq!(board.cube_count(CityId(3), Colour::Yellow), 0);
    }

    #[test]
    fn test_stations() {
        let mut board = board();
        board.place_station(CityId(0)).unwrap();
        board.place_station(CityId(2)).unwrap();

        assert!(board.has_station(CityId(2)));
        assert!(!board.has_station(CityId(1)));
        assert_eq!(board.station_cities().as_slice(), &[CityId(0), CityId(2)]);
        assert_eq!(board.place_station(CityId(3)), Err(PoolError::StationsExhausted));
    }

    #[test]
    fn test_move_pawn() {
        let mut board = board();
        board.add_pawn(PawnId(0), CityId(0));
        board.add_pawn(PawnId(1), CityId(0));
        board.move_pawn(PawnId(0), CityId(0), CityId(3));

        assert_eq!(board.pawns_at(CityId(0)), &[PawnId(1)]);
        assert_eq!(board.pawns_at(CityId(3)), &[PawnId(0)]);
    }

    #[test]
    #[should_panic(expected = "is not on city")]
    fn test_move_missing_pawn_panics() {
        let mut board = board();
        board.move_pawn(PawnId(0), CityId(0), CityId(1));
    }
}
