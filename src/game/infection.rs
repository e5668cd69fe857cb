//! Infection, outbreak and epidemic resolution.
//!
//! ## Infection arithmetic
//!
//! Infecting a city with a desired count places `max(0, desired - existing)`
//! cubes of the colour and computes the resulting total as
//! `existing + desired`. A resulting total above 3 is an outbreak. The
//! cube that would make the total exceed 3 is never placed, so no city ever
//! holds more than 3 cubes of one colour.
//!
//! ## Cascades
//!
//! An outbreak infects every neighbour with a desired count of 1, which can
//! trigger further outbreaks. Cascades run on an explicit stack of
//! `(city, next neighbour)` frames, visiting neighbours depth-first in
//! topology order. Repeat visits to the same city are not suppressed; the
//! outbreak limit bounds the cascade.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::LossReason;
use super::state::GameState;
use crate::core::{CityId, Colour, CureStatus, CuredInfectionRule};

/// Cube total at or below which a city is stable.
pub const OUTBREAK_THRESHOLD: usize = 3;

/// One outbreak within an infection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outbreak {
    pub city: CityId,
    pub colour: Colour,
    /// Resulting total that triggered the outbreak.
    pub total: usize,
}

/// What one infection (including its cascade) did to the board.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfectionReport {
    /// Cubes moved from the pool to the board.
    pub cubes_placed: usize,
    /// Outbreaks in the order they were resolved.
    pub outbreaks: Vec<Outbreak>,
    /// The infection was skipped because the colour is cured.
    pub skipped: bool,
}

impl InfectionReport {
    /// Check if any outbreak happened.
    #[must_use]
    pub fn had_outbreak(&self) -> bool {
        !self.outbreaks.is_empty()
    }
}

impl GameState {
    /// Infect a city with `count` cubes of `colour`, resolving any cascade.
    ///
    /// Honours the configured `CuredInfectionRule` for ordinary infections.
    /// An error means the game is lost; the caller records it.
    pub fn infect(&mut self, city: CityId, colour: Colour, count: usize) -> Result<InfectionReport, LossReason> {
        let skip = self.config.cured_infection_rule == CuredInfectionRule::EveryInfection
            && self.cures[colour].is_cured();
        if skip {
            debug!(city = %self.city_name(city), %colour, "Infection skipped, colour cured");
            return Ok(InfectionReport { skipped: true, ..Default::default() });
        }

        let mut report = InfectionReport::default();
        self.spread(city, colour, count, &mut report)?;
        Ok(report)
    }

    /// Resolve an epidemic: raise the infection rate, infect the drawn city
    /// with 3 cubes, then put the reshuffled discard pile back on top.
    ///
    /// The infection is skipped for a cured colour, but the card is still
    /// drawn.
    pub(crate) fn resolve_epidemic(&mut self) -> Result<InfectionReport, LossReason> {
        self.epidemics += 1;
        self.infection_rate_index += 1;

        let card = self
            .infection_deck
            .draw()
            .ok_or(LossReason::InfectionDeckExhausted)?;
        let colour = self.topology.colour_of(card.city);

        let mut report = InfectionReport::default();
        if self.cures[colour].is_cured() {
            report.skipped = true;
        } else {
            self.spread(card.city, colour, OUTBREAK_THRESHOLD, &mut report)?;
        }

        let drawn = self.infection_deck.pointer();
        self.infection_deck.shuffle_range(0..drawn, &mut self.rng);
        self.infection_deck.rewind();

        info!(
            city = %self.city_name(card.city),
            %colour,
            epidemics = self.epidemics,
            rate = self.infection_rate(),
            skipped = report.skipped,
            "Epidemic"
        );
        Ok(report)
    }

    /// Infect and run the outbreak cascade.
    fn spread(
        &mut self,
        city: CityId,
        colour: Colour,
        count: usize,
        report: &mut InfectionReport,
    ) -> Result<(), LossReason> {
        let topology = Arc::clone(&self.topology);
        let mut stack: Vec<(CityId, usize)> = Vec::new();

        let total = self.add_cubes(city, colour, count, report)?;
        if total > OUTBREAK_THRESHOLD {
            self.outbreak(city, colour, total, report)?;
            stack.push((city, 0));
        }

        while let Some(frame) = stack.last_mut() {
            let (source, next) = *frame;
            let neighbours = topology.neighbours_of(source);
            let Some(&neighbour) = neighbours.get(next) else {
                stack.pop();
                continue;
            };
            frame.1 += 1;

            let total = self.add_cubes(neighbour, colour, 1, report)?;
            if total > OUTBREAK_THRESHOLD {
                self.outbreak(neighbour, colour, total, report)?;
                stack.push((neighbour, 0));
            }
        }
        Ok(())
    }

    /// Place up to `desired` cubes and return the resulting total.
    fn add_cubes(
        &mut self,
        city: CityId,
        colour: Colour,
        desired: usize,
        report: &mut InfectionReport,
    ) -> Result<usize, LossReason> {
        let existing = self.board.cube_count(city, colour);
        let to_place = desired.saturating_sub(existing);

        for _ in 0..to_place {
            self.board.place_cube(city, colour)?;
            report.cubes_placed += 1;
        }
        if to_place > 0 && self.cures[colour] == CureStatus::Eradicated {
            self.cures[colour] = CureStatus::Cured;
        }
        Ok(existing + desired)
    }

    /// Advance the outbreak marker; reaching the limit loses the game.
    fn outbreak(
        &mut self,
        city: CityId,
        colour: Colour,
        total: usize,
        report: &mut InfectionReport,
    ) -> Result<(), LossReason> {
        self.outbreaks += 1;
        report.outbreaks.push(Outbreak { city, colour, total });
        debug!(
            city = %self.city_name(city),
            %colour,
            total,
            outbreaks = self.outbreaks,
            "Outbreak"
        );

        if self.outbreaks >= self.config.outbreak_limit {
            return Err(LossReason::OutbreakLimitExceeded);
        }
        Ok(())
    }
}
