use std::collections::HashSet;

use rand::Rng;

use super::error::{ConfigError, SimError};
use super::position::Position;

/// The bounded box `[0, dimensions[i])` on every axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lattice<const D: usize> {
    dimensions: [i32; D],
    volume: u64,
}

impl<const D: usize> Lattice<D> {
    /// Create a lattice, rejecting non-positive extents and cell counts
    /// that do not fit in a `u64`
    pub fn new(dimensions: [i32; D]) -> Result<Self, ConfigError> {
        for (axis, &value) in dimensions.iter().enumerate() {
            if value <= 0 {
                return Err(ConfigError::NonPositiveDimension { axis, value });
            }
        }
        let volume = dimensions
            .iter()
            .try_fold(1u64, |acc, &d| acc.checked_mul(d as u64))
            .ok_or_else(|| ConfigError::LatticeTooLarge(dimensions.to_vec()))?;
        Ok(Self { dimensions, volume })
    }

    pub fn dimensions(&self) -> [i32; D] {
        self.dimensions
    }

    /// Number of cells
    pub fn volume(&self) -> u64 {
        self.volume
    }

    /// Check if a position is within the lattice bounds
    pub fn in_bounds(&self, pos: Position<D>) -> bool {
        pos.coords()
            .iter()
            .zip(self.dimensions.iter())
            .all(|(&c, &d)| (0..d).contains(&c))
    }

    /// Centre cell, rounding down on every axis
    pub fn center(&self) -> Position<D> {
        Position::new(self.dimensions.map(|d| d / 2))
    }

    /// Uniformly drawn cell of the box
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Position<D> {
        Position::new(self.dimensions.map(|d| rng.gen_range(0..d)))
    }

    /// Rejection-sample a cell that is not in `excluded`.
    ///
    /// Fails with [`SimError::BoardFull`] instead of looping forever when the
    /// excluded set already covers every in-bounds cell.
    pub fn random_free_cell<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        excluded: &HashSet<Position<D>>,
    ) -> Result<Position<D>, SimError> {
        let volume = self.volume();
        let blocked = excluded.iter().filter(|&&p| self.in_bounds(p)).count() as u64;
        if blocked >= volume {
            return Err(SimError::BoardFull { volume });
        }

        loop {
            let pos = self.random_cell(rng);
            if !excluded.contains(&pos) {
                return Ok(pos);
            }
        }
    }
}
