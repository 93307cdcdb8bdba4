use std::collections::HashSet;

use rand::Rng;

use super::error::SimError;
use super::lattice::Lattice;
use super::position::Position;
use super::snake::Snake;

/// Something that sits on a single free cell and can be respawned elsewhere
pub trait Placeable<const D: usize> {
    /// Current cell, `None` while not on the board
    fn position(&self) -> Option<Position<D>>;

    fn place(&mut self, pos: Position<D>);

    /// Move to a random cell not in `excluded`
    fn spawn<R: Rng + ?Sized>(
        &mut self,
        lattice: &Lattice<D>,
        rng: &mut R,
        excluded: &HashSet<Position<D>>,
    ) -> Result<Position<D>, SimError> {
        let pos = lattice.random_free_cell(rng, excluded)?;
        self.place(pos);
        Ok(pos)
    }

    fn is_at(&self, pos: Position<D>) -> bool {
        self.position() == Some(pos)
    }
}

/// Food is always on the board once placed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food<const D: usize> {
    position: Position<D>,
}

impl<const D: usize> Food<D> {
    /// Create food at a specific location
    pub fn at(position: Position<D>) -> Self {
        Self { position }
    }

    pub fn cell(&self) -> Position<D> {
        self.position
    }
}

impl<const D: usize> Placeable<D> for Food<D> {
    fn position(&self) -> Option<Position<D>> {
        Some(self.position)
    }

    fn place(&mut self, pos: Position<D>) {
        self.position = pos;
    }
}

/// The collectible speed boost; active exactly while it holds a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PowerUpItem<const D: usize> {
    position: Option<Position<D>>,
}

impl<const D: usize> PowerUpItem<D> {
    pub fn is_active(&self) -> bool {
        self.position.is_some()
    }

    /// Take the item off the board
    pub fn deactivate(&mut self) {
        self.position = None;
    }
}

impl<const D: usize> Placeable<D> for PowerUpItem<D> {
    fn position(&self) -> Option<Position<D>> {
        self.position
    }

    fn place(&mut self, pos: Position<D>) {
        self.position = Some(pos);
    }
}

/// Cells food may not spawn on: the whole snake
pub fn food_exclusions<const D: usize>(snake: &Snake<D>) -> HashSet<Position<D>> {
    snake.body().collect()
}

/// Cells a power-up may not spawn on: the whole snake and the food
pub fn power_up_exclusions<const D: usize>(
    snake: &Snake<D>,
    food: &Food<D>,
) -> HashSet<Position<D>> {
    let mut excluded = food_exclusions(snake);
    excluded.insert(food.cell());
    excluded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::position::Direction;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_food_never_on_snake() {
        let lattice = Lattice::new([6, 6]).unwrap();
        let snake = Snake::new(Position::new([4, 3]), Direction::RIGHT, 5);
        let excluded = food_exclusions(&snake);
        let mut rng = StdRng::seed_from_u64(42);
        let mut food = Food::at(Position::new([0, 0]));

        for _ in 0..200 {
            let pos = food.spawn(&lattice, &mut rng, &excluded).unwrap();
            assert!(!snake.occupies(pos));
            assert!(lattice.in_bounds(pos));
            assert!(food.is_at(pos));
        }
    }

    #[test]
    fn test_power_up_avoids_food_and_snake() {
        let lattice = Lattice::new([3, 2]).unwrap();
        // Occupies (2,0) (1,0) (0,0)
        let snake = Snake::new(Position::new([2, 0]), Direction::RIGHT, 3);
        let food = Food::at(Position::new([0, 1]));
        let excluded = power_up_exclusions(&snake, &food);
        let mut rng = StdRng::seed_from_u64(3);
        let mut item = PowerUpItem::default();

        assert!(!item.is_active());
        for _ in 0..50 {
            let pos = item.spawn(&lattice, &mut rng, &excluded).unwrap();
            assert!(pos == Position::new([1, 1]) || pos == Position::new([2, 1]));
        }
        assert!(item.is_active());

        item.deactivate();
        assert!(!item.is_active());
        assert_eq!(item.position(), None);
    }

    #[test]
    fn test_spawn_on_full_board_fails() {
        let lattice = Lattice::new([2, 1]).unwrap();
        let snake = Snake::new(Position::new([1, 0]), Direction::RIGHT, 2);
        let mut food = Food::at(Position::new([0, 0]));
        let mut rng = StdRng::seed_from_u64(0);

        let result = food.spawn(&lattice, &mut rng, &food_exclusions(&snake));
        assert_eq!(result, Err(SimError::BoardFull { volume: 2 }));
        assert_eq!(food.cell(), Position::new([0, 0]));
    }
}
