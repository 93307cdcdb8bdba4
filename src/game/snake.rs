use std::collections::VecDeque;
use std::iter;

use super::lattice::Lattice;
use super::position::{Direction, Position};

/// The snake: an ordered chain of cells, head first
#[derive(Debug, Clone, PartialEq)]
pub struct Snake<const D: usize> {
    body: VecDeque<Position<D>>,
    heading: Direction<D>,
    pending_growth: bool,
}

impl<const D: usize> Snake<D> {
    /// Create a snake whose trailing segments extend behind `head`,
    /// opposite to `heading`. A length of zero is raised to one.
    pub fn new(head: Position<D>, heading: Direction<D>, length: usize) -> Self {
        let mut snake = Self {
            body: VecDeque::new(),
            heading,
            pending_growth: false,
        };
        snake.reset(head, length, heading);
        snake
    }

    /// Rebuild the body from scratch and clear pending growth.
    ///
    /// A snake always has a head, so a `length` of zero yields one segment.
    /// No bounds are checked here; [`SimConfig::layout`] rejects starts
    /// whose segments leave the lattice.
    ///
    /// [`SimConfig::layout`]: super::config::SimConfig::layout
    pub fn reset(&mut self, head: Position<D>, length: usize, heading: Direction<D>) {
        let behind = heading.reversed();
        self.body = iter::successors(Some(head), |p| Some(p.moved_in_direction(behind)))
            .take(length.max(1))
            .collect();
        self.heading = heading;
        self.pending_growth = false;
    }

    /// Get the head position
    pub fn head(&self) -> Position<D> {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position<D> {
        self.body[self.body.len() - 1]
    }

    /// Segments from head to tail
    pub fn body(&self) -> impl ExactSizeIterator<Item = Position<D>> + '_ {
        self.body.iter().copied()
    }

    pub fn heading(&self) -> Direction<D> {
        self.heading
    }

    pub fn has_pending_growth(&self) -> bool {
        self.pending_growth
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false: a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Check whether any segment, head included, sits on `pos`
    pub fn occupies(&self, pos: Position<D>) -> bool {
        self.body.contains(&pos)
    }

    /// Change heading unless it is an exact reversal. Returns whether the turn was taken.
    pub fn set_heading(&mut self, heading: Direction<D>) -> bool {
        if self.heading.is_opposite(heading) {
            return false;
        }
        self.heading = heading;
        true
    }

    /// Grow by one cell on the next move. Repeated calls before that move coalesce.
    pub fn grow(&mut self) {
        self.pending_growth = true;
    }

    /// Advance the head one cell; the tail follows unless growth is pending
    pub fn move_forward(&mut self) {
        let new_head = self.head().moved_in_direction(self.heading);
        self.body.push_front(new_head);

        if self.pending_growth {
            self.pending_growth = false;
        } else {
            self.body.pop_back();
        }
    }

    pub fn collides_with_wall(&self, lattice: &Lattice<D>) -> bool {
        !lattice.in_bounds(self.head())
    }

    /// Head overlaps any later segment. Meaningful right after [`Snake::move_forward`].
    pub fn collides_with_self(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&segment| segment == head)
    }
}
