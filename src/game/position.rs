use std::fmt;

/// A cell on a `D`-dimensional integer lattice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position<const D: usize> {
    coords: [i32; D],
}

impl<const D: usize> Position<D> {
    pub const fn new(coords: [i32; D]) -> Self {
        Self { coords }
    }

    /// Build a position from a slice, `None` if the length is not `D`
    pub fn from_slice(coords: &[i32]) -> Option<Self> {
        let coords: [i32; D] = coords.try_into().ok()?;
        Some(Self { coords })
    }

    pub fn coords(&self) -> [i32; D] {
        self.coords
    }

    /// Component along `axis`
    pub fn get(&self, axis: usize) -> i32 {
        self.coords[axis]
    }

    /// Move position by `steps` cells along a direction (negative steps walk backwards)
    pub fn moved_by(&self, direction: Direction<D>, steps: i32) -> Self {
        let mut coords = self.coords;
        coords[direction.axis] += direction.sign() * steps;
        Self { coords }
    }

    /// Move position one cell in a direction
    pub fn moved_in_direction(&self, direction: Direction<D>) -> Self {
        self.moved_by(direction, 1)
    }
}

impl Position<2> {
    pub fn x(&self) -> i32 {
        self.coords[0]
    }

    pub fn y(&self) -> i32 {
        self.coords[1]
    }
}

impl<const D: usize> fmt::Display for Position<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.coords.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, ")")
    }
}

/// Axis-aligned unit heading: exactly one component is +1 or -1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction<const D: usize> {
    axis: usize,
    positive: bool,
}

impl<const D: usize> Direction<D> {
    /// Direction along `axis`, `None` if the axis does not exist
    pub fn along(axis: usize, positive: bool) -> Option<Self> {
        (axis < D).then_some(Self { axis, positive })
    }

    /// Parse a unit vector such as `[1, 0]` or `[0, 0, -1]`
    pub fn from_vector(vector: &[i32]) -> Option<Self> {
        if vector.len() != D {
            return None;
        }
        let mut found = None;
        for (axis, &component) in vector.iter().enumerate() {
            match component {
                0 => {}
                1 | -1 if found.is_none() => found = Some(Self::along(axis, component > 0)?),
                _ => return None,
            }
        }
        found
    }

    pub fn axis(&self) -> usize {
        self.axis
    }

    /// +1 or -1
    pub fn sign(&self) -> i32 {
        if self.positive {
            1
        } else {
            -1
        }
    }

    pub fn to_vector(&self) -> [i32; D] {
        let mut vector = [0; D];
        vector[self.axis] = self.sign();
        vector
    }

    pub fn reversed(&self) -> Self {
        Self {
            axis: self.axis,
            positive: !self.positive,
        }
    }

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction<D>) -> bool {
        self.reversed() == other
    }

    /// Every heading on this lattice, positive before negative per axis
    pub fn all() -> impl Iterator<Item = Self> {
        (0..D).flat_map(|axis| {
            [true, false]
                .into_iter()
                .map(move |positive| Self { axis, positive })
        })
    }
}

/// Screen-style headings for the 2-D board: y grows downwards
impl Direction<2> {
    pub const RIGHT: Self = Self {
        axis: 0,
        positive: true,
    };
    pub const LEFT: Self = Self {
        axis: 0,
        positive: false,
    };
    pub const UP: Self = Self {
        axis: 1,
        positive: false,
    };
    pub const DOWN: Self = Self {
        axis: 1,
        positive: true,
    };
}

/// Headings of the 3-D board: y grows upwards, z grows forwards
impl Direction<3> {
    pub const RIGHT_X: Self = Self {
        axis: 0,
        positive: true,
    };
    pub const LEFT_X: Self = Self {
        axis: 0,
        positive: false,
    };
    pub const UP_Y: Self = Self {
        axis: 1,
        positive: true,
    };
    pub const DOWN_Y: Self = Self {
        axis: 1,
        positive: false,
    };
    pub const FORWARD_Z: Self = Self {
        axis: 2,
        positive: true,
    };
    pub const BACKWARD_Z: Self = Self {
        axis: 2,
        positive: false,
    };
}

impl<const D: usize> fmt::Display for Direction<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.positive { '+' } else { '-' };
        match self.axis {
            0 => write!(f, "{sign}x"),
            1 => write!(f, "{sign}y"),
            2 => write!(f, "{sign}z"),
            n => write!(f, "{sign}axis{n}"),
        }
    }
}

/// Heading request handed to the simulation by a driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action<const D: usize> {
    /// Turn to a specific heading
    Move(Direction<D>),
    /// Continue in current direction
    Continue,
}

impl<const D: usize> From<Direction<D>> for Action<D> {
    fn from(direction: Direction<D>) -> Self {
        Action::Move(direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::UP.is_opposite(Direction::DOWN));
        assert!(Direction::DOWN.is_opposite(Direction::UP));
        assert!(Direction::LEFT.is_opposite(Direction::RIGHT));
        assert!(Direction::RIGHT.is_opposite(Direction::LEFT));

        assert!(!Direction::UP.is_opposite(Direction::LEFT));
        assert!(!Direction::UP.is_opposite(Direction::UP));
        assert!(Direction::FORWARD_Z.is_opposite(Direction::BACKWARD_Z));
        assert!(!Direction::FORWARD_Z.is_opposite(Direction::DOWN_Y));
    }

    #[test]
    fn test_direction_vectors() {
        assert_eq!(Direction::UP.to_vector(), [0, -1]);
        assert_eq!(Direction::DOWN.to_vector(), [0, 1]);
        assert_eq!(Direction::LEFT.to_vector(), [-1, 0]);
        assert_eq!(Direction::RIGHT.to_vector(), [1, 0]);
        assert_eq!(Direction::BACKWARD_Z.to_vector(), [0, 0, -1]);
    }

    #[test]
    fn test_from_vector() {
        assert_eq!(Direction::<2>::from_vector(&[1, 0]), Some(Direction::RIGHT));
        assert_eq!(Direction::<3>::from_vector(&[0, 1, 0]), Some(Direction::UP_Y));
        assert_eq!(Direction::<2>::from_vector(&[0, 0]), None);
        assert_eq!(Direction::<2>::from_vector(&[1, 1]), None);
        assert_eq!(Direction::<2>::from_vector(&[2, 0]), None);
        assert_eq!(Direction::<2>::from_vector(&[1, 0, 0]), None);
    }

    #[test]
    fn test_all_directions() {
        let all: Vec<_> = Direction::<3>::all().collect();
        assert_eq!(all.len(), 6);
        for d in &all {
            assert!(all.contains(&d.reversed()));
        }
    }

    #[test]
    fn test_position_movement() {
        let pos = Position::new([5, 5]);
        assert_eq!(pos.moved_in_direction(Direction::RIGHT), Position::new([6, 5]));
        assert_eq!(pos.moved_in_direction(Direction::LEFT), Position::new([4, 5]));
        assert_eq!(pos.moved_in_direction(Direction::DOWN), Position::new([5, 6]));
        assert_eq!(pos.moved_in_direction(Direction::UP), Position::new([5, 4]));
        assert_eq!(pos.moved_by(Direction::RIGHT, -2), Position::new([3, 5]));
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::new([1, -2, 3]).to_string(), "(1, -2, 3)");
        assert_eq!(Direction::UP.to_string(), "-y");
    }
}
