use crate::errors::*;

/// A grid position. Cells carry no identity beyond their coordinates.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cell {
    pub x: u32,
    pub y: u32,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellState {
    Wall,
    Path,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Every direction, in the fixed exploration order used by the generator and the solver.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    /// The `(dx, dy)` step for this direction; y grows downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }

    /// Only unit steps along a single axis are directions; diagonals and `(0, 0)` are rejected.
    pub fn from_delta(dx: i32, dy: i32) -> Result<Direction> {
        match (dx, dy) {
            (0, -1) => Ok(Direction::Up),
            (1, 0) => Ok(Direction::Right),
            (0, 1) => Ok(Direction::Down),
            (-1, 0) => Ok(Direction::Left),
            _ => Err(ErrorKind::InvalidDirection(dx, dy).into()),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }
}

impl Cell {
    pub fn new(x: u32, y: u32) -> Cell {
        Cell { x, y }
    }

    /// Rooms sit on the odd/odd lattice.
    #[inline]
    pub fn is_room(&self) -> bool {
        self.x % 2 == 1 && self.y % 2 == 1
    }

    /// The adjacent cell in `direction`, or None if that would leave the non-negative quadrant.
    /// The upper grid bounds are not checked here.
    #[inline]
    pub fn offset(self, direction: Direction) -> Option<Cell> {
        self.offset_by(direction, 1)
    }

    pub fn offset_by(self, direction: Direction, stride: u32) -> Option<Cell> {
        let Cell { x, y } = self;
        match direction {
            Direction::Up => y.checked_sub(stride).map(|y| Cell { x, y }),
            Direction::Right => x.checked_add(stride).map(|x| Cell { x, y }),
            Direction::Down => y.checked_add(stride).map(|y| Cell { x, y }),
            Direction::Left => x.checked_sub(stride).map(|x| Cell { x, y }),
        }
    }

    /// The cell halfway between two cells on the same row or column, e.g. the wall separating
    /// two rooms.
    pub fn midpoint(self, other: Cell) -> Cell {
        Cell {
            x: (self.x + other.x) / 2,
            y: (self.y + other.y) / 2,
        }
    }

    /// The direction of a single step from `self` to `other`, if they are adjacent.
    pub fn direction_to(self, other: Cell) -> Option<Direction> {
        Direction::ALL
            .iter()
            .cloned()
            .find(|dir| self.offset(*dir) == Some(other))
    }
}

impl From<(u32, u32)> for Cell {
    fn from((x, y): (u32, u32)) -> Cell {
        Cell { x, y }
    }
}
