use std::time::{Duration, Instant};

use crate::cells::{Cell, CellState, Direction};
use crate::errors::*;
use crate::grid::GridModel;
use crate::pathing;

/// Where a maze session is in its life cycle.
///
/// `Generating` only exists while the progression controller is building the next maze; a
/// `NavigationState` is always created `Active` and ends `Won`.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Phase {
    Generating,
    Active,
    Won,
}

/// Result of a move request. Bumping into a wall or the edge of the grid is `moved == false`.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub struct MoveOutcome {
    pub moved: bool,
    pub won: bool,
}

/// One player working through one maze.
#[derive(Debug, Clone)]
pub struct NavigationState {
    grid: GridModel,
    start: Cell,
    player: Cell,
    exit: Cell,
    phase: Phase,
    started_at: Instant,
}

impl NavigationState {
    /// Place a player on `start` with the goal at `exit`. Both must be open cells on the grid.
    pub fn new_session(grid: GridModel, start: Cell, exit: Cell) -> Result<NavigationState> {
        for &cell in &[start, exit] {
            if grid.cell_state(cell)? == CellState::Wall {
                return Err(ErrorKind::BlockedCell(cell.x, cell.y).into());
            }
        }

        Ok(NavigationState {
            grid,
            start,
            player: start,
            exit,
            phase: Phase::Active,
            started_at: Instant::now(),
        })
    }

    /// Move by a raw `(dx, dy)` step. Anything other than a single step along one axis is an
    /// `InvalidDirection` error and leaves the state untouched.
    pub fn move_by(&mut self, dx: i32, dy: i32) -> Result<MoveOutcome> {
        let direction = Direction::from_delta(dx, dy)?;
        Ok(self.move_in(direction))
    }

    pub fn move_in(&mut self, direction: Direction) -> MoveOutcome {
        if self.phase != Phase::Active {
            return MoveOutcome::default();
        }

        let candidate = match self.grid.neighbour_at_direction(self.player, direction) {
            Some(cell) if self.grid.is_path(cell) => cell,
            _ => return MoveOutcome::default(),
        };

        self.player = candidate;
        let won = candidate == self.exit;
        if won {
            self.phase = Phase::Won;
        }

        MoveOutcome { moved: true, won }
    }

    /// Put the player back on the session's start cell. Sessions built by the level controller
    /// always start in room (1, 1); a session started elsewhere resets to where it started. The
    /// maze, exit and phase are left alone.
    pub fn reset_position(&mut self) {
        self.player = self.start;
    }

    pub fn restart_timer(&mut self) {
        self.started_at = Instant::now();
    }

    /// Time since the session started or the timer was last restarted.
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Shortest route from the player to the exit, the player's own cell first.
    pub fn hint(&self) -> Vec<Cell> {
        pathing::solve(&self.grid, self.player, self.exit)
    }

    #[inline]
    pub fn player(&self) -> Cell {
        self.player
    }

    #[inline]
    pub fn exit(&self) -> Cell {
        self.exit
    }

    #[inline]
    pub fn start(&self) -> Cell {
        self.start
    }

    #[inline]
    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }
}
