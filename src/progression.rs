//! The endless level sequence: mazes grow a little after every win until they hit a size cap,
//! and the fastest completion is remembered.

use std::cmp;
use std::time::Duration;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cells::{Cell, Direction};
use crate::errors::*;
use crate::generators;
use crate::navigation::{MoveOutcome, NavigationState, Phase};
use crate::units::{is_valid_dimension, Height, Width};

pub const DEFAULT_BASE_WIDTH: usize = 31;
pub const DEFAULT_BASE_HEIGHT: usize = 21;
pub const DEFAULT_STEP: usize = 2;
pub const DEFAULT_CAP_WIDTH: usize = 41;
pub const DEFAULT_CAP_HEIGHT: usize = 31;

/// How maze sizes grow from level to level.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LevelSizing {
    base_width: usize,
    base_height: usize,
    step: usize,
    cap_width: usize,
    cap_height: usize,
}

impl Default for LevelSizing {
    fn default() -> LevelSizing {
        LevelSizing {
            base_width: DEFAULT_BASE_WIDTH,
            base_height: DEFAULT_BASE_HEIGHT,
            step: DEFAULT_STEP,
            cap_width: DEFAULT_CAP_WIDTH,
            cap_height: DEFAULT_CAP_HEIGHT,
        }
    }
}

impl LevelSizing {
    /// Bases and caps must be legal maze dimensions with each base no larger than its cap.
    pub fn new(base: (Width, Height), step: usize, cap: (Width, Height)) -> Result<LevelSizing> {
        let (Width(base_width), Height(base_height)) = base;
        let (Width(cap_width), Height(cap_height)) = cap;

        for &(name, length) in &[("base width", base_width), ("base height", base_height),
                                 ("cap width", cap_width), ("cap height", cap_height)] {
            if !is_valid_dimension(length) {
                return Err(ErrorKind::InvalidSizing(format!("{} {} must be odd and at least 3",
                                                            name, length)).into());
            }
        }
        if base_width > cap_width || base_height > cap_height {
            return Err(ErrorKind::InvalidSizing(format!("base {}x{} exceeds cap {}x{}",
                                                        base_width, base_height,
                                                        cap_width, cap_height)).into());
        }

        Ok(LevelSizing { base_width, base_height, step, cap_width, cap_height })
    }

    pub fn base_size(&self) -> (Width, Height) {
        (Width(self.base_width), Height(self.base_height))
    }

    pub fn cap_size(&self) -> (Width, Height) {
        (Width(self.cap_width), Height(self.cap_height))
    }

    pub fn step(&self) -> usize {
        self.step
    }

    /// The maze size for `level` when the previous level was played at `current` size.
    ///
    /// Each axis grows to `min(base + level * step, cap)`, adjusted to be odd. The result is
    /// floored at the current size (itself clamped to the cap) so a maze never shrinks, which
    /// only matters when `current` is already ahead of the formula or the sizing changed.
    pub fn next_level_size(&self, level: u32, current: (Width, Height)) -> (Width, Height) {
        let width = grow_axis(self.base_width, self.step, self.cap_width, level, (current.0).0);
        let height = grow_axis(self.base_height, self.step, self.cap_height, level, (current.1).0);
        (Width(width), Height(height))
    }
}

fn grow_axis(base: usize, step: usize, cap: usize, level: u32, current: usize) -> usize {
    let grown = base.saturating_add((level as usize).saturating_mul(step));
    let capped = cmp::min(grown, cap);
    let odd = if capped % 2 == 1 {
        capped
    } else if capped < cap {
        capped + 1
    } else {
        capped - 1
    };

    let floor = if is_valid_dimension(current) { cmp::min(current, cap) } else { 0 };
    cmp::max(cmp::max(odd, floor), crate::units::MIN_DIMENSION)
}

/// The size policy with the default base 31x21, step 2 and cap 41x31: per axis
/// `min(base + level * step, cap)` made odd, but never smaller than the current `width` and
/// `height` when those are valid. `next_level_size(1, Width(39), Height(29))` therefore stays
/// at 39x29 rather than dropping to 33x23.
pub fn next_level_size(level: u32, width: Width, height: Height) -> (Width, Height) {
    LevelSizing::default().next_level_size(level, (width, height))
}

/// Summary of one completed level.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LevelReport {
    pub level: u32,
    pub elapsed: Duration,
    /// True only when this completion strictly beat the previous best.
    pub new_best: bool,
    pub best: Duration,
}

/// Runs the level sequence: owns the current maze session, the level counter, the sizing policy
/// and the best time. All state is in the value, so independent games can run side by side.
#[derive(Debug)]
pub struct ProgressionController<R: Rng = StdRng> {
    sizing: LevelSizing,
    level: u32,
    width: Width,
    height: Height,
    best_time: Option<Duration>,
    last_report: Option<LevelReport>,
    phase: Phase,
    navigation: NavigationState,
    rng: R,
}

impl ProgressionController<StdRng> {
    /// Start at level 1. A seed makes the whole sequence of mazes reproducible.
    pub fn new(sizing: LevelSizing, seed: Option<u64>) -> Result<ProgressionController<StdRng>> {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        ProgressionController::with_rng(sizing, rng)
    }
}

impl<R: Rng> ProgressionController<R> {
    pub fn with_rng(sizing: LevelSizing, mut rng: R) -> Result<ProgressionController<R>> {
        let (width, height) = sizing.base_size();
        let navigation = start_level(width, height, &mut rng)?;
        info!("level 1: {}x{} maze", width, height);

        Ok(ProgressionController {
            sizing,
            level: 1,
            width,
            height,
            best_time: None,
            last_report: None,
            phase: Phase::Active,
            navigation,
            rng,
        })
    }

    /// Move the player. Reaching the exit completes the level: the time is recorded and the
    /// controller waits in `Phase::Won` until `advance` is called.
    pub fn move_player(&mut self, direction: Direction) -> MoveOutcome {
        let outcome = self.navigation.move_in(direction);
        if outcome.won {
            let elapsed = self.navigation.elapsed();
            self.record_completion(elapsed);
        }
        outcome
    }

    /// Record a completion of the current level taking `elapsed`. A new best needs to be strictly
    /// faster than the old one; a tie keeps the earlier record. Only a won session gets here, so
    /// nothing outside the controller can mark a level complete.
    fn record_completion(&mut self, elapsed: Duration) -> LevelReport {
        let new_best = self.best_time.map_or(true, |best| elapsed < best);
        if new_best {
            self.best_time = Some(elapsed);
        }
        let best = self.best_time.unwrap_or(elapsed);

        let report = LevelReport { level: self.level, elapsed, new_best, best };
        info!("level {} complete in {:.1}s", self.level, elapsed.as_secs_f64());
        if new_best {
            info!("new best time {:.1}s", elapsed.as_secs_f64());
        }

        self.phase = Phase::Won;
        self.last_report = Some(report);
        report
    }

    /// Move on from a won level to the next one. Returns false, doing nothing, if the current
    /// level has not been won yet.
    pub fn advance(&mut self) -> Result<bool> {
        if self.phase != Phase::Won {
            return Ok(false);
        }

        let next_level = self.level.saturating_add(1);
        let (width, height) = self.sizing.next_level_size(next_level, (self.width, self.height));
        let navigation = self.generate_level(width, height)?;

        self.level = next_level;
        self.width = width;
        self.height = height;
        self.navigation = navigation;
        self.phase = Phase::Active;
        info!("level {}: {}x{} maze", self.level, width, height);
        Ok(true)
    }

    /// Throw away the current maze and play a fresh one of the same size and level.
    pub fn new_maze(&mut self) -> Result<()> {
        self.navigation = self.generate_level(self.width, self.height)?;
        self.phase = Phase::Active;
        debug!("new {}x{} maze for level {}", self.width, self.height, self.level);
        Ok(())
    }

    /// Build the maze for a level. The phase reads `Generating` meanwhile and goes back to what
    /// it was if generation fails.
    fn generate_level(&mut self, width: Width, height: Height) -> Result<NavigationState> {
        let previous = self.phase;
        self.phase = Phase::Generating;
        let generated = start_level(width, height, &mut self.rng);
        if generated.is_err() {
            self.phase = previous;
        }
        generated
    }

    /// Back to the start of the current maze with the clock restarted. Ignored once the level
    /// has been won.
    pub fn retry(&mut self) {
        if self.phase == Phase::Active {
            self.navigation.reset_position();
            self.navigation.restart_timer();
        }
    }

    pub fn hint(&self) -> Vec<Cell> {
        self.navigation.hint()
    }

    #[inline]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[inline]
    pub fn size(&self) -> (Width, Height) {
        (self.width, self.height)
    }

    #[inline]
    pub fn best_time(&self) -> Option<Duration> {
        self.best_time
    }

    #[inline]
    pub fn last_report(&self) -> Option<&LevelReport> {
        self.last_report.as_ref()
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    #[inline]
    pub fn sizing(&self) -> &LevelSizing {
        &self.sizing
    }
}

fn start_level<R: Rng>(width: Width, height: Height, rng: &mut R) -> Result<NavigationState> {
    let grid = generators::recursive_backtracker(width, height, rng)?;
    let start = grid.start_room();
    let exit = grid.exit_room();
    NavigationState::new_session(grid, start, exit)
}
