//! **mazes** generates perfect mazes on odd sized wall/path grids, finds routes through them and
//! runs a player through an endless sequence of ever larger levels.

#![recursion_limit = "1024"]

pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod navigation;
pub mod pathing;
pub mod progression;
pub mod units;
mod utils;
