//! Error types for maze construction, queries and navigation.
//!
//! Walking into a wall or off the edge of the grid is not an error: it is reported as data
//! through `navigation::MoveOutcome`. Everything here is malformed input to the library.

use error_chain::*;

error_chain! {
    errors {
        InvalidDimensions(width: usize, height: usize) {
            description("invalid maze dimensions")
            display("invalid maze dimensions {}x{}: width and height must be odd and at least 3",
                    width, height)
        }
        OutOfBounds(x: u32, y: u32) {
            description("coordinate outside the grid")
            display("coordinate ({}, {}) is outside the grid", x, y)
        }
        InvalidDirection(dx: i32, dy: i32) {
            description("invalid move direction")
            display("({}, {}) is not a single step along one axis", dx, dy)
        }
        BlockedCell(x: u32, y: u32) {
            description("cell is a wall")
            display("cell ({}, {}) is a wall", x, y)
        }
        Parse(reason: String) {
            description("malformed maze text")
            display("malformed maze text: {}", reason)
        }
        InvalidSizing(reason: String) {
            description("invalid level sizing")
            display("invalid level sizing: {}", reason)
        }
    }
}
