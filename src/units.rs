use std::fmt;

/// Smallest legal side length of a maze grid: one room surrounded by walls.
pub const MIN_DIMENSION: usize = 3;

#[derive(Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Debug, Hash)]
pub struct Width(pub usize);
#[derive(Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Debug, Hash)]
pub struct Height(pub usize);

/// A side length is usable for a maze when it is odd and at least `MIN_DIMENSION`.
#[inline]
pub fn is_valid_dimension(length: usize) -> bool {
    length >= MIN_DIMENSION && length % 2 == 1
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Height {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
