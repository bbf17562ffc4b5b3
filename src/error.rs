use crate::course::Course;
use crate::geom::{Coord, Vec2};

/// Errors raised by the board model and the route translator.
///
/// Every variant is an invalid-argument condition: the caller handed in data
/// that does not fit the board or the current registry state. Nothing here is
/// retried. A color without a free target circle is not an error; lookups
/// report it as `None`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("expected 2 components, got {0}")]
    Arity(usize),
    #[error("block circle number {0} is invalid, expected 1..=8")]
    CircleNumber(u8),
    #[error("coordinate {0} is outside the 4x4 grid")]
    OutOfGrid(Coord),
    #[error("node index {0} is invalid, expected 0..16")]
    NodeIndex(usize),
    #[error("line cost must be positive")]
    ZeroCost,
    #[error("{0} is not a unit direction")]
    NotUnitDirection(Vec2),
    #[error("path needs at least 2 coordinates, got {0}")]
    PathTooShort(usize),
    #[error("next coordinate {to} is not adjacent to {from}")]
    NotAdjacent { from: Vec2, to: Vec2 },
    #[error("{got} course given to a translator for the {expected} course")]
    CourseMismatch { expected: Course, got: Course },
    #[error("coordinate {0} appears twice in the layout")]
    DuplicatePlacement(Coord),
    #[error("no block to move at {0}")]
    NoBlock(Coord),
    #[error("unknown instruction token {0:?}")]
    UnknownToken(char),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
