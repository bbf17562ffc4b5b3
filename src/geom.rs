//! Coordinates, facings and turn classification.
//!
//! Two frames are in use. The registry addresses cells as `(row, col)` with
//! [`Coord`]. The robot and the route translator work in `(x, y)` with
//! [`Vec2`], where `x` runs along the columns and `y` down the rows.

use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::instructions::Instruction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Saturates at the `i32` limits, which are far outside any grid.
    pub fn offset(self, drow: i32, dcol: i32) -> Self {
        Self::new(self.row.saturating_add(drow), self.col.saturating_add(dcol))
    }

    pub fn manhattan(self, other: Coord) -> u64 {
        u64::from(self.row.abs_diff(other.row)) + u64::from(self.col.abs_diff(other.col))
    }

    /// The same cell in the robot's `(x, y)` frame.
    pub fn to_robot_frame(self) -> Vec2 {
        Vec2::new(self.col, self.row)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A point or a displacement in the robot frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: i32,
    pub y: i32,
}

impl Vec2 {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn manhattan(self, other: Vec2) -> u64 {
        u64::from(self.x.abs_diff(other.x)) + u64::from(self.y.abs_diff(other.y))
    }
}

impl From<(i32, i32)> for Vec2 {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl TryFrom<&[i32]> for Vec2 {
    type Error = Error;

    fn try_from(v: &[i32]) -> Result<Self> {
        match *v {
            [x, y] => Ok(Self::new(x, y)),
            _ => Err(Error::Arity(v.len())),
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Parses raw solver output (one `[x, y]` array per point) into a path.
pub fn parse_path<P: AsRef<[i32]>>(raw: &[P]) -> Result<Vec<Vec2>> {
    raw.iter().map(|p| Vec2::try_from(p.as_ref())).collect()
}

/// Facing of the robot. Variants are listed in clockwise order, so turning
/// right advances the index by one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// `(1, 0)`
    East,
    /// `(0, 1)`
    South,
    /// `(-1, 0)`
    West,
    /// `(0, -1)`
    North,
}

impl Direction {
    pub const CYCLE: [Direction; 4] = [
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::North,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn vector(self) -> Vec2 {
        match self {
            Direction::East => Vec2::new(1, 0),
            Direction::South => Vec2::new(0, 1),
            Direction::West => Vec2::new(-1, 0),
            Direction::North => Vec2::new(0, -1),
        }
    }

    pub fn from_vector(v: Vec2) -> Result<Self> {
        Self::CYCLE
            .into_iter()
            .find(|d| d.vector() == v)
            .ok_or(Error::NotUnitDirection(v))
    }

    /// How the robot has to rotate to face `next`.
    pub fn turn_to(self, next: Direction) -> Turn {
        match (next.index() + 4 - self.index()) % 4 {
            0 => Turn::Keep,
            1 => Turn::Right,
            2 => Turn::Back,
            _ => Turn::Left,
        }
    }
}

impl TryFrom<Vec2> for Direction {
    type Error = Error;

    fn try_from(v: Vec2) -> Result<Self> {
        Self::from_vector(v)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    Keep,
    Right,
    Back,
    Left,
}

impl Turn {
    /// The spin that performs this turn, if any.
    pub fn instruction(self) -> Option<Instruction> {
        match self {
            Turn::Keep => None,
            Turn::Right => Some(Instruction::SpinRight),
            Turn::Back => Some(Instruction::Spin180),
            Turn::Left => Some(Instruction::SpinLeft),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case((1, 0), (1, 0), Turn::Keep)]
    #[case((1, 0), (0, 1), Turn::Right)]
    #[case((1, 0), (0, -1), Turn::Left)]
    #[case((1, 0), (-1, 0), Turn::Back)]
    #[case((0, 1), (-1, 0), Turn::Right)]
    #[case((0, -1), (1, 0), Turn::Right)]
    #[case((-1, 0), (0, 1), Turn::Left)]
    #[case((0, 1), (0, -1), Turn::Back)]
    fn turn_classification(
        #[case] facing: (i32, i32),
        #[case] movement: (i32, i32),
        #[case] expected: Turn,
    ) {
        let facing = Direction::from_vector(facing.into()).unwrap();
        let movement = Direction::from_vector(movement.into()).unwrap();
        assert_eq!(facing.turn_to(movement), expected);
    }

    #[test]
    fn non_unit_vectors_are_rejected() {
        assert_eq!(
            Direction::from_vector(Vec2::new(1, 1)),
            Err(Error::NotUnitDirection(Vec2::new(1, 1)))
        );
        assert!(Direction::try_from(Vec2::new(0, 0)).is_err());
        assert!(Direction::try_from(Vec2::new(2, 0)).is_err());
    }

    #[test]
    fn arity_is_checked_when_parsing_raw_points() {
        let ok = parse_path(&[vec![0, 0], vec![0, 1]]).unwrap();
        assert_eq!(ok, vec![Vec2::new(0, 0), Vec2::new(0, 1)]);
        assert_eq!(parse_path(&[vec![0, 0, 1]]), Err(Error::Arity(3)));
        assert_eq!(Vec2::try_from(&[4][..]), Err(Error::Arity(1)));
    }

    #[test]
    fn coord_helpers() {
        let c = Coord::new(1, 2);
        assert_eq!(c.to_robot_frame(), Vec2::new(2, 1));
        assert_eq!(c.offset(1, 1), Coord::new(2, 3));
        assert_eq!(c.manhattan(Coord::new(3, 0)), 4);
        assert_eq!(c.to_string(), "(1, 2)");
    }

    #[test]
    fn distances_do_not_overflow_at_the_limits() {
        let far = Vec2::new(i32::MAX, 0).manhattan(Vec2::new(i32::MIN, 0));
        assert_eq!(far, u64::from(u32::MAX));
        let corner = Coord::new(i32::MIN, i32::MIN).manhattan(Coord::new(i32::MAX, i32::MAX));
        assert_eq!(corner, 2 * u64::from(u32::MAX));
        assert_eq!(Coord::new(i32::MAX, 0).offset(1, 0), Coord::new(i32::MAX, 0));
    }
}
