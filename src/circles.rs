//! Occupancy bookkeeping for the block circles and the intersection
//! ("cross") circles.
//!
//! ```text
//!   (0,0)                   (0,3)
//!     O-----O-----O-----O
//!     |  1  |  2  |  3  |
//!     O-----O-----O-----O
//!     |  4  |     |  5  |
//!     O-----O-----O-----O
//!     |  6  |  7  |  8  |
//!     O-----O-----O-----O
//!   (3,0)                   (3,3)
//! ```
//!
//! Block circle `n` sits in the 3x3 cell layout, and its four corners are the
//! intersections at the same `(row, col)` plus `(0,1)`, `(1,0)` and `(1,1)`.

use itertools::Itertools;
use log::debug;

use crate::color::Color;
use crate::course::Course;
use crate::error::{Error, Result};
use crate::geom::Coord;

pub const GRID_SIZE: i32 = 4;
pub const BLOCK_CIRCLE_COUNT: u8 = 8;

/// Coordinates of block circles 1..=8. The center cell has no circle.
pub const BLOCK_CIRCLES: [Coord; 8] = [
    Coord::new(0, 0),
    Coord::new(0, 1),
    Coord::new(0, 2),
    Coord::new(1, 0),
    Coord::new(1, 2),
    Coord::new(2, 0),
    Coord::new(2, 1),
    Coord::new(2, 2),
];

/// Blocks sitting on the intersections when a run starts.
pub const STANDARD_CROSS_LAYOUT: [(Coord, Color); 8] = [
    (Coord::new(0, 0), Color::Black),
    (Coord::new(0, 2), Color::Green),
    (Coord::new(1, 1), Color::Yellow),
    (Coord::new(1, 3), Color::Blue),
    (Coord::new(2, 0), Color::Yellow),
    (Coord::new(2, 2), Color::Green),
    (Coord::new(3, 1), Color::Red),
    (Coord::new(3, 3), Color::Blue),
];

/// Corner offsets searched by [`CrossCircleCoordinate::goal_node`], in
/// tie-break priority order.
const GOAL_OFFSETS: [(i32, i32); 4] = [(0, 0), (0, 1), (1, 0), (1, 1)];

fn circle_index(number: u8) -> Result<usize> {
    if !(1..=BLOCK_CIRCLE_COUNT).contains(&number) {
        return Err(Error::CircleNumber(number));
    }
    Ok(number as usize - 1)
}

/// Block circles, their target colors and which of them still wait for a
/// block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockCircleCoordinate {
    course: Course,
    colors: [Color; 8],
    open: [bool; 8],
    bonus: u8,
}

impl BlockCircleCoordinate {
    pub fn new(course: Course, bonus: u8) -> Result<Self> {
        circle_index(bonus)?;
        Ok(Self {
            course,
            colors: course.layout().circle_colors,
            open: [true; 8],
            bonus,
        })
    }

    pub fn course(&self) -> Course {
        self.course
    }

    /// Number of the bonus circle, which receives the black block.
    pub fn bonus(&self) -> u8 {
        self.bonus
    }

    pub fn get(&self, number: u8) -> Result<Coord> {
        Ok(BLOCK_CIRCLES[circle_index(number)?])
    }

    pub fn target_color(&self, number: u8) -> Result<Color> {
        Ok(self.colors[circle_index(number)?])
    }

    pub fn is_open(&self, number: u8) -> Result<bool> {
        Ok(self.open[circle_index(number)?])
    }

    /// Circle numbers still waiting for a block, ascending.
    pub fn open_ids(&self) -> impl Iterator<Item = u8> + '_ {
        (1..=BLOCK_CIRCLE_COUNT).filter(|&n| self.open[n as usize - 1])
    }

    /// Where a block of `color` should go.
    ///
    /// Black always goes to the bonus circle, whether or not it is still
    /// open. Any other color goes to the lowest numbered open circle of that
    /// color; `None` once all of them are taken.
    pub fn circle_to_put(&self, color: Color) -> Option<Coord> {
        if color == Color::Black {
            return Some(BLOCK_CIRCLES[self.bonus as usize - 1]);
        }
        (0..BLOCK_CIRCLES.len())
            .find(|&i| self.colors[i] == color && self.open[i])
            .map(|i| BLOCK_CIRCLES[i])
    }

    /// Records that a block was put on the circle at `coordinate`.
    pub fn move_block(&mut self, coordinate: Coord) {
        for (i, &c) in BLOCK_CIRCLES.iter().enumerate() {
            if c == coordinate && self.open[i] {
                debug!("block circle {} resolved", i + 1);
                self.open[i] = false;
            }
        }
    }
}

/// Blocks currently resting on the 4x4 intersections.
///
/// A coordinate is open exactly when it holds a block, so the open set is
/// read straight off the color grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossCircleCoordinate {
    colors: [[Color; 4]; 4],
}

impl Default for CrossCircleCoordinate {
    fn default() -> Self {
        Self::new()
    }
}

impl CrossCircleCoordinate {
    /// Starts from [`STANDARD_CROSS_LAYOUT`].
    pub fn new() -> Self {
        let mut colors = [[Color::None; 4]; 4];
        for (c, color) in STANDARD_CROSS_LAYOUT {
            colors[c.row as usize][c.col as usize] = color;
        }
        Self { colors }
    }

    /// Starts from a recognized layout instead of the standard one. Each
    /// coordinate may appear once.
    pub fn with_layout(layout: &[(Coord, Color)]) -> Result<Self> {
        if let Some(c) = layout.iter().map(|&(c, _)| c).duplicates().next() {
            return Err(Error::DuplicatePlacement(c));
        }
        let mut this = Self {
            colors: [[Color::None; 4]; 4],
        };
        for &(c, color) in layout {
            this.set_block_color(c, color)?;
        }
        Ok(this)
    }

    fn check(c: Coord) -> Result<(usize, usize)> {
        if !(0..GRID_SIZE).contains(&c.row) || !(0..GRID_SIZE).contains(&c.col) {
            return Err(Error::OutOfGrid(c));
        }
        Ok((c.row as usize, c.col as usize))
    }

    pub fn color(&self, c: Coord) -> Result<Color> {
        let (r, col) = Self::check(c)?;
        Ok(self.colors[r][col])
    }

    /// Writing a real color opens the coordinate; writing `Color::None`
    /// closes it.
    pub fn set_block_color(&mut self, c: Coord, color: Color) -> Result<()> {
        let (r, col) = Self::check(c)?;
        self.colors[r][col] = color;
        Ok(())
    }

    pub fn is_open(&self, c: Coord) -> bool {
        Self::check(c).is_ok_and(|(r, col)| self.colors[r][col].is_block())
    }

    /// Open coordinates in row-major order.
    pub fn open(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..GRID_SIZE)
            .flat_map(|r| (0..GRID_SIZE).map(move |c| Coord::new(r, c)))
            .filter(|&c| self.is_open(c))
    }

    /// Picks the corner of the block circle at `block_circle` that still
    /// holds a block and is closest to `current`.
    ///
    /// Ties go to the first corner in the order own coordinate, `(0,+1)`,
    /// `(+1,0)`, `(+1,+1)`. `None` when no corner holds a block.
    pub fn goal_node(&self, current: Coord, block_circle: Coord) -> Option<Coord> {
        GOAL_OFFSETS
            .iter()
            .enumerate()
            .map(|(i, &(dr, dc))| (i, block_circle.offset(dr, dc)))
            .filter(|&(_, c)| self.is_open(c))
            .min_by_key(|&(i, c)| (c.manhattan(current), i))
            .map(|(_, c)| c)
    }

    /// Takes the block off `c`. Fails unless `c` holds a block.
    pub fn move_block(&mut self, c: Coord) -> Result<()> {
        let (r, col) = Self::check(c)?;
        if !self.colors[r][col].is_block() {
            return Err(Error::NoBlock(c));
        }
        debug!("block {:?} taken from {}", self.colors[r][col], c);
        self.colors[r][col] = Color::None;
        Ok(())
    }
}
