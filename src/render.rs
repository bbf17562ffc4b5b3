//! Text sketches of the board, in the layout the team draws on paper:
//!
//! ```text
//! K-----O-----G-----O
//! |  1  |  2  |  3  |
//! O-----Y-----O-----B
//! |  4  |     |  5  |
//! Y-----O-----G-----O
//! |  6  |  7  |  8  |
//! O-----R-----O-----B
//! ```
//!
//! Letters are the blocks on the intersections (`O` for none), numbers the
//! block circles.

use std::fmt;

use itertools::Itertools;

use crate::board::BoardGraph;
use crate::circles::{BLOCK_CIRCLES, CrossCircleCoordinate, GRID_SIZE};
use crate::color::Color;
use crate::geom::Coord;

fn sketch(f: &mut fmt::Formatter<'_>, block: impl Fn(Coord) -> Color) -> fmt::Result {
    for row in 0..GRID_SIZE {
        let nodes = (0..GRID_SIZE)
            .map(|col| block(Coord::new(row, col)).letter())
            .join("-----");
        writeln!(f, "{}", nodes)?;
        if row + 1 == GRID_SIZE {
            break;
        }
        write!(f, "|")?;
        for col in 0..GRID_SIZE - 1 {
            match BLOCK_CIRCLES.iter().position(|&c| c == Coord::new(row, col)) {
                Some(i) => write!(f, "  {}  |", i + 1)?,
                None => write!(f, "     |")?,
            }
        }
        writeln!(f)?;
    }
    Ok(())
}

impl fmt::Display for CrossCircleCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        sketch(f, |c| self.color(c).unwrap_or_default())
    }
}

impl fmt::Display for BoardGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        sketch(f, |c| {
            BoardGraph::node_id(c)
                .and_then(|id| self.block_color(id))
                .unwrap_or_default()
        })
    }
}
