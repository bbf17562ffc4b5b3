//! Per-run configuration and the state built from it.

use anyhow::Context;
use log::info;
use serde::{Deserialize, Serialize};

use crate::board::BoardGraph;
use crate::circles::{BlockCircleCoordinate, CrossCircleCoordinate, STANDARD_CROSS_LAYOUT};
use crate::color::Color;
use crate::course::Course;
use crate::error::Result;
use crate::geom::Coord;
use crate::translator::RouteTranslator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub row: i32,
    pub col: i32,
    pub color: Color,
}

impl Placement {
    pub fn coord(&self) -> Coord {
        Coord::new(self.row, self.col)
    }
}

fn standard_layout() -> Vec<Placement> {
    STANDARD_CROSS_LAYOUT
        .iter()
        .map(|&(c, color)| Placement {
            row: c.row,
            col: c.col,
            color,
        })
        .collect()
}

/// What a run needs to know before it starts.
///
/// ```
/// use block_bingo::config::BingoConfig;
/// let config = BingoConfig::from_json(r#"{"course": "right", "bonus": 6}"#).unwrap();
/// let run = config.build().unwrap();
/// assert_eq!(run.block_circles.bonus(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BingoConfig {
    pub course: Course,
    /// Block circle number of the bonus circle.
    pub bonus: u8,
    /// Blocks on the intersections at the start of the run, at most one per
    /// coordinate.
    #[serde(default = "standard_layout")]
    pub initial_layout: Vec<Placement>,
}

impl BingoConfig {
    pub fn new(course: Course, bonus: u8) -> Self {
        Self {
            course,
            bonus,
            initial_layout: standard_layout(),
        }
    }

    pub fn from_json(s: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(s).context("Failed to parse bingo config")?;
        config.validate().context("Invalid bingo config")?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.build().map(|_| ())
    }

    pub fn build(&self) -> Result<Run> {
        let block_circles = BlockCircleCoordinate::new(self.course, self.bonus)?;
        let layout = self
            .initial_layout
            .iter()
            .map(|p| (p.coord(), p.color))
            .collect::<Vec<_>>();
        let cross_circles = CrossCircleCoordinate::with_layout(&layout)?;
        let mut board = BoardGraph::standard();
        board.place_blocks_from(&cross_circles)?;
        info!(
            "{} course, bonus circle {}, {} blocks on the intersections",
            self.course,
            self.bonus,
            cross_circles.open().count()
        );
        Ok(Run {
            board,
            block_circles,
            cross_circles,
            translator: RouteTranslator::new(self.course),
        })
    }
}

/// Board state for one run, discarded when the run ends.
#[derive(Debug, Clone)]
pub struct Run {
    pub board: BoardGraph,
    pub block_circles: BlockCircleCoordinate,
    pub cross_circles: CrossCircleCoordinate,
    pub translator: RouteTranslator,
}

impl Run {
    /// Records a block carried from the intersection `from` to the block
    /// circle at `to`.
    pub fn confirm_delivery(&mut self, from: Coord, to: Coord) -> Result<()> {
        self.cross_circles.move_block(from)?;
        self.board.clear_block(BoardGraph::node_id(from)?)?;
        self.block_circles.move_block(to);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn defaults_to_the_standard_layout() {
        let config = BingoConfig::from_json(r#"{"course": "left", "bonus": 3}"#).unwrap();
        assert_eq!(config, BingoConfig::new(Course::Left, 3));
        let run = config.build().unwrap();
        assert_eq!(run.cross_circles, CrossCircleCoordinate::new());
        assert_eq!(run.board.block_color(0).unwrap(), Color::Black);
        assert_eq!(run.translator, RouteTranslator::new(Course::Left));
    }

    #[test]
    fn custom_layout_is_used() {
        let json = r#"{
            "course": "right",
            "bonus": 8,
            "initial_layout": [
                {"row": 0, "col": 1, "color": "red"},
                {"row": 3, "col": 2, "color": "black"}
            ]
        }"#;
        let run = BingoConfig::from_json(json).unwrap().build().unwrap();
        assert_eq!(run.cross_circles.open().count(), 2);
        assert_eq!(
            run.cross_circles.color(Coord::new(3, 2)).unwrap(),
            Color::Black
        );
        assert_eq!(run.block_circles.course(), Course::Right);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(BingoConfig::from_json(r#"{"course": "left", "bonus": 0}"#).is_err());
        assert!(BingoConfig::from_json(r#"{"course": "up", "bonus": 1}"#).is_err());
        let config = BingoConfig {
            initial_layout: vec![Placement {
                row: 4,
                col: 0,
                color: Color::Red,
            }],
            ..BingoConfig::new(Course::Left, 1)
        };
        assert_eq!(config.validate(), Err(Error::OutOfGrid(Coord::new(4, 0))));
    }

    #[test]
    fn rejects_a_layout_with_a_repeated_coordinate() {
        let json = r#"{
            "course": "Left",
            "bonus": 1,
            "initial_layout": [
                {"row": 1, "col": 1, "color": "red"},
                {"row": 1, "col": 1, "color": "blue"}
            ]
        }"#;
        let err = BingoConfig::from_json(json).unwrap_err();
        assert_eq!(
            err.downcast_ref::<Error>(),
            Some(&Error::DuplicatePlacement(Coord::new(1, 1)))
        );
    }

    #[test]
    fn confirm_delivery_updates_every_tracker() {
        let mut run = BingoConfig::new(Course::Left, 2).build().unwrap();
        let from = Coord::new(3, 1);
        let to = run.block_circles.circle_to_put(Color::Red).unwrap();
        run.confirm_delivery(from, to).unwrap();
        assert!(!run.cross_circles.is_open(from));
        assert_eq!(run.board.block_color(13).unwrap(), Color::None);
        assert_ne!(run.block_circles.circle_to_put(Color::Red), Some(to));
        assert_eq!(
            run.confirm_delivery(from, to),
            Err(Error::NoBlock(from))
        );
    }
}
