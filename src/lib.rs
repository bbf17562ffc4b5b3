// # Block Bingo: board bookkeeping and command synthesis
//
// This crate holds the core of the robot's block bingo run. It keeps track of
// which intersections and block circles hold which colored block, keeps the
// costed line graph the route solver reads, and turns a solved route into the
// instruction string sent to the robot.
//
// The route solver and the radio link are external; they plug in through
// `planner::RouteSolver` and `transport::Transport`.

/// The shared block/circle color tag.
pub mod color;

/// Error type for invalid arguments.
pub mod error;

/// Coordinates, facings and turn classification.
pub mod geom;

/// Instruction tokens and instruction sequences.
pub mod instructions;

/// Left/right course layouts.
pub mod course;

/// Intersection graph with costed lines.
pub mod board;

/// Block circle and intersection occupancy.
pub mod circles;

/// Route to instruction translation.
pub mod translator;

/// Run configuration.
pub mod config;

/// Black block route planning against an external solver.
pub mod planner;

/// Sending instructions to the robot.
pub mod transport;

/// Text sketches of the board.
pub mod render;

/// SVG view of the board and a route.
pub mod svg;

pub use board::{BoardGraph, Side};
pub use circles::{BlockCircleCoordinate, CrossCircleCoordinate};
pub use color::Color;
pub use config::{BingoConfig, Run};
pub use course::Course;
pub use error::{Error, Result};
pub use geom::{Coord, Direction, Turn, Vec2};
pub use instructions::{Instruction, Instructions};
pub use translator::RouteTranslator;
