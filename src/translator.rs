//! Turns a planned path into the instruction sequence the robot runs.

use itertools::Itertools;
use log::debug;

use crate::circles::BlockCircleCoordinate;
use crate::course::Course;
use crate::error::{Error, Result};
use crate::geom::{Direction, Vec2};
use crate::instructions::{Instruction, Instructions};

/// Keeps the robot's facing across translated routes on one course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteTranslator {
    course: Course,
    facing: Direction,
}

impl RouteTranslator {
    /// Starts with the facing the robot has when it reaches the bingo area
    /// on `course`.
    pub fn new(course: Course) -> Self {
        Self::with_facing(course, course.initial_facing())
    }

    pub fn with_facing(course: Course, facing: Direction) -> Self {
        Self { course, facing }
    }

    pub fn course(&self) -> Course {
        self.course
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    /// Translates `path` (robot frame, one point per block circle visited)
    /// into instructions ending with the put maneuver.
    ///
    /// `course` and the course of `circles` must be the translator's own.
    /// On error nothing is returned and the facing is left unchanged.
    pub fn generate_commands(
        &mut self,
        path: &[Vec2],
        course: Course,
        circles: &BlockCircleCoordinate,
    ) -> Result<Instructions> {
        for got in [course, circles.course()] {
            if got != self.course {
                return Err(Error::CourseMismatch {
                    expected: self.course,
                    got,
                });
            }
        }
        if path.len() < 2 {
            return Err(Error::PathTooShort(path.len()));
        }
        let mut commands = Instructions::new();
        commands.push(entry_instruction(path[0], course, circles)?);

        let mut facing = self.facing;
        for (&from, &to) in path.iter().tuple_windows() {
            let (turn, next) = step(facing, from, to)?;
            debug!("{} -> {}: {:?} then straight", from, to, turn);
            commands.extend(turn);
            commands.push(Instruction::Straight);
            facing = next;
        }
        commands.finish_with_put();
        let commands = commands.compress();

        self.facing = facing;
        debug!("route of {} points -> {}", path.len(), commands);
        Ok(commands)
    }
}

/// Which lane the robot enters by. The near lane is the one in front of the
/// course's entry circle; every other start uses the far lane.
pub fn entry_instruction(
    first: Vec2,
    course: Course,
    circles: &BlockCircleCoordinate,
) -> Result<Instruction> {
    let layout = course.layout();
    let lane = circles.get(layout.entry_circle)?.to_robot_frame();
    Ok(if first == lane {
        layout.entry_near
    } else {
        layout.entry_far
    })
}

/// One move between adjacent points: the spin needed first, if any, and the
/// facing afterwards.
pub fn step(facing: Direction, from: Vec2, to: Vec2) -> Result<(Option<Instruction>, Direction)> {
    if from.manhattan(to) != 1 {
        return Err(Error::NotAdjacent { from, to });
    }
    let movement = Direction::from_vector(to - from)?;
    Ok((facing.turn_to(movement).instruction(), movement))
}
