use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::geom::Direction;
use crate::instructions::Instruction;

/// Which side of the competition field the robot runs on. Parsed without
/// regard to case, both from strings and from config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Course {
    Left,
    Right,
}

/// Compiled-in layout data for one course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseLayout {
    pub course: Course,
    pub name: &'static str,
    /// Target color of block circles 1..=8.
    pub circle_colors: [Color; 8],
    /// Facing of the robot when it reaches the bingo area.
    pub facing: Direction,
    /// Block circle that sits in front of the near entry lane.
    pub entry_circle: u8,
    /// Entry used when the route starts at `entry_circle`.
    pub entry_near: Instruction,
    /// Entry used otherwise.
    pub entry_far: Instruction,
}

const COURSES: &[CourseLayout] = &[
    CourseLayout {
        course: Course::Left,
        name: "left",
        circle_colors: [
            Color::Yellow,
            Color::Green,
            Color::Red,
            Color::Blue,
            Color::Yellow,
            Color::Green,
            Color::Red,
            Color::Blue,
        ],
        facing: Direction::East,
        entry_circle: 4,
        entry_near: Instruction::EnterL4,
        entry_far: Instruction::EnterL6,
    },
    CourseLayout {
        course: Course::Right,
        name: "right",
        circle_colors: [
            Color::Red,
            Color::Green,
            Color::Yellow,
            Color::Yellow,
            Color::Blue,
            Color::Blue,
            Color::Red,
            Color::Green,
        ],
        facing: Direction::West,
        entry_circle: 5,
        entry_near: Instruction::EnterR5,
        entry_far: Instruction::EnterR8,
    },
];

pub fn all_courses() -> &'static [CourseLayout] {
    COURSES
}

pub fn get_course(name: &str) -> Option<&'static CourseLayout> {
    COURSES.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

impl Course {
    pub fn layout(self) -> &'static CourseLayout {
        match self {
            Course::Left => &COURSES[0],
            Course::Right => &COURSES[1],
        }
    }

    pub fn initial_facing(self) -> Direction {
        self.layout().facing
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.layout().name)
    }
}

impl FromStr for Course {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        get_course(s)
            .map(|c| c.course)
            .ok_or_else(|| anyhow::anyhow!("Unknown course: {}", s))
    }
}

impl TryFrom<String> for Course {
    type Error = anyhow::Error;

    fn try_from(s: String) -> anyhow::Result<Self> {
        s.parse()
    }
}
