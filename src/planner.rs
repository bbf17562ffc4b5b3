use anyhow::Context;
use itertools::Itertools;
use log::info;

use crate::circles::BlockCircleCoordinate;
use crate::course::Course;
use crate::geom::{Coord, Vec2};
use crate::instructions::Instructions;
use crate::translator::RouteTranslator;

/// Decides which block circles the robot visits, and in what order, to carry
/// the black block to the bonus circle.
pub trait RouteSolver {
    /// Returns the visiting order as `(row, col)` block circle coordinates.
    /// Consecutive points must be 4-adjacent.
    fn solve(
        &self,
        bonus: u8,
        black: u8,
        color: u8,
        course: Course,
    ) -> anyhow::Result<Vec<(i32, i32)>>;
}

impl<F> RouteSolver for F
where
    F: Fn(u8, u8, u8, Course) -> anyhow::Result<Vec<(i32, i32)>>,
{
    fn solve(
        &self,
        bonus: u8,
        black: u8,
        color: u8,
        course: Course,
    ) -> anyhow::Result<Vec<(i32, i32)>> {
        self(bonus, black, color, course)
    }
}

/// Builds the command string for the black block run.
pub struct BlackBlockPlanner<S> {
    solver: S,
    circles: BlockCircleCoordinate,
    translator: RouteTranslator,
    black: u8,
    color: u8,
}

impl<S: RouteSolver> BlackBlockPlanner<S> {
    /// `black` and `color` are the block circles holding the black block and
    /// the color block.
    pub fn new(
        solver: S,
        course: Course,
        bonus: u8,
        black: u8,
        color: u8,
    ) -> anyhow::Result<Self> {
        let circles = BlockCircleCoordinate::new(course, bonus)?;
        circles.get(black).context("Invalid black block circle")?;
        circles.get(color).context("Invalid color block circle")?;
        Ok(Self {
            solver,
            circles,
            translator: RouteTranslator::new(course),
            black,
            color,
        })
    }

    pub fn translator(&self) -> &RouteTranslator {
        &self.translator
    }

    /// The solver's route, moved into the robot frame.
    pub fn route(&self) -> anyhow::Result<Vec<Vec2>> {
        let course = self.circles.course();
        let route = self
            .solver
            .solve(self.circles.bonus(), self.black, self.color, course)
            .context("Route solver failed")?;
        info!(
            "route: {}",
            route.iter().map(|&(r, c)| format!("({},{})", r, c)).join(" ")
        );
        Ok(route
            .into_iter()
            .map(|p| Coord::from(p).to_robot_frame())
            .collect())
    }

    pub fn commands(&mut self) -> anyhow::Result<Instructions> {
        let route = self.route()?;
        let course = self.circles.course();
        let commands = self
            .translator
            .generate_commands(&route, course, &self.circles)
            .context("Failed to translate route")?;
        info!("commands: {}", commands);
        Ok(commands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::geom::Direction;

    struct FixedRoute(Vec<(i32, i32)>);

    impl RouteSolver for FixedRoute {
        fn solve(&self, _: u8, _: u8, _: u8, _: Course) -> anyhow::Result<Vec<(i32, i32)>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn solver_route_is_swapped_into_the_robot_frame() {
        let solver = FixedRoute(vec![(1, 0), (2, 0), (2, 1)]);
        let planner = BlackBlockPlanner::new(solver, Course::Left, 7, 4, 6).unwrap();
        assert_eq!(
            planner.route().unwrap(),
            vec![Vec2::new(0, 1), Vec2::new(0, 2), Vec2::new(1, 2)]
        );
    }

    #[test]
    fn commands_from_a_fixed_route() {
        // Starts on circle 4, goes down to 6 then right to 7.
        let solver = FixedRoute(vec![(1, 0), (2, 0), (2, 1)]);
        let mut planner = BlackBlockPlanner::new(solver, Course::Left, 7, 4, 6).unwrap();
        let commands = planner.commands().unwrap();
        assert_eq!(commands.to_string(), "arslpq");
        assert_eq!(planner.translator().facing(), Direction::East);
    }

    #[test]
    fn closures_are_solvers() {
        let solver = |bonus: u8,
                      _black: u8,
                      _color: u8,
                      course: Course|
         -> anyhow::Result<Vec<(i32, i32)>> {
            assert_eq!(course, Course::Right);
            let to = BlockCircleCoordinate::new(course, bonus)?.get(bonus)?;
            Ok(vec![(1, 2), (to.row, to.col)])
        };
        let mut planner = BlackBlockPlanner::new(solver, Course::Right, 8, 5, 1).unwrap();
        // Circle 5 (1,2) down to circle 8 (2,2): facing west, turn left.
        assert_eq!(planner.commands().unwrap().to_string(), "clpq");
    }

    #[test]
    fn errors_keep_their_cause() {
        assert!(BlackBlockPlanner::new(FixedRoute(vec![]), Course::Left, 1, 9, 2).is_err());
        let solver = FixedRoute(vec![(0, 0), (2, 2)]);
        let mut planner = BlackBlockPlanner::new(solver, Course::Left, 1, 2, 3).unwrap();
        let err = planner.commands().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::NotAdjacent { .. })
        ));
    }
}
