use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Circle, Path, Rectangle, Text};

use crate::board::BoardGraph;
use crate::circles::{BLOCK_CIRCLES, BlockCircleCoordinate, GRID_SIZE};
use crate::geom::{Coord, Vec2};

const SPACING: f64 = 120.0;
const MARGIN: f64 = 40.0;
const NODE_RADIUS: f64 = 14.0;
const CIRCLE_RADIUS: f64 = 28.0;

fn node_position(c: Coord) -> (f64, f64) {
    (
        MARGIN + c.col as f64 * SPACING,
        MARGIN + c.row as f64 * SPACING,
    )
}

/// Center of the block circle whose robot-frame coordinate is `p`.
fn circle_position(p: Vec2) -> (f64, f64) {
    (
        MARGIN + (p.x as f64 + 0.5) * SPACING,
        MARGIN + (p.y as f64 + 0.5) * SPACING,
    )
}

/// Renders the board: lines (raised costs written next to them), intersections filled
/// with their own color and a square for the block on them, block circles in
/// their target color (dashed once resolved), and `path` as a polyline over
/// the block circles.
pub fn render(board: &BoardGraph, circles: &BlockCircleCoordinate, path: &[Vec2]) -> String {
    let size = 2.0 * MARGIN + (GRID_SIZE - 1) as f64 * SPACING;
    let mut document = Document::new()
        .set("width", size)
        .set("height", size)
        .set("viewBox", (0.0, 0.0, size, size));

    // Draw lines
    for line in board.lines() {
        let (a, b) = line.ends;
        let (Ok(ca), Ok(cb)) = (BoardGraph::node_coord(a), BoardGraph::node_coord(b)) else {
            continue;
        };
        let p1 = node_position(ca);
        let p2 = node_position(cb);
        let data = Data::new().move_to(p1).line_to(p2);
        let path = Path::new()
            .set("fill", "none")
            .set("stroke", "black")
            .set("stroke-width", 1 + line.cost.min(8) as i32)
            .set("d", data)
            .set("title", format!("{} <-> {} cost {}", a, b, line.cost));
        document = document.add(path);
        if line.cost != 1 {
            let text = Text::new(line.cost.to_string())
                .set("x", (p1.0 + p2.0) / 2.0 + 6.0)
                .set("y", (p1.1 + p2.1) / 2.0 - 6.0)
                .set("font-size", "14px");
            document = document.add(text);
        }
    }

    // Draw block circles
    for (i, &c) in BLOCK_CIRCLES.iter().enumerate() {
        let number = i as u8 + 1;
        let (x, y) = circle_position(c.to_robot_frame());
        let color = circles.target_color(number).unwrap_or_default();
        let open = circles.is_open(number).unwrap_or(false);
        let mut circle = Circle::new()
            .set("cx", x)
            .set("cy", y)
            .set("r", CIRCLE_RADIUS)
            .set("fill", color.fill())
            .set("stroke", "black")
            .set("stroke-width", if number == circles.bonus() { 4 } else { 2 })
            .set("title", format!("Circle {}, {:?}", number, color));
        if !open {
            circle = circle.set("stroke-dasharray", "4 4");
        }
        document = document.add(circle);
        let text = Text::new(number.to_string())
            .set("x", x)
            .set("y", y + 7.0)
            .set("text-anchor", "middle")
            .set("font-size", "20px");
        document = document.add(text);
    }

    // Draw intersections
    for (id, node) in board.nodes().iter().enumerate() {
        let Ok(c) = BoardGraph::node_coord(id) else {
            continue;
        };
        let (x, y) = node_position(c);
        let circle = Circle::new()
            .set("cx", x)
            .set("cy", y)
            .set("r", NODE_RADIUS)
            .set("fill", node.color().fill())
            .set("stroke", "black")
            .set("stroke-width", 2)
            .set("title", format!("Node {} {}", id, c));
        document = document.add(circle);
        if node.block().is_block() {
            let block = Rectangle::new()
                .set("x", x - NODE_RADIUS / 2.0)
                .set("y", y - NODE_RADIUS / 2.0)
                .set("width", NODE_RADIUS)
                .set("height", NODE_RADIUS)
                .set("fill", node.block().fill())
                .set("stroke", "black")
                .set("title", format!("{:?} block", node.block()));
            document = document.add(block);
        }
    }

    // Draw the route
    if let Some((&first, rest)) = path.split_first() {
        let mut data = Data::new().move_to(circle_position(first));
        for &p in rest {
            data = data.line_to(circle_position(p));
        }
        let route = Path::new()
            .set("fill", "none")
            .set("stroke", "#ff0000")
            .set("stroke-opacity", 0.6)
            .set("stroke-width", 6)
            .set("d", data);
        document = document.add(route);
    }

    document.to_string()
}
