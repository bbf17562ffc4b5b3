//! The 4x4 lattice of intersection circles and the lines between them.
//!
//! Nodes are numbered row-major, `row * 4 + col`. Lines live in one arena
//! owned by [`BoardGraph`]; both endpoints of a line refer to the same arena
//! slot, so a cost written through one node is seen from the other.

use log::debug;

use crate::circles::{CrossCircleCoordinate, GRID_SIZE};
use crate::color::Color;
use crate::error::{Error, Result};
use crate::geom::Coord;

pub const NODE_COUNT: usize = 16;

/// Intrinsic colors of the intersection circles, row-major.
pub const STANDARD_NODE_COLORS: [Color; NODE_COUNT] = {
    use Color::{Blue as B, Green as G, Red as R, Yellow as Y};
    [R, R, B, B, R, R, B, B, Y, Y, G, G, Y, Y, G, G]
};

pub const DEFAULT_LINE_COST: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
    Up,
    Down,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Left, Side::Right, Side::Up, Side::Down];

    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
            Side::Up => Side::Down,
            Side::Down => Side::Up,
        }
    }

    /// `(drow, dcol)` towards the neighbor on this side.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Side::Left => (0, -1),
            Side::Right => (0, 1),
            Side::Up => (-1, 0),
            Side::Down => (1, 0),
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    /// Endpoint nodes, the upper-left one first.
    pub ends: (usize, usize),
    pub cost: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    color: Color,
    block: Color,
    /// Line ids indexed by [`Side`].
    lines: [Option<usize>; 4],
}

impl Node {
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn block(&self) -> Color {
        self.block
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardGraph {
    nodes: Vec<Node>,
    lines: Vec<Line>,
}

impl Default for BoardGraph {
    fn default() -> Self {
        Self::standard()
    }
}

impl BoardGraph {
    pub fn standard() -> Self {
        Self::build(STANDARD_NODE_COLORS)
    }

    pub fn build(color_layout: [Color; NODE_COUNT]) -> Self {
        let mut nodes = color_layout
            .iter()
            .map(|&color| Node {
                color,
                block: Color::None,
                lines: [None; 4],
            })
            .collect::<Vec<_>>();
        let mut lines = vec![];
        for u in 0..NODE_COUNT {
            // Wiring only rightwards and downwards yields each pair once.
            for side in [Side::Right, Side::Down] {
                let Some(v) = neighbor_index(u, side) else {
                    continue;
                };
                let id = lines.len();
                lines.push(Line {
                    ends: (u, v),
                    cost: DEFAULT_LINE_COST,
                });
                nodes[u].lines[side.slot()] = Some(id);
                nodes[v].lines[side.opposite().slot()] = Some(id);
            }
        }
        Self { nodes, lines }
    }

    pub fn node_id(c: Coord) -> Result<usize> {
        if !(0..GRID_SIZE).contains(&c.row) || !(0..GRID_SIZE).contains(&c.col) {
            return Err(Error::OutOfGrid(c));
        }
        Ok((c.row * GRID_SIZE + c.col) as usize)
    }

    pub fn node_coord(node: usize) -> Result<Coord> {
        if node >= NODE_COUNT {
            return Err(Error::NodeIndex(node));
        }
        Ok(Coord::new(node as i32 / GRID_SIZE, node as i32 % GRID_SIZE))
    }

    pub fn node(&self, node: usize) -> Result<&Node> {
        self.nodes.get(node).ok_or(Error::NodeIndex(node))
    }

    fn node_mut(&mut self, node: usize) -> Result<&mut Node> {
        self.nodes.get_mut(node).ok_or(Error::NodeIndex(node))
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn block_color(&self, node: usize) -> Result<Color> {
        Ok(self.node(node)?.block)
    }

    pub fn set_block_color(&mut self, node: usize, color: Color) -> Result<()> {
        self.node_mut(node)?.block = color;
        Ok(())
    }

    pub fn clear_block(&mut self, node: usize) -> Result<()> {
        self.set_block_color(node, Color::None)
    }

    /// Id of the line leaving `node` on `side`, `None` at the board edge.
    pub fn line_id(&self, node: usize, side: Side) -> Result<Option<usize>> {
        Ok(self.node(node)?.lines[side.slot()])
    }

    pub fn neighbor(&self, node: usize, side: Side) -> Result<Option<usize>> {
        Ok(self.line_id(node, side)?.map(|id| {
            let (a, b) = self.lines[id].ends;
            if a == node { b } else { a }
        }))
    }

    pub fn line_cost(&self, node: usize, side: Side) -> Result<Option<u32>> {
        Ok(self.line_id(node, side)?.map(|id| self.lines[id].cost))
    }

    /// Sets the cost of the line on `side` of `node`. Returns `false` without
    /// touching anything when there is no line on that side, whatever the
    /// cost.
    pub fn set_line_cost(&mut self, node: usize, side: Side, cost: u32) -> Result<bool> {
        let Some(id) = self.line_id(node, side)? else {
            return Ok(false);
        };
        if cost == 0 {
            return Err(Error::ZeroCost);
        }
        debug!("line {:?} cost {} -> {}", self.lines[id].ends, self.lines[id].cost, cost);
        self.lines[id].cost = cost;
        Ok(true)
    }

    /// Copies the blocks currently tracked by `cross` onto the nodes.
    pub fn place_blocks_from(&mut self, cross: &CrossCircleCoordinate) -> Result<()> {
        for node in 0..NODE_COUNT {
            let color = cross.color(Self::node_coord(node)?)?;
            self.set_block_color(node, color)?;
        }
        Ok(())
    }
}

fn neighbor_index(node: usize, side: Side) -> Option<usize> {
    let (dr, dc) = side.offset();
    let row = node as i32 / GRID_SIZE + dr;
    let col = node as i32 % GRID_SIZE + dc;
    BoardGraph::node_id(Coord::new(row, col)).ok()
}
