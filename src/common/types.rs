//! Common types used throughout grid_planner

/// Grid cell coordinate for graph-based planners
///
/// `x` is the row index, `y` the column index of the occupancy grid.
/// The derived `Ord` compares `x` first, then `y`, which is what the
/// frontier relies on for deterministic tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GridNode {
    pub x: i32,
    pub y: i32,
}

impl GridNode {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell reached by applying the delta `(dx, dy)` to this cell
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl From<(i32, i32)> for GridNode {
    fn from(tuple: (i32, i32)) -> Self {
        Self {
            x: tuple.0,
            y: tuple.1,
        }
    }
}

/// Path represented as a sequence of grid cells, start to goal inclusive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridPath {
    pub nodes: Vec<GridNode>,
}

impl GridPath {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn from_nodes(nodes: Vec<GridNode>) -> Self {
        Self { nodes }
    }

    pub fn push(&mut self, node: GridNode) {
        self.nodes.push(node);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn x_coords(&self) -> Vec<i32> {
        self.nodes.iter().map(|n| n.x).collect()
    }

    pub fn y_coords(&self) -> Vec<i32> {
        self.nodes.iter().map(|n| n.y).collect()
    }
}

impl Default for GridPath {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of a planning call
///
/// An unreachable goal is a terminal state of the search, not an error,
/// so it gets its own variant rather than an empty-looking path. This
/// keeps "start equals goal" (a one-node `Found` path with zero cost)
/// distinguishable from "no path exists".
#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    /// A path was found, start to goal inclusive, with its total cost
    Found { path: GridPath, cost: f64 },
    /// The frontier was exhausted without reaching the goal
    Unreachable,
}

impl PlanOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, PlanOutcome::Found { .. })
    }

    pub fn path(&self) -> Option<&GridPath> {
        match self {
            PlanOutcome::Found { path, .. } => Some(path),
            PlanOutcome::Unreachable => None,
        }
    }

    pub fn cost(&self) -> Option<f64> {
        match self {
            PlanOutcome::Found { cost, .. } => Some(*cost),
            PlanOutcome::Unreachable => None,
        }
    }
}
