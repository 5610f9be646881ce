//! Occupancy grid storage and move validity filtering

use std::ops::Deref;

use itertools::iproduct;
use nalgebra as na;

use crate::common::{GridNode, PlanningError, PlanningResult};
use crate::path_planning::action::Action;

/// Static 2D boolean occupancy map
///
/// Wraps an `N x M` matrix of cells, `0` free and `1` occupied. A cell
/// `(x, y)` addresses row `x` and column `y`, so `0 <= x < N` and
/// `0 <= y < M`. The grid is immutable for the duration of a search.
pub struct OccupancyGrid {
    cells: na::DMatrix<u8>,
}

impl OccupancyGrid {
    /// Build a grid from an occupancy matrix, rejecting cell values
    /// other than 0 and 1
    pub fn new(cells: na::DMatrix<u8>) -> PlanningResult<Self> {
        for (x, y) in iproduct!(0..cells.nrows(), 0..cells.ncols()) {
            let v = cells[(x, y)];
            if v > 1 {
                return Err(PlanningError::GridError(format!(
                    "cell value {} at ({}, {})",
                    v, x, y
                )));
            }
        }
        Ok(Self { cells })
    }

    /// Extent of the x (row) dimension
    pub fn x_width(&self) -> i32 {
        self.cells.nrows() as i32
    }

    /// Extent of the y (column) dimension
    pub fn y_width(&self) -> i32 {
        self.cells.ncols() as i32
    }

    pub fn in_bounds(&self, node: GridNode) -> bool {
        node.x >= 0 && node.x < self.x_width() && node.y >= 0 && node.y < self.y_width()
    }

    /// True if the cell is in bounds and occupied
    pub fn is_occupied(&self, node: GridNode) -> bool {
        self.in_bounds(node) && self.cells[(node.x as usize, node.y as usize)] == 1
    }

    /// True if the cell is in bounds and free
    pub fn is_free(&self, node: GridNode) -> bool {
        self.in_bounds(node) && self.cells[(node.x as usize, node.y as usize)] == 0
    }

    /// Actions from `node` whose destination cell is in bounds and free
    ///
    /// Each of the 8 directions is gated only by its own destination
    /// cell. In particular a diagonal move is not rejected when one of
    /// its two adjacent orthogonal cells is blocked; cutting past a
    /// single blocked orthogonal neighbor is allowed. Reference
    /// behavior depends on this, so keep it when touching this code.
    pub fn valid_actions(&self, node: GridNode) -> Vec<Action> {
        Action::ALL
            .iter()
            .copied()
            .filter(|action| {
                let (dx, dy) = action.delta();
                self.is_free(node.offset(dx, dy))
            })
            .collect()
    }

    /// Coordinates of every occupied cell, for plotting
    pub fn occupied_cells(&self) -> Vec<GridNode> {
        iproduct!(0..self.x_width(), 0..self.y_width())
            .map(|(x, y)| GridNode::new(x, y))
            .filter(|&n| self.is_occupied(n))
            .collect()
    }
}

impl Deref for OccupancyGrid {
    type Target = na::DMatrix<u8>;

    fn deref(&self) -> &Self::Target {
        &self.cells
    }
}
