//! Heuristics for 8-connected grid search
//!
//! Both heuristics here are admissible and consistent for the 10/14
//! cost model, which the planner's first-touch closing policy requires.
//! Admissibility is a caller contract for custom heuristics and is not
//! checked at runtime.

use crate::common::GridNode;
use crate::path_planning::action::CostModel;

/// Octile distance under the given cost model
///
/// Exact remaining cost on an obstacle-free 8-connected grid: take the
/// diagonal as often as possible, then go straight.
pub fn octile(node: GridNode, goal: GridNode, costs: &CostModel) -> f64 {
    let dx = (node.x - goal.x).abs() as f64;
    let dy = (node.y - goal.y).abs() as f64;
    let d_min = dx.min(dy);
    let d_max = dx.max(dy);
    costs.diagonal * d_min + costs.orthogonal * (d_max - d_min)
}

/// Unscaled euclidean distance in cells
///
/// A weak heuristic (at most ~sqrt(2) per remaining step against a
/// step cost of 10) but admissible and consistent under any cost model
/// with step costs >= sqrt(2).
pub fn euclidean(node: GridNode, goal: GridNode) -> f64 {
    let dx = (node.x - goal.x) as f64;
    let dy = (node.y - goal.y) as f64;
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_octile_straight_line() {
        let costs = CostModel::default();
        let h = octile(GridNode::new(0, 0), GridNode::new(0, 4), &costs);
        assert!((h - 40.0).abs() < 1e-10);
    }

    #[test]
    fn test_octile_pure_diagonal() {
        let costs = CostModel::default();
        let h = octile(GridNode::new(0, 0), GridNode::new(4, 4), &costs);
        assert!((h - 56.0).abs() < 1e-10);
    }

    #[test]
    fn test_octile_mixed() {
        let costs = CostModel::default();
        // 2 diagonal steps + 3 straight steps
        let h = octile(GridNode::new(0, 0), GridNode::new(2, 5), &costs);
        assert!((h - (2.0 * 14.0 + 3.0 * 10.0)).abs() < 1e-10);
    }

    #[test]
    fn test_euclidean_never_exceeds_octile() {
        let costs = CostModel::default();
        for x in -3..4 {
            for y in -3..4 {
                let n = GridNode::new(x, y);
                let g = GridNode::new(0, 0);
                assert!(euclidean(n, g) <= octile(n, g, &costs) + 1e-9);
            }
        }
    }
}
