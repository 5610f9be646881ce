//! Common traits defining interfaces for grid planners

use crate::common::error::PlanningResult;
use crate::common::types::{GridNode, PlanOutcome};

/// Trait for grid-based path planning algorithms
pub trait GridPathPlanner {
    /// Plan a path between two grid cells
    ///
    /// Returns `Err` for invalid inputs (off-grid or occupied endpoints),
    /// `Ok(PlanOutcome::Unreachable)` when no path exists.
    fn plan(&self, start: GridNode, goal: GridNode) -> PlanningResult<PlanOutcome>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::types::GridPath;

    struct DummyPlanner;

    impl GridPathPlanner for DummyPlanner {
        fn plan(&self, start: GridNode, _goal: GridNode) -> PlanningResult<PlanOutcome> {
            Ok(PlanOutcome::Found {
                path: GridPath::from_nodes(vec![start]),
                cost: 0.0,
            })
        }
    }

    #[test]
    fn test_grid_path_planner_trait() {
        let planner = DummyPlanner;
        let result = planner.plan(GridNode::new(0, 0), GridNode::new(1, 1));
        assert!(result.is_ok());
    }
}
