//! A* path planning on an 8-connected occupancy grid
//!
//! Two cost models share the same frontier/backpointer machinery:
//! - plain additive cost (orthogonal 10 / diagonal 14 by default),
//! - a variant that adds a penalty whenever the direction of travel
//!   changes, which discourages equal-cost zig-zag paths and tightens
//!   pruning along straight corridors.
//!
//! The penalized variant searches an augmented state
//! `(node, had_direction_change)`. The full history-accurate state
//! would be "node + last delta used" (9 possibilities per node); since
//! all direction changes cost the same, it is collapsed to a boolean
//! recording whether a penalty was paid on entry. A node can therefore
//! be expanded at most twice, once per flag value, bounding the state
//! space at `2 * N * M`.
//!
//! Both variants close a state the first time it is discovered and
//! never reopen it. That policy is only cost-optimal when the
//! heuristic is consistent (monotone), not merely admissible; the
//! built-in octile heuristic is consistent for its cost model, and
//! callers supplying their own heuristic must honor the same contract.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use ordered_float::NotNan;

use crate::common::{
    GridNode, GridPath, GridPathPlanner, PlanOutcome, PlanningError, PlanningResult,
};
use crate::path_planning::action::{Action, CostModel};
use crate::path_planning::heuristic;
use crate::utils::OccupancyGrid;

/// Configuration for the A* planner
#[derive(Debug, Clone)]
pub struct AStarConfig {
    /// Movement cost constants
    pub costs: CostModel,
    /// Penalty added whenever a move's delta differs from the previous
    /// move's delta; `None` selects the plain-cost variant
    pub direction_change_penalty: Option<f64>,
}

impl Default for AStarConfig {
    fn default() -> Self {
        Self {
            costs: CostModel::default(),
            direction_change_penalty: None,
        }
    }
}

/// Backpointer entry for the plain variant, keyed by node
///
/// The action doubles as the backpointer: the predecessor is the node
/// minus the action's delta.
#[derive(Debug, Clone, Copy)]
struct Branch {
    cost: f64,
    action: Action,
}

/// Visited/branch key of the penalized variant
type PenalizedKey = (GridNode, bool);

/// Backpointer entry for the penalized variant, keyed by `(node, flag)`
///
/// The predecessor key is the node minus the action's delta, paired
/// with the flag the predecessor was reached under.
#[derive(Debug, Clone, Copy)]
struct PenalizedBranch {
    cost: f64,
    parent_had_change: bool,
    action: Action,
}

/// Frontier state of the penalized variant
///
/// `last_action` rides along only to decide the next penalty; dedup
/// uses `(node, had_change)`. The derived `Ord` (node, then flag, then
/// action with `None` first) breaks priority ties deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct PenalizedState {
    node: GridNode,
    had_change: bool,
    last_action: Option<Action>,
}

/// A* path planner over a static occupancy grid
pub struct AStarPlanner {
    grid: OccupancyGrid,
    config: AStarConfig,
}

impl AStarPlanner {
    pub fn new(grid: OccupancyGrid, config: AStarConfig) -> Self {
        AStarPlanner { grid, config }
    }

    /// Plain-cost planner with the default 10/14 cost model
    pub fn with_default_config(grid: OccupancyGrid) -> Self {
        Self::new(grid, AStarConfig::default())
    }

    /// Get reference to the occupancy grid
    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    /// Plan with the built-in octile heuristic
    pub fn plan(&self, start: GridNode, goal: GridNode) -> PlanningResult<PlanOutcome> {
        let costs = self.config.costs;
        self.plan_with_heuristic(start, goal, move |n, g| heuristic::octile(n, g, &costs))
    }

    /// Plan with a caller-supplied heuristic
    ///
    /// The heuristic must be admissible for cost-optimality and
    /// consistent for the first-touch closing policy to stay correct;
    /// neither property is checked at runtime.
    pub fn plan_with_heuristic<H>(
        &self,
        start: GridNode,
        goal: GridNode,
        h: H,
    ) -> PlanningResult<PlanOutcome>
    where
        H: Fn(GridNode, GridNode) -> f64,
    {
        self.validate(start, goal)?;

        if start == goal {
            return Ok(PlanOutcome::Found {
                path: GridPath::from_nodes(vec![start]),
                cost: 0.0,
            });
        }

        match self.config.direction_change_penalty {
            None => self.plan_plain(start, goal, &h),
            Some(penalty) => self.plan_penalized(start, goal, penalty, &h),
        }
    }

    /// Plan a path returning (x, y) coordinate vectors (legacy interface)
    pub fn planning(&self, sx: i32, sy: i32, gx: i32, gy: i32) -> Option<(Vec<i32>, Vec<i32>)> {
        match self.plan(GridNode::new(sx, sy), GridNode::new(gx, gy)) {
            Ok(PlanOutcome::Found { path, .. }) => Some((path.x_coords(), path.y_coords())),
            _ => None,
        }
    }

    fn validate(&self, start: GridNode, goal: GridNode) -> PlanningResult<()> {
        if !self.grid.is_free(start) {
            return Err(PlanningError::InvalidParameter(format!(
                "start ({}, {}) is off-grid or occupied",
                start.x, start.y
            )));
        }
        if !self.grid.is_free(goal) {
            return Err(PlanningError::InvalidParameter(format!(
                "goal ({}, {}) is off-grid or occupied",
                goal.x, goal.y
            )));
        }
        if self.config.costs.orthogonal <= 0.0 || self.config.costs.diagonal <= 0.0 {
            return Err(PlanningError::InvalidParameter(
                "movement costs must be positive".to_string(),
            ));
        }
        if let Some(penalty) = self.config.direction_change_penalty {
            if !(penalty >= 0.0) {
                return Err(PlanningError::InvalidParameter(format!(
                    "direction change penalty {} must be non-negative",
                    penalty
                )));
            }
        }
        Ok(())
    }

    fn plan_plain<H>(&self, start: GridNode, goal: GridNode, h: &H) -> PlanningResult<PlanOutcome>
    where
        H: Fn(GridNode, GridNode) -> f64,
    {
        let mut queue: BinaryHeap<Reverse<(NotNan<f64>, GridNode)>> = BinaryHeap::new();
        let mut visited: HashSet<GridNode> = HashSet::new();
        let mut branch: HashMap<GridNode, Branch> = HashMap::new();

        queue.push(Reverse((priority(0.0)?, start)));
        visited.insert(start);

        let mut found = false;
        while let Some(Reverse((_, current))) = queue.pop() {
            if current == goal {
                found = true;
                break;
            }
            // Only the start node has no branch entry
            let current_cost = branch.get(&current).map_or(0.0, |b| b.cost);

            for action in self.grid.valid_actions(current) {
                let (dx, dy) = action.delta();
                let next_node = current.offset(dx, dy);
                let branch_cost = current_cost + action.cost(&self.config.costs);

                // Closed on first touch; requires a consistent heuristic
                if !visited.contains(&next_node) {
                    visited.insert(next_node);
                    branch.insert(
                        next_node,
                        Branch {
                            cost: branch_cost,
                            action,
                        },
                    );
                    let queue_cost = priority(branch_cost + h(next_node, goal))?;
                    queue.push(Reverse((queue_cost, next_node)));
                }
            }
        }

        if !found {
            return Ok(PlanOutcome::Unreachable);
        }

        // Retrace backpointers from the goal, then reverse
        let cost = branch.get(&goal).map_or(0.0, |b| b.cost);
        let mut nodes = vec![goal];
        let mut n = goal;
        while let Some(b) = branch.get(&n) {
            let (dx, dy) = b.action.delta();
            let parent = n.offset(-dx, -dy);
            nodes.push(parent);
            if parent == start {
                break;
            }
            n = parent;
        }
        nodes.reverse();

        Ok(PlanOutcome::Found {
            path: GridPath::from_nodes(nodes),
            cost,
        })
    }

    fn plan_penalized<H>(
        &self,
        start: GridNode,
        goal: GridNode,
        penalty: f64,
        h: &H,
    ) -> PlanningResult<PlanOutcome>
    where
        H: Fn(GridNode, GridNode) -> f64,
    {
        let mut queue: BinaryHeap<Reverse<(NotNan<f64>, PenalizedState)>> = BinaryHeap::new();
        let mut visited: HashSet<PenalizedKey> = HashSet::new();
        let mut branch: HashMap<PenalizedKey, PenalizedBranch> = HashMap::new();

        queue.push(Reverse((
            priority(0.0)?,
            PenalizedState {
                node: start,
                had_change: false,
                last_action: None,
            },
        )));
        visited.insert((start, false));

        let mut found: Option<PenalizedKey> = None;
        while let Some(Reverse((_, state))) = queue.pop() {
            let current = state.node;

            // Goal test matches the node regardless of flag; the first
            // goal state popped is the cheapest by frontier ordering
            if current == goal {
                found = Some((current, state.had_change));
                break;
            }
            let current_cost = branch
                .get(&(current, state.had_change))
                .map_or(0.0, |b| b.cost);

            for action in self.grid.valid_actions(current) {
                let (dx, dy) = action.delta();
                let next_node = current.offset(dx, dy);
                let mut branch_cost = current_cost + action.cost(&self.config.costs);

                // The first move from start has no previous direction
                // and pays no penalty
                let changed = matches!(state.last_action, Some(prev) if prev != action);
                if changed {
                    branch_cost += penalty;
                }

                let key = (next_node, changed);
                if !visited.contains(&key) {
                    visited.insert(key);
                    branch.insert(
                        key,
                        PenalizedBranch {
                            cost: branch_cost,
                            parent_had_change: state.had_change,
                            action,
                        },
                    );
                    let queue_cost = priority(branch_cost + h(next_node, goal))?;
                    queue.push(Reverse((
                        queue_cost,
                        PenalizedState {
                            node: next_node,
                            had_change: changed,
                            last_action: Some(action),
                        },
                    )));
                }
            }
        }

        let key = match found {
            Some(key) => key,
            None => return Ok(PlanOutcome::Unreachable),
        };

        // Retrace the compound-state chain, reporting nodes only
        let cost = branch.get(&key).map_or(0.0, |b| b.cost);
        let mut nodes = vec![goal];
        let mut k = key;
        while let Some(b) = branch.get(&k) {
            let (dx, dy) = b.action.delta();
            let parent = k.0.offset(-dx, -dy);
            nodes.push(parent);
            if parent == start {
                break;
            }
            k = (parent, b.parent_had_change);
        }
        nodes.reverse();

        Ok(PlanOutcome::Found {
            path: GridPath::from_nodes(nodes),
            cost,
        })
    }
}

impl GridPathPlanner for AStarPlanner {
    fn plan(&self, start: GridNode, goal: GridNode) -> PlanningResult<PlanOutcome> {
        AStarPlanner::plan(self, start, goal)
    }
}

fn priority(value: f64) -> PlanningResult<NotNan<f64>> {
    NotNan::new(value)
        .map_err(|_| PlanningError::NumericalError("frontier priority is NaN".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use nalgebra as na;

    fn empty_grid(n: usize, m: usize) -> OccupancyGrid {
        OccupancyGrid::new(na::DMatrix::zeros(n, m)).unwrap()
    }

    fn planner(grid: OccupancyGrid) -> AStarPlanner {
        AStarPlanner::with_default_config(grid)
    }

    fn penalized_planner(grid: OccupancyGrid, penalty: f64) -> AStarPlanner {
        AStarPlanner::new(
            grid,
            AStarConfig {
                direction_change_penalty: Some(penalty),
                ..Default::default()
            },
        )
    }

    fn found(outcome: PlanOutcome) -> (GridPath, f64) {
        match outcome {
            PlanOutcome::Found { path, cost } => (path, cost),
            PlanOutcome::Unreachable => panic!("expected a path"),
        }
    }

    /// Deltas between consecutive path nodes
    fn step_deltas(path: &GridPath) -> Vec<(i32, i32)> {
        path.nodes
            .iter()
            .tuple_windows()
            .map(|(a, b)| (b.x - a.x, b.y - a.y))
            .collect()
    }

    fn assert_connected(path: &GridPath) {
        for (dx, dy) in step_deltas(path) {
            assert!(dx.abs() <= 1 && dy.abs() <= 1 && (dx, dy) != (0, 0));
        }
    }

    fn direction_changes(path: &GridPath) -> usize {
        step_deltas(path).windows(2).filter(|w| w[0] != w[1]).count()
    }

    fn step_cost_sum(path: &GridPath, costs: &CostModel) -> f64 {
        step_deltas(path)
            .iter()
            .map(|&(dx, dy)| {
                if dx != 0 && dy != 0 {
                    costs.diagonal
                } else {
                    costs.orthogonal
                }
            })
            .sum()
    }

    #[test]
    fn test_empty_grid_diagonal() {
        let p = planner(empty_grid(5, 5));
        let (path, cost) = found(p.plan(GridNode::new(0, 0), GridNode::new(4, 4)).unwrap());

        assert_eq!(path.len(), 5);
        assert!((cost - 56.0).abs() < 1e-10);
        assert_connected(&path);
        for delta in step_deltas(&path) {
            assert_eq!(delta, (1, 1));
        }
    }

    #[test]
    fn test_large_penalty_leaves_straight_diagonal_unchanged() {
        let p = penalized_planner(empty_grid(5, 5), 1000.0);
        let (path, cost) = found(p.plan(GridNode::new(0, 0), GridNode::new(4, 4)).unwrap());

        assert_eq!(path.len(), 5);
        assert!((cost - 56.0).abs() < 1e-10);
        assert_eq!(direction_changes(&path), 0);
    }

    #[test]
    fn test_straight_corridor_cost() {
        // Single-row corridor: 5 orthogonal steps at cost 10 each
        let p = planner(empty_grid(1, 6));
        let (path, cost) = found(p.plan(GridNode::new(0, 0), GridNode::new(0, 5)).unwrap());
        assert_eq!(path.len(), 6);
        assert!((cost - 50.0).abs() < 1e-10);

        let p = penalized_planner(empty_grid(1, 6), 1000.0);
        let (_, cost) = found(p.plan(GridNode::new(0, 0), GridNode::new(0, 5)).unwrap());
        assert!((cost - 50.0).abs() < 1e-10);
    }

    #[test]
    fn test_cost_equals_sum_of_step_costs() {
        #[rustfmt::skip]
        let cells = na::DMatrix::from_row_slice(5, 5, &[
            0, 0, 0, 0, 0,
            0, 1, 1, 1, 0,
            0, 0, 0, 1, 0,
            0, 1, 0, 1, 0,
            0, 1, 0, 0, 0,
        ]);
        let p = planner(OccupancyGrid::new(cells).unwrap());
        let (path, cost) = found(p.plan(GridNode::new(0, 0), GridNode::new(4, 4)).unwrap());

        assert_connected(&path);
        assert!((cost - step_cost_sum(&path, &CostModel::default())).abs() < 1e-10);
    }

    #[test]
    fn test_walled_off_goal_is_unreachable() {
        #[rustfmt::skip]
        let cells = na::DMatrix::from_row_slice(5, 5, &[
            0, 0, 0, 0, 0,
            0, 1, 1, 1, 0,
            0, 1, 0, 1, 0,
            0, 1, 1, 1, 0,
            0, 0, 0, 0, 0,
        ]);
        let start = GridNode::new(0, 0);
        let goal = GridNode::new(2, 2);

        let p = planner(OccupancyGrid::new(cells.clone()).unwrap());
        assert_eq!(p.plan(start, goal).unwrap(), PlanOutcome::Unreachable);

        let p = penalized_planner(OccupancyGrid::new(cells).unwrap(), 100.0);
        assert_eq!(p.plan(start, goal).unwrap(), PlanOutcome::Unreachable);
    }

    #[test]
    fn test_path_routes_through_single_gap() {
        // Wall on column 2, open only at row 4
        #[rustfmt::skip]
        let cells = na::DMatrix::from_row_slice(5, 5, &[
            0, 0, 1, 0, 0,
            0, 0, 1, 0, 0,
            0, 0, 1, 0, 0,
            0, 0, 1, 0, 0,
            0, 0, 0, 0, 0,
        ]);
        let p = planner(OccupancyGrid::new(cells).unwrap());
        let (path, cost) = found(p.plan(GridNode::new(0, 0), GridNode::new(0, 4)).unwrap());

        assert_connected(&path);
        assert!(path.nodes.contains(&GridNode::new(4, 2)));
        // Detour: down to the gap and back up costs more than the
        // obstacle-free octile estimate
        assert!(cost > 40.0);
    }

    #[test]
    fn test_penalty_prefers_fewer_direction_changes() {
        // (0,0) -> (2,4): two diagonals plus two straights either way,
        // but grouping the runs needs only one direction change
        let p = penalized_planner(empty_grid(5, 5), 5.0);
        let (path, cost) = found(p.plan(GridNode::new(0, 0), GridNode::new(2, 4)).unwrap());

        assert_connected(&path);
        assert_eq!(direction_changes(&path), 1);
        assert!((cost - (2.0 * 14.0 + 2.0 * 10.0 + 5.0)).abs() < 1e-10);
    }

    #[test]
    fn test_start_equals_goal() {
        let start = GridNode::new(2, 2);

        let p = planner(empty_grid(5, 5));
        let (path, cost) = found(p.plan(start, start).unwrap());
        assert_eq!(path.nodes, vec![start]);
        assert_eq!(cost, 0.0);

        let p = penalized_planner(empty_grid(5, 5), 10.0);
        let (path, cost) = found(p.plan(start, start).unwrap());
        assert_eq!(path.nodes, vec![start]);
        assert_eq!(cost, 0.0);
    }

    #[test]
    fn test_invalid_endpoints_rejected() {
        let mut cells = na::DMatrix::zeros(3, 3);
        cells[(2, 2)] = 1;
        let p = planner(OccupancyGrid::new(cells).unwrap());

        let off_grid = p.plan(GridNode::new(-1, 0), GridNode::new(1, 1));
        assert!(matches!(off_grid, Err(PlanningError::InvalidParameter(_))));

        let occupied_goal = p.plan(GridNode::new(0, 0), GridNode::new(2, 2));
        assert!(matches!(
            occupied_goal,
            Err(PlanningError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_negative_penalty_rejected() {
        let p = penalized_planner(empty_grid(3, 3), -1.0);
        let result = p.plan(GridNode::new(0, 0), GridNode::new(2, 2));
        assert!(matches!(result, Err(PlanningError::InvalidParameter(_))));
    }

    #[test]
    fn test_custom_heuristic_zero_is_dijkstra() {
        let p = planner(empty_grid(5, 5));
        let outcome = p
            .plan_with_heuristic(GridNode::new(0, 0), GridNode::new(4, 4), |_, _| 0.0)
            .unwrap();
        let (_, cost) = found(outcome);
        assert!((cost - 56.0).abs() < 1e-10);
    }

    #[test]
    fn test_planner_usable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AStarPlanner>();
    }

    #[test]
    fn test_legacy_planning_interface() {
        let p = planner(empty_grid(5, 5));
        let (rx, ry) = p.planning(0, 0, 4, 4).unwrap();
        assert_eq!(rx.len(), 5);
        assert_eq!(*rx.first().unwrap(), 0);
        assert_eq!(*rx.last().unwrap(), 4);
        assert_eq!(*ry.last().unwrap(), 4);
        assert!(p.planning(0, 0, 9, 9).is_none());
    }
}
