//! grid_planner - A* shortest paths on 2D occupancy grids
//!
//! This crate provides an 8-connected best-first grid planner with two
//! cost models: plain additive cost, and a variant that penalizes
//! changes in direction of travel to discourage zig-zag paths.

// Core modules
pub mod common;
pub mod utils;

// Algorithm modules
pub mod path_planning;

// Re-export common types for convenience
pub use common::{GridNode, GridPath, PlanOutcome};
pub use common::{GridPathPlanner, PlanningError, PlanningResult};
pub use path_planning::{AStarConfig, AStarPlanner, Action, CostModel};
pub use utils::OccupancyGrid;
