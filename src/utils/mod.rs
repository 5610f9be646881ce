//! Utility modules for grid_planner

pub mod occupancy_grid;

pub use occupancy_grid::*;
