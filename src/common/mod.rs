//! Common types, traits, and error definitions for grid_planner
//!
//! This module provides the foundational building blocks used across
//! the planning algorithms in this crate.

pub mod error;
pub mod traits;
pub mod types;

pub use error::*;
pub use traits::*;
pub use types::*;
