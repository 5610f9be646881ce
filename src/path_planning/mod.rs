// Path planning algorithms module

pub mod a_star;
pub mod action;
pub mod heuristic;

pub use a_star::*;
pub use action::*;
