//! Error types for grid_planner

use std::fmt;

/// Main error type for planning operations
#[derive(Debug)]
pub enum PlanningError {
    /// Invalid parameter (start/goal off-grid or occupied, negative penalty, ...)
    InvalidParameter(String),
    /// Malformed occupancy grid
    GridError(String),
    /// Numerical computation failed (NaN priority, ...)
    NumericalError(String),
}

impl fmt::Display for PlanningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanningError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            PlanningError::GridError(msg) => write!(f, "Grid error: {}", msg),
            PlanningError::NumericalError(msg) => write!(f, "Numerical error: {}", msg),
        }
    }
}

impl std::error::Error for PlanningError {}

/// Result type alias for planning operations
pub type PlanningResult<T> = Result<T, PlanningError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlanningError::InvalidParameter("start is occupied".to_string());
        assert_eq!(format!("{}", err), "Invalid parameter: start is occupied");
    }

    #[test]
    fn test_grid_error_display() {
        let err = PlanningError::GridError("cell value 2 at (1, 3)".to_string());
        assert_eq!(format!("{}", err), "Grid error: cell value 2 at (1, 3)");
    }
}
