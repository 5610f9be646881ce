//! Action model for 8-connected grid motion
//!
//! An action is a move to one of the 8 neighboring cells. Orthogonal
//! moves and diagonal moves carry different fixed costs; the classic
//! integer-friendly pair is 10 / 14 (14 approximating 10·√2).

use std::fmt;

/// One of the 8 admissible grid moves
///
/// The derived `Ord` gives search states a total order for frontier
/// tie-breaking; the variant order itself carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Action {
    Left,
    Right,
    Up,
    Down,
    UpRight,
    UpLeft,
    DownRight,
    DownLeft,
}

impl Action {
    /// All 8 actions, orthogonals first
    pub const ALL: [Action; 8] = [
        Action::Up,
        Action::Right,
        Action::UpRight,
        Action::DownRight,
        Action::Left,
        Action::UpLeft,
        Action::DownLeft,
        Action::Down,
    ];

    /// Grid delta `(dx, dy)` of this move, `x` being the row index
    pub fn delta(self) -> (i32, i32) {
        match self {
            Action::Left => (-1, 0),
            Action::Right => (1, 0),
            Action::Up => (0, -1),
            Action::Down => (0, 1),
            Action::UpRight => (1, -1),
            Action::UpLeft => (-1, -1),
            Action::DownRight => (1, 1),
            Action::DownLeft => (-1, 1),
        }
    }

    /// Action whose delta is `(dx, dy)`, if any
    pub fn from_delta(dx: i32, dy: i32) -> Option<Action> {
        Action::ALL.iter().copied().find(|a| a.delta() == (dx, dy))
    }

    pub fn is_diagonal(self) -> bool {
        let (dx, dy) = self.delta();
        dx != 0 && dy != 0
    }

    /// Fixed movement cost of this action under the given cost model
    pub fn cost(self, costs: &CostModel) -> f64 {
        if self.is_diagonal() {
            costs.diagonal
        } else {
            costs.orthogonal
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let glyph = match self {
            Action::Left => '<',
            Action::Right => '>',
            Action::Up => '^',
            Action::Down => 'v',
            Action::UpRight | Action::DownLeft => '/',
            Action::UpLeft | Action::DownRight => '\\',
        };
        write!(f, "{}", glyph)
    }
}

/// Movement cost constants, passed into the search explicitly so
/// alternate cost models need no code changes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostModel {
    /// Cost of an orthogonal move
    pub orthogonal: f64,
    /// Cost of a diagonal move
    pub diagonal: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            orthogonal: 10.0,
            diagonal: 14.0,
        }
    }
}
