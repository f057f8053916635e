//! Error taxonomy for maze construction, generation and solving.

use thiserror::Error;

use crate::grid::Position;

/// Failures surfaced by the maze core.
///
/// This enumeration covers every way a core operation can fail. Configuration errors are reported
/// before anything is built. The remaining variants signal broken internal invariants and abort
/// the operation instead of handing back a partial maze or a partial path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[expect(
    clippy::module_name_repetitions,
    reason = "The name reads better when re-exported at the crate root."
)]
pub enum MazeError {
    /// The grid is too small to hold a maze.
    ///
    /// This variant is returned when a grid is requested with a side shorter than two cells, which
    /// leaves no room for a maze with distinct entry and exit.
    #[error("invalid maze dimensions {width}x{height}: both sides must be at least 2")]
    InvalidDimensions {
        /// Requested number of columns.
        width: usize,
        /// Requested number of rows.
        height: usize,
    },
    /// A random weight range was empty.
    #[error("invalid weight bound {bound}: must be at least 1")]
    InvalidWeightBound {
        /// The rejected exclusive upper bound.
        bound: u32,
    },
    /// The candidate edge list ran out before a spanning tree was formed.
    ///
    /// This variant can only be observed when carving hand-built candidates, since the generator
    /// always enumerates every adjacent pair of cells.
    #[error("spanning tree incomplete: accepted {accepted} of {expected} passages")]
    IncompleteSpanningTree {
        /// Number of passages accepted when the candidates ran out.
        accepted: usize,
        /// Number of passages a spanning tree over the grid needs.
        expected: usize,
    },
    /// The search worklist emptied without reaching the goal.
    ///
    /// This variant never occurs on a generated maze, where every cell is connected to every other,
    /// but keeps the solver honest on arbitrary passage graphs.
    #[error("no path from {start} to {goal}")]
    GoalUnreachable {
        /// Cell the search started from.
        start: Position,
        /// Cell the search was looking for.
        goal: Position,
    },
    /// A position does not name a cell of the grid.
    #[error("position {position} lies outside the grid")]
    OutOfBounds {
        /// The offending position.
        position: Position,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let dims = MazeError::InvalidDimensions {
            width: 1,
            height: 5,
        };
        let unreachable = MazeError::GoalUnreachable {
            start: Position::new(0, 0),
            goal: Position::new(3, 2),
        };

        assert_eq!(
            dims.to_string(),
            "invalid maze dimensions 1x5: both sides must be at least 2"
        );
        assert_eq!(unreachable.to_string(), "no path from (0, 0) to (3, 2)");
    }
}
