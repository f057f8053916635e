//! Breadth-first and depth-first search over the carved passages.
//!
//! Both strategies share one loop over a double-ended worklist and only differ in which end newly
//! discovered cells are pushed to. Each discovered cell remembers the connection that first reached
//! it, and the path is read back from the goal along those connections once the goal is popped.

use std::{
    collections::{hash_map::Entry, HashMap, HashSet, VecDeque},
    fmt,
};

use clap::ValueEnum;
use log::info;

use crate::{
    error::MazeError,
    grid::{Connection, Grid, Position},
};

/// Order in which the frontier is explored.
///
/// This enumeration is also a command-line value, spelled `breadth-first` and `depth-first`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum SearchStrategy {
    /// First in, first out. Finds the path with the fewest passages first.
    BreadthFirst,
    /// Last in, first out. Follows one branch to its end before backtracking.
    DepthFirst,
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BreadthFirst => formatter.write_str("breadth-first"),
            Self::DepthFirst => formatter.write_str("depth-first"),
        }
    }
}

/// Everything a finished search produced.
///
/// This structure is returned in one piece once the goal is reached. The replay later consumes the
/// visited sequence and the path one cell at a time, while the wrong-move count goes straight to
/// the footer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Cells in the order they were popped and processed, ending with the goal.
    visited: Vec<Position>,
    /// Cells from start to goal, inclusive.
    path: Vec<Position>,
    /// Connections that led back to an already discovered cell.
    wrong_moves: usize,
}

impl SearchOutcome {
    /// Cells in processing order.
    pub fn visited(&self) -> &[Position] {
        &self.visited
    }

    /// Solution path from start to goal.
    pub fn path(&self) -> &[Position] {
        &self.path
    }

    /// Number of exploration steps that hit an already discovered cell.
    pub const fn wrong_moves(&self) -> usize {
        self.wrong_moves
    }

    /// Splits the outcome into its visited sequence, path and wrong-move count.
    pub fn into_parts(self) -> (Vec<Position>, Vec<Position>, usize) {
        (self.visited, self.path, self.wrong_moves)
    }
}

/// Searches from `start` to `goal` with a FIFO worklist.
///
/// # Errors
///
/// See [`search`].
pub fn search_breadth_first(
    grid: &Grid,
    start: Position,
    goal: Position,
) -> Result<SearchOutcome, MazeError> {
    search(grid, start, goal, SearchStrategy::BreadthFirst)
}

/// Searches from `start` to `goal` with a LIFO worklist.
///
/// # Errors
///
/// See [`search`].
pub fn search_depth_first(
    grid: &Grid,
    start: Position,
    goal: Position,
) -> Result<SearchOutcome, MazeError> {
    search(grid, start, goal, SearchStrategy::DepthFirst)
}

/// Searches from `start` to `goal`, exploring the frontier in the order `strategy` dictates.
///
/// This function keeps a double-ended worklist and a backtrace map from each discovered cell to the
/// connection that first reached it. Popped cells are appended to the visited sequence. Newly
/// discovered neighbors go to the back of the worklist for [`SearchStrategy::BreadthFirst`] and to
/// the front for [`SearchStrategy::DepthFirst`]; neighbors that were already discovered count as
/// wrong moves. Once the goal is popped, the path is read back from the goal along the backtrace.
///
/// # Errors
///
/// Returns [`MazeError::OutOfBounds`] if either endpoint lies outside the grid, and
/// [`MazeError::GoalUnreachable`] if the worklist runs dry before the goal is reached. The latter
/// cannot happen on a spanning tree.
pub fn search(
    grid: &Grid,
    start: Position,
    goal: Position,
    strategy: SearchStrategy,
) -> Result<SearchOutcome, MazeError> {
    for position in [start, goal] {
        if !grid.contains(position) {
            return Err(MazeError::OutOfBounds { position });
        }
    }

    let mut backtrace: HashMap<Position, Option<Connection>> = HashMap::from([(start, None)]);
    let mut worklist = VecDeque::from([start]);
    let mut processed = HashSet::new();
    let mut visited = Vec::new();
    let mut wrong_moves = 0;

    while let Some(next) = worklist.pop_front() {
        if !processed.insert(next) {
            continue;
        }
        visited.push(next);

        if next == goal {
            let path = reconstruct_path(&backtrace, goal);
            info!(
                "{strategy} search reached {goal}: {} cells visited, path of {} cells, {wrong_moves} wrong moves",
                visited.len(),
                path.len()
            );

            return Ok(SearchOutcome {
                visited,
                path,
                wrong_moves,
            });
        }

        let Some(cell) = grid.cell(next) else {
            continue;
        };
        for connection in cell.connections() {
            match backtrace.entry(connection.to) {
                Entry::Occupied(_) => wrong_moves += 1,
                Entry::Vacant(slot) => {
                    let _ = slot.insert(Some(*connection));
                    match strategy {
                        SearchStrategy::BreadthFirst => worklist.push_back(connection.to),
                        SearchStrategy::DepthFirst => worklist.push_front(connection.to),
                    }
                }
            }
        }
    }

    Err(MazeError::GoalUnreachable { start, goal })
}

/// Walks the backtrace from `goal` until a cell without predecessor, which is the start.
fn reconstruct_path(
    backtrace: &HashMap<Position, Option<Connection>>,
    goal: Position,
) -> Vec<Position> {
    let mut path = VecDeque::from([goal]);
    let mut current = goal;

    while let Some(Some(connection)) = backtrace.get(&current) {
        current = connection.from;
        path.push_front(current);
    }

    path.into()
}
