//! Randomized Kruskal maze generation.
//!
//! Every pair of grid-adjacent cells becomes a candidate passage with a random weight. Candidates
//! are walked in ascending weight order and accepted whenever they join two cells that are not yet
//! connected, which yields a spanning tree over the grid. Rejected candidates are the walls.

use std::collections::HashSet;

use log::debug;
use rand::Rng;

use crate::{
    error::MazeError,
    grid::{Connection, Grid, Position},
    union_find::DisjointSet,
};

/// Default exclusive upper bound of a candidate weight.
///
/// This constant only needs to be large enough that ties between candidates stay rare. Ties are
/// still resolved deterministically by enumeration order.
pub const DEFAULT_WEIGHT_BOUND: u32 = 100;

/// Exclusive upper bounds of the random weights, per edge orientation.
///
/// Unequal bounds bias the maze: edges drawn from the smaller range tend to be accepted first, so
/// corridors run mostly in that direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeightBounds {
    /// Bound for edges between a cell and its right-hand neighbor.
    pub horizontal: u32,
    /// Bound for edges between a cell and the neighbor below it.
    pub vertical: u32,
}

impl Default for WeightBounds {
    fn default() -> Self {
        Self::uniform(DEFAULT_WEIGHT_BOUND)
    }
}

impl WeightBounds {
    /// Same bound for both orientations.
    pub const fn uniform(bound: u32) -> Self {
        Self {
            horizontal: bound,
            vertical: bound,
        }
    }

    /// Checks that both ranges are non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::InvalidWeightBound`] for a zero bound.
    pub const fn validate(self) -> Result<Self, MazeError> {
        if self.horizontal == 0 {
            return Err(MazeError::InvalidWeightBound {
                bound: self.horizontal,
            });
        }
        if self.vertical == 0 {
            return Err(MazeError::InvalidWeightBound {
                bound: self.vertical,
            });
        }

        Ok(self)
    }
}

/// Outcome of carving a maze into a grid.
///
/// This structure keeps the three edge lists the rest of the crate reads from. Every candidate is
/// in exactly one of `passages` and `walls`, and the passages form a spanning tree over the grid
/// the layout was carved into.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Layout {
    /// Every candidate edge, sorted by ascending weight.
    candidates: Vec<Connection>,
    /// Accepted edges in acceptance order.
    passages: Vec<Connection>,
    /// Rejected edges in sorted candidate order.
    walls: Vec<Connection>,
}

impl Layout {
    /// Every candidate edge, sorted by ascending weight with ties in enumeration order.
    pub fn candidates(&self) -> &[Connection] {
        &self.candidates
    }

    /// The spanning tree, one entry per undirected passage.
    pub fn passages(&self) -> &[Connection] {
        &self.passages
    }

    /// Candidates left out of the spanning tree.
    pub fn walls(&self) -> &[Connection] {
        &self.walls
    }
}

/// Maze generator holding the weight configuration.
///
/// This structure is validated once on construction and is then reused for every reset of a
/// session. It holds no random state itself; the generator to draw weights from is passed to each
/// call, which keeps generation reproducible from a seed.
#[derive(Clone, Copy, Debug, Default)]
pub struct Generator {
    /// Ranges the candidate weights are drawn from.
    bounds: WeightBounds,
}

impl Generator {
    /// Creates a generator drawing weights from `bounds`.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::InvalidWeightBound`] if either range is empty.
    pub fn new(bounds: WeightBounds) -> Result<Self, MazeError> {
        Ok(Self {
            bounds: bounds.validate()?,
        })
    }

    /// Enumerates the edge from every cell to its right and lower neighbor, with random weights.
    ///
    /// Each undirected adjacent pair appears exactly once, oriented away from the top-left.
    pub fn candidates<R: Rng + ?Sized>(&self, grid: &Grid, rng: &mut R) -> Vec<Connection> {
        let mut candidates = Vec::with_capacity(2 * grid.cell_count());

        for position in grid.positions() {
            let right = position.right();
            if grid.contains(right) {
                let weight = rng.gen_range(0..self.bounds.horizontal);
                candidates.push(Connection::new(position, right, weight));
            }

            let below = position.below();
            if grid.contains(below) {
                let weight = rng.gen_range(0..self.bounds.vertical);
                candidates.push(Connection::new(position, below, weight));
            }
        }

        candidates
    }

    /// Draws fresh weights and carves a maze into `grid`.
    ///
    /// This function is the whole randomized Kruskal pipeline: it enumerates the candidates with
    /// weights drawn from `rng` and hands them to [`carve`]. The randomness is confined to the
    /// weights, so the same generator state always carves the same maze.
    ///
    /// # Errors
    ///
    /// See [`carve`].
    pub fn generate<R: Rng + ?Sized>(
        &self,
        grid: &mut Grid,
        rng: &mut R,
    ) -> Result<Layout, MazeError> {
        let candidates = self.candidates(grid, rng);
        carve(grid, candidates)
    }
}

/// Runs Kruskal's algorithm over already weighted candidates.
///
/// This function sorts the candidates by weight, keeping ties in their original order, and walks
/// them from the lightest. A candidate is accepted when its two cells are not yet connected, and
/// rejected otherwise because it would close a loop. The walk stops as soon as every cell is
/// connected. The grid must not carry passages yet; each accepted candidate is registered on both
/// of its cells. Given the same candidates, the result is always the same.
///
/// # Errors
///
/// Returns [`MazeError::IncompleteSpanningTree`] if the candidates do not connect the whole grid,
/// or [`MazeError::OutOfBounds`] if a candidate leaves it.
pub fn carve(grid: &mut Grid, mut candidates: Vec<Connection>) -> Result<Layout, MazeError> {
    candidates.sort_by_key(|candidate| candidate.weight);

    let expected = grid.cell_count() - 1;
    let mut sets = DisjointSet::new(grid.positions());
    let mut passages = Vec::with_capacity(expected);

    for candidate in &candidates {
        if passages.len() == expected {
            break;
        }
        if sets.connected(candidate.from, candidate.to) {
            continue;
        }

        grid.connect(*candidate)?;
        sets.union(candidate.from, candidate.to);
        passages.push(*candidate);
    }

    if passages.len() < expected {
        return Err(MazeError::IncompleteSpanningTree {
            accepted: passages.len(),
            expected,
        });
    }

    // Walls are matched by endpoints only, so equal weights cannot hide a rejected candidate.
    let carved: HashSet<(Position, Position)> = passages
        .iter()
        .map(|passage| (passage.from, passage.to))
        .collect();
    let walls: Vec<Connection> = candidates
        .iter()
        .filter(|candidate| !carved.contains(&(candidate.from, candidate.to)))
        .copied()
        .collect();

    debug!(
        "carved {}x{} maze: {} passages, {} walls",
        grid.width(),
        grid.height(),
        passages.len(),
        walls.len()
    );

    Ok(Layout {
        candidates,
        passages,
        walls,
    })
}
