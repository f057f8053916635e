//! Grid cells, their identities and the passages registered between them.
//!
//! The [`Grid`] is the single owner of every [`Cell`]. Everything else in the crate refers to cells
//! by [`Position`], so the passage network can be as cyclic-looking as it likes without any cell
//! owning another.

use std::{
    collections::{HashSet, VecDeque},
    fmt,
};

use crate::error::MazeError;

/// Identity of a cell as a `(column, row)` pair.
///
/// This structure is the only way the rest of the crate refers to a cell. It is cheap to copy and
/// hash, which is what the union-find, the backtrace map and the display map key on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Zero-based column, growing to the right.
    pub col: usize,
    /// Zero-based row, growing downwards.
    pub row: usize,
}

impl Position {
    /// Builds a position from a column and a row.
    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    /// This function returns whether the two positions share a side. Diagonal neighbors and a
    /// position compared with itself are not adjacent.
    pub const fn is_adjacent(self, other: Self) -> bool {
        self.col.abs_diff(other.col) + self.row.abs_diff(other.row) == 1
    }

    /// Position one column to the right.
    pub(crate) const fn right(self) -> Self {
        Self::new(self.col + 1, self.row)
    }

    /// Position one row further down.
    pub(crate) const fn below(self) -> Self {
        Self::new(self.col, self.row + 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "({}, {})", self.col, self.row)
    }
}

/// Directed, weighted edge between two grid-adjacent cells.
///
/// This structure is the unit the generator sorts and the solver walks. Equality covers both
/// endpoints and the weight, so two connections with swapped endpoints model the same undirected
/// passage but compare unequal. Code that only cares which cells an edge links, like the wall
/// derivation in [`carve`](crate::generator::carve), compares the `(from, to)` pair instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Connection {
    /// Cell the edge leaves.
    pub from: Position,
    /// Cell the edge enters.
    pub to: Position,
    /// Random weight deciding the order in which the generator considers the edge.
    pub weight: u32,
}

impl Connection {
    /// Builds a connection from `from` to `to`.
    pub const fn new(from: Position, to: Position, weight: u32) -> Self {
        Self { from, to, weight }
    }

    /// Returns the same edge pointing the other way.
    #[must_use]
    pub const fn reversed(self) -> Self {
        Self::new(self.to, self.from, self.weight)
    }
}

/// A vertex of the maze graph.
///
/// This structure pairs a position with the passages leaving it. Equality and hashing only look at
/// the position, so two snapshots of the same cell taken before and after carving compare equal.
/// Presentation state is kept by the replay, never here.
#[derive(Clone, Debug)]
pub struct Cell {
    /// Identity of the cell.
    position: Position,
    /// Outgoing passages, in the order the generator carved them.
    ///
    /// This field grows by exactly one entry for every accepted passage touching the cell, and the
    /// order it grows in decides the order in which a search discovers neighbors.
    connections: Vec<Connection>,
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl Eq for Cell {}

impl Cell {
    /// Creates a cell with no passages.
    const fn new(position: Position) -> Self {
        Self {
            position,
            connections: Vec::new(),
        }
    }

    /// Identity of the cell.
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Outgoing passages in discovery order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Cells reachable through one passage.
    pub fn neighbors(&self) -> impl Iterator<Item = Position> + '_ {
        self.connections.iter().map(|connection| connection.to)
    }
}

/// Rectangular arena owning every cell of the maze.
///
/// This structure fixes its shape on construction and only ever changes by registering passages.
/// Lookups go through [`Grid::cell`] and never index directly, so a stray position yields `None`
/// instead of a panic.
#[derive(Clone, Debug)]
pub struct Grid {
    /// Number of columns.
    width: usize,
    /// Number of rows.
    height: usize,
    /// Cells indexed `[row][col]`.
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    /// Builds a grid with a passage-less cell at every `(col, row)` pair.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::InvalidDimensions`] if either side is shorter than two cells.
    pub fn new(width: usize, height: usize) -> Result<Self, MazeError> {
        if width < 2 || height < 2 {
            return Err(MazeError::InvalidDimensions { width, height });
        }

        let cells = (0..height)
            .map(|row| {
                (0..width)
                    .map(|col| Cell::new(Position::new(col, row)))
                    .collect()
            })
            .collect();

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Number of columns.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    pub const fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Top-left cell, where searches start.
    pub const fn start(&self) -> Position {
        Position::new(0, 0)
    }

    /// Bottom-right cell, where searches end.
    pub const fn goal(&self) -> Position {
        Position::new(self.width - 1, self.height - 1)
    }

    /// Returns whether `position` names a cell of this grid.
    pub const fn contains(&self, position: Position) -> bool {
        position.col < self.width && position.row < self.height
    }

    /// Looks a cell up by position.
    pub fn cell(&self, position: Position) -> Option<&Cell> {
        self.cells
            .get(position.row)
            .and_then(|row| row.get(position.col))
    }

    /// Mutable lookup by position.
    fn cell_mut(&mut self, position: Position) -> Option<&mut Cell> {
        self.cells
            .get_mut(position.row)
            .and_then(|row| row.get_mut(position.col))
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().flatten()
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells().map(Cell::position)
    }

    /// Number of undirected passages registered so far.
    pub fn passage_count(&self) -> usize {
        self.cells().map(|cell| cell.connections.len()).sum::<usize>() / 2
    }

    /// Registers a passage on both of its cells, once per direction with the same weight.
    ///
    /// This function is what turns an accepted candidate into a walkable passage. The forward
    /// connection is pushed onto `from` and the reversed one onto `to`, so a search can leave
    /// either cell through it.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::OutOfBounds`] if either endpoint lies outside the grid; in that case
    /// neither cell is touched.
    pub(crate) fn connect(&mut self, connection: Connection) -> Result<(), MazeError> {
        for position in [connection.from, connection.to] {
            if !self.contains(position) {
                return Err(MazeError::OutOfBounds { position });
            }
        }

        if let Some(cell) = self.cell_mut(connection.from) {
            cell.connections.push(connection);
        }
        if let Some(cell) = self.cell_mut(connection.to) {
            cell.connections.push(connection.reversed());
        }

        Ok(())
    }

    /// Returns whether the passage network links `from` to `to`.
    ///
    /// This function runs a plain breadth-first walk without recording anything, which makes it a
    /// cheap check that a carved maze really connects every cell.
    pub fn has_path_between(&self, from: Position, to: Position) -> bool {
        let mut seen = HashSet::new();
        let mut worklist = VecDeque::from([from]);

        while let Some(next) = worklist.pop_front() {
            if next == to {
                return true;
            }
            if !seen.insert(next) {
                continue;
            }
            if let Some(cell) = self.cell(next) {
                worklist.extend(cell.neighbors().filter(|neighbor| !seen.contains(neighbor)));
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_rejects_small_dimensions() {
        for (width, height) in [(0, 5), (1, 5), (5, 1), (0, 0)] {
            assert_eq!(
                Grid::new(width, height).err(),
                Some(MazeError::InvalidDimensions { width, height })
            );
        }
    }

    #[test]
    fn test_grid_cells_row_major() {
        let grid = Grid::new(3, 2).expect("3x2 grid should be valid");

        let positions: Vec<Position> = grid.positions().collect();

        assert_eq!(grid.cell_count(), 6);
        assert_eq!(
            positions,
            vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(2, 0),
                Position::new(0, 1),
                Position::new(1, 1),
                Position::new(2, 1),
            ]
        );
    }

    #[test]
    fn test_grid_lookup() {
        let grid = Grid::new(4, 3).expect("4x3 grid should be valid");

        assert_eq!(
            grid.cell(Position::new(3, 2)).map(Cell::position),
            Some(Position::new(3, 2))
        );
        assert!(grid.cell(Position::new(4, 0)).is_none());
        assert!(grid.cell(Position::new(0, 3)).is_none());
        assert_eq!(grid.start(), Position::new(0, 0));
        assert_eq!(grid.goal(), Position::new(3, 2));
    }

    #[test]
    fn test_connect_registers_both_directions() {
        let mut grid = Grid::new(2, 2).expect("2x2 grid should be valid");
        let connection = Connection::new(Position::new(0, 0), Position::new(1, 0), 42);

        grid.connect(connection).expect("both endpoints are in bounds");

        let from = grid.cell(Position::new(0, 0)).expect("cell exists");
        let to = grid.cell(Position::new(1, 0)).expect("cell exists");
        assert_eq!(from.connections(), &[connection]);
        assert_eq!(to.connections(), &[connection.reversed()]);
        assert_eq!(grid.passage_count(), 1);
    }

    #[test]
    fn test_connect_out_of_bounds() {
        let mut grid = Grid::new(2, 2).expect("2x2 grid should be valid");
        let connection = Connection::new(Position::new(1, 1), Position::new(2, 1), 1);

        assert_eq!(
            grid.connect(connection),
            Err(MazeError::OutOfBounds {
                position: Position::new(2, 1)
            })
        );
        assert_eq!(grid.passage_count(), 0);
    }

    #[test]
    fn test_has_path_between() {
        let mut grid = Grid::new(3, 2).expect("3x2 grid should be valid");
        grid.connect(Connection::new(Position::new(0, 0), Position::new(1, 0), 1))
            .expect("in bounds");
        grid.connect(Connection::new(Position::new(1, 0), Position::new(1, 1), 1))
            .expect("in bounds");

        assert!(grid.has_path_between(Position::new(0, 0), Position::new(1, 1)));
        assert!(grid.has_path_between(Position::new(1, 1), Position::new(0, 0)));
        assert!(!grid.has_path_between(Position::new(0, 0), Position::new(2, 1)));
    }

    #[test]
    fn test_connection_equality_includes_weight() {
        let first = Connection::new(Position::new(0, 0), Position::new(1, 0), 5);
        let second = Connection::new(Position::new(0, 0), Position::new(1, 0), 7);

        assert_ne!(first, second);
        assert_ne!(first, first.reversed());
        assert_eq!(first.reversed().reversed(), first);
    }

    #[test]
    fn test_position_adjacency() {
        let origin = Position::new(1, 1);

        assert!(origin.is_adjacent(Position::new(2, 1)));
        assert!(origin.is_adjacent(Position::new(1, 0)));
        assert!(!origin.is_adjacent(Position::new(2, 2)));
        assert!(!origin.is_adjacent(origin));
        assert_eq!(origin.to_string(), "(1, 1)");
    }
}
