//! Disjoint sets of cells, used by the generator to reject passages that would close a loop.

use std::collections::HashMap;

use crate::grid::Position;

/// Representative map over cell positions.
///
/// This structure answers the one question Kruskal's algorithm keeps asking: are these two cells
/// already connected by the passages accepted so far? Every registered position maps either to itself (a root) or to another position whose chain
/// ends at a root. Lookups do not compress paths, so [`DisjointSet::find`] only needs a shared
/// borrow.
#[derive(Clone, Debug, Default)]
pub struct DisjointSet {
    /// Current representative of each registered position.
    ///
    /// This field starts with every position mapped to itself and is only ever changed by
    /// [`DisjointSet::union`], which re-points one root at another.
    representatives: HashMap<Position, Position>,
}

impl DisjointSet {
    /// Creates one singleton set per position.
    pub fn new<I: IntoIterator<Item = Position>>(positions: I) -> Self {
        Self {
            representatives: positions
                .into_iter()
                .map(|position| (position, position))
                .collect(),
        }
    }

    /// Follows the representative chain of `position` up to its root.
    ///
    /// Unregistered positions are their own root.
    pub fn find(&self, position: Position) -> Position {
        let mut current = position;
        while let Some(&parent) = self.representatives.get(&current) {
            if parent == current {
                break;
            }
            current = parent;
        }

        current
    }

    /// Merges the sets holding `first` and `second`.
    ///
    /// The root of `first` is re-pointed at the root of `second`. Merging two members of the same
    /// set changes nothing.
    pub fn union(&mut self, first: Position, second: Position) {
        let first_root = self.find(first);
        let second_root = self.find(second);
        if first_root != second_root {
            let _ = self.representatives.insert(first_root, second_root);
        }
    }

    /// Returns whether both positions belong to the same set.
    pub fn connected(&self, first: Position, second: Position) -> bool {
        self.find(first) == self.find(second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Four positions along the top row.
    fn positions() -> Vec<Position> {
        (0..4).map(|col| Position::new(col, 0)).collect()
    }

    #[test]
    fn test_find_singletons() {
        let sets = DisjointSet::new(positions());

        for position in positions() {
            assert_eq!(sets.find(position), position);
        }
    }

    #[test]
    fn test_union_points_first_root_at_second() {
        let mut sets = DisjointSet::new(positions());
        let first = Position::new(0, 0);
        let second = Position::new(1, 0);

        sets.union(first, second);

        assert_eq!(sets.find(first), second);
        assert_eq!(sets.find(second), second);
    }

    #[test]
    fn test_union_is_transitive() {
        let mut sets = DisjointSet::new(positions());

        sets.union(Position::new(0, 0), Position::new(1, 0));
        sets.union(Position::new(2, 0), Position::new(3, 0));
        assert!(!sets.connected(Position::new(0, 0), Position::new(3, 0)));

        sets.union(Position::new(1, 0), Position::new(2, 0));
        assert!(sets.connected(Position::new(0, 0), Position::new(3, 0)));
        assert_eq!(sets.find(Position::new(0, 0)), sets.find(Position::new(3, 0)));
    }

    #[test]
    fn test_union_idempotent() {
        let mut sets = DisjointSet::new(positions());

        sets.union(Position::new(0, 0), Position::new(1, 0));
        let root = sets.find(Position::new(0, 0));
        sets.union(Position::new(0, 0), Position::new(1, 0));
        sets.union(Position::new(1, 0), Position::new(0, 0));

        assert_eq!(sets.find(Position::new(0, 0)), root);
        assert_eq!(sets.find(Position::new(1, 0)), root);
    }
}
