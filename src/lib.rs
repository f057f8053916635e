//! Randomized Kruskal mazes with animated breadth-first and depth-first solving.
//!
//! The maze core ([`grid`], [`generator`], [`solver`], [`replay`] and [`maze`]) is plain data and
//! has no terminal dependencies. The terminal front-end ([`App`]) draws it with Ratatui and steps
//! the playback once per tick.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

pub mod app;
pub mod config;
pub mod error;
mod events;
pub mod generator;
pub mod grid;
pub mod logging;
pub mod maze;
pub mod replay;
pub mod solver;
mod ui;
pub mod union_find;

pub use app::App;
pub use error::MazeError;
pub use generator::{Generator, Layout, WeightBounds};
pub use grid::{Cell, Connection, Grid, Position};
pub use maze::{Maze, MazeConfig, Random, Segment};
pub use replay::{DisplayState, ReplayState};
pub use solver::{SearchOutcome, SearchStrategy};
pub use union_find::DisjointSet;
