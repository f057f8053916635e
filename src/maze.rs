//! The maze session: one grid, its carved layout, and the playback of the latest search.

use log::info;
use rand::{rngs::StdRng, SeedableRng as _};

use crate::{
    error::MazeError,
    generator::{Generator, Layout, WeightBounds},
    grid::{Connection, Grid, Position},
    replay::{DisplayState, Replay, ReplayState},
    solver::{self, SearchStrategy},
};

/// Random number generator threaded through generation.
///
/// This alias names the one generator type the session owns. Seeding it makes a maze, and every
/// maze after it in the same session, reproducible.
pub type Random = StdRng;

/// Default number of columns.
pub const DEFAULT_WIDTH: usize = 20;

/// Default number of rows.
pub const DEFAULT_HEIGHT: usize = 15;

/// Parameters a maze session is built from.
///
/// This structure is plain data and is only validated when a [`Maze`] is built from it, which
/// reports bad dimensions or weight bounds as a [`MazeError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[expect(
    clippy::module_name_repetitions,
    reason = "The name reads better when re-exported at the crate root."
)]
pub struct MazeConfig {
    /// Number of columns, at least 2.
    pub width: usize,
    /// Number of rows, at least 2.
    pub height: usize,
    /// Ranges the candidate weights are drawn from.
    pub weights: WeightBounds,
    /// Seed for the weight generator. `None` seeds from system entropy.
    pub seed: Option<u64>,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            weights: WeightBounds::default(),
            seed: None,
        }
    }
}

impl MazeConfig {
    /// Default configuration with the given dimensions.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Builds the generator this configuration asks for.
    pub fn rng(&self) -> Random {
        self.seed
            .map_or_else(Random::from_entropy, Random::seed_from_u64)
    }
}

/// Endpoint pair naming the two adjacent cells a wall separates or a passage joins.
///
/// This structure is what the scene queries hand to a renderer. It drops the weight, which only
/// matters while generating, and leaves the geometry to the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Segment {
    /// First cell.
    pub from: Position,
    /// Second cell.
    pub to: Position,
}

impl From<Connection> for Segment {
    fn from(connection: Connection) -> Self {
        Self {
            from: connection.from,
            to: connection.to,
        }
    }
}

/// A generated maze together with the playback of its latest search.
///
/// This structure is the session a host drives. Generation happens on construction and on every
/// reset; [`Maze::run_search`] solves it from the top-left to the bottom-right cell and
/// [`Maze::tick`] replays the result one cell at a time. Everything a renderer needs is exposed
/// through read-only projections, so the host never reaches into the grid or the replay.
#[derive(Debug)]
pub struct Maze {
    /// Parameters the session was built with.
    config: MazeConfig,
    /// Validated generator for `config.weights`.
    generator: Generator,
    /// Weight source, advanced by every generation.
    ///
    /// This field is kept across resets, so successive mazes of a seeded session follow one
    /// reproducible stream rather than repeating the first maze.
    rng: Random,
    /// Cells and their passages.
    grid: Grid,
    /// Candidates, passages and walls of the current maze.
    layout: Layout,
    /// Playback of the latest search.
    replay: Replay,
    /// Wrong moves counted by the latest search.
    wrong_moves: usize,
}

impl Maze {
    /// Generates a `width` x `height` maze with default weights and an entropy-seeded generator.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::InvalidDimensions`] if either side is shorter than two cells.
    pub fn new(width: usize, height: usize) -> Result<Self, MazeError> {
        Self::with_config(MazeConfig::new(width, height))
    }

    /// Generates a maze from `config`, seeding the generator from `config.seed`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the dimensions or weight bounds are invalid.
    pub fn with_config(config: MazeConfig) -> Result<Self, MazeError> {
        let rng = config.rng();
        Self::with_rng(config, rng)
    }

    /// Generates a maze from `config`, drawing weights from `rng`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the dimensions or weight bounds are invalid.
    pub fn with_rng(config: MazeConfig, mut rng: Random) -> Result<Self, MazeError> {
        let generator = Generator::new(config.weights)?;
        let (grid, layout) = Self::build(&config, generator, &mut rng)?;

        Ok(Self {
            config,
            generator,
            rng,
            grid,
            layout,
            replay: Replay::new(),
            wrong_moves: 0,
        })
    }

    /// Builds a fresh grid and carves a maze into it.
    fn build(
        config: &MazeConfig,
        generator: Generator,
        rng: &mut Random,
    ) -> Result<(Grid, Layout), MazeError> {
        let mut grid = Grid::new(config.width, config.height)?;
        let layout = generator.generate(&mut grid, rng)?;

        Ok((grid, layout))
    }

    /// Cells and passages of the current maze.
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Candidates, passages and walls of the current maze.
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Entry cell, top-left.
    pub const fn start(&self) -> Position {
        self.grid.start()
    }

    /// Exit cell, bottom-right.
    pub const fn goal(&self) -> Position {
        self.grid.goal()
    }

    /// Phase of the playback.
    pub const fn replay_state(&self) -> ReplayState {
        self.replay.state()
    }

    /// Solves the maze with `strategy` and arms the playback.
    ///
    /// This function runs the whole search synchronously and only then hands its results to the
    /// replay. Any search still being played back is discarded first, together with its marks, and
    /// the wrong-move count is replaced by the new search's.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::GoalUnreachable`] if the search fails to reach the exit, which would
    /// mean the maze is not a spanning tree. The session is left idle in that case.
    pub fn run_search(&mut self, strategy: SearchStrategy) -> Result<(), MazeError> {
        self.replay.clear();
        self.wrong_moves = 0;

        let outcome = solver::search(&self.grid, self.start(), self.goal(), strategy)?;
        let (visited, path, wrong_moves) = outcome.into_parts();
        self.wrong_moves = wrong_moves;
        self.replay.arm(visited, path);

        Ok(())
    }

    /// Advances the playback one step.
    pub fn tick(&mut self) -> ReplayState {
        self.replay.tick()
    }

    /// Display state of one cell.
    pub fn display_state(&self, position: Position) -> DisplayState {
        self.replay.display_state(position)
    }

    /// Every cell with its display state, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Position, DisplayState)> + '_ {
        self.grid
            .positions()
            .map(|position| (position, self.replay.display_state(position)))
    }

    /// Walls to draw, in sorted candidate order.
    pub fn wall_segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.layout.walls().iter().copied().map(Segment::from)
    }

    /// Passages of the spanning tree, in acceptance order.
    pub fn passage_segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.layout.passages().iter().copied().map(Segment::from)
    }

    /// Wrong moves counted by the latest search.
    pub const fn wrong_move_count(&self) -> usize {
        self.wrong_moves
    }

    /// Throws the current maze away and generates a new one.
    ///
    /// The weights come from the session's generator, so successive resets of a seeded session
    /// follow one reproducible stream.
    ///
    /// # Errors
    ///
    /// Only fails if generation breaks its own invariants; the previous maze is kept in that case.
    pub fn reset(&mut self) -> Result<(), MazeError> {
        let (grid, layout) = Self::build(&self.config, self.generator, &mut self.rng)?;

        self.grid = grid;
        self.layout = layout;
        self.replay = Replay::new();
        self.wrong_moves = 0;
        info!(
            "generated new {}x{} maze",
            self.grid.width(),
            self.grid.height()
        );

        Ok(())
    }

    /// Reseeds the session's generator with `seed` and regenerates.
    ///
    /// # Errors
    ///
    /// See [`Maze::reset`].
    pub fn reset_with_seed(&mut self, seed: u64) -> Result<(), MazeError> {
        self.rng = Random::seed_from_u64(seed);
        self.reset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a maze session with a fixed seed.
    fn seeded(width: usize, height: usize, seed: u64) -> Maze {
        Maze::with_config(MazeConfig {
            seed: Some(seed),
            ..MazeConfig::new(width, height)
        })
        .expect("configuration should be valid")
    }

    #[test]
    fn test_new_rejects_small_dimensions() {
        assert_eq!(
            Maze::new(1, 4).err(),
            Some(MazeError::InvalidDimensions {
                width: 1,
                height: 4
            })
        );
        assert!(Maze::new(4, 0).is_err());
    }

    #[test]
    fn test_new_rejects_empty_weight_range() {
        let config = MazeConfig {
            weights: WeightBounds::uniform(0),
            ..MazeConfig::default()
        };

        assert_eq!(
            Maze::with_config(config).err(),
            Some(MazeError::InvalidWeightBound { bound: 0 })
        );
    }

    #[test]
    fn test_scene_projection() {
        let maze = seeded(5, 4, 11);

        let cells: Vec<(Position, DisplayState)> = maze.cells().collect();

        assert_eq!(cells.len(), 20);
        assert_eq!(cells.first(), Some(&(Position::new(0, 0), DisplayState::Unvisited)));
        assert_eq!(cells.last(), Some(&(Position::new(4, 3), DisplayState::Unvisited)));
        assert_eq!(maze.passage_segments().count(), 19);
        // 4 * 4 horizontal plus 5 * 3 vertical candidates, minus the passages.
        assert_eq!(maze.wall_segments().count(), 16 + 15 - 19);
        assert!(maze
            .wall_segments()
            .chain(maze.passage_segments())
            .all(|segment| segment.from.is_adjacent(segment.to)));
        assert_eq!(maze.wrong_move_count(), 0);
        assert_eq!(maze.replay_state(), ReplayState::Idle);
    }

    #[test]
    fn test_search_and_replay() {
        let mut maze = seeded(6, 5, 3);
        assert_eq!(maze.tick(), ReplayState::Idle);

        maze.run_search(SearchStrategy::BreadthFirst)
            .expect("the maze is a spanning tree");
        assert_eq!(maze.replay_state(), ReplayState::ReplayingVisited);

        let outcome = solver::search_breadth_first(maze.grid(), maze.start(), maze.goal())
            .expect("the maze is a spanning tree");
        assert_eq!(maze.wrong_move_count(), outcome.wrong_moves());

        let ticks = outcome.visited().len() + outcome.path().len();
        for _ in 1..ticks {
            assert_ne!(maze.tick(), ReplayState::Done);
        }
        assert_eq!(maze.tick(), ReplayState::Done);
        assert_eq!(maze.tick(), ReplayState::Idle);

        for position in outcome.path() {
            assert_eq!(maze.display_state(*position), DisplayState::OnPath);
        }
        for position in outcome.visited() {
            assert_ne!(maze.display_state(*position), DisplayState::Unvisited);
        }
    }

    #[test]
    fn test_search_while_replaying_restarts() {
        let mut maze = seeded(6, 6, 8);
        maze.run_search(SearchStrategy::DepthFirst)
            .expect("the maze is a spanning tree");
        let _ = maze.tick();
        let _ = maze.tick();

        maze.run_search(SearchStrategy::BreadthFirst)
            .expect("the maze is a spanning tree");

        assert_eq!(maze.replay_state(), ReplayState::ReplayingVisited);
        assert!(maze
            .cells()
            .all(|(_, state)| state == DisplayState::Unvisited));
    }

    #[test]
    fn test_reset_with_same_seed_reproduces_maze() {
        let mut maze = seeded(8, 6, 42);
        let original = maze.layout().clone();

        maze.reset().expect("regeneration should succeed");
        assert_ne!(maze.layout(), &original);

        maze.reset_with_seed(42).expect("regeneration should succeed");
        assert_eq!(maze.layout(), &original);
        assert_eq!(seeded(8, 6, 42).layout(), &original);
    }

    #[test]
    fn test_reset_discards_search() {
        let mut maze = seeded(4, 4, 5);
        maze.run_search(SearchStrategy::BreadthFirst)
            .expect("the maze is a spanning tree");
        let _ = maze.tick();

        maze.reset().expect("regeneration should succeed");

        assert_eq!(maze.replay_state(), ReplayState::Idle);
        assert_eq!(maze.wrong_move_count(), 0);
        assert!(maze
            .cells()
            .all(|(_, state)| state == DisplayState::Unvisited));
        assert_eq!(maze.grid().passage_count(), 15);
    }
}
