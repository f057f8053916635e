//! Core application state and main loop of the terminal front-end.

use std::time::{Duration, Instant};

use color_eyre::eyre::{bail, Result};
use ratatui::DefaultTerminal;

use crate::{
    config::{Args, MAX_SIDE},
    events,
    logging::{self, AppLogger},
    maze::Maze,
    solver::SearchStrategy,
    ui,
};

/// Application state container for the maze game.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui renders the maze and Crossterm events write to.
#[derive(Debug)]
pub struct App {
    /// Application exit flag.
    ///
    /// Set to `true` when the user wants to quit. The main loop checks it once per iteration.
    pub(crate) exit: bool,
    /// The maze being shown and solved.
    pub(crate) maze: Maze,
    /// Delay between two playback steps.
    pub(crate) tick_rate: Duration,
    /// Timestamp of the last playback step.
    ///
    /// Compared against [`tick_rate`](App::tick_rate) to decide when the replay moves on.
    pub(crate) last_tick: Instant,
    /// Log sink whose newest record is shown in the footer, when one is installed.
    pub(crate) logger: Option<&'static AppLogger>,
}

impl App {
    /// This function generates the first maze from the parsed arguments and, if `--solve` was
    /// given, starts solving it right away. It runs before the terminal is initialized, so every
    /// configuration problem is reported on a plain terminal.
    ///
    /// # Errors
    ///
    /// - a side longer than [`MAX_SIDE`], whose lattice the renderer could not lay out
    /// - [`MazeError`](crate::MazeError) for a side shorter than two cells or an empty weight range
    pub fn new(args: &Args) -> Result<Self> {
        let max_side = usize::from(MAX_SIDE);
        if args.width > max_side || args.height > max_side {
            bail!(
                "maze of {}x{} cannot be drawn: both sides must be at most {max_side}",
                args.width,
                args.height
            );
        }

        let mut app = Self {
            exit: false,
            maze: Maze::with_config(args.maze_config())?,
            tick_rate: args.tick_rate(),
            last_tick: Instant::now(),
            logger: logging::logger(),
        };

        if let Some(strategy) = args.solve {
            app.start_search(strategy)?;
        }

        Ok(app)
    }

    /// Runs the main loop of the application.
    ///
    /// Each iteration draws a frame, waits for input until the next playback step is due, and
    /// advances the playback when it is. The loop ends once the exit flag is set.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`] from the terminal
    /// - [`MazeError`](crate::MazeError) if generation or search break their invariants
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal
                .try_draw(|frame| ui::draw(self, frame).map_err(std::io::Error::other))?;
            events::handle_events(self)?;
            self.on_tick();
        }

        Ok(())
    }

    /// Solves the maze with `strategy` and restarts the playback clock.
    pub(crate) fn start_search(&mut self, strategy: SearchStrategy) -> Result<()> {
        self.maze.run_search(strategy)?;
        self.last_tick = Instant::now();

        Ok(())
    }

    /// Advances the playback if a full tick has passed since the last step.
    pub(crate) fn on_tick(&mut self) {
        if self.last_tick.elapsed() >= self.tick_rate {
            self.last_tick = Instant::now();
            let _ = self.maze.tick();
        }
    }

    /// Time left until the next playback step is due.
    pub(crate) fn time_to_next_tick(&self) -> Duration {
        self.tick_rate.saturating_sub(self.last_tick.elapsed())
    }
}
