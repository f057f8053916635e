//! Command-line configuration of the terminal front-end.

use std::time::Duration;

use clap::{builder::TypedValueParser as _, Parser, ValueEnum};
use log::LevelFilter;

use crate::{
    generator::{WeightBounds, DEFAULT_WEIGHT_BOUND},
    maze::{MazeConfig, DEFAULT_HEIGHT, DEFAULT_WIDTH},
    solver::SearchStrategy,
};

/// Default delay between two playback steps, in milliseconds.
pub const DEFAULT_TICK_MS: u64 = 100;

/// Longest side a maze may have.
///
/// The renderer draws a `2n + 1` lattice and sizes its layout in `u16` terminal cells, so this is
/// the largest side whose lattice still fits. Larger values are rejected while parsing the
/// arguments, before the terminal is taken over.
pub const MAX_SIDE: u16 = 32_767;

/// Verbosity of the in-app log.
///
/// This enumeration mirrors the `log` crate's level filter so it can derive [`ValueEnum`] and be
/// spelled in lowercase on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Log nothing.
    Off,
    /// Only errors.
    Error,
    /// Errors and warnings.
    Warn,
    /// Search summaries and resets.
    Info,
    /// Generation summaries.
    Debug,
    /// Every playback transition.
    Trace,
}

impl LogLevel {
    /// Matching filter of the `log` facade.
    pub const fn filter(self) -> LevelFilter {
        match self {
            Self::Off => LevelFilter::Off,
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }
}

/// Generate a random maze and watch breadth-first or depth-first search solve it.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Number of columns in the maze.
    #[arg(
        long,
        default_value_t = DEFAULT_WIDTH,
        value_parser = clap::value_parser!(u16).range(2..=i64::from(MAX_SIDE)).map(usize::from),
    )]
    pub width: usize,
    /// Number of rows in the maze.
    #[arg(
        long,
        default_value_t = DEFAULT_HEIGHT,
        value_parser = clap::value_parser!(u16).range(2..=i64::from(MAX_SIDE)).map(usize::from),
    )]
    pub height: usize,
    /// Seed for the passage weights; omit for a different maze on every run.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Exclusive upper bound of the weights of horizontal passages.
    #[arg(long, default_value_t = DEFAULT_WEIGHT_BOUND, value_parser = clap::value_parser!(u32).range(1..))]
    pub horizontal_weight: u32,
    /// Exclusive upper bound of the weights of vertical passages.
    #[arg(long, default_value_t = DEFAULT_WEIGHT_BOUND, value_parser = clap::value_parser!(u32).range(1..))]
    pub vertical_weight: u32,
    /// Milliseconds between two playback steps.
    #[arg(long, default_value_t = DEFAULT_TICK_MS, value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,
    /// Start solving right away with this strategy.
    #[arg(long, value_enum)]
    pub solve: Option<SearchStrategy>,
    /// Verbosity of the log shown in the footer.
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: None,
            horizontal_weight: DEFAULT_WEIGHT_BOUND,
            vertical_weight: DEFAULT_WEIGHT_BOUND,
            tick_ms: DEFAULT_TICK_MS,
            solve: None,
            log_level: LogLevel::Info,
        }
    }
}

impl Args {
    /// Maze parameters selected on the command line.
    ///
    /// This function only maps the values over. Validation happens when the maze is built, except
    /// for the ranges clap already enforced while parsing.
    pub const fn maze_config(&self) -> MazeConfig {
        MazeConfig {
            width: self.width,
            height: self.height,
            weights: WeightBounds {
                horizontal: self.horizontal_weight,
                vertical: self.vertical_weight,
            },
            seed: self.seed,
        }
    }

    /// Delay between two playback steps.
    pub const fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}
