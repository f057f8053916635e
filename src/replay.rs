//! Step-by-step playback of a finished search.
//!
//! The search itself completes in one call; [`Replay`] then hands out its results one cell per
//! [`Replay::tick`], first the visited cells and then the solution path, so any host loop can
//! animate it at its own pace.

use std::collections::{HashMap, VecDeque};

use log::trace;

use crate::grid::Position;

/// Presentation state of a cell, kept apart from the grid itself.
///
/// This enumeration is what the renderer colors cells by. It lives in the replay's own map rather
/// than on [`Cell`](crate::grid::Cell), so the generator and the solver never touch presentation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DisplayState {
    /// Not reached by the replay yet.
    #[default]
    Unvisited,
    /// Processed by the search.
    ///
    /// This variant is applied while the visited sequence is played back, in the order the search
    /// popped the cells.
    Visited,
    /// Part of the solution path.
    ///
    /// This variant overwrites [`DisplayState::Visited`] once the path is played back, since
    /// every path cell was visited first.
    OnPath,
}

/// Phase of the playback.
///
/// This enumeration walks `Idle`, `ReplayingVisited`, `ReplayingPath`, `Done` and back to `Idle`.
/// Empty sequences are skipped, so a phase with nothing to show is never entered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[expect(
    clippy::module_name_repetitions,
    reason = "The name reads better when re-exported at the crate root."
)]
pub enum ReplayState {
    /// Nothing to play back; ticks do nothing.
    #[default]
    Idle,
    /// Marking visited cells, one per tick.
    ReplayingVisited,
    /// Marking path cells, one per tick.
    ReplayingPath,
    /// Everything was marked; the next tick returns to [`ReplayState::Idle`].
    Done,
}

/// Playback state machine for one search.
///
/// This structure decouples the instantaneous search from its animation. It owns the two sequences
/// a search produced and consumes them front to back, one cell per [`Replay::tick`], recording the
/// resulting marks in its display map.
#[derive(Clone, Debug, Default)]
pub struct Replay {
    /// Current phase.
    state: ReplayState,
    /// Visited cells still to be marked.
    ///
    /// This field is drained during [`ReplayState::ReplayingVisited`] and is always empty by the
    /// time the path starts playing back.
    visited: VecDeque<Position>,
    /// Path cells still to be marked.
    path: VecDeque<Position>,
    /// Marks applied so far.
    ///
    /// This field only holds cells that were marked; absent cells are
    /// [`DisplayState::Unvisited`]. The marks outlive the playback and are only dropped by
    /// [`Replay::clear`] or by arming a new search.
    display: HashMap<Position, DisplayState>,
}

impl Replay {
    /// Creates an idle replay with no marks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub const fn state(&self) -> ReplayState {
        self.state
    }

    /// Number of ticks left before [`ReplayState::Done`].
    pub fn remaining(&self) -> usize {
        self.visited.len() + self.path.len()
    }

    /// Display state of `position`.
    pub fn display_state(&self, position: Position) -> DisplayState {
        self.display.get(&position).copied().unwrap_or_default()
    }

    /// Drops any playback in progress and all marks, returning to [`ReplayState::Idle`].
    pub fn clear(&mut self) {
        self.visited.clear();
        self.path.clear();
        self.display.clear();
        self.transition(ReplayState::Idle);
    }

    /// Starts playing back a search, discarding whatever was playing before.
    ///
    /// This function takes ownership of the visited sequence and the path of a finished search.
    /// Playback begins with the first non-empty sequence; with both empty it goes straight to
    /// [`ReplayState::Done`].
    pub fn arm(&mut self, visited: Vec<Position>, path: Vec<Position>) {
        self.clear();
        self.visited = visited.into();
        self.path = path.into();

        let next = self.next_phase(ReplayState::ReplayingVisited);
        self.transition(next);
    }

    /// Advances the playback by one step and returns the phase after the step.
    ///
    /// This function marks at most one cell per call. While replaying, it pops the front of the
    /// current sequence and moves to the next phase once that sequence is empty. From
    /// [`ReplayState::Done`] it returns to [`ReplayState::Idle`], and in `Idle` it does nothing.
    pub fn tick(&mut self) -> ReplayState {
        match self.state {
            ReplayState::Idle => {}
            ReplayState::ReplayingVisited => {
                if let Some(position) = self.visited.pop_front() {
                    let _ = self.display.insert(position, DisplayState::Visited);
                }
                let next = self.next_phase(ReplayState::ReplayingVisited);
                self.transition(next);
            }
            ReplayState::ReplayingPath => {
                if let Some(position) = self.path.pop_front() {
                    let _ = self.display.insert(position, DisplayState::OnPath);
                }
                let next = self.next_phase(ReplayState::ReplayingPath);
                self.transition(next);
            }
            ReplayState::Done => self.transition(ReplayState::Idle),
        }

        self.state
    }

    /// First phase at or after `from` that still has cells to mark.
    fn next_phase(&self, from: ReplayState) -> ReplayState {
        match from {
            ReplayState::ReplayingVisited if !self.visited.is_empty() => {
                ReplayState::ReplayingVisited
            }
            ReplayState::ReplayingVisited | ReplayState::ReplayingPath
                if !self.path.is_empty() =>
            {
                ReplayState::ReplayingPath
            }
            ReplayState::ReplayingVisited | ReplayState::ReplayingPath => ReplayState::Done,
            other => other,
        }
    }

    /// Moves to `next`, tracing actual changes.
    fn transition(&mut self, next: ReplayState) {
        if self.state != next {
            trace!("replay {:?} -> {next:?}", self.state);
            self.state = next;
        }
    }
}
