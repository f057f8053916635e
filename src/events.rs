//! Event handling functions for user input.

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};

use crate::{solver::SearchStrategy, App};

/// Handles input events and updates the application state accordingly.
///
/// This function waits for a keyboard event no longer than the time left until the next playback
/// step, so the animation keeps its pace while the UI stays responsive.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(app.time_to_next_tick())? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                handle_key(app, key.code)?;
            }
        }
    }

    Ok(())
}

/// Dispatches a single key press.
///
/// - `q` or `Esc` quits
/// - `r` throws the maze away and generates a new one
/// - `b` solves with breadth-first search
/// - `d` solves with depth-first search
///
/// Starting a search while another one is still being played back restarts the playback.
pub(crate) fn handle_key(app: &mut App, code: KeyCode) -> Result<()> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => app.exit = true,
        KeyCode::Char('r') => app.maze.reset()?,
        KeyCode::Char('b') => app.start_search(SearchStrategy::BreadthFirst)?,
        KeyCode::Char('d') => app.start_search(SearchStrategy::DepthFirst)?,
        _ => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Args, replay::ReplayState};

    /// Creates a small seeded app for key handling tests.
    fn create_test_app() -> App {
        let args = Args {
            width: 5,
            height: 5,
            seed: Some(23),
            ..Args::default()
        };
        App::new(&args).expect("test configuration should be valid")
    }

    #[test]
    fn test_quit_keys() {
        for code in [KeyCode::Char('q'), KeyCode::Esc] {
            let mut app = create_test_app();

            handle_key(&mut app, code).expect("quitting cannot fail");

            assert!(app.exit);
        }
    }

    #[test]
    fn test_search_keys() {
        let mut app = create_test_app();

        handle_key(&mut app, KeyCode::Char('b')).expect("the maze is a spanning tree");
        assert_eq!(app.maze.replay_state(), ReplayState::ReplayingVisited);
        let breadth_first = app.maze.wrong_move_count();

        handle_key(&mut app, KeyCode::Char('d')).expect("the maze is a spanning tree");
        assert_eq!(app.maze.replay_state(), ReplayState::ReplayingVisited);
        assert!(breadth_first > 0);
    }

    #[test]
    fn test_reset_key() {
        let mut app = create_test_app();
        let before = app.maze.layout().clone();
        handle_key(&mut app, KeyCode::Char('b')).expect("the maze is a spanning tree");

        handle_key(&mut app, KeyCode::Char('r')).expect("regeneration should succeed");

        assert_eq!(app.maze.replay_state(), ReplayState::Idle);
        assert_ne!(app.maze.layout(), &before);
    }

    #[test]
    fn test_unbound_key_is_ignored() {
        let mut app = create_test_app();

        handle_key(&mut app, KeyCode::Char('x')).expect("unbound keys cannot fail");

        assert!(!app.exit);
        assert_eq!(app.maze.replay_state(), ReplayState::Idle);
    }
}
