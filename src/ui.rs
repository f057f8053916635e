//! User interface rendering for the maze screen.
//!
//! The maze is drawn on a lattice with one terminal cell per point: maze cells sit on odd/odd
//! points, the gaps between two cells hold either a wall or a passage, and the even/even points are
//! pillars.

use color_eyre::eyre::{OptionExt as _, Result};
use log::Level;
use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Text},
    widgets::{
        canvas::{Canvas, Points},
        Block, BorderType, Borders, Clear,
    },
    Frame,
};

use crate::{
    grid::Position,
    logging::AppLogger,
    maze::{Maze, Segment},
    replay::DisplayState,
    App,
};

/// Color of walls, pillars and the outer border.
const WALL_COLOR: Color = Color::Green;
/// Color of cells the search has processed.
const VISITED_COLOR: Color = Color::Gray;
/// Color of cells on the solution path.
const PATH_COLOR: Color = Color::Rgb(177, 156, 217);
/// Color of the entry cell before the search reaches it.
const START_COLOR: Color = Color::Rgb(128, 206, 225);
/// Color of the exit cell before the search reaches it.
const GOAL_COLOR: Color = Color::Rgb(177, 156, 217);

/// Lattice points sharing one color.
type PointGroup = (Color, Vec<(usize, usize)>);

/// Lattice point of a cell.
const fn cell_point(position: Position) -> (usize, usize) {
    (2 * position.col + 1, 2 * position.row + 1)
}

/// Lattice point between the two cells of a segment.
const fn segment_point(segment: Segment) -> (usize, usize) {
    (
        segment.from.col + segment.to.col + 1,
        segment.from.row + segment.to.row + 1,
    )
}

/// Lattice size of a maze as `(columns, rows)`.
pub(crate) const fn lattice_size(maze: &Maze) -> (usize, usize) {
    (2 * maze.grid().width() + 1, 2 * maze.grid().height() + 1)
}

/// Groups every colored lattice point of the maze by color.
///
/// Walls come first so that later groups paint over them. Passages take the color of their cells
/// when both cells share the same display state; open passages between differently marked cells
/// stay blank.
pub(crate) fn lattice_points(maze: &Maze) -> Vec<PointGroup> {
    let (columns, rows) = lattice_size(maze);

    let mut walls: Vec<(usize, usize)> = (0..rows)
        .flat_map(|row| (0..columns).map(move |col| (col, row)))
        .filter(|&(col, row)| {
            let pillar = col % 2 == 0 && row % 2 == 0;
            let border = col == 0 || row == 0 || col == columns - 1 || row == rows - 1;
            pillar || border
        })
        .collect();
    walls.extend(maze.wall_segments().map(segment_point));

    let mut visited = Vec::new();
    let mut path = Vec::new();
    let mut markers = Vec::new();
    for (position, state) in maze.cells() {
        match state {
            DisplayState::Visited => visited.push(cell_point(position)),
            DisplayState::OnPath => path.push(cell_point(position)),
            DisplayState::Unvisited if position == maze.start() => {
                markers.push((START_COLOR, cell_point(position)));
            }
            DisplayState::Unvisited if position == maze.goal() => {
                markers.push((GOAL_COLOR, cell_point(position)));
            }
            DisplayState::Unvisited => {}
        }
    }

    for segment in maze.passage_segments() {
        let from = maze.display_state(segment.from);
        if from != maze.display_state(segment.to) {
            continue;
        }
        match from {
            DisplayState::Visited => visited.push(segment_point(segment)),
            DisplayState::OnPath => path.push(segment_point(segment)),
            DisplayState::Unvisited => {}
        }
    }

    let mut groups = vec![
        (WALL_COLOR, walls),
        (VISITED_COLOR, visited),
        (PATH_COLOR, path),
    ];
    groups.extend(markers.into_iter().map(|(color, point)| (color, vec![point])));

    groups
}

/// Transforms lattice coordinates to screen coordinates for canvas rendering.
///
/// This function converts lattice coordinates `(col, row)` to screen coordinates `(x, y)` using
/// coordinate[i] = (n - 1) / 2 - i for rows and coordinate[i] = i - (n - 1) / 2 for columns, so the
/// lattice is centred on the canvas origin with the first row at the top.
///
/// # Errors
///
/// This function may return errors from coordinate conversion operations.
pub(crate) fn transform_lattice_to_screen_coords(
    lattice_coords: &[(usize, usize)],
    (columns, rows): (usize, usize),
) -> Result<Vec<(f64, f64)>> {
    let rows_n = f64::from(u16::try_from(rows)?);
    let cols_n = f64::from(u16::try_from(columns)?);

    lattice_coords
        .iter()
        .map(|&(col, row)| {
            let screen_y = (rows_n - 1.) / 2. - f64::from(u16::try_from(row)?);
            let screen_x = f64::from(u16::try_from(col)?) - (cols_n - 1.) / 2.;

            Ok((screen_x, screen_y))
        })
        .collect()
}

/// Footer text.
///
/// This function builds two centered lines: the wrong-move score of the latest search, and below
/// it the newest log record prefixed with the module it came from, colored by its level. The second
/// line is left empty when no logger is installed or nothing was logged yet.
fn status_text(app: &App) -> Text<'static> {
    let score = Line::styled(
        format!("Wrong moves in search: {}", app.maze.wrong_move_count()),
        Style::default()
            .fg(WALL_COLOR)
            .add_modifier(Modifier::BOLD),
    );

    let log_line = app
        .logger
        .and_then(AppLogger::latest)
        .map_or_else(Line::default, |message| {
            let color = match message.level {
                Level::Error => Color::Red,
                Level::Warn => Color::Yellow,
                Level::Info => Color::White,
                Level::Debug => Color::Blue,
                Level::Trace => Color::DarkGray,
            };
            Line::styled(
                format!("{}: {}", message.module(), message.text),
                Style::default().fg(color),
            )
        });

    Text::from(vec![score, log_line]).centered()
}

/// Renders the maze, the playback marks and the footer.
///
/// # Errors
///
/// This function may return errors from coordinate conversion operations or layout lookups.
pub(crate) fn draw(app: &App, frame: &mut Frame) -> Result<()> {
    frame.render_widget(Clear, frame.area());

    let (columns, rows) = lattice_size(&app.maze);

    let overall_layout = Layout::vertical([
        Constraint::Min(1),    // Maze and padding area
        Constraint::Length(3), // Footer block
    ])
    .split(frame.area());

    let maze_content_area = *overall_layout
        .first()
        .ok_or_eyre("failed to get maze content area from layout")?;
    let footer_area = *overall_layout
        .last()
        .ok_or_eyre("failed to get footer area from layout")?;

    let maze_row = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(u16::try_from(rows)?),
        Constraint::Min(1),
    ])
    .split(maze_content_area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get maze area from layout")?;

    let space = Layout::horizontal([
        Constraint::Min(1),
        Constraint::Length(u16::try_from(columns)?),
        Constraint::Min(1),
    ])
    .split(maze_row)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get maze space from horizontal layout")?;

    // Convert every group up front so errors surface before the paint closure
    let groups = lattice_points(&app.maze)
        .into_iter()
        .map(|(color, points)| {
            transform_lattice_to_screen_coords(&points, (columns, rows))
                .map(|coords| (color, coords))
        })
        .collect::<Result<Vec<_>>>()?;

    let maze = Canvas::default()
        .x_bounds([
            (-rounded_div::i32(space.width.into(), 2)).into(),
            (rounded_div::i32(space.width.into(), 2)).into(),
        ])
        .y_bounds([
            (-rounded_div::i32(space.height.into(), 2)).into(),
            (rounded_div::i32(space.height.into(), 2)).into(),
        ])
        .marker(Marker::Block)
        .paint(|ctx| {
            for (color, coords) in &groups {
                ctx.draw(&Points {
                    coords,
                    color: *color,
                });
            }
        });
    frame.render_widget(maze, space);

    let footer = Block::bordered()
        .title("(b) breadth-first / (d) depth-first / (r) new maze / (q) quit")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(WALL_COLOR))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);
    let status_area = footer.inner(footer_area);
    frame.render_widget(footer, footer_area);
    frame.render_widget(status_text(app), status_area);

    Ok(())
}
