//! This crate contains the source code for the binary of the maze game labyrintree.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]
#![expect(
    unused_crate_dependencies,
    reason = "The dependencies are used in the library crate."
)]

use clap::Parser as _;
use color_eyre::{eyre::Result, install};
use labyrintree::{config::Args, logging, App};

fn main() -> Result<()> {
    let args = Args::parse();
    install()?;
    let _ = logging::init(args.log_level.filter())?;

    let mut app = App::new(&args)?;
    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();

    result
}
