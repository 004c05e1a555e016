// pick_next_rs: pick who goes next at the daily scrum (library)
// fairly rotates through a team roster, reshuffling once everyone has had a turn
//
// Open Source licensing under terms of GNU General Public License version 3
// SPDX identifier: GPL-3.0-only
// https://opensource.org/licenses/GPL-3.0
// https://www.gnu.org/licenses/gpl-3.0.en.html

pub mod command;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod logging;
pub mod roster;
pub mod round;
pub mod style;
pub mod terminal;

use anyhow::{Context, Error, Result};
use std::io::{self, IsTerminal, Write};
use tracing::{debug, info};

use crate::{
    command::{DispatchError, Session},
    config::Config,
    roster::Roster,
    round::RoundTracker,
    style::Painter,
};

// unwrap a dispatcher failure so the root cause keeps its exit code
fn dispatch_error(err: DispatchError) -> Error {
    match err {
        DispatchError::Picker(err) => Error::new(err),
        DispatchError::Output(err) => Error::new(err).context("write to stdout"),
    }
}

// run: library side of command line called from main()
pub fn run(config: Config) -> Result<(), Error> {
    // load roster, an empty one is a configuration error
    let roster = Roster::load(&config.roster_source)?;
    info!(source = %config.roster_source, members = roster.len(), "roster ready");

    // set up the round tracker and output styling
    let tracker = RoundTracker::new(roster, config.state_path.clone());
    // unlocked handle, the interrupt handler prints from another thread
    let mut out = io::stdout();
    let painter = Painter::new(config.color && out.is_terminal());
    let session = Session::new(tracker, painter);

    // one-shot command from the command line
    if let Some(action) = config.one_shot {
        debug!(?action, "running one-shot command");
        session.execute(action, &mut out).map_err(dispatch_error)?;
        return Ok(());
    }

    // interactive loop, keystrokes when stdin is a terminal
    session
        .write_banner(&mut out, &config.team_file)
        .context("write banner")?;
    install_interrupt_handler()?;
    if io::stdin().is_terminal() {
        terminal::run_keystroke_loop(&session, &mut out).map_err(dispatch_error)?;
    } else {
        writeln!(out, "\nType commands and press Enter:").context("write prompt")?;
        terminal::run_line_loop(&session, io::stdin().lock(), &mut out)
            .map_err(dispatch_error)?;
    }

    // done
    Ok(())
}

// Ctrl+C outside raw mode arrives as a signal; leave the same way quit does
fn install_interrupt_handler() -> Result<(), Error> {
    ctrlc::set_handler(|| {
        let _ = crossterm::terminal::disable_raw_mode();
        println!("\nGoodbye!");
        std::process::exit(exit_codes::OK);
    })
    .context("install interrupt handler")
}
