// pick_next_rs: roster loader
//
// Open Source licensing under terms of GNU General Public License version 3
// SPDX identifier: GPL-3.0-only
// https://opensource.org/licenses/GPL-3.0
// https://www.gnu.org/licenses/gpl-3.0.en.html

use std::{
    fmt,
    fs::File,
    io,
    io::{BufRead, BufReader},
    path::PathBuf,
};

use tracing::debug;

use crate::error::PickerError;

// constants
pub const STDIN_SENTINEL: &str = "-";
const COMMENT_PREFIX: char = '#';

/// Where the roster is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterSource {
    Stdin,
    File(PathBuf),
}

impl RosterSource {
    // interpret a source identifier, where "-" means standard input
    pub fn from_identifier(identifier: &str) -> RosterSource {
        if identifier == STDIN_SENTINEL {
            RosterSource::Stdin
        } else {
            RosterSource::File(PathBuf::from(identifier))
        }
    }
}

impl fmt::Display for RosterSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterSource::Stdin => f.write_str("stdin"),
            RosterSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Non-empty, immutable list of team members in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    members: Vec<String>,
}

impl Roster {
    /// Load names from `source`, rejecting a source with no usable lines.
    pub fn load(source: &RosterSource) -> Result<Roster, PickerError> {
        let names = load_names(source)?;
        Roster::from_names(names, source)
    }

    pub fn from_names(names: Vec<String>, source: &RosterSource) -> Result<Roster, PickerError> {
        if names.is_empty() {
            return Err(PickerError::EmptyRoster {
                source_name: source.to_string(),
            });
        }
        Ok(Roster { members: names })
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

// read names from a file or stdin; an empty result is not an error here
pub fn load_names(source: &RosterSource) -> Result<Vec<String>, PickerError> {
    let unreadable = |source_err: io::Error| PickerError::SourceUnreadable {
        source_name: source.to_string(),
        source: source_err,
    };

    let names = match source {
        RosterSource::Stdin => parse_names(io::stdin().lock()),
        RosterSource::File(path) => {
            let infile = File::open(path).map_err(unreadable)?;
            parse_names(BufReader::new(infile))
        }
    }
    .map_err(unreadable)?;

    debug!(source = %source, count = names.len(), "roster loaded");
    Ok(names)
}

// trim each line, skipping blanks and comments, keeping order and duplicates
pub fn parse_names<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let name = line.trim();
        if name.is_empty() || name.starts_with(COMMENT_PREFIX) {
            continue;
        }
        names.push(name.to_string());
    }
    Ok(names)
}
