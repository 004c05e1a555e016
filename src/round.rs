// pick_next_rs: round tracker
//
// Open Source licensing under terms of GNU General Public License version 3
// SPDX identifier: GPL-3.0-only
// https://opensource.org/licenses/GPL-3.0
// https://www.gnu.org/licenses/gpl-3.0.en.html

//! Tracks who is still waiting for a turn in the current round.
//!
//! The remaining names live in a flat state file, one per line, so the
//! rotation survives across runs. A missing file means a fresh round; the
//! file is removed again once everyone has been picked.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use rand::{seq::SliceRandom, thread_rng};
use tracing::{debug, info};

use crate::{error::PickerError, roster::Roster};

/// Result of a single pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pick {
    pub name: String,
    /// Names still waiting this round, in pick order.
    pub remaining: Vec<String>,
    /// The previous round was used up and a new one was shuffled for this pick.
    pub round_restarted: bool,
}

/// Read-only view of the round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub total: usize,
    pub remaining: Vec<String>,
}

pub struct RoundTracker {
    roster: Roster,
    state_path: PathBuf,
}

impl RoundTracker {
    pub fn new(roster: Roster, state_path: impl Into<PathBuf>) -> RoundTracker {
        RoundTracker {
            roster,
            state_path: state_path.into(),
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn state_path(&self) -> &Path {
        &self.state_path
    }

    /// Remaining names for this round.
    ///
    /// A missing store yields a fresh shuffle of the roster that is not saved.
    /// Any other read failure is returned instead of being mistaken for a new
    /// round, so a damaged store never silently restarts the rotation.
    pub fn load_remaining(&self) -> Result<Vec<String>, PickerError> {
        let contents = match fs::read_to_string(&self.state_path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.state_path.display(), "no state file, shuffling roster");
                return Ok(self.shuffled_roster());
            }
            Err(err) => {
                return Err(PickerError::StateUnreadable {
                    path: self.state_path.clone(),
                    source: err,
                })
            }
        };

        let names: Vec<String> = contents
            .lines()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
        debug!(path = %self.state_path.display(), remaining = names.len(), "state loaded");
        Ok(names)
    }

    /// Pick the next person and persist who is left.
    pub fn pick_next(&self) -> Result<Pick, PickerError> {
        let mut remaining = self.load_remaining()?;

        // no one left, start a new round
        let round_restarted = remaining.is_empty();
        if round_restarted {
            info!(total = self.roster.len(), "everyone has had a turn, reshuffling");
            remaining = self.shuffled_roster();
        }

        // first in the shuffled order goes next
        let name = remaining.remove(0);
        self.save_remaining(&remaining)?;
        debug!(picked = %name, remaining = remaining.len(), "picked next");

        Ok(Pick {
            name,
            remaining,
            round_restarted,
        })
    }

    /// Persist the remaining names, removing the store once the round is done.
    pub fn save_remaining(&self, names: &[String]) -> Result<(), PickerError> {
        if names.is_empty() {
            return self.remove_store();
        }

        let mut contents = names.join("\n");
        contents.push('\n');
        write_atomic(&self.state_path, &contents).map_err(|err| PickerError::StateWrite {
            path: self.state_path.clone(),
            source: err,
        })?;
        debug!(path = %self.state_path.display(), remaining = names.len(), "state saved");
        Ok(())
    }

    /// Forget the current round. Returns the roster size.
    pub fn reset(&self) -> Result<usize, PickerError> {
        self.remove_store()?;
        info!(path = %self.state_path.display(), "round reset");
        Ok(self.roster.len())
    }

    pub fn status(&self) -> Result<Status, PickerError> {
        Ok(Status {
            total: self.roster.len(),
            remaining: self.load_remaining()?,
        })
    }

    fn shuffled_roster(&self) -> Vec<String> {
        let mut names = self.roster.members().to_vec();
        names.shuffle(&mut thread_rng());
        names
    }

    fn remove_store(&self) -> Result<(), PickerError> {
        match fs::remove_file(&self.state_path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(PickerError::StateWrite {
                path: self.state_path.clone(),
                source: err,
            }),
        }
    }
}

// write to a sibling temp file and rename it over the store
fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);
    fs::write(&tmp_path, contents)?;
    fs::rename(&tmp_path, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::RosterSource;

    fn roster(names: &[&str]) -> Roster {
        let names = names.iter().map(|name| name.to_string()).collect();
        Roster::from_names(names, &RosterSource::Stdin).expect("roster")
    }

    fn tracker(names: &[&str]) -> (tempfile::TempDir, RoundTracker) {
        let temp = tempfile::tempdir().expect("tempdir");
        let tracker = RoundTracker::new(roster(names), temp.path().join("remaining.txt"));
        (temp, tracker)
    }

    fn sorted(mut names: Vec<String>) -> Vec<String> {
        names.sort();
        names
    }

    #[test]
    fn missing_store_loads_full_roster() {
        let (_temp, tracker) = tracker(&["Alice", "Bob", "Charlie"]);
        let remaining = tracker.load_remaining().expect("load");
        assert_eq!(sorted(remaining), vec!["Alice", "Bob", "Charlie"]);
    }

    #[test]
    fn saved_order_is_loaded_verbatim() {
        let (_temp, tracker) = tracker(&["Alice", "Bob", "Charlie"]);
        let order = vec!["Charlie".to_string(), "Alice".to_string()];
        tracker.save_remaining(&order).expect("save");
        assert_eq!(tracker.load_remaining().expect("load"), order);
    }

    #[test]
    fn blank_lines_in_store_are_ignored() {
        let (_temp, tracker) = tracker(&["Alice", "Bob"]);
        fs::write(tracker.state_path(), "\nBob\n   \nAlice\n").expect("write store");
        assert_eq!(tracker.load_remaining().expect("load"), vec!["Bob", "Alice"]);
    }

    #[test]
    fn pick_takes_first_remaining_and_persists_rest() {
        let (_temp, tracker) = tracker(&["Alice", "Bob", "Charlie"]);
        tracker
            .save_remaining(&["Bob".to_string(), "Charlie".to_string()])
            .expect("save");

        let pick = tracker.pick_next().expect("pick");
        assert_eq!(pick.name, "Bob");
        assert_eq!(pick.remaining, vec!["Charlie"]);
        assert!(!pick.round_restarted);
        assert_eq!(tracker.load_remaining().expect("load"), vec!["Charlie"]);
    }

    #[test]
    fn last_pick_removes_store() {
        let (_temp, tracker) = tracker(&["Alice", "Bob"]);
        tracker.save_remaining(&["Alice".to_string()]).expect("save");

        let pick = tracker.pick_next().expect("pick");
        assert_eq!(pick.name, "Alice");
        assert!(pick.remaining.is_empty());
        assert!(!tracker.state_path().exists());
    }

    #[test]
    fn empty_store_restarts_round() {
        let (_temp, tracker) = tracker(&["Alice", "Bob"]);
        fs::write(tracker.state_path(), "\n\n").expect("write store");

        let pick = tracker.pick_next().expect("pick");
        assert!(pick.round_restarted);
        assert_eq!(pick.remaining.len(), 1);
        assert!(["Alice", "Bob"].contains(&pick.name.as_str()));
    }

    #[test]
    fn reset_is_idempotent() {
        let (_temp, tracker) = tracker(&["Alice", "Bob", "Charlie"]);
        tracker.pick_next().expect("pick");
        assert!(tracker.state_path().exists());

        assert_eq!(tracker.reset().expect("first reset"), 3);
        assert!(!tracker.state_path().exists());
        assert_eq!(tracker.reset().expect("second reset"), 3);
        assert!(!tracker.state_path().exists());
    }

    #[test]
    fn status_does_not_persist_fresh_shuffle() {
        let (_temp, tracker) = tracker(&["Alice", "Bob", "Charlie"]);
        let status = tracker.status().expect("status");
        assert_eq!(status.total, 3);
        assert_eq!(status.remaining.len(), status.total);
        assert!(!tracker.state_path().exists());
    }

    #[test]
    fn unreadable_store_is_reported() {
        let (_temp, tracker) = tracker(&["Alice"]);
        // a directory in place of the store cannot be read as a file
        fs::create_dir(tracker.state_path()).expect("create dir");
        let err = tracker.load_remaining().expect_err("unreadable store");
        assert!(matches!(err, PickerError::StateUnreadable { .. }));
    }

    #[test]
    fn write_failure_is_state_write_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let tracker = RoundTracker::new(
            roster(&["Alice", "Bob"]),
            temp.path().join("missing-dir").join("remaining.txt"),
        );
        let err = tracker.pick_next().expect_err("write failure");
        assert!(matches!(err, PickerError::StateWrite { .. }));
    }
}
