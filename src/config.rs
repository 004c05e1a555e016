// pick_next_rs: command-line and environment configuration
//
// Open Source licensing under terms of GNU General Public License version 3
// SPDX identifier: GPL-3.0-only
// https://opensource.org/licenses/GPL-3.0
// https://www.gnu.org/licenses/gpl-3.0.en.html

use std::{env, ffi::OsString, path::PathBuf};

use clap::{Arg, ArgAction, Command};

use crate::{command::Action, roster::RosterSource};

// constants
pub const DEFAULT_TEAM_FILE: &str = "team.txt";
pub const DEFAULT_STATE_FILE_NAME: &str = "daily-scrum-picker-remaining.txt";
pub const TEAM_FILE_VAR: &str = "TEAM_FILE";
pub const STATE_FILE_VAR: &str = "STATE_FILE";
pub const NO_COLOR_VAR: &str = "NO_COLOR";
const TEAM_PARAM: &str = "team";
const STATE_PARAM: &str = "state";
const NO_COLOR_PARAM: &str = "no-color";
const PICK_CMD: &str = "pick";
const RESET_CMD: &str = "reset";
const STATUS_CMD: &str = "status";

/// Everything the program needs to know before it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Identifier as given (flag, env or default), shown in the banner.
    pub team_file: String,
    pub roster_source: RosterSource,
    pub state_path: PathBuf,
    /// Colors requested; still subject to stdout being a terminal.
    pub color: bool,
    /// Run this single command and exit instead of the interactive loop.
    pub one_shot: Option<Action>,
}

// command-line interface definition
fn cli() -> Command {
    Command::new("pick-next")
        .about("Pick who goes next at the daily scrum, without repeats until everyone has had a turn")
        .arg(
            Arg::new(TEAM_PARAM)
                .short('t')
                .long(TEAM_PARAM)
                .value_name("FILE")
                .num_args(1)
                .help("Team roster file, one name per line ('-' reads stdin) [env: TEAM_FILE]"),
        )
        .arg(
            Arg::new(STATE_PARAM)
                .long(STATE_PARAM)
                .value_name("FILE")
                .num_args(1)
                .help("File that remembers who is left this round [env: STATE_FILE]"),
        )
        .arg(
            Arg::new(NO_COLOR_PARAM)
                .long(NO_COLOR_PARAM)
                .action(ArgAction::SetTrue)
                .help("Disable colored output [env: NO_COLOR]"),
        )
        .subcommand(Command::new(PICK_CMD).about("Pick the next person and exit"))
        .subcommand(Command::new(RESET_CMD).about("Reset the round and exit"))
        .subcommand(Command::new(STATUS_CMD).about("Show who is left this round and exit"))
}

impl Config {
    /// Parse command-line arguments, reading the environment for fallbacks.
    pub fn from_args<I, T>(args: I) -> Result<Config, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = cli().try_get_matches_from(args)?;

        let team_flag = matches.get_one::<String>(TEAM_PARAM).map(String::as_str);
        let state_flag = matches.get_one::<String>(STATE_PARAM).map(String::as_str);
        let team_env = env::var(TEAM_FILE_VAR).ok();
        let state_env = env::var(STATE_FILE_VAR).ok();

        let team_file = resolve_team_file(team_flag, team_env.as_deref());
        let one_shot = match matches.subcommand_name() {
            Some(PICK_CMD) => Some(Action::Pick),
            Some(RESET_CMD) => Some(Action::Reset),
            Some(STATUS_CMD) => Some(Action::Status),
            _ => None,
        };

        Ok(Config {
            roster_source: RosterSource::from_identifier(&team_file),
            team_file,
            state_path: resolve_state_path(state_flag, state_env.as_deref()),
            color: !matches.get_flag(NO_COLOR_PARAM) && env::var_os(NO_COLOR_VAR).is_none(),
            one_shot,
        })
    }
}

// treat empty strings the same as unset
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

/// Roster source identifier: flag, then environment, then `team.txt`.
pub fn resolve_team_file(flag: Option<&str>, env_value: Option<&str>) -> String {
    non_empty(flag)
        .or_else(|| non_empty(env_value))
        .unwrap_or(DEFAULT_TEAM_FILE)
        .to_string()
}

/// State store path: flag, then environment, then a file in the temp directory.
pub fn resolve_state_path(flag: Option<&str>, env_value: Option<&str>) -> PathBuf {
    match non_empty(flag).or_else(|| non_empty(env_value)) {
        Some(path) => PathBuf::from(path),
        None => env::temp_dir().join(DEFAULT_STATE_FILE_NAME),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_file_precedence() {
        let cases = [
            (Some("flag-team.txt"), Some("env-team.txt"), "flag-team.txt"),
            (None, Some("env-team.txt"), "env-team.txt"),
            (None, None, DEFAULT_TEAM_FILE),
            (Some("-"), Some("env-team.txt"), "-"),
            (Some(""), Some("backup-team.txt"), "backup-team.txt"),
            (None, Some(""), DEFAULT_TEAM_FILE),
        ];
        for (flag, env_value, expected) in cases {
            assert_eq!(
                resolve_team_file(flag, env_value),
                expected,
                "flag={flag:?} env={env_value:?}"
            );
        }
    }

    #[test]
    fn state_path_precedence() {
        assert_eq!(
            resolve_state_path(Some("/flag/state.txt"), Some("/custom/path/state.txt")),
            PathBuf::from("/flag/state.txt")
        );
        assert_eq!(
            resolve_state_path(None, Some("/custom/path/state.txt")),
            PathBuf::from("/custom/path/state.txt")
        );
        let default = resolve_state_path(None, Some(""));
        assert!(default.starts_with(env::temp_dir()));
        assert!(default.ends_with(DEFAULT_STATE_FILE_NAME));
    }

    #[test]
    fn parses_flags_and_one_shot_command() {
        let config = Config::from_args([
            "pick-next",
            "--team",
            "-",
            "--state",
            "/tmp/remaining.txt",
            "--no-color",
            "pick",
        ])
        .expect("parse");
        assert_eq!(config.team_file, "-");
        assert_eq!(config.roster_source, RosterSource::Stdin);
        assert_eq!(config.state_path, PathBuf::from("/tmp/remaining.txt"));
        assert!(!config.color);
        assert_eq!(config.one_shot, Some(Action::Pick));
    }

    #[test]
    fn interactive_without_subcommand() {
        let config =
            Config::from_args(["pick-next", "-t", "my-team.txt", "--state", "/tmp/r.txt"])
                .expect("parse");
        assert_eq!(config.roster_source, RosterSource::File(PathBuf::from("my-team.txt")));
        assert_eq!(config.one_shot, None);
    }

    #[test]
    fn rejects_unknown_subcommand() {
        assert!(Config::from_args(["pick-next", "shuffle"]).is_err());
    }
}
