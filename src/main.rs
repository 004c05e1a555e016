// pick who goes next at the daily scrum
// usage: pick-next [--team FILE|-] [--state FILE] [--no-color] [pick|reset|status]

use pick_next_rs::{config::Config, error::PickerError, exit_codes, logging};
use std::{env, process};

// mainline - parse configuration, then hand off to the library
fn main() {
    logging::init();

    // get command-line data; help and version requests exit cleanly through clap
    let config = match Config::from_args(env::args_os()) {
        Ok(config) => config,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            eprintln!("{e}");
            process::exit(exit_codes::CONFIG);
        }
    };

    if let Err(e) = pick_next_rs::run(config) {
        // find our own error at the root of the chain for hint and exit code
        let code = match e.downcast_ref::<PickerError>() {
            Some(picker_err) => {
                // the message already names the underlying cause
                eprintln!("Error: {picker_err}");
                if let Some(hint) = picker_err.hint() {
                    eprintln!("{hint}");
                }
                picker_err.exit_code()
            }
            None => {
                eprintln!("Error: {e:#}");
                exit_codes::IO
            }
        };
        process::exit(code);
    }
}
