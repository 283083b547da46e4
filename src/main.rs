//! Binary entrypoint for the `LexiMind` server.

use std::process::ExitCode;

use leximind::start_leximind;

fn main() -> ExitCode {
    start_leximind::run()
}
