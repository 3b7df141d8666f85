//! ssb - Command-line sprite sheet builder

use std::process::ExitCode;

use spritesheet_builder::cli;

fn main() -> ExitCode {
    cli::run()
}
