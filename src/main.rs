//! docnav - Browse product documentation from the terminal

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = docnav_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
