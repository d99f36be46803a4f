//! The main entry point for the program.
use dualcredit::cli;

fn main() {
    if let Err(err) = cli::run_cli() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}
