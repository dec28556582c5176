//! Library Standing CLI
//!
//! Reads `students.txt`, `borrowers.txt`, `returns.txt` and `books.txt` from a
//! data directory and writes `standing.txt` next to them.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- path/to/data
//! ```
//!
//! The directory defaults to the current one.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Defaults to `info`, which prints per-classroom totals

use library_standing::{run, SourcePaths};
use std::env;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let dir = env::args().nth(1).unwrap_or_else(|| ".".to_string());
    let paths = SourcePaths::in_dir(dir);

    if let Err(e) = run(&paths) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
