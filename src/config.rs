//! Locations of the source files and the report.

use std::path::{Path, PathBuf};

pub const STUDENTS_FILE: &str = "students.txt";
pub const BORROWERS_FILE: &str = "borrowers.txt";
pub const RETURNS_FILE: &str = "returns.txt";
pub const BOOKS_FILE: &str = "books.txt";
pub const OUTPUT_FILE: &str = "standing.txt";

/// Paths of the four sources and the output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePaths {
    pub students: PathBuf,
    pub borrowers: PathBuf,
    pub returns: PathBuf,
    pub books: PathBuf,
    pub output: PathBuf,
}

impl SourcePaths {
    /// Resolves the fixed file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        SourcePaths {
            students: dir.join(STUDENTS_FILE),
            borrowers: dir.join(BORROWERS_FILE),
            returns: dir.join(RETURNS_FILE),
            books: dir.join(BOOKS_FILE),
            output: dir.join(OUTPUT_FILE),
        }
    }
}

impl Default for SourcePaths {
    fn default() -> Self {
        Self::in_dir(".")
    }
}
