//! # Library Standing
//!
//! A batch report generator that joins a library's catalog, its patrons and
//! their loan and return history, then writes per-classroom tables of
//! outstanding loans and outstanding debts.
//!
//! ## Design Principles
//!
//! - **Load, then report**: all sources are read and joined before any output
//! - **Fixed-point money**: prices and debts use `rust_decimal`
//! - **Fail fast**: any malformed record or unknown book aborts the run
//! - **Deterministic output**: classrooms, patrons and books are ordered
//!
//! ## Example
//!
//! ```no_run
//! use library_standing::Standing;
//! use std::io::Cursor;
//!
//! let standing = Standing::load(
//!     Cursor::new("s1,Alice,5A\n"),
//!     Cursor::new("B1;s1;231101;231201\n"),
//!     Cursor::new(""),
//!     Cursor::new("B1#Moby Dick#Herman Melville#10.00\n"),
//! )
//! .unwrap();
//! standing.write(std::io::stdout()).unwrap();
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod money;
pub mod patron;
pub mod record;
pub mod report;
pub mod roster;
pub mod standing;
pub mod table;

pub use catalog::{BookRecord, Catalog};
pub use config::SourcePaths;
pub use error::{Result, StandingError};
pub use money::Money;
pub use patron::{LoanRecord, Patron, ReturnRecord, ReturnState};
pub use report::{DebtGrouping, DebtRow, DebtSummary, ReportEngine, UnreturnedRow};
pub use roster::{ApplySummary, Classroom, Roster};
pub use standing::{run, ClassroomSummary, LoadSummary, RunSummary, Standing};
