//! Load-then-report orchestration.
//!
//! The catalog and roster are built once, completely, before any report is
//! written. Classrooms are then reported in ascending name order into one
//! shared output stream.

use crate::catalog::Catalog;
use crate::config::SourcePaths;
use crate::error::Result;
use crate::money::Money;
use crate::record::{read_entries, LoanRow, PatronRow, ReturnRow};
use crate::report::{DebtGrouping, ReportEngine};
use crate::roster::{ApplySummary, Roster};
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};

/// Counts from applying loan and return events to the roster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub loans: ApplySummary,
    pub returns: ApplySummary,
}

/// Totals reported for one classroom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassroomSummary {
    pub name: String,
    pub outstanding: usize,
    pub owed: Money,
}

/// Totals for a whole run, one entry per classroom in report order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub classrooms: Vec<ClassroomSummary>,
}

/// Loaded library state, ready to report.
#[derive(Debug, Clone)]
pub struct Standing {
    catalog: Catalog,
    roster: Roster,
    load_summary: LoadSummary,
    grouping: DebtGrouping,
}

impl Standing {
    /// Reads all four sources. Patrons are loaded before loans and returns
    /// are applied.
    pub fn load<S, L, T, B>(students: S, loans: L, returns: T, books: B) -> Result<Self>
    where
        S: Read,
        L: Read,
        T: Read,
        B: Read,
    {
        let mut roster = Roster::new();
        roster.load_patrons(read_entries::<PatronRow, _>(students)?);
        let load_summary = LoadSummary {
            loans: roster.apply_loans(read_entries::<LoanRow, _>(loans)?)?,
            returns: roster.apply_returns(read_entries::<ReturnRow, _>(returns)?)?,
        };
        let catalog = Catalog::load(books)?;

        debug!(
            "Loaded {} books, applied {} loans and {} returns",
            catalog.len(),
            load_summary.loans.applied,
            load_summary.returns.applied
        );

        Ok(Standing {
            catalog,
            roster,
            load_summary,
            grouping: DebtGrouping::default(),
        })
    }

    /// Opens and reads the sources named by `paths`.
    pub fn open(paths: &SourcePaths) -> Result<Self> {
        Self::load(
            BufReader::new(File::open(&paths.students)?),
            BufReader::new(File::open(&paths.borrowers)?),
            BufReader::new(File::open(&paths.returns)?),
            BufReader::new(File::open(&paths.books)?),
        )
    }

    /// Selects how the debts table combines patrons.
    pub fn with_grouping(mut self, grouping: DebtGrouping) -> Self {
        self.grouping = grouping;
        self
    }

    pub fn load_summary(&self) -> LoadSummary {
        self.load_summary
    }

    /// Writes every classroom's header line, unreturned-loans table and
    /// outstanding-debts table.
    pub fn write<W: Write>(&self, mut out: W) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        for (name, classroom) in self.roster.classrooms() {
            writeln!(out, "Class: {}", name)?;
            info!("Class: {}", name);

            let mut engine =
                ReportEngine::new(&self.catalog, classroom, &mut out).with_grouping(self.grouping);
            let outstanding = engine.write_unreturned()?;
            let owed = engine.write_debts()?;

            summary.classrooms.push(ClassroomSummary {
                name: name.to_string(),
                outstanding,
                owed,
            });
        }

        out.flush()?;
        Ok(summary)
    }
}

/// Loads the sources under `paths` and writes the report to `paths.output`.
pub fn run(paths: &SourcePaths) -> Result<RunSummary> {
    let standing = Standing::open(paths)?;
    let out = BufWriter::new(File::create(&paths.output)?);
    standing.write(out)
}
