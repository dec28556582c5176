//! Source record readers and typed entries.
//!
//! Every source is a header-less flat file with one record per line. Lines
//! are split on a per-source delimiter with quoting disabled, so text fields
//! are taken verbatim. Book prices are coerced as soon as the field count has
//! been checked. Loan and return fields stay raw until the event is applied
//! to a listed student, so rows for unknown students never fail the run.

use crate::error::{Result, StandingError};
use crate::money::Money;
use crate::patron::ReturnState;
use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::io::Read;
use std::str::FromStr;

/// A raw record shape read from one source file.
pub trait SourceRow: DeserializeOwned {
    /// Entry produced from the raw fields.
    type Entry;

    /// Source name used in error messages.
    const SOURCE: &'static str;

    /// Field delimiter.
    const DELIMITER: u8;

    /// Exact number of fields per record.
    const FIELDS: usize;

    /// Builds the entry, coercing any field needed before matching.
    fn parse(self, line: usize) -> Result<Self::Entry>;
}

/// Reads every record of a source, failing on the first bad line.
pub fn read_entries<S: SourceRow, R: Read>(reader: R) -> Result<Vec<S::Entry>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(S::DELIMITER)
        .quoting(false)
        .flexible(true)
        .trim(Trim::None)
        .from_reader(reader);

    let mut entries = Vec::new();
    for (idx, result) in csv_reader.records().enumerate() {
        let record = result?;
        let line = line_of(&record, idx);
        entries.push(parse_record::<S>(&record, line)?);
    }

    debug!("{}: read {} records", S::SOURCE, entries.len());
    Ok(entries)
}

fn line_of(record: &StringRecord, idx: usize) -> usize {
    record
        .position()
        .map(|p| p.line() as usize)
        .unwrap_or(idx + 1)
}

fn parse_record<S: SourceRow>(record: &StringRecord, line: usize) -> Result<S::Entry> {
    if record.len() != S::FIELDS {
        return Err(StandingError::MalformedRecord {
            source_name: S::SOURCE,
            line,
            expected: S::FIELDS,
            found: record.len(),
        });
    }
    let row: S = record.deserialize(None)?;
    row.parse(line)
}

fn coerce<T: FromStr>(
    source: &'static str,
    line: usize,
    field: &'static str,
    value: &str,
) -> Result<T> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| StandingError::Coercion {
            source_name: source,
            line,
            field,
            value: value.to_string(),
        })
}

/// One line of the roster source: `studentId,name,classroom`.
#[derive(Debug, Deserialize)]
pub struct PatronRow {
    pub student_id: String,
    pub name: String,
    pub classroom: String,
}

/// A student listed in the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatronEntry {
    pub student_id: String,
    pub name: String,
    pub classroom: String,
}

impl SourceRow for PatronRow {
    type Entry = PatronEntry;

    const SOURCE: &'static str = "students";
    const DELIMITER: u8 = b',';
    const FIELDS: usize = 3;

    fn parse(self, _line: usize) -> Result<PatronEntry> {
        Ok(PatronEntry {
            student_id: self.student_id,
            name: self.name,
            classroom: self.classroom,
        })
    }
}

/// One line of the loan source: `bookId;studentId;whenBorrowed;due`.
#[derive(Debug, Deserialize)]
pub struct LoanRow {
    pub book_id: String,
    pub student_id: String,
    pub when_borrowed: String,
    pub due: String,
}

/// A loan event, ready to be applied to a patron.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanEntry {
    pub line: usize,
    pub book_id: String,
    pub student_id: String,
    pub when_borrowed: String,
    pub due: String,
}

impl LoanEntry {
    /// Coerces `(whenBorrowed, due)` to integers.
    pub fn timestamps(&self) -> Result<(i64, i64)> {
        let source = LoanRow::SOURCE;
        Ok((
            coerce(source, self.line, "whenBorrowed", &self.when_borrowed)?,
            coerce(source, self.line, "due", &self.due)?,
        ))
    }
}

impl SourceRow for LoanRow {
    type Entry = LoanEntry;

    const SOURCE: &'static str = "borrowers";
    const DELIMITER: u8 = b';';
    const FIELDS: usize = 4;

    fn parse(self, line: usize) -> Result<LoanEntry> {
        Ok(LoanEntry {
            line,
            book_id: self.book_id,
            student_id: self.student_id,
            when_borrowed: self.when_borrowed,
            due: self.due,
        })
    }
}

/// One line of the return source: `bookId;studentId;whenReturned;state`.
#[derive(Debug, Deserialize)]
pub struct ReturnRow {
    pub book_id: String,
    pub student_id: String,
    pub when_returned: String,
    pub state: String,
}

/// A return event, ready to be applied to a patron.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnEntry {
    pub line: usize,
    pub book_id: String,
    pub student_id: String,
    pub when_returned: String,
    pub state: String,
}

impl ReturnEntry {
    /// Coerces `(whenReturned, state)`.
    pub fn outcome(&self) -> Result<(i64, ReturnState)> {
        let source = ReturnRow::SOURCE;
        Ok((
            coerce(source, self.line, "whenReturned", &self.when_returned)?,
            ReturnState(coerce(source, self.line, "state", &self.state)?),
        ))
    }
}

impl SourceRow for ReturnRow {
    type Entry = ReturnEntry;

    const SOURCE: &'static str = "returns";
    const DELIMITER: u8 = b';';
    const FIELDS: usize = 4;

    fn parse(self, line: usize) -> Result<ReturnEntry> {
        Ok(ReturnEntry {
            line,
            book_id: self.book_id,
            student_id: self.student_id,
            when_returned: self.when_returned,
            state: self.state,
        })
    }
}

/// One line of the catalog source: `bookId#name#author#price`.
#[derive(Debug, Deserialize)]
pub struct BookRow {
    pub book_id: String,
    pub name: String,
    pub author: String,
    pub price: String,
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookEntry {
    pub book_id: String,
    pub name: String,
    pub author: String,
    pub price: Money,
}

impl SourceRow for BookRow {
    type Entry = BookEntry;

    const SOURCE: &'static str = "books";
    const DELIMITER: u8 = b'#';
    const FIELDS: usize = 4;

    fn parse(self, line: usize) -> Result<BookEntry> {
        Ok(BookEntry {
            price: coerce(Self::SOURCE, line, "price", &self.price)?,
            book_id: self.book_id,
            name: self.name,
            author: self.author,
        })
    }
}
