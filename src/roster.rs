//! Classroom roster and application of loan/return events to patrons.

use crate::error::Result;
use crate::patron::Patron;
use crate::record::{LoanEntry, PatronEntry, ReturnEntry};
use indexmap::IndexMap;
use log::{debug, warn};
use std::collections::{BTreeMap, HashMap};

/// Patrons of one classroom, keyed by student id, in roster order.
pub type Classroom = IndexMap<String, Patron>;

/// Outcome of applying one batch of loan or return events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplySummary {
    /// Events that reached at least one patron.
    pub applied: usize,

    /// Events whose student id is not on the roster.
    pub dropped: usize,
}

/// All patrons, grouped by classroom.
///
/// Classrooms are created on first encounter. An index from student id to
/// the classrooms listing that id lets events reach their patrons without
/// scanning every classroom; an event reaches every patron carrying its id.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    classrooms: BTreeMap<String, Classroom>,
    index: HashMap<String, Vec<String>>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a patron per entry. Re-listing a student id in the same
    /// classroom replaces that patron but keeps its roster position.
    pub fn load_patrons<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = PatronEntry>,
    {
        for entry in entries {
            let rooms = self.index.entry(entry.student_id.clone()).or_default();
            if !rooms.contains(&entry.classroom) {
                rooms.push(entry.classroom.clone());
            }

            self.classrooms
                .entry(entry.classroom)
                .or_default()
                .insert(entry.student_id, Patron::new(entry.name));
        }
    }

    /// Records each loan on the patrons it names. Unknown students are
    /// dropped and counted before their timestamps are read.
    pub fn apply_loans<I>(&mut self, entries: I) -> Result<ApplySummary>
    where
        I: IntoIterator<Item = LoanEntry>,
    {
        let mut summary = ApplySummary::default();
        for loan in entries {
            if !self.is_listed(&loan.student_id) {
                summary.record_dropped("loan", loan.line, &loan.student_id);
                continue;
            }

            let (when_borrowed, due) = loan.timestamps()?;
            self.for_each_patron(&loan.student_id, |patron| {
                patron.record_loan(loan.book_id.as_str(), when_borrowed, due);
            });
            summary.record_applied("loan", loan.line, &loan.student_id);
        }
        if summary.dropped > 0 {
            warn!("Dropped {} loan records for unknown students", summary.dropped);
        }
        Ok(summary)
    }

    /// Records each return on the patrons it names. Unknown students are
    /// dropped and counted before their fields are read.
    pub fn apply_returns<I>(&mut self, entries: I) -> Result<ApplySummary>
    where
        I: IntoIterator<Item = ReturnEntry>,
    {
        let mut summary = ApplySummary::default();
        for ret in entries {
            if !self.is_listed(&ret.student_id) {
                summary.record_dropped("return", ret.line, &ret.student_id);
                continue;
            }

            let (when_returned, state) = ret.outcome()?;
            self.for_each_patron(&ret.student_id, |patron| {
                patron.record_return(ret.book_id.as_str(), when_returned, state);
            });
            summary.record_applied("return", ret.line, &ret.student_id);
        }
        if summary.dropped > 0 {
            warn!("Dropped {} return records for unknown students", summary.dropped);
        }
        Ok(summary)
    }

    /// Patrons are never removed, so an indexed id always has a patron.
    fn is_listed(&self, student_id: &str) -> bool {
        self.index.contains_key(student_id)
    }

    fn for_each_patron<F>(&mut self, student_id: &str, mut apply: F)
    where
        F: FnMut(&mut Patron),
    {
        let Some(rooms) = self.index.get(student_id) else {
            return;
        };

        for room in rooms {
            if let Some(patron) = self
                .classrooms
                .get_mut(room)
                .and_then(|classroom| classroom.get_mut(student_id))
            {
                apply(patron);
            }
        }
    }

    /// Classrooms in ascending name order.
    pub fn classrooms(&self) -> impl Iterator<Item = (&str, &Classroom)> {
        self.classrooms
            .iter()
            .map(|(name, classroom)| (name.as_str(), classroom))
    }

    pub fn classroom(&self, name: &str) -> Option<&Classroom> {
        self.classrooms.get(name)
    }

    /// Finds a patron by student id, searching classrooms in name order.
    pub fn patron(&self, student_id: &str) -> Option<&Patron> {
        self.classrooms
            .values()
            .find_map(|classroom| classroom.get(student_id))
    }
}

impl ApplySummary {
    fn record_applied(&mut self, kind: &str, line: usize, student_id: &str) {
        self.applied += 1;
        debug!("Line {}: applied {} for student {}", line, kind, student_id);
    }

    fn record_dropped(&mut self, kind: &str, line: usize, student_id: &str) {
        self.dropped += 1;
        warn!(
            "Line {}: {} references unknown student {}, ignoring",
            line, kind, student_id
        );
    }
}
