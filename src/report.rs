//! Per-classroom report derivation and rendering.
//!
//! Each report is derived in full before anything is written, so a missing
//! catalog entry aborts without emitting a partial table.

use crate::catalog::Catalog;
use crate::error::Result;
use crate::money::Money;
use crate::roster::Classroom;
use crate::table::{divider, due_date, fit, right, row};
use log::info;
use std::collections::BTreeMap;
use std::io::Write;

const UNRETURNED_WIDTHS: [usize; 3] = [16, 35, 12];
const DEBT_WIDTHS: [usize; 2] = [16, 8];

/// How debts of different patrons are combined into rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DebtGrouping {
    /// One row per display name. Patrons sharing a name are merged.
    #[default]
    ByName,

    /// One row per student, ordered by name then roster position.
    ByPatron,
}

/// One borrowed book with no recorded return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnreturnedRow {
    pub patron: String,
    pub book: String,
    pub due_date: String,
}

/// Accumulated debt for one row of the debts table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebtRow {
    pub patron: String,
    pub owed: Money,
}

/// Debts table contents plus the classroom total.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DebtSummary {
    pub rows: Vec<DebtRow>,
    pub total: Money,
}

/// Derives and writes the two reports for one classroom.
pub struct ReportEngine<'a, W: Write> {
    catalog: &'a Catalog,
    classroom: &'a Classroom,
    out: W,
    grouping: DebtGrouping,
}

impl<'a, W: Write> ReportEngine<'a, W> {
    pub fn new(catalog: &'a Catalog, classroom: &'a Classroom, out: W) -> Self {
        ReportEngine {
            catalog,
            classroom,
            out,
            grouping: DebtGrouping::default(),
        }
    }

    pub fn with_grouping(mut self, grouping: DebtGrouping) -> Self {
        self.grouping = grouping;
        self
    }

    /// Every outstanding loan, ordered by patron name.
    ///
    /// Patrons sharing a name keep roster order, and each patron's loans are
    /// listed in the order they were first recorded.
    pub fn unreturned_loans(&self) -> Result<Vec<UnreturnedRow>> {
        let mut patrons: Vec<_> = self.classroom.values().collect();
        patrons.sort_by(|a, b| a.name().cmp(b.name()));

        let mut rows = Vec::new();
        for patron in patrons {
            for (book_id, loan) in patron.outstanding_loans() {
                let book = self.catalog.lookup(book_id)?;
                rows.push(UnreturnedRow {
                    patron: patron.name().to_string(),
                    book: book.name.clone(),
                    due_date: due_date(loan.due)?,
                });
            }
        }
        Ok(rows)
    }

    /// Sums the price of every unsettled return, per row and per classroom.
    pub fn outstanding_debts(&self) -> Result<DebtSummary> {
        let mut owed: BTreeMap<(&str, usize), Money> = BTreeMap::new();
        let mut total = Money::ZERO;

        for (position, patron) in self.classroom.values().enumerate() {
            for (book_id, _) in patron.owed_returns() {
                let price = self.catalog.lookup(book_id)?.price;
                let key = match self.grouping {
                    DebtGrouping::ByName => (patron.name(), 0),
                    DebtGrouping::ByPatron => (patron.name(), position),
                };
                *owed.entry(key).or_default() += price;
                total += price;
            }
        }

        let rows = owed
            .into_iter()
            .map(|((name, _), owed)| DebtRow {
                patron: name.to_string(),
                owed,
            })
            .collect();

        Ok(DebtSummary { rows, total })
    }

    /// Writes the unreturned-loans table followed by a blank line and
    /// returns the outstanding count.
    pub fn write_unreturned(&mut self) -> Result<usize> {
        let rows = self.unreturned_loans()?;
        let line = divider(&UNRETURNED_WIDTHS.map(|w| w + 2));

        writeln!(self.out, "{}", line)?;
        writeln!(
            self.out,
            "{}",
            row(&[
                fit("Student Name", 16),
                fit("Book", 35),
                fit("Due Date", 12)
            ])
        )?;
        writeln!(self.out, "{}", line)?;

        for entry in &rows {
            writeln!(
                self.out,
                "{}",
                row(&[
                    fit(&entry.patron, UNRETURNED_WIDTHS[0]),
                    fit(&entry.book, UNRETURNED_WIDTHS[1]),
                    fit(&entry.due_date, UNRETURNED_WIDTHS[2]),
                ])
            )?;
        }

        writeln!(self.out, "{}", line)?;
        writeln!(
            self.out,
            "{}",
            row(&[
                fit("Total Books", UNRETURNED_WIDTHS[0] + UNRETURNED_WIDTHS[1] + 3),
                right(&rows.len().to_string(), UNRETURNED_WIDTHS[2]),
            ])
        )?;
        writeln!(self.out, "{}", line)?;
        writeln!(self.out)?;

        info!("Total books currently borrowed: {}", rows.len());
        Ok(rows.len())
    }

    /// Writes the outstanding-debts table followed by a blank line and
    /// returns the classroom total.
    pub fn write_debts(&mut self) -> Result<Money> {
        let summary = self.outstanding_debts()?;
        let line = divider(&DEBT_WIDTHS.map(|w| w + 2));

        writeln!(self.out, "{}", line)?;
        writeln!(
            self.out,
            "{}",
            row(&[fit("Student Name", DEBT_WIDTHS[0]), fit("Due", DEBT_WIDTHS[1])])
        )?;
        writeln!(self.out, "{}", line)?;

        for debt in &summary.rows {
            writeln!(
                self.out,
                "{}",
                row(&[
                    fit(&debt.patron, DEBT_WIDTHS[0]),
                    right(&debt.owed.currency(), DEBT_WIDTHS[1]),
                ])
            )?;
        }

        writeln!(self.out, "{}", line)?;
        writeln!(
            self.out,
            "{}",
            row(&[
                fit("Total Books", DEBT_WIDTHS[0]),
                right(&summary.total.currency(), DEBT_WIDTHS[1]),
            ])
        )?;
        writeln!(self.out, "{}", line)?;
        writeln!(self.out)?;

        info!("Total amount due for books: {}", summary.total.currency());
        Ok(summary.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StandingError;
    use crate::patron::{Patron, ReturnState};
    use crate::record::BookEntry;
    use std::str::FromStr;

    fn catalog() -> Catalog {
        let book = |id: &str, name: &str, price: &str| BookEntry {
            book_id: id.to_string(),
            name: name.to_string(),
            author: "Anon".to_string(),
            price: Money::from_str(price).unwrap(),
        };
        Catalog::from_entries(vec![
            book("B1", "Moby Dick", "10.00"),
            book("B2", "Dune", "7.25"),
            book("B3", "Emma", "3.10"),
        ])
    }

    fn render<F>(classroom: &Classroom, f: F) -> String
    where
        F: FnOnce(&mut ReportEngine<'_, &mut Vec<u8>>),
    {
        let catalog = catalog();
        let mut out = Vec::new();
        {
            let mut engine = ReportEngine::new(&catalog, classroom, &mut out);
            f(&mut engine);
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_single_outstanding_loan() {
        let mut alice = Patron::new("Alice");
        alice.record_loan("B1", 231101, 231201);
        let classroom = Classroom::from([("s1".to_string(), alice)]);

        let output = render(&classroom, |engine| {
            assert_eq!(engine.write_unreturned().unwrap(), 1);
        });

        let expected = "\
+------------------+-------------------------------------+--------------+
| Student Name     | Book                                | Due Date     |
+------------------+-------------------------------------+--------------+
| Alice            | Moby Dick                           | Dec 01, 2023 |
+------------------+-------------------------------------+--------------+
| Total Books                                            |            1 |
+------------------+-------------------------------------+--------------+

";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_owed_return_moves_loan_to_debts() {
        let mut alice = Patron::new("Alice");
        alice.record_loan("B1", 231101, 231201);
        alice.record_return("B1", 231210, ReturnState(1));
        let classroom = Classroom::from([("s1".to_string(), alice)]);

        let output = render(&classroom, |engine| {
            assert_eq!(engine.write_unreturned().unwrap(), 0);
            assert_eq!(engine.write_debts().unwrap().currency(), "$10.00");
        });

        assert!(!output.contains("Moby Dick"));
        let debts: Vec<&str> = output.lines().skip(7).collect();
        assert_eq!(
            debts,
            vec![
                "+------------------+----------+",
                "| Student Name     | Due      |",
                "+------------------+----------+",
                "| Alice            |   $10.00 |",
                "+------------------+----------+",
                "| Total Books      |   $10.00 |",
                "+------------------+----------+",
                "",
            ]
        );
    }

    #[test]
    fn test_settled_return_contributes_nothing() {
        let mut alice = Patron::new("Alice");
        alice.record_loan("B1", 231101, 231201);
        alice.record_return("B1", 231110, ReturnState(0));
        let classroom = Classroom::from([("s1".to_string(), alice)]);
        let catalog = catalog();
        let engine = ReportEngine::new(&catalog, &classroom, Vec::new());

        assert!(engine.unreturned_loans().unwrap().is_empty());
        let debts = engine.outstanding_debts().unwrap();
        assert!(debts.rows.is_empty());
        assert!(debts.total.is_zero());
    }

    #[test]
    fn test_rows_sorted_by_patron_name() {
        let mut zed = Patron::new("Zed");
        zed.record_loan("B2", 231101, 231105);
        zed.record_return("B3", 231101, ReturnState(4));
        let mut amy = Patron::new("Amy");
        amy.record_loan("B1", 231101, 231102);
        amy.record_return("B2", 231101, ReturnState(1));
        let classroom = Classroom::from([("a".to_string(), zed), ("b".to_string(), amy)]);
        let catalog = catalog();
        let engine = ReportEngine::new(&catalog, &classroom, Vec::new());

        let names: Vec<String> = engine
            .unreturned_loans()
            .unwrap()
            .into_iter()
            .map(|r| r.patron)
            .collect();
        assert_eq!(names, vec!["Amy", "Zed"]);

        let debts = engine.outstanding_debts().unwrap();
        let names: Vec<&str> = debts.rows.iter().map(|r| r.patron.as_str()).collect();
        assert_eq!(names, vec!["Amy", "Zed"]);
        assert_eq!(debts.total.currency(), "$10.35");
    }

    #[test]
    fn test_same_name_debts_merge_by_default() {
        let mut first = Patron::new("Sam");
        first.record_return("B1", 231101, ReturnState(1));
        let mut second = Patron::new("Sam");
        second.record_return("B2", 231101, ReturnState(5));
        let classroom = Classroom::from([("s9".to_string(), first), ("s1".to_string(), second)]);
        let catalog = catalog();

        let merged = ReportEngine::new(&catalog, &classroom, Vec::new())
            .outstanding_debts()
            .unwrap();
        assert_eq!(merged.rows.len(), 1);
        assert_eq!(merged.rows[0].owed.currency(), "$17.25");

        let split = ReportEngine::new(&catalog, &classroom, Vec::new())
            .with_grouping(DebtGrouping::ByPatron)
            .outstanding_debts()
            .unwrap();
        let owed: Vec<String> = split.rows.iter().map(|r| r.owed.currency()).collect();
        assert_eq!(owed, vec!["$10.00", "$7.25"]);
        assert_eq!(split.total, merged.total);
    }

    #[test]
    fn test_unreturned_rows_follow_roster_and_loan_order() {
        let mut second_sam = Patron::new("Sam");
        second_sam.record_loan("B3", 231101, 231203);
        let mut first_sam = Patron::new("Sam");
        first_sam.record_loan("B2", 231101, 231202);
        first_sam.record_loan("B1", 231101, 231201);
        let classroom = Classroom::from([
            ("s9".to_string(), first_sam),
            ("s1".to_string(), second_sam),
        ]);
        let catalog = catalog();
        let engine = ReportEngine::new(&catalog, &classroom, Vec::new());

        let books: Vec<String> = engine
            .unreturned_loans()
            .unwrap()
            .into_iter()
            .map(|r| r.book)
            .collect();
        assert_eq!(books, vec!["Dune", "Moby Dick", "Emma"]);
    }

    #[test]
    fn test_long_names_are_truncated() {
        let mut patron = Patron::new("Maximilian Alexander");
        patron.record_return("B1", 231101, ReturnState(1));
        let classroom = Classroom::from([("s1".to_string(), patron)]);

        let output = render(&classroom, |engine| {
            engine.write_debts().unwrap();
        });

        assert!(output.contains("| Maximilian Alexa |   $10.00 |"));
    }

    #[test]
    fn test_missing_book_aborts_without_rows() {
        let mut alice = Patron::new("Alice");
        alice.record_loan("B404", 231101, 231201);
        let classroom = Classroom::from([("s1".to_string(), alice)]);

        let output = render(&classroom, |engine| {
            let err = engine.write_unreturned().unwrap_err();
            assert!(matches!(err, StandingError::NotFound { ref book_id } if book_id == "B404"));
        });

        assert!(output.is_empty());
    }

    #[test]
    fn test_missing_book_in_debts_fails() {
        let mut alice = Patron::new("Alice");
        alice.record_return("B404", 231101, ReturnState(1));
        let classroom = Classroom::from([("s1".to_string(), alice)]);
        let catalog = catalog();
        let engine = ReportEngine::new(&catalog, &classroom, Vec::new());

        assert!(matches!(
            engine.outstanding_debts(),
            Err(StandingError::NotFound { .. })
        ));
    }
}
