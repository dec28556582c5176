//! Patron model: one student and their loan and return history.

use indexmap::IndexMap;

/// An active loan of one book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoanRecord {
    /// YYMMDD timestamp the book was taken out.
    pub when_borrowed: i64,

    /// YYMMDD timestamp the book is due back.
    pub due: i64,
}

/// Outcome code recorded when a book came back.
///
/// Codes 0, 2 and 3 settle the loan. Every other code, including 1, means
/// the patron owes the price of the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReturnState(pub i64);

impl ReturnState {
    /// Returns `true` if this outcome carries no debt.
    pub fn is_settled(&self) -> bool {
        matches!(self.0, 0 | 2 | 3)
    }
}

/// A recorded return of one book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReturnRecord {
    /// YYMMDD timestamp the book came back.
    pub when_returned: i64,

    /// Outcome of the return.
    pub state: ReturnState,
}

impl ReturnRecord {
    /// Returns `true` if the patron owes the book's price for this return.
    pub fn is_owed(&self) -> bool {
        !self.state.is_settled()
    }
}

/// A student using the library.
///
/// Loans and returns are keyed by book id and kept in the order each book
/// was first recorded. A later record for the same book replaces the earlier
/// one in place. Returns are accepted whether or not a matching loan exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patron {
    name: String,
    loans: IndexMap<String, LoanRecord>,
    returns: IndexMap<String, ReturnRecord>,
}

impl Patron {
    /// Creates a patron with no history.
    pub fn new(name: impl Into<String>) -> Self {
        Patron {
            name: name.into(),
            loans: IndexMap::new(),
            returns: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inserts or replaces the loan for `book_id`.
    pub fn record_loan(&mut self, book_id: impl Into<String>, when_borrowed: i64, due: i64) {
        self.loans.insert(book_id.into(), LoanRecord { when_borrowed, due });
    }

    /// Inserts or replaces the return for `book_id`.
    pub fn record_return(
        &mut self,
        book_id: impl Into<String>,
        when_returned: i64,
        state: ReturnState,
    ) {
        self.returns.insert(
            book_id.into(),
            ReturnRecord {
                when_returned,
                state,
            },
        );
    }

    pub fn loans(&self) -> &IndexMap<String, LoanRecord> {
        &self.loans
    }

    pub fn returns(&self) -> &IndexMap<String, ReturnRecord> {
        &self.returns
    }

    /// Loans with no return ever recorded, in first-recorded order.
    ///
    /// The state of a return does not matter here: any return record closes
    /// the loan, even one that leaves a debt.
    pub fn outstanding_loans(&self) -> impl Iterator<Item = (&str, &LoanRecord)> {
        self.loans
            .iter()
            .filter(move |(book_id, _)| !self.returns.contains_key(*book_id))
            .map(|(book_id, loan)| (book_id.as_str(), loan))
    }

    /// Returns that leave the patron owing the book's price, in first-recorded
    /// order.
    pub fn owed_returns(&self) -> impl Iterator<Item = (&str, &ReturnRecord)> {
        self.returns
            .iter()
            .filter(|(_, ret)| ret.is_owed())
            .map(|(book_id, ret)| (book_id.as_str(), ret))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_patron_has_no_history() {
        let patron = Patron::new("Alice");
        assert_eq!(patron.name(), "Alice");
        assert!(patron.loans().is_empty());
        assert!(patron.returns().is_empty());
    }

    #[test]
    fn test_settled_state_codes() {
        for code in [0, 2, 3] {
            assert!(ReturnState(code).is_settled(), "code {} should settle", code);
        }
        for code in [1, 4, 5, -1, 99] {
            assert!(!ReturnState(code).is_settled(), "code {} should owe", code);
        }
    }

    #[test]
    fn test_later_loan_replaces_earlier() {
        let mut patron = Patron::new("Alice");
        patron.record_loan("B1", 231101, 231201);
        patron.record_loan("B1", 231105, 231205);

        assert_eq!(patron.loans().len(), 1);
        assert_eq!(
            patron.loans()["B1"],
            LoanRecord {
                when_borrowed: 231105,
                due: 231205
            }
        );
    }

    #[test]
    fn test_later_return_replaces_earlier() {
        let mut patron = Patron::new("Alice");
        patron.record_return("B1", 231110, ReturnState(1));
        patron.record_return("B1", 231112, ReturnState(0));

        assert_eq!(patron.returns().len(), 1);
        assert!(!patron.returns()["B1"].is_owed());
    }

    #[test]
    fn test_outstanding_ignores_return_state() {
        let mut patron = Patron::new("Alice");
        patron.record_loan("B1", 231101, 231201);
        patron.record_loan("B2", 231101, 231201);
        patron.record_loan("B3", 231101, 231201);
        patron.record_return("B1", 231110, ReturnState(0));
        patron.record_return("B2", 231110, ReturnState(1));

        let outstanding: Vec<&str> = patron.outstanding_loans().map(|(id, _)| id).collect();
        assert_eq!(outstanding, vec!["B3"]);
    }

    #[test]
    fn test_loans_keep_first_recorded_order() {
        let mut patron = Patron::new("Alice");
        patron.record_loan("B2", 231101, 231201);
        patron.record_loan("B1", 231101, 231202);
        patron.record_loan("B3", 231101, 231203);
        patron.record_loan("B2", 231105, 231210);

        let order: Vec<&str> = patron.outstanding_loans().map(|(id, _)| id).collect();
        assert_eq!(order, vec!["B2", "B1", "B3"]);
        assert_eq!(patron.loans()["B2"].due, 231210);
    }

    #[test]
    fn test_return_without_loan_is_kept() {
        let mut patron = Patron::new("Alice");
        patron.record_return("B9", 231110, ReturnState(4));

        assert!(patron.loans().is_empty());
        let owed: Vec<&str> = patron.owed_returns().map(|(id, _)| id).collect();
        assert_eq!(owed, vec!["B9"]);
    }
}
