/// Birthday service - occurrence normalization and window filtering
use chrono::{Datelike, NaiveDate};

use crate::models::{BirthdayRecord, Occurrence, Query};
use crate::utils::datetime::{days_until_same_day, occurrence_in_year};

/// Selects and orders the birthdays a run should report on.
///
/// Holds the reference date for the whole run. "Today" is computed once at
/// startup and passed in, never re-read from the clock mid-run.
pub struct BirthdayService {
    reference: NaiveDate,
}

impl BirthdayService {
    /// Create a service pinned to the given reference date
    pub fn new(reference: NaiveDate) -> Self {
        Self { reference }
    }

    /// Project each record's date of birth onto the reference year
    pub fn occurrences(&self, records: Vec<BirthdayRecord>) -> Vec<Occurrence> {
        let year = self.reference.year();
        records
            .into_iter()
            .map(|record| {
                let date = occurrence_in_year(record.date_of_birth, year);
                Occurrence { record, date }
            })
            .collect()
    }

    /// Whether a single occurrence matches the query
    fn matches(&self, occurrence: &Occurrence, query: Query) -> bool {
        let distance = days_until_same_day(self.reference, occurrence.date);
        match query {
            Query::Today => distance == 0,
            // Strict upper bound, no lower bound: same-year dates already
            // behind the reference also match. Long-standing behavior, kept.
            Query::NextWeeks(weeks) => distance < i64::from(weeks) * 7,
            Query::NextWeeksWithPresent(weeks) => {
                distance < i64::from(weeks) * 7 && occurrence.record.has_present()
            }
            Query::ThisMonth => occurrence.date.month() == self.reference.month(),
        }
    }

    /// Filter occurrences by the query, sorted ascending by occurrence date
    pub fn select(&self, occurrences: Vec<Occurrence>, query: Query) -> Vec<Occurrence> {
        let mut selected: Vec<Occurrence> = occurrences
            .into_iter()
            .filter(|occurrence| self.matches(occurrence, query))
            .collect();
        selected.sort_by_key(|occurrence| occurrence.date);
        selected
    }
}
