use chrono::NaiveDate;

use crate::utils::string_utils::is_empty_or_whitespace;

/// A single birthday row read from the spreadsheet
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BirthdayRecord {
    pub name: String,
    pub date_of_birth: NaiveDate,
    /// Present idea for this person; empty string means none
    pub present_note: String,
}

impl BirthdayRecord {
    /// Whether a present note has been filled in for this person
    pub fn has_present(&self) -> bool {
        !is_empty_or_whitespace(&self.present_note)
    }
}

/// A birthday projected onto the reference year, used for proximity checks
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Occurrence {
    pub record: BirthdayRecord,
    /// The date of birth with its year replaced by the reference year
    pub date: NaiveDate,
}

/// Which birthdays a run should report on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Query {
    /// Birthdays falling on the reference date
    Today,
    /// Birthdays within the next N weeks
    NextWeeks(u32),
    /// Birthdays within the next N weeks that have a present note
    NextWeeksWithPresent(u32),
    /// Birthdays in the reference date's calendar month
    ThisMonth,
}

impl Query {
    /// Intro line placed above the rendered birthday list
    pub fn intro(&self) -> String {
        match self {
            Query::Today => "Today's birthdays".to_string(),
            Query::NextWeeks(weeks) => {
                format!("Birthdays in the next {} weeks:", weeks)
            }
            Query::NextWeeksWithPresent(weeks) => {
                format!("Birthdays with presents for the next {} weeks", weeks)
            }
            Query::ThisMonth => "Birthdays this month".to_string(),
        }
    }
}

pub type Error = Box<dyn std::error::Error + Send + Sync>;
