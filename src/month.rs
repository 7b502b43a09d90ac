//! Calendar months and ordering of stored month names.

use std::{fmt::Display, str::FromStr};

/// A calendar month, in calendar order.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// All twelve months from January to December.
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// The English name of the month as it is stored in the database, e.g. "March".
    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }
}

impl Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The month name did not exactly match a calendar month name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("\"{0}\" is not the name of a month")]
pub struct InvalidMonth(pub String);

impl FromStr for Month {
    type Err = InvalidMonth;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Month::ALL
            .into_iter()
            .find(|month| month.name() == s)
            .ok_or_else(|| InvalidMonth(s.to_owned()))
    }
}

impl From<time::Month> for Month {
    fn from(value: time::Month) -> Self {
        Month::ALL[usize::from(u8::from(value)) - 1]
    }
}

/// Sort month names into calendar order, January first.
///
/// Month names are free text in the database. Names that are not calendar
/// month names sort before January and keep their relative order.
pub fn sort_months(months: &mut [String]) {
    months.sort_by_key(|name| name.parse::<Month>().ok());
}
