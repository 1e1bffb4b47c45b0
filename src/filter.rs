use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Month, Months, NaiveDate};

use crate::{CustomerId, Transaction};

/// The month of a calendar day
pub(crate) fn month_of(date: NaiveDate) -> Month {
    Month::try_from(date.month() as u8).expect("valid dates have a month in 1..=12")
}

/// The three letter label of a month (`Jan` .. `Dec`)
pub(crate) fn month_label(month: Month) -> &'static str {
    &month.name()[..3]
}

/// Possible errors to occur while reading a month selection
#[derive(Debug, thiserror::Error)]
#[error("Unknown month selection {0:?}, expected `last3` or a month name like `Jan`")]
pub struct MonthSelectorError(String);

/// The time window transactions are selected from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MonthSelector {
    /// The current month and the two months before it
    LastThree,
    /// A calendar month, in any year
    Month(Month),
}

impl MonthSelector {
    /// The first day of the rolling window, relative to `today`
    ///
    /// The day of month is kept, and clamped to the last day of a shorter
    /// month. Only meaningful for [`MonthSelector::LastThree`].
    pub fn window_start(today: NaiveDate) -> NaiveDate {
        today
            .checked_sub_months(Months::new(2))
            .unwrap_or(NaiveDate::MIN)
    }

    fn matches(&self, date: NaiveDate, window_start: NaiveDate) -> bool {
        match self {
            MonthSelector::LastThree => date >= window_start,
            MonthSelector::Month(month) => month_of(date) == *month,
        }
    }
}

impl Default for MonthSelector {
    fn default() -> Self {
        MonthSelector::LastThree
    }
}

impl FromStr for MonthSelector {
    type Err = MonthSelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "last3" {
            return Ok(MonthSelector::LastThree);
        }

        s.parse::<Month>()
            .map(MonthSelector::Month)
            .map_err(|_| MonthSelectorError(s.to_owned()))
    }
}

impl fmt::Display for MonthSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthSelector::LastThree => f.write_str("last3"),
            MonthSelector::Month(month) => f.write_str(month_label(*month)),
        }
    }
}

/// Selects the transactions of one customer within a time window
///
/// Without a customer nothing is selected. A month selection matches the
/// month name in every year. The rolling window is anchored at `today` and
/// has no upper bound. Transactions without a date never match. The order of
/// the input is kept.
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    customer: Option<CustomerId>,
    month: MonthSelector,
    today: NaiveDate,
) -> Vec<&'a Transaction> {
    let customer = match customer {
        Some(customer) => customer,
        None => return Vec::new(),
    };
    let window_start = MonthSelector::window_start(today);

    let filtered: Vec<_> = transactions
        .iter()
        .filter(|transaction| transaction.customer() == Some(customer))
        .filter(|transaction| {
            transaction
                .date()
                .map_or(false, |date| month.matches(date, window_start))
        })
        .collect();

    log::debug!(
        "{} of {} transactions selected for customer {} ({})",
        filtered.len(),
        transactions.len(),
        customer,
        month,
    );

    filtered
}
