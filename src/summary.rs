use chrono::Month;

use crate::filter::{month_label, month_of};
use crate::Transaction;

/// The points earned in one month
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonthlyPoints {
    /// `None` collects purchases without a date
    month: Option<Month>,
    points: u64,
}

impl MonthlyPoints {
    pub fn month(&self) -> Option<Month> {
        self.month
    }

    pub fn points(&self) -> u64 {
        self.points
    }

    /// The short month name, or `Undated`
    pub fn label(&self) -> &'static str {
        self.month.map_or("Undated", month_label)
    }
}

impl serde::Serialize for MonthlyPoints {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where S: serde::Serializer
    {
        use serde::ser::SerializeStruct;
        let mut map = serializer.serialize_struct("MonthlyPoints", 2)?;

        map.serialize_field("month", self.label())?;
        map.serialize_field("points", &self.points)?;

        map.end()
    }
}

/// The points earned per month and in total
///
/// Months appear in the order they first occur in the summarized
/// transactions. Months are grouped by name only, so purchases from the same
/// month of different years share one entry.
#[derive(Clone, Debug, Default, serde::Serialize, PartialEq, Eq)]
pub struct MonthlySummary {
    months: Vec<MonthlyPoints>,
    total: u64,
}

impl MonthlySummary {
    /// The per month entries
    pub fn months(&self) -> &[MonthlyPoints] {
        &self.months
    }

    /// The points earned over all summarized transactions
    pub fn total(&self) -> u64 {
        self.total
    }

    /// The points earned in the specified month, if it occurred at all
    pub fn points_in(&self, month: Month) -> Option<u64> {
        self.months
            .iter()
            .find(|entry| entry.month == Some(month))
            .map(MonthlyPoints::points)
    }

    /// Whether no transaction was summarized
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    fn add(&mut self, month: Option<Month>, points: u64) {
        let entry = match self.months.iter_mut().position(|entry| entry.month == month) {
            Some(index) => &mut self.months[index],
            None => {
                self.months.push(MonthlyPoints { month, points: 0 });
                self.months.last_mut().expect("entry just added")
            }
        };

        entry.points = entry.points.saturating_add(points);
        self.total = self.total.saturating_add(points);
    }
}

/// Sums the points of the transactions per month
pub fn summarize<'a, I>(transactions: I) -> MonthlySummary
    where I: IntoIterator<Item = &'a Transaction>
{
    let mut summary = MonthlySummary::default();

    for transaction in transactions {
        summary.add(transaction.date().map(month_of), transaction.points());
    }

    summary
}
