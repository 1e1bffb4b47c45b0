//! Renders a [`Dashboard`] for the terminal, as text with a CSV table or as JSON.

use std::io::{self, Write};

use chrono::NaiveDate;

use crate::{Amount, Customer, Dashboard, MonthlySummary, Page, Transaction, TransactionId};

/// One row of the transaction table
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRow<'a> {
    transaction_id: &'a TransactionId,
    date: Option<NaiveDate>,
    amount: &'a Amount,
    points: u64,
}

impl<'a> From<&'a Transaction> for TransactionRow<'a> {
    fn from(transaction: &'a Transaction) -> Self {
        Self {
            transaction_id: transaction.id(),
            date: transaction.date(),
            amount: transaction.amount(),
            points: transaction.points(),
        }
    }
}

/// The machine readable form of a dashboard page
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport<'a> {
    customers: &'a [Customer],
    summary: &'a MonthlySummary,
    page: usize,
    total_pages: usize,
    transactions: Vec<TransactionRow<'a>>,
}

impl<'a> DashboardReport<'a> {
    pub fn new(dashboard: &'a Dashboard<'_>, page: &Page<'a, &'a Transaction>) -> Self {
        Self {
            customers: dashboard.customers(),
            summary: dashboard.summary(),
            page: page.number(),
            total_pages: page.total_pages(),
            transactions: page.items().iter().map(|t| TransactionRow::from(*t)).collect(),
        }
    }
}

/// Writes the customers available for selection
pub fn write_customers<W: Write>(mut out: W, customers: &[Customer]) -> io::Result<()> {
    writeln!(out, "Customers")?;
    for customer in customers {
        writeln!(out, "  {}: {}", customer.id(), customer.name())?;
    }
    Ok(())
}

/// Writes the monthly points and the total
pub fn write_summary<W: Write>(mut out: W, summary: &MonthlySummary) -> io::Result<()> {
    writeln!(out, "Monthly Points")?;
    if summary.is_empty() {
        writeln!(out, "  No points available for this selection.")?;
    }
    for entry in summary.months() {
        writeln!(out, "  {}: {} points", entry.label(), entry.points())?;
    }
    writeln!(out, "Total Points: {}", summary.total())
}

/// Writes one page of transactions as a CSV table
pub fn write_page<W: Write>(mut out: W, page: &Page<'_, &Transaction>) -> Result<(), csv::Error> {
    writeln!(out, "Transactions")?;
    if page.items().is_empty() {
        writeln!(out, "  No transactions available for this selection.")?;
        return Ok(());
    }

    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(true)
            .from_writer(&mut out);

        for transaction in page.items() {
            writer.serialize(TransactionRow::from(*transaction))?;
        }
        writer.flush()?;
    }

    writeln!(out, "Page {} of {}", page.number(), page.total_pages())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use super::*;
    use crate::{CustomerId, MonthSelector, Selection};

    fn dashboard_output(selection: Selection, page: usize) -> String {
        let transactions: Vec<Transaction> = serde_json::from_str(r#"[
            {"transactionId": "1", "customerId": 1, "date": "2024-01-15", "amount": 120},
            {"transactionId": "2", "customerId": 1, "date": "2024-02-10", "amount": 40},
            {"transactionId": "3", "customerId": 2, "date": "2024-01-20", "amount": 75}
        ]"#).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let dashboard = Dashboard::build(&transactions, &selection, today);
        let page = dashboard.page(page, NonZeroUsize::new(1).unwrap());

        let mut out = Vec::new();
        write_customers(&mut out, dashboard.customers()).unwrap();
        write_summary(&mut out, dashboard.summary()).unwrap();
        write_page(&mut out, &page).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn renders_selection() {
        let selection = Selection {
            customer: Some(CustomerId::new(1)),
            month: MonthSelector::LastThree,
        };

        assert_eq!(
            dashboard_output(selection, 2),
            "Customers\n\
             \x20 1: Customer 1\n\
             \x20 2: Customer 2\n\
             Monthly Points\n\
             \x20 Jan: 90 points\n\
             \x20 Feb: 0 points\n\
             Total Points: 90\n\
             Transactions\n\
             transactionId,date,amount,points\n\
             2,2024-02-10,40,0\n\
             Page 2 of 2\n"
        );
    }

    #[test]
    fn renders_empty_selection() {
        let output = dashboard_output(Selection::default(), 1);
        assert!(output.contains("No points available for this selection.\nTotal Points: 0\n"));
        assert!(output.ends_with("No transactions available for this selection.\n"));
    }

    #[test]
    fn json_report() {
        let transactions: Vec<Transaction> = serde_json::from_str(r#"[
            {"transactionId": 7, "customerId": 1, "date": "2024-01-15", "amount": 120}
        ]"#).unwrap();
        let selection = Selection {
            customer: Some(CustomerId::new(1)),
            month: "Jan".parse().unwrap(),
        };
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let dashboard = Dashboard::build(&transactions, &selection, today);
        let page = dashboard.page(1, NonZeroUsize::new(5).unwrap());

        let json = serde_json::to_value(DashboardReport::new(&dashboard, &page)).unwrap();
        assert_eq!(json["summary"]["total"], 90);
        assert_eq!(json["totalPages"], 1);
        assert_eq!(json["customers"][0]["name"], "Customer 1");
        assert_eq!(json["transactions"][0]["transactionId"], "7");
        assert_eq!(json["transactions"][0]["date"], "2024-01-15");
        assert_eq!(json["transactions"][0]["amount"], 120);
        assert_eq!(json["transactions"][0]["points"], 90);
    }
}
