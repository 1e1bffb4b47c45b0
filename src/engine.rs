use std::num::NonZeroUsize;

use chrono::NaiveDate;

use crate::{
    distinct_customers, filter_transactions, paginate, summarize, Customer, CustomerId,
    MonthSelector, MonthlySummary, Page, Transaction,
};

/// What the user is currently looking at
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    /// No customer selected means nothing is shown
    pub customer: Option<CustomerId>,
    pub month: MonthSelector,
}

/// Everything shown for one selection
///
/// A dashboard is computed from scratch for a snapshot of transactions and a
/// selection. Building it twice from the same inputs gives the same result, so
/// callers are free to cache it until either input changes.
#[derive(Debug)]
pub struct Dashboard<'a> {
    /// All customers, independent of the selection
    customers: Vec<Customer>,
    /// The selected transactions, in input order
    transactions: Vec<&'a Transaction>,
    summary: MonthlySummary,
}

impl<'a> Dashboard<'a> {
    /// Computes the dashboard of `selection` with the rolling window anchored at `today`
    pub fn build(transactions: &'a [Transaction], selection: &Selection, today: NaiveDate) -> Self {
        let customers = distinct_customers(transactions);
        let selected = filter_transactions(transactions, selection.customer, selection.month, today);
        let summary = summarize(selected.iter().copied());

        Self {
            customers,
            transactions: selected,
            summary,
        }
    }

    /// The customers available for selection
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// The selected transactions
    pub fn transactions(&self) -> &[&'a Transaction] {
        &self.transactions
    }

    /// The points of the selected transactions
    pub fn summary(&self) -> &MonthlySummary {
        &self.summary
    }

    /// One page of the selected transactions
    pub fn page(&self, page: usize, page_size: NonZeroUsize) -> Page<'_, &'a Transaction> {
        paginate(&self.transactions, page, page_size)
    }
}
