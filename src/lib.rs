pub use self::{
    customer::{distinct_customers, Customer, CustomerId},
    engine::{Dashboard, Selection},
    filter::{filter_transactions, MonthSelector, MonthSelectorError},
    page::{paginate, Page},
    points::{calculate_points, points_for, Amount},
    source::{read_csv, read_json, DataFetchError, FileSource, SourceFormat, TransactionSource},
    summary::{summarize, MonthlyPoints, MonthlySummary},
    transaction::{Transaction, TransactionId},
};

mod customer;
mod engine;
mod filter;
mod page;
mod points;
pub mod report;
mod source;
mod summary;
mod transaction;
