use std::collections::HashSet;
use std::fmt;

use crate::Transaction;

/// The unique identifier of a customer
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CustomerId(i64);

impl CustomerId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for CustomerId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A customer as offered for selection
///
/// There is no customer registry: customers are derived from the transactions
/// that reference them, and their display name is synthesized from the id.
#[derive(Clone, Debug, serde::Serialize, PartialEq, Eq)]
pub struct Customer {
    id: CustomerId,
    name: String,
}

impl Customer {
    /// Creates the customer entry for the specified id
    pub fn new(id: CustomerId) -> Self {
        Self {
            id,
            name: format!("Customer {}", id),
        }
    }

    /// The identifier of the customer
    pub fn id(&self) -> CustomerId {
        self.id
    }

    /// The display name of the customer
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The customers referenced by the transactions, in order of first occurrence
///
/// Transactions without a customer id are skipped.
pub fn distinct_customers(transactions: &[Transaction]) -> Vec<Customer> {
    let mut seen = HashSet::new();

    transactions
        .iter()
        .filter_map(Transaction::customer)
        .filter(|id| seen.insert(*id))
        .map(Customer::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customers_in_first_occurrence_order() {
        let transactions: Vec<Transaction> = serde_json::from_str(r#"[
            {"transactionId": 1, "customerId": 3, "date": "2024-01-01", "amount": 10},
            {"transactionId": 2, "customerId": 1, "date": "2024-01-02", "amount": 20},
            {"transactionId": 3, "customerId": 3, "date": "2024-01-03", "amount": 30},
            {"transactionId": 4, "date": "2024-01-04", "amount": 40},
            {"transactionId": 5, "customerId": 2, "date": "2024-01-05", "amount": 50}
        ]"#).unwrap();

        let customers = distinct_customers(&transactions);
        let ids: Vec<_> = customers.iter().map(Customer::id).collect();
        assert_eq!(ids, vec![CustomerId::new(3), CustomerId::new(1), CustomerId::new(2)]);
        assert_eq!(customers[0].name(), "Customer 3");
    }

    #[test]
    fn no_transactions_no_customers() {
        assert!(distinct_customers(&[]).is_empty());
    }

    #[test]
    fn parse_customer_id() {
        assert_eq!(" 7 ".parse::<CustomerId>().unwrap(), CustomerId::new(7));
        assert_eq!("-2".parse::<CustomerId>().unwrap(), CustomerId::new(-2));
        assert!("seven".parse::<CustomerId>().is_err());
    }
}
