use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::{Amount, CustomerId};

/// The unique identifier of a transaction
///
/// Identifiers are opaque. Numeric ids are kept in their decimal form.
#[derive(Clone, Debug, Default, serde::Serialize, PartialEq, Eq, Hash)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for TransactionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where D: serde::Deserializer<'de>
    {
        deserializer.deserialize_any(TransactionIdVisitor)
    }
}

struct TransactionIdVisitor;

impl<'de> serde::de::Visitor<'de> for TransactionIdVisitor {
    type Value = TransactionId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a transaction id")
    }

    fn visit_i64<E>(self, v: i64) -> Result<TransactionId, E>
        where E: serde::de::Error
    {
        Ok(TransactionId(v.to_string()))
    }

    fn visit_u64<E>(self, v: u64) -> Result<TransactionId, E>
        where E: serde::de::Error
    {
        Ok(TransactionId(v.to_string()))
    }

    fn visit_f64<E>(self, v: f64) -> Result<TransactionId, E>
        where E: serde::de::Error
    {
        Ok(TransactionId(v.to_string()))
    }

    fn visit_bool<E>(self, v: bool) -> Result<TransactionId, E>
        where E: serde::de::Error
    {
        Ok(TransactionId(v.to_string()))
    }

    fn visit_str<E>(self, v: &str) -> Result<TransactionId, E>
        where E: serde::de::Error
    {
        Ok(TransactionId(v.to_owned()))
    }
}

/// A purchase made by a customer
///
/// Transactions are supplied by a data source and never modified. Fields that
/// are missing or cannot be understood are kept as absent, so a single bad
/// field degrades the transaction instead of failing the whole load.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct Transaction {
    #[serde(rename = "transactionId", default)]
    id: TransactionId,
    #[serde(rename = "customerId", default)]
    customer: Option<CustomerId>,
    #[serde(default, deserialize_with = "deserialize_date")]
    date: Option<NaiveDate>,
    #[serde(default)]
    amount: Amount,
}

impl Transaction {
    /// Creates a transaction with all fields present
    pub fn new(id: TransactionId, customer: CustomerId, date: NaiveDate, amount: Amount) -> Self {
        Self {
            id,
            customer: Some(customer),
            date: Some(date),
            amount,
        }
    }

    /// The unique id of the transaction
    pub fn id(&self) -> &TransactionId {
        &self.id
    }

    /// The customer that made the purchase
    pub fn customer(&self) -> Option<CustomerId> {
        self.customer
    }

    /// The day of the purchase
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// The amount spent
    pub fn amount(&self) -> &Amount {
        &self.amount
    }

    /// The points earned by this purchase
    pub fn points(&self) -> u64 {
        crate::calculate_points(&self.amount)
    }
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where D: serde::Deserializer<'de>
{
    let text: Option<String> = serde::Deserialize::deserialize(deserializer)?;
    Ok(text.as_deref().and_then(parse_date))
}

/// Reads the calendar day of a date or date-time string
///
/// Accepts plain dates (`2024-01-15`), RFC 3339 date-times and date-times
/// without an offset. Only the date part is kept.
pub(crate) fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        });

    if date.is_none() {
        log::warn!("unparseable transaction date {:?}", text);
    }
    date
}
