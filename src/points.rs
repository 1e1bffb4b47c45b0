use std::fmt;

use fixed::types::I51F13;

/// The monetary amount of a purchase
///
/// Amounts arrive either as JSON/CSV numbers or as numeric strings. Anything
/// that cannot be read as a number is kept as an amount without a value, which
/// earns no points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Amount {
    value: Option<I51F13>,
}

impl Amount {
    /// Reads an amount from its textual form
    ///
    /// Surrounding whitespace is ignored. Text that is not a number yields an
    /// amount without a value.
    pub fn parse(text: &str) -> Self {
        Self {
            value: text.trim().parse().ok().and_then(floor_to_fixed),
        }
    }

    /// The numeric value, if the amount was numeric
    pub fn value(&self) -> Option<I51F13> {
        self.value
    }
}

impl From<I51F13> for Amount {
    fn from(value: I51F13) -> Self {
        Self { value: Some(value) }
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Self {
            value: Some(I51F13::saturating_from_num(value)),
        }
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Self {
            value: floor_to_fixed(value),
        }
    }
}

/// Moves a float onto the fixed-point grid, rounding toward negative infinity
///
/// Rounding down keeps the final floor of the points exact: `50.99999` must
/// not turn into `51`. Values out of range saturate, NaN has no value.
fn floor_to_fixed(value: f64) -> Option<I51F13> {
    if value.is_nan() {
        return None;
    }

    let scale = f64::from(1u32 << I51F13::FRAC_NBITS);
    let floored = (value * scale).floor() / scale;

    match I51F13::checked_from_num(floored) {
        Some(fixed) => Some(fixed),
        None => {
            log::warn!("amount {} is out of range and was clamped", value);
            Some(I51F13::saturating_from_num(floored))
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(value) => write!(f, "{}", value),
            None => f.write_str("n/a"),
        }
    }
}

impl serde::Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where S: serde::Serializer
    {
        // whole amounts as integers: `120`, not `120.0`
        match self.value {
            Some(value) if value.frac() == I51F13::ZERO => serializer.serialize_i64(value.to_num()),
            Some(value) => serializer.serialize_f64(value.to_num()),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> serde::Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where D: serde::Deserializer<'de>
    {
        deserializer.deserialize_any(AmountVisitor)
    }
}

struct AmountVisitor;

impl<'de> serde::de::Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a numeric string")
    }

    fn visit_i64<E>(self, v: i64) -> Result<Amount, E>
        where E: serde::de::Error
    {
        Ok(Amount::from(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Amount, E>
        where E: serde::de::Error
    {
        Ok(Amount { value: Some(I51F13::saturating_from_num(v)) })
    }

    fn visit_f64<E>(self, v: f64) -> Result<Amount, E>
        where E: serde::de::Error
    {
        Ok(Amount::from(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<Amount, E>
        where E: serde::de::Error
    {
        let amount = Amount::parse(v);
        if amount.value.is_none() {
            log::warn!("amount {:?} is not numeric and earns no points", v);
        }
        Ok(amount)
    }

    fn visit_bool<E>(self, _: bool) -> Result<Amount, E>
        where E: serde::de::Error
    {
        Ok(Amount::default())
    }

    fn visit_unit<E>(self) -> Result<Amount, E>
        where E: serde::de::Error
    {
        Ok(Amount::default())
    }

    fn visit_none<E>(self) -> Result<Amount, E>
        where E: serde::de::Error
    {
        Ok(Amount::default())
    }
}

/// The points earned for a purchase of the given amount
///
/// Purchases earn 1 point for every dollar spent above 50 up to 100, and 2
/// points for every dollar spent above 100. Amounts that are not numeric earn
/// nothing.
pub fn calculate_points(amount: &Amount) -> u64 {
    amount.value().map_or(0, points_for)
}

/// The points earned for a numeric amount
///
/// The tiers are applied to the exact value and the result is floored, so
/// fractional amounts never produce fractional points.
pub fn points_for(amount: I51F13) -> u64 {
    let fifty = I51F13::from_num(50);
    let hundred = I51F13::from_num(100);

    let points = if amount > hundred {
        (amount - hundred)
            .saturating_mul_int(2)
            .saturating_add(fifty)
    } else if amount > fifty {
        amount - fifty
    } else {
        I51F13::ZERO
    };

    // points is never negative here
    points.floor().to_num::<u64>()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(amount: i64) -> u64 {
        calculate_points(&Amount::from(amount))
    }

    #[test]
    fn amount_above_hundred() {
        assert_eq!(points(120), 90);
        assert_eq!(points(101), 52);
    }

    #[test]
    fn amount_between_fifty_and_hundred() {
        assert_eq!(points(75), 25);
        assert_eq!(points(51), 1);
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(points(50), 0);
        assert_eq!(points(100), 50);
    }

    #[test]
    fn amount_up_to_fifty_earns_nothing() {
        assert_eq!(points(40), 0);
        assert_eq!(points(0), 0);
        assert_eq!(points(-20), 0);
        assert_eq!(calculate_points(&Amount::from(-250.5)), 0);
    }

    #[test]
    fn non_numeric_amount_earns_nothing() {
        assert_eq!(calculate_points(&Amount::parse("abc")), 0);
        assert_eq!(calculate_points(&Amount::parse("")), 0);
        assert_eq!(calculate_points(&Amount::from(f64::NAN)), 0);
        assert_eq!(calculate_points(&Amount::default()), 0);
    }

    #[test]
    fn numeric_strings_are_coerced() {
        assert_eq!(calculate_points(&Amount::parse("120")), 90);
        assert_eq!(calculate_points(&Amount::parse(" 75 ")), 25);
    }

    #[test]
    fn fractional_amounts_are_floored() {
        assert_eq!(calculate_points(&Amount::from(75.5)), 25);
        assert_eq!(calculate_points(&Amount::parse("120.75")), 91);
        assert_eq!(calculate_points(&Amount::from(50.5)), 0);
    }

    #[test]
    fn huge_amounts_saturate() {
        assert!(calculate_points(&Amount::from(I51F13::MAX)) > 0);

        let amount: Amount = serde_json::from_str("1e16").unwrap();
        assert_eq!(amount.value(), Some(I51F13::MAX));
        assert!(calculate_points(&amount) > 0);

        assert!(calculate_points(&Amount::parse("10000000000000000")) > 0);
        assert!(calculate_points(&Amount::from(u64::MAX as f64)) > 0);
        assert_eq!(calculate_points(&Amount::from(f64::NEG_INFINITY)), 0);
    }

    #[test]
    fn fractions_just_below_a_whole_point_are_floored() {
        assert_eq!(calculate_points(&Amount::from(50.99999)), 0);
        assert_eq!(calculate_points(&Amount::parse("50.99999")), 0);
        assert_eq!(calculate_points(&Amount::from(100.99999)), 51);
        assert_eq!(calculate_points(&Amount::parse("100.99999")), 51);

        let amounts: Vec<Amount> = serde_json::from_str(r#"[50.99999, "100.99999", 75.99999]"#).unwrap();
        let points: Vec<u64> = amounts.iter().map(calculate_points).collect();
        assert_eq!(points, vec![0, 51, 25]);
    }

    #[test]
    fn serializes_as_numbers() {
        let amounts = vec![Amount::from(120_i64), Amount::from(120.75), Amount::parse("abc")];
        assert_eq!(serde_json::to_string(&amounts).unwrap(), "[120,120.75,null]");
    }

    #[test]
    fn deserialize_numbers_and_strings() {
        let amounts: Vec<Amount> = serde_json::from_str(r#"[120, 75.5, "40", "abc", null, -3]"#).unwrap();
        let points: Vec<u64> = amounts.iter().map(calculate_points).collect();
        assert_eq!(points, vec![90, 25, 0, 0, 0, 0]);
        assert_eq!(amounts[3].value(), None);
        assert_eq!(amounts[4].value(), None);
    }
}
