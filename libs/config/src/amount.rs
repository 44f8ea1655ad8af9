//! Token amounts in configuration files
//!
//! TOML integers stop at `i64`, so large raw amounts are written as decimal
//! strings. [`Amount`] accepts both and always serializes as a string.

use std::fmt;
use std::str::FromStr;

use ethereum_types::U256;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ConfigError;

/// A raw `U256` token amount
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(pub U256);

impl Amount {
    pub fn value(self) -> U256 {
        self.0
    }
}

impl From<U256> for Amount {
    fn from(value: U256) -> Self {
        Amount(value)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Amount(U256::from(value))
    }
}

impl From<Amount> for U256 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl FromStr for Amount {
    type Err = ConfigError;

    /// Decimal digits, optionally grouped with `_`
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let digits: String = input.trim().chars().filter(|c| *c != '_').collect();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ConfigError::InvalidAmount {
                value: input.to_string(),
                reason: "expected decimal digits",
            });
        }
        U256::from_dec_str(&digits)
            .map(Amount)
            .map_err(|_| ConfigError::InvalidAmount {
                value: input.to_string(),
                reason: "does not fit in 256 bits",
            })
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a non-negative integer or a decimal string")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Amount, E> {
        Ok(Amount::from(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Amount, E> {
        u64::try_from(value)
            .map(Amount::from)
            .map_err(|_| E::custom("amount must not be negative"))
    }

    fn visit_u128<E: de::Error>(self, value: u128) -> Result<Amount, E> {
        Ok(Amount(U256::from(value)))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Amount, E> {
        value.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[derive(Deserialize)]
    struct Holder {
        amounts: BTreeMap<String, Amount>,
    }

    #[test]
    fn test_integers_and_strings() {
        let holder: Holder = toml::from_str(
            r#"
            [amounts]
            small = 1000
            grouped = "1_000_000"
            huge = "115792089237316195423570985008687907853269984665640564039457584007913129639935"
            "#,
        )
        .unwrap();

        assert_eq!(holder.amounts["small"], Amount::from(1_000u64));
        assert_eq!(holder.amounts["grouped"], Amount::from(1_000_000u64));
        assert_eq!(holder.amounts["huge"].value(), U256::MAX);
    }

    #[test]
    fn test_rejects_negative_and_garbage() {
        assert!(toml::from_str::<Holder>("[amounts]\nx = -1").is_err());
        assert!(toml::from_str::<Holder>("[amounts]\nx = \"12a\"").is_err());
        assert!(toml::from_str::<Holder>("[amounts]\nx = 1.5").is_err());
        assert!("".parse::<Amount>().is_err());
        // one past U256::MAX
        assert!(
            "115792089237316195423570985008687907853269984665640564039457584007913129639936"
                .parse::<Amount>()
                .is_err()
        );
    }

    #[test]
    fn test_serializes_as_string() {
        let text = toml::to_string(&BTreeMap::from([("x", Amount::from(42u64))])).unwrap();
        assert_eq!(text.trim(), "x = \"42\"");
    }
}
