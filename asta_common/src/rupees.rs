use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{
    de::{self, Visitor},
    Deserialize,
    Deserializer,
    Serialize,
    Serializer,
};
use sqlx::Type;
use thiserror::Error;

pub const INR_CURRENCY_CODE: &str = "INR";
pub const PAISE_PER_RUPEE: i64 = 100;

//--------------------------------------       Rupees        ---------------------------------------------------------
/// A currency amount held in paise (the minor unit the payment processor works in).
///
/// Amounts arrive from web forms as numbers or numeric strings in whole rupees, e.g. `1499` or `"1499.50"`. They are
/// converted with `round(rupees * 100)`. When serialized, the amount is written as a two-decimal string (`"1499.50"`),
/// which is how the admin dashboard has always received it.
#[derive(Debug, Clone, Copy, Default, Type, PartialEq, Eq, Ord, PartialOrd, Hash)]
#[sqlx(transparent)]
pub struct Rupees(i64);

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Value cannot be represented as a rupee amount: {0}")]
pub struct RupeesConversionError(String);

impl Rupees {
    pub fn from_rupees(rupees: i64) -> Self {
        Self(rupees * PAISE_PER_RUPEE)
    }

    /// The amount in the minor currency unit.
    pub fn paise(&self) -> i64 {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// The amount in whole rupees, as a float. Only use this for display purposes (e.g. spreadsheet cells).
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / PAISE_PER_RUPEE as f64
    }
}

impl TryFrom<f64> for Rupees {
    type Error = RupeesConversionError;

    fn try_from(rupees: f64) -> Result<Self, Self::Error> {
        if !rupees.is_finite() {
            return Err(RupeesConversionError(rupees.to_string()));
        }
        let paise = (rupees * PAISE_PER_RUPEE as f64).round();
        if paise.abs() > i64::MAX as f64 {
            return Err(RupeesConversionError(format!("{rupees} is too large")));
        }
        #[allow(clippy::cast_possible_truncation)]
        Ok(Self(paise as i64))
    }
}

impl FromStr for Rupees {
    type Err = RupeesConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().parse::<f64>().map_err(|e| RupeesConversionError(format!("{s}. {e}")))?;
        Self::try_from(value)
    }
}

impl Display for Rupees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let per = PAISE_PER_RUPEE.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / per, abs % per)
    }
}

impl Serialize for Rupees {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Rupees {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RupeesVisitor)
    }
}

struct RupeesVisitor;

impl<'de> Visitor<'de> for RupeesVisitor {
    type Value = Rupees;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a rupee amount as a number or a numeric string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        v.checked_mul(PAISE_PER_RUPEE).map(Rupees).ok_or_else(|| E::custom(format!("{v} is too large")))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        let v = i64::try_from(v).map_err(|_| E::custom(format!("{v} is too large")))?;
        self.visit_i64(v)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Rupees::try_from(v).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse::<Rupees>().map_err(E::custom)
    }
}
