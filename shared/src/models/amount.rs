//! Money amounts carried as JSON numbers
//!
//! Decoding saturates at the edges of `Decimal`'s range instead of failing,
//! so an absurd amount in one order reaches validation for that order and
//! never rejects the request body it arrived in.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Deserializer, Serializer};

fn saturating(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(if value.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    })
}

/// Required `Decimal` fields
pub mod required {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(value, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        f64::deserialize(deserializer).map(saturating)
    }
}

/// `Option<Decimal>` fields
pub mod optional {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<Decimal>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float_option::serialize(value, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Decimal>, D::Error> {
        Option::<f64>::deserialize(deserializer).map(|value| value.map(saturating))
    }
}
