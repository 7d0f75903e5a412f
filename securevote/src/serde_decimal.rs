//! Serde helpers for arbitrary-precision unsigned integers as base-10
//! decimal strings, for use in `#[serde(with = "serde_decimal")]`.
//!
//! Key moduli and ciphertexts far exceed 64 bits; fixed-width binary
//! encodings would truncate them, so everything crosses the wire as text.

use num_bigint::BigUint;
use serde::{de, Deserialize, Deserializer, Serializer};
use std::str::FromStr;

pub fn serialize<S>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_str_radix(10))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<BigUint, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BigUint::from_str(&s).map_err(de::Error::custom)
}
