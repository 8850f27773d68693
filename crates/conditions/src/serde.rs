//! Serde serialization and deserialization for conditions and fulfillments.
//!
//! Both types are serialized through their canonical encoding, so anything
//! deserialized has been through the same checks as [`crate::parse_condition`]
//! and [`crate::parse_fulfillment`].
//!
//! ## Human-Readable Format (JSON, TOML, etc.)
//!
//! A string of the canonical bytes as lowercase hexadecimal:
//!
//! ```text
//! "a0258020e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855810100"
//! ```
//!
//! ## Binary Format
//!
//! The canonical bytes as a single byte string.

use std::fmt;

use serde::de::{Error as _, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Condition, ConditionResult, Fulfillment, parse_condition, parse_fulfillment};

fn serialize_canonical<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    if serializer.is_human_readable() {
        serializer.serialize_str(&hex::encode(bytes))
    } else {
        serializer.serialize_bytes(bytes)
    }
}

fn deserialize_canonical<'de, D, T>(
    deserializer: D,
    parse: fn(&[u8]) -> ConditionResult<T>,
) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
{
    let bytes = if deserializer.is_human_readable() {
        let s = String::deserialize(deserializer)?;
        hex::decode(&s).map_err(|e| D::Error::custom(format!("Invalid hex encoding: {e}")))?
    } else {
        deserializer.deserialize_byte_buf(BytesVisitor)?
    };

    parse(&bytes).map_err(D::Error::custom)
}

struct BytesVisitor;

impl<'de> Visitor<'de> for BytesVisitor {
    type Value = Vec<u8>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a byte string")
    }

    fn visit_bytes<E: serde::de::Error>(self, v: &[u8]) -> Result<Self::Value, E> {
        Ok(v.to_vec())
    }

    fn visit_byte_buf<E: serde::de::Error>(self, v: Vec<u8>) -> Result<Self::Value, E> {
        Ok(v)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut out = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(b) = seq.next_element()? {
            out.push(b);
        }
        Ok(out)
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_canonical(&self.encode(), serializer)
    }
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_canonical(deserializer, parse_condition)
    }
}

impl Serialize for Fulfillment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_canonical(&self.encode(), serializer)
    }
}

impl<'de> Deserialize<'de> for Fulfillment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_canonical(deserializer, parse_fulfillment)
    }
}
