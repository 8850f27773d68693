//! High-level util functions.

use crate::limits::DecodeLimits;
use crate::reader::DerReader;
use crate::types::{Decode, Encode};

/// Decodes a value from a buffer, throwing an error if there's leftover bytes.
pub fn decode_buf_exact<T: Decode>(buf: &[u8], limits: &DecodeLimits) -> Result<T, T::Error> {
    let mut dec = DerReader::new(buf, limits)?;
    let v = T::read_der(&mut dec)?;
    dec.finish()?;
    Ok(v)
}

/// Encodes the value into a newly allocated vec.
pub fn encode_to_vec<T: Encode + ?Sized>(v: &T) -> Vec<u8> {
    v.to_der()
}
