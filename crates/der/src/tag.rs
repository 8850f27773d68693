//! Identifier octets.
//!
//! The schemas we deal with only ever use universal `SEQUENCE` and low-numbered
//! context-specific tags, so a tag fits in a single octet.

use core::fmt;

use crate::errors::DerError;

/// Class bits for context-specific tags.
const CONTEXT_CLASS: u8 = 0x80;

/// Bit marking a constructed encoding.
const CONSTRUCTED: u8 = 0x20;

/// Tag number bits that signal the high tag number form.
const HIGH_TAG_NUMBER: u8 = 0x1f;

/// A single-octet DER identifier.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Tag(u8);

impl Tag {
    /// Universal constructed `SEQUENCE`.
    pub const SEQUENCE: Tag = Tag(0x30);

    /// Context-specific primitive tag `[n]`.
    ///
    /// `n` must be below 31, anything higher needs the multi-octet form.
    pub const fn context(n: u8) -> Self {
        debug_assert!(n < HIGH_TAG_NUMBER);
        Self(CONTEXT_CLASS | n)
    }

    /// Context-specific constructed tag `[n]`.
    pub const fn context_constructed(n: u8) -> Self {
        debug_assert!(n < HIGH_TAG_NUMBER);
        Self(CONTEXT_CLASS | CONSTRUCTED | n)
    }

    /// Parses an identifier octet, rejecting the high tag number form.
    pub fn from_u8(b: u8) -> Result<Self, DerError> {
        if b & HIGH_TAG_NUMBER == HIGH_TAG_NUMBER {
            return Err(DerError::HighTagNumber);
        }
        Ok(Self(b))
    }

    /// Returns the raw identifier octet.
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// Returns the tag number, without class or constructed bits.
    pub const fn number(self) -> u8 {
        self.0 & HIGH_TAG_NUMBER
    }

    /// Returns if the encoding is constructed.
    pub const fn is_constructed(self) -> bool {
        self.0 & CONSTRUCTED != 0
    }

    /// Returns if this is a context-specific tag.
    pub const fn is_context_specific(self) -> bool {
        self.0 & 0xc0 == CONTEXT_CLASS
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02x}", self.0)
    }
}
