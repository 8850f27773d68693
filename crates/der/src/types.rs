use crate::errors::DerError;
use crate::reader::DerReader;
use crate::writer::DerWriter;

/// Types with a canonical DER encoding.
pub trait Encode {
    /// Writes the encoding of self into a writer.
    fn write_der(&self, w: &mut DerWriter);

    /// Encodes self into a newly allocated vec.
    fn to_der(&self) -> Vec<u8> {
        let mut w = DerWriter::new();
        self.write_der(&mut w);
        w.into_vec()
    }
}

/// Types that can be decoded from canonical DER.
///
/// Decoders layered on this crate usually have their own error types that
/// carry schema-level failures on top of [`DerError`].
pub trait Decode: Sized {
    /// Error returned on malformed input.
    type Error: From<DerError>;

    /// Decodes one value from the reader, leaving anything after it unread.
    fn read_der(r: &mut DerReader<'_>) -> Result<Self, Self::Error>;
}
