//! Bounds-checked reader over a flat DER buffer.

use crate::errors::DerError;
use crate::limits::DecodeLimits;
use crate::tag::Tag;

/// Reader for canonical DER over a borrowed byte slice.
///
/// Every length is checked against the remaining input before it is used,
/// and every constructed value entered through [`DerReader::read_constructed`]
/// counts against the depth limit.  You probably don't need to use this
/// directly if you only want whole values, see [`crate::decode_buf_exact`].
#[derive(Debug)]
pub struct DerReader<'b> {
    buf: &'b [u8],
    at: usize,
    depth: usize,
    max_depth: usize,
}

impl<'b> DerReader<'b> {
    /// Constructs a new instance at the start of the buffer, checking the
    /// buffer against the byte budget.
    pub fn new(buf: &'b [u8], limits: &DecodeLimits) -> Result<Self, DerError> {
        if buf.len() > limits.max_bytes() {
            return Err(DerError::ByteBudgetExceeded {
                limit: limits.max_bytes(),
                len: buf.len(),
            });
        }

        Ok(Self {
            buf,
            at: 0,
            depth: 0,
            max_depth: limits.max_depth(),
        })
    }

    /// Returns the total number of remaining bytes that can be read.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.at
    }

    /// Returns if there is nothing left to read.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Errors if any input is left unread.
    pub fn finish(&self) -> Result<(), DerError> {
        if !self.is_empty() {
            return Err(DerError::ExtraInput);
        }
        Ok(())
    }

    fn take(&mut self, n: usize) -> Result<&'b [u8], DerError> {
        if n > self.remaining() {
            return Err(DerError::OverrunInput);
        }

        let buf = self.buf;
        let out = &buf[self.at..self.at + n];
        self.at += n;
        Ok(out)
    }

    fn read_byte(&mut self) -> Result<u8, DerError> {
        Ok(self.take(1)?[0])
    }

    /// Returns the next tag without consuming anything.
    pub fn peek_tag(&self) -> Result<Tag, DerError> {
        let b = *self.buf.get(self.at).ok_or(DerError::OverrunInput)?;
        Tag::from_u8(b)
    }

    fn read_length(&mut self) -> Result<usize, DerError> {
        let first = self.read_byte()?;
        if first < 0x80 {
            return Ok(first as usize);
        }

        if first == 0x80 {
            return Err(DerError::IndefiniteLength);
        }

        let n = (first & 0x7f) as usize;
        if n > 4 {
            return Err(DerError::LengthOverflow);
        }

        let octets = self.take(n)?;
        if octets[0] == 0 {
            return Err(DerError::NonminimalLength);
        }

        let len = octets
            .iter()
            .fold(0usize, |acc, b| (acc << 8) | *b as usize);

        // Short form would have sufficed.
        if len < 0x80 {
            return Err(DerError::NonminimalLength);
        }

        Ok(len)
    }

    /// Reads one tag-length-value triple, returning the tag and the content
    /// octets.
    pub fn read_tlv(&mut self) -> Result<(Tag, &'b [u8]), DerError> {
        let tag = Tag::from_u8(self.read_byte()?)?;
        let len = self.read_length()?;
        let contents = self.take(len)?;
        Ok((tag, contents))
    }

    /// Reads a value that must carry `tag`, returning its content octets.
    pub fn read_expected(&mut self, tag: Tag) -> Result<&'b [u8], DerError> {
        let found = self.peek_tag()?;
        if found != tag {
            return Err(DerError::UnexpectedTag {
                expected: tag,
                found,
            });
        }

        let (_, contents) = self.read_tlv()?;
        Ok(contents)
    }

    /// Reads an octet string with the given (implicit) tag.
    pub fn read_octet_string(&mut self, tag: Tag) -> Result<&'b [u8], DerError> {
        self.read_expected(tag)
    }

    /// Reads an octet string that must be exactly `N` bytes long.
    pub fn read_fixed<const N: usize>(
        &mut self,
        tag: Tag,
        field: &'static str,
    ) -> Result<[u8; N], DerError> {
        let contents = self.read_expected(tag)?;
        <[u8; N]>::try_from(contents).map_err(|_| DerError::InvalidLength {
            field,
            expected: N,
            found: contents.len(),
        })
    }

    /// Reads a non-negative integer no larger than `max`.
    pub fn read_uint(&mut self, tag: Tag, max: u64) -> Result<u64, DerError> {
        let contents = self.read_expected(tag)?;
        decode_uint(contents, max)
    }

    /// Reads a bit string in named-bit-list form, returning bit `i` of the
    /// string as bit `i` of the mask.
    pub fn read_named_bits(&mut self, tag: Tag) -> Result<u32, DerError> {
        let contents = self.read_expected(tag)?;
        decode_named_bits(contents)
    }

    /// Enters a constructed value with the given tag, runs `f` over its
    /// contents and requires that `f` consumed all of them.
    pub fn read_constructed<T, E>(
        &mut self,
        tag: Tag,
        f: impl FnOnce(&mut DerReader<'b>) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<DerError>,
    {
        let contents = self.read_expected(tag)?;
        let mut inner = self.child(contents)?;
        let v = f(&mut inner)?;
        inner.finish()?;
        Ok(v)
    }

    /// Like [`Self::read_constructed`] but accepts any constructed tag and
    /// passes it to `f`, for decoding `CHOICE` values.
    pub fn read_any_constructed<T, E>(
        &mut self,
        f: impl FnOnce(Tag, &mut DerReader<'b>) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<DerError>,
    {
        let (tag, contents) = self.read_tlv()?;
        if !tag.is_constructed() {
            return Err(DerError::UnrecognizedTag(tag).into());
        }

        let mut inner = self.child(contents)?;
        let v = f(tag, &mut inner)?;
        inner.finish()?;
        Ok(v)
    }

    /// Reads a `SET OF` with the given tag, decoding each element with `f`.
    ///
    /// Elements must appear in ascending order of their encodings, which is
    /// the only order DER permits.
    pub fn read_set_of<T, E>(
        &mut self,
        tag: Tag,
        mut f: impl FnMut(&mut DerReader<'b>) -> Result<T, E>,
    ) -> Result<Vec<T>, E>
    where
        E: From<DerError>,
    {
        self.read_constructed(tag, |set| {
            let mut out = Vec::new();
            let mut prev: Option<&'b [u8]> = None;

            while !set.is_empty() {
                let start = set.at;
                let v = f(set)?;

                // Guard against an element decoder that reads nothing, which
                // would otherwise spin here forever.
                if set.at == start {
                    return Err(DerError::ExtraInput.into());
                }

                let buf = set.buf;
                let elem = &buf[start..set.at];
                if prev.is_some_and(|p| p > elem) {
                    return Err(DerError::UnsortedSet.into());
                }

                prev = Some(elem);
                out.push(v);
            }

            Ok(out)
        })
    }

    fn child(&self, contents: &'b [u8]) -> Result<DerReader<'b>, DerError> {
        let depth = self.depth + 1;
        if depth > self.max_depth {
            return Err(DerError::DepthLimitExceeded(self.max_depth));
        }

        Ok(DerReader {
            buf: contents,
            at: 0,
            depth,
            max_depth: self.max_depth,
        })
    }
}

/// Decodes the content octets of a non-negative `INTEGER`.
fn decode_uint(contents: &[u8], max: u64) -> Result<u64, DerError> {
    let (first, rest) = contents.split_first().ok_or(DerError::EmptyInteger)?;

    if first & 0x80 != 0 {
        return Err(DerError::NegativeInteger);
    }

    // A leading zero is only allowed to keep the sign bit clear.
    if *first == 0 && rest.first().is_some_and(|b| b & 0x80 == 0) {
        return Err(DerError::NonminimalInteger);
    }

    let digits = if *first == 0 { rest } else { contents };
    if digits.len() > 8 {
        return Err(DerError::IntegerOverflow { max });
    }

    let v = digits.iter().fold(0u64, |acc, b| (acc << 8) | *b as u64);
    if v > max {
        return Err(DerError::IntegerOverflow { max });
    }

    Ok(v)
}

/// Decodes the content octets of a named-bit-list `BIT STRING`.
fn decode_named_bits(contents: &[u8]) -> Result<u32, DerError> {
    let (unused, bits) = contents
        .split_first()
        .ok_or(DerError::InvalidBitString("missing unused bit count"))?;

    if *unused > 7 {
        return Err(DerError::InvalidBitString("unused bit count above 7"));
    }

    let Some(last) = bits.last() else {
        if *unused != 0 {
            return Err(DerError::InvalidBitString("unused bits in empty string"));
        }
        return Ok(0);
    };

    if bits.len() > 4 {
        return Err(DerError::InvalidBitString("more than 32 named bits"));
    }

    let unused_mask = (1u8 << unused) - 1;
    if last & unused_mask != 0 {
        return Err(DerError::InvalidBitString("nonzero unused bits"));
    }

    if (last >> unused) & 1 == 0 {
        return Err(DerError::InvalidBitString("trailing zero bits"));
    }

    let mut mask = 0u32;
    for (i, byte) in bits.iter().enumerate() {
        for j in 0..8 {
            if byte & (0x80 >> j) != 0 {
                mask |= 1 << (i * 8 + j);
            }
        }
    }

    Ok(mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(buf: &[u8]) -> DerReader<'_> {
        DerReader::new(buf, &DecodeLimits::default()).unwrap()
    }

    #[test]
    fn test_uint_minimal_forms() {
        assert_eq!(decode_uint(&[0x00], u64::MAX), Ok(0));
        assert_eq!(decode_uint(&[0x7f], u64::MAX), Ok(127));
        assert_eq!(decode_uint(&[0x00, 0x80], u64::MAX), Ok(128));
        assert_eq!(decode_uint(&[0x02, 0x00, 0x00], u64::MAX), Ok(131072));
        assert_eq!(
            decode_uint(&[0x00, 0xff, 0xff, 0xff, 0xff], u32::MAX as u64),
            Ok(u32::MAX as u64)
        );
    }

    #[test]
    fn test_uint_rejects_noncanonical() {
        assert_eq!(decode_uint(&[], 10), Err(DerError::EmptyInteger));
        assert_eq!(
            decode_uint(&[0x00, 0x00], 10),
            Err(DerError::NonminimalInteger)
        );
        assert_eq!(
            decode_uint(&[0x00, 0x7f], 1000),
            Err(DerError::NonminimalInteger)
        );
        assert_eq!(decode_uint(&[0x80], 1000), Err(DerError::NegativeInteger));
        assert_eq!(decode_uint(&[0xff], 1000), Err(DerError::NegativeInteger));
        assert_eq!(
            decode_uint(&[0x01, 0x00, 0x00, 0x00, 0x00], u32::MAX as u64),
            Err(DerError::IntegerOverflow {
                max: u32::MAX as u64
            })
        );
    }

    #[test]
    fn test_length_forms() {
        let mut long = vec![0x80, 0x81, 0x80];
        long.extend_from_slice(&[0xaa; 128]);
        let (tag, contents) = reader(&long).read_tlv().unwrap();
        assert_eq!(tag, Tag::context(0));
        assert_eq!(contents.len(), 128);

        // Long form used for a short length.
        let mut r = reader(&[0x80, 0x81, 0x05, 0, 0, 0, 0, 0]);
        assert_eq!(r.read_tlv(), Err(DerError::NonminimalLength));

        // Leading zero length octet.
        let mut r = reader(&[0x80, 0x82, 0x00, 0x80]);
        assert_eq!(r.read_tlv(), Err(DerError::NonminimalLength));

        let mut r = reader(&[0xa0, 0x80, 0x00, 0x00]);
        assert_eq!(r.read_tlv(), Err(DerError::IndefiniteLength));

        let mut r = reader(&[0x80, 0x85, 1, 1, 1, 1, 1]);
        assert_eq!(r.read_tlv(), Err(DerError::LengthOverflow));
    }

    #[test]
    fn test_declared_length_overrun() {
        let mut r = reader(&[0x80, 0x05, 0x01, 0x02]);
        assert_eq!(r.read_tlv(), Err(DerError::OverrunInput));

        let mut r = reader(&[0x80, 0x82, 0xff, 0xff, 0x00]);
        assert_eq!(r.read_tlv(), Err(DerError::OverrunInput));

        let mut r = reader(&[0x80]);
        assert_eq!(r.read_tlv(), Err(DerError::OverrunInput));
    }

    #[test]
    fn test_high_tag_number_rejected() {
        let mut r = reader(&[0xbf, 0x01, 0x00]);
        assert_eq!(r.read_tlv(), Err(DerError::HighTagNumber));
    }

    #[test]
    fn test_named_bits() {
        assert_eq!(decode_named_bits(&[0x00]), Ok(0));
        assert_eq!(decode_named_bits(&[0x07, 0x80]), Ok(0b1));
        assert_eq!(decode_named_bits(&[0x03, 0xf8]), Ok(0b11111));
        assert_eq!(decode_named_bits(&[0x04, 0x50]), Ok(0b1010));

        assert!(decode_named_bits(&[]).is_err());
        assert!(decode_named_bits(&[0x08, 0x80]).is_err());
        assert!(decode_named_bits(&[0x01]).is_err());
        // Trailing zero bit, the canonical form is 07 80.
        assert!(decode_named_bits(&[0x06, 0x80]).is_err());
        assert!(decode_named_bits(&[0x00, 0x80]).is_err());
        // Garbage in unused bits.
        assert!(decode_named_bits(&[0x07, 0x81]).is_err());
    }

    #[test]
    fn test_constructed_requires_full_consumption() {
        let buf = [0xa1, 0x05, 0x80, 0x01, 0x07, 0x81, 0x00];
        let res: Result<u64, DerError> = reader(&buf)
            .read_constructed(Tag::context_constructed(1), |r| {
                r.read_uint(Tag::context(0), u64::MAX)
            });
        assert_eq!(res, Err(DerError::ExtraInput));
    }

    #[test]
    fn test_depth_limit() {
        // Three levels of nesting around an empty primitive.
        let buf = [0xa0, 0x06, 0xa0, 0x04, 0xa0, 0x02, 0x80, 0x00];
        let limits = DecodeLimits::default().with_max_depth(2);
        let mut r = DerReader::new(&buf, &limits).unwrap();

        fn descend(r: &mut DerReader<'_>) -> Result<usize, DerError> {
            if r.peek_tag()?.is_constructed() {
                r.read_any_constructed(|_, inner| descend(inner).map(|d| d + 1))
            } else {
                r.read_octet_string(Tag::context(0))?;
                Ok(0)
            }
        }

        assert_eq!(descend(&mut r), Err(DerError::DepthLimitExceeded(2)));

        let mut r = DerReader::new(&buf, &DecodeLimits::default()).unwrap();
        assert_eq!(descend(&mut r), Ok(3));
    }

    #[test]
    fn test_byte_budget() {
        let buf = [0u8; 16];
        let limits = DecodeLimits::default().with_max_bytes(8);
        assert_eq!(
            DerReader::new(&buf, &limits).unwrap_err(),
            DerError::ByteBudgetExceeded { limit: 8, len: 16 }
        );
    }

    #[test]
    fn test_set_of_ordering() {
        let sorted = [0xa0, 0x06, 0x80, 0x01, 0x01, 0x80, 0x01, 0x02];
        let res: Result<Vec<u64>, DerError> = reader(&sorted)
            .read_set_of(Tag::context_constructed(0), |r| {
                r.read_uint(Tag::context(0), u64::MAX)
            });
        assert_eq!(res, Ok(vec![1, 2]));

        let unsorted = [0xa0, 0x06, 0x80, 0x01, 0x02, 0x80, 0x01, 0x01];
        let res: Result<Vec<u64>, DerError> = reader(&unsorted)
            .read_set_of(Tag::context_constructed(0), |r| {
                r.read_uint(Tag::context(0), u64::MAX)
            });
        assert_eq!(res, Err(DerError::UnsortedSet));
    }
}
