//! Canonical DER writer.

use crate::tag::Tag;

/// Accumulates canonical DER into a vec buffer.
///
/// Writing can't fail, so nothing here returns a `Result`.  Lengths are
/// always the shortest form and integers never carry redundant octets.
#[derive(Clone, Debug, Default)]
pub struct DerWriter {
    buf: Vec<u8>,
}

impl DerWriter {
    /// Constructs a new empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the writer and returns the bytes written.
    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }

    /// Returns the bytes written so far.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Appends already-encoded bytes verbatim.
    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Writes a tag, the length of `contents` and `contents`.
    pub fn write_tlv(&mut self, tag: Tag, contents: &[u8]) {
        self.buf.reserve(encoded_len(contents.len()));
        self.buf.push(tag.as_u8());
        write_length(contents.len(), &mut self.buf);
        self.buf.extend_from_slice(contents);
    }

    /// Writes an octet string with an implicit tag.
    pub fn write_octet_string(&mut self, tag: Tag, bytes: &[u8]) {
        self.write_tlv(tag, bytes);
    }

    /// Writes a non-negative integer in minimal two's complement form.
    pub fn write_uint(&mut self, tag: Tag, v: u64) {
        let bytes = v.to_be_bytes();
        let skip = bytes.iter().take_while(|b| **b == 0).count().min(7);
        let digits = &bytes[skip..];

        if digits[0] & 0x80 != 0 {
            let mut contents = Vec::with_capacity(digits.len() + 1);
            contents.push(0);
            contents.extend_from_slice(digits);
            self.write_tlv(tag, &contents);
        } else {
            self.write_tlv(tag, digits);
        }
    }

    /// Writes bit `i` of `mask` as named bit `i` of a bit string, trimming
    /// trailing zero bits as DER requires.
    pub fn write_named_bits(&mut self, tag: Tag, mask: u32) {
        if mask == 0 {
            self.write_tlv(tag, &[0]);
            return;
        }

        let highest = 31 - mask.leading_zeros() as usize;
        let nbytes = highest / 8 + 1;
        let unused = nbytes * 8 - (highest + 1);

        let mut contents = vec![0u8; nbytes + 1];
        contents[0] = unused as u8;
        for i in 0..=highest {
            if mask & (1 << i) != 0 {
                contents[1 + i / 8] |= 0x80 >> (i % 8);
            }
        }

        self.write_tlv(tag, &contents);
    }

    /// Writes a constructed value whose contents are produced by `f`.
    pub fn write_constructed(&mut self, tag: Tag, f: impl FnOnce(&mut DerWriter)) {
        let mut inner = DerWriter::new();
        f(&mut inner);
        self.write_tlv(tag, &inner.buf);
    }

    /// Writes a `SET OF` from already-encoded elements, sorting them into
    /// canonical order first.
    pub fn write_set_of(&mut self, tag: Tag, mut elems: Vec<Vec<u8>>) {
        elems.sort();
        self.write_constructed(tag, |w| {
            for e in &elems {
                w.write_raw(e);
            }
        });
    }
}

/// Appends the shortest length encoding for `len`.
fn write_length(len: usize, into: &mut Vec<u8>) {
    if len < 0x80 {
        into.push(len as u8);
        return;
    }

    let bytes = (len as u64).to_be_bytes();
    let skip = bytes.iter().take_while(|b| **b == 0).count();
    let octets = &bytes[skip..];
    into.push(0x80 | octets.len() as u8);
    into.extend_from_slice(octets);
}

/// Returns the number of bytes a TLV with `contents_len` content octets
/// occupies once encoded.
pub(crate) fn encoded_len(contents_len: usize) -> usize {
    let len_octets = if contents_len < 0x80 {
        1
    } else {
        let bits = usize::BITS - contents_len.leading_zeros();
        1 + bits.div_ceil(8) as usize
    };
    1 + len_octets + contents_len
}
