//! Bit packing: sequences of single bits to bytes and back.
//!
//! Both directions are MSB-first: the first bit of each group of eight
//! occupies the most significant bit of the byte.
//!
//! # Padding Rules
//! - `BitWriter` / `pack`: the final partial byte is padded with zero bits
//!   on the low-order end. The padding length is not recorded.
//! - `BitReader` / `unpack`: every byte expands to exactly eight bits, so
//!   padding comes back as data. The caller must know the real bit count
//!   or let the tree walk absorb it.
//!
//! # Example
//! ```
//! use huffxor_core::bitio::{pack, unpack};
//!
//! let bits = [true, false, true, true, true];
//! let bytes = pack(&bits);
//! assert_eq!(bytes, vec![0b1011_1000]);
//!
//! let restored = unpack(&bytes);
//! assert_eq!(&restored[..5], &bits);
//! assert_eq!(restored.len(), 8);
//! ```

use crate::tree::Code;

/// Accumulates bits MSB-first into a byte buffer.
///
/// # Invariants
/// - `pending` holds fewer than 8 bits, aligned to the MSB
/// - `pending_len` is always < 8
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    pending: u8,
    pending_len: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with room for `bit_len` bits.
    pub fn with_bit_capacity(bit_len: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bit_len.div_ceil(8)),
            pending: 0,
            pending_len: 0,
        }
    }

    pub fn write_bit(&mut self, bit: bool) {
        if bit {
            self.pending |= 0x80 >> self.pending_len;
        }
        self.pending_len += 1;

        if self.pending_len == 8 {
            self.bytes.push(self.pending);
            self.pending = 0;
            self.pending_len = 0;
        }
    }

    pub fn write_code(&mut self, code: &Code) {
        for &bit in code.bits() {
            self.write_bit(bit);
        }
    }

    /// Total bits written, excluding padding.
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.pending_len as usize
    }

    /// Zero bits that `finish` will append to complete the last byte.
    pub fn padding_bits(&self) -> usize {
        (8 - self.pending_len as usize) % 8
    }

    /// Flush the partial byte (zero-padded) and return the packed bytes.
    pub fn finish(mut self) -> Vec<u8> {
        if self.pending_len > 0 {
            self.bytes.push(self.pending);
        }
        self.bytes
    }
}

/// Iterates the bits of a byte slice MSB-first, padding included.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    pub fn read_bit(&mut self) -> Option<bool> {
        let byte = *self.data.get(self.position / 8)?;
        let bit = byte & (0x80 >> (self.position % 8)) != 0;
        self.position += 1;
        Some(bit)
    }

    pub fn bits_remaining(&self) -> usize {
        self.data.len() * 8 - self.position
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        self.read_bit()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bits_remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BitReader<'_> {}

/// Pack bits into bytes, MSB-first, zero-padding the final byte.
pub fn pack(bits: &[bool]) -> Vec<u8> {
    let mut writer = BitWriter::with_bit_capacity(bits.len());
    for &bit in bits {
        writer.write_bit(bit);
    }
    writer.finish()
}

/// Expand every byte into eight bits, MSB-first. Padding is not removed.
pub fn unpack(bytes: &[u8]) -> Vec<bool> {
    BitReader::new(bytes).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits_of(text: &str) -> Vec<bool> {
        text.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn test_pack_full_byte() {
        assert_eq!(pack(&bits_of("10110011")), vec![0b1011_0011]);
    }

    #[test]
    fn test_pack_pads_low_bits_with_zeros() {
        assert_eq!(pack(&bits_of("1")), vec![0b1000_0000]);
        assert_eq!(pack(&bits_of("0001")), vec![0x10]);
        assert_eq!(pack(&bits_of("1110")), vec![0xE0]);
    }

    #[test]
    fn test_pack_multi_byte() {
        let bits = bits_of("1010101111110000101");
        assert_eq!(pack(&bits), vec![0b1010_1011, 0b1111_0000, 0b1010_0000]);
    }

    #[test]
    fn test_pack_empty() {
        assert!(pack(&[]).is_empty());
        assert!(unpack(&[]).is_empty());
    }

    #[test]
    fn test_unpack_always_multiple_of_eight() {
        let bits = bits_of("11011");
        let unpacked = unpack(&pack(&bits));

        assert_eq!(unpacked.len(), 8);
        assert_eq!(unpacked, bits_of("11011000"));
    }

    #[test]
    fn test_writer_tracks_padding() {
        let mut writer = BitWriter::new();
        assert_eq!(writer.padding_bits(), 0);

        for bit in bits_of("101") {
            writer.write_bit(bit);
        }
        assert_eq!(writer.bit_len(), 3);
        assert_eq!(writer.padding_bits(), 5);

        for bit in bits_of("11111") {
            writer.write_bit(bit);
        }
        assert_eq!(writer.bit_len(), 8);
        assert_eq!(writer.padding_bits(), 0);
        assert_eq!(writer.finish(), vec![0b1011_1111]);
    }

    #[test]
    fn test_reader_remaining() {
        let data = [0xFF, 0x00];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.bits_remaining(), 16);
        for _ in 0..8 {
            assert_eq!(reader.read_bit(), Some(true));
        }
        assert_eq!(reader.bits_remaining(), 8);
        assert_eq!(reader.read_bit(), Some(false));
        assert_eq!(reader.bits_remaining(), 7);

        let rest: Vec<bool> = reader.by_ref().collect();
        assert_eq!(rest, vec![false; 7]);
        assert_eq!(reader.read_bit(), None);
    }
}
