//! Self-describing archive format.
//!
//! The bare codec output is only decodable by the `Codec` that produced it.
//! An archive carries what a fresh decoder needs: the frequency table (the
//! tree is rebuilt deterministically from it), the exact bit count (so
//! padding is never decoded), and the original length.
//!
//! # Archive Format
//!
//! ```text
//! +---------------------+
//! | Magic (4 bytes)     |  "HXF1"
//! +---------------------+
//! | original_len (8)    |  u64 little-endian
//! +---------------------+
//! | bit_count (8)       |  u64 encoded bits, padding excluded
//! +---------------------+
//! | symbol_count (2)    |  u16 entries in the frequency table
//! +---------------------+
//! | crc32 (4)           |  u32 checksum
//! +---------------------+
//! | symbol (1)          |  repeated symbol_count times,
//! | freq (8)            |  ascending symbol order
//! +---------------------+
//! | payload             |  ceil(bit_count / 8) packed bytes
//! +---------------------+
//! ```
//!
//! The CRC32 covers every field after the magic except itself.

use crate::error::{ContainerError, Error, Result};
use crate::tree::FrequencyTable;

/// Magic number for archives: "HXF1"
pub const MAGIC: [u8; 4] = *b"HXF1";

/// Fixed header size in bytes
pub const HEADER_SIZE: usize = 26;

/// Bytes per frequency table entry
const ENTRY_SIZE: usize = 9;

/// A parsed (or to-be-written) archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
    /// Length of the uncompressed input
    pub original_len: u64,

    /// Number of meaningful bits in `payload`
    pub bit_count: u64,

    /// Symbol frequencies the tree is rebuilt from
    pub frequencies: FrequencyTable,

    /// Packed Huffman bitstream
    pub payload: Vec<u8>,
}

impl Archive {
    /// Serialize into the archive byte format.
    pub fn serialize(&self) -> Vec<u8> {
        let entries = encode_entries(&self.frequencies);
        let symbol_count = self.frequencies.distinct_symbols() as u16;

        let crc32 = compute_crc(
            self.original_len,
            self.bit_count,
            symbol_count,
            &entries,
            &self.payload,
        );

        let mut out = Vec::with_capacity(HEADER_SIZE + entries.len() + self.payload.len());
        out.extend_from_slice(&MAGIC);
        out.extend_from_slice(&self.original_len.to_le_bytes());
        out.extend_from_slice(&self.bit_count.to_le_bytes());
        out.extend_from_slice(&symbol_count.to_le_bytes());
        out.extend_from_slice(&crc32.to_le_bytes());
        out.extend_from_slice(&entries);
        out.extend_from_slice(&self.payload);
        out
    }

    /// Parse an archive from bytes.
    ///
    /// # Errors
    /// - `ContainerError::TooShort` if the header or table is truncated
    /// - `ContainerError::InvalidMagic` if the magic number doesn't match
    /// - `Error::Crc` if the checksum doesn't match
    /// - `ContainerError::EmptyFrequencyTable` if no symbols are stored
    /// - `ContainerError::FrequencyTotalMismatch` if the stored frequencies
    ///   overflow or don't sum to `original_len`
    /// - `ContainerError::LengthMismatch` if the payload size disagrees with
    ///   `bit_count`
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(ContainerError::TooShort {
                required: HEADER_SIZE,
                actual: bytes.len(),
            }
            .into());
        }

        let magic = read_array::<4>(bytes, 0);
        if magic != MAGIC {
            return Err(ContainerError::InvalidMagic {
                expected: MAGIC,
                actual: magic,
            }
            .into());
        }

        let original_len = u64::from_le_bytes(read_array(bytes, 4));
        let bit_count = u64::from_le_bytes(read_array(bytes, 12));
        let symbol_count = u16::from_le_bytes(read_array(bytes, 20));
        let crc32 = u32::from_le_bytes(read_array(bytes, 22));

        let table_end = HEADER_SIZE + symbol_count as usize * ENTRY_SIZE;
        if bytes.len() < table_end {
            return Err(ContainerError::TooShort {
                required: table_end,
                actual: bytes.len(),
            }
            .into());
        }

        let entries = &bytes[HEADER_SIZE..table_end];
        let payload = &bytes[table_end..];

        let computed = compute_crc(original_len, bit_count, symbol_count, entries, payload);
        if computed != crc32 {
            return Err(Error::Crc {
                expected: crc32,
                actual: computed,
            });
        }

        let mut frequencies = FrequencyTable::new();
        let mut total = Some(0u64);
        for entry in entries.chunks_exact(ENTRY_SIZE) {
            let freq = u64::from_le_bytes(read_array(entry, 1));
            total = total.and_then(|sum| sum.checked_add(freq));
            frequencies.set(entry[0], freq);
        }
        if frequencies.is_empty() {
            return Err(ContainerError::EmptyFrequencyTable.into());
        }
        if total != Some(original_len) {
            return Err(ContainerError::FrequencyTotalMismatch { original_len }.into());
        }

        let expected_payload = bit_count.div_ceil(8);
        if payload.len() as u64 != expected_payload {
            return Err(ContainerError::LengthMismatch {
                expected: expected_payload as usize,
                actual: payload.len(),
            }
            .into());
        }

        Ok(Archive {
            original_len,
            bit_count,
            frequencies,
            payload: payload.to_vec(),
        })
    }
}

/// Check whether `bytes` starts with the archive magic.
pub fn is_archive(bytes: &[u8]) -> bool {
    bytes.starts_with(&MAGIC)
}

fn encode_entries(frequencies: &FrequencyTable) -> Vec<u8> {
    let mut entries = Vec::with_capacity(frequencies.distinct_symbols() * ENTRY_SIZE);
    for (symbol, freq) in frequencies.iter() {
        entries.push(symbol);
        entries.extend_from_slice(&freq.to_le_bytes());
    }
    entries
}

/// Copy `N` bytes starting at `offset`. Callers check bounds first.
fn read_array<const N: usize>(bytes: &[u8], offset: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[offset..offset + N]);
    out
}

/// Compute CRC32 over the protected fields.
fn compute_crc(
    original_len: u64,
    bit_count: u64,
    symbol_count: u16,
    entries: &[u8],
    payload: &[u8],
) -> u32 {
    let mut hasher = crc32fast::Hasher::new();

    hasher.update(&original_len.to_le_bytes());
    hasher.update(&bit_count.to_le_bytes());
    hasher.update(&symbol_count.to_le_bytes());

    hasher.update(entries);
    hasher.update(payload);

    hasher.finalize()
}
