//! Huffman compression and decompression.
//!
//! A `Codec` runs the full pipeline: frequency count, tree build, code table,
//! encode, pack. The tree, code table and encoded bit count stay resident
//! after `compress` so the same instance can decode its own output later.
//!
//! # Bare format
//!
//! `compress` returns only the packed bitstream. There is no header, so the
//! output can only be decoded by a codec holding the matching tree.
//!
//! # Padding
//!
//! The final byte is zero-padded and the pad length is not stored.
//! `decompress` knows the exact bit count of the session's own output and
//! decodes exactly that many bits. For streams of any other length it walks
//! every bit: if trailing padding happens to trace a path to a leaf, a
//! spurious symbol is emitted. `decompress_all_bits` always behaves this way.
//!
//! A walk that ends mid-code is accepted only if the unfinished tail is
//! shorter than a byte and all zero (it can only be padding); otherwise the
//! stream is malformed.
//!
//! # Archive format
//!
//! `compress_archive` / `decompress_archive` wrap the bitstream in a
//! self-describing `Archive` that any fresh codec can decode.

use std::io;
use std::path::{Path, PathBuf};

use crate::bitio::{BitReader, BitWriter};
use crate::container::Archive;
use crate::error::{HuffmanError, Result};
use crate::store::ByteStore;
use crate::tree::{CodeTable, FrequencyTable, HuffmanTree};

/// State produced by `compress` and consumed by `decompress`.
#[derive(Debug, Clone)]
struct Session {
    frequencies: FrequencyTable,
    tree: HuffmanTree,
    table: CodeTable,
    encoded_bits: usize,
}

impl Session {
    fn new(frequencies: FrequencyTable) -> Result<Self> {
        let tree = HuffmanTree::build(&frequencies)?;
        let table = tree.code_table();
        let encoded_bits = table.encoded_bit_len(&frequencies) as usize;
        Ok(Self {
            frequencies,
            tree,
            table,
            encoded_bits,
        })
    }
}

/// Huffman codec bound to one caller.
///
/// Not thread-safe: one instance is used sequentially by one caller.
#[derive(Debug, Clone, Default)]
pub struct Codec {
    source: Option<PathBuf>,
    session: Option<Session>,
}

impl Codec {
    /// Create a codec with no source path and no resident tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a codec that owns `path` as its input.
    pub fn with_source(path: impl Into<PathBuf>) -> Self {
        Self {
            source: Some(path.into()),
            session: None,
        }
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Resident tree from the last `compress` or `decompress_archive`.
    pub fn tree(&self) -> Option<&HuffmanTree> {
        self.session.as_ref().map(|s| &s.tree)
    }

    pub fn code_table(&self) -> Option<&CodeTable> {
        self.session.as_ref().map(|s| &s.table)
    }

    pub fn frequencies(&self) -> Option<&FrequencyTable> {
        self.session.as_ref().map(|s| &s.frequencies)
    }

    /// Bits produced by the last compression, padding excluded.
    pub fn encoded_bits(&self) -> Option<usize> {
        self.session.as_ref().map(|s| s.encoded_bits)
    }

    /// Zero bits appended to complete the last packed byte.
    pub fn padding_bits(&self) -> Option<usize> {
        self.encoded_bits().map(|bits| (8 - bits % 8) % 8)
    }

    /// Compress `input` into a packed bitstream.
    ///
    /// Replaces any resident tree with one built for `input`.
    ///
    /// # Errors
    /// Returns `HuffmanError::EmptyInput` if `input` is empty.
    pub fn compress(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        if input.is_empty() {
            return Err(HuffmanError::EmptyInput.into());
        }

        let session = Session::new(FrequencyTable::from_bytes(input))?;
        let packed = encode(&session.table, input, session.encoded_bits)?;

        tracing::debug!(
            input_bytes = input.len(),
            symbols = session.table.len(),
            encoded_bits = session.encoded_bits,
            packed_bytes = packed.len(),
            "compressed"
        );

        self.session = Some(session);
        Ok(packed)
    }

    /// Decode `packed` with the resident tree.
    ///
    /// Output of this codec's last `compress` is decoded exactly. Streams of
    /// any other length are walked to their last bit (see module docs).
    ///
    /// # Errors
    /// - `HuffmanError::TreeNotBuilt` if no tree is resident
    /// - `HuffmanError::MalformedStream` if the walk cannot be resolved
    pub fn decompress(&self, packed: &[u8]) -> Result<Vec<u8>> {
        let session = self.session.as_ref().ok_or(HuffmanError::TreeNotBuilt)?;

        let bit_len = if packed.len() == session.encoded_bits.div_ceil(8) {
            session.encoded_bits
        } else {
            tracing::warn!(
                packed_bytes = packed.len(),
                expected_bytes = session.encoded_bits.div_ceil(8),
                "stream length differs from last compression; decoding every bit"
            );
            packed.len() * 8
        };

        decode(&session.tree, packed, bit_len, true)
    }

    /// Decode every bit of `packed`, padding included.
    ///
    /// Trailing zero padding that completes a code decodes as extra symbols.
    ///
    /// # Errors
    /// Same as `decompress`.
    pub fn decompress_all_bits(&self, packed: &[u8]) -> Result<Vec<u8>> {
        let session = self.session.as_ref().ok_or(HuffmanError::TreeNotBuilt)?;
        decode(&session.tree, packed, packed.len() * 8, true)
    }

    /// Compress `input` into a self-describing archive.
    pub fn compress_archive(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let payload = self.compress(input)?;
        let session = self.session.as_ref().ok_or(HuffmanError::TreeNotBuilt)?;

        let archive = Archive {
            original_len: input.len() as u64,
            bit_count: session.encoded_bits as u64,
            frequencies: session.frequencies.clone(),
            payload,
        };
        Ok(archive.serialize())
    }

    /// Decode an archive. Works on a fresh codec; the rebuilt tree becomes
    /// resident.
    ///
    /// # Errors
    /// - Container and CRC errors from `Archive::parse`
    /// - `HuffmanError::MalformedStream` if the payload does not end on a
    ///   code boundary
    /// - `HuffmanError::LengthMismatch` if the decoded length differs from
    ///   the recorded length
    pub fn decompress_archive(&mut self, bytes: &[u8]) -> Result<Vec<u8>> {
        let archive = Archive::parse(bytes)?;
        let session = Session::new(archive.frequencies)?;

        let bit_count = archive.bit_count as usize;
        let output = decode(&session.tree, &archive.payload, bit_count, false)?;

        if output.len() as u64 != archive.original_len {
            return Err(HuffmanError::LengthMismatch {
                expected: archive.original_len as usize,
                actual: output.len(),
            }
            .into());
        }

        tracing::debug!(
            bit_count,
            output_bytes = output.len(),
            "decompressed archive"
        );

        self.session = Some(Session {
            encoded_bits: bit_count,
            ..session
        });
        Ok(output)
    }

    /// Compress this codec's source path into `output`.
    ///
    /// Returns the number of packed bytes written.
    pub fn compress_source<S: ByteStore + ?Sized>(&mut self, store: &S, output: &Path) -> Result<usize> {
        let source = self.source.clone().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "codec has no source path")
        })?;
        self.compress_file(store, &source, output)
    }

    /// Read `input`, compress it, write the packed bytes to `output`.
    pub fn compress_file<S: ByteStore + ?Sized>(
        &mut self,
        store: &S,
        input: &Path,
        output: &Path,
    ) -> Result<usize> {
        let data = store.read_all(input)?;
        let packed = self.compress(&data)?;
        store.write_all(output, &packed)?;
        Ok(packed.len())
    }

    /// Read `input`, decode it with the resident tree, write to `output`.
    ///
    /// Returns the number of decoded bytes written.
    pub fn decompress_to<S: ByteStore + ?Sized>(
        &self,
        store: &S,
        input: &Path,
        output: &Path,
    ) -> Result<usize> {
        let packed = store.read_all(input)?;
        let data = self.decompress(&packed)?;
        store.write_all(output, &data)?;
        Ok(data.len())
    }
}

/// Concatenate the codes of `input` and pack them.
fn encode(table: &CodeTable, input: &[u8], bit_len: usize) -> Result<Vec<u8>> {
    let mut writer = BitWriter::with_bit_capacity(bit_len);
    for &symbol in input {
        let code = table
            .get(symbol)
            .ok_or(HuffmanError::SymbolNotInTable { symbol })?;
        writer.write_code(code);
    }
    Ok(writer.finish())
}

/// Walk `tree` over the first `bit_len` bits of `packed`, emitting a symbol
/// at each leaf and restarting from the root.
///
/// `allow_padding` permits an unfinished zero tail of fewer than 8 bits.
fn decode(tree: &HuffmanTree, packed: &[u8], bit_len: usize, allow_padding: bool) -> Result<Vec<u8>> {
    let root = tree.root();
    let bits = BitReader::new(packed).take(bit_len);

    // One-symbol alphabet: every `1` is the symbol, the first `0` starts the tail
    if let Some(symbol) = tree.symbol(root) {
        let count = bits.take_while(|&bit| bit).count();
        check_tail(packed, count, bit_len, allow_padding)?;
        return Ok(vec![symbol; count]);
    }

    let mut output = Vec::with_capacity(bit_len / 2);
    let mut node = root;
    let mut code_start = 0;

    for (position, bit) in bits.enumerate() {
        let next = tree
            .child(node, bit)
            .ok_or(HuffmanError::MalformedStream { position })?;

        match tree.symbol(next) {
            Some(symbol) => {
                output.push(symbol);
                node = root;
                code_start = position + 1;
            }
            None => node = next,
        }
    }

    check_tail(packed, code_start, bit_len, allow_padding)?;
    Ok(output)
}

/// Accept bits `[start, bit_len)` that did not complete a code.
fn check_tail(packed: &[u8], start: usize, bit_len: usize, allow_padding: bool) -> Result<()> {
    let tail_len = bit_len - start;
    if tail_len == 0 {
        return Ok(());
    }

    let all_zero = BitReader::new(packed)
        .skip(start)
        .take(tail_len)
        .all(|bit| !bit);

    if allow_padding && tail_len < 8 && all_zero {
        tracing::trace!(bits = tail_len, "ignored padding tail");
        Ok(())
    } else {
        Err(HuffmanError::MalformedStream { position: start }.into())
    }
}
