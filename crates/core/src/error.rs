//! Error types for huffxor.
//!
//! Every fallible operation returns a structured error instead of panicking.
//! Errors are surfaced at the point of detection; nothing is retried.

use thiserror::Error;

/// Top-level error type for all operations in the crate.
///
/// Each variant corresponds to a failure domain:
/// - Heap: priority queue misuse
/// - Huffman: tree construction or encode/decode failures
/// - Cipher: XOR key validation
/// - Container: archive header parsing
/// - CRC: archive corruption detected
/// - I/O: reading or writing byte stores
#[derive(Debug, Error)]
pub enum Error {
    /// Priority queue error (e.g., popping an empty queue)
    #[error("heap error: {0}")]
    Heap(#[from] HeapError),

    /// Huffman codec error (e.g., empty input, missing tree)
    #[error("huffman codec error: {0}")]
    Huffman(#[from] HuffmanError),

    /// XOR cipher error
    #[error("cipher error: {0}")]
    Cipher(#[from] CipherError),

    /// Archive container error (e.g., bad magic, truncated header)
    #[error("container error: {0}")]
    Container(#[from] ContainerError),

    /// CRC validation failed, indicating a corrupted archive
    #[error("CRC mismatch: expected {expected:#010x}, got {actual:#010x}")]
    Crc { expected: u32, actual: u32 },

    /// File or store I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Priority queue errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeapError {
    /// `pop` was called with no elements remaining
    #[error("pop from empty queue")]
    EmptyQueue,
}

/// Huffman codec errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HuffmanError {
    /// No symbol has a positive frequency
    #[error("empty input: no symbols to encode")]
    EmptyInput,

    /// Decode attempted without a resident tree
    #[error("huffman tree not built: compress before decompressing")]
    TreeNotBuilt,

    /// Tree walk could not resolve the bit at `position`
    #[error("malformed stream at bit position {position}")]
    MalformedStream { position: usize },

    /// Input byte has no code in the current table
    #[error("symbol {symbol:#04x} not in code table")]
    SymbolNotInTable { symbol: u8 },

    /// Decoded length doesn't match the length recorded in an archive
    #[error("decoded length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// XOR cipher errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CipherError {
    /// Zero-length key (the key index would be taken modulo zero)
    #[error("empty XOR key")]
    EmptyKey,
}

/// Archive container errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContainerError {
    /// Invalid magic number in header
    #[error("invalid magic number: expected {expected:?}, got {actual:?}")]
    InvalidMagic { expected: [u8; 4], actual: [u8; 4] },

    /// Buffer too short to hold the declared header and tables
    #[error("archive too short: need at least {required} bytes, got {actual}")]
    TooShort { required: usize, actual: usize },

    /// Payload length doesn't match the declared bit count
    #[error("payload length mismatch: bit count needs {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Stored frequencies overflow or don't add up to the original length
    #[error("frequency table does not sum to the original length {original_len}")]
    FrequencyTotalMismatch { original_len: u64 },

    /// Stored frequency table holds no symbols
    #[error("archive frequency table is empty")]
    EmptyFrequencyTable,
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
