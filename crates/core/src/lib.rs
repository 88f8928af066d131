//! huffxor-core: Huffman compression with a repeating-key XOR layer
//!
//! This library provides the core components of a small batch tool that:
//! - Builds an optimal prefix code from byte frequencies
//! - Packs variable-length codes MSB-first into bytes and back
//! - Decodes by walking the resident tree, one bit per step
//! - Obfuscates compressed bytes with a repeating XOR key
//!
//! # Architecture
//!
//! - `heap`: binary min-heap with deterministic tie-breaking
//! - `tree`: frequency table, Huffman tree, code table
//! - `bitio`: bit packing and unpacking
//! - `codec`: compress / decompress orchestration
//! - `container`: self-describing archive format
//! - `cipher`: repeating-key XOR
//! - `store`: whole-file byte producers and consumers
//! - `metrics`: per-run counters
//!
//! # Example
//! ```
//! use huffxor_core::{Codec, XorCipher};
//!
//! let mut codec = Codec::new();
//! let packed = codec.compress(b"aaab")?;
//!
//! let cipher = XorCipher::new("key")?;
//! let hidden = cipher.apply(&packed);
//! let restored = codec.decompress(&cipher.apply(&hidden))?;
//! assert_eq!(restored, b"aaab");
//! # Ok::<(), huffxor_core::Error>(())
//! ```

pub mod bitio;
pub mod cipher;
pub mod codec;
pub mod container;
pub mod error;
pub mod heap;
pub mod metrics;
pub mod store;
pub mod tree;

// Re-export commonly used types
pub use cipher::{xor, XorCipher};
pub use codec::Codec;
pub use container::Archive;
pub use error::{Error, Result};
pub use store::{ByteStore, FsStore, MemoryStore};
pub use tree::{Code, CodeTable, FrequencyTable, HuffmanTree};
