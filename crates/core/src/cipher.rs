//! Repeating-key XOR transform.
//!
//! Byte `i` of the output is `input[i] ^ key[i % key.len()]`. Applying the
//! same key twice restores the input. This is obfuscation only: a repeating
//! XOR key is recoverable from modest amounts of ciphertext.

use std::path::Path;

use crate::error::{CipherError, Result};
use crate::store::ByteStore;

/// XOR cipher holding a validated, non-empty key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XorCipher {
    key: Vec<u8>,
}

impl XorCipher {
    /// # Errors
    /// Returns `CipherError::EmptyKey` if `key` is empty.
    pub fn new(key: impl Into<Vec<u8>>) -> Result<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(CipherError::EmptyKey.into());
        }
        Ok(Self { key })
    }

    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// Return the transformed copy of `bytes`. Output length equals input length.
    pub fn apply(&self, bytes: &[u8]) -> Vec<u8> {
        bytes
            .iter()
            .zip(self.key.iter().cycle())
            .map(|(byte, key)| byte ^ key)
            .collect()
    }

    pub fn apply_in_place(&self, bytes: &mut [u8]) {
        for (byte, key) in bytes.iter_mut().zip(self.key.iter().cycle()) {
            *byte ^= key;
        }
    }

    /// Read `input` from `store`, transform it, and write it to `output`.
    ///
    /// Returns the number of bytes written.
    pub fn apply_file<S: ByteStore + ?Sized>(
        &self,
        store: &S,
        input: &Path,
        output: &Path,
    ) -> Result<usize> {
        let mut bytes = store.read_all(input)?;
        self.apply_in_place(&mut bytes);
        store.write_all(output, &bytes)?;

        tracing::debug!(
            input = %input.display(),
            output = %output.display(),
            bytes = bytes.len(),
            "applied XOR key"
        );

        Ok(bytes.len())
    }
}

/// One-shot form of `XorCipher::apply`.
///
/// # Errors
/// Returns `CipherError::EmptyKey` if `key` is empty.
pub fn xor(bytes: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    Ok(XorCipher::new(key)?.apply(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::store::MemoryStore;

    #[test]
    fn test_known_output() {
        let out = xor(&[0x00, 0xFF, 0x0F, 0xF0, 0xAA], &[0x0F, 0xF0]).unwrap();
        assert_eq!(out, vec![0x0F, 0x0F, 0x00, 0x00, 0xA5]);
    }

    #[test]
    fn test_involution() {
        let data = b"compressed bytes go here \x00\x01\x02\xfe\xff";
        let cipher = XorCipher::new("secret").unwrap();

        let encrypted = cipher.apply(data);
        assert_eq!(encrypted.len(), data.len());
        assert_ne!(encrypted, data.to_vec());
        assert_eq!(cipher.apply(&encrypted), data.to_vec());
    }

    #[test]
    fn test_empty_key() {
        assert!(matches!(
            XorCipher::new(""),
            Err(Error::Cipher(CipherError::EmptyKey))
        ));
        assert!(matches!(
            xor(b"abc", b""),
            Err(Error::Cipher(CipherError::EmptyKey))
        ));
    }

    #[test]
    fn test_empty_input() {
        let cipher = XorCipher::new("k").unwrap();
        assert!(cipher.apply(&[]).is_empty());
    }

    #[test]
    fn test_key_longer_than_input() {
        let out = xor(b"ab", b"\x01\x02\x03\x04").unwrap();
        assert_eq!(out, vec![b'a' ^ 1, b'b' ^ 2]);
    }

    #[test]
    fn test_in_place_matches_apply() {
        let cipher = XorCipher::new(vec![7u8, 13, 42]).unwrap();
        let data: Vec<u8> = (0..=200).collect();

        let mut in_place = data.clone();
        cipher.apply_in_place(&mut in_place);
        assert_eq!(in_place, cipher.apply(&data));
    }

    #[test]
    fn test_apply_file() {
        let store = MemoryStore::new();
        store.insert("plain.bin", b"hello".to_vec());

        let cipher = XorCipher::new("k").unwrap();
        let written = cipher
            .apply_file(&store, Path::new("plain.bin"), Path::new("cipher.bin"))
            .unwrap();
        assert_eq!(written, 5);

        let encrypted = store.get("cipher.bin").unwrap();
        assert_eq!(encrypted, cipher.apply(b"hello"));
    }

    #[test]
    fn test_apply_file_missing_input() {
        let store = MemoryStore::new();
        let cipher = XorCipher::new("k").unwrap();
        let result = cipher.apply_file(&store, Path::new("absent"), Path::new("out"));
        assert!(matches!(result, Err(Error::Io(_))));
        assert!(store.get("out").is_none());
    }
}
