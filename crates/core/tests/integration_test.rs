//! Integration tests for the full huffxor pipeline.
//!
//! These tests verify end-to-end behavior on real files: input -> compress ->
//! XOR encrypt -> XOR decrypt -> decompress -> output, with verification that
//! output matches input.

use std::path::Path;

use huffxor_core::{
    error::{CipherError, Error, HuffmanError},
    ByteStore, Codec, FsStore, XorCipher,
};

fn write_input(dir: &Path, name: &str, data: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    FsStore.write_all(&path, data).expect("write input");
    path
}

/// Compress, encrypt, decrypt, decompress through files on disk.
#[test]
fn test_full_pipeline_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let input_data = b"hello world! this is a test of the full pipeline with some repetition: aaaaaaaaaa bbbbbbbbbb cccccccccc";
    let input = write_input(dir.path(), "input.txt", input_data);

    let compressed = dir.path().join("out.huff");
    let encrypted = dir.path().join("out.xor");
    let decrypted = dir.path().join("out.dec.huff");
    let decompressed = dir.path().join("out.txt");

    let mut codec = Codec::with_source(&input);
    let packed_len = codec.compress_source(&FsStore, &compressed).unwrap();
    assert!(packed_len < input_data.len());

    let cipher = XorCipher::new("pipeline key").unwrap();
    cipher.apply_file(&FsStore, &compressed, &encrypted).unwrap();
    cipher.apply_file(&FsStore, &encrypted, &decrypted).unwrap();

    let compressed_bytes = std::fs::read(&compressed).unwrap();
    let encrypted_bytes = std::fs::read(&encrypted).unwrap();
    assert_eq!(encrypted_bytes.len(), compressed_bytes.len());
    assert_ne!(encrypted_bytes, compressed_bytes);
    assert_eq!(std::fs::read(&decrypted).unwrap(), compressed_bytes);

    codec.decompress_to(&FsStore, &decrypted, &decompressed).unwrap();
    assert_eq!(std::fs::read(&decompressed).unwrap(), input_data.to_vec());
}

/// Text ingestion through the store's text capability.
#[test]
fn test_text_input() {
    let dir = tempfile::tempdir().unwrap();
    let text = "Ünïcödé text survives the round trip, including multibyte symbols.\n";
    let input = write_input(dir.path(), "text.txt", text.as_bytes());

    let source = FsStore.read_text(&input).unwrap();
    let mut codec = Codec::new();
    let packed = codec.compress(source.as_bytes()).unwrap();
    let decoded = codec.decompress(&packed).unwrap();

    assert_eq!(String::from_utf8(decoded).unwrap(), text);
}

/// An archive written by one process-like session decodes in another.
#[test]
fn test_archive_across_codecs() {
    let dir = tempfile::tempdir().unwrap();
    let input_data = b"The quick brown fox jumps over the lazy dog. ".repeat(100);
    let archive_path = dir.path().join("data.hxf");

    let archive = Codec::new().compress_archive(&input_data).unwrap();
    FsStore.write_all(&archive_path, &archive).unwrap();

    let bytes = FsStore.read_all(&archive_path).unwrap();
    let decoded = Codec::new().decompress_archive(&bytes).unwrap();
    assert_eq!(decoded, input_data);
}

/// The bare format cannot be decoded by a codec that never compressed.
#[test]
fn test_bare_format_needs_resident_tree() {
    let mut producer = Codec::new();
    let packed = producer.compress(b"only the producer can read this").unwrap();

    let consumer = Codec::new();
    assert!(matches!(
        consumer.decompress(&packed),
        Err(Error::Huffman(HuffmanError::TreeNotBuilt))
    ));
}

/// Encrypted archives are not archives until decrypted.
#[test]
fn test_encrypted_archive_rejected_until_decrypted() {
    let input_data = b"layered archive".to_vec();
    let archive = Codec::new().compress_archive(&input_data).unwrap();

    let cipher = XorCipher::new("k3y").unwrap();
    let hidden = cipher.apply(&archive);
    assert!(Codec::new().decompress_archive(&hidden).is_err());

    let decoded = Codec::new()
        .decompress_archive(&cipher.apply(&hidden))
        .unwrap();
    assert_eq!(decoded, input_data);
}

/// Full 256-symbol alphabet.
#[test]
fn test_all_symbols() {
    let input_data: Vec<u8> = (0..=255).collect();

    let mut codec = Codec::new();
    let packed = codec.compress(&input_data).unwrap();

    // Uniform frequencies over 256 symbols give 8-bit codes
    assert_eq!(codec.encoded_bits(), Some(256 * 8));
    assert_eq!(packed.len(), 256);
    assert_eq!(codec.decompress(&packed).unwrap(), input_data);
}

/// Large single-symbol input.
#[test]
fn test_large_single_symbol() {
    let input_data = vec![b'X'; 128 * 1024];

    let mut codec = Codec::new();
    let packed = codec.compress(&input_data).unwrap();

    assert_eq!(packed.len(), input_data.len() / 8);
    assert_eq!(codec.decompress(&packed).unwrap(), input_data);
}

#[test]
fn test_empty_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "empty.txt", b"");
    let output = dir.path().join("empty.huff");

    let mut codec = Codec::new();
    let result = codec.compress_file(&FsStore, &input, &output);
    assert!(matches!(
        result,
        Err(Error::Huffman(HuffmanError::EmptyInput))
    ));
    assert!(!output.exists());
}

#[test]
fn test_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut codec = Codec::with_source(dir.path().join("absent.txt"));
    let result = codec.compress_source(&FsStore, &dir.path().join("out.huff"));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_empty_key_rejected() {
    assert!(matches!(
        XorCipher::new(Vec::<u8>::new()),
        Err(Error::Cipher(CipherError::EmptyKey))
    ));
}
