//! huffxor: compress, obfuscate, restore and verify a file.
//!
//! Pipeline:
//! input -> compress -> XOR encrypt -> XOR decrypt -> decompress -> verify

mod config;
mod input_gen;

use std::path::Path;

use anyhow::{bail, Context};
use huffxor_core::metrics::Metrics;
use huffxor_core::{ByteStore, Codec, FsStore, XorCipher};
use tracing_subscriber::EnvFilter;

use config::Config;

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("run with --help for usage");
            std::process::exit(2);
        }
    };

    if config.print_config {
        config.print();
    }

    match run(&config, &FsStore) {
        Ok(metrics) => {
            if config.print_metrics {
                metrics.print_summary();
            }
        }
        Err(e) => {
            tracing::error!("{:#}", e);
            std::process::exit(1);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Run the full pipeline against `store`.
fn run<S: ByteStore>(config: &Config, store: &S) -> anyhow::Result<Metrics> {
    let mut metrics = Metrics::new();

    let input_path = match &config.input_file {
        Some(path) => path.clone(),
        None => {
            let sample = input_gen::generate_sample_data(config.seed, config.sample_bytes);
            store
                .write_all(&config.sample_file, &sample)
                .with_context(|| format!("writing sample to {}", config.sample_file.display()))?;
            tracing::info!(
                bytes = sample.len(),
                seed = config.seed,
                "Generated sample input: {}",
                config.sample_file.display()
            );
            config.sample_file.clone()
        }
    };

    // Compress
    let mut codec = Codec::new();
    let input = store
        .read_all(&input_path)
        .with_context(|| format!("reading {}", input_path.display()))?;
    let compressed = if config.archive {
        codec.compress_archive(&input)
    } else {
        codec.compress(&input)
    }
    .with_context(|| format!("compressing {}", input_path.display()))?;

    write(store, &config.compressed_file, &compressed)?;
    metrics.input_bytes = input.len() as u64;
    metrics.compressed_bytes = compressed.len() as u64;
    metrics.distinct_symbols = codec.code_table().map_or(0, |t| t.len()) as u64;
    metrics.encoded_bits = codec.encoded_bits().unwrap_or(0) as u64;
    metrics.padding_bits = codec.padding_bits().unwrap_or(0) as u64;
    tracing::info!(
        "Compression done. Output written to: {}",
        config.compressed_file.display()
    );

    // Encrypt, then decrypt
    let cipher = XorCipher::new(config.key.as_bytes()).context("building XOR cipher")?;
    metrics.cipher_bytes += cipher
        .apply_file(store, &config.compressed_file, &config.encrypted_file)
        .context("encrypting compressed output")? as u64;
    tracing::info!(
        "XOR operation completed. Output written to: {}",
        config.encrypted_file.display()
    );

    metrics.cipher_bytes += cipher
        .apply_file(store, &config.encrypted_file, &config.decrypted_file)
        .context("decrypting")? as u64;
    tracing::info!(
        "XOR operation completed. Output written to: {}",
        config.decrypted_file.display()
    );

    // Decompress the decrypted bytes
    let restored_compressed = store
        .read_all(&config.decrypted_file)
        .with_context(|| format!("reading {}", config.decrypted_file.display()))?;
    let decoded = if config.archive {
        // The archive carries its own tree; decode on a fresh codec
        Codec::new().decompress_archive(&restored_compressed)
    } else {
        codec.decompress(&restored_compressed)
    }
    .with_context(|| format!("decompressing {}", config.decrypted_file.display()))?;

    write(store, &config.decompressed_file, &decoded)?;
    metrics.decoded_bytes = decoded.len() as u64;
    tracing::info!(
        "Decompression done. Output written to: {}",
        config.decompressed_file.display()
    );

    let verified = decoded == input;
    metrics.verified = Some(verified);
    metrics.complete();

    if let Some(path) = &config.metrics_file {
        write(store, path, metrics.export_text().as_bytes())?;
    }

    if !verified {
        bail!(
            "decompressed output ({} bytes) differs from input ({} bytes)",
            decoded.len(),
            input.len()
        );
    }

    Ok(metrics)
}

fn write<S: ByteStore>(store: &S, path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    store
        .write_all(path, bytes)
        .with_context(|| format!("writing {}", path.display()))
}
