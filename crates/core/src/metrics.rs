//! Metrics for one compress / obfuscate / restore run.
//!
//! Collected with explicit updates at each pipeline stage. Single-threaded;
//! not synchronized.

use std::time::{Duration, Instant};

/// Counts, sizes and timing across the pipeline stages.
#[derive(Debug, Clone)]
pub struct Metrics {
    // === Timing ===
    /// When the run started
    pub start_time: Instant,

    /// When the run ended (set on completion)
    pub end_time: Option<Instant>,

    // === Compression ===
    /// Bytes read from the input
    pub input_bytes: u64,

    /// Distinct symbols in the input
    pub distinct_symbols: u64,

    /// Encoded bits, padding excluded
    pub encoded_bits: u64,

    /// Zero bits padding the last packed byte
    pub padding_bits: u64,

    /// Bytes written by the compressor
    pub compressed_bytes: u64,

    // === Cipher ===
    /// Bytes passed through the XOR cipher (both directions)
    pub cipher_bytes: u64,

    // === Decompression ===
    /// Bytes written by the decompressor
    pub decoded_bytes: u64,

    /// Whether the decoded output matched the input
    pub verified: Option<bool>,
}

impl Metrics {
    /// Create new metrics with start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            input_bytes: 0,
            distinct_symbols: 0,
            encoded_bits: 0,
            padding_bits: 0,
            compressed_bytes: 0,
            cipher_bytes: 0,
            decoded_bytes: 0,
            verified: None,
        }
    }

    /// Mark the run as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Compressed / input size. Returns 0.0 if nothing was read.
    pub fn compression_ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.compressed_bytes as f64 / self.input_bytes as f64
        }
    }

    /// Average code length. Returns 0.0 if nothing was read.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.encoded_bits as f64 / self.input_bytes as f64
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== Run Summary ===");
        println!("Duration: {} ms", self.duration().as_millis());
        println!();

        println!("=== Compression ===");
        println!("Input: {} bytes", self.input_bytes);
        println!("Distinct symbols: {}", self.distinct_symbols);
        println!("Encoded bits: {} (+{} padding)", self.encoded_bits, self.padding_bits);
        println!("Compressed: {} bytes", self.compressed_bytes);
        println!("Ratio: {:.1}%", self.compression_ratio() * 100.0);
        println!("Bits per symbol: {:.3}", self.bits_per_symbol());
        println!();

        println!("=== Cipher ===");
        println!("XOR bytes: {}", self.cipher_bytes);
        println!();

        println!("=== Decompression ===");
        println!("Decoded: {} bytes", self.decoded_bytes);
        match self.verified {
            Some(true) => println!("Verification: PASSED"),
            Some(false) => println!("Verification: FAILED (output differs from input)"),
            None => println!("Verification: skipped"),
        }
        println!();
    }

    /// Export metrics as `key=value` lines (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "duration_ms={}\n\
             input_bytes={}\n\
             distinct_symbols={}\n\
             encoded_bits={}\n\
             padding_bits={}\n\
             compressed_bytes={}\n\
             compression_ratio={:.4}\n\
             cipher_bytes={}\n\
             decoded_bytes={}\n\
             verified={}\n",
            self.duration().as_millis(),
            self.input_bytes,
            self.distinct_symbols,
            self.encoded_bits,
            self.padding_bits,
            self.compressed_bytes,
            self.compression_ratio(),
            self.cipher_bytes,
            self.decoded_bytes,
            self.verified.map_or("unknown", |v| if v { "true" } else { "false" }),
        )
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratios() {
        let mut metrics = Metrics::new();
        assert_eq!(metrics.compression_ratio(), 0.0);
        assert_eq!(metrics.bits_per_symbol(), 0.0);

        metrics.input_bytes = 100;
        metrics.compressed_bytes = 25;
        metrics.encoded_bits = 196;
        assert!((metrics.compression_ratio() - 0.25).abs() < 1e-9);
        assert!((metrics.bits_per_symbol() - 1.96).abs() < 1e-9);
    }

    #[test]
    fn test_complete_freezes_duration() {
        let mut metrics = Metrics::new();
        metrics.complete();
        let first = metrics.duration();
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(metrics.duration(), first);
    }

    #[test]
    fn test_export_text() {
        let mut metrics = Metrics::new();
        metrics.input_bytes = 4;
        metrics.compressed_bytes = 1;
        metrics.encoded_bits = 4;
        metrics.padding_bits = 4;
        metrics.verified = Some(true);

        let text = metrics.export_text();
        assert!(text.contains("input_bytes=4\n"));
        assert!(text.contains("padding_bits=4\n"));
        assert!(text.contains("compression_ratio=0.2500\n"));
        assert!(text.contains("verified=true\n"));
    }
}
