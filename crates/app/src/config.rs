//! Configuration for the huffxor application.
//!
//! Parses command-line arguments and fills in defaults so the tool runs
//! with ZERO arguments: without `--in` a sample input is generated from a
//! seed, and every output lands next to the working directory.

use std::path::PathBuf;

/// Complete configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    // === Files ===
    /// Input file path (None = generate sample)
    pub input_file: Option<PathBuf>,

    /// Where a generated sample is written
    pub sample_file: PathBuf,

    /// Compressed output
    pub compressed_file: PathBuf,

    /// XOR-encrypted compressed output
    pub encrypted_file: PathBuf,

    /// XOR-decrypted (restored compressed) output
    pub decrypted_file: PathBuf,

    /// Decompressed output
    pub decompressed_file: PathBuf,

    // === Cipher ===
    /// XOR key (validated by the cipher, not here)
    pub key: String,

    // === Format ===
    /// Write the self-describing archive instead of the bare bitstream
    pub archive: bool,

    // === Sample generation ===
    /// Seed for the generated sample
    pub seed: u64,

    /// Size of the generated sample in bytes
    pub sample_bytes: usize,

    // === Behavior ===
    /// Whether to print detailed config
    pub print_config: bool,

    /// Whether to print detailed metrics summary
    pub print_metrics: bool,

    /// Where to write metrics as `key=value` lines
    pub metrics_file: Option<PathBuf>,
}

impl Config {
    /// Parse configuration from command-line arguments (program name excluded).
    ///
    /// If --seed is not provided, a time-based seed is used and printed with
    /// the config so the run can be reproduced.
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let mut input_file: Option<PathBuf> = None;
        let mut sample_file: Option<PathBuf> = None;
        let mut compressed_file: Option<PathBuf> = None;
        let mut encrypted_file: Option<PathBuf> = None;
        let mut decrypted_file: Option<PathBuf> = None;
        let mut decompressed_file: Option<PathBuf> = None;
        let mut key: Option<String> = None;
        let mut seed: Option<u64> = None;
        let mut sample_bytes: Option<usize> = None;
        let mut archive = false;
        let mut print_config = false;
        let mut print_metrics = true;
        let mut metrics_file: Option<PathBuf> = None;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--in" => input_file = Some(PathBuf::from(value(args, &mut i, "a path")?)),
                "--sample-out" => sample_file = Some(PathBuf::from(value(args, &mut i, "a path")?)),
                "--compressed" => {
                    compressed_file = Some(PathBuf::from(value(args, &mut i, "a path")?))
                }
                "--encrypted" => {
                    encrypted_file = Some(PathBuf::from(value(args, &mut i, "a path")?))
                }
                "--decrypted" => {
                    decrypted_file = Some(PathBuf::from(value(args, &mut i, "a path")?))
                }
                "--decompressed" => {
                    decompressed_file = Some(PathBuf::from(value(args, &mut i, "a path")?))
                }
                "--key" => key = Some(value(args, &mut i, "a key")?.to_string()),
                "--seed" => {
                    seed = Some(value(args, &mut i, "a number")?.parse().map_err(|_| "invalid seed")?);
                }
                "--sample-bytes" => {
                    sample_bytes = Some(
                        value(args, &mut i, "a number")?
                            .parse()
                            .map_err(|_| "invalid sample-bytes")?,
                    );
                }
                "--archive" => archive = true,
                "--print-config" => print_config = true,
                "--no-metrics" => print_metrics = false,
                "--metrics-out" => {
                    metrics_file = Some(PathBuf::from(value(args, &mut i, "a path")?))
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                other => return Err(format!("unknown argument: {}", other)),
            }
            i += 1;
        }

        let seed = seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

        Ok(Config {
            input_file,
            sample_file: sample_file.unwrap_or_else(|| PathBuf::from("./sample.txt")),
            compressed_file: compressed_file.unwrap_or_else(|| PathBuf::from("./out.huff")),
            encrypted_file: encrypted_file.unwrap_or_else(|| PathBuf::from("./out.xor")),
            decrypted_file: decrypted_file.unwrap_or_else(|| PathBuf::from("./out.dec.huff")),
            decompressed_file: decompressed_file.unwrap_or_else(|| PathBuf::from("./out.txt")),
            key: key.unwrap_or_else(|| "key".to_string()),
            archive,
            seed,
            sample_bytes: sample_bytes.unwrap_or(16 * 1024),
            print_config,
            print_metrics,
            metrics_file,
        })
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        match &self.input_file {
            Some(path) => println!("Input file:   {}", path.display()),
            None => println!(
                "Input file:   (generate {} bytes, seed {}) -> {}",
                self.sample_bytes,
                self.seed,
                self.sample_file.display()
            ),
        }
        println!("Compressed:   {}", self.compressed_file.display());
        println!("Encrypted:    {}", self.encrypted_file.display());
        println!("Decrypted:    {}", self.decrypted_file.display());
        println!("Decompressed: {}", self.decompressed_file.display());
        println!();
        println!("Format: {}", if self.archive { "archive" } else { "bare bitstream" });
        println!("Key length: {} bytes", self.key.len());
        if let Some(path) = &self.metrics_file {
            println!("Metrics out: {}", path.display());
        }
        println!();
    }
}

/// Advance past a flag and return its value.
fn value<'a>(args: &'a [String], i: &mut usize, what: &str) -> Result<&'a str, String> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("{} requires {}", flag, what))
}

fn print_help() {
    println!("huffxor: Huffman compression with a repeating-key XOR layer");
    println!();
    println!("Compresses the input, XOR-encrypts the compressed bytes, decrypts them");
    println!("again, decompresses the result and verifies it matches the input.");
    println!();
    println!("USAGE:");
    println!("    huffxor [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --in <PATH>             Input file (default: generate sample)");
    println!("    --sample-out <PATH>     Where a generated sample is written (default: ./sample.txt)");
    println!("    --compressed <PATH>     Compressed output (default: ./out.huff)");
    println!("    --encrypted <PATH>      XOR-encrypted output (default: ./out.xor)");
    println!("    --decrypted <PATH>      XOR-decrypted output (default: ./out.dec.huff)");
    println!("    --decompressed <PATH>   Decompressed output (default: ./out.txt)");
    println!();
    println!("    --key <KEY>             XOR key, non-empty (default: \"key\")");
    println!("    --archive               Write a self-describing archive");
    println!();
    println!("    --seed <N>              Seed for the generated sample");
    println!("    --sample-bytes <N>      Size of the generated sample (default: 16384)");
    println!();
    println!("    --print-config          Print resolved configuration");
    println!("    --no-metrics            Don't print metrics summary");
    println!("    --metrics-out <PATH>    Write metrics as key=value lines");
    println!("    --help, -h              Print this help");
    println!();
    println!("Set RUST_LOG=debug for per-stage detail.");
    println!();
}
