//! Sample input generation.
//!
//! When no input file is specified, a sample is generated whose sections
//! compress very differently, so the metrics show something interesting:
//! - Runs of a single byte (collapse to ~1 bit per symbol)
//! - English-like text over a small alphabet
//! - Short repeating byte patterns
//! - Uniformly random bytes (barely compress at all)

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const WORDS: &[&str] = &[
    "the", "of", "and", "a", "to", "in", "is", "you", "that", "it", "he", "was", "for", "on",
    "are", "as", "with", "his", "they", "at", "be", "this", "have", "from", "or", "one", "had",
    "by", "word", "but", "not", "what", "all", "were", "we", "when", "your", "can", "said",
    "tree", "code", "frequency", "prefix", "symbol", "byte", "bit", "heap",
];

/// Generate `size_bytes` of mixed-compressibility data from `seed`.
pub fn generate_sample_data(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes);

    while data.len() < size_bytes {
        let section = (size_bytes - data.len()).min(rng.gen_range(256..=4096));

        match rng.gen_range(0..10u8) {
            // 20% runs
            0..=1 => {
                let byte: u8 = rng.gen();
                data.extend(std::iter::repeat(byte).take(section));
            }

            // 50% text
            2..=6 => {
                let start = data.len();
                while data.len() - start < section {
                    let word = WORDS.choose(&mut rng).copied().unwrap_or("the");
                    data.extend_from_slice(word.as_bytes());
                    data.push(match rng.gen_range(0..12u8) {
                        0 => b'.',
                        1 => b',',
                        2 => b'\n',
                        _ => b' ',
                    });
                }
            }

            // 20% repeating patterns
            7..=8 => {
                let pattern: Vec<u8> = (0..rng.gen_range(3..=16)).map(|_| rng.gen()).collect();
                data.extend(pattern.iter().cycle().take(section));
            }

            // 10% random
            _ => data.extend((0..section).map(|_| rng.gen::<u8>())),
        }
    }

    data.truncate(size_bytes);
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_sizes() {
        for size in [0, 1, 100, 1000, 10_000, 100_000] {
            assert_eq!(generate_sample_data(999, size).len(), size);
        }
    }

    #[test]
    fn test_determinism() {
        assert_eq!(generate_sample_data(12345, 5000), generate_sample_data(12345, 5000));
    }

    #[test]
    fn test_different_seeds() {
        assert_ne!(generate_sample_data(1, 1000), generate_sample_data(2, 1000));
    }

    #[test]
    fn test_sample_is_compressible() {
        let data = generate_sample_data(7, 50_000);
        let mut codec = huffxor_core::Codec::new();
        let packed = codec.compress(&data).unwrap();
        assert!(packed.len() < data.len());
    }
}
