use std::collections::BTreeMap;

use bench_api::{Dataset, Record};

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

// ═══════════════════════════════════════════════════════════════
//  RNG (xorshift64)
// ═══════════════════════════════════════════════════════════════

pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos() as u64
                | 1 // ensure non-zero
        } else {
            seed
        };
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Returns f64 in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / ((1u64 << 53) as f64)
    }

    /// Returns u64 in [0, n). `n` must be non-zero.
    pub fn next_below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    pub fn next_string(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| LETTERS[self.next_below(LETTERS.len() as u64) as usize] as char)
            .collect()
    }
}

// ═══════════════════════════════════════════════════════════════
//  Dataset shape
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy)]
pub struct Shape {
    pub records: usize,
    pub name_len: usize,
    pub maps: usize,
    /// Exclusive upper bound for `id` and map values; at most `i64::MAX`.
    pub max_value: u64,
}

pub fn random_dataset(shape: Shape, rng: &mut Rng) -> Dataset {
    let tests = (0..shape.records).map(|_| random_record(shape, rng)).collect();
    Dataset::new(tests)
}

fn random_record(shape: Shape, rng: &mut Rng) -> Record {
    let id = rng.next_below(shape.max_value) as i64;
    let frac = rng.next_f64();
    let name = rng.next_string(shape.name_len);
    let mut maps = BTreeMap::new();
    for _ in 0..shape.maps {
        let key = rng.next_string(shape.name_len);
        maps.insert(key, rng.next_below(shape.max_value) as i64);
    }
    Record { id, frac, name, maps }
}
