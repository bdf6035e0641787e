//! Seeded random number provision shared by grid and plan generation.
//!
//! The engine consumes a single reproducible stream of unit-interval values
//! per puzzle: the same identifier must produce the same sequence on every
//! platform, in strict consumption order, so that a score computed on one
//! client can be validated independently on another.

use sha2::{Digest, Sha256};

/// Source of uniformly distributed values in `[0, 1)`.
///
/// Implementations must be deterministic given their construction seed; the
/// engine draws from the stream in a fixed count and order.
pub trait UnitRng {
    /// Returns the next value in the stream, uniform over `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

impl<R: UnitRng + ?Sized> UnitRng for &mut R {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// SplitMix64 generator used as the canonical puzzle stream.
#[derive(Clone, Debug)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    /// Creates a generator from a raw 64-bit seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let seed = if seed == 0 { 0x9e3779b97f4a7c15 } else { seed };
        Self { state: seed }
    }

    /// Creates a generator seeded from an opaque puzzle identifier.
    #[must_use]
    pub fn for_puzzle(puzzle_id: &str) -> Self {
        Self::new(derive_seed(puzzle_id))
    }

    /// Advances the stream and returns the next raw 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e3779b97f4a7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
        z ^ (z >> 31)
    }
}

impl UnitRng for SplitMix64 {
    fn next_unit(&mut self) -> f64 {
        const SCALE: f64 = 1.0 / ((1u64 << 53) as f64);
        let value = self.next_u64() >> 11;
        (value as f64) * SCALE
    }
}

/// Derives a 64-bit seed from an opaque puzzle identifier.
///
/// The identifier is hashed through SHA-256 and the first eight digest bytes
/// are taken little-endian, so any string (a date, a post id) maps to the
/// full seed space without bias.
#[must_use]
pub fn derive_seed(puzzle_id: &str) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(puzzle_id.as_bytes());
    let digest = hasher.finalize();
    let bytes: [u8; 8] = digest[0..8].try_into().expect("sha256 digest slice length");
    u64::from_le_bytes(bytes)
}
