//! Park-Miller Linear Congruential Generator (MINSTD)
//!
//! A tiny, fully specified generator so that a `u32` seed names the same maze
//! on every platform and every `rand` release. It plugs into carving through
//! [`rand::RngCore`], so any other `rand` generator can be used instead.
//!
//! Constants:
//! - Multiplier (a): 48271
//! - Modulus (m): 2^31 - 1 = 2147483647
//!
//! Reference: https://en.wikipedia.org/wiki/Lehmer_random_number_generator

use rand::{Error, RngCore, SeedableRng};

const MULTIPLIER: u64 = 48271;
const MODULUS: u64 = 2147483647; // 2^31 - 1

/// Park-Miller Linear Congruential Generator
///
/// Same seed always produces the same sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimpleLCG {
    state: u32,
}

impl SimpleLCG {
    /// Create a new LCG with the given seed
    ///
    /// Seed 0 (and any multiple of the modulus) is replaced with 1 to avoid
    /// the degenerate all-zero sequence.
    pub fn new(seed: u32) -> Self {
        let state = (seed as u64 % MODULUS) as u32;
        Self {
            state: if state == 0 { 1 } else { state },
        }
    }

    /// Advance and return the raw 31-bit state
    fn advance(&mut self) -> u32 {
        // Use u64 to avoid overflow during multiplication
        self.state = ((self.state as u64 * MULTIPLIER) % MODULUS) as u32;
        self.state
    }
}

impl RngCore for SimpleLCG {
    /// Two steps, keeping the top 16 of each 31-bit state
    fn next_u32(&mut self) -> u32 {
        let hi = self.advance() >> 15;
        let lo = self.advance() >> 15;
        (hi << 16) | lo
    }

    fn next_u64(&mut self) -> u64 {
        let hi = self.next_u32() as u64;
        let lo = self.next_u32() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for SimpleLCG {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}
