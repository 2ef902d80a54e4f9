//! Match generator
//!
//! A 48-bit linear congruential generator. The exact output sequence is part
//! of the match format: a seed must lay out the same map everywhere, so this
//! is not swappable for another PRNG.

use serde::{Deserialize, Serialize};

const MULTIPLIER: u64 = 0x5_DEEC_E66D;
const ADDEND: u64 = 0xB;
const MASK: u64 = (1 << 48) - 1;

/// Seeded 48-bit LCG
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRng {
    state: u64,
}

impl MatchRng {
    pub fn new(seed: i64) -> Self {
        Self {
            state: (seed as u64 ^ MULTIPLIER) & MASK,
        }
    }

    /// Advance and return the top `bits` bits of the state (bits <= 32)
    fn next(&mut self, bits: u32) -> u32 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(ADDEND) & MASK;
        (self.state >> (48 - bits)) as u32
    }

    /// Uniform integer in `[0, n)`
    ///
    /// # Panics
    /// If `n <= 0`.
    pub fn next_int(&mut self, n: i32) -> i32 {
        assert!(n > 0, "bound must be positive");

        if n & n.wrapping_neg() == n {
            return ((n as i64 * self.next(31) as i64) >> 31) as i32;
        }

        loop {
            let bits = self.next(31) as i32;
            let val = bits % n;
            // Reject the tail that would bias low values
            if bits.wrapping_sub(val).wrapping_add(n - 1) >= 0 {
                return val;
            }
        }
    }

    /// Two 32-bit draws, high word first. The low word is added unsigned.
    pub fn next_long(&mut self) -> i64 {
        let high = self.next(32) as i64;
        let low = self.next(32) as i64;
        (high << 32).wrapping_add(low)
    }
}

impl rand::RngCore for MatchRng {
    fn next_u32(&mut self) -> u32 {
        self.next(32)
    }

    fn next_u64(&mut self) -> u64 {
        self.next_long() as u64
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.next(32).to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}
