//! Deterministic random number generation.
//!
//! RULE: Nothing in the simulation may call any platform RNG.
//! All randomness flows through the one QuarterRng injected into
//! each transition. The engine never derives secondary streams
//! mid-transition — identical seed + identical input sequence
//! must produce an identical resulting state sequence.
//!
//! The caller owns the RNG cursor for the duration of a transition;
//! no two transitions may interleave draws from the same source.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// The single deterministic random source for a run.
pub struct QuarterRng {
    inner: Pcg64Mcg,
}

impl QuarterRng {
    /// Create an RNG from the master seed stored on the run.
    pub fn seed_from(master_seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(master_seed),
        }
    }

    /// Draw a raw u64 (full range).
    pub fn next_u64(&mut self) -> u64 {
        use rand::RngCore;
        self.inner.next_u64()
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        use rand::RngCore;
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll an i64 in [lo, hi] inclusive.
    pub fn roll_range(&mut self, lo: i64, hi: i64) -> i64 {
        assert!(lo <= hi, "lo must be <= hi");
        let span = (hi - lo) as u64 + 1;
        lo + self.next_u64_below(span) as i64
    }

    /// Percentage trial: returns true with probability pct/100.
    /// Always consumes exactly one draw, even at 0 and 100.
    pub fn percent(&mut self, pct: u32) -> bool {
        self.next_u64_below(100) < u64::from(pct)
    }

    /// In-place Fisher-Yates shuffle.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        if items.len() < 2 {
            return;
        }
        for i in (1..items.len()).rev() {
            let j = self.next_u64_below(i as u64 + 1) as usize;
            items.swap(i, j);
        }
    }
}
