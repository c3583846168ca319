//! Seeded, stateless random rolls.
//!
//! The oracle never advances internal state: the caller derives a seed from
//! the game seed, the dispatch nonce and the acting entity, so a replayed
//! session with the same inputs makes the same choices.

pub trait RngOracle: Send + Sync {
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform value in `[min, max]`.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        min + (self.next_u32(seed) % (max - min + 1))
    }
}

/// PCG-XSH-RR: one LCG step followed by an xorshift and a random rotation.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        xorshifted.rotate_right((state >> 59) as u32)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Mixes the session seed with per-dispatch inputs.
///
/// `context` separates independent rolls made by the same dispatch.
pub fn compute_seed(game_seed: u64, nonce: u64, actor_id: u32, context: u32) -> u64 {
    let mut hash = game_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor_id as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_roll() {
        let rng = PcgRng;
        let seed = compute_seed(42, 7, 3, 0);
        assert_eq!(rng.next_u32(seed), rng.next_u32(seed));
        assert_ne!(seed, compute_seed(42, 8, 3, 0));
    }

    #[test]
    fn range_stays_inside_bounds() {
        let rng = PcgRng;
        for nonce in 0..200 {
            let value = rng.range(compute_seed(1, nonce, 0, 0), 2, 5);
            assert!((2..=5).contains(&value));
        }
        assert_eq!(rng.range(9, 4, 4), 4);
    }
}
