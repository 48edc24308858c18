use chordfall_ports::random::RandomSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// `rand`-backed draws for live play. Seeded instances replay the same game.
pub struct RandRandom {
    rng: StdRng,
}

impl RandRandom {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for RandRandom {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for RandRandom {
    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }
}
