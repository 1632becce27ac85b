//! Annual return sampling
//!
//! All randomness in the engine flows through the [`ReturnSampler`]
//! capability so tests can inject fixed or scripted factor sequences in
//! place of a real generator. The production model is a lognormal growth
//! factor: `exp(N(ln(1 + mean) - vol^2 / 2, vol^2))`, whose arithmetic
//! expectation equals `1 + mean` and which is strictly positive, so a
//! single bad year can never flip a balance negative through compounding.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

/// Source of one annual growth factor per call.
///
/// Returns are i.i.d. across years and across paths; a factor of 1.05
/// means the balance grows 5% that year.
pub trait ReturnSampler {
    /// Draw the growth factor for one simulated year.
    fn draw_factor(&mut self, mean: f64, volatility: f64) -> f64;
}

/// Multiplier used to decorrelate per-path seed streams (splitmix64 golden
/// gamma). Two paths with adjacent indices get unrelated ChaCha key setups.
const SEED_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// Lognormal-factor sampler over a seedable ChaCha stream.
#[derive(Debug, Clone)]
pub struct LognormalSampler {
    rng: ChaCha8Rng,
}

impl LognormalSampler {
    /// Sampler for a standalone stream.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Independent stream for one path, derived from the run's base seed.
    ///
    /// Deterministic in `(base_seed, path_index)` so results do not depend
    /// on which worker thread picks up the path.
    pub fn for_path(base_seed: u64, path_index: u64) -> Self {
        Self::from_seed(base_seed ^ path_index.wrapping_mul(SEED_GAMMA))
    }
}

impl ReturnSampler for LognormalSampler {
    fn draw_factor(&mut self, mean: f64, volatility: f64) -> f64 {
        if volatility == 0.0 {
            // Degenerate distribution: every year grows by exactly the mean.
            return 1.0 + mean;
        }
        let mu = (1.0 + mean).ln() - 0.5 * volatility * volatility;
        // Parameters are range-checked at validation; Normal::new only
        // fails on non-finite or negative sigma.
        let normal = Normal::new(mu, volatility).unwrap_or(Normal::new(0.0, 1.0).unwrap());
        normal.sample(&mut self.rng).exp()
    }
}

/// Sampler that returns the same factor every year. Test capability.
#[derive(Debug, Clone, Copy)]
pub struct FixedSampler {
    pub factor: f64,
}

impl ReturnSampler for FixedSampler {
    fn draw_factor(&mut self, _mean: f64, _volatility: f64) -> f64 {
        self.factor
    }
}

/// Sampler that replays a scripted factor sequence, then holds the last
/// value. Test capability for exercising specific year-by-year outcomes.
#[derive(Debug, Clone)]
pub struct ScriptedSampler {
    factors: Vec<f64>,
    next: usize,
}

impl ScriptedSampler {
    pub fn new(factors: Vec<f64>) -> Self {
        assert!(!factors.is_empty(), "scripted sampler needs at least one factor");
        Self { factors, next: 0 }
    }
}

impl ReturnSampler for ScriptedSampler {
    fn draw_factor(&mut self, _mean: f64, _volatility: f64) -> f64 {
        let factor = self.factors[self.next.min(self.factors.len() - 1)];
        self.next += 1;
        factor
    }
}
