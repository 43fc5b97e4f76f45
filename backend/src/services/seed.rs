//! Label-derived pseudo-random generators.
//!
//! Each synthetic dataset draws from its own generator seeded from a string
//! label, so the same label always yields the same sequence and nothing is
//! shared between call sites.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

const SEED_MODULUS: u64 = (1 << 32) - 1;

/// Sum of the label's code points modulo `2^32 - 1`, with 0 coerced to 1.
pub fn derive_seed(label: &str) -> u64 {
    let seed = label
        .chars()
        .fold(0u64, |acc, c| (acc + c as u64) % SEED_MODULUS);
    if seed == 0 {
        1
    } else {
        seed
    }
}

/// Fresh generator for `label`.
pub fn rng_for(label: &str) -> StdRng {
    StdRng::seed_from_u64(derive_seed(label))
}

/// Sample from `N(mean, std_dev)`.
pub fn gaussian<R: Rng + ?Sized>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    let z: f64 = rng.sample(StandardNormal);
    mean + z * std_dev
}

/// Pick one element of a non-empty slice.
pub fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, options: &'a [T]) -> &'a T {
    &options[rng.gen_range(0..options.len())]
}
