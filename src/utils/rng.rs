use rand::SeedableRng;
use rand::rngs::StdRng;

/// Builds the random source used for shuffling, imputation and tie-breaking.
/// A fixed seed makes a whole benchmark run reproducible; without one the
/// generator is seeded from OS entropy.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Derives a distinct per-component seed from the run seed so that sibling
/// classifiers do not share a random stream.
pub fn offset_seed(seed: Option<u64>, offset: u64) -> Option<u64> {
    seed.map(|s| s.wrapping_add(offset))
}
