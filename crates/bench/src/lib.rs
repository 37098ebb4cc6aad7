use std::time::Duration;

use criterion::BenchmarkGroup;
use criterion::measurement::Measurement;
use rand::Rng;

const SMALL_RUNTIME_SAMPLE_SIZE: usize = 15;
const SMALL_RUNTIME_WARM_UP_MS: u64 = 100;
const SMALL_RUNTIME_MEASURE_MS: u64 = 200;
const MEDIUM_RUNTIME_SAMPLE_SIZE: usize = 15;
const MEDIUM_RUNTIME_WARM_UP_MS: u64 = 500;
const MEDIUM_RUNTIME_MEASURE_MS: u64 = 1000;
const LARGE_RUNTIME_SAMPLE_SIZE: usize = 10;
const LARGE_RUNTIME_WARM_UP_MS: u64 = 800;
const LARGE_RUNTIME_MEASURE_MS: u64 = 1500;

/// Multiplier from Steele & Vigna, "Computationally easy, spectrally good
/// multipliers for congruential pseudorandom number generators" (2021).
const LCG_A: u64 = 0xf135_7aea_2e62_a9c5;
/// Must be odd.
const LCG_C: u64 = 0xbace_ba11_beef_bead;

pub fn apply_small_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(SMALL_RUNTIME_SAMPLE_SIZE);
    group.warm_up_time(Duration::from_millis(SMALL_RUNTIME_WARM_UP_MS));
    group.measurement_time(Duration::from_millis(SMALL_RUNTIME_MEASURE_MS));
}

pub fn apply_medium_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(MEDIUM_RUNTIME_SAMPLE_SIZE);
    group.warm_up_time(Duration::from_millis(MEDIUM_RUNTIME_WARM_UP_MS));
    group.measurement_time(Duration::from_millis(MEDIUM_RUNTIME_MEASURE_MS));
}

pub fn apply_large_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(LARGE_RUNTIME_SAMPLE_SIZE);
    group.warm_up_time(Duration::from_millis(LARGE_RUNTIME_WARM_UP_MS));
    group.measurement_time(Duration::from_millis(LARGE_RUNTIME_MEASURE_MS));
}

/// Small linear congruential generator with an explicit, caller-owned seed.
///
/// Cheap and reproducible across platforms; used where a test needs the exact
/// same stream regardless of the `rand` version.
#[derive(Clone, Debug)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Uniform in `[0.0, 1.0)`, taken from the high 48 bits of the state.
    pub fn random_double(&mut self) -> f64 {
        let high_48_bits = (self.state >> 16) as f64;
        let divisor = (1_u64 << 48) as f64;
        self.state = LCG_A.wrapping_mul(self.state).wrapping_add(LCG_C);
        high_48_bits / divisor
    }

    /// Uniform in `[m, n]`.
    pub fn random_int(&mut self, m: i64, n: i64) -> i64 {
        debug_assert!(m <= n);
        m + (self.random_double() * (n - m + 1) as f64) as i64
    }
}

pub fn random<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Vec<i64> {
    (0..len).map(|_| rng.random::<i64>()).collect()
}

/// Values drawn from `0..distinct`, so most keys repeat.
pub fn few_unique<R: Rng + ?Sized>(rng: &mut R, len: usize, distinct: i64) -> Vec<i64> {
    let distinct = distinct.max(1);
    (0..len).map(|_| rng.random_range(0..distinct)).collect()
}

pub fn ascending(len: usize) -> Vec<i64> {
    (0..len as i64).collect()
}

pub fn descending(len: usize) -> Vec<i64> {
    (0..len as i64).rev().collect()
}

/// Ascending input with roughly one percent of the positions swapped.
pub fn nearly_sorted<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Vec<i64> {
    let mut data = ascending(len);
    if len == 0 {
        return data;
    }
    let swaps = (len / 100).max(1);
    for _ in 0..swaps {
        let a = rng.random_range(0..len);
        let b = rng.random_range(0..len);
        data.swap(a, b);
    }
    data
}

/// Random values cut into `saw_count` chunks, each sorted up or down at random.
pub fn saw_mixed<R: Rng + ?Sized>(rng: &mut R, len: usize, saw_count: usize) -> Vec<i64> {
    let mut data = random(rng, len);
    if len == 0 {
        return data;
    }
    let chunk_size = (len / saw_count.max(1)).max(1);
    for chunk in data.chunks_mut(chunk_size) {
        if rng.random::<bool>() {
            chunk.sort_unstable();
        } else {
            chunk.sort_unstable_by(|a, b| b.cmp(a));
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn lcg_stream_is_reproducible() {
        let mut a = Lcg::new(0);
        let mut b = Lcg::new(0);
        for _ in 0..64 {
            assert_eq!(a.random_double().to_bits(), b.random_double().to_bits());
        }
    }

    #[test]
    fn lcg_first_draw_is_the_seed() {
        let mut lcg = Lcg::new(0);
        assert_eq!(lcg.random_double(), 0.0);
        let next = lcg.random_double();
        assert_eq!(next, (LCG_C >> 16) as f64 / (1_u64 << 48) as f64);
    }

    #[test]
    fn lcg_random_int_stays_in_range() {
        let mut lcg = Lcg::new(0x1234_5678);
        for _ in 0..10_000 {
            let x = lcg.random_int(-3, 25);
            assert!((-3..=25).contains(&x));
        }
    }

    #[test]
    fn patterns_have_requested_len() {
        let mut rng = StdRng::seed_from_u64(0x5EED_2026);
        for len in [0_usize, 1, 7, 100, 1000] {
            assert_eq!(random(&mut rng, len).len(), len);
            assert_eq!(few_unique(&mut rng, len, 4).len(), len);
            assert_eq!(ascending(len).len(), len);
            assert_eq!(descending(len).len(), len);
            assert_eq!(nearly_sorted(&mut rng, len).len(), len);
            assert_eq!(saw_mixed(&mut rng, len, 5).len(), len);
        }
        assert!(ascending(50).is_sorted());
        assert!(descending(50).iter().rev().is_sorted());
    }
}
