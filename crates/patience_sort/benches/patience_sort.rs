use std::hint::black_box;
use std::time::{Duration, Instant};

use criterion::measurement::Measurement;
use criterion::{BenchmarkGroup, BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;

const BENCH_SIZES: [usize; 4] = [1024, 16384, 131072, 1048576];

#[derive(Clone, Copy)]
enum Distribution {
    Random,
    FewUnique,
    Ascending,
    Descending,
    NearlySorted1pctSwaps,
    SawMixed,
}

impl Distribution {
    fn label(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::FewUnique => "few_unique",
            Self::Ascending => "ascending",
            Self::Descending => "descending",
            Self::NearlySorted1pctSwaps => "nearly_sorted_1pct_swaps",
            Self::SawMixed => "saw_mixed",
        }
    }

    fn generate(self, size: usize, seed: u64) -> Vec<i64> {
        let mut rng = StdRng::seed_from_u64(seed);
        match self {
            Self::Random => bench::random(&mut rng, size),
            Self::FewUnique => bench::few_unique(&mut rng, size, 16),
            Self::Ascending => bench::ascending(size),
            Self::Descending => bench::descending(size),
            Self::NearlySorted1pctSwaps => bench::nearly_sorted(&mut rng, size),
            Self::SawMixed => {
                let saws = (size as f64).log2().round() as usize;
                bench::saw_mixed(&mut rng, size, saws)
            }
        }
    }
}

const DISTRIBUTIONS: [Distribution; 6] = [
    Distribution::Random,
    Distribution::FewUnique,
    Distribution::Ascending,
    Distribution::Descending,
    Distribution::NearlySorted1pctSwaps,
    Distribution::SawMixed,
];

type SortFn = fn(&[i64], &mut Vec<i64>);

const SORTS: [(&str, SortFn); 5] = [
    ("patience_indices", patience_indices),
    ("patience_to_buffer", patience_to_buffer),
    ("patience_in_place", patience_in_place),
    ("std_stable", std_stable),
    ("std_unstable", std_unstable),
];

fn patience_indices(base: &[i64], out: &mut Vec<i64>) {
    let indices = patience_sort::sort_indices(base);
    out.extend(indices.iter().map(|&i| base[i]));
}

fn patience_to_buffer(base: &[i64], out: &mut Vec<i64>) {
    out.resize(base.len(), 0);
    patience_sort::sort_to_buffer_by(base, out, i64::cmp).unwrap();
}

fn patience_in_place(base: &[i64], out: &mut Vec<i64>) {
    out.extend_from_slice(base);
    patience_sort::sort_in_place(out);
}

fn std_stable(base: &[i64], out: &mut Vec<i64>) {
    out.extend_from_slice(base);
    out.sort();
}

fn std_unstable(base: &[i64], out: &mut Vec<i64>) {
    out.extend_from_slice(base);
    out.sort_unstable();
}

fn bench_sort(c: &mut Criterion) {
    for &dist in &DISTRIBUTIONS {
        let mut group = c.benchmark_group(format!("patience_sort/{}", dist.label()));

        for &size in &BENCH_SIZES {
            apply_runtime(&mut group, size);
            let base = dist.generate(size, mix_seed(0x5EED_2026 ^ size as u64));

            for &(name, sort) in &SORTS {
                group.bench_function(BenchmarkId::new(name, size), |bencher| {
                    bencher.iter_custom(|iters| {
                        let mut total = Duration::ZERO;
                        let mut out = Vec::with_capacity(size);
                        for _ in 0..iters {
                            out.clear();
                            let start = Instant::now();
                            sort(black_box(&base), &mut out);
                            total += start.elapsed();
                            black_box(&out);
                        }
                        total
                    });
                });
            }
        }

        group.finish();
    }
}

fn apply_runtime<M: Measurement>(group: &mut BenchmarkGroup<'_, M>, size: usize) {
    if size <= 16384 {
        bench::apply_small_runtime_config(group);
    } else if size <= 131072 {
        bench::apply_medium_runtime_config(group);
    } else {
        bench::apply_large_runtime_config(group);
    }
}

#[inline]
fn mix_seed(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

criterion_group!(benches, bench_sort);
criterion_main!(benches);
