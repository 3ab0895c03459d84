//! Pure Rust core benchmarks for the tide evaluator.
//!
//! Uses std::time::Instant for timing, a deterministic LCG PRNG for query
//! generation, and std::hint::black_box to prevent dead-code elimination.

use std::hint::black_box;
use std::sync::Arc;
use std::time::{Duration, Instant};

use num_complex::Complex64;

use pyperth_core::axis::{Axis, DEFAULT_EPSILON};
use pyperth_core::constituents::Constituent;
use pyperth_core::datetime::MICROSECONDS_PER_DAY;
use pyperth_core::inference::InterpolationType;
use pyperth_core::tidal_model::TidalModel;
use pyperth_core::tide::{EvaluationSettings, Perth};

const REPEATS: usize = 7;

/// Simple LCG PRNG for deterministic data generation.
struct Lcg(u64);

impl Lcg {
    fn next_f64(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) as f64 / (1u64 << 31) as f64
    }
}

/// A half-degree global model with the eight largest constituents.
fn make_model() -> Arc<TidalModel<f64>> {
    let lon = Axis::with_bounds(-180.0, 179.5, 0.5, DEFAULT_EPSILON, true).unwrap();
    let lat = Axis::with_bounds(-90.0, 90.0, 0.5, DEFAULT_EPSILON, false).unwrap();
    let shape = (lon.size() as usize, lat.size() as usize);
    let mut model = TidalModel::new(lon, lat, true);

    let constituents = [
        (Constituent::M2, 0.9),
        (Constituent::S2, 0.4),
        (Constituent::N2, 0.2),
        (Constituent::K2, 0.1),
        (Constituent::K1, 0.3),
        (Constituent::O1, 0.2),
        (Constituent::P1, 0.1),
        (Constituent::Q1, 0.05),
    ];
    let mut rng = Lcg(7);
    for (constituent, scale) in constituents {
        let wave: Vec<Complex64> = (0..shape.0 * shape.1)
            .map(|_| {
                Complex64::new(
                    scale * (rng.next_f64() - 0.5),
                    scale * (rng.next_f64() - 0.5),
                )
            })
            .collect();
        model.add_constituent(constituent, wave, shape).unwrap();
    }
    Arc::new(model)
}

/// An along-track query set: consecutive points are spatially and temporally
/// close, as in altimetry ground tracks.
fn make_track(n: usize, seed: u64) -> (Vec<f64>, Vec<f64>, Vec<i64>) {
    let mut rng = Lcg(seed);
    let mut lon = Vec::with_capacity(n);
    let mut lat = Vec::with_capacity(n);
    let mut time = Vec::with_capacity(n);

    let mut x = rng.next_f64() * 360.0 - 180.0;
    let mut y = rng.next_f64() * 120.0 - 60.0;
    let mut t = 45_335 * MICROSECONDS_PER_DAY;
    for _ in 0..n {
        x += 0.05;
        y += 0.02 * (rng.next_f64() - 0.5);
        t += 1_000_000;
        lon.push(x);
        lat.push(y.clamp(-89.0, 89.0));
        time.push(t);
    }
    (lon, lat, time)
}

/// Run a closure `REPEATS` times, return the median duration.
fn median_time<F: FnMut()>(mut f: F) -> Duration {
    let mut times: Vec<Duration> = (0..REPEATS)
        .map(|_| {
            let start = Instant::now();
            f();
            start.elapsed()
        })
        .collect();
    times.sort();
    times[REPEATS / 2]
}

fn bench_evaluate(
    perth: &Perth<f64>,
    sizes: &[usize],
    settings: &EvaluationSettings,
    label: &'static str,
) -> Vec<(&'static str, usize, Duration)> {
    let mut results = Vec::new();
    for &n in sizes {
        let (lon, lat, time) = make_track(n, 42);

        // Warmup
        black_box(perth.evaluate(&lon, &lat, &time, settings).unwrap());

        let dur = median_time(|| {
            black_box(perth.evaluate(&lon, &lat, &time, settings).unwrap());
        });
        results.push((label, n, dur));
    }
    results
}

fn main() {
    println!("Tide Evaluator Benchmarks");
    println!("============================================================");
    println!("{:<24} {:>8}   {:>12}", "Configuration", "N", "Median (ms)");
    println!("--------------------------------------------");

    let model = make_model();
    let perth = Perth::new(model, false);

    let mut all_results: Vec<(&str, usize, Duration)> = Vec::new();

    all_results.extend(bench_evaluate(
        &perth,
        &[1_000, 10_000, 100_000],
        &EvaluationSettings {
            num_threads: 1,
            ..Default::default()
        },
        "plain/1-thread",
    ));
    all_results.extend(bench_evaluate(
        &perth,
        &[100_000],
        &EvaluationSettings::default(),
        "plain/all-threads",
    ));
    all_results.extend(bench_evaluate(
        &perth,
        &[1_000, 10_000, 100_000],
        &EvaluationSettings {
            interpolation: Some(InterpolationType::LinearAdmittance),
            num_threads: 1,
            ..Default::default()
        },
        "inference/1-thread",
    ));
    all_results.extend(bench_evaluate(
        &perth,
        &[100_000],
        &EvaluationSettings {
            interpolation: Some(InterpolationType::LinearAdmittance),
            time_tolerance: 60.0,
            ..Default::default()
        },
        "inference/tol-60s",
    ));

    for (label, n, dur) in &all_results {
        let ms = dur.as_secs_f64() * 1000.0;
        println!("{:<24} {:>8}      {:>8.2}", label, n, ms);
    }

    println!("============================================================");
}
