//! Size Estimation Benchmarks
//!
//! **Purpose:** Measure the cost of measuring a build under each compression mode
//!
//! **How to Run:**
//! ```bash
//! cargo bench --bench compression
//! ```
//!
//! **What's Being Measured:**
//! 1. `measure <mode> 256KB` - One large chunk per compression mode
//! 2. `track 50 files` - Full tracker pass with parallel fan-out
//! 3. `diff 1000 files` - Snapshot diffing alone
//!
//! **Performance Notes:**
//! - Gzip and brotli run at their maximum quality level
//! - Output is counted, never buffered

use bundle_sizes::compression::Compression;
use bundle_sizes::config::TrackerConfig;
use bundle_sizes::diff::{diff, SizeMap};
use bundle_sizes::output::{BuildOutput, OutputFile};
use bundle_sizes::tracker::SizeTracker;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use tempfile::TempDir;

fn sample_code(len: usize) -> Vec<u8> {
    let line = b"export function add(a, b) { return a + b; } // padding for realism\n";
    line.iter().copied().cycle().take(len).collect()
}

fn bench_measure_modes(c: &mut Criterion) {
    let code = sample_code(256 * 1024);

    for mode in Compression::ALL {
        if !mode.is_supported() {
            continue;
        }
        let estimator = mode.estimator().unwrap();
        c.bench_function(&format!("measure {} 256KB", mode), |b| {
            b.iter(|| black_box(estimator.measure(black_box(&code))).unwrap());
        });
    }
}

fn bench_track_build(c: &mut Criterion) {
    let files: Vec<OutputFile> = (0..50)
        .map(|i| OutputFile::chunk(format!("chunk-{}.js", i), sample_code(8 * 1024 + i)))
        .collect();
    let output = BuildOutput::new(files);

    c.bench_function("track 50 files", |b| {
        b.iter_batched(
            || {
                let temp_dir = TempDir::new().unwrap();
                let config = TrackerConfig {
                    history_file: temp_dir.path().join("size-plugin.json"),
                    ..TrackerConfig::default()
                };
                (temp_dir, SizeTracker::new(config).unwrap())
            },
            |(temp_dir, tracker)| {
                black_box(tracker.run(&output, None)).unwrap();
                drop(temp_dir);
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

fn bench_diff(c: &mut Criterion) {
    let baseline: SizeMap = (0..1000)
        .map(|i| (format!("chunk-{}.js", i), i as u64 * 10))
        .collect();
    let current: SizeMap = (500..1500)
        .map(|i| (format!("chunk-{}.js", i), i as u64 * 11))
        .collect();

    c.bench_function("diff 1000 files", |b| {
        b.iter(|| black_box(diff(black_box(&baseline), black_box(&current))));
    });
}

criterion_group!(benches, bench_measure_modes, bench_track_build, bench_diff);
criterion_main!(benches);
