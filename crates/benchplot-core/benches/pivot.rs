// SPDX-License-Identifier: MIT OR Apache-2.0
//! Parse + pivot throughput over a synthetic result file

use benchplot_core::loader::Statistic;
use benchplot_core::{Mode, WideTable, bandwidth_rows, parse_results};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn synthetic_results(n_variants: usize, n_sizes: usize) -> String {
    let mut records = Vec::new();
    for v in 0..n_variants {
        for p in 0..n_sizes {
            let n = 1u64 << (14 + p);
            for stat in ["mean", "stddev"] {
                records.push(format!(
                    "    {{\"name\": \"bench-{v}-u32x2/{n}_{stat}\", \"real_time\": {}, \"time_unit\": \"ns\"}}",
                    1000.0 + v as f64
                ));
            }
        }
    }
    format!("{{\"benchmarks\": [\n{}\n]}}", records.join(",\n"))
}

fn bench_parse_and_pivot(c: &mut Criterion) {
    let raw = synthetic_results(8, 16);

    c.bench_function("parse_results", |b| {
        b.iter(|| parse_results(black_box(&raw)).unwrap());
    });

    let observations = parse_results(&raw).unwrap();
    let rows = bandwidth_rows(&observations, Mode::Fixed).unwrap();

    c.bench_function("pivot_mean", |b| {
        b.iter(|| WideTable::pivot(black_box(&rows), &Statistic::Mean).unwrap());
    });
}

criterion_group!(benches, bench_parse_and_pivot);
criterion_main!(benches);
