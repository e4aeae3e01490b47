#[macro_use]
extern crate criterion;

use criterion::Criterion;

use testlog::{CaptureBuffer, Level, Logger, TestLogger};

fn bench_guarded_writes(c: &mut Criterion) {
    let mut group = c.benchmark_group("guarded_writes");

    for (name, source) in [("plain", false), ("with_source", true)] {
        group.bench_function(name, |b| {
            let buffer = CaptureBuffer::new();
            let log = TestLogger::builder()
                .prefix("[bench]")
                .source(source)
                .capture(&buffer)
                .build();
            b.iter(|| {
                log.info("peer connected", &[&"id", &7]);
                buffer.clear();
            });
        });
    }

    group.bench_function("below_minimum", |b| {
        let log = TestLogger::builder()
            .level(Level::Warn)
            .capture(&CaptureBuffer::new())
            .build();
        b.iter(|| log.debug("heartbeat", &[]));
    });

    group.finish();
}

criterion_group!(benches, bench_guarded_writes);
criterion_main!(benches);
