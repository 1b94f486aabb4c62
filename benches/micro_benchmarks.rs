//! Micro benchmarks for the hot, allocation-heavy bits of a connect call
//!
//! Run with: cargo bench --bench micro_benchmarks

use cache_broker::protocol::{decode_reply, encode_command, Command};
use cache_broker::{classify, Candidates};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn classify_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    for addr in [
        "/var/run/nutcracker_redis_6387.sock",
        "172.16.3.6",
        "cache-primary.eu-west-1.internal",
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(addr), addr, |b, addr| {
            b.iter(|| classify(black_box(addr)))
        });
    }

    group.finish();
}

fn candidates_benchmarks(c: &mut Criterion) {
    let hosts: Vec<String> = (0..16).map(|i| format!("10.0.0.{}", i)).collect();

    c.bench_function("candidates/endpoints_16", |b| {
        let candidates = Candidates::from(hosts.as_slice());
        b.iter(|| black_box(&candidates).endpoints())
    });
}

fn protocol_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("protocol");

    group.bench_function("encode_select", |b| {
        b.iter(|| encode_command(black_box(&Command::Select(15))))
    });

    group.bench_function("decode_ok", |b| {
        b.iter(|| decode_reply(black_box(b"+OK\r\n")))
    });

    let nested = b"*3\r\n$5\r\nhello\r\n:42\r\n*2\r\n+a\r\n$-1\r\n";
    group.bench_function("decode_nested_array", |b| {
        b.iter(|| decode_reply(black_box(&nested[..])))
    });

    group.finish();
}

criterion_group!(
    benches,
    classify_benchmarks,
    candidates_benchmarks,
    protocol_benchmarks
);
criterion_main!(benches);
