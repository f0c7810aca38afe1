//! Benchmarks for host block-list lookup.
//!
//! The lists are consulted on every navigation attempt, so membership
//! checks sit on the tab's hot path.

use criterion::{black_box, BenchmarkId, Criterion, Throughput};

use tabnet::navigation::HostBlockLists;

fn bench_block_lookup(c: &mut Criterion) {
    let lists = HostBlockLists::bundled();

    let mut group = c.benchmark_group("blocklist");

    group.throughput(Throughput::Elements(1));
    group.bench_function(BenchmarkId::new("is_block_listed", "exact_match"), |b| {
        b.iter(|| lists.is_block_listed(black_box("doubleclick.net")))
    });

    group.bench_function(BenchmarkId::new("is_block_listed", "subdomain_match"), |b| {
        b.iter(|| lists.is_block_listed(black_box("stats.g.doubleclick.net")))
    });

    group.bench_function(BenchmarkId::new("is_block_listed", "miss"), |b| {
        b.iter(|| lists.is_block_listed(black_box("www.example.com")))
    });

    group.bench_function(BenchmarkId::new("is_block_listed", "deep_miss"), |b| {
        b.iter(|| lists.is_block_listed(black_box("a.b.c.d.e.f.example.org")))
    });

    group.bench_function(BenchmarkId::new("is_allow_listed", "hit"), |b| {
        b.iter(|| lists.is_allow_listed(black_box("fonts.googleapis.com")))
    });

    group.finish();
}

fn main() {
    let mut criterion = Criterion::default().configure_from_args();
    bench_block_lookup(&mut criterion);
    criterion.final_summary();
}
