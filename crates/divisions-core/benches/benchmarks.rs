use criterion::{criterion_group, criterion_main, Criterion};
use divisions_core::index::LevelIndex;
use divisions_core::prelude::*;
use divisions_core::{fuzzy_match, Dataset};
use std::hint::black_box;

fn bench_index(c: &mut Criterion) {
    let ds = Dataset::embedded().expect("embedded dataset");
    let wards = ds.records(Level::at(2));
    c.bench_function("index/build_wards", |b| {
        b.iter(|| LevelIndex::build(black_box(wards)))
    });
}

fn bench_lookup(c: &mut Criterion) {
    let r = Registry::embedded();
    r.warm_up();
    c.bench_function("lookup/get_by_id", |b| {
        b.iter(|| r.get_by_id(Level::at(2), black_box("00006")))
    });
    c.bench_function("lookup/get_children", |b| {
        b.iter(|| r.get_children(Level::ROOT, black_box("01")))
    });
    c.bench_function("search/by_name", |b| {
        b.iter(|| r.search_by_name(Level::at(1), black_box("thanh pho")))
    });
}

fn bench_fuzzy(c: &mut Criterion) {
    let r = Registry::embedded();
    r.warm_up();
    let opts = FuzzyOptions::default();
    c.bench_function("fuzzy/match_pair", |b| {
        b.iter(|| fuzzy_match(black_box("ha noi"), black_box("Thành phố Hà Nội"), &opts))
    });
    c.bench_function("fuzzy/universal", |b| {
        b.iter(|| r.universal_fuzzy_search(black_box("hanoi"), &UniversalOptions::default()))
    });
}

criterion_group!(benches, bench_index, bench_lookup, bench_fuzzy);
criterion_main!(benches);
