use cardex::{Collection, FieldType, IndexKind, Query, Schema, Value};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::Rng;

/// Helper to build a populated collection; `indexed` controls whether the
/// name column carries dedicated indexes or every query falls back to a
/// table scan.
fn populated_collection(records: usize, indexed: bool) -> Collection {
    let mut schema = Schema::new("people")
        .column("name", FieldType::Str)
        .column("age", FieldType::UInt);
    if indexed {
        schema = schema
            .index("name", IndexKind::Prefix)
            .index("name", IndexKind::Fullmatch);
    }

    let mut coll = Collection::new(schema).unwrap();
    let mut rng = rand::thread_rng();
    let stems = ["al", "be", "ca", "do", "el", "fa", "gu", "ha"];
    for i in 0..records {
        let name = format!("{}{}", stems[i % stems.len()], rng.gen_range(0..1000));
        coll.insert(vec![Value::from(name), Value::UInt(i as u64)])
            .unwrap();
    }
    coll
}

fn bench_insert(c: &mut Criterion) {
    c.bench_function("insert_indexed", |b| {
        let mut coll = populated_collection(0, true);
        let mut i = 0u64;
        b.iter(|| {
            coll.insert(vec![Value::from(format!("name{i}")), Value::UInt(i)])
                .unwrap();
            i += 1;
        });
    });
}

fn bench_fullmatch_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("fullmatch_query");

    for &records in [100usize, 1_000, 10_000].iter() {
        let indexed = populated_collection(records, true);
        let scanned = populated_collection(records, false);
        let query = Query::fullmatch("name", "al1");

        group.bench_with_input(BenchmarkId::new("indexed", records), &records, |b, _| {
            b.iter(|| black_box(indexed.filter_ids(&query).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("scan", records), &records, |b, _| {
            b.iter(|| black_box(scanned.filter_ids(&query).unwrap()));
        });
    }

    group.finish();
}

fn bench_prefix_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("prefix_query");

    for &records in [1_000usize, 10_000].iter() {
        let coll = populated_collection(records, true);
        let query = Query::prefix("name", "al");

        group.bench_with_input(BenchmarkId::from_parameter(records), &records, |b, _| {
            b.iter(|| black_box(coll.filter_ids(&query).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_insert,
    bench_fullmatch_query,
    bench_prefix_query
);
criterion_main!(benches);
