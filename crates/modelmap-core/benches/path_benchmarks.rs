//! Benchmarks for path parsing, reading, and writing
//!
//! These cover the hot operations of the mapping engine: compiling path
//! expressions, resolving them against nested trees, and in-place writes
//! with implicit structure creation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use modelmap_core::{MappingConfig, ModelMapper, PathExpression};
use serde_json::{json, Value};

fn create_test_data() -> Value {
    json!({
        "store": {
            "book": [
                {
                    "category": "reference",
                    "author": "Nigel Rees",
                    "title": "Sayings of the Century",
                    "price": "8.95"
                },
                {
                    "category": "fiction",
                    "author": "Evelyn Waugh",
                    "title": "Sword of Honour",
                    "price": "12.99"
                },
                {
                    "category": "fiction",
                    "author": "Herman Melville",
                    "title": "Moby Dick",
                    "isbn": "0-553-21311-3",
                    "price": "8.99"
                }
            ],
            "bicycle": {
                "color": "red",
                "price": "19.95"
            }
        },
        "expensive": 10
    })
}

fn create_large_data() -> Value {
    let mut items = Vec::new();
    for i in 0..1000 {
        items.push(json!({
            "id": format!("item-{}", i),
            "name": format!("Item {}", i),
            "metadata": {
                "tags": ["tag1", "tag2"],
                "description": format!("Description for item {}", i)
            }
        }));
    }

    json!({
        "items": items,
        "total_count": 1000
    })
}

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    let expressions = vec![
        "store",
        "store.bicycle.color",
        "store.book[0].title",
        "store.book[category=fiction].author",
        "a.b[1].c[d=e].f.g[h=i].j[2].k",
    ];

    for expr in expressions {
        group.bench_with_input(BenchmarkId::new("parse", expr), expr, |b, expr| {
            b.iter(|| {
                let result = PathExpression::parse(black_box(expr));
                black_box(result)
            })
        });
    }

    group.finish();
}

fn bench_reading(c: &mut Criterion) {
    let mut group = c.benchmark_group("reading");
    let data = create_test_data();

    let test_cases = vec![
        ("simple_property", "store"),
        ("nested_property", "store.bicycle.color"),
        ("array_index", "store.book[1].title"),
        ("predicate_match", "store.book[category=fiction].author"),
        ("predicate_miss", "store.book[category=poetry].author"),
    ];

    for (name, expr) in test_cases {
        let path = PathExpression::parse(expr).unwrap();
        group.bench_with_input(BenchmarkId::new("read", name), &path, |b, path| {
            b.iter(|| {
                let result = path.read(black_box(&data));
                black_box(result)
            })
        });
    }

    group.finish();
}

fn bench_writing(c: &mut Criterion) {
    let mut group = c.benchmark_group("writing");

    let test_cases = vec![
        ("shallow", "top"),
        ("deep_create", "a.b.c.d.e"),
        ("array_grow", "items[10].name"),
        ("predicate_insert", "users[name=carol].role"),
    ];

    for (name, expr) in test_cases {
        let path = PathExpression::parse(expr).unwrap();
        group.bench_with_input(BenchmarkId::new("write", name), &path, |b, path| {
            b.iter(|| {
                let mut tree = Value::Object(Default::default());
                path.write(black_box(&mut tree), json!("value"));
                black_box(tree)
            })
        });
    }

    group.finish();
}

fn bench_large_dataset(c: &mut Criterion) {
    let mut group = c.benchmark_group("large_dataset");
    let data = create_large_data();

    let test_cases = vec![
        ("deep_index", "items[999].metadata.description"),
        ("predicate_scan", "items[id=item-999].name"),
    ];

    for (name, expr) in test_cases {
        let path = PathExpression::parse(expr).unwrap();
        group.bench_with_input(BenchmarkId::new("large", name), &path, |b, path| {
            b.iter(|| {
                let result = path.read(black_box(&data));
                black_box(result)
            })
        });
    }

    group.finish();
}

fn bench_caching(c: &mut Criterion) {
    let mut group = c.benchmark_group("caching");
    let data = create_test_data();

    // Compiling once and reusing versus re-parsing per lookup
    let expr = "store.book[category=fiction].author";

    group.bench_function("parse_per_read", |b| {
        b.iter(|| {
            let result = modelmap_core::get_value(black_box(&data), black_box(expr));
            black_box(result)
        })
    });

    group.bench_function("precompiled", |b| {
        let path = PathExpression::parse(expr).unwrap();
        b.iter(|| {
            let result = path.read(black_box(&data));
            black_box(result)
        })
    });

    group.finish();
}

fn bench_mapping(c: &mut Criterion) {
    let mut group = c.benchmark_group("mapping");

    let mapper = ModelMapper::new(
        MappingConfig::new()
            .mapping("title", "store.book[0].title")
            .mapping("author", "store.book[category=fiction].author")
            .mapping("color", "store.bicycle.color")
            .transform("color", |value, _| Ok(Some(value.clone())))
            .default_value("currency", json!("USD")),
    );
    let data = create_test_data();
    let forward = mapper.map(&data).unwrap().unwrap();

    group.bench_function("map", |b| {
        b.iter(|| {
            let result = mapper.map(black_box(&data));
            black_box(result)
        })
    });

    group.bench_function("map_reverse", |b| {
        b.iter(|| {
            let result = mapper.map_reverse(black_box(&forward));
            black_box(result)
        })
    });

    group.finish();
}

fn bench_error_handling(c: &mut Criterion) {
    let mut group = c.benchmark_group("error_handling");

    let invalid_expressions = vec!["a..b", "a.b[", "a[]", "a[k=]", ".a"];

    for expr in invalid_expressions {
        group.bench_with_input(BenchmarkId::new("invalid", expr), expr, |b, expr| {
            b.iter(|| {
                let result = PathExpression::parse(black_box(expr));
                black_box(result)
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_parsing,
    bench_reading,
    bench_writing,
    bench_large_dataset,
    bench_caching,
    bench_mapping,
    bench_error_handling
);

criterion_main!(benches);
