//! Performance benchmarks for a3s-facade
//!
//! Run with: cargo bench

use a3s_facade::{to_facade, Facade, FacadeOptions, Message, Track};
use criterion::{criterion_group, criterion_main, Criterion};

fn sample() -> serde_json::Value {
    serde_json::json!({
        "type": "track",
        "event": "Order Completed",
        "userId": "calvin@segment.io",
        "timestamp": "2014-01-01T00:00:00.000Z",
        "context": {"ip": "0.0.0.0", "Salesforce": {"object": "Lead"}},
        "properties": {
            "Total": "$99.50",
            "tax": 2,
            "shipping": 5,
            "created_at": "2013-12-24T10:00:00Z",
            "products": [
                {"sku": "a", "price": 40, "quantity": 1},
                {"sku": "b", "price": 52.5, "quantity": 1}
            ]
        }
    })
}

fn bench_construction(c: &mut Criterion) {
    let payload = sample();

    c.bench_function("Facade::new", |b| {
        b.iter(|| Facade::new(payload.clone()));
    });

    c.bench_function("Facade::new (no traverse)", |b| {
        let opts = FacadeOptions::default().with_traverse(false);
        b.iter(|| Facade::with_options(payload.clone(), opts));
    });
}

fn bench_lookup(c: &mut Criterion) {
    let facade = Facade::new(sample());
    let borrowed = Facade::with_options(sample(), FacadeOptions::default().with_clone(false));

    c.bench_function("proxy exact", |b| {
        b.iter(|| facade.proxy("properties.tax"));
    });

    c.bench_function("proxy case-insensitive", |b| {
        b.iter(|| facade.proxy("Properties.total"));
    });

    c.bench_function("proxy borrowed", |b| {
        b.iter(|| borrowed.proxy("properties.products"));
    });

    c.bench_function("enabled", |b| {
        b.iter(|| facade.enabled("Salesforce"));
    });
}

fn bench_dispatch(c: &mut Criterion) {
    let payload = sample();

    c.bench_function("to_facade", |b| {
        b.iter(|| to_facade(payload.clone()).unwrap());
    });
}

fn bench_order_math(c: &mut Criterion) {
    let track = Track::new(sample());

    c.bench_function("Track revenue", |b| {
        b.iter(|| track.revenue());
    });

    c.bench_function("Track subtotal", |b| {
        b.iter(|| track.subtotal());
    });
}

criterion_group!(
    benches,
    bench_construction,
    bench_lookup,
    bench_dispatch,
    bench_order_math
);
criterion_main!(benches);
