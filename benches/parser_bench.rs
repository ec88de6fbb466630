use criterion::{black_box, criterion_group, criterion_main, Criterion};

use structcode::{parse, Dtype};

const FLAT: &str = "<2i(3,3)d:matrix:16sQZd";
const NESTED: &str = "@{h:a:{(2,2)f:b:}i}*c*I{2w{x}}";

fn flat_bench(c: &mut Criterion) {
    c.bench_function("parse_flat", |b| b.iter(|| parse(black_box(FLAT))));
}

fn nested_bench(c: &mut Criterion) {
    c.bench_function("parse_nested", |b| b.iter(|| parse(black_box(NESTED))));
}

fn dtype_bench(c: &mut Criterion) {
    c.bench_function("dtype_flat", |b| {
        b.iter(|| Dtype::from_structcode(black_box(FLAT)))
    });
}

criterion_group! {
    name = parser_benches;
    config = Criterion::default();
    targets = flat_bench, nested_bench, dtype_bench
}

criterion_main!(parser_benches);
