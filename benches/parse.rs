use std::fmt::Write as _;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

fn generate(sections: usize, keys_per_section: usize) -> String {
    let mut out = String::new();
    for section in 0..sections {
        let _ = writeln!(out, "; section {section}");
        let _ = writeln!(out, "[section{section}]");
        for key in 0..keys_per_section {
            let _ = writeln!(out, "key{key} = value {section}.{key} with some text");
        }
        out.push('\n');
    }
    out
}

fn bench_parse(c: &mut Criterion) {
    let input = generate(2_000, 16);

    let mut group = c.benchmark_group("parse");
    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("generated", |b| {
        b.iter(|| {
            let doc = ini_lite::parse(black_box(&input));
            black_box(doc);
        });
    });
    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let doc = ini_lite::parse(&generate(200, 16));

    let mut group = c.benchmark_group("lookup");
    group.bench_function("last_section_last_key", |b| {
        b.iter(|| {
            let section = doc.find_section(black_box("section199"));
            let value = section.and_then(|id| doc.value(id, black_box("key15")));
            black_box(value);
        });
    });
    group.bench_function("as_float", |b| {
        b.iter(|| {
            let section = doc.find_section(black_box("section100"));
            black_box(section.and_then(|id| doc.value_as_float(id, black_box("key3"))));
        });
    });
    group.finish();
}

criterion_group!(benches, bench_parse, bench_lookup);
criterion_main!(benches);
