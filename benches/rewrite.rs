use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gopkg_rewrite::{rewrite, RewriteConfig, RewriteSettings};

/// Generate a schema file with `options` option lines and some message bodies
fn generate_proto(options: usize, with_go_package: bool) -> String {
    let mut content = String::from("syntax = \"proto3\";\n\npackage acme.bench.v1;\n\n");
    for i in 0..options {
        content.push_str(&format!("option opt_{:03} = \"value {}\";\n", i, i));
    }
    if with_go_package {
        content.push_str("option go_package = \"old/acme/bench/v1\";\n");
    }
    for i in 0..50 {
        content.push_str(&format!(
            "\nmessage Message{} {{\n  option deprecated_note = \"m{}\";\n  string field_{} = 1;\n}}\n",
            i, i, i
        ));
    }
    content
}

fn bench_rewrite(c: &mut Criterion) {
    let config = RewriteConfig::compile(&RewriteSettings::default()).unwrap();
    let mut group = c.benchmark_group("rewrite");

    for options in [0usize, 10, 100] {
        let insert = generate_proto(options, false);
        group.bench_with_input(BenchmarkId::new("insert", options), &insert, |b, content| {
            b.iter(|| rewrite(black_box(content.as_bytes()), &config).unwrap())
        });

        let replace = generate_proto(options, true);
        group.bench_with_input(BenchmarkId::new("replace", options), &replace, |b, content| {
            b.iter(|| rewrite(black_box(content.as_bytes()), &config).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_rewrite);
criterion_main!(benches);
