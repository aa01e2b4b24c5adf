use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hjson::{hjson, parse, parse_with_options, to_string, ParseOptions, PrintOptions, Value};

fn config_text(members: usize) -> String {
    let mut text = String::from("# generated config\n");
    for i in 0..members {
        text.push_str(&format!("key_{i}: value number {i}\n"));
        if i % 5 == 0 {
            text.push_str(&format!("num_{i}: {i} # index\n"));
        }
    }
    text
}

fn sample_value(size: usize) -> Value {
    let items: Vec<Value> = (0..size)
        .map(|i| {
            hjson!({
                "id": i,
                "name": (format!("item {i}")),
                "active": (i % 2 == 0),
                "ratio": (i as f64 * 1.5)
            })
        })
        .collect();
    Value::Array(items)
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for size in [10, 100, 1000].iter() {
        let text = config_text(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| parse(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_parse_keep_comments(c: &mut Criterion) {
    let text = config_text(200);
    let opts = ParseOptions::new().with_keep_comments(true);

    c.bench_function("parse_keep_comments", |b| {
        b.iter(|| parse_with_options(black_box(&text), &opts))
    });
}

fn benchmark_print(c: &mut Criterion) {
    let mut group = c.benchmark_group("print");
    for size in [10, 100, 1000].iter() {
        let value = sample_value(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &value, |b, value| {
            b.iter(|| to_string(black_box(value)))
        });
    }
    group.finish();
}

fn benchmark_print_quoting(c: &mut Criterion) {
    let mut group = c.benchmark_group("print_strings");

    let plain = hjson!(["alpha", "beta gamma", "delta epsilon zeta"]);
    let tricky = hjson!(["true", "3.14", " padded ", "# not a comment", "multi\nline\ntext"]);

    group.bench_function("quoteless", |b| b.iter(|| to_string(black_box(&plain))));
    group.bench_function("quoted_and_fenced", |b| b.iter(|| to_string(black_box(&tricky))));
    group.finish();
}

fn benchmark_comment_round_trip(c: &mut Criterion) {
    let text = config_text(200);
    let parse_opts = ParseOptions::new().with_keep_comments(true);
    let print_opts = PrintOptions::new().with_keep_comments(true);
    let doc = parse_with_options(&text, &parse_opts).unwrap();

    c.bench_function("comment_round_trip", |b| {
        b.iter(|| {
            let doc = parse_with_options(black_box(&text), &parse_opts).unwrap();
            doc.to_string(&print_opts)
        })
    });

    c.bench_function("print_with_comments", |b| {
        b.iter(|| black_box(&doc).to_string(&print_opts))
    });
}

fn benchmark_comparison_with_json(c: &mut Criterion) {
    let value = sample_value(100);
    let hjson_text = to_string(&value).unwrap();
    let json_value = serde_json::to_value(&value).unwrap();
    let json_text = serde_json::to_string_pretty(&json_value).unwrap();

    let mut group = c.benchmark_group("comparison");
    group.bench_function("hjson_parse", |b| {
        b.iter(|| parse(black_box(&hjson_text)))
    });
    group.bench_function("json_parse", |b| {
        b.iter(|| serde_json::from_str::<serde_json::Value>(black_box(&json_text)))
    });
    group.finish();
}

criterion_group!(
    benches,
    benchmark_parse,
    benchmark_parse_keep_comments,
    benchmark_print,
    benchmark_print_quoting,
    benchmark_comment_round_trip,
    benchmark_comparison_with_json
);
criterion_main!(benches);
