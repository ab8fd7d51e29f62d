use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use mentorly_core::entitlements::format_price;
use mentorly_core::parser::parse_quiz_str;

fn bench_parse_quiz(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_quiz");

    let small = r#"
[quiz]
id = "small"
title = "Small"

[[questions]]
id = "q1"
type = "true-false"
prompt = "True or False: Rust has a garbage collector."
options = ["True", "False"]
correct_answer = 1
"#;

    let large = {
        let mut s = String::from("[quiz]\nid = \"large\"\ntitle = \"Large\"\n");
        for i in 0..100 {
            s.push_str(&format!(
                "\n[[questions]]\nid = \"q{i}\"\ntype = \"multiple-choice\"\nprompt = \"Question {i}\"\noptions = [\"a\", \"b\", \"c\"]\ncorrect_answer = {}\ndifficulty = \"hard\"\n",
                i % 3
            ));
        }
        s
    };

    let path = Path::new("bench.toml");

    group.bench_function("small", |b| {
        b.iter(|| parse_quiz_str(black_box(small), path))
    });
    group.bench_function("n=100", |b| {
        b.iter(|| parse_quiz_str(black_box(&large), path))
    });

    group.finish();
}

fn bench_format_price(c: &mut Criterion) {
    let mut group = c.benchmark_group("format_price");

    group.bench_function("usd", |b| {
        b.iter(|| format_price(black_box(1_234_567.89), black_box("USD")))
    });
    group.bench_function("unknown_symbol", |b| {
        b.iter(|| format_price(black_box(29.0), black_box("CHF")))
    });

    group.finish();
}

criterion_group!(benches, bench_parse_quiz, bench_format_price);
criterion_main!(benches);
