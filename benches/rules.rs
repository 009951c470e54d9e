use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use pushgate::git::parser::{parse_commit_ids, parse_path_list};
use pushgate::rules::debugger::is_exempt_line;
use pushgate::rules::newline::normalize_trailing_newline;
use pushgate::rules::whitespace::strip_trailing_whitespace;

fn generate_source(num_lines: usize, dirty: bool) -> String {
    let mut output = String::new();
    for i in 0..num_lines {
        let trailing = if dirty && i % 3 == 0 { "  \t" } else { "" };
        output.push_str(&format!("    const value_{} = compute({});{}\n", i, i, trailing));
    }
    output
}

fn generate_rev_list(num_commits: usize) -> String {
    (0..num_commits)
        .map(|i| format!("{:040x}\n", i))
        .collect()
}

fn bench_strip_whitespace(c: &mut Criterion) {
    let mut group = c.benchmark_group("strip_trailing_whitespace");

    for lines in [100, 1_000, 10_000] {
        let clean = generate_source(lines, false);
        let dirty = generate_source(lines, true);

        group.bench_with_input(BenchmarkId::new("clean", lines), &clean, |b, input| {
            b.iter(|| strip_trailing_whitespace(black_box(input)))
        });
        group.bench_with_input(BenchmarkId::new("dirty", lines), &dirty, |b, input| {
            b.iter(|| strip_trailing_whitespace(black_box(input)))
        });
    }

    group.finish();
}

fn bench_normalize_newline(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_trailing_newline");

    let base = generate_source(1_000, false);
    for trailing in [0, 1, 50] {
        let input = format!("{}{}", base.trim_end_matches('\n'), "\n".repeat(trailing));
        group.bench_with_input(BenchmarkId::new("newlines", trailing), &input, |b, input| {
            b.iter(|| normalize_trailing_newline(black_box(input)))
        });
    }

    group.finish();
}

fn bench_exempt_scan(c: &mut Criterion) {
    let source = generate_source(10_000, false);

    c.bench_function("is_exempt_line/10000 lines", |b| {
        b.iter(|| source.lines().filter(|line| is_exempt_line(black_box(line))).count())
    });
}

fn bench_parsers(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsers");

    let rev_list = generate_rev_list(500);
    group.bench_function("parse_commit_ids/500", |b| {
        b.iter(|| parse_commit_ids(black_box(&rev_list)))
    });

    let paths: String = (0..1_000).map(|i| format!("src/module_{}/file.js\n", i)).collect();
    group.bench_function("parse_path_list/1000", |b| {
        b.iter(|| parse_path_list(black_box(&paths)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_strip_whitespace,
    bench_normalize_newline,
    bench_exempt_scan,
    bench_parsers
);
criterion_main!(benches);
