use casewright_align::{DEFAULT_SIMILARITY_THRESHOLD, align_steps, jaccard};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn steps(n: usize, suffix: &str) -> Vec<String> {
    (0..n)
        .map(|i| format!("When I perform step number {i} on the {suffix} page"))
        .collect()
}

fn bench_jaccard(c: &mut Criterion) {
    c.bench_function("jaccard_short_steps", |b| {
        b.iter(|| {
            jaccard(
                black_box("Given I am on the login page at https://app.example.com/login"),
                black_box("Given I am on the login page"),
            )
        })
    });
}

fn bench_align(c: &mut Criterion) {
    let generated = steps(40, "settings");
    let pattern = steps(40, "profile");
    c.bench_function("align_40_steps", |b| {
        b.iter(|| {
            align_steps(
                black_box(&generated),
                black_box(&pattern),
                DEFAULT_SIMILARITY_THRESHOLD,
            )
        })
    });
}

criterion_group!(benches, bench_jaccard, bench_align);
criterion_main!(benches);
