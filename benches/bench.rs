// Criterion benchmarks for Stable Match

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use stable_match::core::{deferred_acceptance, derive, Matcher, RolePartition};
use stable_match::models::{GenderIdentity, GenderPreference, ScoreMatrix};

fn create_population(n: usize) -> (ScoreMatrix, Vec<GenderIdentity>, Vec<GenderPreference>) {
    let rows = (0..n)
        .map(|i| (0..n).map(|j| ((i * 31 + j * 17) % 101) as f64 / 10.0).collect())
        .collect();
    let identities = (0..n)
        .map(|i| match i % 5 {
            0 | 1 => GenderIdentity::Male,
            2 | 3 => GenderIdentity::Female,
            _ => GenderIdentity::NonBinary,
        })
        .collect();
    let preferences = (0..n)
        .map(|i| match i % 4 {
            0 => GenderPreference::Women,
            1 => GenderPreference::Men,
            _ => GenderPreference::Bisexual,
        })
        .collect();

    (ScoreMatrix::new(rows).unwrap(), identities, preferences)
}

fn bench_derive(c: &mut Criterion) {
    let (scores, identities, preferences) = create_population(200);
    let partition = RolePartition::seeded(200, 1);

    c.bench_function("derive_preferences_200", |b| {
        b.iter(|| {
            derive(
                black_box(&scores),
                black_box(&partition),
                black_box(&identities),
                black_box(&preferences),
            )
        });
    });
}

fn bench_deferred_acceptance(c: &mut Criterion) {
    let (scores, identities, preferences) = create_population(200);
    let partition = RolePartition::seeded(200, 1);
    let lists = derive(&scores, &partition, &identities, &preferences).unwrap();

    c.bench_function("deferred_acceptance_200", |b| {
        b.iter(|| deferred_acceptance(black_box(&partition), black_box(lists.clone())));
    });
}

fn bench_matching(c: &mut Criterion) {
    let matcher = Matcher::with_seed(7);
    let mut group = c.benchmark_group("matching");

    for population in [10, 50, 100, 200, 400].iter() {
        let (scores, identities, preferences) = create_population(*population);

        group.bench_with_input(
            BenchmarkId::new("run", population),
            population,
            |b, _| {
                b.iter(|| {
                    matcher.run(
                        black_box(&scores),
                        black_box(&identities),
                        black_box(&preferences),
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_derive, bench_deferred_acceptance, bench_matching);

criterion_main!(benches);
