use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use refrange_classifier::{
    BandEntry, CacheConfig, Classifier, ClassifierConfig, Gender, Measurement, ReferenceBandTable,
};

fn checkup_table() -> ReferenceBandTable {
    let mut table = ReferenceBandTable::new();
    table.insert_entries(
        "bmi",
        vec![
            BandEntry::new("정상(A)", "18.5~24.9"),
            BandEntry::new("정상(B)", "18.5미만/25~29.9"),
            BandEntry::new("질환의심", "30이상"),
        ],
    );
    table.insert_entries(
        "waist",
        vec![
            BandEntry::new("정상", "남 90미만 / 여 85미만"),
            BandEntry::new("질환의심", "남 90이상 / 여 85이상"),
        ],
    );
    table.insert_entries(
        "bloodPressure",
        vec![
            BandEntry::new("정상", "120미만 이며/80미만"),
            BandEntry::new("경계", "120~139 또는 /80~89"),
            BandEntry::new("질환의심", "140이상 또는 /90이상"),
        ],
    );
    table
}

fn checkup_measurements() -> Vec<Measurement> {
    (0..1_000)
        .map(|i| match i % 3 {
            0 => Measurement::new("bmi", format!("{}.{}", 17 + i % 15, i % 10), Gender::Female),
            1 => Measurement::new("waist", format!("{}", 75 + i % 20), Gender::Male),
            _ => Measurement::new(
                "bloodPressure",
                format!("{}/{}", 110 + i % 40, 70 + i % 25),
                Gender::Male,
            ),
        })
        .collect()
}

fn bench_classify(c: &mut Criterion) {
    let table = checkup_table();
    let measurements = checkup_measurements();

    let uncached = Classifier::new(&table);
    c.bench_function("classify.batch.uncached", |b| {
        b.iter(|| black_box(uncached.classify_batch(black_box(&measurements))));
    });

    let config = ClassifierConfig::builder()
        .with_cache(CacheConfig::default())
        .build();
    let cached = Classifier::with_config(&table, config);
    c.bench_function("classify.batch.cached", |b| {
        b.iter(|| black_box(cached.classify_batch(black_box(&measurements))));
    });
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse.gendered", |b| {
        b.iter(|| refrange::parse(black_box("남 1.2이하, 여 1.0이하")));
    });
    c.bench_function("parse.paired", |b| {
        b.iter(|| refrange::parse_paired(black_box("140이상 또는 /90이상")));
    });
}

criterion_group!(benches, bench_classify, bench_parse);
criterion_main!(benches);
