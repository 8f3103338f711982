//! Frequency table and detector benchmark
//!
//! Table construction happens once per detector; lookups and classification
//! happen for every gram of every input text.
//!
//! # Run Instructions
//!
//! ```bash
//! cargo bench --bench frequency_table
//! ```

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use langgram::{
    Classifier, DetectorConfig, FrequencyTable, LanguageProfile, Locale, NaiveBayesDetector,
    NgramExtractor, ProfileBuilder,
};

const CORPORA: [(&str, &str); 3] = [
    (
        "en",
        "the quick brown fox jumps over the lazy dog while the cat sleeps in the warm sun",
    ),
    (
        "de",
        "der schnelle braune fuchs springt über den faulen hund während die katze schläft",
    ),
    (
        "it",
        "la volpe marrone veloce salta sopra il cane pigro mentre il gatto dorme al sole",
    ),
];

fn profiles() -> Vec<LanguageProfile> {
    CORPORA
        .iter()
        .map(|(tag, text)| {
            let mut builder = ProfileBuilder::new(Locale::parse(tag).unwrap());
            builder.add_text(&text.repeat(20));
            builder.build()
        })
        .collect()
}

fn bench_table_build(c: &mut Criterion) {
    let profiles = profiles();
    c.bench_function("frequency_table_build", |b| {
        b.iter(|| FrequencyTable::new(black_box(&profiles), [1, 2, 3]))
    });
}

fn bench_table_lookup(c: &mut Criterion) {
    let table = FrequencyTable::new(&profiles(), [1, 2, 3]);
    let grams = NgramExtractor::standard().extract_grams("the cat and the dog in the sun");
    c.bench_function("frequency_table_lookup", |b| {
        b.iter(|| {
            grams
                .iter()
                .filter_map(|g| table.probabilities(black_box(g)))
                .count()
        })
    });
}

fn bench_classify(c: &mut Criterion) {
    let detector = NaiveBayesDetector::new(
        &profiles(),
        NgramExtractor::standard(),
        DetectorConfig::default(),
    )
    .unwrap();
    c.bench_function("naive_bayes_classify", |b| {
        b.iter(|| detector.classify(black_box("die katze und der hund schlafen in der sonne")))
    });
}

criterion_group!(benches, bench_table_build, bench_table_lookup, bench_classify);
criterion_main!(benches);
