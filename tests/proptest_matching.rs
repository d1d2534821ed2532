//! Property-based tests for normalization, scoring and the matcher.
//!
//! Ensures the matching pipeline handles arbitrary input without panicking,
//! and that its ordering and additivity invariants hold across random inputs.

use medmatch::matching::{normalize, SimilarityAlgorithm, SimilarityScorer};
use medmatch::{Catalog, MedicineMatcher, MedicineRecord, RawMedicineRow};
use proptest::prelude::*;

fn raw_row(brand: String, generic: String, indications: Vec<String>, price: f64) -> RawMedicineRow {
    RawMedicineRow {
        brand_name: Some(brand),
        generic_name: Some(generic),
        indications: Some(indications),
        average_brand_price: Some(price * 3.0),
        average_generic_price: Some(price),
        ..Default::default()
    }
}

fn row_strategy() -> impl Strategy<Value = RawMedicineRow> {
    (
        "[A-Z][a-z]{2,9}",
        "[a-z]{4,12}",
        prop::collection::vec(prop::sample::select(vec!["pain", "fever", "asthma", "diabetes"]), 0..3),
        prop::sample::select(vec![0.0, 1.5, 4.0, 9.25, 12.0]),
    )
        .prop_map(|(brand, generic, indications, price)| {
            raw_row(
                brand,
                generic,
                indications.into_iter().map(String::from).collect(),
                price,
            )
        })
}

fn matcher_strategy() -> impl Strategy<Value = MedicineMatcher> {
    prop::collection::vec(row_strategy(), 1..30).prop_map(|rows| {
        MedicineMatcher::new(Catalog::build(rows).expect("generated rows are valid"))
    })
}

fn generic_sort_key(record: &MedicineRecord) -> f64 {
    if record.average_generic_price > 0.0 {
        record.average_generic_price
    } else {
        f64::INFINITY
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn normalize_is_idempotent(s in "\\PC{0,80}") {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once.clone());
        prop_assert!(once.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn substring_always_scores_one(
        prefix in "[a-z]{0,6}",
        query in "[a-z0-9]{1,8}",
        suffix in "[a-z]{0,6}",
    ) {
        let target = format!("{prefix}{query}{suffix}");
        for algorithm in SimilarityAlgorithm::all() {
            prop_assert_eq!(algorithm.score(&query, &target), 1.0);
        }
    }

    #[test]
    fn score_is_bounded(query in "\\PC{0,30}", target in "\\PC{0,30}") {
        let (query, target) = (normalize(&query), normalize(&target));
        for algorithm in SimilarityAlgorithm::all() {
            let score = algorithm.score(&query, &target);
            prop_assert!((0.0..=1.0).contains(&score), "{} gave {}", algorithm, score);
            if query.is_empty() || target.is_empty() {
                prop_assert_eq!(score, 0.0);
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn search_is_deterministic_and_bounded(
        matcher in matcher_strategy(),
        query in "[a-z]{1,8}",
        limit in 0usize..15,
    ) {
        let first = matcher.search_scored(&query, limit);
        let second = matcher.search_scored(&query, limit);
        prop_assert_eq!(&first, &second);
        prop_assert!(first.len() <= limit);
        prop_assert!(first.iter().all(|hit| hit.score > 0.0 && hit.score <= 1.0));
        prop_assert!(first.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn extend_is_additive(
        matcher in matcher_strategy(),
        rows in prop::collection::vec(row_strategy(), 0..10),
    ) {
        let before = matcher.all_records();
        let added = matcher.extend(rows.clone());

        let after = matcher.all_records();
        prop_assert_eq!(added, rows.len());
        prop_assert_eq!(after.len(), before.len() + rows.len());
        prop_assert_eq!(&after[..before.len()], before.as_slice());
    }

    #[test]
    fn alternatives_invariants(matcher in matcher_strategy(), index in any::<prop::sample::Index>()) {
        let records = matcher.all_records();
        let base = &records[index.index(records.len())];
        let alternatives = matcher.get_alternatives(base, 50);

        for alternative in &alternatives {
            prop_assert_ne!(&alternative.generic_name, &base.generic_name);
            prop_assert!(alternative.shares_indication_with(base));
        }
        prop_assert!(alternatives
            .windows(2)
            .all(|w| generic_sort_key(&w[0]) <= generic_sort_key(&w[1])));
        if base.indications.is_empty() {
            prop_assert!(alternatives.is_empty());
        }
    }

    #[test]
    fn exact_lookup_finds_every_brand(matcher in matcher_strategy(), index in any::<prop::sample::Index>()) {
        let records = matcher.all_records();
        let record = &records[index.index(records.len())];
        let found = matcher.find_exact(&record.brand_name.to_uppercase());
        prop_assert!(found.is_some());
        prop_assert_eq!(normalize(&found.expect("checked").brand_name), normalize(&record.brand_name));
    }
}
