//! Tests for the CLI command handlers.
//!
//! Handlers write their output to a temporary file so the JSON payloads and
//! exit codes can be checked without spawning the binary.

use medmatch::cli::{
    self, run_alternatives, run_refresh, run_savings, run_search, run_show, run_stats,
    SavingsArgs, SearchArgs,
};
use medmatch::config::OutputFormat;
use medmatch::{AppConfig, MedicineMatcher, MergePolicy};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

/// A JSON-output config over the small fixture catalog, writing to `out.json`.
fn setup(policy: MergePolicy) -> (TempDir, PathBuf, AppConfig, MedicineMatcher) {
    let tmp = TempDir::new().expect("tempdir");
    let out = tmp.path().join("out.json");
    let config = AppConfig::builder()
        .catalog_path(Some(fixture_path("small_catalog.json")))
        .merge_policy(policy)
        .locality_multiplier("clinic-7", 0.5)
        .output_format(OutputFormat::Json)
        .output_file(Some(out.clone()))
        .no_color(true)
        .build();
    let matcher = config.build_matcher().expect("fixture catalog");
    (tmp, out, config, matcher)
}

fn read_json(path: &Path) -> Value {
    let content = std::fs::read_to_string(path).expect("output written");
    serde_json::from_str(&content).expect("valid JSON output")
}

fn search_args(query: &str, limit: Option<i64>) -> SearchArgs {
    SearchArgs {
        query: query.to_string(),
        limit,
        ..Default::default()
    }
}

mod search_command {
    use super::*;

    #[test]
    fn test_search_json() {
        let (_tmp, out, config, matcher) = setup(MergePolicy::Append);
        let code = run_search(&matcher, &config, &search_args("tylen", Some(3))).unwrap();

        assert_eq!(code, cli::EXIT_SUCCESS);
        let json = read_json(&out);
        assert_eq!(json["query"], "tylen");
        assert_eq!(json["results"][0]["brand_name"], "Tylenol");
        assert_eq!(json["results"][0]["savings"], 8.5);
        assert!(json["results"][0].get("score").is_none());
        assert!(json["count"].as_u64().unwrap() <= 3);
    }

    #[test]
    fn test_search_explain_and_locality() {
        let (_tmp, out, config, matcher) = setup(MergePolicy::Append);
        let args = SearchArgs {
            query: "acetaminophen".to_string(),
            limit: Some(1),
            locality: Some("CLINIC-7".to_string()),
            explain: true,
        };
        assert_eq!(run_search(&matcher, &config, &args).unwrap(), cli::EXIT_SUCCESS);

        let hit = &read_json(&out)["results"][0];
        assert_eq!(hit["brand_name"], "Tylenol");
        assert_eq!(hit["score"], 1.0);
        assert_eq!(hit["matched_field"], "generic");
        assert_eq!(hit["locality"]["locality"], "clinic-7");
        assert_eq!(hit["average_brand_price"], 6.25);
        assert_eq!(hit["average_generic_price"], 2.0);
    }

    #[test]
    fn test_short_query_is_invalid_input() {
        let (_tmp, out, config, matcher) = setup(MergePolicy::Append);
        let code = run_search(&matcher, &config, &search_args(" t ", None)).unwrap();

        assert_eq!(code, cli::EXIT_INVALID_INPUT);
        assert_eq!(
            read_json(&out)["error"],
            "Please provide at least two characters to search."
        );
    }

    #[test]
    fn test_negative_limit_returns_nothing() {
        let (_tmp, out, config, matcher) = setup(MergePolicy::Append);
        let code = run_search(&matcher, &config, &search_args("tylenol", Some(-5))).unwrap();

        assert_eq!(code, cli::EXIT_NOT_FOUND);
        assert_eq!(read_json(&out)["count"], 0);
    }
}

mod lookup_commands {
    use super::*;

    #[test]
    fn test_show_found_and_missing() {
        let (_tmp, out, config, matcher) = setup(MergePolicy::Append);

        assert_eq!(
            run_show(&matcher, &config, "atorvastatin", None).unwrap(),
            cli::EXIT_SUCCESS
        );
        let json = read_json(&out);
        assert_eq!(json["brand_name"], "Lipitor");
        assert_eq!(json["savings"], 308.7);

        assert_eq!(
            run_show(&matcher, &config, "Unobtainium", None).unwrap(),
            cli::EXIT_NOT_FOUND
        );
        assert_eq!(
            read_json(&out)["error"],
            "No medicine found for 'Unobtainium'."
        );
    }

    #[test]
    fn test_alternatives_json() {
        let (_tmp, out, config, matcher) = setup(MergePolicy::Append);
        let code = run_alternatives(&matcher, &config, "Lipitor", Some(2)).unwrap();

        assert_eq!(code, cli::EXIT_SUCCESS);
        let json = read_json(&out);
        assert_eq!(json["base"]["brand_name"], "Lipitor");
        assert_eq!(json["count"], 2);
        assert_eq!(json["alternatives"][0]["brand_name"], "Zocor");
        assert_eq!(json["alternatives"][1]["brand_name"], "Crestor");
    }

    #[test]
    fn test_alternatives_empty_is_success() {
        let (_tmp, out, config, matcher) = setup(MergePolicy::Append);
        let code = run_alternatives(&matcher, &config, "Synthroid", None).unwrap();

        assert_eq!(code, cli::EXIT_SUCCESS);
        assert_eq!(read_json(&out)["count"], 0);
    }
}

mod catalog_commands {
    use super::*;

    #[test]
    fn test_stats_json() {
        let (_tmp, out, config, matcher) = setup(MergePolicy::Append);
        assert_eq!(run_stats(&matcher, &config).unwrap(), cli::EXIT_SUCCESS);

        let json = read_json(&out);
        assert_eq!(json["total_count"], 9);
        assert_eq!(json["average_savings"], 103.56);
    }

    #[test]
    fn test_refresh_reports_counts() {
        let (_tmp, out, config, matcher) = setup(MergePolicy::SkipDuplicates);
        let code = run_refresh(
            &matcher,
            &config,
            &fixture_path("regulatory_refresh.json"),
            None,
        )
        .unwrap();

        assert_eq!(code, cli::EXIT_SUCCESS);
        let json = read_json(&out);
        assert_eq!(json["added"], 2);
        assert_eq!(json["rejected"], 1);
        assert_eq!(json["skipped_duplicates"], 1);
        assert_eq!(json["total_records"], 11);
    }

    #[test]
    fn test_refresh_bad_feed_is_invalid_input() {
        let (_tmp, out, config, matcher) = setup(MergePolicy::Append);
        let code =
            run_refresh(&matcher, &config, &fixture_path("not_an_array.json"), None).unwrap();

        assert_eq!(code, cli::EXIT_INVALID_INPUT);
        assert!(read_json(&out)["error"].is_string());
        assert_eq!(matcher.len(), 9);
    }
}

mod savings_command {
    use super::*;

    #[test]
    fn test_savings_from_prices() {
        let (_tmp, out, config, matcher) = setup(MergePolicy::Append);
        let args = SavingsArgs {
            brand_price: Some(100.0),
            generic_price: Some(20.0),
            per_year: Some(12),
            name: None,
        };
        assert_eq!(run_savings(&matcher, &config, &args).unwrap(), cli::EXIT_SUCCESS);

        let json = read_json(&out);
        assert_eq!(json["annual_savings"], 960.0);
        assert_eq!(json["percentage_saved"], 80.0);
    }

    #[test]
    fn test_savings_from_catalog_record() {
        let (_tmp, out, config, matcher) = setup(MergePolicy::Append);
        let args = SavingsArgs {
            name: Some("tylenol".to_string()),
            per_year: Some(2),
            ..Default::default()
        };
        assert_eq!(run_savings(&matcher, &config, &args).unwrap(), cli::EXIT_SUCCESS);

        let json = read_json(&out);
        assert_eq!(json["medicine_name"], "Tylenol");
        assert_eq!(json["annual_savings"], 17.0);
    }

    #[test]
    fn test_savings_rejects_zero_price() {
        let (_tmp, out, config, matcher) = setup(MergePolicy::Append);
        let args = SavingsArgs {
            brand_price: Some(5.0),
            generic_price: Some(0.0),
            ..Default::default()
        };
        assert_eq!(
            run_savings(&matcher, &config, &args).unwrap(),
            cli::EXIT_INVALID_INPUT
        );
        assert!(read_json(&out)["error"].is_string());
    }

    #[test]
    fn test_savings_needs_prices_or_name() {
        let (_tmp, _out, config, matcher) = setup(MergePolicy::Append);
        let args = SavingsArgs {
            brand_price: Some(5.0),
            ..Default::default()
        };
        assert_eq!(
            run_savings(&matcher, &config, &args).unwrap(),
            cli::EXIT_INVALID_INPUT
        );
    }
}
