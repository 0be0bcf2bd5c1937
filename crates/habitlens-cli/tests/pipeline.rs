//! End-to-end pipeline tests over real BSON fixtures on disk.

use std::fs;
use std::path::Path;

use bson::doc;

use habitlens_cli::pipeline::{PipelineOptions, run_pipeline};

fn write_collection(dir: &Path, name: &str, documents: &[bson::Document]) {
    let mut bytes = Vec::new();
    for document in documents {
        document.to_writer(&mut bytes).expect("encode document");
    }
    fs::write(dir.join(format!("{name}.bson")), bytes).expect("write collection");
}

fn day(year: i32, month: u32, dayno: u32) -> bson::DateTime {
    use chrono::TimeZone;
    bson::DateTime::from_chrono(
        chrono::Utc
            .with_ymd_and_hms(year, month, dayno, 10, 0, 0)
            .unwrap(),
    )
}

fn seed_users(dir: &Path) {
    write_collection(
        dir,
        "users",
        &[
            doc! { "name": "ada", "streak": 4, "createdAt": day(2024, 1, 1), "__v": 0 },
            doc! { "name": "grace", "streak": 2, "createdAt": day(2024, 1, 1), "__v": 0 },
            doc! { "name": "joan", "streak": 9, "createdAt": day(2024, 1, 2), "__v": 0 },
        ],
    );
}

fn seed_challenges(dir: &Path) {
    write_collection(
        dir,
        "challenges",
        &[
            doc! { "title": "run", "type": "system", "targetDays": 30 },
            doc! { "title": "read", "type": "friend", "targetDays": 7 },
            doc! { "title": "swim", "type": "friend", "targetDays": 14 },
        ],
    );
}

fn seed_userchallenges(dir: &Path) {
    write_collection(
        dir,
        "userchallenges",
        &[
            doc! { "user": "u1", "challenge": "c1", "status": "completed" },
            doc! { "user": "u1", "challenge": "c2", "status": "in-progress" },
            doc! { "user": "u2", "challenge": "c1", "status": "completed" },
        ],
    );
}

#[test]
fn missing_collection_is_skipped_and_the_rest_complete() {
    let input = tempfile::tempdir().expect("tempdir");
    seed_users(input.path());
    seed_challenges(input.path());
    seed_userchallenges(input.path());
    // forumposts deliberately absent.
    let output = input.path().join("output");

    let result = run_pipeline(input.path(), &output, &PipelineOptions::default())
        .expect("run completes despite the missing collection");

    assert_eq!(result.skipped_count(), 1);
    let skipped: Vec<&str> = result
        .collections
        .iter()
        .filter(|summary| summary.skipped)
        .map(|summary| summary.collection.as_str())
        .collect();
    assert_eq!(skipped, ["forumposts"]);

    for name in ["users", "challenges", "userchallenges"] {
        assert!(output.join(format!("{name}.csv")).is_file(), "{name}.csv");
    }
    assert!(!output.join("forumposts.csv").exists());
    assert!(!output.join("forumposts_total.png").exists());

    // Fixed deterministic chart names per analysis.
    assert!(output.join("users_total.png").is_file());
    assert!(output.join("users_new_per_day.png").is_file());
    assert!(output.join("users_streak_hist.png").is_file());
    assert!(output.join("challenges_total.png").is_file());
    assert!(output.join("challenges_by_type.png").is_file());
    assert!(output.join("challenges_targetDays_hist.png").is_file());
    assert!(output.join("userchallenges_users_top10.png").is_file());
    assert!(output.join("userchallenges_challenges_top10.png").is_file());
    assert!(output.join("userchallenges_status.png").is_file());
}

#[test]
fn corrupt_collection_aborts_before_its_artifacts_exist() {
    let input = tempfile::tempdir().expect("tempdir");
    seed_users(input.path());
    // Truncate a valid challenges stream mid-document.
    let mut bytes = Vec::new();
    doc! { "title": "run", "type": "system" }
        .to_writer(&mut bytes)
        .expect("encode document");
    bytes.truncate(bytes.len() / 2);
    fs::write(input.path().join("challenges.bson"), bytes).expect("write corrupt stream");
    let output = input.path().join("output");

    let error = run_pipeline(input.path(), &output, &PipelineOptions::default())
        .expect_err("corrupt stream is fatal");
    assert!(error.to_string().contains("challenges"), "{error:#}");

    // users precedes challenges in the fixed order, so its artifacts exist;
    // nothing challenges-derived may.
    assert!(output.join("users.csv").is_file());
    assert!(!output.join("challenges.csv").exists());
    assert!(!output.join("challenges_total.png").exists());
}

#[test]
fn skip_charts_exports_only() {
    let input = tempfile::tempdir().expect("tempdir");
    seed_users(input.path());
    let output = input.path().join("output");

    let options = PipelineOptions {
        skip_charts: true,
        ..PipelineOptions::default()
    };
    let result = run_pipeline(input.path(), &output, &options).expect("run");

    assert!(output.join("users.csv").is_file());
    assert!(!output.join("users_total.png").exists());
    let users = result
        .collections
        .iter()
        .find(|summary| summary.collection == "users")
        .expect("users summary");
    assert_eq!(users.charts, 0);
    assert_eq!(users.rows, 3);
}

#[test]
fn reruns_overwrite_artifacts_in_place() {
    let input = tempfile::tempdir().expect("tempdir");
    seed_challenges(input.path());
    let output = input.path().join("output");

    run_pipeline(input.path(), &output, &PipelineOptions::default()).expect("first run");
    let count_before = fs::read_dir(&output).expect("read output").count();
    run_pipeline(input.path(), &output, &PipelineOptions::default()).expect("second run");
    let count_after = fs::read_dir(&output).expect("read output").count();
    assert_eq!(count_before, count_after);
}
