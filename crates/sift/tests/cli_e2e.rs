#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const NOW: &str = "2024-06-01T00:00:00Z";

fn sift_cmd(data: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("sift"));
    cmd.env("SIFT_DATA", data.path().as_os_str())
        .env_remove("SIFT_LOG")
        .env("NO_COLOR", "1")
        .env("XDG_CONFIG_HOME", data.path().join("config").as_os_str())
        .env("HOME", data.path().as_os_str());
    cmd
}

fn data_dir() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("categories.json"),
        r#"{"categories": ["food", "housing", "transport"]}"#,
    )
    .unwrap();
    fs::write(
        temp.path().join("campaigns.json"),
        r#"{"campaigns": [
            {"id": 1, "title": "Cheaper meals", "category": "food", "created_at": "2024-05-01T10:00:00", "deadline": "2024-01-01", "signature_count": 12, "has_signed": true},
            {"id": 2, "title": "Longer library hours", "category": "housing", "created_at": "2024-05-20", "signature_count": "40"},
            {"id": 3, "title": "Night buses", "category": "transport", "created_at": "2024-05-25", "deadline": "2024-12-01", "signature_count": 7},
            {"id": 4, "title": "Vegan options", "category": "food", "created_at": "2024-04-01", "deadline": "2024-09-01"},
            {"id": 5, "title": "Untagged idea", "created_at": "2024-03-01"}
        ]}"#,
    )
    .unwrap();
    fs::write(
        temp.path().join("polls.json"),
        r#"[
            {"id": "p1", "title": "Best cafeteria dish", "category": "food", "deadline": "2024-06-10", "total_votes": 30, "has_voted": true},
            {"id": "p2", "title": "New gym hours", "category": "housing", "deadline": null, "total_votes": 5},
            {"id": "p3", "title": "Bus route vote", "category": "transport", "deadline": "2024-02-01", "total_votes": 50}
        ]"#,
    )
    .unwrap();
    fs::write(temp.path().join("posts.json"), r#"{"posts": []}"#).unwrap();
    temp
}

#[test]
fn test_list_first_page() {
    let data = data_dir();
    sift_cmd(&data)
        .args(["list", "campaigns", "--now", NOW])
        .assert()
        .success()
        .stdout(predicate::str::contains("campaigns · all categories · newest"))
        .stdout(predicate::str::contains("1. Night buses"))
        .stdout(predicate::str::contains("2. Longer library hours"))
        .stdout(predicate::str::contains("3. Cheaper meals"))
        .stdout(predicate::str::contains("showing 1-3 of 5 · page 1 of 2"));
}

#[test]
fn test_page_out_of_range_is_clamped() {
    let data = data_dir();
    sift_cmd(&data)
        .args(["list", "campaigns", "--now", NOW, "--page", "9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5. Untagged idea"))
        .stdout(predicate::str::contains("page 2 of 2"));
}

#[test]
fn test_filters_combine() {
    let data = data_dir();
    sift_cmd(&data)
        .args([
            "list", "campaigns", "--now", NOW, "-c", "food", "--hide", "closed",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Vegan options"))
        .stdout(predicate::str::contains("Cheaper meals").not())
        .stdout(predicate::str::contains("Untagged idea").not())
        .stdout(predicate::str::contains("campaigns · food · newest"));
}

#[test]
fn test_search_and_sort() {
    let data = data_dir();
    sift_cmd(&data)
        .args([
            "list",
            "campaigns",
            "--now",
            NOW,
            "--sort",
            "signatures",
            "--search",
            "  LIBRARY ",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Longer library hours"))
        .stdout(predicate::str::contains("40 sig"))
        .stdout(predicate::str::contains("most signatures"));
}

#[test]
fn test_polls_missing_deadline_sorts_first() {
    let data = data_dir();
    let output = sift_cmd(&data)
        .args(["list", "polls", "--now", NOW, "--sort", "deadline", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<&str> = value["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["p2", "p3", "p1"]);
    assert_eq!(value["total_pages"], 1);
    assert_eq!(value["category_counts"]["food"], 1);
}

#[test]
fn test_missing_deadline_policy_from_env() {
    let data = data_dir();
    let output = sift_cmd(&data)
        .env("SIFT_MISSING_DEADLINE", "last")
        .args(["list", "polls", "--now", NOW, "--sort", "deadline", "--json"])
        .output()
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["items"][2]["id"], "p2");
}

#[test]
fn test_page_size_from_config_file() {
    let data = data_dir();
    let config = data.path().join("custom.toml");
    fs::write(&config, "campaigns_page_size = 2\n").unwrap();
    sift_cmd(&data)
        .args(["list", "campaigns", "--now", NOW, "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("showing 1-2 of 5 · page 1 of 3"));
}

#[test]
fn test_hide_voted_on_polls() {
    let data = data_dir();
    sift_cmd(&data)
        .args(["list", "polls", "--now", NOW, "--hide", "not_voted"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Best cafeteria dish"))
        .stdout(predicate::str::contains("voted"))
        .stdout(predicate::str::contains("New gym hours").not());
}

#[test]
fn test_unknown_toggle_fails() {
    let data = data_dir();
    sift_cmd(&data)
        .args(["list", "posts", "--hide", "closed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: posts have no toggles"));
}

#[test]
fn test_empty_posts() {
    let data = data_dir();
    sift_cmd(&data)
        .args(["list", "posts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No posts yet."));
}

#[test]
fn test_categories_menu() {
    let data = data_dir();
    sift_cmd(&data)
        .args(["categories", "campaigns"])
        .assert()
        .success()
        .stdout(predicate::str::contains("categories: all categories"))
        .stdout(predicate::str::contains("[x] food"))
        .stdout(predicate::str::contains("[x] transport"));
}

#[test]
fn test_recent_ignores_filters_and_keeps_fetch_order() {
    let data = data_dir();
    sift_cmd(&data)
        .args(["recent", "campaigns", "-n", "2", "--now", NOW])
        .assert()
        .success()
        .stdout(predicate::str::contains("• Cheaper meals"))
        .stdout(predicate::str::contains("• Longer library hours"))
        .stdout(predicate::str::contains("Night buses").not());
}

#[test]
fn test_sorts() {
    let data = data_dir();
    sift_cmd(&data)
        .args(["sorts", "campaigns"])
        .assert()
        .success()
        .stdout(predicate::str::contains("signature_count"))
        .stdout(predicate::str::contains("signed / unsigned"));
}

#[test]
fn test_missing_data_is_retryable_error() {
    let data = TempDir::new().unwrap();
    sift_cmd(&data)
        .args(["list", "campaigns"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Failed to fetch campaigns"))
        .stderr(predicate::str::contains("run the command again"));
}

#[test]
fn test_malformed_data_is_retryable_error() {
    let data = data_dir();
    fs::write(data.path().join("campaigns.json"), "{oops").unwrap();
    sift_cmd(&data)
        .args(["list", "campaigns"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to fetch campaigns"));
}
