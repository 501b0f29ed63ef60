#![allow(clippy::unwrap_used)]
//! Full runs of the binary against a mock chat completion endpoint.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DESCRIPTION: &str = "<<Style>>: casual\n<<Tone>>: warm\n<<Nuances>>: none\n\
<<Intent>>: greet\n<<CulturalMeaning>>: everyday\n<<Symbolism>>: none";

const EVAL_PASS: &str = "<<Accuracy>>: yes\n<<Clarity>>: yes\n<<StyleAndTone>>: no";

fn reply(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }],
        "usage": {
            "prompt_tokens": 100,
            "completion_tokens": 10,
            "total_tokens": 110,
            "prompt_tokens_details": { "cached_tokens": 50 }
        }
    }))
}

async fn mount_stage(server: &MockServer, system_marker: &str, content: &str) {
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains(system_marker))
        .respond_with(reply(content))
        .mount(server)
        .await;
}

fn write_config(dir: &TempDir, endpoint: &str) -> std::path::PathBuf {
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!(
            "[artinya]\nprovider = \"mock\"\nto = \"id\"\n\n\
             [providers.mock]\nendpoint = \"{endpoint}\"\napi_key = \"test-key\"\nmodels = [\"mock-model\"]\n"
        ),
    )
    .unwrap();
    config_path
}

/// Runs the binary off the async runtime so the mock server keeps serving.
async fn run_artinya(dir: &TempDir, args: Vec<String>) -> assert_cmd::assert::Assert {
    let cwd = dir.path().to_path_buf();
    tokio::task::spawn_blocking(move || {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("artinya").unwrap();
        cmd.current_dir(cwd)
            .env("XDG_CONFIG_HOME", "/nonexistent")
            .env_remove("RUST_LOG")
            .args(args)
            .assert()
    })
    .await
    .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_full_run_writes_csv_and_report() {
    let server = MockServer::start().await;
    mount_stage(&server, "You are a language analysis assistant", DESCRIPTION).await;
    mount_stage(&server, "You are a translation assistant", "Halo, dunia!").await;
    mount_stage(&server, "You are a translation evaluator", EVAL_PASS).await;

    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, &server.uri());
    fs::write(dir.path().join("prompts.txt"), "Hello, world!\n\nGood night\n").unwrap();

    run_artinya(
        &dir,
        vec![
            "--config".into(),
            config.display().to_string(),
            "prompts.txt".into(),
            "--report".into(),
            "run.json".into(),
        ],
    )
    .await
    .success()
    .stdout(predicate::str::contains("Description Total Tokens"))
    .stdout(predicate::str::contains("Average Translation Retry Attempts"));

    let csv = fs::read_to_string(dir.path().join("results.csv")).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("Original Text,Translated Text"));
    assert_eq!(lines.next(), Some("\"Hello, world!\",\"Halo, dunia!\""));
    assert_eq!(lines.next(), Some("Good night,\"Halo, dunia!\""));
    assert_eq!(lines.next(), None);

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("run.json")).unwrap()).unwrap();
    assert_eq!(report["model"], "mock-model");
    assert_eq!(report["target_language"], "id");
    assert_eq!(report["metrics"]["batch_size"], 2);
    assert_eq!(report["metrics"]["description"]["total_tokens"], 220);
    assert_eq!(report["metrics"]["translation"]["cached_tokens"], 100);
    assert_eq!(report["metrics"]["evaluation"]["retry_attempts"], 0);
    assert_eq!(report["descriptions"][0]["tone"], "warm");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_run_without_stages_translates_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains("Help me translate"))
        .respond_with(reply("Selamat pagi"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, &server.uri());

    run_artinya(
        &dir,
        vec![
            "--config".into(),
            config.display().to_string(),
            "--no-describe".into(),
            "--no-eval".into(),
            "-q".into(),
            "-x".into(),
            "Good morning".into(),
            "-o".into(),
            "out.csv".into(),
        ],
    )
    .await
    .success()
    .stdout(predicate::str::is_empty());

    let csv = fs::read_to_string(dir.path().join("out.csv")).unwrap();
    assert_eq!(csv, "Original Text,Translated Text\nGood morning,Selamat pagi\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_translations_leave_empty_cells() {
    let server = MockServer::start().await;
    mount_stage(&server, "You are a translation assistant", "Salah").await;
    mount_stage(
        &server,
        "You are a translation evaluator",
        "<<Accuracy>>: no\n<<Clarity>>: no\n<<StyleAndTone>>: yes",
    )
    .await;

    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, &server.uri());

    run_artinya(
        &dir,
        vec![
            "--config".into(),
            config.display().to_string(),
            "--no-describe".into(),
            "--max-retries".into(),
            "2".into(),
            "-x".into(),
            "Hello".into(),
        ],
    )
    .await
    .success()
    .stderr(predicate::str::contains("could not be translated"));

    let csv = fs::read_to_string(dir.path().join("results.csv")).unwrap();
    assert_eq!(csv, "Original Text,Translated Text\nHello,\n");
    assert_eq!(server.received_requests().await.unwrap().len(), 4);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_server_error_aborts_run() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, &server.uri());

    run_artinya(
        &dir,
        vec![
            "--config".into(),
            config.display().to_string(),
            "-x".into(),
            "Hello".into(),
        ],
    )
    .await
    .failure()
    .stderr(predicate::str::contains("500"));

    assert!(!dir.path().join("results.csv").exists());
}
