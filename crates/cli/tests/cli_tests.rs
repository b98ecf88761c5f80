//! CLI integration tests
use mockito::{Mock, Server, ServerGuard};
use predicates::prelude::*;
use tempfile::TempDir;

const SUMMARY: &str = "정부가 내년 예산안을 발표했다. 지역 균형 발전이 최우선 과제로 제시됐다. \
전문가들은 긍정적인 평가를 내놨다.";

fn cmd() -> assert_cmd::Command {
    assert_cmd::cargo::cargo_bin_cmd!("gist")
}

/// Article page plus a healthy inference endpoint on one mock server.
fn serve_all(server: &mut ServerGuard) -> Vec<Mock> {
    vec![
        server
            .mock("GET", "/news/1")
            .with_status(200)
            .with_header("content-type", "text/html; charset=utf-8")
            .with_body(format!(r#"<html><body><div id="articleWrap">{}</div></body></html>"#, "본문 ".repeat(150)))
            .create(),
        server.mock("GET", "/health").with_status(200).create(),
        server
            .mock("POST", "/generate")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::json!({ "generated_text": SUMMARY }).to_string())
            .create(),
    ]
}

fn run_args(server: &ServerGuard) -> Vec<String> {
    vec![format!("{}/news/1", server.url()), "--generator-url".to_string(), server.url()]
}

#[test]
fn test_cli_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--lines"))
        .stdout(predicate::str::contains("--generator-url"))
        .stdout(predicate::str::contains("--completions"));
}

#[test]
fn test_cli_requires_url() {
    cmd().assert().failure().stderr(predicate::str::contains("URL"));
}

#[test]
fn test_cli_completions() {
    cmd()
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gist"));
}

#[test]
fn test_cli_invalid_format() {
    cmd()
        .args(["https://example.com/a", "--format", "markdown"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid format"));
}

#[test]
fn test_cli_text_output() {
    let mut server = Server::new();
    let _mocks = serve_all(&mut server);

    cmd()
        .args(run_args(&server))
        .assert()
        .success()
        .stdout(predicate::str::contains("id: "))
        .stdout(predicate::str::contains("[chars100]"))
        .stdout(predicate::str::contains("[chars300]"))
        .stdout(predicate::str::contains("정부가 내년 예산안을 발표했다."));
}

#[test]
fn test_cli_json_output() {
    let mut server = Server::new();
    let _mocks = serve_all(&mut server);

    let output = cmd().args(run_args(&server)).args(["--format", "json"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["id"].as_str().unwrap().len(), 12);
    assert_eq!(json["chars100"], SUMMARY);
    assert!(json.get("lines3").is_none());
}

#[test]
fn test_cli_lines_mode() {
    let mut server = Server::new();
    let _mocks = serve_all(&mut server);

    let output = cmd().args(run_args(&server)).args(["--lines", "-f", "json"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["lines3"].as_str().unwrap().lines().count(), 3);
    assert_eq!(json["lines8"].as_str().unwrap().lines().count(), 3);
}

#[test]
fn test_cli_output_file() {
    let mut server = Server::new();
    let _mocks = serve_all(&mut server);
    let temp_dir = TempDir::new().unwrap();
    let output_file = temp_dir.path().join("summary.json");

    cmd()
        .args(run_args(&server))
        .args(["-f", "json", "-o", output_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = std::fs::read_to_string(&output_file).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert!(json.get("chars200").is_some());
}

#[test]
fn test_cli_verbose_progress() {
    let mut server = Server::new();
    let _mocks = serve_all(&mut server);

    cmd()
        .args(run_args(&server))
        .arg("-v")
        .assert()
        .success()
        .stderr(predicate::str::contains("[1/3]"))
        .stderr(predicate::str::contains("Model:"));
}

#[test]
fn test_cli_http_404() {
    let mut server = Server::new();
    let _gone = server.mock("GET", "/gone").with_status(404).create();

    cmd()
        .args([format!("{}/gone", server.url()), "--generator-url".to_string(), server.url()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("404"));
}

#[test]
fn test_cli_generator_unavailable() {
    let mut server = Server::new();
    let _page = server
        .mock("GET", "/news/1")
        .with_status(200)
        .with_body(format!(r#"<div id="articleWrap">{}</div>"#, "본문 ".repeat(150)))
        .create();
    let _health = server.mock("GET", "/health").with_status(503).create();

    cmd()
        .args(run_args(&server))
        .args(["--model", "test/model"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("test/model"));
}

#[test]
fn test_cli_invalid_url() {
    cmd()
        .args(["ftp://example.com/a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid URL"));
}
