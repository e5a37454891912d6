//! Binary-level tests for `ssmoveis generate`

mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::temp_config_file;

fn ssmoveis() -> Command {
    let mut cmd = Command::cargo_bin("ssmoveis").unwrap();
    for var in [
        "SSMOVEIS_PROVIDER",
        "SSMOVEIS_OLLAMA_HOST",
        "SSMOVEIS_GEMINI_API_BASE",
        "GEMINI_API_KEY",
        "API_KEY",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    ssmoveis()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("run"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_generate_prints_description_from_ollama() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "  Poltrona reclinável em couro legítimo.  ",
            "done": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, config_path) = temp_config_file(&format!(
        "generation:\n  provider: ollama\n  ollama:\n    host: {}\n",
        server.uri()
    ));

    ssmoveis()
        .arg("--config")
        .arg(&config_path)
        .args(["generate", "--name", "Poltrona", "--category", "Sala de Estar"])
        .args(["--keywords", "couro"])
        .assert()
        .success()
        .stdout("Poltrona reclinável em couro legítimo.\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_generate_without_key_prints_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (_dir, config_path) = temp_config_file(&format!(
        "generation:\n  provider: gemini\n  gemini:\n    api_base: {}\n",
        server.uri()
    ));

    ssmoveis()
        .arg("--config")
        .arg(&config_path)
        .args(["generate", "-n", "Mesa", "-k", "Sala de Jantar"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Erro ao conectar com a IA. Tente novamente.",
        ));
}

#[test]
fn test_generate_rejects_blank_name() {
    ssmoveis()
        .args(["--config", "/definitely/not/here.yaml"])
        .args(["generate", "--name", " ", "--category", "Quarto"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input"));
}

#[test]
fn test_unknown_provider_flag_fails_validation() {
    ssmoveis()
        .args(["--config", "/definitely/not/here.yaml", "--provider", "openai"])
        .args(["generate", "--name", "Mesa", "--category", "Sala"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid provider: openai"));
}
