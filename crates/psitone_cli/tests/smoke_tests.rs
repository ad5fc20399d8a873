//! CLI smoke tests — verify basic binary behavior.

use std::process::Command;

fn cli_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_psitone"))
}

#[test]
fn test_help_flag() {
    let output = cli_bin().arg("--help").output().expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"), "Expected usage info in --help output");
    assert!(stdout.contains("serve"));
    assert!(stdout.contains("chat"));
}

#[test]
fn test_version_flag() {
    let output = cli_bin().arg("--version").output().expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("psitone"), "Expected name in --version output");
}

#[test]
fn test_missing_api_key_fails_startup() {
    let output = cli_bin()
        .arg("--config")
        .arg("/tmp/nonexistent_psitone_config_12345.toml")
        .arg("serve")
        .env("LLM_PROVIDER", "gemini")
        .env("GEMINI_API_KEY", "")
        .env("PSITONE_PORT", "0")
        .output()
        .expect("failed to run");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("GEMINI_API_KEY"),
        "Expected the missing credential to be named, got: {}",
        stderr
    );
}

#[test]
fn test_chat_rejects_out_of_range_parameter() {
    let output = cli_bin()
        .arg("--config")
        .arg("/tmp/nonexistent_psitone_config_12345.toml")
        .args(["chat", "--valence", "8"])
        .env("LLM_PROVIDER", "mock")
        .output()
        .expect("failed to run");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("valence_level"), "got: {}", stderr);
}
