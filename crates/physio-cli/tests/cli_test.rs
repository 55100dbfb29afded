//! Runs the `physio` binary for the commands that need no network.

use std::io::Write;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn physio(config_home: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_physio"));
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("PHYSIO_LLM_BASE_URL")
        .env_remove("PHYSIO_LLM_MODEL")
        .env_remove("PHYSIO_LLM_API_KEY")
        .env_remove("PHYSIO_PROFILES")
        .env("RUST_LOG", "warn");
    cmd
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn prompt_prints_personalized_prompt() {
    let home = TempDir::new().unwrap();
    let profiles = home.path().join("profiles.toml");
    std::fs::write(
        &profiles,
        "[[profiles]]\nuser_id = \"u1\"\nfitness_goal = \"Build core strength\"\n",
    )
    .unwrap();

    let output = physio(&home)
        .args(["--profiles", profiles.to_str().unwrap()])
        .args(["prompt", "--duration", "20", "--area", "Abs", "--area", "Back"])
        .args(["--focus", "Core", "--user-id", "u1"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");

    let text = stdout(&output);
    assert!(text.starts_with("Create a 20-minute exercise plan focusing on Abs, Back with Core focus. "));
    assert!(text.contains("User's fitness goal: Build core strength. "));
    assert!(!text.contains("Injury history"));
}

#[test]
fn parse_reads_stdin() {
    let home = TempDir::new().unwrap();
    let mut child = physio(&home)
        .args(["parse", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(br#"Sure! [{"name":"Glute Bridge","reps":"12-15"}]"#)
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let exercises: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(exercises[0]["name"], "Glute Bridge");
    assert_eq!(exercises[0]["reps"], 12);
    assert_eq!(exercises[0]["repRange"], "12-15");
}

#[test]
fn parse_falls_back_unless_raw() {
    let home = TempDir::new().unwrap();
    let reply = home.path().join("reply.txt");
    std::fs::write(&reply, "I cannot help with that.").unwrap();

    let output = physio(&home)
        .args(["parse", reply.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(output.status.success());
    let exercises: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(exercises.as_array().unwrap().len(), 2);
    assert!(String::from_utf8_lossy(&output.stderr).contains("warning"));

    let output = physio(&home)
        .args(["parse", "--raw", reply.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(output.status.success());
    let exercises: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert!(exercises.as_array().unwrap().is_empty());
}

#[test]
fn init_writes_config_and_refuses_overwrite() {
    let home = TempDir::new().unwrap();

    let output = physio(&home)
        .args(["--model", "local-model", "init"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");
    let written = std::fs::read_to_string(home.path().join("physio/config.toml")).unwrap();
    assert!(written.contains("model = \"local-model\""));

    let output = physio(&home).arg("init").output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--force"));

    let output = physio(&home).args(["init", "--force"]).output().unwrap();
    assert!(output.status.success());
}

#[test]
fn missing_area_is_a_usage_error() {
    let home = TempDir::new().unwrap();
    let output = physio(&home).args(["prompt", "--duration", "30"]).output().unwrap();
    assert!(!output.status.success());
}
