use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const MINIMAL: &str = r#"apiVersion: v1
kind: Pod
metadata:
  name: web
spec:
  containers:
    - name: web_server
      image: registry.bigbrother.io/team/web:1.4.2
      resources:
        requests:
          memory: "128Mi"
"#;

fn validate_pod(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_validate-pod"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute validate-pod")
}

fn write_manifest(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write manifest");
    path.to_string_lossy().into_owned()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_valid_manifest_exits_zero_silently() {
    let dir = TempDir::new().unwrap();
    let path = write_manifest(&dir, "pod.yaml", MINIMAL);

    let output = validate_pod(&[&path]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "");
}

#[test]
fn test_wrong_kind_prints_one_line() {
    let dir = TempDir::new().unwrap();
    let path = write_manifest(&dir, "deploy.yaml", &MINIMAL.replace("kind: Pod", "kind: Deployment"));

    let output = validate_pod(&[&path]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "deploy.yaml:2 kind has unsupported value 'Deployment'\n"
    );
}

#[test]
fn test_empty_file_is_valid() {
    let dir = TempDir::new().unwrap();
    let path = write_manifest(&dir, "empty.yaml", "");

    let output = validate_pod(&[&path]);
    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
    assert!(output.stderr.is_empty());
}

#[test]
fn test_missing_fields_use_base_name_without_line() {
    let dir = TempDir::new().unwrap();
    let path = write_manifest(&dir, "bare.yaml", "apiVersion: v1\nkind: Pod\n");

    let output = validate_pod(&[&path]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "bare.yaml: metadata is required\nbare.yaml: spec is required\n"
    );
}

#[test]
fn test_wrong_argument_count_is_usage_error() {
    let output = validate_pod(&[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));

    let output = validate_pod(&["a.yaml", "b.yaml"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_unreadable_file_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.yaml");

    let output = validate_pod(&[&missing.to_string_lossy()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("cannot read file"));
}

#[test]
fn test_malformed_yaml_fails_without_diagnostics() {
    let dir = TempDir::new().unwrap();
    let path = write_manifest(&dir, "broken.yaml", "kind: Pod\nspec: [unclosed\n");

    let output = validate_pod(&[&path]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("cannot parse file"));
}

#[test]
fn test_json_format() {
    let dir = TempDir::new().unwrap();
    let path = write_manifest(
        &dir,
        "pod.yaml",
        &MINIMAL.replace("web_server", "Web"),
    );

    let output = validate_pod(&["--format", "json", &path]);
    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["file"], "pod.yaml");
    assert_eq!(value["errorCount"], 1);
    assert_eq!(value["diagnostics"][0]["path"], "spec.containers.[0].name");
    assert_eq!(value["diagnostics"][0]["line"], 7);
}

#[test]
fn test_help_exits_zero() {
    let output = validate_pod(&["--help"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(Path::new(env!("CARGO_BIN_EXE_validate-pod")).exists());
}
