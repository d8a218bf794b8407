use assert_cmd::Command;
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn atlas(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("atlas").expect("binary");
    cmd.current_dir(root).env_remove("RUST_LOG");
    cmd
}

fn run_json(root: &Path, args: &[&str]) -> (bool, Value) {
    let output = atlas(root)
        .arg("--json")
        .args(args)
        .output()
        .expect("command run");
    let body: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    (output.status.success(), body)
}

fn run_request(root: &Path, request: &str) -> (bool, Value) {
    let output = atlas(root)
        .arg("command")
        .arg(request)
        .output()
        .expect("command run");
    let body: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    (output.status.success(), body)
}

fn setup_repo() -> tempfile::TempDir {
    let temp = tempdir().unwrap();
    let root = temp.path();
    for (path, body) in [
        ("src/components/Button.tsx", "export const Button = () => null;\n"),
        ("src/features/billing/Invoice.tsx", "export const Invoice = () => null;\n"),
        ("src/features/auth/LoginForm.tsx", "export const LoginForm = () => null;\n"),
        ("src/hooks/useAuth.ts", "export function useAuth() {}\n"),
        ("node_modules/react/index.js", "module.exports = {};\n"),
    ] {
        let file = root.join(path);
        fs::create_dir_all(file.parent().unwrap()).unwrap();
        fs::write(file, body).unwrap();
    }
    temp
}

#[test]
fn map_is_cached_between_runs() {
    let temp = setup_repo();
    let root = temp.path();

    let (ok, first) = run_json(root, &["map"]);
    assert!(ok, "{first}");
    assert_eq!(first["status"], "ok");
    assert_eq!(first["meta"]["cache_hit"], false);
    let paths: Vec<&str> = first["data"]["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["path"].as_str().unwrap())
        .collect();
    assert_eq!(
        paths,
        vec![
            "src/components/Button.tsx",
            "src/features/auth/LoginForm.tsx",
            "src/features/billing/Invoice.tsx",
            "src/hooks/useAuth.ts",
        ]
    );
    assert!(root.join(".atlas/cache/map.json").exists());

    let (ok, second) = run_json(root, &["map"]);
    assert!(ok);
    assert_eq!(second["meta"]["cache_hit"], true);
    assert_eq!(second["data"], first["data"]);

    let (_, forced) = run_json(root, &["map", "--force"]);
    assert_eq!(forced["meta"]["cache_hit"], false);
}

#[test]
fn find_prints_resolved_path() {
    let temp = setup_repo();
    let output = atlas(temp.path()).args(["find", "Button"]).output().unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "src/components/Button.tsx"
    );
}

#[test]
fn missing_file_suggests_recovery_without_failing() {
    let temp = setup_repo();
    let output = atlas(temp.path()).args(["find", "Buton"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("File not found: Buton\n"), "{stdout}");
    assert!(stdout.contains("Did you mean: src/components/Button.tsx?"));
    assert!(stdout.contains("atlas describe src/components/Button.tsx"));
}

#[test]
fn blank_query_fails_with_message() {
    let temp = setup_repo();
    let output = atlas(temp.path()).args(["find", "   "]).output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("query must not be empty"), "{stderr}");
}

#[test]
fn area_accepts_aliases() {
    let temp = setup_repo();
    let (ok, body) = run_json(temp.path(), &["area", "facturación"]);
    assert!(ok, "{body}");
    assert_eq!(body["data"]["area"]["id"], "billing");
    assert_eq!(body["data"]["resolved_from"], "facturación");
    assert_eq!(
        body["data"]["files"][0]["path"],
        "src/features/billing/Invoice.tsx"
    );
}

#[test]
fn command_renders_tool_call_hints() {
    let temp = setup_repo();
    let (ok, body) = run_request(
        temp.path(),
        r#"{"action":"area","payload":{"area":"auht"}}"#,
    );
    assert!(ok, "{body}");
    assert_eq!(body["status"], "not_found");
    assert_eq!(body["data"]["did_you_mean"], "auth");
    for step in body["data"]["next_steps"].as_array().unwrap() {
        let invocation = step["invocation"].as_str().unwrap();
        let call: Value = serde_json::from_str(invocation).expect("tool call is JSON");
        assert!(call["action"].is_string());
    }
}

#[test]
fn command_rejects_unknown_action() {
    let temp = setup_repo();
    let (ok, body) = run_request(temp.path(), r#"{"action":"search","payload":{}}"#);
    assert!(!ok);
    assert_eq!(body["status"], "error");
    let hints = body["hints"].as_array().unwrap();
    assert!(hints
        .iter()
        .any(|hint| hint["text"].as_str().unwrap().contains("cache_status")));
}

#[test]
fn cache_clear_marks_cache_stale() {
    let temp = setup_repo();
    let root = temp.path();
    run_json(root, &["map"]);

    let (_, status) = run_json(root, &["cache", "status"]);
    assert_eq!(status["data"]["fresh"], true);

    let (ok, cleared) = run_json(root, &["cache", "clear"]);
    assert!(ok);
    assert_eq!(cleared["data"]["hooks"], serde_json::json!(["artifact-store"]));
    assert!(!root.join(".atlas/cache/map.json").exists());

    let (_, status) = run_json(root, &["cache", "status"]);
    assert_eq!(status["data"]["fresh"], false);
}

#[test]
fn touching_a_source_file_invalidates_the_map() {
    let temp = setup_repo();
    let root = temp.path();
    run_json(root, &["map"]);

    let file = fs::File::options()
        .write(true)
        .open(root.join("src/hooks/useAuth.ts"))
        .unwrap();
    file.set_modified(std::time::SystemTime::now() + std::time::Duration::from_secs(5))
        .unwrap();

    let (_, body) = run_json(root, &["map"]);
    assert_eq!(body["meta"]["cache_hit"], false);
    assert_eq!(body["meta"]["stale_reasons"], serde_json::json!(["fingerprint_changed"]));
}
