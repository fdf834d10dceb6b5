#![cfg(unix)]

use assert_cmd::Command;
use memory_fabric_autowire::config::HUB_PATH_ENV;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

const WORKING_HUB: &str = r#"
case "$1" in
  assemble) printf '%s' '{"memories":[{"content":"from hub","type":"fact"}],"summaries":[{"content":"last session"}]}' ;;
  write) printf '%s\n' "$2" >> "$(dirname "$0")/writes.txt" ;;
  summarize) touch "$(dirname "$0")/summarized" ;;
  *) echo "unknown command $1" >&2; exit 2 ;;
esac
"#;

const BROKEN_HUB: &str = r#"
echo boom >&2
exit 1
"#;

fn fake_hub(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("memory-hub");
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

fn hook(hub: &Path) -> Command {
    let mut cmd = Command::cargo_bin("memory-fabric-autowire").unwrap();
    cmd.env(HUB_PATH_ENV, hub);
    cmd
}

#[test]
fn test_bootstrap_end_to_end() {
    let workspace = tempdir().unwrap();
    let bin = tempdir().unwrap();
    let hub = fake_hub(bin.path(), WORKING_HUB);

    let event = json!({
        "type": "agent",
        "action": "bootstrap",
        "context": {
            "workspaceDir": workspace.path(),
            "bootstrapFiles": [{"name": "AGENTS.md", "path": "/w/AGENTS.md"}]
        }
    });

    hook(&hub)
        .write_stdin(event.to_string())
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""name":"AGENTS.md""#))
        .stdout(predicate::str::contains(r#""name":"memory-fabric-tools""#));

    let ctx = workspace.path().join(".memory_fabric");
    assert!(ctx.join("TOOLS.md").exists());
    let pack = fs::read_to_string(ctx.join("context_pack.md")).unwrap();
    assert!(pack.contains("- [fact] from hub"));
    assert!(pack.contains("- last session"));
    assert!(fs::read_to_string(ctx.join("hook.log")).unwrap().contains("agent:bootstrap"));
}

#[test]
fn test_failing_hub_keeps_previous_context() {
    let workspace = tempdir().unwrap();
    let bin = tempdir().unwrap();
    let hub = fake_hub(bin.path(), BROKEN_HUB);

    let ctx = workspace.path().join(".memory_fabric");
    fs::create_dir_all(&ctx).unwrap();
    fs::write(ctx.join("context_pack.md"), "previous").unwrap();

    let event = json!({
        "type": "message",
        "action": "received",
        "context": {"workspaceDir": workspace.path(), "content": "what changed?"}
    });

    hook(&hub)
        .write_stdin(event.to_string())
        .assert()
        .success()
        .stderr(predicate::str::contains("boom"));

    assert_eq!(fs::read_to_string(ctx.join("context_pack.md")).unwrap(), "previous");
    let log = fs::read_to_string(ctx.join("hook.log")).unwrap();
    assert!(log.lines().any(|l| l.contains("assemble failed") && l.contains("boom")));
}

#[test]
fn test_message_sent_and_stop_reach_the_hub() {
    let workspace = tempdir().unwrap();
    let bin = tempdir().unwrap();
    let hub = fake_hub(bin.path(), WORKING_HUB);

    let sent = json!({
        "type": "message",
        "action": "sent",
        "context": {"workspaceDir": workspace.path(), "content": "Refactored the lexer"}
    });
    hook(&hub).write_stdin(sent.to_string()).assert().success();

    let stop = json!({
        "type": "command",
        "action": "stop",
        "context": {"workspaceDir": workspace.path()}
    });
    hook(&hub).write_stdin(stop.to_string()).assert().success();

    assert_eq!(
        fs::read_to_string(bin.path().join("writes.txt")).unwrap(),
        "Refactored the lexer\n"
    );
    assert!(bin.path().join("summarized").exists());
}

#[test]
fn test_event_file_and_cfg_hub_path() {
    let workspace = tempdir().unwrap();
    let bin = tempdir().unwrap();
    let hub = fake_hub(bin.path(), WORKING_HUB);

    let event = json!({
        "type": "message",
        "action": "received",
        "context": {
            "workspaceDir": workspace.path(),
            "content": "status?",
            "cfg": {"hooks": {"internal": {"entries": {"memory-fabric-autowire": {
                "memoryHubPath": hub,
                "contextDir": "mf"
            }}}}}
        }
    });
    let event_file = bin.path().join("event.json");
    fs::write(&event_file, event.to_string()).unwrap();

    Command::cargo_bin("memory-fabric-autowire")
        .unwrap()
        .env(HUB_PATH_ENV, "/nonexistent/memory-hub")
        .arg("--event")
        .arg(&event_file)
        .assert()
        .success()
        .stdout(r#"{"bootstrapFiles":[]}"#);

    assert!(workspace.path().join("mf/context_pack.md").exists());
}

#[test]
fn test_unknown_event_is_tolerated() {
    let workspace = tempdir().unwrap();
    let bin = tempdir().unwrap();
    let hub = fake_hub(bin.path(), BROKEN_HUB);

    let event =
        json!({"type": "foo", "action": "bar", "context": {"workspaceDir": workspace.path()}});
    hook(&hub)
        .write_stdin(event.to_string())
        .assert()
        .success()
        .stdout(r#"{"bootstrapFiles":[]}"#);

    let log = fs::read_to_string(workspace.path().join(".memory_fabric/hook.log")).unwrap();
    assert_eq!(log.lines().count(), 1);
}

#[test]
fn test_missing_workspace_exits_cleanly() {
    let bin = tempdir().unwrap();
    let hub = fake_hub(bin.path(), WORKING_HUB);

    hook(&hub)
        .write_stdin(r#"{"type": "agent", "action": "bootstrap", "context": {}}"#)
        .assert()
        .success()
        .stderr(predicate::str::contains("workspaceDir"));
}

#[test]
fn test_malformed_event_fails() {
    let bin = tempdir().unwrap();
    let hub = fake_hub(bin.path(), WORKING_HUB);

    hook(&hub)
        .write_stdin("not an event")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse hook input"));
}
