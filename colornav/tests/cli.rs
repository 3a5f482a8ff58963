use std::process::{Output, Stdio};

use colornav_core::models::{KeyLock, MarkerState};
use colornav_mock::{MockServer, MockState, SharedState};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

struct TestServer {
    port: u16,
    state: SharedState,
}

impl TestServer {
    async fn start() -> Self {
        let server = MockServer::bind("127.0.0.1:0".parse().unwrap(), MockState::demo())
            .await
            .expect("Failed to bind mock server");
        let port = server.local_addr().unwrap().port();
        let state = server.state();
        tokio::spawn(server.run());
        Self { port, state }
    }

    fn command(&self, args: &[&str]) -> Command {
        // Use the compiled binary directly (avoids cargo lock issues)
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_colornav"));
        cmd.arg("--host")
            .arg("127.0.0.1")
            .arg("--port")
            .arg(self.port.to_string())
            .args(args)
            .env_remove("COLORNAV_HOST")
            .env_remove("COLORNAV_PORT")
            .env_remove("RUST_LOG")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }

    async fn run(&self, args: &[&str]) -> Output {
        self.command(args).output().await.expect("Failed to run colornav")
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[tokio::test]
async fn test_monitors() {
    let server = TestServer::start().await;

    let output = server.run(&["monitors"]).await;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let monitors: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(monitors[0]["modelName"], "CG2700X");
}

#[tokio::test]
async fn test_key_lock_set_targets_first_monitor() {
    let server = TestServer::start().await;

    let output = server.run(&["key-lock", "set", "menu"]).await;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("Target monitor: CG2700X (21000001)"));
    assert!(out.contains("Changed the key lock setting to \"MENU\"."));
    assert_eq!(server.state.read().monitors[0].key_lock, KeyLock::Menu);
}

#[tokio::test]
async fn test_unknown_monitor_exits_non_zero() {
    let server = TestServer::start().await;

    let output = server.run(&["--monitor", "missing", "key-lock", "get"]).await;
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Monitor not found."));
}

#[tokio::test]
async fn test_update_with_yes_skips_prompt() {
    let server = TestServer::start().await;

    let output = server.run(&["color-modes", "update", "9", "--yes"]).await;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(server.state.read().monitors[0].color_modes[9].name, "API_Sample");
}

#[tokio::test]
async fn test_update_can_be_declined() {
    let server = TestServer::start().await;

    let mut child = server
        .command(&["color-modes", "update", "9"])
        .stdin(Stdio::piped())
        .spawn()
        .unwrap();
    let mut stdin = child.stdin.take().unwrap();
    stdin.write_all(b"n\n").await.unwrap();
    drop(stdin);

    let output = child.wait_with_output().await.unwrap();
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Cancelled"));
    assert_eq!(server.state.read().monitors[0].color_modes[9].name, "User");
}

#[tokio::test]
async fn test_validation_results_walk() {
    let server = TestServer::start().await;

    let output = server.run(&["color-modes", "validation-results"]).await;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("calibration result id: calres-0001"));
    assert!(out.contains("valres-0001"));
}

#[tokio::test]
async fn test_out_of_range_index_never_reaches_server() {
    let server = TestServer::start().await;

    let output = server.run(&["color-modes", "select", "12"]).await;
    assert!(!output.status.success());
    assert_eq!(server.state.read().monitors[0].selected_index(), Some(0));
}

#[tokio::test]
async fn test_pixel_inspect() {
    let server = TestServer::start().await;

    let output = server.run(&["pixel", "inspect", "--x", "10", "--y", "20", "--show-marker"]).await;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("\"colorFormat\": \"RGB\""));
    assert_eq!(server.state.read().monitors[0].marker, MarkerState::Show);
}

#[tokio::test]
async fn test_marker_show_then_hide_after() {
    let server = TestServer::start().await;

    let output = server
        .run(&["pixel", "marker", "show", "--x", "1", "--y", "1", "--hide-after", "0"])
        .await;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("✅ Showing the cross marker at (1, 1)."));
    assert!(out.contains("✅ Hid the cross marker."));

    let state = server.state.read();
    assert_eq!(state.monitors[0].marker, MarkerState::Hide);
}

#[tokio::test]
async fn test_selfcalibration_run_and_stop() {
    let server = TestServer::start().await;

    let output = server.run(&["selfcalibration", "run"]).await;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("✅ Requested SelfCalibration to run."));
    assert!(server.state.read().monitors[0].selfcalibration_running);

    let output = server.run(&["selfcalibration", "STOP"]).await;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(!server.state.read().monitors[0].selfcalibration_running);
}

#[tokio::test]
async fn test_targets_create() {
    let server = TestServer::start().await;
    let before = server.state.read().monitors[0].targets.len();

    let output = server.run(&["targets", "create"]).await;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("✅ Created calibration target."));
    assert_eq!(server.state.read().monitors[0].targets.len(), before + 1);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("target.json");
    std::fs::write(&path, r#"{"name": "Proof", "colorModeName": "CAL2"}"#).unwrap();

    let output = server
        .run(&["targets", "create", "--definition", path.to_str().unwrap()])
        .await;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let state = server.state.read();
    assert_eq!(state.monitors[0].targets.len(), before + 2);
    assert!(state.monitors[0].targets.iter().any(|t| t.name == "Proof"));
}

#[tokio::test]
async fn test_version() {
    let server = TestServer::start().await;

    let output = server.run(&["version"]).await;
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("colornav v"));
}
