//! Runs with no tools on PATH and no credentials must stop before touching
//! anything remote.

mod common;

use common::*;

#[test]
fn deploy_without_tools_exits_with_precondition_code() {
    let env = TestEnv::new();

    let result = env.run(&["--non-interactive"]);

    assert_eq!(result.exit_code, 2, "{}", result.combined_output());
    assert!(
        result.combined_output().contains("precondition failed"),
        "{}",
        result.combined_output()
    );
}

#[test]
fn deploy_reports_missing_inputs_by_name() {
    let env = TestEnv::new();

    let result = env.run(&["deploy", "--non-interactive"]);

    let output = result.combined_output();
    assert_eq!(result.exit_code, 2, "{}", output);
    assert!(output.contains("DOMAIN_NAME"), "{}", output);
    assert!(output.contains("terraform"), "{}", output);
}

#[test]
fn deploy_json_ends_with_completed_event() {
    let env = TestEnv::new();

    let result = env.run(&["--json", "--non-interactive"]);

    assert_eq!(result.exit_code, 2, "{}", result.combined_output());
    let events = result.json_lines();
    let last = events.last().expect("at least one event");
    assert_eq!(last["event"], "completed");
    assert_eq!(last["command"], "deploy");
    assert_eq!(last["success"], false);
    assert_eq!(last["exit_code"], 2);
}

#[test]
fn deploy_run_guard_file_is_released() {
    let env = TestEnv::new();

    let _ = env.run(&["--non-interactive"]);
    let second = env.run(&["--non-interactive"]);

    // A second run is not rejected as concurrent
    assert_eq!(second.exit_code, 2, "{}", second.combined_output());
    assert!(!second.combined_output().contains("another shipyard run is active"));
}

#[test]
fn status_without_tools_emits_json_error() {
    let env = TestEnv::new();

    let result = env.run(&["--json", "status"]);

    assert_eq!(result.exit_code, 2, "{}", result.combined_output());
    let events = result.json_lines();
    let last = events.last().expect("error event");
    assert_eq!(last["event"], "error");
    assert_eq!(last["exit_code"], 2);
}

#[test]
fn unlock_without_tools_is_precondition_failure() {
    let env = TestEnv::new();

    let result = env.run(&["unlock", "e550de88-751a-3bda-ebf3-b9af189935af"]);

    assert_eq!(result.exit_code, 2, "{}", result.combined_output());
}

#[test]
fn unknown_config_key_warns_with_suggestion() {
    let env = TestEnv::new();
    env.write_project_file("shipyard.toml", "[backend]\nbuckett = \"x\"\n");

    let result = env.run(&["--non-interactive"]);

    assert!(
        result.stderr.contains("unknown config key"),
        "{}",
        result.stderr
    );
    assert!(result.stderr.contains("bucket"), "{}", result.stderr);
}

#[test]
fn invalid_config_is_reported() {
    let env = TestEnv::new();
    env.write_project_file("shipyard.toml", "[backend\n");

    let result = env.run(&["--non-interactive"]);

    assert!(!result.success);
    assert_ne!(result.exit_code, 0);
}
