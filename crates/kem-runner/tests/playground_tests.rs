//! Playground envelope: validation, response shape, truncation and the
//! JSON entry point.

use kem_runner::catalog::EXAMPLES;
use kem_runner::playground::{handle, handle_json, RunRequest, RunResponse, EXIT_RUN_FAILED};
use kem_runner::{RunConfig, RunMode, RunRejection, MAX_IO_SIZE, NO_OUTPUT_MESSAGE};

fn respond(request: RunRequest) -> RunResponse {
    handle(&request, &RunConfig::default()).expect("request was rejected")
}

#[test]
fn successful_run() {
    let response = respond(RunRequest::new("bhai bol \"hi\""));
    assert_eq!(
        response,
        RunResponse {
            output: "hi".into(),
            error: String::new(),
            exit_code: 0,
            success: true,
        }
    );
}

#[test]
fn empty_program_is_allowed() {
    assert_eq!(respond(RunRequest::new("")).output, NO_OUTPUT_MESSAGE);
}

#[test]
fn request_mode_overrides_config() {
    let program = "aa a che 2\nbhai bol a + a";
    assert_eq!(respond(RunRequest::new(program)).output, "aa");
    assert_eq!(
        respond(RunRequest::new(program).with_mode(RunMode::Scan)).output,
        "4"
    );
}

#[test]
fn runner_failure_is_reported_in_response() {
    let response = respond(RunRequest::new("bhai bol missing").with_mode(RunMode::Scan));
    assert!(!response.success);
    assert_eq!(response.exit_code, EXIT_RUN_FAILED);
    assert_eq!(response.output, "");
    assert!(response.error.starts_with("Error: "), "{}", response.error);
    assert!(response.error.contains("undefined variable 'missing'"));
}

#[test]
fn oversized_requests_are_rejected() {
    let config = RunConfig::default();
    let long = "x".repeat(MAX_IO_SIZE + 1);
    assert_eq!(
        handle(&RunRequest::new(long.clone()), &config),
        Err(RunRejection::CodeTooLong)
    );
    assert_eq!(
        handle(&RunRequest::new("bhai bol 1").with_input(long), &config),
        Err(RunRejection::InputTooLong)
    );
    assert!(handle(&RunRequest::new("x".repeat(MAX_IO_SIZE)), &config).is_ok());
}

#[test]
fn long_output_is_truncated() {
    let program = format!(
        "aa naam che \"{}\"\nbhai bol naam naam naam\nbhai bol naam naam naam",
        "x".repeat(200)
    );
    let output = respond(RunRequest::new(program)).output;
    let suffix = "\n... (output truncated)";
    assert!(output.ends_with(suffix));
    assert_eq!(output.chars().count(), MAX_IO_SIZE + suffix.chars().count());
}

#[test]
fn every_example_runs_in_both_modes() {
    for example in EXAMPLES {
        for mode in [RunMode::Mock, RunMode::Scan] {
            let request = RunRequest::new(example.code)
                .with_input(example.input)
                .with_mode(mode);
            let response = respond(request);
            assert!(response.success, "{} in {mode}: {}", example.key, response.error);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────
// JSON entry point
// ─────────────────────────────────────────────────────────────────────

#[test]
fn json_round_trip() {
    let body = r#"{"code": "aa number che 5\nbhai bol number + number", "mode": "scan"}"#;
    let json: serde_json::Value = serde_json::from_str(&handle_json(body, &RunConfig::default())).unwrap();
    assert_eq!(json["output"], "10");
    assert_eq!(json["error"], "");
    assert_eq!(json["exit_code"], 0);
    assert_eq!(json["success"], true);
}

#[test]
fn json_defaults_to_mock_mode() {
    let body = r#"{"code": "aa number che 5\nbhai bol number + number"}"#;
    let json: serde_json::Value = serde_json::from_str(&handle_json(body, &RunConfig::default())).unwrap();
    assert_eq!(json["output"], "55");
}

#[test]
fn json_rejections() {
    let config = RunConfig::default();
    assert_eq!(handle_json("{}", &config), r#"{"error":"No code provided"}"#);
    assert_eq!(handle_json("not json", &config), r#"{"error":"No code provided"}"#);
    let long = format!(r#"{{"code": "{}"}}"#, "x".repeat(MAX_IO_SIZE + 1));
    assert_eq!(handle_json(&long, &config), r#"{"error":"Code too long"}"#);
}

#[test]
fn json_unknown_mode_is_rejected() {
    let body = r#"{"code": "bhai bol 1", "mode": "eval"}"#;
    assert_eq!(
        handle_json(body, &RunConfig::default()),
        r#"{"error":"No code provided"}"#
    );
}
