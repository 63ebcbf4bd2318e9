//! Lifecycle tests for the `check` command: classification, manifest
//! persistence, and CLI exit codes, driven with a scripted stand-in for java.

use std::fs;
use std::process::Command;

use workbench::exit_codes;
use workbench::io::jar::JAR_ENV_VAR;

#[test]
fn missing_jar_exits_input_error_without_a_run_dir() {
    let temp = tempfile::tempdir().expect("tempdir");
    let spec_path = temp.path().join("Counter.tla");
    fs::write(&spec_path, "---- MODULE Counter ----\n====\n").expect("write spec");
    fs::write(temp.path().join("Counter.cfg"), "INIT Init\n").expect("write cfg");

    let status = Command::new(env!("CARGO_BIN_EXE_workbench"))
        .current_dir(temp.path())
        .env_remove(JAR_ENV_VAR)
        .arg("check")
        .arg("--spec")
        .arg(&spec_path)
        .status()
        .expect("run check");

    assert_eq!(status.code(), Some(exit_codes::INPUT_ERROR));
    assert!(!temp.path().join(".tlc-workbench").exists());
}

#[test]
fn missing_spec_exits_input_error() {
    let temp = tempfile::tempdir().expect("tempdir");

    let output = Command::new(env!("CARGO_BIN_EXE_workbench"))
        .current_dir(temp.path())
        .arg("check")
        .arg("--spec")
        .arg(temp.path().join("Missing.tla"))
        .output()
        .expect("run check");

    assert_eq!(output.status.code(), Some(exit_codes::INPUT_ERROR));
    assert!(String::from_utf8_lossy(&output.stderr).contains("spec not found"));
}

#[cfg(unix)]
mod scripted {
    use super::*;

    use serde_json::Value;
    use workbench::check::{run_check, CheckRequest};
    use workbench::core::types::RunStatus;
    use workbench::test_support::{write_fake_java, SpecDir};

    fn request(spec_dir: &SpecDir, java: &std::path::Path) -> CheckRequest {
        CheckRequest {
            spec: spec_dir.spec_path.clone(),
            jar: Some(spec_dir.jar_path.clone()),
            java: Some(java.display().to_string()),
            out_root: Some(spec_dir.out_root()),
            ..CheckRequest::default()
        }
    }

    #[test]
    fn clean_exit_without_counterexample_is_a_pass() {
        let spec_dir = SpecDir::new().expect("spec dir");
        let java = write_fake_java(spec_dir.path(), "fake-java-pass.sh", "exit 0")
            .expect("fake java");

        let manifest = run_check(&request(&spec_dir, &java)).expect("manifest");
        assert_eq!(manifest.status, RunStatus::Pass);
        assert_eq!(manifest.exit_code, 0);
        assert!(!manifest.timed_out);
        assert!(manifest.counterexample_json_path.is_none());
        assert!(manifest.counterexample_summary.is_none());

        // Manifest persisted inside the run dir.
        let on_disk = fs::read_to_string(
            std::path::Path::new(&manifest.run_dir).join("summary.json"),
        )
        .expect("read summary.json");
        let parsed: Value = serde_json::from_str(&on_disk).expect("parse summary.json");
        assert_eq!(parsed["status"], "pass");
    }

    #[test]
    fn dumped_counterexample_wins_over_nonzero_exit() {
        let spec_dir = SpecDir::new().expect("spec dir");
        let java = write_fake_java(
            spec_dir.path(),
            "fake-java-fail.sh",
            r#"printf '%s' '{"state":[[1,{"x":1}],[2,{"x":2}]],"action":[[[1,{"x":1}],{"name":"Incr"},[2,{"x":2}]]]}' > "$trace"
exit 12"#,
        )
        .expect("fake java");

        let manifest = run_check(&request(&spec_dir, &java)).expect("manifest");
        assert_eq!(manifest.status, RunStatus::Fail);
        assert_eq!(manifest.exit_code, 12);

        let summary = manifest.counterexample_summary.expect("summary");
        assert_eq!(summary.states_total, 2);
        assert_eq!(
            summary.steps[1].action,
            Some(serde_json::json!({"name": "Incr"}))
        );
        assert!(manifest.counterexample_json_path.is_some());
    }

    #[test]
    fn unparseable_counterexample_still_yields_a_fail_manifest() {
        let spec_dir = SpecDir::new().expect("spec dir");
        let java = write_fake_java(
            spec_dir.path(),
            "fake-java-drift.sh",
            r#"printf '%s' '{"state": "schema drifted"}' > "$trace"
exit 1"#,
        )
        .expect("fake java");

        let manifest = run_check(&request(&spec_dir, &java)).expect("manifest");
        assert_eq!(manifest.status, RunStatus::Fail);
        assert!(manifest.counterexample_summary.is_none());
        assert!(manifest.counterexample_json_path.is_some());
    }

    #[test]
    fn nonzero_exit_without_counterexample_is_an_error() {
        let spec_dir = SpecDir::new().expect("spec dir");
        let java = write_fake_java(spec_dir.path(), "fake-java-error.sh", "exit 7")
            .expect("fake java");

        let manifest = run_check(&request(&spec_dir, &java)).expect("manifest");
        assert_eq!(manifest.status, RunStatus::Error);
        assert_eq!(manifest.exit_code, 7);
    }

    #[test]
    fn timeout_kills_the_checker_and_is_recorded() {
        let spec_dir = SpecDir::new().expect("spec dir");
        let java = write_fake_java(spec_dir.path(), "fake-java-hang.sh", "sleep 30")
            .expect("fake java");

        let mut req = request(&spec_dir, &java);
        req.timeout_secs = Some(1);
        let manifest = run_check(&req).expect("manifest");

        assert_eq!(manifest.status, RunStatus::Timeout);
        assert!(manifest.timed_out);
        assert_eq!(manifest.exit_code, 124);
    }

    #[test]
    fn manifest_records_provenance_and_command() {
        let spec_dir = SpecDir::new().expect("spec dir");
        let java = write_fake_java(spec_dir.path(), "fake-java-pass.sh", "exit 0")
            .expect("fake java");

        let manifest = run_check(&request(&spec_dir, &java)).expect("manifest");

        assert_eq!(manifest.inputs.spec_sha256.len(), 64);
        assert_eq!(manifest.inputs.cfg_sha256.len(), 64);
        assert_eq!(manifest.module, "Counter");
        assert!(manifest.command.contains(&"tlc2.TLC".to_string()));
        assert!(manifest.command.contains(&"-workers".to_string()));
        // Default worker count stays 1 for reproducibility.
        let workers_idx = manifest
            .command
            .iter()
            .position(|arg| arg == "-workers")
            .expect("workers flag");
        assert_eq!(manifest.command[workers_idx + 1], "1");
        // The cfg lives next to the spec, so it is passed as a bare name.
        assert!(manifest.command.contains(&"Counter.cfg".to_string()));
        assert!(manifest.command_str.contains("tlc2.TLC"));
        // Run id ties the run back to its inputs.
        assert!(manifest.run_dir.contains(&manifest.inputs.spec_sha256[..8]));

        assert!(std::path::Path::new(&manifest.stdout_path).is_file());
        assert!(std::path::Path::new(&manifest.stderr_path).is_file());
    }

    #[test]
    fn reusing_a_run_dir_is_refused() {
        let spec_dir = SpecDir::new().expect("spec dir");
        let java = write_fake_java(spec_dir.path(), "fake-java-pass.sh", "exit 0")
            .expect("fake java");

        let manifest = run_check(&request(&spec_dir, &java)).expect("manifest");

        // Re-run with identical inputs immediately. Run ids have second
        // granularity, so either the second run gets a fresh id or it
        // collides and is refused; it must never reuse the first run's dir.
        match run_check(&request(&spec_dir, &java)) {
            Ok(second) => assert_ne!(second.run_dir, manifest.run_dir),
            Err(err) => assert!(!err.is_input_error()),
        }
    }

    #[test]
    fn cli_check_emits_manifest_on_stdout_and_maps_exit_codes() {
        let spec_dir = SpecDir::new().expect("spec dir");
        let java = write_fake_java(
            spec_dir.path(),
            "fake-java-fail.sh",
            r#"printf '%s' '{"state":[[1,{"x":1}],[2,{"x":2}]]}' > "$trace"
exit 1"#,
        )
        .expect("fake java");

        let output = Command::new(env!("CARGO_BIN_EXE_workbench"))
            .current_dir(spec_dir.path())
            .env_remove(JAR_ENV_VAR)
            .arg("check")
            .args(["--spec"])
            .arg(&spec_dir.spec_path)
            .args(["--jar"])
            .arg(&spec_dir.jar_path)
            .args(["--java", &java.display().to_string()])
            .args(["--out-root"])
            .arg(spec_dir.out_root())
            .output()
            .expect("run check");

        assert_eq!(output.status.code(), Some(exit_codes::FAIL));
        let manifest: Value = serde_json::from_slice(&output.stdout).expect("parse stdout");
        assert_eq!(manifest["status"], "fail");
        assert_eq!(manifest["counterexample_summary"]["states_total"], 2);
    }

    #[test]
    fn cli_check_pass_exits_zero() {
        let spec_dir = SpecDir::new().expect("spec dir");
        let java = write_fake_java(spec_dir.path(), "fake-java-pass.sh", "exit 0")
            .expect("fake java");

        let output = Command::new(env!("CARGO_BIN_EXE_workbench"))
            .current_dir(spec_dir.path())
            .env_remove(JAR_ENV_VAR)
            .arg("check")
            .args(["--spec"])
            .arg(&spec_dir.spec_path)
            .args(["--jar"])
            .arg(&spec_dir.jar_path)
            .args(["--java", &java.display().to_string()])
            .args(["--out-root"])
            .arg(spec_dir.out_root())
            .output()
            .expect("run check");

        assert_eq!(output.status.code(), Some(exit_codes::PASS));
        let manifest: Value = serde_json::from_slice(&output.stdout).expect("parse stdout");
        assert_eq!(manifest["status"], "pass");
        assert_eq!(manifest["counterexample_json_path"], Value::Null);
    }
}
