use assert_cmd::prelude::*;
use predicates::prelude::*;
use rstest::rstest;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

// Fast timings so a bounded sim run completes in well under a second.
fn write_valid_config(dir: &tempfile::TempDir) -> PathBuf {
    let last = dir.path().join("last.json");
    let feed = dir.path().join("feed.jsonl");
    let toml = format!(
        r#"
[bin]
id = "03"

[timing]
tick_hz = 50
settle_delay_ms = 40
cooldown_ms = 80

[display]
width = 16

[persistence]
path = "{}"

[channel]
topic_prefix = "campus/bins"
feed = "{}"

[alert]
percent = 75.0
"#,
        last.display(),
        feed.display()
    );
    let path = dir.path().join("cfg.toml");
    fs::write(&path, toml).unwrap();
    path
}

fn binfill() -> Command {
    Command::cargo_bin("binfill_cli").unwrap()
}

#[rstest]
#[case(&["--help"], 0, "Usage:", "stdout")]
#[case(&["self-check"], 0, "self-check ok", "stdout")]
#[case(&["run", "--ticks", "30"], 0, "measurements", "stdout")]
#[case(&["run", "--ticks", "not-a-number"], 2, "invalid value", "stderr")]
fn cli_table_cases(
    #[case] args: &[&str],
    #[case] exit_code: i32,
    #[case] needle: &str,
    #[case] stream: &str,
) {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);

    let mut cmd = binfill();
    cmd.current_dir(dir.path());
    cmd.arg("--config").arg(&cfg);
    // A large per-read step so the simulated bin visibly fills.
    cmd.env("BINFILL_SIM_FILL_STEP", "10");
    for a in args {
        cmd.arg(a);
    }

    let assert = cmd.assert().code(exit_code);
    match stream {
        "stdout" => {
            assert.stdout(predicate::str::contains(needle));
        }
        "stderr" => {
            assert.stderr(predicate::str::contains(needle));
        }
        other => panic!("unknown stream: {other}"),
    }
}

#[test]
fn bounded_run_persists_and_publishes_records() {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);

    binfill()
        .current_dir(dir.path())
        .arg("--config")
        .arg(&cfg)
        .arg("--json")
        .env("BINFILL_SIM_FILL_STEP", "10")
        .args(["run", "--ticks", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"measurements\""));

    // Last record persisted as JSON with the configured bin id.
    let last: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("last.json")).unwrap()).unwrap();
    assert_eq!(last["bin_id"], "03");
    let percentage = last["percentage"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&percentage));
    assert!(last["timestamp"].as_str().unwrap().contains('T'));

    // Feed got one topic-tagged line per measurement.
    let feed = fs::read_to_string(dir.path().join("feed.jsonl")).unwrap();
    assert!(feed.lines().count() >= 1);
    for line in feed.lines() {
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(value["topic"], "campus/bins/03/fullness");
    }
}

#[test]
fn show_prints_the_persisted_record() {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);

    binfill()
        .current_dir(dir.path())
        .arg("--config")
        .arg(&cfg)
        .env("BINFILL_SIM_FILL_STEP", "10")
        .args(["run", "--ticks", "30"])
        .assert()
        .success();

    binfill()
        .current_dir(dir.path())
        .arg("--config")
        .arg(&cfg)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("bin 03"));
}

#[test]
fn show_without_a_record_explains_itself() {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);

    binfill()
        .current_dir(dir.path())
        .arg("--config")
        .arg(&cfg)
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("What happened"));
}

#[test]
fn invalid_config_is_rejected_with_a_hint() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cfg.toml");
    fs::write(&path, "[timing]\ntick_hz = 0\n").unwrap();

    binfill()
        .current_dir(dir.path())
        .arg("--config")
        .arg(&path)
        .arg("self-check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("tick_hz"));
}

#[test]
fn bin_id_override_wins_over_config() {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);

    binfill()
        .current_dir(dir.path())
        .arg("--config")
        .arg(&cfg)
        .env("BINFILL_SIM_FILL_STEP", "10")
        .args(["run", "--ticks", "30", "--bin-id", "99"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bin 99"));

    let last: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("last.json")).unwrap()).unwrap();
    assert_eq!(last["bin_id"], "99");
}

#[test]
fn injected_remote_reset_rebaselines_the_run() {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);

    binfill()
        .current_dir(dir.path())
        .arg("--config")
        .arg(&cfg)
        .arg("--json")
        .env("BINFILL_SIM_FILL_STEP", "10")
        .args(["run", "--ticks", "60", "--inject-reset-at", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"resets\":1"));
}
