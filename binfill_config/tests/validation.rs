use binfill_config::load_toml;
use rstest::rstest;

fn valid_toml() -> &'static str {
    r#"
[bin]
id = "03"

[timing]
tick_hz = 10
settle_delay_ms = 5000
cooldown_ms = 10000

[display]
width = 16

[persistence]
path = "last_bin_data.json"

[channel]
topic_prefix = "campus/bins"
feed = "feed.jsonl"

[alert]
percent = 75.0

[pins]
ultrasonic = 2
motion = 5
button = 3
"#
}

#[test]
fn accepts_a_complete_config() {
    let cfg = load_toml(valid_toml()).expect("parse");
    cfg.validate().expect("validate");
    assert_eq!(cfg.bin.as_ref().map(|b| b.id.as_str()), Some("03"));
    assert_eq!(cfg.fullness_topic("03"), "campus/bins/03/fullness");
    assert_eq!(cfg.command_topic("03"), "campus/bins/03/msg");
}

#[test]
fn defaults_cover_missing_sections() {
    let cfg = load_toml("[bin]\nid = \"07\"\n").expect("parse");
    cfg.validate().expect("defaults validate");
    assert_eq!(cfg.timing.tick_hz, 10);
    assert_eq!(cfg.timing.settle_delay_ms, 5_000);
    assert_eq!(cfg.timing.cooldown_ms, 10_000);
    assert_eq!(cfg.display.width, 16);
    assert!((cfg.alert.percent - 75.0).abs() < f32::EPSILON);
}

#[rstest]
#[case("[bin]\nid = \"\"\n", "bin.id")]
#[case("[timing]\ntick_hz = 0\n", "tick_hz")]
#[case("[timing]\ntick_hz = 5000\n", "tick_hz")]
#[case("[timing]\nsettle_delay_ms = 0\n", "settle_delay_ms")]
#[case("[timing]\ncooldown_ms = 0\n", "cooldown_ms")]
#[case("[display]\nwidth = 0\n", "display.width")]
#[case("[persistence]\npath = \"\"\n", "persistence.path")]
#[case("[channel]\ntopic_prefix = \"\"\n", "topic_prefix")]
#[case("[alert]\npercent = 0.0\n", "alert.percent")]
#[case("[alert]\npercent = 150.0\n", "alert.percent")]
fn rejects_out_of_range_values(#[case] toml: &str, #[case] needle: &str) {
    let cfg = load_toml(toml).expect("parse");
    let err = cfg.validate().expect_err("should reject");
    assert!(
        err.to_string().contains(needle),
        "error {err} does not mention {needle}"
    );
}

#[test]
fn unknown_keys_are_ignored() {
    // Forward compatibility: extra sections must not break deployments.
    let cfg = load_toml("[future]\nshiny = true\n").expect("parse");
    cfg.validate().expect("validate");
}
