use std::fs;

use spotavail::config::Config;
use spotavail::core::types::TimeFormat;

use crate::common::{make_temp_dir, read_log_contents, run, stdout_lines, write_sample_schedule};

#[test]
fn first_run_writes_default_config() {
    let dir = make_temp_dir("config");
    let output = run(&dir, &["config"]);
    assert!(output.status.success());

    let cfg = Config::load_from(dir.join("config.json")).unwrap();
    assert_eq!(cfg.view_days(), 7);
    assert_eq!(cfg.time_format(), TimeFormat::H24);

    let lines = stdout_lines(&output);
    assert!(lines.iter().any(|l| l == "CONFIG"));
    assert!(lines.iter().any(|l| l.starts_with("0  | SLOT_MINUTES")));
}

#[test]
fn config_edit_is_persisted_and_logged() {
    let dir = make_temp_dir("config");
    let output = run(&dir, &["config", "time_format", "12h"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(stdout_lines(&output), vec!["Updated TIME_FORMAT: 24h -> 12h"]);

    let cfg = Config::load_from(dir.join("config.json")).unwrap();
    assert_eq!(cfg.time_format(), TimeFormat::H12);
    assert!(read_log_contents(&dir).unwrap().contains("Updated TIME_FORMAT"));
}

#[test]
fn twelve_hour_config_changes_messages() {
    let dir = make_temp_dir("config");
    write_sample_schedule(&dir);
    run(&dir, &["config", "TIME_FORMAT", "12h"]);
    let output = run(&dir, &["check", "2024-05-06 08:00", "2024-05-06 10:00"]);
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(
        stdout_lines(&output),
        vec!["Not available: Selected time on Monday (8:00 AM) is outside available hours: 9:00 AM - 5:00 PM"]
    );
}

#[test]
fn invalid_config_value_exits_with_error() {
    let dir = make_temp_dir("config");
    let output = run(&dir, &["config", "SLOT_MINUTES", "7"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Slot length 7 must divide 1440 minutes evenly."));
}

#[test]
fn disabling_file_logging_stops_new_log_files() {
    let dir = make_temp_dir("config");
    run(&dir, &["config", "FILE_LOGGING_ENABLED", "false"]);
    let _ = fs::remove_dir_all(dir.join("logs"));

    write_sample_schedule(&dir);
    let output = run(&dir, &["-v", "check", "2024-05-06 09:00", "2024-05-06 10:00"]);
    assert!(output.status.success());
    assert!(read_log_contents(&dir).is_none());
}

#[test]
fn unreadable_config_is_reported() {
    let dir = make_temp_dir("config");
    fs::write(dir.join("config.json"), "{").unwrap();
    let output = run(&dir, &["config"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid JSON in 'config.json'"), "stderr was: {stderr}");
}

#[test]
fn out_of_range_values_in_file_are_refused_at_startup() {
    let dir = make_temp_dir("config");
    fs::write(
        dir.join("config.json"),
        r#"{ "view_days": { "value": 4000000000, "description": "days" } }"#,
    )
    .unwrap();
    write_sample_schedule(&dir);
    let output = run(&dir, &["week", "2024-05-06"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid value for VIEW_DAYS"), "stderr was: {stderr}");
}

#[test]
fn several_keys_are_set_together_or_not_at_all() {
    let dir = make_temp_dir("config");
    let output = run(&dir, &["config", "VIEW_DAYS", "3", "BASE_HOURLY_RATE", "-5"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(Config::load_from(dir.join("config.json")).unwrap().view_days(), 7);

    let output = run(&dir, &["config", "VIEW_DAYS", "3", "BASE_HOURLY_RATE", "2.5"]);
    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        vec!["Updated BASE_HOURLY_RATE: 0 -> 2.5", "Updated VIEW_DAYS: 7 -> 3"]
    );
}
