use std::fs;

use crate::common::{make_temp_dir, read_log_contents, run, stdout_lines, write_sample_schedule};

#[test]
fn help_lists_commands() {
    let dir = make_temp_dir("cli");
    let output = run(&dir, &["help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Usage: spotavail"));
    assert!(stdout.contains("check <START> <END>"));
}

#[test]
fn unknown_command_exits_with_error() {
    let dir = make_temp_dir("cli");
    let output = run(&dir, &["frobnicate"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown command: 'frobnicate'"), "stderr was: {stderr}");
}

#[test]
fn day_prints_the_effective_schedule() {
    let dir = make_temp_dir("cli");
    write_sample_schedule(&dir);
    let output = run(&dir, &["day", "2024-05-06"]);
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert!(lines.iter().any(|l| l == "2024-05-06 MONDAY (WEEKLY)"));
    assert!(lines.iter().any(|l| l.starts_with("09:00 | 17:00 | open")));
}

#[test]
fn check_inside_hours_succeeds_with_quote() {
    let dir = make_temp_dir("cli");
    write_sample_schedule(&dir);
    let output = run(&dir, &["check", "2024-05-06 16:00", "2024-05-06 17:00"]);
    assert_eq!(output.status.code(), Some(0));
    let lines = stdout_lines(&output);
    assert_eq!(lines[0], "OK");
    assert!(lines.iter().any(|l| l.starts_with("TOTAL")));
}

#[test]
fn check_past_closing_exits_with_two() {
    let dir = make_temp_dir("cli");
    write_sample_schedule(&dir);
    let output = run(&dir, &["check", "2024-05-06 17:00", "2024-05-06 18:00"]);
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(
        stdout_lines(&output),
        vec!["Not available: Selected time on Monday (17:00) is outside available hours: 09:00 - 17:00"]
    );
}

#[test]
fn check_on_blocked_date_exits_with_two() {
    let dir = make_temp_dir("cli");
    write_sample_schedule(&dir);
    let output = run(&dir, &["check", "2024-05-07 10:00", "2024-05-07 11:00"]);
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(
        stdout_lines(&output),
        vec!["Not available: not available on Tuesday 2024-05-07"]
    );
}

#[test]
fn reversed_request_is_an_error() {
    let dir = make_temp_dir("cli");
    write_sample_schedule(&dir);
    let output = run(&dir, &["check", "2024-05-06 12:00", "2024-05-06 11:00"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid booking request"), "stderr was: {stderr}");
}

#[test]
fn verbose_check_traces_each_day() {
    let dir = make_temp_dir("cli");
    write_sample_schedule(&dir);
    let output = run(&dir, &["-v", "check", "2024-05-06 16:00", "2024-05-06 17:00"]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("check 2024-05-06 16:00 - 17:00 against weekly hours"),
        "stderr was: {stderr}"
    );
    let log = read_log_contents(&dir).expect("log file");
    assert!(log.contains("DEBUG check 2024-05-06"));
}

#[test]
fn open_then_day_shows_the_override() {
    let dir = make_temp_dir("cli");
    let output = run(&dir, &["open", "2024-06-01", "18:00-22:00", "4"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2024-06-01 Saturday now: 18:00 - 22:00 @ 4.00/h"));

    let output = run(&dir, &["day", "2024-06-01"]);
    let lines = stdout_lines(&output);
    assert!(lines.iter().any(|l| l == "2024-06-01 SATURDAY (OVERRIDE)"));
    assert!(lines.iter().any(|l| l.starts_with("18:00 | 22:00 | open") && l.ends_with("4.00/h")));
}

#[test]
fn week_lists_configured_number_of_days() {
    let dir = make_temp_dir("cli");
    write_sample_schedule(&dir);
    let output = run(&dir, &["week", "2024-05-05"]);
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    for date in ["2024-05-05", "2024-05-11"] {
        assert!(lines.iter().any(|l| l.starts_with(date)), "missing {date}");
    }
    assert!(lines.iter().any(|l| l.contains("Blocked all day")));
    assert!(lines.iter().any(|l| l.contains("18:00 - 24:00 @ 6.00/h")));
}

#[test]
fn overlapping_host_windows_exit_with_error() {
    let dir = make_temp_dir("cli");
    let output = run(&dir, &["open", "2024-05-07", "09:30-10:30"]);
    assert!(output.status.success());

    let output = run(&dir, &["open", "2024-05-07", "10:00-11:00", "5"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Time block 10:00 - 11:00 overlaps existing block 09:30 - 10:30."),
        "stderr was: {stderr}"
    );

    let output = run(&dir, &["apply", "mon", "09:00-12:00", "10:00-13:00"]);
    assert_eq!(output.status.code(), Some(1));

    let saved = fs::read_to_string(dir.join("schedule.json")).unwrap();
    assert_eq!(saved.matches("\"date\"").count(), 1);
    assert!(!saved.contains("\"day_of_week\""));

    let lines = stdout_lines(&run(&dir, &["day", "2024-05-07"]));
    assert!(lines.iter().any(|l| l.starts_with("09:30 | 10:30 | open")));
    assert!(!lines.iter().any(|l| l.starts_with("10:30")));
}

#[test]
fn zero_length_window_is_refused() {
    let dir = make_temp_dir("cli");
    let output = run(&dir, &["open", "2024-05-07", "23:59-23:59"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!dir.join("schedule.json").exists());
}

#[test]
fn grid_edit_saves_weekly_hours() {
    let dir = make_temp_dir("cli");
    run(&dir, &["config", "SLOT_MINUTES", "60"]);
    let output = run(&dir, &["grid", "mon,fri", "09:00-12:00"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout_lines(&output)
        .iter()
        .any(|l| l == "Weekly hours for Monday set to 09:00 - 12:00"));

    let output = run(&dir, &["check", "2024-05-10 09:00", "2024-05-10 12:00"]);
    assert!(output.status.success());
    let output = run(&dir, &["check", "2024-05-07 09:00", "2024-05-07 10:00"]);
    assert_eq!(output.status.code(), Some(2));
}
