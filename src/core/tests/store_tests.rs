use super::{blocked_on, monday, rule, span, tuesday};
use crate::core::schedule::DateOverride;
use crate::core::resolver::ScheduleSource;
use crate::core::store::{SpotSchedule, load_schedule, save_schedule};
use crate::core::types::DayOfWeek;
use crate::errors::Error;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

static COUNTER: AtomicUsize = AtomicUsize::new(0);

fn temp_path(name: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let uniq = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir()
        .join(format!("spotavail-store-{nanos}-{uniq}"))
        .join(name)
}

#[test]
fn save_then_load_keeps_rules_and_overrides() {
    let mut schedule = SpotSchedule::new("spot-42");
    schedule.rules.push(rule(DayOfWeek::Tue, "09:00", "17:00"));
    schedule.push_override(blocked_on(tuesday())).unwrap();

    let path = temp_path("schedule.json");
    let written = save_schedule(&schedule, &path).unwrap();
    assert_eq!(written, path);

    let loaded = load_schedule(&path).unwrap();
    assert_eq!(loaded, schedule);
    let day = loaded.resolver().unwrap().resolve(tuesday());
    assert_eq!(day.source, ScheduleSource::Override);
}

#[test]
fn missing_file_is_reported() {
    let err = load_schedule(&temp_path("absent.json")).unwrap_err();
    assert!(matches!(err, Error::Parse(ref m) if m.contains("not found")));
}

#[test]
fn rows_are_checked_on_load() {
    let path = temp_path("bad.json");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(
        &path,
        r#"{ "spot_id": "x", "rules": [
            { "day_of_week": 9, "start_time": "09:00", "end_time": "10:00" }
        ] }"#,
    )
    .unwrap();
    assert!(matches!(load_schedule(&path).unwrap_err(), Error::UnknownDay(9)));
}

#[test]
fn malformed_json_is_a_json_error() {
    let path = temp_path("garbage.json");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(load_schedule(&path).unwrap_err(), Error::Json(_)));
}

#[test]
fn missing_sections_default_to_empty() {
    let schedule: SpotSchedule = serde_json::from_str(r#"{ "spot_id": "lot-7" }"#).unwrap();
    assert!(schedule.rules.is_empty());
    assert!(schedule.overrides.is_empty());
    assert!(!schedule.resolver().unwrap().has_any_schedule());
}

#[test]
fn push_override_rejects_half_windows() {
    let mut schedule = SpotSchedule::new("spot");
    let mut row = blocked_on(tuesday());
    row.start_time = Some(super::t("09:00"));
    assert!(schedule.push_override(row).is_err());
    assert!(schedule.overrides.is_empty());
}

#[test]
fn replace_recurring_swaps_rules_only() {
    let mut schedule = SpotSchedule::new("spot");
    schedule.rules.push(rule(DayOfWeek::Mon, "08:00", "09:00"));
    schedule.push_override(blocked_on(tuesday())).unwrap();

    let mut next = schedule.recurring().unwrap();
    next.set_day(DayOfWeek::Mon, Default::default());
    schedule.replace_recurring(&next);
    assert!(schedule.rules.is_empty());
    assert_eq!(schedule.overrides.len(), 1);
}

#[test]
fn push_override_rejects_overlapping_window_on_same_date() {
    let mut schedule = SpotSchedule::new("spot");
    schedule
        .push_override(DateOverride::window(tuesday(), span("09:30", "10:30"), true))
        .unwrap();

    let err = schedule
        .push_override(DateOverride::window(tuesday(), span("10:00", "11:00"), true).with_rate(5.0))
        .unwrap_err();
    match err {
        Error::Overlap { new, existing } => {
            assert_eq!(new, "10:00 - 11:00");
            assert_eq!(existing, "09:30 - 10:30");
        }
        other => panic!("expected overlap error, got {other:?}"),
    }
    assert_eq!(schedule.overrides.len(), 1);
}

#[test]
fn push_override_allows_touching_windows_and_other_dates() {
    let mut schedule = SpotSchedule::new("spot");
    schedule
        .push_override(DateOverride::window(tuesday(), span("09:00", "10:00"), true))
        .unwrap();
    schedule
        .push_override(DateOverride::window(tuesday(), span("10:00", "11:00"), false))
        .unwrap();
    schedule.push_override(blocked_on(monday())).unwrap();
    assert_eq!(schedule.overrides.len(), 3);

    // A whole-day row collides with any window already on the date.
    assert!(matches!(
        schedule.push_override(blocked_on(tuesday())).unwrap_err(),
        Error::Overlap { .. }
    ));
}
