use chrono::NaiveDate;
use spotavail::core::grid::WeeklyGrid;
use spotavail::core::interval::{Interval, Span};
use spotavail::core::pricing::quote;
use spotavail::core::resolver::ScheduleSource;
use spotavail::core::schedule::DaySchedule;
use spotavail::core::store::{SpotSchedule, load_schedule, save_schedule};
use spotavail::core::types::{DayOfWeek, parse_local_datetime};
use spotavail::core::validator::{BookingRequest, ValidationResult, validate};
use spotavail::errors::Error;

use crate::common::{make_temp_dir, write_sample_schedule};

fn request(start: &str, end: &str) -> BookingRequest {
    BookingRequest::new(
        parse_local_datetime(start).unwrap(),
        parse_local_datetime(end).unwrap(),
    )
    .unwrap()
}

fn sample() -> SpotSchedule {
    let dir = make_temp_dir("scenario");
    write_sample_schedule(&dir);
    load_schedule(&dir.join("schedule.json")).unwrap()
}

#[test]
fn stored_schedule_resolves_each_kind_of_day() {
    let resolver = sample().resolver().unwrap();
    let day = |d| resolver.resolve(NaiveDate::from_ymd_opt(2024, 5, d).unwrap());

    assert_eq!(day(6).source, ScheduleSource::Recurring);
    assert!(day(7).is_blocked_all_day());
    assert_eq!(day(8).source, ScheduleSource::Override);
    assert_eq!(day(8).available_spans(), vec![Span::parse("18:00-24:00").unwrap()]);
    assert!(day(5).is_unset());
}

#[test]
fn sunday_without_rule_is_rejected_by_weekday() {
    let resolver = sample().resolver().unwrap();
    let result = validate(&resolver, &request("2024-05-05 10:00", "2024-05-05 12:00")).unwrap();
    assert_eq!(result.reason(), Some("not available on Sundays"));
}

#[test]
fn evening_override_accepts_booking_until_midnight() {
    let resolver = sample().resolver().unwrap();
    let result = validate(&resolver, &request("2024-05-08 20:00", "2024-05-09 00:00")).unwrap();
    assert_eq!(result, ValidationResult::Valid);

    // Daytime hours are gone on that date even though Wednesday has a rule.
    let result = validate(&resolver, &request("2024-05-08 10:00", "2024-05-08 11:00")).unwrap();
    assert!(!result.is_valid());
}

#[test]
fn evening_override_is_priced_at_its_own_rate() {
    let resolver = sample().resolver().unwrap();
    let q = quote(&resolver, &request("2024-05-08 18:00", "2024-05-08 20:30"), 1.0).unwrap();
    assert_eq!(q.minutes, 150);
    assert!((q.total - 15.0).abs() < 1e-9);
}

#[test]
fn host_edit_rejects_overlapping_block_before_saving() {
    let mut day = DaySchedule::new([Interval::open(Span::parse("09:30-10:30").unwrap())]);
    let err = day
        .try_add(Interval::open(Span::parse("10:00-11:00").unwrap()))
        .unwrap_err();
    assert!(matches!(err, Error::Overlap { .. }));
    assert_eq!(day.intervals().len(), 1);
}

#[test]
fn grid_edits_round_trip_through_the_store() {
    let dir = make_temp_dir("scenario");
    let mut grid = WeeklyGrid::new(30).unwrap();
    grid.set_span(DayOfWeek::Sat, &Span::parse("10:00-14:00").unwrap(), true)
        .unwrap();
    grid.set(DayOfWeek::Sat, 20, false).unwrap();

    let mut spot = SpotSchedule::new("grid-spot");
    spot.replace_recurring(&grid.to_schedule().unwrap());
    save_schedule(&spot, &dir.join("grid.json")).unwrap();

    let loaded = load_schedule(&dir.join("grid.json")).unwrap();
    let saturday = loaded
        .resolver()
        .unwrap()
        .resolve(NaiveDate::from_ymd_opt(2024, 5, 11).unwrap());
    assert_eq!(
        saturday.available_spans(),
        vec![Span::parse("10:30-14:00").unwrap()]
    );
}
