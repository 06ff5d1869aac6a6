use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn binary_path() -> String {
    let raw = PathBuf::from(env!("CARGO_BIN_EXE_spotavail"));
    if raw.is_absolute() {
        return raw.to_string_lossy().to_string();
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join(raw)
        .to_string_lossy()
        .to_string()
}

static COUNTER: AtomicUsize = AtomicUsize::new(0);

pub fn make_temp_dir(prefix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "spotavail-{prefix}-{}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Weekday 09:00-17:00 Monday to Friday, Tuesday 2024-05-07 blocked, and
/// an evening window with a custom rate on Wednesday 2024-05-08.
pub fn write_sample_schedule(dir: &PathBuf) {
    let json = r#"{
  "spot_id": "spot-1",
  "rules": [
    { "day_of_week": 1, "start_time": "09:00", "end_time": "17:00" },
    { "day_of_week": 2, "start_time": "09:00", "end_time": "17:00" },
    { "day_of_week": 3, "start_time": "09:00", "end_time": "17:00" },
    { "day_of_week": 4, "start_time": "09:00", "end_time": "17:00" },
    { "day_of_week": 5, "start_time": "09:00", "end_time": "17:00" }
  ],
  "overrides": [
    { "date": "2024-05-07", "is_available": false, "start_time": null, "end_time": null },
    { "date": "2024-05-08", "is_available": true, "start_time": "18:00", "end_time": "23:59", "custom_rate": 6.0 }
  ]
}"#;
    fs::write(dir.join("schedule.json"), json).unwrap();
}

/// Run the binary inside `dir` with its files pointed at `dir`.
pub fn run(dir: &PathBuf, args: &[&str]) -> Output {
    Command::new(binary_path())
        .current_dir(dir)
        .args(["--config", "config.json", "--schedule", "schedule.json", "--logs", "logs"])
        .args(args)
        .stdin(Stdio::null())
        .output()
        .expect("failed to run binary")
}

pub fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

pub fn read_log_contents(dir: &PathBuf) -> Option<String> {
    let mut entries = fs::read_dir(dir.join("logs")).ok()?;
    let entry = entries.find_map(|e| e.ok())?;
    fs::read_to_string(entry.path()).ok()
}
