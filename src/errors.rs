use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Every failure the crate can report. Validation outcomes ("this booking is
/// outside the host's hours") are not errors; see `core::validator`.
#[derive(Error, Debug)]
pub enum Error {
    // ---- Interval model -----------------------------------------------------
    /// Malformed interval: `start >= end`, or a bound outside `[0, 1440]`.
    #[error("Invalid interval [{start}, {end}): {reason}")]
    InvalidInterval {
        start: u16,
        end: u16,
        reason: &'static str,
    },

    /// A new host block collides with one already on the day.
    #[error("Time block {new} overlaps existing block {existing}.")]
    Overlap { new: String, existing: String },

    // ---- Resolver / validator -----------------------------------------------
    /// Day-of-week index outside 0 (Sunday) ..= 6 (Saturday).
    #[error("Unknown day of week: {0}. Expected 0 (Sunday) through 6 (Saturday).")]
    UnknownDay(i64),

    /// Booking request whose end is not after its start.
    #[error("Invalid booking request: {0}")]
    InvalidRequest(String),

    // ---- Parsing ------------------------------------------------------------
    #[error("Parse error: {0}")]
    Parse(String),

    // ---- Config -------------------------------------------------------------
    #[error("Config error: {0}")]
    Config(String),

    // ---- Plumbing -----------------------------------------------------------
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Error::Parse(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    pub fn invalid_interval(start: u16, end: u16, reason: &'static str) -> Self {
        Error::InvalidInterval { start, end, reason }
    }
}

/// Map an `Option<T>` into `Result<T, Error::Parse>` with a custom message.
pub fn require_parse<T, S: Into<String>>(opt: Option<T>, msg: S) -> Result<T> {
    opt.ok_or_else(|| Error::Parse(msg.into()))
}
