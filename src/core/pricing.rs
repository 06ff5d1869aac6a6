use crate::core::interval::{Span, merge_spans, subtract};
use crate::core::resolver::RuleResolver;
use crate::core::validator::BookingRequest;
use crate::errors::{Error, Result};
use chrono::NaiveDate;

/// Priced piece of a booking: one date, one span, one hourly rate.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteLine {
    pub date: NaiveDate,
    pub span: Span,
    pub hourly_rate: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub lines: Vec<QuoteLine>,
    pub minutes: u32,
    pub total: f64,
}

/// Estimate the price of `request`. Minutes inside an open window with a
/// custom rate use that rate; every other minute uses `base_hourly_rate`.
pub fn quote(
    resolver: &RuleResolver,
    request: &BookingRequest,
    base_hourly_rate: f64,
) -> Result<Quote> {
    if !base_hourly_rate.is_finite() || base_hourly_rate < 0.0 {
        return Err(Error::config(format!(
            "Base hourly rate must be a non-negative number, got {base_hourly_rate}."
        )));
    }

    let mut lines = Vec::new();
    for segment in request.segments()? {
        let day = resolver.resolve(segment.date);
        let mut priced: Vec<Span> = Vec::new();

        for interval in day.available() {
            let Some(rate) = interval.rate else { continue };
            if let Some(piece) = interval.span.intersection(&segment.span) {
                lines.push(line(segment.date, piece, rate));
                priced.push(piece);
            }
        }
        for piece in subtract(&[segment.span], &merge_spans(&priced)) {
            lines.push(line(segment.date, piece, base_hourly_rate));
        }
    }

    lines.sort_by_key(|l| (l.date, l.span.start()));
    let minutes = lines.iter().map(|l| l.span.duration_minutes() as u32).sum();
    let total = lines.iter().map(|l| l.amount).sum();
    Ok(Quote {
        lines,
        minutes,
        total,
    })
}

fn line(date: NaiveDate, span: Span, hourly_rate: f64) -> QuoteLine {
    QuoteLine {
        date,
        span,
        hourly_rate,
        amount: hourly_rate * span.duration_minutes() as f64 / 60.0,
    }
}
