use crate::core::resolver::EffectiveDayAvailability;
use crate::core::types::TimeFormat;
use crate::core::validator::{DaySegment, ValidationObserver};
use crate::extensions::chrono::NaiveDateExt;
use crate::logging::{LogTarget, Logger};

/// Traces every day a booking check touches at debug level.
pub struct LoggingObserver<'a> {
    logger: &'a Logger,
    style: TimeFormat,
}

impl<'a> LoggingObserver<'a> {
    pub fn new(logger: &'a Logger, style: TimeFormat) -> Self {
        Self { logger, style }
    }
}

impl ValidationObserver for LoggingObserver<'_> {
    fn segment_checked(&self, segment: &DaySegment, day: &EffectiveDayAvailability, covered: bool) {
        self.logger.debug(
            format!(
                "check {} {} against {} hours [{}]: {}",
                segment.date.iso(),
                segment.span.format(self.style),
                day.source,
                day.summary(self.style),
                if covered { "covered" } else { "not covered" }
            ),
            LogTarget::ConsoleAndFile,
        );
    }
}
