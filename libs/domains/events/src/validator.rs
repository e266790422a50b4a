//! Cross-field business rules for [`EventDto`].

use axum_helpers::BindingErrors;

use crate::models::{DATE_TIME_FORMAT, EventDto};

pub const WRONG_PRICES: &str = "wrongPrices";
pub const WRONG_DATE_VALUE: &str = "wrongDValue";

/// Applies the business rules to an input that already passed structural
/// validation. Every rule is evaluated; violations are added to the
/// accumulator rather than returned early.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventValidator;

impl EventValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, dto: &EventDto, errors: &mut BindingErrors) {
        if dto.base_price > dto.max_price && dto.max_price != 0 {
            errors.reject(WRONG_PRICES, "Values for prices are wrong");
        }

        // Absent timestamps are reported by structural validation
        if let Some(end) = dto.end_event_date_time {
            let ends_too_early = [
                dto.begin_event_date_time,
                dto.close_enrollment_date_time,
                dto.begin_enrollment_date_time,
            ]
            .into_iter()
            .flatten()
            .any(|other| end < other);

            if ends_too_early {
                errors.reject_value(
                    "endEventDateTime",
                    WRONG_DATE_VALUE,
                    "endEventDateTime is wrong",
                    Some(end.format(DATE_TIME_FORMAT).to_string()),
                );
            }
        }
    }
}
