//! Fail-fast checks run before any remote call.

use tracing::instrument;
use wayfarer_core::{ModificationRequest, TravelStyle, TripRequest, parse_calendar_date};
use wayfarer_error::{ValidationError, ValidationErrorKind};

/// Shortest accepted trip, in days.
pub const MIN_DAYS: u32 = 1;
/// Longest accepted trip, in days.
pub const MAX_DAYS: u32 = 30;

/// Validate a trip request for initial generation.
///
/// Returns the effective day count on success.
///
/// # Examples
///
/// ```
/// use wayfarer_core::TripRequest;
/// use wayfarer_planner::validate_trip;
///
/// let trip: TripRequest = serde_json::from_str(
///     r#"{"destination":"Hampi","days":3,"interests":["ruins"]}"#,
/// ).unwrap();
/// assert_eq!(validate_trip(&trip).unwrap(), 3);
///
/// let too_long = TripRequest { days: Some(31), ..trip };
/// assert!(validate_trip(&too_long).is_err());
/// ```
#[instrument(skip_all)]
pub fn validate_trip(trip: &TripRequest) -> Result<u32, ValidationError> {
    if trip
        .destination
        .as_deref()
        .is_none_or(|destination| destination.trim().is_empty())
    {
        return Err(missing("destination"));
    }

    let dates = [
        ("dateRange.start", trip.date_range.as_ref().and_then(|r| r.start.as_deref())),
        ("dateRange.end", trip.date_range.as_ref().and_then(|r| r.end.as_deref())),
        ("startDate", trip.start_date.as_deref()),
        ("endDate", trip.end_date.as_deref()),
    ];
    for (field, value) in dates {
        if let Some(value) = value
            && parse_calendar_date(value).is_none()
        {
            return Err(ValidationError::new(ValidationErrorKind::InvalidDate {
                field: field.to_string(),
                value: value.to_string(),
            }));
        }
    }

    let days = trip.day_count().ok_or_else(|| missing("days"))?;
    if !(MIN_DAYS..=MAX_DAYS).contains(&days) {
        return Err(ValidationError::new(ValidationErrorKind::DaysOutOfRange {
            days,
            min: MIN_DAYS,
            max: MAX_DAYS,
        }));
    }

    if trip.travelers.is_some_and(|travelers| travelers.adults < 1) {
        return Err(ValidationError::new(ValidationErrorKind::NoTravelers));
    }

    if let Some(style) = trip.travel_style.as_deref()
        && style.trim().parse::<TravelStyle>().is_err()
    {
        return Err(ValidationError::new(
            ValidationErrorKind::InvalidTravelStyle(style.to_string()),
        ));
    }

    if trip.vibe_tags().all(|tag| tag.trim().is_empty()) {
        return Err(ValidationError::new(ValidationErrorKind::EmptyInterests));
    }

    Ok(days)
}

/// Validate a modification request.
#[instrument(skip_all)]
pub fn validate_modification(request: &ModificationRequest) -> Result<(), ValidationError> {
    if request.user_said().trim().is_empty() {
        return Err(ValidationError::new(ValidationErrorKind::MissingUtterance));
    }
    Ok(())
}

#[track_caller]
fn missing(field: &str) -> ValidationError {
    ValidationError::new(ValidationErrorKind::MissingField(field.to_string()))
}
