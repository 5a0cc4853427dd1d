//! Structured trip request supplied by the caller.

use crate::days_between;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Supported budget tiers for the `travelStyle` field.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TravelStyle {
    Budget,
    Moderate,
    Luxury,
}

/// Inclusive travel window as received on the wire.
///
/// Dates stay as strings: an unparseable date is not a deserialization error,
/// it just makes the duration unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of travel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    /// Last day of travel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

/// Travel party composition.
///
/// Accepts either a plain head count (`3`) or `{ "adults": 2, "children": 1 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TravelersRepr")]
pub struct Travelers {
    /// Adults in the party
    pub adults: u32,
    /// Children in the party
    pub children: u32,
}

impl Travelers {
    /// Total number of people travelling.
    pub fn total(&self) -> u32 {
        self.adults.saturating_add(self.children)
    }
}

impl Default for Travelers {
    fn default() -> Self {
        Self {
            adults: 1,
            children: 0,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TravelersRepr {
    Count(u32),
    Party {
        #[serde(default = "default_adults")]
        adults: u32,
        #[serde(default)]
        children: u32,
    },
}

fn default_adults() -> u32 {
    1
}

impl From<TravelersRepr> for Travelers {
    fn from(repr: TravelersRepr) -> Self {
        match repr {
            TravelersRepr::Count(adults) => Self {
                adults,
                children: 0,
            },
            TravelersRepr::Party { adults, children } => Self { adults, children },
        }
    }
}

/// Budget descriptor: free text ("₹60,000", "mid-range") or a bare number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Budget {
    Amount(f64),
    Text(String),
}

impl std::fmt::Display for Budget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Budget::Amount(amount) => write!(f, "{}", amount),
            Budget::Text(text) => write!(f, "{}", text),
        }
    }
}

/// A single preference entry: one value or a list of values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PreferenceValue {
    One(String),
    Many(Vec<String>),
}

impl std::fmt::Display for PreferenceValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreferenceValue::One(value) => write!(f, "{}", value),
            PreferenceValue::Many(values) => write!(f, "{}", values.join(", ")),
        }
    }
}

/// Structured description of a desired itinerary.
///
/// Every field is optional on the wire; which ones are required is decided by
/// the planner's validation step, not by deserialization.
///
/// # Examples
///
/// ```
/// use wayfarer_core::TripRequest;
///
/// let trip: TripRequest = serde_json::from_str(
///     r#"{"destination":"Lisbon","dateRange":{"start":"2025-01-01","end":"2025-01-05"}}"#,
/// ).unwrap();
/// assert_eq!(trip.day_count(), Some(4));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    /// Flat start date, used when no `dateRange` is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Flat end date, paired with `startDate`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// Explicit day count; takes precedence over the date range
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travelers: Option<Travelers>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<Budget>,
    /// Budget tier: budget, moderate, or luxury
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_style: Option<String>,
    /// Free-form trip type, e.g. "honeymoon" or "solo backpacking"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub travel_vibe: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interests: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub must_visit_places: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub preferences: BTreeMap<String, PreferenceValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pace: Option<String>,
    /// Accommodation preference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accommodation: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dietary_restrictions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
}

impl TripRequest {
    /// Effective day count: the explicit `days` field, else derived from the
    /// date range.
    pub fn day_count(&self) -> Option<u32> {
        self.days.or_else(|| self.derived_days())
    }

    /// Day count derived from the dates alone.
    pub fn derived_days(&self) -> Option<u32> {
        days_between(self.start()?, self.end()?)
    }

    /// Vibe tags followed by interests, in the order given.
    pub fn vibe_tags(&self) -> impl Iterator<Item = &str> {
        self.travel_vibe
            .iter()
            .chain(self.interests.iter())
            .map(String::as_str)
    }

    /// Trip start: the date range start, else the flat start date.
    pub fn start(&self) -> Option<&str> {
        self.date_range
            .as_ref()
            .and_then(|range| range.start.as_deref())
            .or(self.start_date.as_deref())
    }

    /// Trip end: the date range end, else the flat end date.
    pub fn end(&self) -> Option<&str> {
        self.date_range
            .as_ref()
            .and_then(|range| range.end.as_deref())
            .or(self.end_date.as_deref())
    }

    /// Copy of the request with free-text special requests removed.
    pub fn sanitized(&self) -> Self {
        Self {
            special_requests: None,
            ..self.clone()
        }
    }
}
