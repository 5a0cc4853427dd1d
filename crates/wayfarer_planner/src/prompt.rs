//! Prompt construction.
//!
//! Both builders are pure: no I/O, no failure for missing optional fields,
//! and identical input always yields byte-identical output. Every absent
//! field is rendered with an explicit placeholder so the model never sees a
//! silent gap.

use serde::Serialize;
use tracing::instrument;
use wayfarer_core::{ModificationRequest, TripDuration, Travelers, TripRequest};

const NOT_SPECIFIED: &str = "Not specified";
const NONE_SPECIFIED: &str = "None specified";

/// Exact shape the model must return for an initial itinerary.
const ITINERARY_FORMAT: &str = r#"{
  "summary": "Brief 2–3 sentence overview of the trip",
  "destination": "Destination name",
  "duration": "X days",
  "totalBudget": "Approx total budget (e.g., ₹60,000 or $800)",
  "budgetBreakdown": {
    "transportation": "₹10,000",
    "accommodation": "₹20,000",
    "food": "₹12,000",
    "activities": "₹10,000",
    "miscellaneous": "₹8,000"
  },
  "itineraryTable": [
    {
      "day": 1,
      "theme": "Short theme or vibe of the day",
      "rows": [
        {
          "time": "9:00 AM",
          "activity": "Activity title",
          "description": "Detailed description of the activity",
          "distance": "Aut to Jibhi: 30 kms (or 'Starting point' for first activity)",
          "pricing": "₹500 per person (or 'Free' or 'Included')"
        }
      ],
      "meals": {
        "breakfast": "Cafe Name - Recommended dish (₹X per person)",
        "lunch": "Restaurant Name - Recommended dish (₹X per person)",
        "dinner": "Restaurant Name - Recommended dish (₹X per person)"
      },
      "accommodation": "Stay Name - Brief description, Rating: 4.7/5, ₹X per night",
      "dailyCost": "₹X,XXX"
    }
  ],
  "expenseSummary": {
    "perPersonBreakdown": {
      "transportation": {
        "amount": "₹10,000",
        "details": ["Flight tickets: ₹8,000", "Local taxi/cab: ₹1,500", "Auto-rickshaw: ₹500"]
      },
      "accommodation": {
        "amount": "₹20,000",
        "details": ["Hotel Day 1-2: ₹8,000", "Homestay Day 3-4: ₹6,000", "Resort Day 5-6: ₹6,000"]
      },
      "food": {
        "amount": "₹12,000",
        "details": ["Breakfast (6 days): ₹3,000", "Lunch (6 days): ₹4,500", "Dinner (6 days): ₹4,500"]
      },
      "activities": {
        "amount": "₹10,000",
        "details": ["Museum entry: ₹500", "Guided tour: ₹2,500", "Adventure activity: ₹4,000", "Shopping: ₹3,000"]
      },
      "miscellaneous": {
        "amount": "₹3,000",
        "details": ["Tips: ₹1,000", "Souvenirs: ₹1,000", "Emergency fund: ₹1,000"]
      }
    },
    "totalPerPerson": "₹55,000",
    "totalForGroup": "₹1,10,000 (for 2 adults)",
    "costSavingTips": [
      "Book flights 2-3 months in advance for 20-30% savings",
      "Use public transport where possible",
      "Eat at local restaurants instead of hotel dining"
    ]
  },
  "localTips": [
    "Short cultural or local tip related to the area",
    "Another helpful tip for travelers"
  ],
  "totalEstimatedCost": "₹XX,XXX (sum ensuring it fits the budget)"
}"#;

/// Shape of an updated itinerary in modification mode.
const MODIFIED_FORMAT: &str = r#"{
  "summary": "Updated summary reflecting changes",
  "destination": "...",
  "duration": "...",
  "totalBudget": "...",
  "budgetBreakdown": { ... },
  "itineraryTable": [ ... ],
  "expenseSummary": { ... },
  "localTips": [ ... ],
  "totalEstimatedCost": "...",
  "modificationsApplied": ["Change 1", "Change 2"]
}"#;

/// Shape of a plain-text answer in modification mode.
const TEXT_RESPONSE_FORMAT: &str = r#"{
  "isTextResponse": true,
  "message": "Your answer here explaining something about the itinerary"
}"#;

/// Render the prompt for a fresh itinerary.
///
/// # Examples
///
/// ```
/// use wayfarer_core::TripRequest;
/// use wayfarer_planner::build_initial_prompt;
///
/// let trip = TripRequest { destination: Some("Manali".into()), ..Default::default() };
/// let prompt = build_initial_prompt(&trip);
/// assert!(prompt.contains("- Destination: Manali"));
/// assert!(prompt.contains("- Duration: unknown"));
/// assert_eq!(prompt, build_initial_prompt(&trip));
/// ```
#[instrument(skip_all)]
pub fn build_initial_prompt(trip: &TripRequest) -> String {
    let details = trip_details(trip);

    format!(
        r#"You are an expert travel planner and experience designer.
Generate a **detailed, budget-friendly, realistic travel itinerary**.

## USER DETAILS
{details}

## TASK
Create a personalized itinerary that:
- Feels natural, location-accurate, and stays within the given budget.
- Keeps a realistic pace: group nearby attractions and leave time to travel between them.
- Mentions actual distances (e.g., "5.4 km from Hotel Sunrise to City Palace").
- Includes food spots by name (restaurants/cafes with cuisine type & price).
- Suggests boutique or homestay options with details.
- Adds daily activity breakdowns and total daily costs.
- Ensures **total estimated cost fits the overall budget**.
- Covers every must-visit place listed above.
- Provides local tips and insights.
- **INCLUDES A COMPREHENSIVE EXPENSE SUMMARY** at the end with detailed breakdown.

If you cannot generate valid JSON for any reason, respond with: {{}}

## OUTPUT FORMAT (strict JSON only - MUST match this exact structure)
{ITINERARY_FORMAT}

CRITICAL RULES:
1. "meals" object must have simple string values for breakfast/lunch/dinner
2. "accommodation" must be a simple string
3. "dailyCost" must be included for each day
4. All arrays must contain at least one item
5. "expenseSummary" is MANDATORY with complete breakdown
6. Include specific line items in details arrays for transparency
7. Return ONLY valid JSON: no markdown, no code fences, no commentary
"#
    )
}

/// Render the prompt for editing an existing itinerary.
///
/// Embeds the current itinerary, the original trip context, the most recent
/// conversation turns, and the user's words verbatim.
#[instrument(skip_all)]
pub fn build_modification_prompt(request: &ModificationRequest) -> String {
    let itinerary = pretty(request.current_itinerary());
    let context = pretty(request.context());
    let history = pretty(&request.recent_history());
    let user_said = request.user_said();

    format!(
        r#"You are an expert travel planner. A user has an existing itinerary and wants to modify it.

## CURRENT ITINERARY
{itinerary}

## ORIGINAL TRIP DETAILS
{context}

## CONVERSATION HISTORY (last 10 messages)
{history}

## USER'S MODIFICATION REQUEST
"{user_said}"

## YOUR TASK
Understand what the user wants to change and generate an UPDATED itinerary that:
1. **Preserves unchanged elements** from the original itinerary
2. **Modifies only what the user requested** (e.g., "add a museum on day 2", "change budget to ₹50,000", "remove adventure activities")
3. **Maintains the same JSON structure** as the original
4. **Recalculates costs** if budget/activities change
5. **Keeps it realistic and accurate**

Common modification types to detect:
- Budget changes: "reduce budget", "I have more money", "make it cheaper"
- Activity changes: "add", "remove", "replace", "skip", "include more"
- Day-specific changes: "on day 2", "first day", "last day"
- Preference changes: "more adventure", "less shopping", "vegetarian options"
- Accommodation changes: "better hotels", "budget stays", "luxury resorts"
- Time changes: "add one more day", "reduce to 5 days"

If the request is a simple question (not a modification), respond with a text explanation in this format:
{TEXT_RESPONSE_FORMAT}

Otherwise, return the FULL UPDATED ITINERARY in the same JSON structure with all fields:
{MODIFIED_FORMAT}

CRITICAL: Return ONLY valid JSON, no extra text.
"#
    )
}

/// Labeled, human-readable block restating every trip field.
fn trip_details(trip: &TripRequest) -> String {
    let duration = TripDuration::from(trip.day_count());

    let preferences = if trip.preferences.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        trip.preferences
            .iter()
            .map(|(key, value)| format!("{}: {}", key, value))
            .collect::<Vec<_>>()
            .join("; ")
    };

    [
        format!("- Destination: {}", or_placeholder(trip.destination.as_deref(), NOT_SPECIFIED)),
        format!(
            "- Travel Dates: {} → {}",
            trip.start().unwrap_or("?"),
            trip.end().unwrap_or("?")
        ),
        format!("- Duration: {}", render_duration(duration)),
        format!("- Travel Type: {}", or_placeholder(trip.travel_type.as_deref(), NOT_SPECIFIED)),
        format!("- Travel Style: {}", or_placeholder(trip.travel_style.as_deref(), NOT_SPECIFIED)),
        format!("- Travelers: {}", render_travelers(trip.travelers)),
        format!(
            "- Expected Budget: {}",
            trip.budget
                .as_ref()
                .map_or_else(|| "Flexible / Not specified".to_string(), ToString::to_string)
        ),
        format!("- Travel Vibe: {}", join_or(trip.vibe_tags(), NOT_SPECIFIED)),
        format!(
            "- Must Visit Places: {}",
            join_or(trip.must_visit_places.iter().map(String::as_str), NONE_SPECIFIED)
        ),
        format!("- Preferences: {}", preferences),
        format!("- Pace: {}", or_placeholder(trip.pace.as_deref(), NOT_SPECIFIED)),
        format!(
            "- Accommodation Preference: {}",
            or_placeholder(trip.accommodation.as_deref(), NOT_SPECIFIED)
        ),
        format!(
            "- Dietary Restrictions: {}",
            join_or(trip.dietary_restrictions.iter().map(String::as_str), NONE_SPECIFIED)
        ),
        format!(
            "- Special Requests: {}",
            or_placeholder(trip.special_requests.as_deref(), NONE_SPECIFIED)
        ),
    ]
    .join("\n")
}

fn or_placeholder<'a>(value: Option<&'a str>, placeholder: &'a str) -> &'a str {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => text,
        _ => placeholder,
    }
}

fn join_or<'a>(values: impl Iterator<Item = &'a str>, placeholder: &str) -> String {
    let values: Vec<&str> = values
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .collect();
    if values.is_empty() {
        placeholder.to_string()
    } else {
        values.join(", ")
    }
}

fn render_duration(duration: TripDuration) -> String {
    match duration {
        TripDuration::Days(1) => "1 day".to_string(),
        TripDuration::Days(days) => format!("{} days", days),
        TripDuration::Unknown => duration.to_string(),
    }
}

fn render_travelers(travelers: Option<Travelers>) -> String {
    let Some(travelers) = travelers else {
        return "1 adult (not specified)".to_string();
    };
    let adults = match travelers.adults {
        1 => "1 adult".to_string(),
        n => format!("{} adults", n),
    };
    let children = match travelers.children {
        1 => "1 child".to_string(),
        n => format!("{} children", n),
    };
    format!("{}, {}", adults, children)
}

fn pretty<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
}
