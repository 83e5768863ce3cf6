use std::sync::LazyLock;

use regex::Regex;

use crate::{
    error::{AppError, AppResult},
    models::{
        place::{
            self, DEFAULT_ACTIVITY, DEFAULT_ADDRESS, DEFAULT_DESCRIPTION, DEFAULT_NAME,
            DEFAULT_OPENING_HOURS, TAG_AI_RECOMMENDED, TAG_ROMANTIC,
        },
        Place, PlaceFilters, RawRecommendation,
    },
};

/// Bracketed citation markers the search model leaves in free text:
/// "[1]", "[2, 3]", optionally preceded by whitespace.
static CITATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\[\d+(,\s*\d+)*\]").expect("valid regex"));

/// Converts one raw completion text into the strict place list.
///
/// Never partially applied: either every record normalizes or the whole
/// call fails. Records are never dropped here — business-constraint
/// filtering (distance, price) is the prompt contract's job.
pub fn normalize(
    raw: &str,
    filters: &PlaceFilters,
    batch_timestamp_ms: i64,
) -> AppResult<Vec<Place>> {
    let parsed = parse_tolerant(raw)?;

    let recommendations = parsed
        .get("recommendations")
        .and_then(|v| v.as_array())
        .ok_or_else(|| {
            AppError::MalformedResponse("response is missing a recommendations array".to_string())
        })?;

    let places = recommendations
        .iter()
        .enumerate()
        .map(|(idx, value)| {
            let raw_rec: RawRecommendation =
                serde_json::from_value(value.clone()).unwrap_or_default();
            build_place(raw_rec, filters, batch_timestamp_ms, idx)
        })
        .collect();

    Ok(places)
}

/// Strict JSON parse, falling back to the outermost `{...}` slice when the
/// model wrapped the payload in prose.
fn parse_tolerant(raw: &str) -> AppResult<serde_json::Value> {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(raw) {
        return Ok(value);
    }

    let start = raw.find('{');
    let end = raw.rfind('}');
    if let (Some(start), Some(end)) = (start, end) {
        if start < end {
            if let Ok(value) = serde_json::from_str::<serde_json::Value>(&raw[start..=end]) {
                return Ok(value);
            }
        }
    }

    Err(AppError::MalformedResponse(
        "response does not contain valid JSON".to_string(),
    ))
}

/// Removes citation markers and trims the result
fn strip_citations(text: &str) -> String {
    CITATION_RE.replace_all(text, "").trim().to_string()
}

fn build_place(
    raw: RawRecommendation,
    filters: &PlaceFilters,
    batch_timestamp_ms: i64,
    idx: usize,
) -> Place {
    let name = raw
        .name
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_NAME.to_string());
    let address = raw
        .address
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_ADDRESS.to_string());

    let description = strip_citations(raw.description.as_deref().unwrap_or(DEFAULT_DESCRIPTION));
    let suggested_activity =
        strip_citations(raw.romantic_activity.as_deref().unwrap_or(DEFAULT_ACTIVITY));
    let special_tip = strip_citations(raw.special_tip.as_deref().unwrap_or(""));

    let mut tags = vec![TAG_ROMANTIC.to_string(), TAG_AI_RECOMMENDED.to_string()];
    let cuisine_type = raw.cuisine_type.filter(|s| !s.is_empty());
    if let Some(ref cuisine) = cuisine_type {
        tags.push(cuisine.to_lowercase());
    }

    Place {
        id: format!("pplx-{}-{}", batch_timestamp_ms, idx),
        map_url: place::map_url(&name, &address),
        name,
        description,
        address,
        budget: filters.budget,
        activity: filters.activity,
        period: filters.period,
        tags,
        image_url: String::new(),
        rating: raw.rating.unwrap_or(0.0).clamp(0.0, 5.0),
        suggested_activity,
        opening_hours: raw
            .opening_hours
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_OPENING_HOURS.to_string()),
        special_tip,
        ai_recommended: true,
        has_parking: raw.has_parking.unwrap_or(false),
        accessible: raw.accessible.unwrap_or(false),
        cuisine_type,
        distance_km: raw.distance_km,
        // The model often omits priceRange; the requested budget is the
        // best available estimate in that case.
        price_range: raw
            .price_range
            .filter(|s| !s.is_empty())
            .or_else(|| Some(filters.budget.as_str().to_string())),
    }
}
