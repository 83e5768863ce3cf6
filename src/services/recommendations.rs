use std::sync::Arc;

use chrono::Utc;

use crate::{
    error::AppResult,
    models::{PlaceFilters, RecommendationBatch},
    services::{
        completion::CompletionClient,
        normalizer,
        prompt::{self, PromptMode},
    },
};

/// Runs one recommendation search end to end
///
/// Prompt building and normalization are synchronous pure transformations;
/// the completion call is the only suspending step. Each request builds its
/// own prompt and normalizes its own response, so concurrent requests share
/// no state. Failures at any stage surface unchanged; there is no retry.
pub async fn get_recommendations(
    client: Arc<dyn CompletionClient>,
    filters: PlaceFilters,
) -> AppResult<RecommendationBatch> {
    tracing::info!(
        budget = %filters.budget,
        activity = filters.activity.as_str(),
        period = filters.period.as_str(),
        distance = ?filters.distance,
        "Starting recommendation search"
    );

    // 1. Render the instruction block
    let user_prompt = prompt::build_prompt(&filters, PromptMode::Strict);

    // 2. Single upstream call
    let raw = client.complete(prompt::SYSTEM_PROMPT, &user_prompt).await?;

    tracing::debug!(preview = %raw.chars().take(300).collect::<String>(), "Raw completion");

    // 3. Normalize into the strict model
    let batch_ts = Utc::now().timestamp_millis();
    let places = normalizer::normalize(&raw, &filters, batch_ts)?;

    audit_distance_claims(&filters, &places);

    tracing::info!(total_found = places.len(), "Recommendation search completed");

    Ok(RecommendationBatch::new(places))
}

/// Logs claimed distances that contradict the requested band.
///
/// The band is enforced through the prompt contract only; the normalizer
/// never drops records. This audit makes contract violations visible.
fn audit_distance_claims(filters: &PlaceFilters, places: &[crate::models::Place]) {
    let Some(band) = filters.distance else {
        return;
    };

    for place in places {
        if let Some(km) = place.distance_km {
            if !band.contains(km) {
                tracing::warn!(
                    place = %place.name,
                    distance_km = km,
                    band = ?band,
                    "Place violates the requested distance band"
                );
            }
        }
    }
}
