use axum::{extract::State, Extension, Json};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{
        ActivityType, Ambience, Budget, DistanceBand, Period, PlaceFilters, RecommendationBatch,
    },
    routes::AppState,
    services::recommendations,
};

/// Inbound recommendation request.
///
/// Every field is optional on the wire; `validate` enforces the mandatory
/// set so a missing field yields a 400 instead of a deserialization
/// rejection, and names what was missing.
#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub budget: Option<Budget>,
    #[serde(rename = "type")]
    pub activity: Option<ActivityType>,
    pub period: Option<Period>,
    #[serde(rename = "ambiente")]
    pub ambience: Option<Ambience>,
    #[serde(rename = "distancia")]
    pub distance: Option<DistanceBand>,
    #[serde(rename = "temEstacionamento")]
    pub wants_parking: Option<bool>,
    #[serde(rename = "acessivel")]
    pub wants_accessible: Option<bool>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl RecommendationRequest {
    /// Checks the mandatory fields and produces the validated filter set
    pub fn validate(self) -> AppResult<PlaceFilters> {
        let mut missing = Vec::new();

        if self.budget.is_none() {
            missing.push("budget");
        }
        if self.activity.is_none() {
            missing.push("type");
        }
        if self.period.is_none() {
            missing.push("period");
        }
        if self.latitude.is_none() {
            missing.push("latitude");
        }
        if self.longitude.is_none() {
            missing.push("longitude");
        }

        if let (Some(budget), Some(activity), Some(period), Some(latitude), Some(longitude)) = (
            self.budget,
            self.activity,
            self.period,
            self.latitude,
            self.longitude,
        ) {
            Ok(PlaceFilters {
                budget,
                activity,
                period,
                ambience: self.ambience,
                distance: self.distance,
                wants_parking: self.wants_parking,
                wants_accessible: self.wants_accessible,
                latitude,
                longitude,
            })
        } else {
            Err(AppError::InvalidInput(format!(
                "Filtros incompletos: {}",
                missing.join(", ")
            )))
        }
    }
}

/// Handler for the recommendations endpoint
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationBatch>> {
    // Validation failures never reach the AI provider
    let filters = request.validate()?;

    tracing::info!(
        request_id = %request_id,
        budget = %filters.budget,
        activity = filters.activity.as_str(),
        period = filters.period.as_str(),
        ambience = ?filters.ambience,
        distance = ?filters.distance,
        wants_parking = ?filters.wants_parking,
        wants_accessible = ?filters.wants_accessible,
        "Processing recommendation request"
    );

    let batch = recommendations::get_recommendations(state.completion_client.clone(), filters)
        .await?;

    tracing::info!(
        request_id = %request_id,
        total_found = batch.total_found,
        "Recommendation request completed"
    );

    Ok(Json(batch))
}
