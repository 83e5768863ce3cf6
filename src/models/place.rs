use serde::{Deserialize, Serialize};

use crate::models::filters::{ActivityType, Budget, Period};

/// City the recommendations are scoped to, appended to map queries
pub const CITY_STATE: &str = "São Luís MA";

/// Marker tags attached to every AI-sourced place
pub const TAG_ROMANTIC: &str = "romântico";
pub const TAG_AI_RECOMMENDED: &str = "perplexity-recomendado";

/// Sentinel defaults applied when the AI omits a field
pub const DEFAULT_NAME: &str = "Lugar sem nome";
pub const DEFAULT_DESCRIPTION: &str = "Descrição não disponível";
pub const DEFAULT_ADDRESS: &str = "São Luís, MA";
pub const DEFAULT_ACTIVITY: &str = "Aproveitem juntos";
pub const DEFAULT_OPENING_HOURS: &str = "Consultar horários";

/// One recommended venue, as returned to the client.
///
/// Immutable once constructed by the normalizer; a new search fully
/// replaces the previous batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    /// Unique within one response batch (batch timestamp + ordinal)
    pub id: String,
    pub name: String,
    pub description: String,
    pub address: String,
    /// Google Maps search link derived from name + address
    pub map_url: String,
    pub budget: Budget,
    #[serde(rename = "type")]
    pub activity: ActivityType,
    pub period: Period,
    pub tags: Vec<String>,
    pub image_url: String,
    /// 0-5, where 0 means unrated
    pub rating: f64,
    pub suggested_activity: String,
    pub opening_hours: String,
    pub special_tip: String,
    pub ai_recommended: bool,
    #[serde(rename = "temEstacionamento")]
    pub has_parking: bool,
    #[serde(rename = "acessivel")]
    pub accessible: bool,
    pub cuisine_type: Option<String>,
    pub distance_km: Option<f64>,
    pub price_range: Option<String>,
}

/// Full result set of one search request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationBatch {
    pub places: Vec<Place>,
    pub total_found: usize,
    pub source: String,
}

/// Source label attached to every batch
pub const BATCH_SOURCE: &str = "perplexity-search";

impl RecommendationBatch {
    pub fn new(places: Vec<Place>) -> Self {
        Self {
            total_found: places.len(),
            places,
            source: BATCH_SOURCE.to_string(),
        }
    }
}

/// Raw record inside the AI's `recommendations` array.
///
/// Everything is optional: the normalizer fills defaults rather than
/// dropping records.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecommendation {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub neighborhood: Option<String>,
    #[serde(default)]
    pub price_range: Option<String>,
    #[serde(default)]
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub cuisine_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub opening_hours: Option<String>,
    #[serde(default)]
    pub romantic_activity: Option<String>,
    #[serde(default)]
    pub special_tip: Option<String>,
    #[serde(rename = "temEstacionamento", default)]
    pub has_parking: Option<bool>,
    #[serde(rename = "acessivel", default)]
    pub accessible: Option<bool>,
}

/// Builds the Google Maps search link for a venue
pub fn map_url(name: &str, address: &str) -> String {
    let query = format!("{} {} {}", name, address, CITY_STATE);
    format!(
        "https://maps.google.com/maps?q={}",
        urlencoding::encode(&query)
    )
}
