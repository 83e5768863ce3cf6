use std::sync::Arc;

use rand::Rng;

use crate::models::{Place, PlaceFilters};

pub mod transport;

pub use transport::{HttpTransport, RecommendationTransport, TransportError};

/// Fallback coordinates (São Luís, MA) for when device location is
/// unavailable; callers substitute these instead of failing the search.
pub const DEFAULT_LATITUDE: f64 = -2.5307;
pub const DEFAULT_LONGITUDE: f64 = -44.3068;

pub fn default_location() -> (f64, f64) {
    (DEFAULT_LATITUDE, DEFAULT_LONGITUDE)
}

/// Lifecycle of the last search
#[derive(Debug, Clone, PartialEq)]
pub enum SearchState {
    Idle,
    Loading,
    Succeeded(Vec<Place>),
    Failed(String),
}

/// Holds the result state of the most recent search and drives new ones.
///
/// One logical request in flight per controller: `search_places` clears
/// the previous batch the moment a new search starts, so stale results
/// never render while loading. A new batch fully replaces the old one.
pub struct SearchController {
    transport: Arc<dyn RecommendationTransport>,
    state: SearchState,
}

impl SearchController {
    pub fn new(transport: Arc<dyn RecommendationTransport>) -> Self {
        Self {
            transport,
            state: SearchState::Idle,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Places from the last successful search, empty otherwise
    pub fn places(&self) -> &[Place] {
        match &self.state {
            SearchState::Succeeded(places) => places,
            _ => &[],
        }
    }

    /// Error message from the last failed search, if any
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            SearchState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Runs one search, replacing whatever state was there before
    pub async fn search_places(&mut self, filters: &PlaceFilters) {
        self.state = SearchState::Loading;

        self.state = match self.transport.fetch_recommendations(filters).await {
            Ok(batch) => SearchState::Succeeded(batch.places),
            Err(err) => SearchState::Failed(err.to_string()),
        };
    }

    /// Resets to idle with no results and no error; never touches the network
    pub fn clear_places(&mut self) {
        self.state = SearchState::Idle;
    }

    /// Picks an arbitrary place from the last batch ("surprise me")
    pub fn random_place(&self) -> Option<&Place> {
        let places = self.places();
        if places.is_empty() {
            return None;
        }
        let idx = rand::rng().random_range(0..places.len());
        places.get(idx)
    }
}
