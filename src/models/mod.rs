pub mod filters;
pub mod place;

pub use filters::{ActivityType, Ambience, Budget, DistanceBand, Period, PlaceFilters};
pub use place::{Place, RawRecommendation, RecommendationBatch};
