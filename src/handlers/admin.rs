use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::config::SeedCounts;
use crate::error::AppResult;
use crate::services::generator::DatasetSummary;
use crate::services::seeding;
use crate::AppState;

/// Overrides for the configured seed sizes.
#[derive(Debug, Default, Deserialize)]
pub struct SeedQuery {
    pub drivers: Option<u32>,
    pub riders: Option<u32>,
    pub rides: Option<u32>,
    pub zones: Option<u32>,
    pub rng_seed: Option<u64>,
}

impl SeedQuery {
    fn counts(&self, defaults: SeedCounts) -> SeedCounts {
        SeedCounts {
            drivers: self.drivers.unwrap_or(defaults.drivers),
            riders: self.riders.unwrap_or(defaults.riders),
            rides: self.rides.unwrap_or(defaults.rides),
            zones: self.zones.unwrap_or(defaults.zones),
        }
    }
}

/// Replace every collection with freshly generated demo data
pub async fn seed(
    State(state): State<AppState>,
    Query(query): Query<SeedQuery>,
) -> AppResult<Json<DatasetSummary>> {
    let counts = query.counts(state.config.seed_counts);
    let rng_seed = query.rng_seed.or(state.config.seed_rng);

    let summary = seeding::seed(&state.db, &counts, rng_seed).await?;
    Ok(Json(summary))
}
