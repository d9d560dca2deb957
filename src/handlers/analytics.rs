use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::entities::ride::RideStatus;
use crate::error::AppResult;
use crate::services::metrics::{
    self, DistanceSummary, FareRatingPoint, HistogramBin, RatingCount, TripPoint,
};
use crate::services::queries;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct TripEfficiencyResponse {
    pub duration_vs_distance: Vec<TripPoint>,
    pub distance_summary: Option<DistanceSummary>,
    pub average_speed_km_per_min: f64,
}

pub async fn trip_efficiency(
    State(state): State<AppState>,
) -> AppResult<Json<TripEfficiencyResponse>> {
    let rides = queries::all_rides(&state.db, &[RideStatus::Completed]).await?;

    Ok(Json(TripEfficiencyResponse {
        duration_vs_distance: metrics::duration_vs_distance(&rides),
        distance_summary: metrics::distance_summary(&rides),
        average_speed_km_per_min: metrics::average_speed(&rides),
    }))
}

#[derive(Debug, Serialize)]
pub struct RevenueAnalysisResponse {
    pub revenue_by_status: BTreeMap<RideStatus, f64>,
    pub fare_per_km: Vec<HistogramBin>,
}

pub async fn revenue_analysis(
    State(state): State<AppState>,
) -> AppResult<Json<RevenueAnalysisResponse>> {
    let rides = queries::all_rides(&state.db, &[]).await?;

    Ok(Json(RevenueAnalysisResponse {
        revenue_by_status: metrics::revenue_by_status(&rides),
        fare_per_km: metrics::fare_per_km_histogram(&rides),
    }))
}

#[derive(Debug, Serialize)]
pub struct RatingAnalysisResponse {
    pub rating_distribution: Vec<RatingCount>,
    pub fare_vs_rating: Vec<FareRatingPoint>,
}

pub async fn rating_analysis(
    State(state): State<AppState>,
) -> AppResult<Json<RatingAnalysisResponse>> {
    let rides = queries::all_rides(&state.db, &[RideStatus::Completed]).await?;

    Ok(Json(RatingAnalysisResponse {
        rating_distribution: metrics::rating_distribution(&rides),
        fare_vs_rating: metrics::fare_vs_rating(&rides),
    }))
}
