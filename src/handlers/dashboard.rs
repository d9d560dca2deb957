use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::entities::driver::DriverStatus;
use crate::entities::ride::RideStatus;
use crate::error::AppResult;
use crate::services::metrics::{self, DailyRevenue, DashboardMetrics};
use crate::services::queries;
use crate::AppState;

/// Headline numbers: total rides, available drivers, revenue, rating
pub async fn metrics(State(state): State<AppState>) -> AppResult<Json<DashboardMetrics>> {
    Ok(Json(metrics::dashboard_metrics(&state.db).await?))
}

#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub ride_status: BTreeMap<RideStatus, usize>,
    pub driver_availability: BTreeMap<DriverStatus, usize>,
    pub revenue_by_day: Vec<DailyRevenue>,
}

/// Chart data for the main dashboard
pub async fn overview(State(state): State<AppState>) -> AppResult<Json<OverviewResponse>> {
    let rides = queries::all_rides(&state.db, &[]).await?;
    let drivers = queries::all_drivers(&state.db).await?;

    Ok(Json(OverviewResponse {
        ride_status: metrics::status_distribution(&rides),
        driver_availability: metrics::driver_status_distribution(&drivers),
        revenue_by_day: metrics::revenue_by_day(&rides),
    }))
}
