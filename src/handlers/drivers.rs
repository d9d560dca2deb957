use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::entities::driver::{self, DriverStatus};
use crate::entities::{rider, vehicle};
use crate::error::AppResult;
use crate::services::metrics::{self, HistogramBin};
use crate::services::queries;
use crate::utils::geo::GeoPoint;
use crate::AppState;

const DEFAULT_TOP_DRIVERS: usize = 5;

#[derive(Debug, Serialize)]
pub struct DriverResponse {
    pub driver_id: String,
    pub name: String,
    pub phone: String,
    pub rating: f64,
    pub total_rides: i32,
    pub status: DriverStatus,
    pub location: GeoPoint,
    pub earnings_today: f64,
    pub vehicle_id: String,
}

impl From<driver::Model> for DriverResponse {
    fn from(d: driver::Model) -> Self {
        Self {
            driver_id: d.driver_id,
            name: d.name,
            phone: d.phone,
            rating: d.rating,
            total_rides: d.total_rides,
            status: d.status,
            location: GeoPoint::new(d.location_lat, d.location_lng),
            earnings_today: d.earnings_today,
            vehicle_id: d.vehicle_id,
        }
    }
}

/// List all drivers
pub async fn list_drivers(State(state): State<AppState>) -> AppResult<Json<Vec<DriverResponse>>> {
    let drivers = queries::all_drivers(&state.db).await?;
    Ok(Json(drivers.into_iter().map(DriverResponse::from).collect()))
}

#[derive(Debug, Deserialize)]
pub struct TopQuery {
    pub limit: Option<usize>,
}

/// Leaderboard by today's earnings
pub async fn top_drivers(
    State(state): State<AppState>,
    Query(query): Query<TopQuery>,
) -> AppResult<Json<Vec<DriverResponse>>> {
    let drivers = queries::all_drivers(&state.db).await?;
    let top = metrics::top_drivers_by_earnings(&drivers, query.limit.unwrap_or(DEFAULT_TOP_DRIVERS));
    Ok(Json(top.into_iter().map(DriverResponse::from).collect()))
}

pub async fn rating_histogram(State(state): State<AppState>) -> AppResult<Json<Vec<HistogramBin>>> {
    let drivers = queries::all_drivers(&state.db).await?;
    Ok(Json(metrics::driver_rating_histogram(&drivers)))
}

pub async fn list_riders(State(state): State<AppState>) -> AppResult<Json<Vec<rider::Model>>> {
    Ok(Json(queries::all_riders(&state.db).await?))
}

pub async fn list_vehicles(State(state): State<AppState>) -> AppResult<Json<Vec<vehicle::Model>>> {
    Ok(Json(queries::all_vehicles(&state.db).await?))
}
