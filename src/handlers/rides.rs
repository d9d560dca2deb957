use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::ride::{self, PaymentStatus, RideStatus};
use crate::error::{AppError, AppResult};
use crate::services::metrics::{self, RideLocation};
use crate::services::queries;
use crate::services::rides::{self as ride_service, CreateRideRequest, Location};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct RideResponse {
    pub ride_id: String,
    pub driver_id: String,
    pub rider_id: String,
    pub pickup_location: Location,
    pub dropoff_location: Location,
    pub request_time: DateTime<Utc>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: RideStatus,
    pub distance_km: f64,
    pub duration_minutes: Option<i32>,
    pub base_fare: f64,
    pub surge_multiplier: f64,
    pub total_fare: f64,
    pub payment_status: PaymentStatus,
    pub rating: Option<f64>,
}

impl From<ride::Model> for RideResponse {
    fn from(r: ride::Model) -> Self {
        Self {
            ride_id: r.ride_id,
            driver_id: r.driver_id,
            rider_id: r.rider_id,
            pickup_location: Location {
                address: r.pickup_address,
                lat: r.pickup_lat,
                lng: r.pickup_lng,
            },
            dropoff_location: Location {
                address: r.dropoff_address,
                lat: r.dropoff_lat,
                lng: r.dropoff_lng,
            },
            request_time: r.request_time,
            start_time: r.start_time,
            end_time: r.end_time,
            status: r.status,
            distance_km: r.distance_km,
            duration_minutes: r.duration_minutes,
            base_fare: r.base_fare,
            surge_multiplier: r.surge_multiplier,
            total_fare: r.total_fare,
            payment_status: r.payment_status,
            rating: r.rating,
        }
    }
}

/// `?status=completed,pending`
#[derive(Debug, Default, Deserialize)]
pub struct RideFilter {
    pub status: Option<String>,
}

impl RideFilter {
    fn statuses(&self) -> AppResult<Vec<RideStatus>> {
        let Some(raw) = self.status.as_deref() else {
            return Ok(Vec::new());
        };
        raw.split(',')
            .filter(|s| !s.trim().is_empty())
            .map(|s| {
                RideStatus::parse(s)
                    .ok_or_else(|| AppError::Validation(format!("Unknown ride status: {}", s.trim())))
            })
            .collect()
    }
}

/// List rides, newest first
pub async fn list_rides(
    State(state): State<AppState>,
    Query(filter): Query<RideFilter>,
) -> AppResult<Json<Vec<RideResponse>>> {
    let rides = queries::all_rides(&state.db, &filter.statuses()?).await?;
    Ok(Json(rides.into_iter().map(RideResponse::from).collect()))
}

/// Pickup and drop-off coordinates of the (filtered) rides
pub async fn ride_locations(
    State(state): State<AppState>,
    Query(filter): Query<RideFilter>,
) -> AppResult<Json<Vec<RideLocation>>> {
    let rides = queries::all_rides(&state.db, &filter.statuses()?).await?;
    Ok(Json(metrics::ride_locations(&rides)))
}

/// Request a new ride
pub async fn create_ride(
    State(state): State<AppState>,
    Json(payload): Json<CreateRideRequest>,
) -> AppResult<(StatusCode, Json<RideResponse>)> {
    let ride = ride_service::create_ride(&state.db, &payload, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(ride.into())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_filter_parsing() {
        let filter = RideFilter {
            status: Some("completed, in_progress".to_string()),
        };
        assert_eq!(
            filter.statuses().unwrap(),
            vec![RideStatus::Completed, RideStatus::InProgress]
        );

        assert!(RideFilter::default().statuses().unwrap().is_empty());

        let bad = RideFilter {
            status: Some("completed,finished".to_string()),
        };
        assert!(matches!(bad.statuses(), Err(AppError::Validation(_))));
    }
}
