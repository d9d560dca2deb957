//! Ride-request workflow: the single transition that creates a `pending` ride.
//!
//! Accepting, starting, completing or cancelling a ride is not modelled here.

use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QuerySelect, TransactionTrait,
};
use serde::{Deserialize, Serialize};

use crate::entities::driver::{self, DriverStatus};
use crate::entities::ride::{self, PaymentStatus, RideStatus};
use crate::entities::{format_id, rider};
use crate::error::{AppError, AppResult};
use crate::utils::fare::{request_fare, round_to};
use crate::utils::geo::{haversine_distance, GeoPoint};

/// Surge range offered by the request form.
pub const MIN_SURGE: f64 = 1.0;
pub const MAX_SURGE: f64 = 3.0;

const MAX_RIDE_NUMBER: u32 = 9999;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub address: String,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

fn default_surge() -> f64 {
    MIN_SURGE
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRideRequest {
    pub rider_id: String,
    pub driver_id: String,
    pub pickup_location: Location,
    pub dropoff_location: Location,
    /// Estimated from the coordinates when omitted.
    pub distance_km: Option<f64>,
    #[serde(default = "default_surge")]
    pub surge_multiplier: f64,
}

impl CreateRideRequest {
    /// Validate request
    pub fn validate(&self) -> Result<(), String> {
        if self.rider_id.trim().is_empty() || self.driver_id.trim().is_empty() {
            return Err("rider_id and driver_id are required".to_string());
        }
        for (label, location) in [
            ("Pickup", &self.pickup_location),
            ("Dropoff", &self.dropoff_location),
        ] {
            if location.address.trim().is_empty() {
                return Err(format!("{} address is required", label));
            }
            if !location.point().is_valid() {
                return Err(format!(
                    "{} coordinates ({}, {}) are out of range",
                    label, location.lat, location.lng
                ));
            }
        }
        if !self.surge_multiplier.is_finite()
            || !(MIN_SURGE..=MAX_SURGE).contains(&self.surge_multiplier)
        {
            return Err(format!(
                "Surge multiplier must be between {} and {}",
                MIN_SURGE, MAX_SURGE
            ));
        }
        if let Some(distance) = self.distance_km {
            if !distance.is_finite() || distance <= 0.0 {
                return Err("Distance must be greater than 0".to_string());
            }
        }
        Ok(())
    }

    /// The given distance, or the great-circle distance between pickup and
    /// drop-off rounded to 2 decimals.
    pub fn distance_km(&self) -> f64 {
        self.distance_km.unwrap_or_else(|| {
            round_to(
                haversine_distance(self.pickup_location.point(), self.dropoff_location.point()),
                2,
            )
        })
    }
}

/// Highest numeric suffix among `RIDEnnnn` ids plus one. Malformed ids are
/// ignored.
pub fn next_ride_number<'a>(ride_ids: impl IntoIterator<Item = &'a str>) -> u32 {
    ride_ids
        .into_iter()
        .filter_map(|id| id.strip_prefix("RIDE"))
        .filter_map(|n| n.parse::<u32>().ok())
        .max()
        .unwrap_or(0)
        + 1
}

async fn next_ride_id<C: ConnectionTrait>(conn: &C) -> AppResult<String> {
    let ids: Vec<String> = ride::Entity::find()
        .select_only()
        .column(ride::Column::RideId)
        .into_tuple()
        .all(conn)
        .await?;

    let next = next_ride_number(ids.iter().map(String::as_str));
    if next > MAX_RIDE_NUMBER {
        return Err(AppError::Conflict("Ride id space is exhausted".to_string()));
    }
    Ok(format_id("RIDE", next, 4))
}

/// Create one `pending` ride for an available driver.
///
/// Refuses when no driver at all is available, when the chosen driver is not
/// available, or when either reference is unknown. The id is assigned and
/// the row inserted inside one transaction; a concurrent writer that takes
/// the same id makes the insert fail with `Conflict`.
pub async fn create_ride(
    db: &DatabaseConnection,
    request: &CreateRideRequest,
    now: DateTime<Utc>,
) -> AppResult<ride::Model> {
    request.validate().map_err(AppError::Validation)?;

    let distance_km = request.distance_km();
    if distance_km <= 0.0 {
        return Err(AppError::Validation(
            "Pickup and dropoff are the same point; provide a distance".to_string(),
        ));
    }

    let txn = db.begin().await?;

    let available = driver::Entity::find()
        .filter(driver::Column::Status.eq(DriverStatus::Available))
        .count(&txn)
        .await?;
    if available == 0 {
        return Err(AppError::Validation("No available drivers right now".to_string()));
    }

    let driver = driver::Entity::find_by_id(request.driver_id.clone())
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::Validation(format!("Unknown driver {}", request.driver_id)))?;
    if !driver.is_available() {
        return Err(AppError::Validation(format!(
            "Driver {} is not available",
            driver.driver_id
        )));
    }

    rider::Entity::find_by_id(request.rider_id.clone())
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::Validation(format!("Unknown rider {}", request.rider_id)))?;

    let fare = request_fare(distance_km, request.surge_multiplier);
    let ride = ride::Model {
        ride_id: next_ride_id(&txn).await?,
        driver_id: driver.driver_id,
        rider_id: request.rider_id.clone(),
        pickup_address: request.pickup_location.address.trim().to_string(),
        pickup_lat: request.pickup_location.lat,
        pickup_lng: request.pickup_location.lng,
        dropoff_address: request.dropoff_location.address.trim().to_string(),
        dropoff_lat: request.dropoff_location.lat,
        dropoff_lng: request.dropoff_location.lng,
        request_time: now,
        start_time: None,
        end_time: None,
        status: RideStatus::Pending,
        distance_km,
        duration_minutes: None,
        base_fare: fare.base_fare,
        surge_multiplier: request.surge_multiplier,
        total_fare: fare.total_fare,
        payment_status: PaymentStatus::Pending,
        rating: None,
    };
    ride.validate().map_err(AppError::Validation)?;

    ride::Entity::insert(ride.clone().into_active_model())
        .exec_without_returning(&txn)
        .await?;
    txn.commit().await?;

    tracing::info!(
        ride_id = %ride.ride_id,
        driver_id = %ride.driver_id,
        rider_id = %ride.rider_id,
        distance_km = ride.distance_km,
        total_fare = ride.total_fare,
        "Ride requested"
    );

    Ok(ride)
}
