use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{check_unit_range, has_id_format};
use crate::utils::fare::round_to;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum RideStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl RideStatus {
    pub const ALL: [RideStatus; 4] = [
        Self::Completed,
        Self::InProgress,
        Self::Cancelled,
        Self::Pending,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "pending" => Some(Self::Pending),
            "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Only a completed ride is paid for.
    pub fn payment_status(self) -> PaymentStatus {
        match self {
            Self::Completed => PaymentStatus::Paid,
            _ => PaymentStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[sea_orm(string_value = "paid")]
    Paid,
    #[sea_orm(string_value = "pending")]
    Pending,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rides")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub ride_id: String,
    pub driver_id: String,
    pub rider_id: String,
    pub pickup_address: String,
    pub pickup_lat: f64,
    pub pickup_lng: f64,
    pub dropoff_address: String,
    pub dropoff_lat: f64,
    pub dropoff_lng: f64,
    pub request_time: DateTimeUtc,
    pub start_time: Option<DateTimeUtc>,
    pub end_time: Option<DateTimeUtc>,
    pub status: RideStatus,
    pub distance_km: f64,
    pub duration_minutes: Option<i32>,
    pub base_fare: f64,
    pub surge_multiplier: f64,
    pub total_fare: f64,
    pub payment_status: PaymentStatus,
    pub rating: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_completed(&self) -> bool {
        self.status == RideStatus::Completed
    }

    /// Check every ride invariant: fare product, completed-only payment and
    /// rating, and timing fields on completed rides.
    pub fn validate(&self) -> Result<(), String> {
        if !has_id_format(&self.ride_id, "RIDE", 4) {
            return Err(format!("Invalid ride id: {}", self.ride_id));
        }
        if !self.distance_km.is_finite() || self.distance_km <= 0.0 {
            return Err(format!("distance_km must be positive, got {}", self.distance_km));
        }
        if !self.base_fare.is_finite() || self.base_fare < 0.0 {
            return Err(format!("base_fare must be non-negative, got {}", self.base_fare));
        }
        if !self.surge_multiplier.is_finite() || self.surge_multiplier < 1.0 {
            return Err(format!(
                "surge_multiplier must be >= 1.0, got {}",
                self.surge_multiplier
            ));
        }
        if self.total_fare != round_to(self.base_fare * self.surge_multiplier, 2) {
            return Err(format!(
                "total_fare {} does not match base_fare {} x surge {}",
                self.total_fare, self.base_fare, self.surge_multiplier
            ));
        }
        if self.payment_status != self.status.payment_status() {
            return Err(format!(
                "payment_status {:?} is inconsistent with status {:?}",
                self.payment_status, self.status
            ));
        }
        match (self.is_completed(), self.rating) {
            (true, Some(rating)) => check_unit_range(rating, 3.5, 5.0, "ride rating")?,
            (true, None) => return Err("completed ride must carry a rating".to_string()),
            (false, Some(_)) => return Err("only completed rides can be rated".to_string()),
            (false, None) => {}
        }
        if self.is_completed()
            && (self.start_time.is_none() || self.end_time.is_none() || self.duration_minutes.is_none())
        {
            return Err("completed ride must have start_time, end_time and duration".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn completed_ride() -> Model {
        let request_time = Utc.with_ymd_and_hms(2026, 10, 14, 9, 0, 0).unwrap();
        Model {
            ride_id: "RIDE0001".to_string(),
            driver_id: "DRV001".to_string(),
            rider_id: "RDR001".to_string(),
            pickup_address: "120 Main St".to_string(),
            pickup_lat: 40.75,
            pickup_lng: -73.98,
            dropoff_address: "455 Oak Ave".to_string(),
            dropoff_lat: 40.71,
            dropoff_lng: -73.95,
            request_time,
            start_time: Some(request_time + chrono::Duration::minutes(4)),
            end_time: Some(request_time + chrono::Duration::minutes(25)),
            status: RideStatus::Completed,
            distance_km: 8.0,
            duration_minutes: Some(25),
            base_fare: 15.0,
            surge_multiplier: 1.3,
            total_fare: 19.5,
            payment_status: PaymentStatus::Paid,
            rating: Some(4.6),
        }
    }

    #[test]
    fn test_completed_ride_is_valid() {
        assert_eq!(completed_ride().validate(), Ok(()));
    }

    #[test]
    fn test_fare_mismatch_rejected() {
        let ride = Model {
            total_fare: 20.0,
            ..completed_ride()
        };
        assert!(ride.validate().is_err());
    }

    #[test]
    fn test_pending_ride_cannot_be_paid_or_rated() {
        let paid = Model {
            status: RideStatus::Pending,
            rating: None,
            ..completed_ride()
        };
        assert!(paid.validate().is_err());

        let rated = Model {
            status: RideStatus::Pending,
            payment_status: PaymentStatus::Pending,
            ..completed_ride()
        };
        assert!(rated.validate().is_err());
    }

    #[test]
    fn test_completed_ride_needs_timing() {
        let ride = Model {
            end_time: None,
            ..completed_ride()
        };
        assert!(ride.validate().is_err());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(RideStatus::parse("in_progress"), Some(RideStatus::InProgress));
        assert_eq!(RideStatus::parse(" completed "), Some(RideStatus::Completed));
        assert_eq!(RideStatus::parse("done"), None);
    }
}
