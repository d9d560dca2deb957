use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{check_non_negative, check_unit_range, has_id_format};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum DriverStatus {
    #[sea_orm(string_value = "available")]
    Available,
    #[sea_orm(string_value = "busy")]
    Busy,
    #[sea_orm(string_value = "offline")]
    Offline,
}

impl DriverStatus {
    pub const ALL: [DriverStatus; 3] = [Self::Available, Self::Busy, Self::Offline];
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "drivers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub driver_id: String,
    pub name: String,
    pub phone: String,
    pub rating: f64,
    pub total_rides: i32,
    pub status: DriverStatus,
    pub location_lat: f64,
    pub location_lng: f64,
    pub earnings_today: f64,
    pub vehicle_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_available(&self) -> bool {
        self.status == DriverStatus::Available
    }

    pub fn validate(&self) -> Result<(), String> {
        if !has_id_format(&self.driver_id, "DRV", 3) {
            return Err(format!("Invalid driver id: {}", self.driver_id));
        }
        if !has_id_format(&self.vehicle_id, "VEH", 3) {
            return Err(format!("Invalid vehicle reference: {}", self.vehicle_id));
        }
        check_unit_range(self.rating, 4.0, 5.0, "driver rating")?;
        if self.total_rides < 0 {
            return Err("total_rides must be non-negative".to_string());
        }
        check_non_negative(self.earnings_today, "earnings_today")
    }
}
