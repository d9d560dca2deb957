//! Read access to the stored collections. Every call re-fetches from storage.

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::entities::ride::RideStatus;
use crate::entities::{driver, ride, rider, surge_zone, vehicle};
use crate::error::AppResult;

/// All rides, newest request first. An empty `statuses` slice means no filter.
pub async fn all_rides(db: &DatabaseConnection, statuses: &[RideStatus]) -> AppResult<Vec<ride::Model>> {
    let mut query = ride::Entity::find();
    if !statuses.is_empty() {
        query = query.filter(ride::Column::Status.is_in(statuses.iter().copied()));
    }

    Ok(query
        .order_by_desc(ride::Column::RequestTime)
        .order_by_asc(ride::Column::RideId)
        .all(db)
        .await?)
}

/// All drivers in id order, which is also their generation order.
pub async fn all_drivers(db: &DatabaseConnection) -> AppResult<Vec<driver::Model>> {
    Ok(driver::Entity::find()
        .order_by_asc(driver::Column::DriverId)
        .all(db)
        .await?)
}

pub async fn all_riders(db: &DatabaseConnection) -> AppResult<Vec<rider::Model>> {
    Ok(rider::Entity::find()
        .order_by_asc(rider::Column::RiderId)
        .all(db)
        .await?)
}

pub async fn all_vehicles(db: &DatabaseConnection) -> AppResult<Vec<vehicle::Model>> {
    Ok(vehicle::Entity::find()
        .order_by_asc(vehicle::Column::VehicleId)
        .all(db)
        .await?)
}

/// All surge zones in zone order.
pub async fn all_surge_zones(db: &DatabaseConnection) -> AppResult<Vec<surge_zone::Model>> {
    Ok(surge_zone::Entity::find()
        .order_by_asc(surge_zone::Column::ZoneId)
        .all(db)
        .await?)
}
