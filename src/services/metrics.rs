//! Dashboard aggregations.
//!
//! `dashboard_metrics` queries storage directly; everything else is a pure
//! function over already-fetched rows so handlers can combine them freely.
//! Every aggregation accepts empty input and returns an empty or zero value.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use serde::Serialize;

use crate::entities::driver::{self, DriverStatus};
use crate::entities::ride::{self, RideStatus};
use crate::entities::surge_zone::{self, DemandLevel};
use crate::error::AppResult;
use crate::utils::fare::round_to;
use crate::utils::geo::GeoPoint;

/// Fare-per-km values at or above this are left out of the histogram.
pub const FARE_PER_KM_CAP: f64 = 50.0;
pub const FARE_PER_KM_BINS: usize = 30;
pub const DRIVER_RATING_BINS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DashboardMetrics {
    pub total_rides: u64,
    pub active_drivers: u64,
    pub total_revenue: f64,
    pub avg_rating: f64,
}

pub async fn dashboard_metrics(db: &DatabaseConnection) -> AppResult<DashboardMetrics> {
    let total_rides = ride::Entity::find().count(db).await?;

    let active_drivers = driver::Entity::find()
        .filter(driver::Column::Status.eq(DriverStatus::Available))
        .count(db)
        .await?;

    let completed = ride::Entity::find()
        .filter(ride::Column::Status.eq(RideStatus::Completed))
        .all(db)
        .await?;

    let rated = ride::Entity::find()
        .filter(ride::Column::Rating.is_not_null())
        .all(db)
        .await?;

    Ok(DashboardMetrics {
        total_rides,
        active_drivers,
        total_revenue: total_revenue(&completed),
        avg_rating: average_rating(&rated),
    })
}

/// Sum of `total_fare` over completed rides.
pub fn total_revenue(rides: &[ride::Model]) -> f64 {
    let sum: f64 = rides
        .iter()
        .filter(|r| r.is_completed())
        .map(|r| r.total_fare)
        .sum();
    round_to(sum, 2)
}

/// Mean rating over rated rides, or 0 when nothing is rated.
pub fn average_rating(rides: &[ride::Model]) -> f64 {
    let ratings: Vec<f64> = rides.iter().filter_map(|r| r.rating).collect();
    if ratings.is_empty() {
        return 0.0;
    }
    round_to(ratings.iter().sum::<f64>() / ratings.len() as f64, 2)
}

pub fn status_distribution(rides: &[ride::Model]) -> BTreeMap<RideStatus, usize> {
    let mut counts = BTreeMap::new();
    for ride in rides {
        *counts.entry(ride.status).or_insert(0) += 1;
    }
    counts
}

pub fn driver_status_distribution(drivers: &[driver::Model]) -> BTreeMap<DriverStatus, usize> {
    let mut counts = BTreeMap::new();
    for driver in drivers {
        *counts.entry(driver.status).or_insert(0) += 1;
    }
    counts
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub revenue: f64,
}

/// Completed-ride revenue grouped by the UTC date of `request_time`,
/// ascending by date.
pub fn revenue_by_day(rides: &[ride::Model]) -> Vec<DailyRevenue> {
    let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for ride in rides.iter().filter(|r| r.is_completed()) {
        *by_day.entry(ride.request_time.date_naive()).or_insert(0.0) += ride.total_fare;
    }
    by_day
        .into_iter()
        .map(|(date, revenue)| DailyRevenue {
            date,
            revenue: round_to(revenue, 2),
        })
        .collect()
}

/// `total_fare` summed per ride status, all statuses included.
pub fn revenue_by_status(rides: &[ride::Model]) -> BTreeMap<RideStatus, f64> {
    let mut sums = BTreeMap::new();
    for ride in rides {
        *sums.entry(ride.status).or_insert(0.0) += ride.total_fare;
    }
    sums.into_iter().map(|(s, v)| (s, round_to(v, 2))).collect()
}

/// Top `k` drivers by `earnings_today`, descending. The sort is stable so
/// ties keep their input order.
pub fn top_drivers_by_earnings(drivers: &[driver::Model], k: usize) -> Vec<driver::Model> {
    let mut ranked = drivers.to_vec();
    ranked.sort_by(|a, b| b.earnings_today.total_cmp(&a.earnings_today));
    ranked.truncate(k);
    ranked
}

/// `total_fare / distance_km` for rides with a positive distance, skipping
/// non-finite results.
pub fn fare_per_km(rides: &[ride::Model]) -> Vec<f64> {
    rides
        .iter()
        .filter(|r| r.distance_km > 0.0)
        .map(|r| r.total_fare / r.distance_km)
        .filter(|v| v.is_finite())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Equal-width histogram over `[lower, upper]`. Values outside the range are
/// dropped; `upper` itself lands in the last bin.
pub fn histogram(values: &[f64], lower: f64, upper: f64, bins: usize) -> Vec<HistogramBin> {
    if bins == 0 || !(upper > lower) {
        return Vec::new();
    }

    let width = (upper - lower) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &value in values {
        if !value.is_finite() || value < lower || value > upper {
            continue;
        }
        let idx = (((value - lower) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: round_to(lower + width * i as f64, 4),
            end: round_to(lower + width * (i + 1) as f64, 4),
            count,
        })
        .collect()
}

pub fn fare_per_km_histogram(rides: &[ride::Model]) -> Vec<HistogramBin> {
    let values: Vec<f64> = fare_per_km(rides)
        .into_iter()
        .filter(|v| *v < FARE_PER_KM_CAP)
        .collect();
    histogram(&values, 0.0, FARE_PER_KM_CAP, FARE_PER_KM_BINS)
}

pub fn driver_rating_histogram(drivers: &[driver::Model]) -> Vec<HistogramBin> {
    let ratings: Vec<f64> = drivers.iter().map(|d| d.rating).collect();
    histogram(&ratings, 4.0, 5.0, DRIVER_RATING_BINS)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingCount {
    pub rating: f64,
    pub count: usize,
}

/// How many completed rides received each rating, ascending by rating.
pub fn rating_distribution(rides: &[ride::Model]) -> Vec<RatingCount> {
    // Ratings carry one decimal, so tenths make an exact key
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for rating in rides
        .iter()
        .filter(|r| r.is_completed())
        .filter_map(|r| r.rating)
    {
        *counts.entry((rating * 10.0).round() as i64).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(tenths, count)| RatingCount {
            rating: tenths as f64 / 10.0,
            count,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FareRatingPoint {
    pub ride_id: String,
    pub total_fare: f64,
    pub rating: f64,
}

pub fn fare_vs_rating(rides: &[ride::Model]) -> Vec<FareRatingPoint> {
    rides
        .iter()
        .filter(|r| r.is_completed())
        .filter_map(|r| {
            r.rating.map(|rating| FareRatingPoint {
                ride_id: r.ride_id.clone(),
                total_fare: r.total_fare,
                rating,
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripPoint {
    pub ride_id: String,
    pub distance_km: f64,
    pub duration_minutes: i32,
    pub surge_multiplier: f64,
    pub total_fare: f64,
}

/// One point per completed ride with a known duration.
pub fn duration_vs_distance(rides: &[ride::Model]) -> Vec<TripPoint> {
    rides
        .iter()
        .filter(|r| r.is_completed())
        .filter_map(|r| {
            r.duration_minutes.map(|duration_minutes| TripPoint {
                ride_id: r.ride_id.clone(),
                distance_km: r.distance_km,
                duration_minutes,
                surge_multiplier: r.surge_multiplier,
                total_fare: r.total_fare,
            })
        })
        .collect()
}

/// Kilometers per minute over completed rides; the minute total is floored
/// at 1 so an empty set yields 0.
pub fn average_speed(rides: &[ride::Model]) -> f64 {
    let completed = rides.iter().filter(|r| r.is_completed());
    let (distance, minutes) = completed.fold((0.0, 0i64), |(d, m), r| {
        (d + r.distance_km, m + i64::from(r.duration_minutes.unwrap_or(0)))
    });
    round_to(distance / minutes.max(1) as f64, 2)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistanceSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Five-number summary of completed-ride distances, `None` when there are
/// no completed rides.
pub fn distance_summary(rides: &[ride::Model]) -> Option<DistanceSummary> {
    let mut distances: Vec<f64> = rides
        .iter()
        .filter(|r| r.is_completed())
        .map(|r| r.distance_km)
        .collect();
    if distances.is_empty() {
        return None;
    }
    distances.sort_by(f64::total_cmp);

    Some(DistanceSummary {
        min: distances[0],
        q1: quantile(&distances, 0.25),
        median: quantile(&distances, 0.5),
        q3: quantile(&distances, 0.75),
        max: distances[distances.len() - 1],
    })
}

/// Linear-interpolated quantile of a sorted, non-empty slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = (sorted.len() - 1) as f64 * q;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let value = sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64);
    round_to(value, 2)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemandSupplyPoint {
    pub zone_id: String,
    pub zone_name: String,
    pub available_drivers: i32,
    pub active_requests: i32,
    pub current_surge: f64,
    pub demand_level: DemandLevel,
}

pub fn demand_vs_supply(zones: &[surge_zone::Model]) -> Vec<DemandSupplyPoint> {
    zones
        .iter()
        .map(|z| DemandSupplyPoint {
            zone_id: z.zone_id.clone(),
            zone_name: z.zone_name.clone(),
            available_drivers: z.available_drivers,
            active_requests: z.active_requests,
            current_surge: z.current_surge,
            demand_level: z.demand_level,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopKind {
    Pickup,
    Dropoff,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RideLocation {
    pub ride_id: String,
    pub kind: StopKind,
    #[serde(flatten)]
    pub point: GeoPoint,
}

/// Pickup and drop-off points of each ride, for plotting on a map.
pub fn ride_locations(rides: &[ride::Model]) -> Vec<RideLocation> {
    rides
        .iter()
        .flat_map(|r| {
            [
                RideLocation {
                    ride_id: r.ride_id.clone(),
                    kind: StopKind::Pickup,
                    point: GeoPoint::new(r.pickup_lat, r.pickup_lng),
                },
                RideLocation {
                    ride_id: r.ride_id.clone(),
                    kind: StopKind::Dropoff,
                    point: GeoPoint::new(r.dropoff_lat, r.dropoff_lng),
                },
            ]
        })
        .filter(|loc| loc.point.is_valid())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    use crate::utils::fare::total_fare;

    fn ride(id: u32, status: RideStatus, day: u32, distance_km: f64, base_fare: f64) -> ride::Model {
        let request_time = Utc.with_ymd_and_hms(2026, 10, day, 12, 0, 0).unwrap();
        let completed = status == RideStatus::Completed;
        ride::Model {
            ride_id: format!("RIDE{id:04}"),
            driver_id: "DRV001".to_string(),
            rider_id: "RDR001".to_string(),
            pickup_address: "100 Main St".to_string(),
            pickup_lat: 40.75,
            pickup_lng: -73.95,
            dropoff_address: "200 Oak Ave".to_string(),
            dropoff_lat: 40.71,
            dropoff_lng: -73.99,
            request_time,
            start_time: Some(request_time),
            end_time: Some(request_time),
            status,
            distance_km,
            duration_minutes: Some(20),
            base_fare,
            surge_multiplier: 1.0,
            total_fare: total_fare(base_fare, 1.0),
            payment_status: status.payment_status(),
            rating: completed.then_some(4.5),
        }
    }

    fn driver(id: u32, earnings_today: f64, status: DriverStatus) -> driver::Model {
        driver::Model {
            driver_id: format!("DRV{id:03}"),
            name: format!("Driver {id}"),
            phone: "+1-555-1234".to_string(),
            rating: 4.5,
            total_rides: 100,
            status,
            location_lat: 40.75,
            location_lng: -73.95,
            earnings_today,
            vehicle_id: format!("VEH{id:03}"),
        }
    }

    #[test]
    fn test_empty_inputs_give_zero_values() {
        assert_eq!(total_revenue(&[]), 0.0);
        assert_eq!(average_rating(&[]), 0.0);
        assert!(status_distribution(&[]).is_empty());
        assert!(revenue_by_day(&[]).is_empty());
        assert!(top_drivers_by_earnings(&[], 5).is_empty());
        assert!(fare_per_km(&[]).is_empty());
        assert!(rating_distribution(&[]).is_empty());
        assert!(duration_vs_distance(&[]).is_empty());
        assert!(demand_vs_supply(&[]).is_empty());
        assert_eq!(average_speed(&[]), 0.0);
        assert_eq!(distance_summary(&[]), None);
        assert!(fare_per_km_histogram(&[]).iter().all(|b| b.count == 0));
    }

    #[test]
    fn test_revenue_counts_only_completed() {
        let rides = vec![
            ride(1, RideStatus::Completed, 14, 5.0, 10.25),
            ride(2, RideStatus::Cancelled, 14, 5.0, 50.0),
            ride(3, RideStatus::Completed, 15, 5.0, 9.5),
        ];
        assert_eq!(total_revenue(&rides), 19.75);
        assert_eq!(
            revenue_by_day(&rides),
            vec![
                DailyRevenue {
                    date: NaiveDate::from_ymd_opt(2026, 10, 14).unwrap(),
                    revenue: 10.25,
                },
                DailyRevenue {
                    date: NaiveDate::from_ymd_opt(2026, 10, 15).unwrap(),
                    revenue: 9.5,
                },
            ]
        );
    }

    #[test]
    fn test_average_rating_ignores_unrated() {
        let mut a = ride(1, RideStatus::Completed, 14, 5.0, 10.0);
        a.rating = Some(4.0);
        let mut b = ride(2, RideStatus::Completed, 14, 5.0, 10.0);
        b.rating = Some(4.75);
        let c = ride(3, RideStatus::Pending, 14, 5.0, 10.0);
        assert_eq!(average_rating(&[a, b, c]), 4.38);
    }

    #[test]
    fn test_status_distribution() {
        let rides = vec![
            ride(1, RideStatus::Completed, 14, 5.0, 10.0),
            ride(2, RideStatus::Pending, 14, 5.0, 10.0),
            ride(3, RideStatus::Completed, 14, 5.0, 10.0),
        ];
        let dist = status_distribution(&rides);
        assert_eq!(dist.get(&RideStatus::Completed), Some(&2));
        assert_eq!(dist.get(&RideStatus::Pending), Some(&1));
        assert_eq!(dist.get(&RideStatus::Cancelled), None);
    }

    #[test]
    fn test_top_drivers_sorted_and_stable() {
        let drivers = vec![
            driver(1, 120.0, DriverStatus::Busy),
            driver(2, 250.0, DriverStatus::Available),
            driver(3, 120.0, DriverStatus::Offline),
            driver(4, 80.0, DriverStatus::Available),
            driver(5, 300.0, DriverStatus::Busy),
            driver(6, 95.5, DriverStatus::Busy),
        ];

        let top = top_drivers_by_earnings(&drivers, 5);
        let ids: Vec<&str> = top.iter().map(|d| d.driver_id.as_str()).collect();
        assert_eq!(ids, vec!["DRV005", "DRV002", "DRV001", "DRV003", "DRV006"]);

        assert_eq!(top_drivers_by_earnings(&drivers[..3], 5).len(), 3);
    }

    #[test]
    fn test_fare_per_km_histogram_excludes_cap() {
        // 2.0, 1.0 and 100.0 per km
        let rides = vec![
            ride(1, RideStatus::Completed, 14, 5.0, 10.0),
            ride(2, RideStatus::Completed, 14, 10.0, 10.0),
            ride(3, RideStatus::Cancelled, 14, 0.1, 10.0),
        ];
        assert_eq!(fare_per_km(&rides).len(), 3);

        let bins = fare_per_km_histogram(&rides);
        assert_eq!(bins.len(), FARE_PER_KM_BINS);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 2);
    }

    #[test]
    fn test_histogram_upper_edge_in_last_bin() {
        let bins = histogram(&[4.0, 4.5, 5.0, 5.1], 4.0, 5.0, 2);
        assert_eq!(bins[0].count, 1);
        assert_eq!(bins[1].count, 2);
        assert_eq!(bins[1].end, 5.0);
    }

    #[test]
    fn test_rating_distribution_groups_by_value() {
        let mut a = ride(1, RideStatus::Completed, 14, 5.0, 10.0);
        a.rating = Some(3.9);
        let b = ride(2, RideStatus::Completed, 14, 5.0, 10.0);
        let c = ride(3, RideStatus::Completed, 14, 5.0, 10.0);
        let dist = rating_distribution(&[a, b, c]);
        assert_eq!(
            dist,
            vec![
                RatingCount { rating: 3.9, count: 1 },
                RatingCount { rating: 4.5, count: 2 },
            ]
        );
    }

    #[test]
    fn test_average_speed_and_distance_summary() {
        let rides = vec![
            ride(1, RideStatus::Completed, 14, 10.0, 10.0),
            ride(2, RideStatus::Completed, 14, 20.0, 10.0),
            ride(3, RideStatus::InProgress, 14, 99.0, 10.0),
        ];
        // 30 km over 40 minutes
        assert_eq!(average_speed(&rides), 0.75);

        let summary = distance_summary(&rides).unwrap();
        assert_eq!(summary.min, 10.0);
        assert_eq!(summary.median, 15.0);
        assert_eq!(summary.q1, 12.5);
        assert_eq!(summary.max, 20.0);
    }

    #[test]
    fn test_ride_locations_two_per_ride() {
        let rides = vec![ride(1, RideStatus::Pending, 14, 3.0, 7.5)];
        let locations = ride_locations(&rides);
        assert_eq!(locations.len(), 2);
        assert_eq!(locations[0].kind, StopKind::Pickup);
        assert_eq!(locations[1].point, GeoPoint::new(40.71, -73.99));
    }
}
