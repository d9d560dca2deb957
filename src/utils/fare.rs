//! Fare and surge calculations shared by seeding and ride requests.
//!
//! Two base-fare formulas exist on purpose: seeded rides add a random base
//! charge in `[2, 5)`, requested rides add a fixed charge of 3.0. Both apply
//! the same per-km rate and the same surge rounding.

use rand::Rng;
use serde::Serialize;

use crate::entities::surge_zone;

/// Per-kilometer rate in currency units.
pub const PER_KM_RATE: f64 = 1.5;

/// Base charge added to requested rides.
pub const REQUEST_BASE_CHARGE: f64 = 3.0;

/// Bounds of the random base charge added to seeded rides.
pub const SEED_BASE_CHARGE_MIN: f64 = 2.0;
pub const SEED_BASE_CHARGE_MAX: f64 = 5.0;

/// Zones strictly above this multiplier raise a high-surge alert.
pub const SURGE_ALERT_THRESHOLD: f64 = 2.0;

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Fare {
    pub base_fare: f64,
    pub total_fare: f64,
}

/// `total_fare = round(base_fare * surge_multiplier, 2)`
pub fn total_fare(base_fare: f64, surge_multiplier: f64) -> f64 {
    round_to(base_fare * surge_multiplier, 2)
}

/// Formula: `base_fare = round(distance_km * PER_KM_RATE + base_charge, 2)`
pub fn compute_fare(distance_km: f64, surge_multiplier: f64, base_charge: f64) -> Fare {
    let base_fare = round_to(distance_km * PER_KM_RATE + base_charge, 2);
    Fare {
        base_fare,
        total_fare: total_fare(base_fare, surge_multiplier),
    }
}

/// Fare of a ride requested through the booking workflow.
pub fn request_fare(distance_km: f64, surge_multiplier: f64) -> Fare {
    compute_fare(distance_km, surge_multiplier, REQUEST_BASE_CHARGE)
}

/// Fare of a synthetic ride; draws the base charge from `rng`.
pub fn seed_fare<R: Rng + ?Sized>(rng: &mut R, distance_km: f64, surge_multiplier: f64) -> Fare {
    let base_charge = rng.gen_range(SEED_BASE_CHARGE_MIN..SEED_BASE_CHARGE_MAX);
    compute_fare(distance_km, surge_multiplier, base_charge)
}

/// Zones whose `current_surge` is strictly above `threshold`, in their
/// original order.
pub fn surge_alert(zones: &[surge_zone::Model], threshold: f64) -> Vec<&surge_zone::Model> {
    zones
        .iter()
        .filter(|zone| zone.current_surge > threshold)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rand::{rngs::StdRng, SeedableRng};

    use crate::entities::surge_zone::DemandLevel;

    fn zone(id: &str, current_surge: f64) -> surge_zone::Model {
        surge_zone::Model {
            zone_id: id.to_string(),
            zone_name: format!("Zone {id}"),
            current_surge,
            demand_level: DemandLevel::Medium,
            available_drivers: 10,
            active_requests: 12,
            timestamp: Utc::now(),
            avg_wait_time: 5,
        }
    }

    #[test]
    fn test_request_fare_example() {
        let fare = request_fare(5.0, 1.0);
        assert_eq!(fare.base_fare, 10.5);
        assert_eq!(fare.total_fare, 10.5);
    }

    #[test]
    fn test_request_fare_with_surge() {
        let fare = request_fare(12.3, 1.7);
        // 12.3 * 1.5 + 3.0 = 21.45
        assert_eq!(fare.base_fare, 21.45);
        assert_eq!(fare.total_fare, round_to(21.45 * 1.7, 2));
    }

    #[test]
    fn test_seed_fare_base_charge_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let fare = seed_fare(&mut rng, 10.0, 1.0);
            assert!(fare.base_fare >= 17.0 && fare.base_fare <= 20.0);
            assert_eq!(fare.total_fare, fare.base_fare);
        }
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(3.14159, 2), 3.14);
        assert_eq!(round_to(2.449, 1), 2.4);
        assert_eq!(round_to(1.25, 0), 1.0);
    }

    #[test]
    fn test_surge_alert_keeps_order() {
        let zones = vec![
            zone("ZONE01", 1.5),
            zone("ZONE02", 2.1),
            zone("ZONE03", 3.0),
            zone("ZONE04", 1.9),
        ];

        let alerts = surge_alert(&zones, SURGE_ALERT_THRESHOLD);
        let surges: Vec<f64> = alerts.iter().map(|z| z.current_surge).collect();
        assert_eq!(surges, vec![2.1, 3.0]);
        assert_eq!(alerts[0].zone_id, "ZONE02");
    }

    #[test]
    fn test_surge_alert_threshold_is_exclusive() {
        let zones = vec![zone("ZONE01", 2.0)];
        assert!(surge_alert(&zones, 2.0).is_empty());
        assert!(surge_alert(&[], 2.0).is_empty());
    }
}
