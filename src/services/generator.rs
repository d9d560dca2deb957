//! Synthetic dataset generation.
//!
//! Everything here is pure: randomness comes from the caller's `Rng` and the
//! reference instant from `now`, so a seeded `StdRng` reproduces a dataset
//! exactly. Persisting the result is `services::seeding`'s job.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::Serialize;

use crate::config::SeedCounts;
use crate::entities::driver::{self, DriverStatus};
use crate::entities::ride::{self, RideStatus};
use crate::entities::rider::{self, PaymentMethod};
use crate::entities::surge_zone::{self, DemandLevel};
use crate::entities::{format_id, vehicle};
use crate::error::{AppError, AppResult};
use crate::utils::fare::{round_to, seed_fare};

pub const MAX_DRIVERS: u32 = 999;
pub const MAX_RIDERS: u32 = 999;
pub const MAX_RIDES: u32 = 9999;
pub const MAX_ZONES: u32 = 99;

const DRIVER_NAMES: [&str; 12] = [
    "John Smith",
    "Emma Johnson",
    "Michael Brown",
    "Sarah Davis",
    "David Wilson",
    "Lisa Anderson",
    "James Taylor",
    "Maria Garcia",
    "Robert Martinez",
    "Jennifer Lopez",
    "William Clark",
    "Patricia White",
];

const RIDER_NAMES: [&str; 12] = [
    "Alice Cooper",
    "Bob Martin",
    "Charlie Evans",
    "Diana Prince",
    "Edward Norton",
    "Fiona Apple",
    "George Lucas",
    "Hannah Montana",
    "Ian McKellen",
    "Julia Roberts",
    "Kevin Hart",
    "Laura Palmer",
];

const VEHICLE_MODELS: [(&str, &str, i32); 12] = [
    ("Toyota", "Camry", 2021),
    ("Honda", "Civic", 2022),
    ("Ford", "Fusion", 2020),
    ("Chevrolet", "Malibu", 2021),
    ("Nissan", "Altima", 2022),
    ("Hyundai", "Sonata", 2021),
    ("Kia", "Optima", 2020),
    ("Mazda", "Mazda6", 2021),
    ("Volkswagen", "Passat", 2022),
    ("Subaru", "Legacy", 2021),
    ("Tesla", "Model 3", 2023),
    ("BMW", "3 Series", 2022),
];

const COLORS: [&str; 8] = [
    "Black", "White", "Silver", "Blue", "Red", "Gray", "Green", "Brown",
];

const STREETS: [&str; 10] = [
    "Main", "Oak", "Pine", "Maple", "Broadway", "Park", "Market", "First", "Second", "Third",
];

const ZONE_TYPES: [&str; 10] = [
    "Downtown",
    "Uptown",
    "Midtown",
    "Airport",
    "Business District",
    "Suburb",
    "Mall Area",
    "Train Station",
    "University",
    "Beach Area",
];

const ZONE_SECTORS: [&str; 5] = ["North", "South", "East", "West", "Central"];

/// Bounding box of generated coordinates (lower Manhattan).
const LAT_RANGE: (f64, f64) = (40.7, 40.8);
const LNG_RANGE: (f64, f64) = (-74.0, -73.9);

/// A complete replacement for the five collections.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub drivers: Vec<driver::Model>,
    pub riders: Vec<rider::Model>,
    pub vehicles: Vec<vehicle::Model>,
    pub rides: Vec<ride::Model>,
    pub zones: Vec<surge_zone::Model>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    pub drivers: usize,
    pub riders: usize,
    pub vehicles: usize,
    pub rides: usize,
    pub zones: usize,
}

impl Dataset {
    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            drivers: self.drivers.len(),
            riders: self.riders.len(),
            vehicles: self.vehicles.len(),
            rides: self.rides.len(),
            zones: self.zones.len(),
        }
    }

    /// Run every entity's invariant check plus the driver/vehicle pairing.
    pub fn validate(&self) -> Result<(), String> {
        for v in &self.vehicles {
            v.validate()?;
        }
        for d in &self.drivers {
            d.validate()?;
            if !self.vehicles.iter().any(|v| v.vehicle_id == d.vehicle_id) {
                return Err(format!(
                    "Driver {} references missing vehicle {}",
                    d.driver_id, d.vehicle_id
                ));
            }
        }
        for r in &self.riders {
            r.validate()?;
        }
        for r in &self.rides {
            r.validate()?;
        }
        for z in &self.zones {
            z.validate()?;
        }
        Ok(())
    }
}

pub fn check_counts(counts: &SeedCounts) -> AppResult<()> {
    let limits = [
        ("drivers", counts.drivers, MAX_DRIVERS),
        ("riders", counts.riders, MAX_RIDERS),
        ("rides", counts.rides, MAX_RIDES),
        ("zones", counts.zones, MAX_ZONES),
    ];
    for (name, count, max) in limits {
        if count > max {
            return Err(AppError::Validation(format!(
                "Cannot seed {} {}, the limit is {}",
                count, name, max
            )));
        }
    }
    if counts.rides > 0 && (counts.drivers == 0 || counts.riders == 0) {
        return Err(AppError::Validation(
            "Rides need at least one driver and one rider".to_string(),
        ));
    }
    Ok(())
}

/// Generate a dataset of the requested size.
pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    now: DateTime<Utc>,
    counts: &SeedCounts,
) -> AppResult<Dataset> {
    check_counts(counts)?;

    let dataset = Dataset {
        drivers: (1..=counts.drivers).map(|i| generate_driver(rng, i)).collect(),
        riders: (1..=counts.riders).map(|i| generate_rider(rng, i)).collect(),
        // One vehicle per driver, sharing the index
        vehicles: (1..=counts.drivers).map(|i| generate_vehicle(rng, i)).collect(),
        rides: (1..=counts.rides)
            .map(|i| generate_ride(rng, i, now, counts.drivers, counts.riders))
            .collect(),
        zones: (1..=counts.zones).map(|i| generate_zone(rng, i, now)).collect(),
    };

    dataset
        .validate()
        .map_err(|e| AppError::Internal(format!("Generated dataset is inconsistent: {}", e)))?;

    Ok(dataset)
}

fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

/// Name pools are indexed by position; larger datasets cycle through them.
fn pooled<'a>(pool: &[&'a str], index: u32) -> &'a str {
    pool[(index as usize - 1) % pool.len()]
}

fn phone<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("+1-555-{}", rng.gen_range(1000..=9999))
}

fn coordinate<R: Rng + ?Sized>(rng: &mut R) -> (f64, f64) {
    (
        round_to(rng.gen_range(LAT_RANGE.0..LAT_RANGE.1), 4),
        round_to(rng.gen_range(LNG_RANGE.0..LNG_RANGE.1), 4),
    )
}

fn generate_driver<R: Rng + ?Sized>(rng: &mut R, index: u32) -> driver::Model {
    let (lat, lng) = coordinate(rng);
    driver::Model {
        driver_id: format_id("DRV", index, 3),
        name: pooled(&DRIVER_NAMES, index).to_string(),
        phone: phone(rng),
        rating: round_to(rng.gen_range(4.0..=5.0), 2),
        total_rides: rng.gen_range(50..=500),
        status: *pick(rng, &DriverStatus::ALL),
        location_lat: lat,
        location_lng: lng,
        earnings_today: round_to(rng.gen_range(50.0..300.0), 2),
        vehicle_id: format_id("VEH", index, 3),
    }
}

fn generate_rider<R: Rng + ?Sized>(rng: &mut R, index: u32) -> rider::Model {
    rider::Model {
        rider_id: format_id("RDR", index, 3),
        name: pooled(&RIDER_NAMES, index).to_string(),
        phone: phone(rng),
        rating: round_to(rng.gen_range(4.0..=5.0), 2),
        total_rides: rng.gen_range(10..=200),
        payment_method: *pick(rng, &PaymentMethod::ALL),
        wallet_balance: round_to(rng.gen_range(0.0..100.0), 2),
    }
}

fn generate_vehicle<R: Rng + ?Sized>(rng: &mut R, index: u32) -> vehicle::Model {
    let (make, model, year) = VEHICLE_MODELS[(index as usize - 1) % VEHICLE_MODELS.len()];
    let mut letter = || char::from(b'A' + rng.gen_range(0..26u8));
    let prefix: String = [letter(), letter()].iter().collect();

    vehicle::Model {
        vehicle_id: format_id("VEH", index, 3),
        make: make.to_string(),
        model: model.to_string(),
        year,
        license_plate: format!("{}{}", prefix, rng.gen_range(1000..=9999)),
        color: pick(rng, &COLORS).to_string(),
        capacity: *pick(rng, &vehicle::CAPACITIES),
    }
}

fn generate_ride<R: Rng + ?Sized>(
    rng: &mut R,
    index: u32,
    now: DateTime<Utc>,
    driver_count: u32,
    rider_count: u32,
) -> ride::Model {
    let request_time = now - Duration::hours(rng.gen_range(0..=72));
    let duration = rng.gen_range(10..=60);
    let distance_km = round_to(rng.gen_range(2.0..25.0), 2);
    let surge_multiplier = round_to(rng.gen_range(1.0..2.5), 1);
    let fare = seed_fare(rng, distance_km, surge_multiplier);
    let status = *pick(rng, &RideStatus::ALL);

    let driver_id = format_id("DRV", rng.gen_range(1..=driver_count), 3);
    let rider_id = format_id("RDR", rng.gen_range(1..=rider_count), 3);
    let (pickup_lat, pickup_lng) = coordinate(rng);
    let pickup_address = format!("{} {} St", rng.gen_range(100..=999), pick(rng, &STREETS));
    let (dropoff_lat, dropoff_lng) = coordinate(rng);
    let dropoff_address = format!("{} {} Ave", rng.gen_range(100..=999), pick(rng, &STREETS));
    let start_offset = rng.gen_range(2..=8);

    let rating = match status {
        RideStatus::Completed => Some(round_to(rng.gen_range(3.5..=5.0), 1)),
        _ => None,
    };

    ride::Model {
        ride_id: format_id("RIDE", index, 4),
        driver_id,
        rider_id,
        pickup_address,
        pickup_lat,
        pickup_lng,
        dropoff_address,
        dropoff_lat,
        dropoff_lng,
        request_time,
        start_time: Some(request_time + Duration::minutes(start_offset)),
        end_time: Some(request_time + Duration::minutes(duration.into())),
        status,
        distance_km,
        duration_minutes: Some(duration),
        base_fare: fare.base_fare,
        surge_multiplier,
        total_fare: fare.total_fare,
        payment_status: status.payment_status(),
        rating,
    }
}

fn generate_zone<R: Rng + ?Sized>(rng: &mut R, index: u32, now: DateTime<Utc>) -> surge_zone::Model {
    surge_zone::Model {
        zone_id: format_id("ZONE", index, 2),
        zone_name: format!("{} {}", pick(rng, &ZONE_TYPES), pick(rng, &ZONE_SECTORS)),
        current_surge: round_to(rng.gen_range(1.0..=2.8), 1),
        demand_level: *pick(rng, &DemandLevel::ALL),
        available_drivers: rng.gen_range(2..=25),
        active_requests: rng.gen_range(0..=40),
        timestamp: now,
        avg_wait_time: rng.gen_range(2..=15),
    }
}
