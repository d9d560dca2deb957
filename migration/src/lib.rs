pub use sea_orm_migration::prelude::*;

mod m20261016_000001_create_vehicles;
mod m20261016_000002_create_drivers;
mod m20261016_000003_create_riders;
mod m20261016_000004_create_rides;
mod m20261016_000005_create_surge_pricing;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261016_000001_create_vehicles::Migration),
            Box::new(m20261016_000002_create_drivers::Migration),
            Box::new(m20261016_000003_create_riders::Migration),
            Box::new(m20261016_000004_create_rides::Migration),
            Box::new(m20261016_000005_create_surge_pricing::Migration),
        ]
    }
}
