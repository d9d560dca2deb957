use chrono::Utc;
use rand::{rngs::StdRng, SeedableRng};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, TransactionTrait,
};

use crate::config::SeedCounts;
use crate::entities::{driver, ride, rider, surge_zone, vehicle};
use crate::error::AppResult;
use crate::services::generator::{self, Dataset, DatasetSummary};

/// Rows per INSERT statement; keeps wide tables under SQLite's bind limit.
const INSERT_CHUNK: usize = 40;

/// Replace all five collections with a freshly generated dataset.
///
/// `rng_seed` makes the run reproducible; without it the generator is seeded
/// from the OS.
pub async fn seed(
    db: &DatabaseConnection,
    counts: &SeedCounts,
    rng_seed: Option<u64>,
) -> AppResult<DatasetSummary> {
    let dataset = {
        let mut rng = match rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        generator::generate(&mut rng, Utc::now(), counts)?
    };

    replace_all(db, &dataset).await
}

/// Delete every row of the five collections and insert `dataset`, inside a
/// single transaction. On error nothing is committed.
pub async fn replace_all(db: &DatabaseConnection, dataset: &Dataset) -> AppResult<DatasetSummary> {
    let txn = db.begin().await?;

    ride::Entity::delete_many().exec(&txn).await?;
    driver::Entity::delete_many().exec(&txn).await?;
    rider::Entity::delete_many().exec(&txn).await?;
    vehicle::Entity::delete_many().exec(&txn).await?;
    surge_zone::Entity::delete_many().exec(&txn).await?;

    insert_all::<vehicle::ActiveModel, _>(&txn, &dataset.vehicles).await?;
    insert_all::<driver::ActiveModel, _>(&txn, &dataset.drivers).await?;
    insert_all::<rider::ActiveModel, _>(&txn, &dataset.riders).await?;
    insert_all::<ride::ActiveModel, _>(&txn, &dataset.rides).await?;
    insert_all::<surge_zone::ActiveModel, _>(&txn, &dataset.zones).await?;

    txn.commit().await?;

    let summary = dataset.summary();
    tracing::info!(
        drivers = summary.drivers,
        riders = summary.riders,
        vehicles = summary.vehicles,
        rides = summary.rides,
        zones = summary.zones,
        "Database seeded"
    );

    Ok(summary)
}

async fn insert_all<A, C>(conn: &C, models: &[<A::Entity as EntityTrait>::Model]) -> AppResult<()>
where
    A: ActiveModelTrait + Send,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A> + Clone,
    C: ConnectionTrait,
{
    for chunk in models.chunks(INSERT_CHUNK) {
        <A::Entity as EntityTrait>::insert_many(
            chunk.iter().cloned().map(IntoActiveModel::into_active_model),
        )
        .exec_without_returning(conn)
        .await?;
    }
    Ok(())
}

/// Seed with `counts` only when no ride exists yet.
pub async fn seed_if_empty(
    db: &DatabaseConnection,
    counts: &SeedCounts,
    rng_seed: Option<u64>,
) -> AppResult<Option<DatasetSummary>> {
    if ride::Entity::find().count(db).await? > 0 {
        tracing::debug!("Rides present, skipping startup seed");
        return Ok(None);
    }

    seed(db, counts, rng_seed).await.map(Some)
}
