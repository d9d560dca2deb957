use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SurgeZone::Table)
                    .if_not_exists()
                    .col(string_len(SurgeZone::ZoneId, 16).primary_key())
                    .col(string_len(SurgeZone::ZoneName, 100).not_null())
                    .col(double(SurgeZone::CurrentSurge).not_null())
                    .col(string_len(SurgeZone::DemandLevel, 16).not_null())
                    .col(integer(SurgeZone::AvailableDrivers).not_null())
                    .col(integer(SurgeZone::ActiveRequests).not_null())
                    .col(timestamp_with_time_zone(SurgeZone::Timestamp).not_null())
                    .col(integer(SurgeZone::AvgWaitTime).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SurgeZone::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum SurgeZone {
    #[sea_orm(iden = "surge_pricing")]
    Table,
    ZoneId,
    ZoneName,
    CurrentSurge,
    DemandLevel,
    AvailableDrivers,
    ActiveRequests,
    Timestamp,
    AvgWaitTime,
}
