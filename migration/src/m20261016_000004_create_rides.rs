use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ride::Table)
                    .if_not_exists()
                    .col(string_len(Ride::RideId, 16).primary_key())
                    .col(string_len(Ride::DriverId, 16).not_null())
                    .col(string_len(Ride::RiderId, 16).not_null())
                    .col(string_len(Ride::PickupAddress, 200).not_null())
                    .col(double(Ride::PickupLat).not_null())
                    .col(double(Ride::PickupLng).not_null())
                    .col(string_len(Ride::DropoffAddress, 200).not_null())
                    .col(double(Ride::DropoffLat).not_null())
                    .col(double(Ride::DropoffLng).not_null())
                    .col(timestamp_with_time_zone(Ride::RequestTime).not_null())
                    .col(timestamp_with_time_zone_null(Ride::StartTime))
                    .col(timestamp_with_time_zone_null(Ride::EndTime))
                    .col(string_len(Ride::Status, 16).not_null())
                    .col(double(Ride::DistanceKm).not_null())
                    .col(integer_null(Ride::DurationMinutes))
                    .col(double(Ride::BaseFare).not_null())
                    .col(double(Ride::SurgeMultiplier).not_null())
                    .col(double(Ride::TotalFare).not_null())
                    .col(string_len(Ride::PaymentStatus, 16).not_null())
                    .col(double_null(Ride::Rating))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_rides_status")
                    .table(Ride::Table)
                    .col(Ride::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ride::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Ride {
    #[sea_orm(iden = "rides")]
    Table,
    RideId,
    DriverId,
    RiderId,
    PickupAddress,
    PickupLat,
    PickupLng,
    DropoffAddress,
    DropoffLat,
    DropoffLng,
    RequestTime,
    StartTime,
    EndTime,
    Status,
    DistanceKm,
    DurationMinutes,
    BaseFare,
    SurgeMultiplier,
    TotalFare,
    PaymentStatus,
    Rating,
}
