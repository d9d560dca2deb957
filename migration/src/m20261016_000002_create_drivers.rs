use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // vehicle_id is a plain reference; integrity is checked by the writers
        manager
            .create_table(
                Table::create()
                    .table(Driver::Table)
                    .if_not_exists()
                    .col(string_len(Driver::DriverId, 16).primary_key())
                    .col(string_len(Driver::Name, 100).not_null())
                    .col(string_len(Driver::Phone, 20).not_null())
                    .col(double(Driver::Rating).not_null())
                    .col(integer(Driver::TotalRides).not_null())
                    .col(string_len(Driver::Status, 16).not_null())
                    .col(double(Driver::LocationLat).not_null())
                    .col(double(Driver::LocationLng).not_null())
                    .col(double(Driver::EarningsToday).not_null())
                    .col(string_len(Driver::VehicleId, 16).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_drivers_status")
                    .table(Driver::Table)
                    .col(Driver::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Driver::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Driver {
    #[sea_orm(iden = "drivers")]
    Table,
    DriverId,
    Name,
    Phone,
    Rating,
    TotalRides,
    Status,
    LocationLat,
    LocationLng,
    EarningsToday,
    VehicleId,
}
