use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vehicle::Table)
                    .if_not_exists()
                    .col(string_len(Vehicle::VehicleId, 16).primary_key())
                    .col(string_len(Vehicle::Make, 50).not_null())
                    .col(string_len(Vehicle::Model, 50).not_null())
                    .col(integer(Vehicle::Year).not_null())
                    .col(string_len(Vehicle::LicensePlate, 16).not_null())
                    .col(string_len(Vehicle::Color, 20).not_null())
                    .col(integer(Vehicle::Capacity).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Vehicle::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Vehicle {
    #[sea_orm(iden = "vehicles")]
    Table,
    VehicleId,
    Make,
    Model,
    Year,
    LicensePlate,
    Color,
    Capacity,
}
