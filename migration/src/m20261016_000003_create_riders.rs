use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Rider::Table)
                    .if_not_exists()
                    .col(string_len(Rider::RiderId, 16).primary_key())
                    .col(string_len(Rider::Name, 100).not_null())
                    .col(string_len(Rider::Phone, 20).not_null())
                    .col(double(Rider::Rating).not_null())
                    .col(integer(Rider::TotalRides).not_null())
                    .col(string_len(Rider::PaymentMethod, 20).not_null())
                    .col(double(Rider::WalletBalance).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Rider::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Rider {
    #[sea_orm(iden = "riders")]
    Table,
    RiderId,
    Name,
    Phone,
    Rating,
    TotalRides,
    PaymentMethod,
    WalletBalance,
}
