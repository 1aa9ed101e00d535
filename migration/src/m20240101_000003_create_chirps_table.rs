use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Chirps::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Chirps::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Chirps::Body).text().not_null())
                    .col(ColumnDef::new(Chirps::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(Chirps::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Chirps::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_chirps_user_id")
                            .from(Chirps::Table, Chirps::UserId)
                            .to(Users::Table, Users::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_chirps_user_id")
                    .table(Chirps::Table)
                    .col(Chirps::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_chirps_created_at")
                    .table(Chirps::Table)
                    .col(Chirps::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Chirps::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Chirps {
    Table,
    Id,
    Body,
    UserId,
    CreatedAt,
    UpdatedAt,
}
