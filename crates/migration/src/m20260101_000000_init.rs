//! Initial schema migration.
//!
//! Creates the schema for the cash book:
//!
//! - `users`: authentication
//! - `transactions`: every cash movement, owned by a user

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Users {
    Table,
    Username,
    Password,
}

#[derive(Iden)]
enum Transactions {
    Table,
    Id,
    UserId,
    Kind,
    AmountMinor,
    Category,
    Remark,
    BankCash,
    OccurredAt,
    CreatedAt,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Users
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Transactions
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transactions::UserId).string().not_null())
                    .col(ColumnDef::new(Transactions::Kind).string().not_null())
                    .col(
                        ColumnDef::new(Transactions::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::Category).string().not_null())
                    .col(
                        ColumnDef::new(Transactions::Remark)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Transactions::BankCash).string().not_null())
                    .col(
                        ColumnDef::new(Transactions::OccurredAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transactions-user_id")
                            .from(Transactions::Table, Transactions::UserId)
                            .to(Users::Table, Users::Username)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transactions-user_id-occurred_at")
                    .table(Transactions::Table)
                    .col(Transactions::UserId)
                    .col(Transactions::OccurredAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
