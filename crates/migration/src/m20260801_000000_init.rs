//! Initial schema migration - creates all tables from scratch.
//!
//! - `users`: accounts with hashed credentials and profile labels
//! - `expenses`: categorized outflows per user
//! - `incomes`: sourced inflows per user
//! - `special_payments`: one-off payments tracked apart from expenses
//! - `challenges`: self-set savings goals with optional deadlines
//!
//! The unique indexes on `users.email` / `users.username` are the
//! authoritative guard for registration conflicts; service-level pre-checks
//! only shape the error message.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    Username,
    PasswordHash,
    ContactNumber,
    Position,
    IncomeSources,
    FinancialGoals,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Expenses {
    Table,
    Id,
    Amount,
    Category,
    Date,
    Reason,
    UserId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Incomes {
    Table,
    Id,
    Amount,
    Source,
    Date,
    UserId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum SpecialPayments {
    Table,
    Id,
    PaidAmount,
    PaidDate,
    Reason,
    UserId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Challenges {
    Table,
    Id,
    Challenge,
    ChallengeEnd,
    UserId,
    CreatedAt,
    UpdatedAt,
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
                    .col(ColumnDef::new(Users::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::Username).string().not_null())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::ContactNumber).string())
                    .col(ColumnDef::new(Users::Position).string().not_null())
                    .col(ColumnDef::new(Users::IncomeSources).string().not_null())
                    .col(ColumnDef::new(Users::FinancialGoals).string().not_null())
                    .col(ColumnDef::new(Users::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-users-email-unique")
                    .table(Users::Table)
                    .col(Users::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-users-username-unique")
                    .table(Users::Table)
                    .col(Users::Username)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Expenses
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Expenses::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Expenses::Amount).double().not_null())
                    .col(ColumnDef::new(Expenses::Category).string().not_null())
                    .col(ColumnDef::new(Expenses::Date).date().not_null())
                    .col(ColumnDef::new(Expenses::Reason).string())
                    .col(ColumnDef::new(Expenses::UserId).string().not_null())
                    .col(ColumnDef::new(Expenses::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Expenses::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-expenses-user_id-date")
                    .table(Expenses::Table)
                    .col(Expenses::UserId)
                    .col(Expenses::Date)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Incomes
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Incomes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Incomes::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Incomes::Amount).double().not_null())
                    .col(ColumnDef::new(Incomes::Source).string().not_null())
                    .col(ColumnDef::new(Incomes::Date).date().not_null())
                    .col(ColumnDef::new(Incomes::UserId).string().not_null())
                    .col(ColumnDef::new(Incomes::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Incomes::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-incomes-user_id-date")
                    .table(Incomes::Table)
                    .col(Incomes::UserId)
                    .col(Incomes::Date)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Special payments
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(SpecialPayments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SpecialPayments::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SpecialPayments::PaidAmount)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SpecialPayments::PaidDate).date().not_null())
                    .col(ColumnDef::new(SpecialPayments::Reason).string())
                    .col(ColumnDef::new(SpecialPayments::UserId).string().not_null())
                    .col(
                        ColumnDef::new(SpecialPayments::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SpecialPayments::UpdatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-special_payments-user_id-paid_date")
                    .table(SpecialPayments::Table)
                    .col(SpecialPayments::UserId)
                    .col(SpecialPayments::PaidDate)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Challenges
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Challenges::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Challenges::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Challenges::Challenge).string().not_null())
                    .col(ColumnDef::new(Challenges::ChallengeEnd).date())
                    .col(ColumnDef::new(Challenges::UserId).string().not_null())
                    .col(ColumnDef::new(Challenges::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Challenges::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-challenges-user_id-created_at")
                    .table(Challenges::Table)
                    .col(Challenges::UserId)
                    .col(Challenges::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [
            TableDropStatement::new().table(Challenges::Table).to_owned(),
            TableDropStatement::new()
                .table(SpecialPayments::Table)
                .to_owned(),
            TableDropStatement::new().table(Incomes::Table).to_owned(),
            TableDropStatement::new().table(Expenses::Table).to_owned(),
            TableDropStatement::new().table(Users::Table).to_owned(),
        ] {
            manager.drop_table(table).await?;
        }
        Ok(())
    }
}
