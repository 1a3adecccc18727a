//! AI visits table migration
//!
//! Creates the `ai_visits` table holding one row per classified bot request:
//! - visited URL
//! - ingestion timestamp
//! - raw User-Agent header
//! - bot type label

use sea_orm_migration::prelude::*;

use crate::m20260301_000001_projects::Projects;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AiVisits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AiVisits::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AiVisits::ProjectId)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(AiVisits::Url).text().not_null())
                    .col(
                        ColumnDef::new(AiVisits::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AiVisits::UserAgent).text().null())
                    .col(
                        ColumnDef::new(AiVisits::BotType)
                            .string_len(32)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ai_visits_project_id")
                            .from(AiVisits::Table, AiVisits::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // project_id index for per-project queries
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_ai_visits_project_id")
                    .table(AiVisits::Table)
                    .col(AiVisits::ProjectId)
                    .to_owned(),
            )
            .await?;

        // timestamp index for time-range queries
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_ai_visits_timestamp")
                    .table(AiVisits::Table)
                    .col(AiVisits::Timestamp)
                    .to_owned(),
            )
            .await?;

        // composite index for per-project time series
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_ai_visits_project_time")
                    .table(AiVisits::Table)
                    .col(AiVisits::ProjectId)
                    .col(AiVisits::Timestamp)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_ai_visits_project_time").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_ai_visits_timestamp").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_ai_visits_project_id").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(AiVisits::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AiVisits {
    #[sea_orm(iden = "ai_visits")]
    Table,
    Id,
    ProjectId,
    Url,
    Timestamp,
    UserAgent,
    BotType,
}
