use sea_orm_migration::{prelude::*, schema::*};

/// Partial unique index keeping at most one draft (status code 1) per creator.
///
/// Written as raw SQL because the index builder has no partial-index clause;
/// the statement is valid for both Postgres and SQLite.
const SINGLE_DRAFT_INDEX: &str = "CREATE UNIQUE INDEX IF NOT EXISTS \
    idx_searching_request_single_draft ON searching_request (creator_id) WHERE status = 1";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SearchingRequest::Table)
                    .if_not_exists()
                    .col(pk_auto(SearchingRequest::Id))
                    .col(integer(SearchingRequest::Status))
                    .col(
                        timestamp_with_time_zone(SearchingRequest::CreationDate)
                            .default(Expr::current_timestamp()),
                    )
                    .col(integer(SearchingRequest::CreatorId))
                    .col(integer_null(SearchingRequest::ModeratorId))
                    .col(timestamp_with_time_zone_null(SearchingRequest::FormingDate))
                    .col(timestamp_with_time_zone_null(
                        SearchingRequest::CompletionDate,
                    ))
                    .col(text_null(SearchingRequest::Description))
                    .col(double_null(SearchingRequest::Coverage))
                    .col(double_null(SearchingRequest::Coefficient))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_searching_request_status_forming_date")
                    .table(SearchingRequest::Table)
                    .col(SearchingRequest::Status)
                    .col(SearchingRequest::FormingDate)
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(SINGLE_DRAFT_INDEX)
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP INDEX IF EXISTS idx_searching_request_single_draft")
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_searching_request_status_forming_date")
                    .table(SearchingRequest::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(SearchingRequest::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum SearchingRequest {
    Table,
    Id,
    Status,
    CreationDate,
    CreatorId,
    ModeratorId,
    FormingDate,
    CompletionDate,
    Description,
    Coverage,
    Coefficient,
}
