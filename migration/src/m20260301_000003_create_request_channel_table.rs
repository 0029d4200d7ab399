use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260301_000001_create_channel_table::Channel,
    m20260301_000002_create_searching_request_table::SearchingRequest,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RequestChannel::Table)
                    .if_not_exists()
                    .col(integer(RequestChannel::RequestId))
                    .col(integer(RequestChannel::ChannelId))
                    .col(big_integer_null(RequestChannel::Views))
                    .col(integer_null(RequestChannel::RepostLevel))
                    // The composite key is the authoritative duplicate-link guard
                    .primary_key(
                        Index::create()
                            .name("pk_request_channel")
                            .col(RequestChannel::RequestId)
                            .col(RequestChannel::ChannelId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_request_channel_request_id")
                            .from(RequestChannel::Table, RequestChannel::RequestId)
                            .to(SearchingRequest::Table, SearchingRequest::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_request_channel_channel_id")
                            .from(RequestChannel::Table, RequestChannel::ChannelId)
                            .to(Channel::Table, Channel::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_request_channel_channel_id")
                    .table(RequestChannel::Table)
                    .col(RequestChannel::ChannelId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_request_channel_channel_id")
                    .table(RequestChannel::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(RequestChannel::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum RequestChannel {
    Table,
    RequestId,
    ChannelId,
    Views,
    RepostLevel,
}
