use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // One row per confirmation message the bot sent for a recorded item
        manager
            .create_table(
                Table::create()
                    .table(Items::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Items::ChatId).big_integer().not_null())
                    .col(ColumnDef::new(Items::MessageId).big_integer().not_null())
                    .col(ColumnDef::new(Items::Name).text().not_null())
                    .col(ColumnDef::new(Items::Price).big_integer().not_null())
                    .col(
                        ColumnDef::new(Items::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(Items::ChatId)
                            .col(Items::MessageId),
                    )
                    .to_owned(),
            )
            .await?;

        // Period reports filter by chat and a created_at range
        manager
            .create_index(
                Index::create()
                    .name("idx_items_chat_id_created_at")
                    .table(Items::Table)
                    .col(Items::ChatId)
                    .col(Items::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Items::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Items {
    Table,
    ChatId,
    MessageId,
    Name,
    Price,
    CreatedAt,
}
