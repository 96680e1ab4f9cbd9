//! Postgres-backed [`StoragePort`].

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::entities::{items, prelude::*};
use crate::errors::StorageError;
use crate::models::ledger::{ChatId, MessageId, Record};
use crate::services::period::DateRange;
use crate::services::ports::StoragePort;

#[derive(Clone)]
pub struct ItemStore {
    db: DatabaseConnection,
}

impl ItemStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StoragePort for ItemStore {
    async fn insert(&self, record: &Record) -> Result<(), StorageError> {
        let row = items::ActiveModel {
            chat_id: Set(record.chat_id.0),
            message_id: Set(record.message_id.0),
            name: Set(record.name.clone()),
            price: Set(record.price),
            created_at: Set(record.created_at),
        };

        Items::insert(row).exec_without_returning(&self.db).await?;

        tracing::debug!(
            chat_id = %record.chat_id,
            message_id = %record.message_id,
            "Inserted item"
        );
        Ok(())
    }

    async fn update(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        name: &str,
        price: i64,
    ) -> Result<u64, StorageError> {
        let result = Items::update_many()
            .col_expr(items::Column::Name, Expr::value(name.to_string()))
            .col_expr(items::Column::Price, Expr::value(price))
            .filter(items::Column::ChatId.eq(chat_id.0))
            .filter(items::Column::MessageId.eq(message_id.0))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    async fn query(&self, chat_id: ChatId, range: &DateRange) -> Result<Vec<Record>, StorageError> {
        let rows = Items::find()
            .filter(items::Column::ChatId.eq(chat_id.0))
            .filter(items::Column::CreatedAt.gte(range.start))
            .filter(items::Column::CreatedAt.lt(range.end))
            .order_by_asc(items::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(Record::from).collect())
    }
}
