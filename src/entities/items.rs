//! `SeaORM` Entity for items table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::ledger::{ChatId, MessageId, Record};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub chat_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub message_id: i64,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    pub price: i64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Record {
    fn from(model: Model) -> Self {
        Record {
            chat_id: ChatId(model.chat_id),
            message_id: MessageId(model.message_id),
            name: model.name,
            price: model.price,
            created_at: model.created_at,
        }
    }
}
