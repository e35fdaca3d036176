use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use mongodb::Database;

use koinonia_db::models::DeviceToken;

use super::base::{BaseDao, DaoResult};
use crate::notify::DeviceTokenStore;

pub struct DeviceTokenDao {
    pub base: BaseDao<DeviceToken>,
}

impl DeviceTokenDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, DeviceToken::COLLECTION),
        }
    }

    pub async fn tokens_for_owner(&self, owner_id: ObjectId) -> DaoResult<Vec<DeviceToken>> {
        self.base
            .find_many(doc! { "owner_id": owner_id }, None)
            .await
    }

    /// Deletes every registration carrying the given token value. Matching
    /// by value (not `_id`) is deliberate: the same token can live in more
    /// than one document.
    pub async fn delete_by_token(&self, token: &str) -> DaoResult<u64> {
        self.base.hard_delete(doc! { "token": token }).await
    }
}

#[async_trait]
impl DeviceTokenStore for DeviceTokenDao {
    async fn tokens_for_owner(&self, owner_id: ObjectId) -> DaoResult<Vec<DeviceToken>> {
        DeviceTokenDao::tokens_for_owner(self, owner_id).await
    }

    async fn delete_by_token(&self, token: &str) -> DaoResult<u64> {
        DeviceTokenDao::delete_by_token(self, token).await
    }
}
