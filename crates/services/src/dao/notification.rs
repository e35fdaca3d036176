use async_trait::async_trait;
use bson::oid::ObjectId;
use mongodb::Database;

use koinonia_db::models::Notification;

use super::base::{BaseDao, DaoResult};
use crate::notify::NotificationStore;

pub struct NotificationDao {
    pub base: BaseDao<Notification>,
}

impl NotificationDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Notification::COLLECTION),
        }
    }

    pub async fn create(&self, record: &Notification) -> DaoResult<ObjectId> {
        self.base.insert_one(record).await
    }
}

#[async_trait]
impl NotificationStore for NotificationDao {
    async fn create(&self, record: &Notification) -> DaoResult<ObjectId> {
        NotificationDao::create(self, record).await
    }
}
