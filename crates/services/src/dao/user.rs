use bson::oid::ObjectId;
use mongodb::Database;

use koinonia_db::models::User;

use super::base::{BaseDao, DaoResult};

pub struct UserDao {
    pub base: BaseDao<User>,
}

impl UserDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, User::COLLECTION),
        }
    }

    pub async fn get(&self, id: ObjectId) -> DaoResult<User> {
        self.base.find_by_id(id).await
    }
}
