use bson::oid::ObjectId;
use mongodb::Database;

use koinonia_db::models::Congregation;

use super::base::{BaseDao, DaoResult};

pub struct CongregationDao {
    pub base: BaseDao<Congregation>,
}

impl CongregationDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Congregation::COLLECTION),
        }
    }

    pub async fn get(&self, id: ObjectId) -> DaoResult<Congregation> {
        self.base.find_by_id(id).await
    }
}
