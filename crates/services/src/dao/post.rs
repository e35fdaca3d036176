use bson::oid::ObjectId;
use mongodb::Database;

use koinonia_db::models::Post;

use super::base::{BaseDao, DaoResult};

pub struct PostDao {
    pub base: BaseDao<Post>,
}

impl PostDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Post::COLLECTION),
        }
    }

    pub async fn get(&self, id: ObjectId) -> DaoResult<Post> {
        self.base.find_by_id(id).await
    }
}
