use bson::oid::ObjectId;
use mongodb::Database;

use koinonia_db::models::Comment;

use super::base::{BaseDao, DaoResult};

pub struct CommentDao {
    pub base: BaseDao<Comment>,
}

impl CommentDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Comment::COLLECTION),
        }
    }

    pub async fn get(&self, id: ObjectId) -> DaoResult<Comment> {
        self.base.find_by_id(id).await
    }
}
