use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Lean projection of a like document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Like {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub community_id: ObjectId,
    pub post_id: ObjectId,
    pub user_id: ObjectId,
}

impl Like {
    pub const COLLECTION: &'static str = "likes";
}
