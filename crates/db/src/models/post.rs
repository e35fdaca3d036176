use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Lean projection of a community post. The full document is owned by the
/// content service; only the fields the notification pipeline reads are
/// modeled here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub community_id: ObjectId,
    pub author_id: ObjectId,
}

impl Post {
    pub const COLLECTION: &'static str = "posts";
}
