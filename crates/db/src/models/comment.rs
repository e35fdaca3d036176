use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Lean projection of a comment. `parent_comment_id` present means this is
/// a reply to another comment rather than a top-level comment on the post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub community_id: ObjectId,
    pub post_id: ObjectId,
    pub author_id: ObjectId,
    pub parent_comment_id: Option<ObjectId>,
}

impl Comment {
    pub const COLLECTION: &'static str = "comments";
}
