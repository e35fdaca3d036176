use bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// In-app notification record. Written exactly once per qualifying event;
/// the rendering client owns reads and the read/unread flip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub recipient_id: ObjectId,
    pub actor_id: ObjectId,
    pub actor_name: String,
    pub actor_photo_url: Option<String>,
    pub kind: NotificationKind,
    pub entity_id: ObjectId,
    pub entity_path: String,
    #[serde(default)]
    pub is_read: bool,
    pub created_at: DateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Like,
    Comment,
    Reply,
    MembershipApproved,
    Other,
}

impl Notification {
    pub const COLLECTION: &'static str = "notifications";
}
