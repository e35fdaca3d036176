use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Lean projection of the app's user document: the display fields carried
/// into notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub display_name: String,
    pub avatar: Option<String>,
}

impl User {
    pub const COLLECTION: &'static str = "users";
}
