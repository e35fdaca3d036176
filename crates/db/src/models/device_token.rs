use bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// Push registration for one installed app instance. Registration is owned
/// by the client-facing API; this subsystem only reads tokens for fan-out
/// and deletes the ones the transport reports as permanently dead.
///
/// Token uniqueness across documents is not guaranteed (re-installs can
/// re-register the same token under a new document), so cleanup matches by
/// `token` value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceToken {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub owner_id: ObjectId,
    pub token: String,
    #[serde(default)]
    pub platform: DevicePlatform,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DevicePlatform {
    #[default]
    Web,
    Android,
    Ios,
}

impl DeviceToken {
    pub const COLLECTION: &'static str = "device_tokens";
}
