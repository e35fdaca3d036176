use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Lean projection of a congregation document. Used as the (non-human)
/// actor of membership notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Congregation {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub logo: Option<String>,
}

impl Congregation {
    pub const COLLECTION: &'static str = "congregations";
}
