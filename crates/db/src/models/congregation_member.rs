use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Membership of a user in a congregation. The approval flow mutates
/// `status`; the notification pipeline only observes the transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CongregationMember {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub congregation_id: ObjectId,
    pub user_id: ObjectId,
    pub status: MembershipStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    Pending,
    Member,
    Rejected,
}

impl CongregationMember {
    pub const COLLECTION: &'static str = "congregation_members";
}
