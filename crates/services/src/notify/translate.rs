//! Field-mapping layer between raw change events and the dispatcher.
//!
//! These functions are pure: the change-stream host performs the document
//! lookups and feeds the snapshots in. The self-notification guard is NOT
//! applied here; that stays in the dispatcher.

use koinonia_db::models::{
    Comment, Congregation, CongregationMember, Like, MembershipStatus, NotificationKind, Post,
    User,
};

use super::NotificationRequest;

/// Someone liked a post: notify the post's author.
pub fn like_created(like: &Like, post: &Post, actor: &User) -> NotificationRequest {
    NotificationRequest {
        recipient_id: post.author_id,
        actor_id: like.user_id,
        actor_name: actor.display_name.clone(),
        actor_photo_url: actor.avatar.clone(),
        kind: NotificationKind::Like,
        entity_id: like.post_id,
        entity_path: format!("/community/{}", like.community_id.to_hex()),
    }
}

/// Someone commented: a top-level comment notifies the post author, a reply
/// (parent comment present) notifies the parent comment's author.
pub fn comment_created(
    comment: &Comment,
    post: &Post,
    parent: Option<&Comment>,
    actor: &User,
) -> NotificationRequest {
    let (recipient_id, kind) = match parent {
        Some(parent) => (parent.author_id, NotificationKind::Reply),
        None => (post.author_id, NotificationKind::Comment),
    };

    NotificationRequest {
        recipient_id,
        actor_id: comment.author_id,
        actor_name: actor.display_name.clone(),
        actor_photo_url: actor.avatar.clone(),
        kind,
        entity_id: comment.post_id,
        entity_path: format!("/community/{}", comment.community_id.to_hex()),
    }
}

/// A membership document changed. Only the pending-to-member transition
/// notifies; every other pair of snapshots is ignored. The actor is the
/// congregation itself (non-human), so the display name comes from the
/// congregation document.
pub fn membership_approved(
    before: &CongregationMember,
    after: &CongregationMember,
    congregation: &Congregation,
) -> Option<NotificationRequest> {
    if before.status != MembershipStatus::Pending || after.status != MembershipStatus::Member {
        return None;
    }

    Some(NotificationRequest {
        recipient_id: after.user_id,
        actor_id: after.congregation_id,
        actor_name: congregation.name.clone(),
        actor_photo_url: congregation.logo.clone(),
        kind: NotificationKind::MembershipApproved,
        entity_id: after.congregation_id,
        entity_path: format!("/congregation/{}", after.congregation_id.to_hex()),
    })
}
