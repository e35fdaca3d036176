use koinonia_db::models::NotificationKind;

/// Action phrase appended to the actor's display name when rendering a
/// notification body.
pub fn action_phrase(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Like => "liked your post.",
        NotificationKind::Comment => "commented on your post.",
        NotificationKind::Reply => "replied to your comment.",
        NotificationKind::MembershipApproved => "approved your congregation membership.",
        NotificationKind::Other => "interacted with you.",
    }
}
