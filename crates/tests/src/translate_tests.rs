use bson::oid::ObjectId;
use koinonia_db::models::{
    Comment, Congregation, CongregationMember, Like, MembershipStatus, NotificationKind, Post,
    User,
};
use koinonia_services::notify::translate;

fn user(name: &str) -> User {
    User {
        id: Some(ObjectId::new()),
        display_name: name.to_string(),
        avatar: Some(format!("https://cdn.example.test/{name}.jpg")),
    }
}

fn post(community_id: ObjectId, author_id: ObjectId) -> Post {
    Post {
        id: Some(ObjectId::new()),
        community_id,
        author_id,
    }
}

fn member(
    congregation_id: ObjectId,
    user_id: ObjectId,
    status: MembershipStatus,
) -> CongregationMember {
    CongregationMember {
        id: Some(ObjectId::new()),
        congregation_id,
        user_id,
        status,
    }
}

#[test]
fn like_notifies_the_post_author() {
    let community_id = ObjectId::new();
    let author_id = ObjectId::new();
    let liker = user("ana");
    let post = post(community_id, author_id);
    let like = Like {
        id: Some(ObjectId::new()),
        community_id,
        post_id: post.id.unwrap(),
        user_id: liker.id.unwrap(),
    };

    let request = translate::like_created(&like, &post, &liker);

    assert_eq!(request.recipient_id, author_id);
    assert_eq!(request.actor_id, liker.id.unwrap());
    assert_eq!(request.actor_name, "ana");
    assert_eq!(request.kind, NotificationKind::Like);
    assert_eq!(request.entity_id, like.post_id);
    assert_eq!(
        request.entity_path,
        format!("/community/{}", community_id.to_hex())
    );
}

#[test]
fn self_like_still_translates_the_guard_lives_in_the_dispatcher() {
    let community_id = ObjectId::new();
    let author = user("ana");
    let post = post(community_id, author.id.unwrap());
    let like = Like {
        id: Some(ObjectId::new()),
        community_id,
        post_id: post.id.unwrap(),
        user_id: author.id.unwrap(),
    };

    let request = translate::like_created(&like, &post, &author);
    assert_eq!(request.recipient_id, request.actor_id);
}

#[test]
fn top_level_comment_notifies_the_post_author() {
    let community_id = ObjectId::new();
    let author_id = ObjectId::new();
    let commenter = user("bob");
    let post = post(community_id, author_id);
    let comment = Comment {
        id: Some(ObjectId::new()),
        community_id,
        post_id: post.id.unwrap(),
        author_id: commenter.id.unwrap(),
        parent_comment_id: None,
    };

    let request = translate::comment_created(&comment, &post, None, &commenter);

    assert_eq!(request.recipient_id, author_id);
    assert_eq!(request.kind, NotificationKind::Comment);
}

#[test]
fn reply_notifies_the_parent_comment_author() {
    let community_id = ObjectId::new();
    let post_author = ObjectId::new();
    let parent_author = ObjectId::new();
    let replier = user("cara");
    let post = post(community_id, post_author);
    let parent = Comment {
        id: Some(ObjectId::new()),
        community_id,
        post_id: post.id.unwrap(),
        author_id: parent_author,
        parent_comment_id: None,
    };
    let reply = Comment {
        id: Some(ObjectId::new()),
        community_id,
        post_id: post.id.unwrap(),
        author_id: replier.id.unwrap(),
        parent_comment_id: parent.id,
    };

    let request = translate::comment_created(&reply, &post, Some(&parent), &replier);

    assert_eq!(request.recipient_id, parent_author);
    assert_ne!(request.recipient_id, post_author);
    assert_eq!(request.kind, NotificationKind::Reply);
}

#[test]
fn membership_pending_to_member_fires_with_the_congregation_as_actor() {
    let congregation_id = ObjectId::new();
    let user_id = ObjectId::new();
    let congregation = Congregation {
        id: Some(congregation_id),
        name: "Grace Fellowship".to_string(),
        logo: Some("/logos/grace.png".to_string()),
    };
    let before = member(congregation_id, user_id, MembershipStatus::Pending);
    let after = member(congregation_id, user_id, MembershipStatus::Member);

    let request = translate::membership_approved(&before, &after, &congregation)
        .expect("pending-to-member should notify");

    assert_eq!(request.recipient_id, user_id);
    assert_eq!(request.actor_id, congregation_id);
    assert_eq!(request.actor_name, "Grace Fellowship");
    assert_eq!(request.kind, NotificationKind::MembershipApproved);
    assert_eq!(
        request.entity_path,
        format!("/congregation/{}", congregation_id.to_hex())
    );
}

#[test]
fn membership_without_the_pending_to_member_transition_is_ignored() {
    let congregation_id = ObjectId::new();
    let user_id = ObjectId::new();
    let congregation = Congregation {
        id: Some(congregation_id),
        name: "Grace Fellowship".to_string(),
        logo: None,
    };

    // Already a member: a rewrite of the same status must not re-fire.
    let before = member(congregation_id, user_id, MembershipStatus::Member);
    let after = member(congregation_id, user_id, MembershipStatus::Member);
    assert!(translate::membership_approved(&before, &after, &congregation).is_none());

    // Rejection is not an approval.
    let before = member(congregation_id, user_id, MembershipStatus::Pending);
    let after = member(congregation_id, user_id, MembershipStatus::Rejected);
    assert!(translate::membership_approved(&before, &after, &congregation).is_none());

    // Un-rejection skips the pending state and is ignored too.
    let before = member(congregation_id, user_id, MembershipStatus::Rejected);
    let after = member(congregation_id, user_id, MembershipStatus::Member);
    assert!(translate::membership_approved(&before, &after, &congregation).is_none());
}
