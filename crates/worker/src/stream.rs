use std::sync::Arc;

use bson::doc;
use futures::StreamExt;
use koinonia_config::WatchSettings;
use koinonia_db::models::{Comment, CongregationMember, Like};
use koinonia_services::dao::{
    comment::CommentDao, congregation::CongregationDao, post::PostDao, user::UserDao,
};
use koinonia_services::notify::{NotificationDispatcher, translate};
use mongodb::Database;
use mongodb::options::{FullDocumentBeforeChangeType, FullDocumentType};
use tracing::{error, info, warn};

/// Change-stream host: subscribes to the watched collections and turns
/// each qualifying change into one dispatcher invocation. Events are
/// independent; a failed dispatch is logged and the stream keeps going
/// (redelivery is the upstream writer's concern, not ours).
pub struct ChangeStreamHost {
    db: Database,
    watch: WatchSettings,
    dispatcher: Arc<NotificationDispatcher>,
    posts: PostDao,
    comments: CommentDao,
    congregations: CongregationDao,
    users: UserDao,
}

impl ChangeStreamHost {
    pub fn new(
        db: Database,
        watch: WatchSettings,
        dispatcher: Arc<NotificationDispatcher>,
    ) -> Self {
        Self {
            posts: PostDao::new(&db),
            comments: CommentDao::new(&db),
            congregations: CongregationDao::new(&db),
            users: UserDao::new(&db),
            db,
            watch,
            dispatcher,
        }
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        tokio::try_join!(
            self.watch_likes(),
            self.watch_comments(),
            self.watch_memberships(),
        )?;
        Ok(())
    }

    async fn watch_likes(&self) -> anyhow::Result<()> {
        let mut stream = self
            .db
            .collection::<Like>(&self.watch.likes_collection)
            .watch()
            .pipeline(vec![doc! { "$match": { "operationType": "insert" } }])
            .await?;
        info!(collection = %self.watch.likes_collection, "Watching likes");

        while let Some(event) = stream.next().await {
            let event = match event {
                Ok(event) => event,
                Err(err) => {
                    error!(error = %err, "Likes change stream error");
                    continue;
                }
            };
            let Some(like) = event.full_document else {
                continue;
            };
            if let Err(err) = self.on_like(like).await {
                error!(error = %err, "Like event dropped");
            }
        }
        Ok(())
    }

    async fn on_like(&self, like: Like) -> anyhow::Result<()> {
        let post = self.posts.get(like.post_id).await?;
        let actor = self.users.get(like.user_id).await?;
        let request = translate::like_created(&like, &post, &actor);
        self.dispatcher.dispatch(request).await?;
        Ok(())
    }

    async fn watch_comments(&self) -> anyhow::Result<()> {
        let mut stream = self
            .db
            .collection::<Comment>(&self.watch.comments_collection)
            .watch()
            .pipeline(vec![doc! { "$match": { "operationType": "insert" } }])
            .await?;
        info!(collection = %self.watch.comments_collection, "Watching comments");

        while let Some(event) = stream.next().await {
            let event = match event {
                Ok(event) => event,
                Err(err) => {
                    error!(error = %err, "Comments change stream error");
                    continue;
                }
            };
            let Some(comment) = event.full_document else {
                continue;
            };
            if let Err(err) = self.on_comment(comment).await {
                error!(error = %err, "Comment event dropped");
            }
        }
        Ok(())
    }

    async fn on_comment(&self, comment: Comment) -> anyhow::Result<()> {
        let post = self.posts.get(comment.post_id).await?;
        let parent = match comment.parent_comment_id {
            Some(parent_id) => Some(self.comments.get(parent_id).await?),
            None => None,
        };
        let actor = self.users.get(comment.author_id).await?;
        let request = translate::comment_created(&comment, &post, parent.as_ref(), &actor);
        self.dispatcher.dispatch(request).await?;
        Ok(())
    }

    async fn watch_memberships(&self) -> anyhow::Result<()> {
        // Approval flips a status field on an existing document, so the
        // stream needs both snapshots: pre-images for the old state, update
        // lookup for the new one. The collection must have
        // changeStreamPreAndPostImages enabled.
        let mut stream = self
            .db
            .collection::<CongregationMember>(&self.watch.members_collection)
            .watch()
            .pipeline(vec![doc! { "$match": { "operationType": "update" } }])
            .full_document(FullDocumentType::UpdateLookup)
            .full_document_before_change(FullDocumentBeforeChangeType::WhenAvailable)
            .await?;
        info!(collection = %self.watch.members_collection, "Watching memberships");

        while let Some(event) = stream.next().await {
            let event = match event {
                Ok(event) => event,
                Err(err) => {
                    error!(error = %err, "Membership change stream error");
                    continue;
                }
            };
            let (Some(before), Some(after)) =
                (event.full_document_before_change, event.full_document)
            else {
                warn!("Membership update without both snapshots, skipping");
                continue;
            };
            if let Err(err) = self.on_membership(before, after).await {
                error!(error = %err, "Membership event dropped");
            }
        }
        Ok(())
    }

    async fn on_membership(
        &self,
        before: CongregationMember,
        after: CongregationMember,
    ) -> anyhow::Result<()> {
        // Skip the congregation lookup when the status didn't move at all.
        if before.status == after.status {
            return Ok(());
        }
        let congregation = self.congregations.get(after.congregation_id).await?;
        if let Some(request) = translate::membership_approved(&before, &after, &congregation) {
            self.dispatcher.dispatch(request).await?;
        }
        Ok(())
    }
}
