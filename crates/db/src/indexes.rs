use mongodb::{Database, IndexModel};
use tracing::info;

pub async fn ensure_indexes(db: &Database) -> Result<(), mongodb::error::Error> {
    // Notifications
    create_indexes(
        db,
        "notifications",
        vec![
            index(bson::doc! { "recipient_id": 1, "created_at": -1 }),
            index(bson::doc! { "recipient_id": 1, "is_read": 1 }),
        ],
    )
    .await?;

    // Device tokens. The token index is non-unique: the same token can
    // survive in more than one registration document, and cleanup matches
    // by value.
    create_indexes(
        db,
        "device_tokens",
        vec![
            index(bson::doc! { "owner_id": 1 }),
            index(bson::doc! { "token": 1 }),
        ],
    )
    .await?;

    info!("All indexes ensured");
    Ok(())
}

fn index(keys: bson::Document) -> IndexModel {
    IndexModel::builder().keys(keys).build()
}

async fn create_indexes(
    db: &Database,
    collection: &str,
    indexes: Vec<IndexModel>,
) -> Result<(), mongodb::error::Error> {
    db.collection::<bson::Document>(collection)
        .create_indexes(indexes)
        .await?;
    info!(collection, "Indexes created");
    Ok(())
}
