//! MongoDB access layer: connection bootstrap, index creation, and the
//! movie/user repositories.
//!
//! The `movies` collection is schema-less on purpose; the strict typing
//! boundary is [`models::movie::normalize`], which every read path goes
//! through.

pub mod models;
pub mod query;
pub mod repositories;

use bson::{doc, Document};
use mongodb::options::IndexOptions;
use mongodb::{Client, Database, IndexModel};

/// Connect to the store and select the application database.
pub async fn connect(uri: &str, db_name: &str) -> Result<Database, mongodb::error::Error> {
    let client = Client::with_uri_str(uri).await?;
    Ok(client.database(db_name))
}

/// Round-trip a ping so startup fails fast on a bad connection.
pub async fn health_check(db: &Database) -> Result<(), mongodb::error::Error> {
    db.run_command(doc! { "ping": 1 }).await?;
    Ok(())
}

/// Create the indexes the application relies on.
///
/// - unique `users.email`: the race-safe backstop for duplicate
///   registration (the handler pre-check alone is not);
/// - `movies {year: -1, _id: -1}`: the listing sort order.
pub async fn ensure_indexes(db: &Database) -> Result<(), mongodb::error::Error> {
    let unique_email = IndexModel::builder()
        .keys(doc! { "email": 1 })
        .options(IndexOptions::builder().unique(true).build())
        .build();
    db.collection::<Document>(models::user::COLLECTION)
        .create_index(unique_email)
        .await?;

    let listing_order = IndexModel::builder()
        .keys(doc! { "year": -1, "_id": -1 })
        .build();
    db.collection::<Document>(models::movie::COLLECTION)
        .create_index(listing_order)
        .await?;

    Ok(())
}
