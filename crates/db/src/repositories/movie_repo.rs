//! Repository for the `movies` collection.

use bson::oid::ObjectId;
use bson::{doc, Bson, Document};
use futures::TryStreamExt;
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};

use filmoteca_core::filter::{MovieFilter, Page};
use filmoteca_core::movie::{Movie, MovieChanges, NewMovie};

use crate::models::movie;
use crate::query;

/// One page of normalized movies plus the total match count.
#[derive(Debug, Clone, PartialEq)]
pub struct MoviePage {
    pub items: Vec<Movie>,
    pub total: i64,
}

/// Provides CRUD and filtered listing over movie documents.
///
/// Documents are handled untyped (`Document`) on the way in and out of
/// the store; every record returned to callers has been through
/// [`movie::normalize`].
pub struct MovieRepo;

impl MovieRepo {
    fn collection(db: &Database) -> Collection<Document> {
        db.collection(movie::COLLECTION)
    }

    /// Run the filter -> sort -> paginate -> project pipeline in one
    /// store pass.
    ///
    /// `$facet` computes the page slice and the total match count from
    /// the same matched set. The `_id` tiebreak keeps the
    /// year-descending order deterministic even when many documents
    /// share a year or lack one, so identical requests page
    /// identically.
    pub async fn list(
        db: &Database,
        filter: &MovieFilter,
        page: &Page,
    ) -> Result<MoviePage, mongodb::error::Error> {
        let mut pipeline: Vec<Document> = Vec::new();
        if let Some(condition) = query::match_document(filter) {
            pipeline.push(doc! { "$match": condition });
        }
        pipeline.push(doc! { "$sort": { "year": -1, "_id": -1 } });
        pipeline.push(doc! {
            "$facet": {
                "items": [
                    { "$skip": page.skip() },
                    { "$limit": page.size },
                ],
                "total": [
                    { "$count": "count" },
                ],
            }
        });

        let mut cursor = Self::collection(db).aggregate(pipeline).await?;
        let facets = cursor.try_next().await?.unwrap_or_default();

        let items: Vec<Movie> = facets
            .get_array("items")
            .map(|raw| {
                raw.iter()
                    .filter_map(Bson::as_document)
                    .map(movie::normalize)
                    .collect()
            })
            .unwrap_or_default();

        // `$count` emits nothing at all when the match set is empty.
        let total = facets
            .get_array("total")
            .ok()
            .and_then(|counts| counts.first())
            .and_then(Bson::as_document)
            .and_then(|count| match count.get("count") {
                Some(Bson::Int32(n)) => Some(i64::from(*n)),
                Some(Bson::Int64(n)) => Some(*n),
                _ => None,
            })
            .unwrap_or(0);

        Ok(MoviePage { items, total })
    }

    /// Find a movie by id, normalized. `None` means no such document.
    pub async fn find_by_id(
        db: &Database,
        id: ObjectId,
    ) -> Result<Option<Movie>, mongodb::error::Error> {
        let found = Self::collection(db).find_one(doc! { "_id": id }).await?;
        Ok(found.as_ref().map(movie::normalize))
    }

    /// Insert a validated movie, returning the normalized record.
    ///
    /// The id is generated client-side so the created record can be
    /// projected without a second round-trip.
    pub async fn create(db: &Database, new: &NewMovie) -> Result<Movie, mongodb::error::Error> {
        let mut document = movie::insert_document(new);
        document.insert("_id", ObjectId::new());

        Self::collection(db).insert_one(&document).await?;
        Ok(movie::normalize(&document))
    }

    /// Apply a partial update, returning the updated record.
    ///
    /// Only the supplied fields are written (`$set`); `updatedAt` is
    /// refreshed. Returns `None` when the id does not resolve.
    pub async fn update(
        db: &Database,
        id: ObjectId,
        changes: &MovieChanges,
    ) -> Result<Option<Movie>, mongodb::error::Error> {
        let updated = Self::collection(db)
            .find_one_and_update(
                doc! { "_id": id },
                doc! { "$set": movie::set_document(changes) },
            )
            .return_document(ReturnDocument::After)
            .await?;
        Ok(updated.as_ref().map(movie::normalize))
    }

    /// Delete a movie by id. Returns `true` if a document was removed.
    pub async fn delete(db: &Database, id: ObjectId) -> Result<bool, mongodb::error::Error> {
        let result = Self::collection(db).delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
