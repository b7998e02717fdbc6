//! Movie collection constants, document builders, and the defensive
//! projection from raw stored documents to normalized records.

use bson::{doc, Bson, DateTime, Document};
use filmoteca_core::movie::{Movie, MovieChanges, NewMovie, UNTITLED};

/// Collection holding movie documents.
pub const COLLECTION: &str = "movies";

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// Project a raw stored document into a fully populated [`Movie`].
///
/// The backing collection enforces no schema, so any field may be
/// absent or hold the wrong BSON type. Every field falls back to its
/// documented default; the result always has all fields present with
/// the right type. This is the single place that closes the gap
/// between the loose store and the strict API contract -- all read
/// paths go through it.
pub fn normalize(document: &Document) -> Movie {
    Movie {
        id: document
            .get_object_id("_id")
            .map(|id| id.to_hex())
            .unwrap_or_default(),
        title: string_or(document, "title", UNTITLED),
        genre: string_or(document, "genre", ""),
        rating: document
            .get("rating")
            .and_then(numeric)
            .filter(|rating| *rating >= 0.0)
            .map(|rating| rating.round() as i32)
            .unwrap_or(0),
        image: string_or(document, "image", ""),
        featured: document.get_bool("featured").unwrap_or(false),
        description: string_or(document, "description", ""),
        // Zero is a valid stored year; only absent, invalid, or
        // negative values become null.
        year: document
            .get("year")
            .and_then(numeric)
            .filter(|year| *year >= 0.0)
            .map(|year| year.round() as i32),
        trailer_url: string_or(document, "trailerUrl", ""),
    }
}

fn string_or(document: &Document, key: &str, default: &str) -> String {
    document.get_str(key).unwrap_or(default).to_string()
}

/// Numeric BSON values of any width; everything else is `None`.
fn numeric(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(n) => Some(f64::from(*n)),
        Bson::Int64(n) => Some(*n as f64),
        Bson::Double(n) if n.is_finite() => Some(*n),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Write payloads
// ---------------------------------------------------------------------------

/// Build the document persisted by a create, stamping `createdAt` and
/// `updatedAt`.
///
/// A legacy-mode create without a title stores no `title` field; the
/// projection supplies the sentinel on every read.
pub fn insert_document(new: &NewMovie) -> Document {
    let now = DateTime::now();
    let mut document = doc! {
        "genre": &new.genre,
        "rating": new.rating,
        "image": &new.image,
        "featured": new.featured,
        "description": &new.description,
        "year": new.year,
        "trailerUrl": &new.trailer_url,
        "createdAt": now,
        "updatedAt": now,
    };
    if let Some(title) = &new.title {
        document.insert("title", title.as_str());
    }
    document
}

/// Build the `$set` payload for a partial update.
///
/// Only supplied fields are written; `updatedAt` is refreshed on every
/// mutation.
pub fn set_document(changes: &MovieChanges) -> Document {
    let mut set = Document::new();
    if let Some(title) = &changes.title {
        set.insert("title", title.as_str());
    }
    if let Some(genre) = &changes.genre {
        set.insert("genre", genre.as_str());
    }
    if let Some(rating) = changes.rating {
        set.insert("rating", rating);
    }
    if let Some(image) = &changes.image {
        set.insert("image", image.as_str());
    }
    if let Some(featured) = changes.featured {
        set.insert("featured", featured);
    }
    if let Some(description) = &changes.description {
        set.insert("description", description.as_str());
    }
    if let Some(year) = changes.year {
        set.insert("year", year);
    }
    if let Some(trailer_url) = &changes.trailer_url {
        set.insert("trailerUrl", trailer_url.as_str());
    }
    set.insert("updatedAt", DateTime::now());
    set
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use bson::oid::ObjectId;

    use super::*;

    fn complete_document(id: ObjectId) -> Document {
        doc! {
            "_id": id,
            "title": "Cidade de Deus",
            "genre": "Crime",
            "rating": 9,
            "image": "http://img/cdd.jpg",
            "featured": true,
            "description": "Buscapé",
            "year": 2002,
            "trailerUrl": "http://img/cdd.mp4",
        }
    }

    // -- full documents ------------------------------------------------------

    #[test]
    fn complete_document_passes_through() {
        let id = ObjectId::new();
        let movie = normalize(&complete_document(id));

        assert_eq!(movie.id, id.to_hex());
        assert_eq!(movie.title, "Cidade de Deus");
        assert_eq!(movie.genre, "Crime");
        assert_eq!(movie.rating, 9);
        assert!(movie.featured);
        assert_eq!(movie.year, Some(2002));
        assert_eq!(movie.trailer_url, "http://img/cdd.mp4");
    }

    // -- defaulting rules ----------------------------------------------------

    #[test]
    fn empty_document_is_fully_defaulted() {
        let movie = normalize(&doc! { "_id": ObjectId::new() });

        assert_eq!(movie.title, UNTITLED);
        assert_eq!(movie.genre, "");
        assert_eq!(movie.rating, 0);
        assert_eq!(movie.image, "");
        assert!(!movie.featured);
        assert_eq!(movie.description, "");
        assert_eq!(movie.year, None);
        assert_eq!(movie.trailer_url, "");
    }

    #[test]
    fn negative_rating_normalizes_to_zero() {
        let movie = normalize(&doc! { "rating": -4 });
        assert_eq!(movie.rating, 0);
    }

    #[test]
    fn wrong_typed_rating_normalizes_to_zero() {
        let movie = normalize(&doc! { "rating": "nine" });
        assert_eq!(movie.rating, 0);
    }

    #[test]
    fn double_rating_is_rounded() {
        let movie = normalize(&doc! { "rating": 7.6 });
        assert_eq!(movie.rating, 8);
    }

    #[test]
    fn negative_year_normalizes_to_null() {
        let movie = normalize(&doc! { "year": -1 });
        assert_eq!(movie.year, None);
    }

    #[test]
    fn year_zero_is_kept_distinct_from_null() {
        let movie = normalize(&doc! { "year": 0 });
        assert_eq!(movie.year, Some(0));
    }

    #[test]
    fn wrong_typed_year_normalizes_to_null() {
        let movie = normalize(&doc! { "year": "2002" });
        assert_eq!(movie.year, None);
    }

    #[test]
    fn non_boolean_featured_normalizes_to_false() {
        for value in [Bson::String("true".into()), Bson::Int32(1), Bson::Null] {
            let movie = normalize(&doc! { "featured": value });
            assert!(!movie.featured);
        }
    }

    #[test]
    fn int64_numerics_are_accepted() {
        let movie = normalize(&doc! { "rating": 8_i64, "year": 1985_i64 });
        assert_eq!(movie.rating, 8);
        assert_eq!(movie.year, Some(1985));
    }

    // -- write payloads ------------------------------------------------------

    fn new_movie(title: Option<&str>) -> NewMovie {
        NewMovie {
            title: title.map(str::to_string),
            genre: "Drama".to_string(),
            rating: 7,
            image: "http://img/x.jpg".to_string(),
            featured: false,
            description: "d".to_string(),
            year: 2020,
            trailer_url: "http://img/x.mp4".to_string(),
        }
    }

    #[test]
    fn insert_document_stamps_timestamps() {
        let document = insert_document(&new_movie(Some("X")));

        assert!(document.get_datetime("createdAt").is_ok());
        assert!(document.get_datetime("updatedAt").is_ok());
        assert_eq!(document.get_str("title").unwrap(), "X");
    }

    #[test]
    fn insert_document_omits_absent_title() {
        let document = insert_document(&new_movie(None));
        assert!(!document.contains_key("title"));
    }

    #[test]
    fn inserted_document_round_trips_through_normalize() {
        let mut document = insert_document(&new_movie(Some("X")));
        document.insert("_id", ObjectId::new());

        let movie = normalize(&document);
        assert_eq!(movie.title, "X");
        assert_eq!(movie.rating, 7);
        assert_eq!(movie.year, Some(2020));
    }

    #[test]
    fn set_document_carries_only_supplied_fields() {
        let changes = MovieChanges {
            rating: Some(6),
            featured: Some(true),
            ..MovieChanges::default()
        };

        let set = set_document(&changes);
        assert_eq!(set.get_i32("rating").unwrap(), 6);
        assert!(set.get_bool("featured").unwrap());
        assert!(!set.contains_key("title"));
        assert!(!set.contains_key("year"));
        assert!(set.get_datetime("updatedAt").is_ok());
    }
}
