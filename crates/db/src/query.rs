//! Translation of the typed movie predicate into the store's native
//! query syntax.
//!
//! The predicate itself (built in `filmoteca-core`) knows nothing about
//! BSON; this module is the only place that does the mapping, so the
//! empty-`$and` pitfall is handled once, generically.

use bson::{doc, Bson, Document, Regex};
use filmoteca_core::filter::MovieFilter;

/// Fields the free-text search runs against.
const SEARCH_FIELDS: [&str; 3] = ["title", "genre", "description"];

/// Fold a predicate into a single conjunctive match document.
///
/// Each active condition becomes one independent document; zero
/// conditions yield `None` so callers can skip the `$match` stage
/// entirely (the store rejects an empty `$and`), a single condition is
/// used unwrapped, and several are AND-ed.
pub fn match_document(filter: &MovieFilter) -> Option<Document> {
    let mut conditions: Vec<Document> = Vec::new();

    if let Some(search) = &filter.search {
        conditions.push(search_condition(search));
    }
    if let Some(featured) = filter.featured {
        conditions.push(doc! { "featured": featured });
    }
    if let Some(min) = filter.min_rating {
        conditions.push(doc! { "rating": { "$gte": min } });
    }
    if let Some(max) = filter.max_rating {
        conditions.push(doc! { "rating": { "$lte": max } });
    }
    if let Some(year) = filter.year {
        conditions.push(doc! { "year": year });
    }

    match conditions.len() {
        0 => None,
        1 => conditions.pop(),
        _ => Some(doc! { "$and": conditions }),
    }
}

/// Case-insensitive substring condition OR-ed across the search fields.
///
/// The user's text is escaped first so regex metacharacters match
/// literally.
fn search_condition(search: &str) -> Document {
    let pattern = Regex {
        pattern: regex::escape(search),
        options: "i".to_string(),
    };

    let alternatives: Vec<Document> = SEARCH_FIELDS
        .iter()
        .map(|field| {
            let mut condition = Document::new();
            condition.insert(*field, Bson::RegularExpression(pattern.clone()));
            condition
        })
        .collect();

    doc! { "$or": alternatives }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_predicate_yields_no_match_stage() {
        assert_eq!(match_document(&MovieFilter::default()), None);
    }

    #[test]
    fn single_condition_is_not_wrapped_in_and() {
        let filter = MovieFilter {
            featured: Some(true),
            ..MovieFilter::default()
        };

        assert_eq!(match_document(&filter), Some(doc! { "featured": true }));
    }

    #[test]
    fn multiple_conditions_are_folded_into_and() {
        let filter = MovieFilter {
            featured: Some(false),
            min_rating: Some(6.0),
            max_rating: Some(9.0),
            year: Some(2020),
            ..MovieFilter::default()
        };

        let document = match_document(&filter).unwrap();
        let conditions = document.get_array("$and").unwrap();
        assert_eq!(conditions.len(), 4);
        assert!(conditions.contains(&Bson::Document(doc! { "featured": false })));
        assert!(conditions.contains(&Bson::Document(doc! { "rating": { "$gte": 6.0 } })));
        assert!(conditions.contains(&Bson::Document(doc! { "rating": { "$lte": 9.0 } })));
        assert!(conditions.contains(&Bson::Document(doc! { "year": 2020 })));
    }

    #[test]
    fn search_spans_title_genre_and_description() {
        let filter = MovieFilter {
            search: Some("matrix".to_string()),
            ..MovieFilter::default()
        };

        let document = match_document(&filter).unwrap();
        let alternatives = document.get_array("$or").unwrap();
        assert_eq!(alternatives.len(), 3);

        for (alternative, field) in alternatives.iter().zip(SEARCH_FIELDS) {
            let condition = alternative.as_document().unwrap();
            match condition.get(field) {
                Some(Bson::RegularExpression(regex)) => {
                    assert_eq!(regex.pattern, "matrix");
                    assert_eq!(regex.options, "i");
                }
                other => panic!("expected regex on {field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn search_metacharacters_are_escaped() {
        let filter = MovieFilter {
            search: Some("2001: a space odyssey (1968)?".to_string()),
            ..MovieFilter::default()
        };

        let document = match_document(&filter).unwrap();
        let first = document.get_array("$or").unwrap()[0].as_document().unwrap();
        match first.get("title") {
            Some(Bson::RegularExpression(regex)) => {
                assert!(regex.pattern.contains(r"\("));
                assert!(regex.pattern.contains(r"\?"));
                assert!(!regex.pattern.contains("(1968)?"));
            }
            other => panic!("expected regex, got {other:?}"),
        }
    }
}
