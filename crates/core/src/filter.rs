//! Listing filters for `GET /movies`: query-string parsing and
//! predicate construction.
//!
//! This module lives in `core` (zero internal deps, no I/O) so it can
//! be exercised without a running store. Parsing is deliberately
//! permissive: a malformed filter value is treated as "filter not
//! specified", never as a request error. This is the opposite contract
//! from the create/update path, which rejects invalid required fields.

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default number of movies per page.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum number of movies per page.
pub const MAX_PAGE_SIZE: i64 = 100;

// ---------------------------------------------------------------------------
// Raw query parameters
// ---------------------------------------------------------------------------

/// Raw query parameters for `GET /movies`, exactly as received.
///
/// Every field is an optional string so that extraction can never fail
/// upstream of the builder; `?pageSize=abc` must reach [`build`] and
/// degrade there, not bounce with a deserialization error.
#[derive(Debug, Default, Deserialize)]
pub struct ListMoviesParams {
    pub search: Option<String>,
    pub page: Option<String>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<String>,
    pub featured: Option<String>,
    #[serde(rename = "minRating")]
    pub min_rating: Option<String>,
    #[serde(rename = "maxRating")]
    pub max_rating: Option<String>,
    pub year: Option<String>,
}

// ---------------------------------------------------------------------------
// Typed predicate and pagination window
// ---------------------------------------------------------------------------

/// Typed predicate describing which movies match a listing request.
///
/// Conditions are independent and AND-ed together; a `None` field
/// contributes no condition, so the default value matches every record.
/// The predicate is store-agnostic -- translation into the store's
/// native query syntax happens in the database layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieFilter {
    /// Case-insensitive substring matched against title, genre, and
    /// description (OR across the three fields).
    pub search: Option<String>,
    /// Exact match on the `featured` flag.
    pub featured: Option<bool>,
    /// Inclusive lower bound on rating.
    pub min_rating: Option<f64>,
    /// Inclusive upper bound on rating.
    pub max_rating: Option<f64>,
    /// Exact match on release year.
    pub year: Option<i32>,
}

impl MovieFilter {
    /// `true` when the predicate carries no conditions at all.
    pub fn is_empty(&self) -> bool {
        self.search.is_none()
            && self.featured.is_none()
            && self.min_rating.is_none()
            && self.max_rating.is_none()
            && self.year.is_none()
    }
}

/// A validated pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number, always >= 1.
    pub number: i64,
    /// Page size, always within `[1, MAX_PAGE_SIZE]`.
    pub size: i64,
}

impl Page {
    /// Number of records to skip to reach this page.
    pub fn skip(&self) -> i64 {
        (self.number - 1) * self.size
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            number: 1,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Build a typed predicate and pagination window from raw query params.
///
/// This stage never fails; every invalid value degrades to "no filter"
/// (or the pagination default).
pub fn build(params: &ListMoviesParams) -> (MovieFilter, Page) {
    let filter = MovieFilter {
        search: params.search.as_deref().and_then(non_blank),
        featured: params.featured.as_deref().map(is_true),
        min_rating: parse_f64(params.min_rating.as_deref()),
        max_rating: parse_f64(params.max_rating.as_deref()),
        year: parse_i32(params.year.as_deref()),
    };

    let page = Page {
        number: parse_page(params.page.as_deref()),
        size: parse_page_size(params.page_size.as_deref()),
    };

    (filter, page)
}

/// Trim the input; blank strings carry no condition.
fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Case-insensitive `"true"` is true; any other present value is false.
fn is_true(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

/// Lenient float parse; non-finite and unparsable values are dropped.
fn parse_f64(value: Option<&str>) -> Option<f64> {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

/// Lenient integer parse; unparsable values are dropped.
fn parse_i32(value: Option<&str>) -> Option<i32> {
    value.and_then(|v| v.trim().parse::<i32>().ok())
}

/// Positive-integer parse; non-positive or unparsable floors to 1.
fn parse_page(value: Option<&str>) -> i64 {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|n| *n >= 1)
        .unwrap_or(1)
}

/// Positive-integer parse; unparsable defaults to [`DEFAULT_PAGE_SIZE`],
/// then clamps to `[1, MAX_PAGE_SIZE]`.
fn parse_page_size(value: Option<&str>) -> i64 {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn params_with(f: impl FnOnce(&mut ListMoviesParams)) -> ListMoviesParams {
        let mut params = ListMoviesParams::default();
        f(&mut params);
        params
    }

    // -- pagination ----------------------------------------------------------

    #[test]
    fn empty_params_use_defaults() {
        let (filter, page) = build(&ListMoviesParams::default());
        assert!(filter.is_empty());
        assert_eq!(page, Page { number: 1, size: DEFAULT_PAGE_SIZE });
    }

    #[test]
    fn page_floors_to_one() {
        for bad in ["0", "-3", "abc", ""] {
            let params = params_with(|p| p.page = Some(bad.to_string()));
            let (_, page) = build(&params);
            assert_eq!(page.number, 1, "page {bad:?} should floor to 1");
        }
    }

    #[test]
    fn page_passes_through_valid_value() {
        let params = params_with(|p| p.page = Some("7".to_string()));
        let (_, page) = build(&params);
        assert_eq!(page.number, 7);
        assert_eq!(page.skip(), 60);
    }

    #[test]
    fn page_size_clamps_to_bounds() {
        let params = params_with(|p| p.page_size = Some("0".to_string()));
        assert_eq!(build(&params).1.size, 1);

        let params = params_with(|p| p.page_size = Some("500".to_string()));
        assert_eq!(build(&params).1.size, MAX_PAGE_SIZE);
    }

    #[test]
    fn page_size_defaults_when_unparsable() {
        let params = params_with(|p| p.page_size = Some("lots".to_string()));
        assert_eq!(build(&params).1.size, DEFAULT_PAGE_SIZE);
    }

    // -- search --------------------------------------------------------------

    #[test]
    fn blank_search_is_dropped() {
        let params = params_with(|p| p.search = Some("   ".to_string()));
        assert_eq!(build(&params).0.search, None);
    }

    #[test]
    fn search_is_trimmed() {
        let params = params_with(|p| p.search = Some("  matrix ".to_string()));
        assert_eq!(build(&params).0.search.as_deref(), Some("matrix"));
    }

    // -- featured ------------------------------------------------------------

    #[test]
    fn featured_absent_means_no_filter() {
        assert_eq!(build(&ListMoviesParams::default()).0.featured, None);
    }

    #[test]
    fn featured_true_is_case_insensitive() {
        for raw in ["true", "TRUE", "True"] {
            let params = params_with(|p| p.featured = Some(raw.to_string()));
            assert_eq!(build(&params).0.featured, Some(true));
        }
    }

    #[test]
    fn featured_any_other_value_is_false() {
        for raw in ["false", "1", "yes", ""] {
            let params = params_with(|p| p.featured = Some(raw.to_string()));
            assert_eq!(build(&params).0.featured, Some(false), "featured {raw:?}");
        }
    }

    // -- numeric filters -----------------------------------------------------

    #[test]
    fn unparsable_rating_bounds_are_ignored_not_rejected() {
        let params = params_with(|p| {
            p.min_rating = Some("abc".to_string());
            p.max_rating = Some("NaN".to_string());
        });
        let (filter, _) = build(&params);
        assert_eq!(filter.min_rating, None);
        assert_eq!(filter.max_rating, None);
    }

    #[test]
    fn rating_bounds_parse_as_floats() {
        let params = params_with(|p| {
            p.min_rating = Some("6.5".to_string());
            p.max_rating = Some("9".to_string());
        });
        let (filter, _) = build(&params);
        assert_eq!(filter.min_rating, Some(6.5));
        assert_eq!(filter.max_rating, Some(9.0));
    }

    #[test]
    fn unparsable_year_is_dropped() {
        let params = params_with(|p| p.year = Some("not-a-year".to_string()));
        assert_eq!(build(&params).0.year, None);
    }

    #[test]
    fn year_parses_exact_value() {
        let params = params_with(|p| p.year = Some("2020".to_string()));
        assert_eq!(build(&params).0.year, Some(2020));
    }
}
