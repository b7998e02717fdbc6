//! Movie domain types: the normalized API record plus the create/update
//! DTOs and their validation rules.
//!
//! Validation messages are pt-BR because they are user-facing; log and
//! internal messages stay English.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Sentinel title for stored documents that have none.
pub const UNTITLED: &str = "Untitled";

// ---------------------------------------------------------------------------
// Normalized record
// ---------------------------------------------------------------------------

/// A fully normalized movie record as returned by the API.
///
/// Every field is always present with a value of the correct type, no
/// matter how incomplete or malformed the stored document was. The
/// defaulting rules are applied by the database layer's projection;
/// this type is the contract they guarantee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub genre: String,
    pub rating: i32,
    pub image: String,
    pub featured: bool,
    pub description: String,
    /// `None` (JSON `null`) when the stored value is absent, invalid,
    /// or negative. Zero is neither, so it is preserved.
    pub year: Option<i32>,
    pub trailer_url: String,
}

// ---------------------------------------------------------------------------
// Required-field policy
// ---------------------------------------------------------------------------

/// Required-field policy for movie creation.
///
/// Two contracts coexist among deployed clients: the legacy one never
/// required a title (documents stored without one read back as
/// "Untitled"), the stricter one rejects such requests. Selected at
/// startup via the `STRICT_VALIDATION` env var.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationPolicy {
    /// Title is optional on create.
    #[default]
    Legacy,
    /// Title is required on create.
    Strict,
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// Request body for `POST /movies`.
///
/// Every field is optional at the deserialization boundary so that a
/// missing field surfaces as a per-field validation message rather
/// than a generic body rejection. Wrong JSON types still fail at the
/// `Json` extractor, which is mapped to a 400 upstream.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovie {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub rating: Option<f64>,
    pub image: Option<String>,
    pub featured: Option<bool>,
    pub description: Option<String>,
    pub year: Option<f64>,
    pub trailer_url: Option<String>,
}

/// A validated movie ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMovie {
    /// `None` under the legacy policy when the client sent no title;
    /// the stored document then has no `title` field at all.
    pub title: Option<String>,
    pub genre: String,
    pub rating: i32,
    pub image: String,
    pub featured: bool,
    pub description: String,
    pub year: i32,
    pub trailer_url: String,
}

impl CreateMovie {
    /// Validate required fields and coerce numerics, producing a
    /// persistable [`NewMovie`].
    ///
    /// Under [`ValidationPolicy::Strict`] the title is required; under
    /// [`ValidationPolicy::Legacy`] it may be omitted. Numeric fields
    /// are rounded to integers.
    pub fn validate(&self, policy: ValidationPolicy) -> Result<NewMovie, CoreError> {
        let title = self.title.as_deref().and_then(trimmed);
        if policy == ValidationPolicy::Strict && title.is_none() {
            return Err(missing("título é obrigatório"));
        }

        Ok(NewMovie {
            title,
            genre: require_text(self.genre.as_deref(), "gênero é obrigatório")?,
            rating: require_number(self.rating, "nota é obrigatória")?,
            image: require_text(self.image.as_deref(), "imagem é obrigatória")?,
            featured: self.featured.unwrap_or(false),
            description: require_text(self.description.as_deref(), "descrição é obrigatória")?,
            year: require_number(self.year, "ano é obrigatório")?,
            trailer_url: require_text(self.trailer_url.as_deref(), "trailer é obrigatório")?,
        })
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

/// Request body for `PUT /movies/:id`. Any subset of fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMovie {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub rating: Option<f64>,
    pub image: Option<String>,
    pub featured: Option<bool>,
    pub description: Option<String>,
    pub year: Option<f64>,
    pub trailer_url: Option<String>,
}

/// The validated subset of fields to apply in a partial update.
///
/// Only non-`None` fields are written; everything else is untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieChanges {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub rating: Option<i32>,
    pub image: Option<String>,
    pub featured: Option<bool>,
    pub description: Option<String>,
    pub year: Option<i32>,
    pub trailer_url: Option<String>,
}

impl MovieChanges {
    /// `true` when no field was supplied at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.genre.is_none()
            && self.rating.is_none()
            && self.image.is_none()
            && self.featured.is_none()
            && self.description.is_none()
            && self.year.is_none()
            && self.trailer_url.is_none()
    }
}

impl UpdateMovie {
    /// Validate a partial update, coercing numerics to integers.
    ///
    /// An update that supplies no fields is a no-op and is rejected.
    pub fn validate(&self) -> Result<MovieChanges, CoreError> {
        let changes = MovieChanges {
            title: self.title.clone(),
            genre: self.genre.clone(),
            rating: self.rating.map(round_i32),
            image: self.image.clone(),
            featured: self.featured,
            description: self.description.clone(),
            year: self.year.map(round_i32),
            trailer_url: self.trailer_url.clone(),
        };

        if changes.is_empty() {
            return Err(missing("nenhum campo para atualizar"));
        }
        Ok(changes)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn missing(message: &str) -> CoreError {
    CoreError::Validation(message.to_string())
}

fn trimmed(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn require_text(value: Option<&str>, message: &str) -> Result<String, CoreError> {
    value.and_then(trimmed).ok_or_else(|| missing(message))
}

fn require_number(value: Option<f64>, message: &str) -> Result<i32, CoreError> {
    value.map(round_i32).ok_or_else(|| missing(message))
}

fn round_i32(value: f64) -> i32 {
    value.round() as i32
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
