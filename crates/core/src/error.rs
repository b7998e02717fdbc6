/// Domain-level error taxonomy shared by the database and API layers.
///
/// The API layer maps each variant onto an HTTP status; nothing here
/// knows about HTTP.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An identifier did not resolve to an existing record.
    ///
    /// `entity` is the user-facing entity name ("Filme", "Usuário");
    /// `id` is kept for logging, not for the response body.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// Malformed or missing required input, correctable by the caller.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A unique constraint was violated (e.g. duplicate e-mail).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Credential mismatch or missing/invalid token.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// An unexpected condition the caller cannot correct.
    #[error("Internal error: {0}")]
    Internal(String),
}
