//! User entity model and DTOs.

use bson::oid::ObjectId;
use filmoteca_core::types::Timestamp;
use serde::{Deserialize, Serialize};

/// Collection holding user documents.
pub const COLLECTION: &str = "users";

/// A user document from the `users` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    /// Argon2id PHC hash, never the plaintext password.
    pub password: String,
    pub role: String,
    #[serde(
        rename = "createdAt",
        with = "bson::serde_helpers::chrono_datetime_as_bson_datetime"
    )]
    pub created_at: Timestamp,
}

/// DTO for creating a new user. The password arrives already hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}
