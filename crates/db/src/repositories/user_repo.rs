//! Repository for the `users` collection.

use bson::doc;
use bson::oid::ObjectId;
use mongodb::{Collection, Database};

use crate::models::user::{CreateUser, User, COLLECTION};

/// Provides persistence for user accounts.
pub struct UserRepo;

impl UserRepo {
    fn collection(db: &Database) -> Collection<User> {
        db.collection(COLLECTION)
    }

    /// Insert a new user, returning the stored document.
    ///
    /// A duplicate e-mail surfaces as the driver's E11000 write error
    /// (enforced by the unique index from [`crate::ensure_indexes`]);
    /// classification into a conflict happens at the API boundary.
    pub async fn create(db: &Database, input: &CreateUser) -> Result<User, mongodb::error::Error> {
        let user = User {
            id: ObjectId::new(),
            name: input.name.clone(),
            email: input.email.clone(),
            password: input.password_hash.clone(),
            role: input.role.clone(),
            created_at: chrono::Utc::now(),
        };
        Self::collection(db).insert_one(&user).await?;
        Ok(user)
    }

    /// Find a user by e-mail (the login identifier).
    pub async fn find_by_email(
        db: &Database,
        email: &str,
    ) -> Result<Option<User>, mongodb::error::Error> {
        Self::collection(db).find_one(doc! { "email": email }).await
    }

    /// Find a user by id.
    pub async fn find_by_id(
        db: &Database,
        id: ObjectId,
    ) -> Result<Option<User>, mongodb::error::Error> {
        Self::collection(db).find_one(doc! { "_id": id }).await
    }
}
