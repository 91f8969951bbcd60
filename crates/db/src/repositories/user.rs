//! User repository for credential storage.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    SqlErr,
};
use uuid::Uuid;

use crate::entities::users;

/// Errors from user persistence operations.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    /// The email is already registered.
    #[error("email is already registered")]
    EmailTaken,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// User repository for lookups and account creation.
///
/// Emails are stored and matched lowercased, so uniqueness and lookups are
/// case-insensitive on every backend.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email.to_lowercase()))
            .one(&self.db)
            .await
    }

    /// Creates a new user with a fresh id.
    ///
    /// Uniqueness rides on the email column constraint, so a concurrent
    /// duplicate insert surfaces as `UserError::EmailTaken` instead of a
    /// raw database error. There is no check-then-insert window.
    ///
    /// # Errors
    ///
    /// Returns `UserError::EmailTaken` if the email is already registered,
    /// or `UserError::Database` if the insert fails for any other reason.
    pub async fn create(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<users::Model, UserError> {
        let now = chrono::Utc::now().into();
        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email.to_lowercase()),
            password_hash: Set(password_hash.to_string()),
            created_at: Set(now),
        };

        match user.insert(&self.db).await {
            Ok(model) => Ok(model),
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(UserError::EmailTaken),
                _ => Err(UserError::Database(err)),
            },
        }
    }
}
