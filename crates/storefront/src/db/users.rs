//! User repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use lakkeriet_core::{Email, UserId};

use super::RepositoryError;
use crate::models::user::User;

/// Database row for a user (without the password hash).
#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    is_admin: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: UserId::new(row.id),
            email,
            is_admin: row.is_admin,
            created_at: row.created_at,
        })
    }
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a user by their email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored email is invalid.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, is_admin, created_at FROM users WHERE email = ?",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored email is invalid.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, is_admin, created_at FROM users WHERE id = ?",
        )
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    /// Create a new user with a pre-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        email: &Email,
        password_hash: &str,
        is_admin: bool,
    ) -> Result<User, RepositoryError> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO users (email, password_hash, is_admin) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(email.as_str())
        .bind(password_hash)
        .bind(is_admin)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        self.get_by_id(UserId::new(id))
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// Get a user's password hash by email.
    ///
    /// Returns `None` if the user doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, (i64, String, bool, DateTime<Utc>, String)>(
            "SELECT id, email, is_admin, created_at, password_hash FROM users WHERE email = ?",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        let Some((id, email, is_admin, created_at, password_hash)) = row else {
            return Ok(None);
        };

        let email = Email::parse(&email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        let user = User {
            id: UserId::new(id),
            email,
            is_admin,
            created_at,
        };

        Ok(Some((user, password_hash)))
    }

    /// Ensure an admin account with this email exists (seeding).
    ///
    /// # Returns
    ///
    /// Returns `true` if a new admin was created, `false` if the account
    /// already existed (it is left untouched).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn ensure_admin(
        &self,
        email: &Email,
        password_hash: &str,
    ) -> Result<bool, RepositoryError> {
        if self.get_by_email(email).await?.is_some() {
            return Ok(false);
        }

        self.create(email, password_hash, true).await?;
        Ok(true)
    }
}
