// Database repository for user records

use sqlx::PgPool;
use tokio::time::timeout;

use crate::auth::{error::AuthError, models::User};
use crate::db::STORE_TIMEOUT;

/// User repository for database operations
///
/// Every call is bounded by `STORE_TIMEOUT`; a slow store fails the
/// request rather than holding its worker.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new UserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user
    ///
    /// The unique index on email is the uniqueness guarantee: a concurrent
    /// registration that slips past the count check still surfaces here as
    /// `EmailAlreadyExists`.
    pub async fn insert_user(
        &self,
        email: &str,
        password_hash: &str,
        first_name: &str,
        last_name: &str,
        role: &str,
    ) -> Result<User, AuthError> {
        let query = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, first_name, last_name, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, email, password_hash, first_name, last_name, role,
                      access_token, refresh_token, created_at, updated_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(first_name)
        .bind(last_name)
        .bind(role)
        .fetch_one(&self.pool);

        let user = timeout(STORE_TIMEOUT, query)
            .await
            .map_err(|_| AuthError::StoreTimeout)?
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return AuthError::EmailAlreadyExists;
                    }
                }
                AuthError::DatabaseError(e.to_string())
            })?;

        Ok(user)
    }

    /// Find a user by email (case-insensitive)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let query = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, first_name, last_name, role,
                   access_token, refresh_token, created_at, updated_at
            FROM users
            WHERE LOWER(email) = LOWER($1)
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool);

        let user = timeout(STORE_TIMEOUT, query)
            .await
            .map_err(|_| AuthError::StoreTimeout)?
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(user)
    }

    /// Check if an email is already registered
    ///
    /// Fast-path check only; `insert_user` enforces correctness.
    pub async fn email_exists(&self, email: &str) -> Result<bool, AuthError> {
        let query = sqlx::query_as::<_, (bool,)>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1))",
        )
        .bind(email)
        .fetch_one(&self.pool);

        let exists = timeout(STORE_TIMEOUT, query)
            .await
            .map_err(|_| AuthError::StoreTimeout)?
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(exists.0)
    }

    /// Overwrite the stored token pair for a user
    ///
    /// The previous pair is superseded, not merged.
    pub async fn update_tokens(
        &self,
        user_id: i32,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<(), AuthError> {
        let query = sqlx::query(
            r#"
            UPDATE users
            SET access_token = $2, refresh_token = $3, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(access_token)
        .bind(refresh_token)
        .execute(&self.pool);

        let result = timeout(STORE_TIMEOUT, query)
            .await
            .map_err(|_| AuthError::StoreTimeout)?
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AuthError::UserNotFound);
        }

        Ok(())
    }
}
