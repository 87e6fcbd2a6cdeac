//! The persistence seam used by the HTTP handlers.
//!
//! [`UserGateway`] is the contract: one method per row operation, absence
//! reported as `None`/`false` rather than as an error. [`PgUserGateway`]
//! implements it on top of [`UserRepo`] and wraps every storage failure in a
//! [`PersistenceError`] whose message names the operation that failed.

use std::fmt;

use async_trait::async_trait;
use users_core::types::DbId;

use crate::models::user::{User, UserInput};
use crate::repositories::UserRepo;
use crate::DbPool;

/// The row operation a [`PersistenceError`] originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserOperation {
    Fetch,
    Create,
    Update,
    Delete,
    List,
}

impl UserOperation {
    /// Message prefix prepended to the underlying storage error.
    pub const fn error_prefix(self) -> &'static str {
        match self {
            Self::Fetch => "Error fetching user",
            Self::Create => "Error creating user",
            Self::Update => "Error updating user",
            Self::Delete => "Error deleting user",
            Self::List => "Error fetching users",
        }
    }
}

impl fmt::Display for UserOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.error_prefix())
    }
}

/// A storage failure, connectivity or constraint, tagged with its operation.
///
/// Displays as `"<prefix>: <cause>"`, e.g.
/// `Error fetching user: attempted to acquire a connection on a closed pool`.
#[derive(Debug, thiserror::Error)]
#[error("{operation}: {source}")]
pub struct PersistenceError {
    pub operation: UserOperation,
    #[source]
    pub source: sqlx::Error,
}

impl PersistenceError {
    pub fn new(operation: UserOperation, source: sqlx::Error) -> Self {
        Self { operation, source }
    }
}

/// Row-level operations against the `users` table.
#[async_trait]
pub trait UserGateway: Send + Sync {
    /// `None` when no row has this id.
    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, PersistenceError>;

    /// Insert a row and return it with its generated id.
    async fn create(&self, input: &UserInput) -> Result<User, PersistenceError>;

    /// `None` when no row has this id; otherwise the row as stored after the update.
    async fn update(&self, id: DbId, input: &UserInput) -> Result<Option<User>, PersistenceError>;

    /// `false` when no row has this id.
    async fn delete(&self, id: DbId) -> Result<bool, PersistenceError>;

    /// Every row. No filtering or pagination.
    async fn list(&self) -> Result<Vec<User>, PersistenceError>;
}

/// PostgreSQL-backed [`UserGateway`].
#[derive(Debug, Clone)]
pub struct PgUserGateway {
    pool: DbPool,
}

impl PgUserGateway {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserGateway for PgUserGateway {
    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, PersistenceError> {
        UserRepo::find_by_id(&self.pool, id)
            .await
            .map_err(|e| PersistenceError::new(UserOperation::Fetch, e))
    }

    async fn create(&self, input: &UserInput) -> Result<User, PersistenceError> {
        UserRepo::create(&self.pool, input)
            .await
            .map_err(|e| PersistenceError::new(UserOperation::Create, e))
    }

    async fn update(&self, id: DbId, input: &UserInput) -> Result<Option<User>, PersistenceError> {
        UserRepo::update(&self.pool, id, input)
            .await
            .map_err(|e| PersistenceError::new(UserOperation::Update, e))
    }

    async fn delete(&self, id: DbId) -> Result<bool, PersistenceError> {
        UserRepo::delete(&self.pool, id)
            .await
            .map_err(|e| PersistenceError::new(UserOperation::Delete, e))
    }

    async fn list(&self) -> Result<Vec<User>, PersistenceError> {
        UserRepo::list(&self.pool)
            .await
            .map_err(|e| PersistenceError::new(UserOperation::List, e))
    }
}
