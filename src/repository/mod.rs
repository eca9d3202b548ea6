use crate::models::{NewUser, Post, User, UserChanges};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

mod memory;
mod postgres;

pub use memory::InMemoryRepository;
pub use postgres::PostgresRepository;

/// RepositoryError
///
/// Any failure of the persistence layer. Handlers never inspect it beyond
/// converting it into a 500.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("unique constraint violated on {0}")]
    Conflict(&'static str),
}

pub type RepoResult<T> = Result<T, RepositoryError>;

/// Repository Trait
///
/// The abstract contract for all persistence operations. Handlers talk to
/// `Arc<dyn Repository>` and never know whether Postgres or the in-memory store
/// sits behind it.
///
/// Ownership is not enforced here: controllers load the record, compare owners and
/// only then mutate, so they can tell 404 from 403.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Users ---
    async fn get_user(&self, id: Uuid) -> RepoResult<Option<User>>;
    async fn find_user_by_email(&self, email: &str) -> RepoResult<Option<User>>;
    // Newest first.
    async fn list_users(&self) -> RepoResult<Vec<User>>;
    async fn create_user(&self, user: NewUser) -> RepoResult<User>;
    // Returns None when no user has this id.
    async fn update_user(&self, id: Uuid, changes: UserChanges) -> RepoResult<Option<User>>;
    /// Removes the user and every post they own. Returns false if no user matched.
    async fn delete_user(&self, id: Uuid) -> RepoResult<bool>;

    // --- Posts (all listings ordered by created_at DESC) ---
    async fn list_posts(&self) -> RepoResult<Vec<Post>>;
    async fn list_posts_by_user(&self, user_id: Uuid) -> RepoResult<Vec<Post>>;
    async fn get_post(&self, id: Uuid) -> RepoResult<Option<Post>>;
    async fn create_post(&self, user_id: Uuid, title: String, content: String)
    -> RepoResult<Post>;
    async fn update_post(
        &self,
        id: Uuid,
        title: String,
        content: String,
    ) -> RepoResult<Option<Post>>;
    async fn delete_post(&self, id: Uuid) -> RepoResult<bool>;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer across the application state.
pub type RepositoryState = Arc<dyn Repository>;
