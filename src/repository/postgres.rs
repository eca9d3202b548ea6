use super::{RepoResult, Repository, RepositoryError};
use crate::models::{NewUser, Post, User, UserChanges};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

const USER_COLUMNS: &str = "id, name, email, password_hash, role, created_at, updated_at";
const POST_COLUMNS: &str = "id, title, content, user_id, created_at, updated_at";

/// PostgresRepository
///
/// The concrete implementation of the `Repository` trait, backed by PostgreSQL.
/// Schema lives in `migrations/`; `posts.user_id` cascades on user deletion.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Creates a new repository instance using the initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Turns a unique violation on `users.email` into a `Conflict` the handlers can report.
fn email_conflict(error: sqlx::Error) -> RepositoryError {
    match error.as_database_error() {
        Some(db) if db.is_unique_violation() => RepositoryError::Conflict("email"),
        _ => RepositoryError::Database(error),
    }
}

#[async_trait]
impl Repository for PostgresRepository {
    async fn get_user(&self, id: Uuid) -> RepoResult<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn list_users(&self) -> RepoResult<Vec<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC");
        let users = sqlx::query_as::<_, User>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn create_user(&self, user: NewUser) -> RepoResult<User> {
        let query = format!(
            "INSERT INTO users (id, name, email, password_hash, role, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, NOW(), NOW()) RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(Uuid::new_v4())
            .bind(user.name)
            .bind(user.email)
            .bind(user.password_hash)
            .bind(user.role.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(email_conflict)
    }

    /// Uses COALESCE so a `None` in `changes` keeps the stored column value.
    async fn update_user(&self, id: Uuid, changes: UserChanges) -> RepoResult<Option<User>> {
        let query = format!(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                role = COALESCE($4, role),
                password_hash = COALESCE($5, password_hash),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(changes.name)
            .bind(changes.email)
            .bind(changes.role.map(|role| role.as_str()))
            .bind(changes.password_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(email_conflict)
    }

    async fn delete_user(&self, id: Uuid) -> RepoResult<bool> {
        // posts.user_id is ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_posts(&self) -> RepoResult<Vec<Post>> {
        let query = format!("SELECT {POST_COLUMNS} FROM posts ORDER BY created_at DESC");
        let posts = sqlx::query_as::<_, Post>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(posts)
    }

    async fn list_posts_by_user(&self, user_id: Uuid) -> RepoResult<Vec<Post>> {
        let query = format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE user_id = $1 ORDER BY created_at DESC"
        );
        let posts = sqlx::query_as::<_, Post>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(posts)
    }

    async fn get_post(&self, id: Uuid) -> RepoResult<Option<Post>> {
        let query = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1");
        let post = sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(post)
    }

    async fn create_post(
        &self,
        user_id: Uuid,
        title: String,
        content: String,
    ) -> RepoResult<Post> {
        let query = format!(
            "INSERT INTO posts (id, title, content, user_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, NOW(), NOW()) RETURNING {POST_COLUMNS}"
        );
        let post = sqlx::query_as::<_, Post>(&query)
            .bind(Uuid::new_v4())
            .bind(title)
            .bind(content)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(post)
    }

    async fn update_post(
        &self,
        id: Uuid,
        title: String,
        content: String,
    ) -> RepoResult<Option<Post>> {
        let query = format!(
            "UPDATE posts SET title = $2, content = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING {POST_COLUMNS}"
        );
        let post = sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .bind(title)
            .bind(content)
            .fetch_optional(&self.pool)
            .await?;
        Ok(post)
    }

    async fn delete_post(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
