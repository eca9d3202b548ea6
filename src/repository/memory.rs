use super::{RepoResult, Repository, RepositoryError};
use crate::models::{NewUser, Post, User, UserChanges};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

/// InMemoryRepository
///
/// A process-local `Repository` used by tests and for running the API without a
/// database. Records are kept in insertion order; listings sort newest first, with
/// later insertions winning timestamp ties.
#[derive(Default)]
pub struct InMemoryRepository {
    users: RwLock<Vec<User>>,
    posts: RwLock<Vec<Post>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a fully-formed user as-is. Lets tests seed admins and fixed ids.
    pub async fn insert_user(&self, user: User) {
        self.users.write().await.push(user);
    }

    pub async fn insert_post(&self, post: Post) {
        self.posts.write().await.push(post);
    }
}

fn newest_first<T>(
    items: impl DoubleEndedIterator<Item = T>,
    key: impl Fn(&T) -> DateTime<Utc>,
) -> Vec<T> {
    let mut out: Vec<T> = items.rev().collect();
    // Stable sort keeps reverse insertion order for equal timestamps.
    out.sort_by(|a, b| key(b).cmp(&key(a)));
    out
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn get_user(&self, id: Uuid) -> RepoResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn list_users(&self) -> RepoResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(newest_first(users.iter().cloned(), |u| u.created_at))
    }

    async fn create_user(&self, user: NewUser) -> RepoResult<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(RepositoryError::Conflict("email"));
        }
        let now = Utc::now();
        let created = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            created_at: now,
            updated_at: now,
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn update_user(&self, id: Uuid, changes: UserChanges) -> RepoResult<Option<User>> {
        let mut users = self.users.write().await;
        let Some(index) = users.iter().position(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(email) = &changes.email {
            if users.iter().any(|u| u.id != id && &u.email == email) {
                return Err(RepositoryError::Conflict("email"));
            }
        }
        let user = &mut users[index];
        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(role) = changes.role {
            user.role = role;
        }
        if let Some(password_hash) = changes.password_hash {
            user.password_hash = password_hash;
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn delete_user(&self, id: Uuid) -> RepoResult<bool> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.id != id);
        let removed = users.len() < before;
        if removed {
            self.posts.write().await.retain(|p| p.user_id != id);
        }
        Ok(removed)
    }

    async fn list_posts(&self) -> RepoResult<Vec<Post>> {
        let posts = self.posts.read().await;
        Ok(newest_first(posts.iter().cloned(), |p| p.created_at))
    }

    async fn list_posts_by_user(&self, user_id: Uuid) -> RepoResult<Vec<Post>> {
        let posts = self.posts.read().await;
        let owned = posts.iter().filter(|p| p.user_id == user_id).cloned();
        Ok(newest_first(owned, |p| p.created_at))
    }

    async fn get_post(&self, id: Uuid) -> RepoResult<Option<Post>> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn create_post(
        &self,
        user_id: Uuid,
        title: String,
        content: String,
    ) -> RepoResult<Post> {
        let now = Utc::now();
        let post = Post {
            id: Uuid::new_v4(),
            title,
            content,
            user_id,
            created_at: now,
            updated_at: now,
        };
        self.posts.write().await.push(post.clone());
        Ok(post)
    }

    async fn update_post(
        &self,
        id: Uuid,
        title: String,
        content: String,
    ) -> RepoResult<Option<Post>> {
        let mut posts = self.posts.write().await;
        Ok(posts.iter_mut().find(|p| p.id == id).map(|post| {
            post.title = title;
            post.content = content;
            post.updated_at = Utc::now();
            post.clone()
        }))
    }

    async fn delete_post(&self, id: Uuid) -> RepoResult<bool> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        Ok(posts.len() < before)
    }
}
