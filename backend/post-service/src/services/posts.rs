/// Post service - authorization and consistency policy for the post aggregate
use crate::error::{ApiError, Result};
use crate::models::{Like, Post};
use crate::repository::{PostStore, UserStore};
use crate::services::{is_owner, non_empty_text, update_aggregate};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

pub struct PostService {
    posts: Arc<dyn PostStore>,
    users: Arc<dyn UserStore>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostStore>, users: Arc<dyn UserStore>) -> Self {
        Self { posts, users }
    }

    /// Create a post authored by the acting user.
    ///
    /// The author's name and avatar are captured onto the post at
    /// creation time and never re-synced.
    pub async fn create_post(&self, author_id: Uuid, text: &str) -> Result<Post> {
        let text = non_empty_text(text)?;

        let profile = self
            .users
            .load_profile(author_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("user not found".to_string()))?;

        let post = Post {
            id: Uuid::new_v4(),
            user_id: author_id,
            name: profile.name,
            avatar: profile.avatar,
            text,
            likes: Vec::new(),
            comments: Vec::new(),
            version: 0,
            created_at: Utc::now(),
        };

        self.posts.insert(&post).await?;

        Ok(post)
    }

    /// All posts, newest first. No pagination.
    pub async fn list_posts(&self) -> Result<Vec<Post>> {
        self.posts.list_recent().await
    }

    /// Get a post by ID
    pub async fn get_post(&self, post_id: Uuid) -> Result<Post> {
        self.posts
            .load(post_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("post not found".to_string()))
    }

    /// Delete a post. Author-only; embedded comments and likes go with it.
    pub async fn delete_post(&self, actor_id: Uuid, post_id: Uuid) -> Result<()> {
        let post = self.get_post(post_id).await?;

        if !is_owner(actor_id, post.user_id) {
            return Err(ApiError::Forbidden(
                "user is not the post author".to_string(),
            ));
        }

        self.posts.delete(post_id).await
    }

    /// Like a post. At most one like per (post, user) pair; the new like
    /// lands at the front of the list.
    pub async fn like_post(&self, actor_id: Uuid, post_id: Uuid) -> Result<Vec<Like>> {
        update_aggregate(self.posts.as_ref(), post_id, |post| {
            if post.likes.iter().any(|like| like.user_id == actor_id) {
                return Err(ApiError::AlreadyLiked);
            }
            post.likes.insert(0, Like { user_id: actor_id });
            Ok(post.likes.clone())
        })
        .await
    }

    /// Remove the acting user's like.
    pub async fn unlike_post(&self, actor_id: Uuid, post_id: Uuid) -> Result<Vec<Like>> {
        update_aggregate(self.posts.as_ref(), post_id, |post| {
            // First matching index; if duplicates ever slipped in, only
            // one entry is removed.
            let index = post
                .likes
                .iter()
                .position(|like| like.user_id == actor_id)
                .ok_or(ApiError::NotLiked)?;
            post.likes.remove(index);
            Ok(post.likes.clone())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MockPostStore, MockUserStore};
    use crate::services::test_support::{ada, aggregate_store, post_with, profile_store};
    use chrono::Duration;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn service(posts: MockPostStore, users: MockUserStore) -> PostService {
        PostService::new(Arc::new(posts), Arc::new(users))
    }

    #[tokio::test]
    async fn create_post_captures_author_profile() {
        let author = Uuid::new_v4();
        let mut posts = MockPostStore::new();
        posts.expect_insert().times(1).returning(|_| Ok(()));
        let users = profile_store(author, ada());

        let created = service(posts, users)
            .create_post(author, "hello world")
            .await
            .expect("create failed");

        assert_eq!(created.user_id, author);
        assert_eq!(created.name, "Ada Lovelace");
        assert_eq!(created.text, "hello world");
        assert!(created.likes.is_empty());
        assert!(created.comments.is_empty());
    }

    #[tokio::test]
    async fn create_post_rejects_empty_text() {
        let author = Uuid::new_v4();
        let mut posts = MockPostStore::new();
        posts.expect_insert().never();
        let mut users = MockUserStore::new();
        users.expect_load_profile().never();

        let err = service(posts, users)
            .create_post(author, "   ")
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn create_post_for_unknown_user_is_not_found() {
        let author = Uuid::new_v4();
        let mut posts = MockPostStore::new();
        posts.expect_insert().never();
        let users = profile_store(Uuid::new_v4(), ada());

        let err = service(posts, users)
            .create_post(author, "hello")
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_posts_orders_newest_first() {
        let author = Uuid::new_v4();
        let mut older = post_with(author, "first");
        older.created_at = Utc::now() - Duration::hours(1);
        let newer = post_with(author, "second");
        let (posts, _) = aggregate_store(vec![older, newer]);

        let listed = service(posts, MockUserStore::new())
            .list_posts()
            .await
            .expect("list failed");

        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].text, "second");
        assert_eq!(listed[1].text, "first");
    }

    #[tokio::test]
    async fn get_post_missing_is_not_found() {
        let (posts, _) = aggregate_store(Vec::new());

        let err = service(posts, MockUserStore::new())
            .get_post(Uuid::new_v4())
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn second_like_is_rejected() {
        let liker = Uuid::new_v4();
        let post = post_with(Uuid::new_v4(), "hi");
        let post_id = post.id;
        let (posts, state) = aggregate_store(vec![post]);
        let svc = service(posts, MockUserStore::new());

        let likes = svc.like_post(liker, post_id).await.expect("like failed");
        assert_eq!(likes.len(), 1);

        let err = svc.like_post(liker, post_id).await.unwrap_err();
        assert!(matches!(err, ApiError::AlreadyLiked));

        // Count went up by exactly one, not two
        assert_eq!(state.lock().unwrap()[&post_id].likes.len(), 1);
    }

    #[tokio::test]
    async fn unlike_without_like_is_rejected() {
        let post = post_with(Uuid::new_v4(), "hi");
        let post_id = post.id;
        let (posts, _) = aggregate_store(vec![post]);

        let err = service(posts, MockUserStore::new())
            .unlike_post(Uuid::new_v4(), post_id)
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::NotLiked));
    }

    #[tokio::test]
    async fn like_then_unlike_round_trips() {
        let liker = Uuid::new_v4();
        let post = post_with(Uuid::new_v4(), "hi");
        let post_id = post.id;
        let (posts, state) = aggregate_store(vec![post]);
        let svc = service(posts, MockUserStore::new());

        svc.like_post(liker, post_id).await.expect("like failed");
        let likes = svc
            .unlike_post(liker, post_id)
            .await
            .expect("unlike failed");

        assert!(likes.is_empty());
        assert!(state.lock().unwrap()[&post_id].likes.is_empty());
    }

    #[tokio::test]
    async fn likes_are_prepended() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let post = post_with(Uuid::new_v4(), "hi");
        let post_id = post.id;
        let (posts, _) = aggregate_store(vec![post]);
        let svc = service(posts, MockUserStore::new());

        svc.like_post(first, post_id).await.expect("like failed");
        let likes = svc.like_post(second, post_id).await.expect("like failed");

        assert_eq!(likes[0].user_id, second);
        assert_eq!(likes[1].user_id, first);
    }

    #[tokio::test]
    async fn delete_post_requires_ownership() {
        let author = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let post = post_with(author, "mine");
        let post_id = post.id;
        let (posts, state) = aggregate_store(vec![post]);
        let svc = service(posts, MockUserStore::new());

        let err = svc.delete_post(stranger, post_id).await.unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));

        // The post survives a forbidden delete
        assert!(state.lock().unwrap().contains_key(&post_id));

        svc.delete_post(author, post_id).await.expect("delete failed");
        assert!(!state.lock().unwrap().contains_key(&post_id));
    }

    #[tokio::test]
    async fn save_conflict_retries_then_succeeds() {
        let liker = Uuid::new_v4();
        let post = post_with(Uuid::new_v4(), "hi");
        let post_id = post.id;

        let mut posts = MockPostStore::new();
        let loaded = post.clone();
        posts
            .expect_load()
            .returning(move |_| Ok(Some(loaded.clone())));

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        posts
            .expect_save()
            .returning(move |_| Ok(counter.fetch_add(1, Ordering::SeqCst) > 0));

        let likes = service(posts, MockUserStore::new())
            .like_post(liker, post_id)
            .await
            .expect("like failed");

        assert_eq!(likes.len(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn save_conflict_exhausts_attempts() {
        let post = post_with(Uuid::new_v4(), "hi");
        let post_id = post.id;

        let mut posts = MockPostStore::new();
        let loaded = post.clone();
        posts
            .expect_load()
            .returning(move |_| Ok(Some(loaded.clone())));
        posts.expect_save().times(3).returning(|_| Ok(false));

        let err = service(posts, MockUserStore::new())
            .like_post(Uuid::new_v4(), post_id)
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Conflict(_)));
    }
}
