/// Data models for post-service
///
/// The Post is an aggregate: its likes and comments are embedded lists,
/// persisted and loaded together with the post row. The `version` field
/// drives the optimistic concurrency check on save and is never exposed
/// in API responses.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A like on a post. A reference to the liking user, nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    pub user_id: Uuid,
}

/// A comment embedded in its parent post.
///
/// Author name and avatar are denormalized at creation time, matching the
/// parent post's treatment of its own author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub avatar: Option<String>,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Post aggregate - a post together with its embedded likes and comments
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub id: Uuid,
    /// Author reference
    pub user_id: Uuid,
    /// Author name captured at creation time, not live-synced
    pub name: String,
    /// Author avatar captured at creation time
    pub avatar: Option<String>,
    pub text: String,
    /// Most-recent-first
    pub likes: Vec<Like>,
    /// Most-recent-first
    pub comments: Vec<Comment>,
    #[serde(skip_serializing)]
    pub version: i64,
    pub created_at: DateTime<Utc>,
}

/// The slice of a user record this service reads.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserProfile {
    pub name: String,
    pub avatar: Option<String>,
}
