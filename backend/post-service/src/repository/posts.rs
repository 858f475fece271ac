use crate::error::Result;
use crate::models::{Comment, Like, Post};
use crate::repository::PostStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL implementation of `PostStore`
///
/// The embedded like/comment lists travel as JSONB columns so the whole
/// aggregate is one row.
#[derive(Clone)]
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    user_id: Uuid,
    name: String,
    avatar: Option<String>,
    text: String,
    likes: Json<Vec<Like>>,
    comments: Json<Vec<Comment>>,
    version: i64,
    created_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            avatar: row.avatar,
            text: row.text,
            likes: row.likes.0,
            comments: row.comments.0,
            version: row.version,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn load(&self, post_id: Uuid) -> Result<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, user_id, name, avatar, text, likes, comments, version, created_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Post::from))
    }

    async fn list_recent(&self) -> Result<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, user_id, name, avatar, text, likes, comments, version, created_at
            FROM posts
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn insert(&self, post: &Post) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, user_id, name, avatar, text, likes, comments, version, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(post.id)
        .bind(post.user_id)
        .bind(&post.name)
        .bind(&post.avatar)
        .bind(&post.text)
        .bind(Json(&post.likes))
        .bind(Json(&post.comments))
        .bind(post.version)
        .bind(post.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, post: &Post) -> Result<bool> {
        // Version-checked write: zero rows affected means a concurrent
        // writer bumped the version since this aggregate was loaded.
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET name = $2, avatar = $3, text = $4, likes = $5, comments = $6,
                version = version + 1
            WHERE id = $1 AND version = $7
            "#,
        )
        .bind(post.id)
        .bind(&post.name)
        .bind(&post.avatar)
        .bind(&post.text)
        .bind(Json(&post.likes))
        .bind(Json(&post.comments))
        .bind(post.version)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, post_id: Uuid) -> Result<()> {
        // Likes and comments are embedded in the row, so this is the
        // whole cascade.
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(post_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
