/// Comment service - comment creation and deletion on the post aggregate
use crate::error::{ApiError, Result};
use crate::models::Comment;
use crate::repository::{PostStore, UserStore};
use crate::services::{is_owner, non_empty_text, update_aggregate};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

pub struct CommentService {
    posts: Arc<dyn PostStore>,
    users: Arc<dyn UserStore>,
}

impl CommentService {
    pub fn new(posts: Arc<dyn PostStore>, users: Arc<dyn UserStore>) -> Self {
        Self { posts, users }
    }

    /// Comment on a post. The new comment gets a fresh identifier and
    /// lands at the front of the list.
    pub async fn add_comment(
        &self,
        actor_id: Uuid,
        post_id: Uuid,
        text: &str,
    ) -> Result<Vec<Comment>> {
        let text = non_empty_text(text)?;

        let profile = self
            .users
            .load_profile(actor_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("user not found".to_string()))?;

        update_aggregate(self.posts.as_ref(), post_id, |post| {
            post.comments.insert(
                0,
                Comment {
                    id: Uuid::new_v4(),
                    user_id: actor_id,
                    name: profile.name.clone(),
                    avatar: profile.avatar.clone(),
                    text: text.clone(),
                    created_at: Utc::now(),
                },
            );
            Ok(post.comments.clone())
        })
        .await
    }

    /// Delete a comment. Author-only. The comment is matched and removed
    /// by identifier equality, never by author.
    pub async fn delete_comment(
        &self,
        actor_id: Uuid,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> Result<Vec<Comment>> {
        update_aggregate(self.posts.as_ref(), post_id, |post| {
            let index = post
                .comments
                .iter()
                .position(|comment| comment.id == comment_id)
                .ok_or_else(|| ApiError::NotFound("comment not found".to_string()))?;

            if !is_owner(actor_id, post.comments[index].user_id) {
                return Err(ApiError::Forbidden(
                    "user is not the comment author".to_string(),
                ));
            }

            post.comments.remove(index);
            Ok(post.comments.clone())
        })
        .await
    }
}
