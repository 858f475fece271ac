/// Business logic layer
///
/// The services own the policy around the post aggregate: input
/// validation, ownership checks, duplicate-like rules, and the
/// read-modify-write cycle with its optimistic concurrency retry. The
/// stores supply raw load/save; nothing here talks SQL.
pub mod comments;
pub mod posts;
#[cfg(test)]
pub(crate) mod test_support;

pub use comments::CommentService;
pub use posts::PostService;

use crate::error::{ApiError, FieldError, Result};
use crate::models::Post;
use crate::repository::PostStore;
use uuid::Uuid;

/// Attempts for a version-checked save before giving up
const SAVE_ATTEMPTS: u32 = 3;

/// Ownership predicate shared by every mutation endpoint.
pub(crate) fn is_owner(actor_id: Uuid, resource_author_id: Uuid) -> bool {
    actor_id == resource_author_id
}

/// Reject empty or whitespace-only text, naming the offending field.
pub(crate) fn non_empty_text(text: &str) -> Result<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Validation(vec![FieldError {
            field: "text".to_string(),
            message: "Text is required".to_string(),
        }]));
    }
    Ok(trimmed.to_string())
}

/// Read-modify-write one post aggregate.
///
/// Loads the post (or `NotFound`), applies the mutation, and writes the
/// aggregate back under the version check. A lost race reloads and
/// reapplies; exhausting the attempts surfaces as `Conflict`.
pub(crate) async fn update_aggregate<T, F>(
    posts: &dyn PostStore,
    post_id: Uuid,
    mut apply: F,
) -> Result<T>
where
    F: FnMut(&mut Post) -> Result<T>,
{
    for _ in 0..SAVE_ATTEMPTS {
        let mut post = posts
            .load(post_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("post not found".to_string()))?;

        let out = apply(&mut post)?;

        if posts.save(&post).await? {
            return Ok(out);
        }
    }

    Err(ApiError::Conflict(
        "post was modified concurrently".to_string(),
    ))
}
