/// Comment handlers - HTTP endpoints for comment operations
use crate::error::Result;
use crate::handlers::{parse_id, validate_request};
use crate::middleware::UserId;
use crate::services::CommentService;
use crate::AppState;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct AddCommentRequest {
    #[validate(length(min = 1, message = "Text is required"))]
    pub text: String,
}

fn comment_service(state: &AppState) -> CommentService {
    CommentService::new(state.posts.clone(), state.users.clone())
}

/// Comment on a post
pub async fn add_comment(
    state: web::Data<AppState>,
    user_id: UserId,
    path: web::Path<String>,
    req: web::Json<AddCommentRequest>,
) -> Result<HttpResponse> {
    let post_id = parse_id(&path, "post")?;

    let req = AddCommentRequest {
        text: req.text.trim().to_string(),
    };
    validate_request(&req)?;

    let comments = comment_service(&state)
        .add_comment(user_id.0, post_id, &req.text)
        .await?;

    Ok(HttpResponse::Ok().json(comments))
}

/// Delete a comment from a post. Comment-author-only.
pub async fn delete_comment(
    state: web::Data<AppState>,
    user_id: UserId,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse> {
    let (post_raw, comment_raw) = path.into_inner();
    let post_id = parse_id(&post_raw, "post")?;
    let comment_id = parse_id(&comment_raw, "comment")?;

    let comments = comment_service(&state)
        .delete_comment(user_id.0, post_id, comment_id)
        .await?;

    Ok(HttpResponse::Ok().json(comments))
}
