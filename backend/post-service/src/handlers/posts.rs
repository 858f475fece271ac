/// Post handlers - HTTP endpoints for post operations
use crate::error::Result;
use crate::handlers::{parse_id, validate_request};
use crate::middleware::UserId;
use crate::services::PostService;
use crate::AppState;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, message = "Text is required"))]
    pub text: String,
}

fn post_service(state: &AppState) -> PostService {
    PostService::new(state.posts.clone(), state.users.clone())
}

/// Create a new post
pub async fn create_post(
    state: web::Data<AppState>,
    user_id: UserId,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let req = CreatePostRequest {
        text: req.text.trim().to_string(),
    };
    validate_request(&req)?;

    let post = post_service(&state).create_post(user_id.0, &req.text).await?;

    Ok(HttpResponse::Ok().json(post))
}

/// Get all posts, newest first
pub async fn list_posts(state: web::Data<AppState>) -> Result<HttpResponse> {
    let posts = post_service(&state).list_posts().await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// Get a post by ID
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let post_id = parse_id(&path, "post")?;
    let post = post_service(&state).get_post(post_id).await?;

    Ok(HttpResponse::Ok().json(post))
}

/// Delete a post. Author-only.
pub async fn delete_post(
    state: web::Data<AppState>,
    user_id: UserId,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let post_id = parse_id(&path, "post")?;
    post_service(&state).delete_post(user_id.0, post_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "post removed" })))
}

/// Like a post
pub async fn like_post(
    state: web::Data<AppState>,
    user_id: UserId,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let post_id = parse_id(&path, "post")?;
    let likes = post_service(&state).like_post(user_id.0, post_id).await?;

    Ok(HttpResponse::Ok().json(likes))
}

/// Remove the caller's like from a post
pub async fn unlike_post(
    state: web::Data<AppState>,
    user_id: UserId,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let post_id = parse_id(&path, "post")?;
    let likes = post_service(&state).unlike_post(user_id.0, post_id).await?;

    Ok(HttpResponse::Ok().json(likes))
}
