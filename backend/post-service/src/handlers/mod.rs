/// HTTP handlers for post-service
pub mod comments;
pub mod posts;

use crate::error::{ApiError, FieldError, Result};
use crate::middleware::JwtAuthMiddleware;
use actix_web::web;
use uuid::Uuid;
use validator::Validate;

/// Register the authenticated API surface.
///
/// Shared between `main` and the integration tests so both run the exact
/// same route table. Fixed segments (`like`, `unlike`, `comment`) are
/// registered ahead of the catch-all `{id}` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .wrap(JwtAuthMiddleware)
            .service(
                web::scope("/posts")
                    .route("", web::post().to(posts::create_post))
                    .route("", web::get().to(posts::list_posts))
                    .route("/like/{id}", web::put().to(posts::like_post))
                    .route("/unlike/{id}", web::put().to(posts::unlike_post))
                    .route("/comment/{id}", web::post().to(comments::add_comment))
                    .route(
                        "/comment/{id}/{comment_id}",
                        web::delete().to(comments::delete_comment),
                    )
                    .route("/{id}", web::get().to(posts::get_post))
                    .route("/{id}", web::delete().to(posts::delete_post)),
            ),
    );
}

/// Parse a path identifier.
///
/// A malformed identifier is indistinguishable from a missing resource to
/// the caller, so it maps to `NotFound` rather than a 400.
pub(crate) fn parse_id(raw: &str, resource: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound(format!("{} not found", resource)))
}

/// Run validator-derive checks and convert failures to field errors.
pub(crate) fn validate_request<T: Validate>(req: &T) -> Result<()> {
    req.validate().map_err(|errors| {
        let fields = errors
            .field_errors()
            .iter()
            .map(|(field, errs)| FieldError {
                field: field.to_string(),
                message: errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "invalid value".to_string()),
            })
            .collect();
        ApiError::Validation(fields)
    })
}
