//! Blog CRUD handlers: list, fetch, create, update, delete.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(super) struct CreateBlogRequest {
    pub title: String,
    pub author: String,
    pub url: String,
    // Absent in the request means "start at zero"; defaulting happens here,
    // upstream of everything that reads the record.
    pub likes: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub(super) struct UpdateBlogRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(super) struct BlogItem {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<bloglist_db::BlogRow> for BlogItem {
    fn from(row: bloglist_db::BlogRow) -> Self {
        Self {
            id: row.public_id,
            title: row.title,
            author: row.author,
            url: row.url,
            likes: row.likes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

fn validate_text_field(req_id: &str, field: &str, value: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.len() > 500 {
        return Err(ApiError::new(
            req_id,
            "validation_error",
            format!("{field} must be 1–500 characters"),
        ));
    }
    Ok(trimmed.to_owned())
}

fn validate_url(req_id: &str, value: &str) -> Result<String, ApiError> {
    match url::Url::parse(value.trim()) {
        Ok(parsed) => Ok(parsed.to_string()),
        Err(_) => Err(ApiError::new(
            req_id,
            "validation_error",
            format!("'url' must be a valid URL, got '{value}'"),
        )),
    }
}

fn validate_likes(req_id: &str, value: i64) -> Result<i64, ApiError> {
    if value < 0 {
        return Err(ApiError::new(
            req_id,
            "validation_error",
            format!("likes must be non-negative, got {value}"),
        ));
    }
    Ok(value)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/blogs — all blogs, newest first.
pub(super) async fn list_blogs(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<BlogItem>>>, ApiError> {
    let rows = bloglist_db::list_blogs(&state.pool)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: rows.into_iter().map(BlogItem::from).collect(),
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// GET /api/v1/blogs/:id — one blog by public id.
pub(super) async fn get_blog(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BlogItem>>, ApiError> {
    let row = bloglist_db::get_blog_by_public_id(&state.pool, id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "not_found", "blog not found"))?;

    Ok(Json(ApiResponse {
        data: BlogItem::from(row),
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// POST /api/v1/blogs — create a new blog.
pub(super) async fn create_blog(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<CreateBlogRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BlogItem>>), ApiError> {
    let rid = &req_id.0;

    let title = validate_text_field(rid, "title", &body.title)?;
    let author = validate_text_field(rid, "author", &body.author)?;
    let url = validate_url(rid, &body.url)?;
    let likes = validate_likes(rid, body.likes.unwrap_or(0))?;

    let row = bloglist_db::create_blog(&state.pool, &title, &author, &url, likes)
        .await
        .map_err(|e| map_db_error(rid.clone(), &e))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: BlogItem::from(row),
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}

/// PATCH /api/v1/blogs/:id — update blog fields (sparse).
pub(super) async fn update_blog(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateBlogRequest>,
) -> Result<Json<ApiResponse<BlogItem>>, ApiError> {
    let rid = &req_id.0;

    let title = body
        .title
        .as_deref()
        .map(|v| validate_text_field(rid, "title", v))
        .transpose()?;
    let author = body
        .author
        .as_deref()
        .map(|v| validate_text_field(rid, "author", v))
        .transpose()?;
    let url = body
        .url
        .as_deref()
        .map(|v| validate_url(rid, v))
        .transpose()?;
    let likes = body.likes.map(|v| validate_likes(rid, v)).transpose()?;

    let row = bloglist_db::update_blog(
        &state.pool,
        id,
        title.as_deref(),
        author.as_deref(),
        url.as_deref(),
        likes,
    )
    .await
    .map_err(|e| map_db_error(rid.clone(), &e))?
    .ok_or_else(|| ApiError::new(rid.clone(), "not_found", "blog not found"))?;

    Ok(Json(ApiResponse {
        data: BlogItem::from(row),
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// DELETE /api/v1/blogs/:id — remove a blog.
pub(super) async fn delete_blog(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let rid = &req_id.0;

    let deleted = bloglist_db::delete_blog(&state.pool, id)
        .await
        .map_err(|e| map_db_error(rid.clone(), &e))?;

    if !deleted {
        return Err(ApiError::new(rid.clone(), "not_found", "blog not found"));
    }

    Ok(Json(ApiResponse {
        data: serde_json::json!({ "deleted": true }),
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_text_field_trims_and_accepts() {
        let value = validate_text_field("req-1", "title", "  React patterns  ").expect("valid");
        assert_eq!(value, "React patterns");
    }

    #[test]
    fn validate_text_field_rejects_blank() {
        assert!(validate_text_field("req-1", "title", "   ").is_err());
    }

    #[test]
    fn validate_text_field_rejects_overlong() {
        let long = "x".repeat(501);
        assert!(validate_text_field("req-1", "author", &long).is_err());
    }

    #[test]
    fn validate_url_accepts_https() {
        let value = validate_url("req-1", "https://blog.cleancoder.com/").expect("valid");
        assert_eq!(value, "https://blog.cleancoder.com/");
    }

    #[test]
    fn validate_url_rejects_garbage() {
        assert!(validate_url("req-1", "not a url").is_err());
    }

    #[test]
    fn validate_likes_rejects_negative() {
        assert!(validate_likes("req-1", -1).is_err());
        assert_eq!(validate_likes("req-1", 0).expect("zero ok"), 0);
    }
}
