//! Aggregate statistics endpoint, backed by `bloglist_core::stats`.

use axum::{extract::State, Extension, Json};
use bloglist_core::stats::{FavoriteBlog, TopAuthorByLikes, TopAuthorByPosts};
use bloglist_core::BlogPost;
use serde::Serialize;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct BlogStats {
    pub total_likes: i64,
    pub favorite: Option<FavoriteBlog>,
    pub most_blogs: Option<TopAuthorByPosts>,
    pub most_likes: Option<TopAuthorByLikes>,
}

/// GET /api/v1/blogs/stats — summary statistics over the whole collection.
///
/// The aggregation itself is pure; this handler only fetches the collection
/// and hands it over.
pub(super) async fn get_blog_stats(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<BlogStats>>, ApiError> {
    let rows = bloglist_db::list_blogs(&state.pool)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let posts: Vec<BlogPost> = rows
        .into_iter()
        .map(|row| BlogPost {
            title: row.title,
            author: row.author,
            url: row.url,
            likes: row.likes,
        })
        .collect();

    let data = BlogStats {
        total_likes: bloglist_core::stats::total_likes(&posts),
        favorite: bloglist_core::stats::favorite_blog(&posts),
        most_blogs: bloglist_core::stats::most_blogs(&posts),
        most_likes: bloglist_core::stats::most_likes(&posts),
    };

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
