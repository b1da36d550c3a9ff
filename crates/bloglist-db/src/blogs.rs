//! Database operations for the `blogs` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `blogs` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BlogRow {
    pub id: i64,
    pub public_id: Uuid,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns all blogs, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_blogs(pool: &PgPool) -> Result<Vec<BlogRow>, DbError> {
    let rows = sqlx::query_as::<_, BlogRow>(
        "SELECT id, public_id, title, author, url, likes, created_at, updated_at \
         FROM blogs \
         ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns a single blog by its public UUID, or `None` if not found.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_blog_by_public_id(
    pool: &PgPool,
    public_id: Uuid,
) -> Result<Option<BlogRow>, DbError> {
    let row = sqlx::query_as::<_, BlogRow>(
        "SELECT id, public_id, title, author, url, likes, created_at, updated_at \
         FROM blogs \
         WHERE public_id = $1",
    )
    .bind(public_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Creates a new blog row and returns the full inserted row.
///
/// `likes` arrives already defaulted by the caller; the column also carries
/// `DEFAULT 0 CHECK (likes >= 0)` so the invariant holds at the schema level.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn create_blog(
    pool: &PgPool,
    title: &str,
    author: &str,
    url: &str,
    likes: i64,
) -> Result<BlogRow, DbError> {
    let row = sqlx::query_as::<_, BlogRow>(
        "INSERT INTO blogs (title, author, url, likes) \
         VALUES ($1, $2, $3, $4) \
         RETURNING id, public_id, title, author, url, likes, created_at, updated_at",
    )
    .bind(title)
    .bind(author)
    .bind(url)
    .bind(likes)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Updates fields of an existing blog.
///
/// `Some(v)` sets the value, `None` preserves the existing one. Uses `COALESCE`
/// in a single `UPDATE … RETURNING` statement to eliminate the race condition
/// of a separate SELECT + UPDATE. Returns `None` if no row matched.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn update_blog(
    pool: &PgPool,
    public_id: Uuid,
    title: Option<&str>,
    author: Option<&str>,
    url: Option<&str>,
    likes: Option<i64>,
) -> Result<Option<BlogRow>, DbError> {
    let row = sqlx::query_as::<_, BlogRow>(
        "UPDATE blogs \
         SET title      = COALESCE($2, title), \
             author     = COALESCE($3, author), \
             url        = COALESCE($4, url), \
             likes      = COALESCE($5, likes), \
             updated_at = NOW() \
         WHERE public_id = $1 \
         RETURNING id, public_id, title, author, url, likes, created_at, updated_at",
    )
    .bind(public_id)
    .bind(title)
    .bind(author)
    .bind(url)
    .bind(likes)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Deletes a blog by its public UUID. Returns `true` if a row was removed.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn delete_blog(pool: &PgPool, public_id: Uuid) -> Result<bool, DbError> {
    let result = sqlx::query("DELETE FROM blogs WHERE public_id = $1")
        .bind(public_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
