use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use subtle::{Choice, ConstantTimeEq};
use tokio::sync::Mutex;
use uuid::Uuid;

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Bearer-token auth settings used by middleware.
#[derive(Debug, Clone)]
pub struct AuthState {
    tokens: Arc<Vec<String>>,
    pub enabled: bool,
}

impl AuthState {
    /// Builds auth config from `BLOGLIST_API_TOKENS` (comma-separated bearer tokens).
    ///
    /// In development, empty/missing tokens disable auth for local iteration.
    /// In non-development envs, empty/missing tokens fail startup.
    pub fn from_env(is_development: bool) -> anyhow::Result<Self> {
        let raw = std::env::var("BLOGLIST_API_TOKENS").unwrap_or_default();
        let tokens: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToOwned::to_owned)
            .collect();

        if tokens.is_empty() {
            if is_development {
                tracing::warn!(
                    "BLOGLIST_API_TOKENS not set; bearer auth disabled in development environment"
                );
                return Ok(Self {
                    tokens: Arc::new(Vec::new()),
                    enabled: false,
                });
            }

            anyhow::bail!(
                "BLOGLIST_API_TOKENS is required outside development; provide comma-separated bearer tokens"
            );
        }

        Ok(Self {
            tokens: Arc::new(tokens),
            enabled: true,
        })
    }

    /// Builds auth config from an explicit token list, independent of env.
    #[must_use]
    pub fn with_tokens(tokens: Vec<String>) -> Self {
        let enabled = !tokens.is_empty();
        Self {
            tokens: Arc::new(tokens),
            enabled,
        }
    }

    /// Matches the candidate against every configured token without
    /// short-circuiting, so timing does not reveal which token (if any) matched.
    fn allows(&self, token: &str) -> bool {
        let mut matched = Choice::from(0u8);
        for configured in self.tokens.iter() {
            matched |= ct_str_eq(configured, token);
        }
        matched.into()
    }
}

fn ct_str_eq(a: &str, b: &str) -> Choice {
    if a.len() != b.len() {
        return Choice::from(0u8);
    }
    a.as_bytes().ct_eq(b.as_bytes())
}

#[derive(Debug, Clone)]
struct RateLimitWindow {
    started_at: Instant,
    count: usize,
}

/// Sliding fixed-window limiter for simple API protection.
#[derive(Debug, Clone)]
pub struct RateLimitState {
    max_requests: usize,
    window: Duration,
    state: Arc<Mutex<RateLimitWindow>>,
}

impl RateLimitState {
    #[must_use]
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            state: Arc::new(Mutex::new(RateLimitWindow {
                started_at: Instant::now(),
                count: 0,
            })),
        }
    }
}

#[derive(Debug, Serialize)]
struct MiddlewareErrorBody {
    error: MiddlewareError,
}

#[derive(Debug, Serialize)]
struct MiddlewareError {
    code: &'static str,
    message: &'static str,
}

/// Axum middleware that extracts or generates a request ID.
///
/// If the incoming request has an `x-request-id` header, that value is used.
/// Otherwise a new `UUIDv4` is generated. The ID is:
/// - Inserted into request extensions as [`RequestId`]
/// - Set on the response as the `x-request-id` header
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert("x-request-id", val);
    }

    res
}

/// Middleware enforcing Bearer token auth when enabled.
pub async fn require_bearer_auth(
    State(auth): State<AuthState>,
    req: Request,
    next: Next,
) -> Response {
    if !auth.enabled {
        return next.run(req).await;
    }

    let token = extract_bearer_token(req.headers().get(AUTHORIZATION));

    match token {
        Some(token) if auth.allows(token) => next.run(req).await,
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(MiddlewareErrorBody {
                error: MiddlewareError {
                    code: "unauthorized",
                    message: "missing or invalid bearer token",
                },
            }),
        )
            .into_response(),
    }
}

/// Middleware enforcing a fixed request-per-window limit.
pub async fn enforce_rate_limit(
    State(rate_limit): State<RateLimitState>,
    req: Request,
    next: Next,
) -> Response {
    let mut window = rate_limit.state.lock().await;
    let elapsed = window.started_at.elapsed();

    if elapsed >= rate_limit.window {
        window.started_at = Instant::now();
        window.count = 0;
    }

    if window.count >= rate_limit.max_requests {
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(MiddlewareErrorBody {
                error: MiddlewareError {
                    code: "rate_limited",
                    message: "rate limit exceeded",
                },
            }),
        )
            .into_response();
    }

    window.count += 1;
    drop(window);

    next.run(req).await
}

fn extract_bearer_token(value: Option<&HeaderValue>) -> Option<&str> {
    value
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_bearer_token_accepts_valid_header() {
        let header = HeaderValue::from_static("Bearer test-token");
        assert_eq!(extract_bearer_token(Some(&header)), Some("test-token"));
    }

    #[test]
    fn extract_bearer_token_rejects_non_bearer_header() {
        let header = HeaderValue::from_static("Basic abc123");
        assert_eq!(extract_bearer_token(Some(&header)), None);
    }

    #[test]
    fn extract_bearer_token_rejects_empty_token() {
        let header = HeaderValue::from_static("Bearer ");
        assert_eq!(extract_bearer_token(Some(&header)), None);
    }

    #[test]
    fn auth_state_matches_any_configured_token() {
        let auth = AuthState::with_tokens(vec!["alpha".to_owned(), "beta".to_owned()]);
        assert!(auth.allows("alpha"));
        assert!(auth.allows("beta"));
        assert!(!auth.allows("gamma"));
        assert!(!auth.allows("alph"));
    }

    #[test]
    fn ct_str_eq_differs_on_length() {
        assert!(!bool::from(ct_str_eq("short", "longer-token")));
        assert!(bool::from(ct_str_eq("same", "same")));
    }

    #[test]
    fn with_tokens_disables_auth_on_empty_list() {
        let auth = AuthState::with_tokens(Vec::new());
        assert!(!auth.enabled);
    }
}
