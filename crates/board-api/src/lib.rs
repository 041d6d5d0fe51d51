//! board-api — HTTP surface of the comment board.
//!
//! Routes are matched by exact, percent-decoded path under a mount point
//! (default `/asmt`). Every endpoint answers both GET and POST; other
//! methods get an HTML 405 page.
//!
//! # Routes
//!
//! | Path | Description |
//! |---|---|
//! | `{mount}/` | Index with links to the other endpoints |
//! | `{mount}/comment` | Submit a comment (`author`, `text`) |
//! | `{mount}/search` | Search placeholder results for `q` |
//! | `{mount}/userByEmail` | Parameter-bound user lookup by `email` |
//! | `{mount}/list` | Most recent comments, newest first |
//! | anything else | 404 |

pub mod handlers;
pub mod params;
pub mod path;
pub mod views;

use std::sync::Arc;

use axum::Router;
use axum::middleware;
use axum::routing::get;
use board_core::{CommentStore, DataLayer};

pub use params::Params;

/// Path prefix the board is served under.
///
/// Normalized to either the empty string (root) or a string starting with
/// `/` and not ending with one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mount(Arc<str>);

impl Mount {
    pub fn new(prefix: &str) -> Self {
        let trimmed = prefix.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            Self(Arc::from(""))
        } else if trimmed.starts_with('/') {
            Self(Arc::from(trimmed))
        } else {
            Self(Arc::from(format!("/{trimmed}")))
        }
    }

    pub fn prefix(&self) -> &str {
        &self.0
    }

    /// The index URL: the prefix itself, or `/` at the root.
    pub fn home(&self) -> String {
        if self.0.is_empty() {
            "/".to_string()
        } else {
            self.0.to_string()
        }
    }

    /// Absolute URL of an endpoint; `path` starts with `/`.
    pub fn href(&self, path: &str) -> String {
        format!("{}{path}", self.0)
    }
}

impl Default for Mount {
    fn default() -> Self {
        Self::new("/asmt")
    }
}

/// Shared state for board handlers.
#[derive(Clone)]
pub struct BoardState {
    pub comments: Arc<CommentStore>,
    pub data: Arc<dyn DataLayer>,
    pub mount: Mount,
}

impl BoardState {
    pub fn new(comments: Arc<CommentStore>, data: Arc<dyn DataLayer>, mount: Mount) -> Self {
        Self {
            comments,
            data,
            mount,
        }
    }
}

/// Build the board router. Unmatched paths, inside or outside the mount,
/// fall through to the 404 handler.
///
/// Path decoding wraps the whole board router: layers on its routes would
/// only run after matching.
pub fn build_router(state: BoardState) -> Router {
    let mount = state.mount.clone();

    let router = if mount.prefix().is_empty() {
        Router::new().route("/", get(handlers::home).post(handlers::home))
    } else {
        Router::new()
            .route(mount.prefix(), get(handlers::home).post(handlers::home))
            .route(&mount.href("/"), get(handlers::home).post(handlers::home))
    };

    let board = router
        .route(
            &mount.href("/comment"),
            get(handlers::submit_comment).post(handlers::submit_comment),
        )
        .route(&mount.href("/search"), get(handlers::search).post(handlers::search))
        .route(
            &mount.href("/userByEmail"),
            get(handlers::user_by_email).post(handlers::user_by_email),
        )
        .route(
            &mount.href("/list"),
            get(handlers::list_comments).post(handlers::list_comments),
        )
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .fallback(handlers::not_found)
        .with_state(state);

    Router::new()
        .fallback_service(board)
        .layer(middleware::map_request(path::decode_request_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mount_normalizes_prefix() {
        assert_eq!(Mount::new("/asmt").prefix(), "/asmt");
        assert_eq!(Mount::new("/asmt/").prefix(), "/asmt");
        assert_eq!(Mount::new("asmt").prefix(), "/asmt");
        assert_eq!(Mount::new("/").prefix(), "");
        assert_eq!(Mount::new("").prefix(), "");
    }

    #[test]
    fn mount_builds_hrefs() {
        let mount = Mount::default();
        assert_eq!(mount.home(), "/asmt");
        assert_eq!(mount.href("/list"), "/asmt/list");

        let root = Mount::new("");
        assert_eq!(root.home(), "/");
        assert_eq!(root.href("/list"), "/list");
    }
}
