//! Board handlers.
//!
//! Each handler reads its parameters through [`Params`], encodes anything
//! that came from the request or the comment log, and returns a full HTML
//! page. Failures never leave the handler.

use axum::extract::{Request, State};
use axum::http::{Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use tracing::{debug, info, warn};

use board_core::{Comment, build_email_lookup, encode, encode_opt, execute};

use crate::BoardState;
use crate::params::Params;
use crate::path::{self, RequestPath};
use crate::views;

/// Content type of every board response.
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=UTF-8";

const LOOKUP_HEADING: &str = "Lookup";
const LOOKUP_OK: &str = "Queried by email (parameterized).";
const LOOKUP_FAILED: &str = "Lookup failed. The user directory is unavailable.";

fn html(status: StatusCode, body: String) -> Response {
    (status, [(header::CONTENT_TYPE, HTML_CONTENT_TYPE)], body).into_response()
}

// ── Index ──────────────────────────────────────────────────────

/// GET {mount}/
pub async fn home(State(state): State<BoardState>) -> Response {
    let sections = views::index_sections(&state.mount);
    html(StatusCode::OK, views::layout("Comment Board", &sections))
}

// ── Comments ───────────────────────────────────────────────────

/// POST {mount}/comment
pub async fn submit_comment(State(state): State<BoardState>, params: Params) -> Response {
    let author = params.get("author");
    let text = params.get("text");

    state.comments.add(Comment::new(author.as_str(), text.as_str()));
    info!(
        author_len = author.len(),
        text_len = text.len(),
        stored = state.comments.len(),
        "comment accepted"
    );

    let safe_author = encode(&author);
    let safe_text = encode(&text);
    let heading = format!("Thanks, {safe_author}");
    let sections = views::thank_you_sections(&heading, &safe_text, &state.mount);
    html(StatusCode::OK, views::layout("Submitted", &sections))
}

/// GET {mount}/list
pub async fn list_comments(State(state): State<BoardState>) -> Response {
    let comments = state.comments.recent();
    debug!(
        count = comments.len(),
        newest = ?comments.first().map(Comment::submitted_at),
        "listing comments"
    );
    let sections = views::comments_sections(&comments, &state.mount);
    html(StatusCode::OK, views::layout("All Comments", &sections))
}

// ── Search ─────────────────────────────────────────────────────

/// GET {mount}/search?q=...
pub async fn search(State(state): State<BoardState>, params: Params) -> Response {
    let safe_query = encode_opt(params.value("q"));
    let items = views::render_items(&safe_query);
    let sections = views::search_sections(&safe_query, &items, &state.mount);
    html(StatusCode::OK, views::layout("Search", &sections))
}

// ── User lookup ────────────────────────────────────────────────

/// GET {mount}/userByEmail?email=...
///
/// Success and failure both render a fixed notice; neither the email nor
/// the statement is echoed.
pub async fn user_by_email(State(state): State<BoardState>, params: Params) -> Response {
    let email = params.get("email");
    let request = build_email_lookup(&email);

    let outcome = state
        .data
        .connect()
        .and_then(|mut conn| execute(&request, conn.as_mut()));

    let message = match outcome {
        Ok(result) => {
            info!(
                layer = state.data.describe(),
                rows = result.num_rows(),
                columns = result.num_cols(),
                "user lookup completed"
            );
            LOOKUP_OK
        }
        Err(e) => {
            warn!(layer = state.data.describe(), error = e.kind(), "user lookup failed");
            LOOKUP_FAILED
        }
    };

    let sections = views::notice_sections(LOOKUP_HEADING, message, &state.mount);
    html(StatusCode::OK, views::layout("User Lookup", &sections))
}

// ── Fallback ───────────────────────────────────────────────────

/// Any unmatched path. The path is percent-decoded, then encoded.
pub async fn not_found(State(state): State<BoardState>, req: Request) -> Response {
    let path = match req.extensions().get::<RequestPath>() {
        Some(RequestPath(decoded)) => decoded.clone(),
        None => path::decode(req.uri().path()),
    };
    debug!(%path, "no route");

    let sections = views::not_found_sections(&encode(&path), &state.mount);
    html(StatusCode::NOT_FOUND, views::layout("404", &sections))
}

/// A board path requested with a method other than GET or POST.
pub async fn method_not_allowed(State(state): State<BoardState>, method: Method) -> Response {
    debug!(%method, "method not allowed");

    let sections = views::method_not_allowed_sections(&encode(method.as_str()), &state.mount);
    html(StatusCode::METHOD_NOT_ALLOWED, views::layout("405", &sections))
}
