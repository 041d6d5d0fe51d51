//! board-core — the building blocks of the comment board.
//!
//! Everything here is transport-agnostic: the HTML encoder, the markup
//! builder, the bounded comment log, and the parameter-bound user lookup.
//! `board-api` wires these into axum handlers.

pub mod data;
pub mod encode;
pub mod error;
pub mod markup;
pub mod query;
pub mod store;

pub use data::{Connection, DataLayer, ResultSet, Row, Unavailable, UserDirectory, UserRecord};
pub use encode::{encode, encode_opt};
pub use error::{QueryFailure, QueryResult};
pub use query::{EMAIL_LOOKUP, LookupRequest, build_email_lookup, execute};
pub use store::{Comment, CommentStore, MAX_COMMENTS};
