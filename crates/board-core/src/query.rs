//! Parameter-bound lookup construction.
//!
//! A [`LookupRequest`] pairs a compile-time template with the values to
//! bind to it. The template field is `&'static str`, so request data can
//! never become part of it; the two only meet inside
//! [`Connection::query_params`].

use tracing::debug;

use crate::data::{Connection, ResultSet};
use crate::error::QueryResult;

/// Find a user by email. `$1` is the email.
pub const EMAIL_LOOKUP: &str = "SELECT id, email FROM users WHERE email = $1";

/// A statement template plus its out-of-band parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    template: &'static str,
    params: Vec<String>,
}

impl LookupRequest {
    pub fn template(&self) -> &'static str {
        self.template
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }
}

/// Build the email lookup. `email` is bound as-is: no escaping, no
/// trimming, no validation.
pub fn build_email_lookup(email: &str) -> LookupRequest {
    LookupRequest {
        template: EMAIL_LOOKUP,
        params: vec![email.to_string()],
    }
}

/// Run a lookup on `conn`. Single attempt, no retry.
pub fn execute(request: &LookupRequest, conn: &mut dyn Connection) -> QueryResult<ResultSet> {
    let params: Vec<&str> = request.params.iter().map(String::as_str).collect();
    let result = conn.query_params(request.template, &params)?;
    debug!(rows = result.num_rows(), "lookup executed");
    Ok(result)
}
