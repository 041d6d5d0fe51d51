//! Request parameter extraction.
//!
//! [`Params`] collects `name=value` pairs from the query string and, for
//! urlencoded form posts, the body. The first value for a name wins and
//! the query string is read before the body. Missing names read as the
//! empty string; extraction never rejects a request.

use std::collections::HashMap;
use std::convert::Infallible;

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use tracing::debug;
use url::form_urlencoded;

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Clone, Default)]
pub struct Params {
    values: HashMap<String, String>,
}

impl Params {
    /// Parse a urlencoded string such as `q=hello&x=1`.
    pub fn parse(input: &str) -> Self {
        let mut params = Self::default();
        params.extend_from(input.as_bytes());
        params
    }

    fn extend_from(&mut self, input: &[u8]) {
        for (name, value) in form_urlencoded::parse(input) {
            self.values
                .entry(name.into_owned())
                .or_insert_with(|| value.into_owned());
        }
    }

    /// Value of `name`, or `""` when absent.
    pub fn get(&self, name: &str) -> String {
        self.value(name).unwrap_or_default().to_string()
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|ct| ct.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_URLENCODED))
}

impl<S> FromRequest<S> for Params
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut params = Params::default();
        if let Some(query) = req.uri().query() {
            params.extend_from(query.as_bytes());
        }

        if is_form(&req) {
            match Bytes::from_request(req, state).await {
                Ok(body) => params.extend_from(&body),
                Err(e) => debug!(error = %e, "unreadable form body, using query parameters only"),
            }
        }

        Ok(params)
    }
}
