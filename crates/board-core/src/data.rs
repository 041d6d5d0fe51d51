//! Data layer seam for the user lookup.
//!
//! A [`DataLayer`] hands out [`Connection`]s; a connection only ever
//! receives a statement template and its bound values as separate
//! arguments. There is no method that accepts a finished SQL string.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{QueryFailure, QueryResult};
use crate::query::EMAIL_LOOKUP;

/// Source of connections for lookups.
pub trait DataLayer: Send + Sync {
    /// Open a connection. Called once per lookup; there is no pooling.
    fn connect(&self) -> QueryResult<Box<dyn Connection>>;

    /// Short name for logs.
    fn describe(&self) -> &'static str;
}

/// An open connection that executes parameter-bound statements.
pub trait Connection: Send {
    /// Execute `template`, binding `params` to `$1`, `$2`, … out of band.
    fn query_params(&mut self, template: &str, params: &[&str]) -> QueryResult<ResultSet>;
}

/// Owned, text-valued query result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ResultSet {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn row(&self, row: usize) -> Option<Row<'_>> {
        self.rows.get(row).map(|values| Row { values })
    }
}

/// Borrowed view of one result row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    values: &'a [String],
}

impl<'a> Row<'a> {
    pub fn get(&self, col: usize) -> Option<&'a str> {
        self.values.get(col).map(String::as_str)
    }
}

// ── Unavailable ────────────────────────────────────────────────

/// The default data layer: nothing is wired in, every connect fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

impl DataLayer for Unavailable {
    fn connect(&self) -> QueryResult<Box<dyn Connection>> {
        Err(QueryFailure::NotConfigured)
    }

    fn describe(&self) -> &'static str {
        "unavailable"
    }
}

// ── UserDirectory ──────────────────────────────────────────────

/// A row of the `users` relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub email: String,
}

/// In-memory `users` relation seeded from configuration.
///
/// Understands exactly one statement, [`EMAIL_LOOKUP`], and matches the
/// bound email by plain string equality.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: Arc<Vec<UserRecord>>,
}

impl UserDirectory {
    pub fn new(users: Vec<UserRecord>) -> Self {
        Self {
            users: Arc::new(users),
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl DataLayer for UserDirectory {
    fn connect(&self) -> QueryResult<Box<dyn Connection>> {
        Ok(Box::new(DirectoryConnection {
            users: Arc::clone(&self.users),
        }))
    }

    fn describe(&self) -> &'static str {
        "user-directory"
    }
}

struct DirectoryConnection {
    users: Arc<Vec<UserRecord>>,
}

impl Connection for DirectoryConnection {
    fn query_params(&mut self, template: &str, params: &[&str]) -> QueryResult<ResultSet> {
        if template != EMAIL_LOOKUP {
            return Err(QueryFailure::Unsupported(template.to_string()));
        }
        let [email] = params else {
            return Err(QueryFailure::ParamCount {
                expected: 1,
                got: params.len(),
            });
        };

        let rows: Vec<Vec<String>> = self
            .users
            .iter()
            .filter(|u| u.email == *email)
            .map(|u| vec![u.id.to_string(), u.email.clone()])
            .collect();
        debug!(rows = rows.len(), "directory lookup executed");

        Ok(ResultSet::new(
            vec!["id".to_string(), "email".to_string()],
            rows,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> UserDirectory {
        UserDirectory::new(vec![
            UserRecord {
                id: 1,
                email: "test@example.com".to_string(),
            },
            UserRecord {
                id: 2,
                email: "ops@example.com".to_string(),
            },
        ])
    }

    #[test]
    fn unavailable_never_connects() {
        match Unavailable.connect() {
            Err(QueryFailure::NotConfigured) => {}
            Err(other) => panic!("expected NotConfigured, got: {other}"),
            Ok(_) => panic!("expected NotConfigured, got a connection"),
        }
    }

    #[test]
    fn directory_matches_exact_email() {
        let mut conn = directory().connect().unwrap();
        let result = conn
            .query_params(EMAIL_LOOKUP, &["test@example.com"])
            .unwrap();

        assert_eq!(result.num_rows(), 1);
        assert_eq!(result.num_cols(), 2);
        let row = result.row(0).unwrap();
        assert_eq!(row.get(0), Some("1"));
        assert_eq!(row.get(1), Some("test@example.com"));
        assert_eq!(row.get(2), None);
    }

    #[test]
    fn directory_treats_payload_as_data() {
        let mut conn = directory().connect().unwrap();
        let result = conn
            .query_params(EMAIL_LOOKUP, &["x' OR '1'='1"])
            .unwrap();
        assert_eq!(result.num_rows(), 0);
    }

    #[test]
    fn directory_rejects_other_statements() {
        let mut conn = directory().connect().unwrap();
        let err = conn
            .query_params("SELECT id, email FROM users", &[])
            .unwrap_err();
        assert!(matches!(err, QueryFailure::Unsupported(_)));
    }

    #[test]
    fn directory_checks_param_count() {
        let mut conn = directory().connect().unwrap();
        let err = conn.query_params(EMAIL_LOOKUP, &["a", "b"]).unwrap_err();
        assert!(matches!(err, QueryFailure::ParamCount { expected: 1, got: 2 }));
    }
}
