//! error types
//!
//! structured errors for config, variables, http, json, and graphql responses.

use crate::graphql::GraphQlError;
use std::fmt;

/// library result type
pub type Result<T> = std::result::Result<T, Error>;

/// error type for the client and document helpers
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("variable `{name}` could not be serialized: {source}")]
    Variable {
        name: String,
        source: serde_json::Error,
    },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("graphql error: {message}")]
    GraphQl {
        /// http status if available
        status: Option<u16>,
        /// graphql error list, in server order
        errors: Vec<GraphQlError>,
        /// partial data returned alongside the errors
        data: Option<serde_json::Value>,
        /// raw response body
        body: String,
        /// top-level message
        message: String,
    },
}

impl Error {
    /// true if the error looks like an auth failure
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::GraphQl { status: Some(401 | 403), .. })
            || matches!(
                self,
                Error::Http(err) if err.status() == Some(reqwest::StatusCode::UNAUTHORIZED)
            )
    }

    /// server reported errors, empty for non-graphql failures
    pub fn graphql_errors(&self) -> &[GraphQlError] {
        match self {
            Error::GraphQl { errors, .. } => errors.as_slice(),
            _ => &[],
        }
    }

    /// partial data the server returned with its errors
    pub fn partial_data(&self) -> Option<&serde_json::Value> {
        match self {
            Error::GraphQl { data, .. } => data.as_ref(),
            _ => None,
        }
    }
}

impl fmt::Display for GraphQlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graphql_error(status: u16) -> Error {
        Error::GraphQl {
            status: Some(status),
            errors: vec![],
            data: None,
            body: String::new(),
            message: "failed".to_string(),
        }
    }

    #[test]
    fn test_is_auth_error() {
        assert!(graphql_error(401).is_auth_error());
        assert!(graphql_error(403).is_auth_error());
        assert!(!graphql_error(500).is_auth_error());
        assert!(!Error::Config("bad".to_string()).is_auth_error());
    }

    #[test]
    fn test_partial_data_and_errors() {
        let err = Error::GraphQl {
            status: Some(200),
            errors: vec![GraphQlError {
                message: "boom".to_string(),
                locations: vec![],
                path: vec![],
                extensions: None,
            }],
            data: Some(serde_json::json!({"ok": true})),
            body: String::new(),
            message: "boom".to_string(),
        };
        assert_eq!(err.graphql_errors().len(), 1);
        assert_eq!(err.graphql_errors()[0].to_string(), "boom");
        assert_eq!(err.partial_data().unwrap()["ok"], true);
        assert_eq!(err.to_string(), "graphql error: boom");

        let other = Error::Config("bad".to_string());
        assert!(other.graphql_errors().is_empty());
        assert!(other.partial_data().is_none());
    }
}
