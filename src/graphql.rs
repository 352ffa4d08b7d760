//! graphql types
//!
//! wrappers for graphql responses and errors.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// graphql response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQlResponse<T> {
    /// response data or null if errors
    pub data: Option<T>,
    /// graphql errors array
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphQlError>,
    /// server extensions (tracing, cost, ...)
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub extensions: serde_json::Map<String, serde_json::Value>,
}

impl<T> GraphQlResponse<T> {
    /// true if the response contains graphql errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// take the data payload
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

impl GraphQlResponse<serde_json::Value> {
    /// decode the untyped payload into `T`
    pub fn decode<T: DeserializeOwned>(self) -> Result<GraphQlResponse<T>> {
        let data = self.data.map(serde_json::from_value).transpose()?;
        Ok(GraphQlResponse {
            data,
            errors: self.errors,
            extensions: self.extensions,
        })
    }
}

/// graphql error entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQlError {
    /// error message
    pub message: String,
    /// error locations in the query
    #[serde(default)]
    pub locations: Vec<GraphQlLocation>,
    /// response path
    #[serde(default)]
    pub path: Vec<serde_json::Value>,
    /// optional extensions payload
    #[serde(default)]
    pub extensions: Option<serde_json::Value>,
}

/// graphql error location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphQlLocation {
    /// line number (1-based)
    pub line: i64,
    /// column number (1-based)
    pub column: i64,
}
