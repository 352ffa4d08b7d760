//! transport trait
//!
//! [`GraphQl`] is the seam between document synthesis and the wire. an
//! implementation only posts a document and returns the untyped envelope;
//! typed decoding and shape-driven queries are provided on top of it, so a
//! test double needs a single method.

use crate::arguments::Variables;
use crate::error::Result;
use crate::graphql::GraphQlResponse;
use crate::operation::Operation;
use crate::shape::Shaped;
use serde::de::DeserializeOwned;

/// something that can execute graphql documents
#[async_trait::async_trait]
pub trait GraphQl: Send + Sync {
    /// execute a raw document and return the untyped response.
    ///
    /// a response carrying server errors is reported as
    /// [`Error::GraphQl`](crate::Error::GraphQl).
    async fn execute_raw(
        &self,
        document: &str,
        variables: &Variables,
    ) -> Result<GraphQlResponse<serde_json::Value>>;

    /// execute a raw document and deserialize into a typed response
    async fn execute<T>(&self, document: &str, variables: &Variables) -> Result<GraphQlResponse<T>>
    where
        Self: Sized,
        T: DeserializeOwned + Send,
    {
        self.execute_raw(document, variables).await?.decode()
    }

    /// execute a prebuilt operation
    async fn run<T>(&self, operation: &Operation) -> Result<GraphQlResponse<T>>
    where
        Self: Sized,
        T: DeserializeOwned + Send,
    {
        let document = operation.document();
        self.execute(&document, operation.variables()).await
    }

    /// query the fields described by `T` and decode the response into it
    async fn query<T>(&self, variables: Variables) -> Result<GraphQlResponse<T>>
    where
        Self: Sized,
        T: Shaped + DeserializeOwned + Send,
    {
        self.run(&Operation::query_for::<T>(variables)).await
    }

    /// run the mutation described by `T` and decode the response into it
    async fn mutate<T>(&self, variables: Variables) -> Result<GraphQlResponse<T>>
    where
        Self: Sized,
        T: Shaped + DeserializeOwned + Send,
    {
        self.run(&Operation::mutation_for::<T>(variables)).await
    }
}
