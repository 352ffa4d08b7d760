//! main client
//!
//! posts documents to the configured endpoint and decodes the response
//! envelope. documents are either raw strings or built from a [`Shaped`]
//! type.

use crate::arguments::Variables;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::graphql::GraphQlResponse;
use crate::operation::{Operation, OperationKind};
use crate::shape::Shaped;
use crate::transport::GraphQl;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::Arc;
use url::Url;

/// graphql client
#[derive(Clone)]
pub struct Client {
    config: Arc<ClientConfig>,
    http: reqwest::Client,
}

impl Client {
    /// create a new client
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let http = match &config.http_client {
            Some(http) => http.clone(),
            None => {
                let mut headers = HeaderMap::new();
                if let Some(token) = &config.token {
                    headers.insert(
                        AUTHORIZATION,
                        HeaderValue::from_str(&format!("Bearer {token}")).map_err(|err| {
                            Error::Config(format!("invalid bearer token header value: {err}"))
                        })?,
                    );
                }
                headers.extend(config.extra_headers.clone());

                let mut builder = reqwest::Client::builder()
                    .default_headers(headers)
                    .user_agent(config.user_agent.clone())
                    .timeout(config.timeout)
                    .danger_accept_invalid_certs(!config.verify_ssl);
                if let Some(customize) = &config.http_client_builder {
                    builder = customize(builder);
                }
                builder.build()?
            }
        };

        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }

    /// access the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// execute a raw document and return the untyped response
    pub async fn execute_raw(
        &self,
        document: &str,
        variables: &Variables,
    ) -> Result<GraphQlResponse<serde_json::Value>> {
        self.execute(document, variables).await
    }

    /// execute a raw document and deserialize into a typed response
    pub async fn execute<T: DeserializeOwned>(
        &self,
        document: &str,
        variables: &Variables,
    ) -> Result<GraphQlResponse<T>> {
        self.execute_with(document, variables, None, |url, body| self.post(url, body))
            .await
    }

    /// query the fields described by `T` and decode the response into it
    pub async fn query<T: Shaped + DeserializeOwned>(
        &self,
        variables: Variables,
    ) -> Result<GraphQlResponse<T>> {
        self.run(&Operation::query_for::<T>(variables)).await
    }

    /// run the mutation described by `T` and decode the response into it
    pub async fn mutate<T: Shaped + DeserializeOwned>(
        &self,
        variables: Variables,
    ) -> Result<GraphQlResponse<T>> {
        self.run(&Operation::mutation_for::<T>(variables)).await
    }

    /// execute a prebuilt operation
    pub async fn run<T: DeserializeOwned>(
        &self,
        operation: &Operation,
    ) -> Result<GraphQlResponse<T>> {
        let document = operation.document();
        self.execute_with(
            &document,
            operation.variables(),
            Some(operation.kind()),
            |url, body| self.post(url, body),
        )
        .await
    }

    async fn post(&self, url: Url, body: serde_json::Value) -> Result<(StatusCode, String)> {
        let response = self.http.post(url).json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;
        Ok((status, text))
    }
}

#[async_trait::async_trait]
impl GraphQl for Client {
    async fn execute_raw(
        &self,
        document: &str,
        variables: &Variables,
    ) -> Result<GraphQlResponse<serde_json::Value>> {
        Client::execute_raw(self, document, variables).await
    }

    async fn execute<T>(&self, document: &str, variables: &Variables) -> Result<GraphQlResponse<T>>
    where
        T: DeserializeOwned + Send,
    {
        Client::execute(self, document, variables).await
    }

    async fn run<T>(&self, operation: &Operation) -> Result<GraphQlResponse<T>>
    where
        T: DeserializeOwned + Send,
    {
        Client::run(self, operation).await
    }
}

fn parse_graphql_response<T: DeserializeOwned>(
    status: StatusCode,
    text: String,
) -> Result<GraphQlResponse<T>> {
    let parsed: GraphQlResponse<serde_json::Value> = match serde_json::from_str(&text) {
        Ok(parsed) => parsed,
        Err(err) if status.is_success() => return Err(err.into()),
        Err(_) => {
            tracing::warn!(status = status.as_u16(), "graphql http error");
            return Err(Error::GraphQl {
                status: Some(status.as_u16()),
                errors: Vec::new(),
                data: None,
                body: text,
                message: format!("graphql http error: {}", status),
            });
        }
    };

    if !parsed.errors.is_empty() {
        let message = parsed
            .errors
            .first()
            .map(|err| err.message.clone())
            .unwrap_or_else(|| "graphql error".to_string());
        tracing::warn!(
            status = status.as_u16(),
            count = parsed.errors.len(),
            %message,
            "graphql response contains errors"
        );
        return Err(Error::GraphQl {
            status: Some(status.as_u16()),
            errors: parsed.errors,
            data: parsed.data,
            body: text,
            message,
        });
    }

    if !status.is_success() {
        tracing::warn!(status = status.as_u16(), "graphql http error");
        return Err(Error::GraphQl {
            status: Some(status.as_u16()),
            errors: Vec::new(),
            data: parsed.data,
            body: text,
            message: format!("graphql http error: {}", status),
        });
    }

    let data = parsed.data.map(serde_json::from_value).transpose()?;
    Ok(GraphQlResponse {
        data,
        errors: Vec::new(),
        extensions: parsed.extensions,
    })
}

impl Client {
    pub(crate) async fn execute_with<T: DeserializeOwned, F, Fut>(
        &self,
        document: &str,
        variables: &Variables,
        kind: Option<OperationKind>,
        send: F,
    ) -> Result<GraphQlResponse<T>>
    where
        F: FnOnce(Url, serde_json::Value) -> Fut,
        Fut: Future<Output = Result<(StatusCode, String)>>,
    {
        let url = self.config.endpoint.clone();
        let body = serde_json::json!({
            "query": document,
            "variables": variables.to_json(),
        });

        tracing::debug!(
            endpoint = %url,
            operation = kind.map(OperationKind::keyword),
            document_len = document.len(),
            variables = variables.len(),
            "sending graphql request"
        );
        let (status, text) = send(url, body).await?;
        parse_graphql_response(status, text)
    }
}
