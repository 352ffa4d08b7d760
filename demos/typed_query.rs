use gql_shape::{Client, ClientConfig, FieldShape, ObjectShape, Operation, Shaped, Variables};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Data {
    viewer: Viewer,
}

impl Shaped for Data {
    fn shape() -> FieldShape {
        FieldShape::object("Query", || ObjectShape::new("Query").field_of::<Viewer>("Viewer"))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
struct Viewer {
    login: String,
    created_at: String,
    repositories: Connection,
}

impl Shaped for Viewer {
    fn shape() -> FieldShape {
        FieldShape::object("User", || {
            ObjectShape::new("User")
                .field_of::<String>("Login")
                .field_of::<String>("CreatedAt")
                .member(
                    gql_shape::Member::new("Repositories", Connection::shape())
                        .rename("repositories(first:$first)"),
                )
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
struct Connection {
    total_count: i64,
}

impl Shaped for Connection {
    fn shape() -> FieldShape {
        FieldShape::object("RepositoryConnection", || {
            ObjectShape::new("RepositoryConnection").field_of::<i64>("TotalCount")
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let endpoint =
        env::var("GRAPHQL_URL").unwrap_or_else(|_| "https://api.github.com/graphql".to_string());
    let token = env::var("GRAPHQL_TOKEN").expect("GRAPHQL_TOKEN is required");

    let client = Client::new(ClientConfig::new(endpoint).with_bearer_token(token))?;

    let variables = Variables::new().with("first", 5)?;
    let operation = Operation::query_for::<Data>(variables);
    println!("document: {}", operation.document());

    let response = client.run::<Data>(&operation).await?;
    println!("response: {response:?}");
    Ok(())
}
