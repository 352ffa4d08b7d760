use gql_shape::{Client, ClientConfig, Variables};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let endpoint =
        env::var("GRAPHQL_URL").unwrap_or_else(|_| "http://localhost:8000/graphql".to_string());

    let mut config = ClientConfig::new(endpoint);
    if let Ok(token) = env::var("GRAPHQL_TOKEN") {
        config = config.with_bearer_token(token);
    }
    let client = Client::new(config)?;

    let response = client
        .execute_raw("{__schema{queryType{name}}}", &Variables::new())
        .await?;

    println!("data: {}", response.data.unwrap_or_default());

    Ok(())
}
