use gql_shape::{Client, ClientConfig, Variables};

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn smoke_typename() {
    let endpoint = match std::env::var("GRAPHQL_URL") {
        Ok(endpoint) => endpoint,
        Err(_) => return,
    };
    let mut config = ClientConfig::new(endpoint);
    if let Ok(token) = std::env::var("GRAPHQL_TOKEN") {
        config = config.with_bearer_token(token);
    }

    let client = Client::new(config).expect("client");
    let response = client
        .execute_raw("{__typename}", &Variables::new())
        .await
        .expect("graphql query");

    assert!(response.data.is_some());
}
