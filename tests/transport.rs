use async_trait::async_trait;
use gql_shape::{
    FieldShape, GraphQl, GraphQlResponse, ObjectShape, Operation, Result, Shaped, Variables,
};
use serde::Deserialize;
use std::sync::Mutex;

/// records every request and answers with a canned payload
struct Recorder {
    data: serde_json::Value,
    sent: Mutex<Vec<(String, serde_json::Value)>>,
}

impl Recorder {
    fn new(data: serde_json::Value) -> Self {
        Self {
            data,
            sent: Mutex::new(Vec::new()),
        }
    }

    fn documents(&self) -> Vec<String> {
        let sent = self.sent.lock().unwrap();
        sent.iter().map(|(document, _)| document.clone()).collect()
    }
}

#[async_trait]
impl GraphQl for Recorder {
    async fn execute_raw(
        &self,
        document: &str,
        variables: &Variables,
    ) -> Result<GraphQlResponse<serde_json::Value>> {
        self.sent
            .lock()
            .unwrap()
            .push((document.to_string(), variables.to_json()));
        Ok(GraphQlResponse {
            data: Some(self.data.clone()),
            errors: Vec::new(),
            extensions: serde_json::Map::new(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct Viewer {
    login: String,
    #[serde(rename = "followerCount")]
    follower_count: u32,
}

impl Shaped for Viewer {
    fn shape() -> FieldShape {
        FieldShape::object("Viewer", || {
            ObjectShape::new("Viewer")
                .field_of::<String>("Login")
                .field_of::<u32>("FollowerCount")
        })
    }
}

#[derive(Debug, Deserialize)]
struct Deleted {
    ok: bool,
}

impl Shaped for Deleted {
    fn shape() -> FieldShape {
        FieldShape::object("Deleted", || ObjectShape::new("Deleted").field_of::<bool>("Ok"))
    }
}

async fn login(api: &impl GraphQl) -> Result<String> {
    let response = api.query::<Viewer>(Variables::new()).await?;
    Ok(response.into_data().map(|viewer| viewer.login).unwrap_or_default())
}

#[tokio::test]
async fn query_sends_synthesized_document() {
    let recorder = Recorder::new(serde_json::json!({"login": "octocat", "followerCount": 9}));
    let response = recorder.query::<Viewer>(Variables::new()).await.unwrap();

    let viewer = response.into_data().unwrap();
    assert_eq!(viewer.login, "octocat");
    assert_eq!(viewer.follower_count, 9);
    assert_eq!(recorder.documents(), vec!["{login,followerCount}"]);
}

#[tokio::test]
async fn mutate_sends_header_and_variables() {
    let recorder = Recorder::new(serde_json::json!({"ok": true}));
    let variables = Variables::new().with("id", "abc".to_string()).unwrap();
    let response = recorder.mutate::<Deleted>(variables).await.unwrap();

    assert!(response.into_data().unwrap().ok);
    let sent = recorder.sent.lock().unwrap();
    assert_eq!(sent[0].0, "mutation($id:ID!){ok}");
    assert_eq!(sent[0].1, serde_json::json!({"id": "abc"}));
}

#[tokio::test]
async fn run_and_execute_share_the_raw_path() {
    let recorder = Recorder::new(serde_json::json!({"ok": false}));
    let operation = Operation::mutation_for::<Deleted>(Variables::new());
    let ran: GraphQlResponse<Deleted> = recorder.run(&operation).await.unwrap();
    let executed: GraphQlResponse<Deleted> =
        recorder.execute("{ok}", &Variables::new()).await.unwrap();

    assert!(!ran.into_data().unwrap().ok);
    assert!(!executed.into_data().unwrap().ok);
    assert_eq!(recorder.documents(), vec!["mutation{ok}", "{ok}"]);
}

#[tokio::test]
async fn typed_decode_failure_is_reported() {
    let recorder = Recorder::new(serde_json::json!({"login": 1, "followerCount": 2}));
    let err = recorder.query::<Viewer>(Variables::new()).await.unwrap_err();
    assert!(matches!(err, gql_shape::Error::Json(_)));
}

#[tokio::test]
async fn generic_callers_accept_any_implementation() {
    let recorder = Recorder::new(serde_json::json!({"login": "hubot", "followerCount": 0}));
    assert_eq!(login(&recorder).await.unwrap(), "hubot");
}

#[tokio::test]
async fn raw_execution_works_through_a_trait_object() {
    let api: Box<dyn GraphQl> = Box::new(Recorder::new(serde_json::json!({"ok": true})));
    let response = api.execute_raw("{ok}", &Variables::new()).await.unwrap();
    assert_eq!(response.data.unwrap()["ok"], true);
}
