use std::path::PathBuf;
use std::sync::Arc;
use backend::{
    assets::extract_static_assets,
    build_rocket,
    storage::{Backend, FileBackend, MemoryBackend, PostgresBackend},
    store::RosterStore,
    ChoicePolicy,
};
use rocket::http::{ContentType, Status};
use rocket::local::asynchronous::Client;
use serde_json::{json, Value};
use uuid::Uuid;

async fn client_with(backend: Arc<dyn Backend>, policy: ChoicePolicy, reset_enabled: bool) -> Client {
    let store = RosterStore::open(backend, policy).await;
    let static_dir = extract_static_assets().expect("static assets");
    let rocket = build_rocket(rocket::Config::figment(), store, static_dir, reset_enabled);
    Client::tracked(rocket).await.expect("valid rocket instance")
}

async fn client(policy: ChoicePolicy) -> Client {
    client_with(Arc::new(MemoryBackend), policy, true).await
}

async fn submit(client: &Client, body: Value) -> (Status, Value) {
    let response = client
        .post("/api/submit")
        .header(ContentType::JSON)
        .body(body.to_string())
        .dispatch()
        .await;
    let status = response.status();
    (status, response.into_json().await.unwrap_or(Value::Null))
}

async fn data(client: &Client) -> (Status, Value) {
    let response = client.get("/api/data").dispatch().await;
    let status = response.status();
    (status, response.into_json().await.unwrap_or(Value::Null))
}

fn scratch_file() -> PathBuf {
    std::env::temp_dir()
        .join(format!("roster_api_test_{}", Uuid::new_v4()))
        .join("data.json")
}

#[rocket::async_test]
async fn submit_then_list() {
    let client = client(ChoicePolicy::ExactlyThree).await;

    let (status, body) = submit(&client, json!({ "name": "Alice", "choices": ["A", "B", "C"] })).await;
    assert_eq!(status, Status::Ok);
    assert_eq!(body, json!({
        "success": true,
        "users": [{ "name": "Alice", "choices": ["A", "B", "C"] }]
    }));

    submit(&client, json!({ "id": 99, "name": "Bob", "choices": ["C", "A", "B"] })).await;

    let (status, users) = data(&client).await;
    assert_eq!(status, Status::Ok);
    assert_eq!(users, json!([
        { "name": "Alice", "choices": ["A", "B", "C"] },
        { "name": "Bob", "choices": ["C", "A", "B"] }
    ]));
}

#[rocket::async_test]
async fn resubmit_replaces_without_moving() {
    let client = client(ChoicePolicy::AtLeastOne).await;
    submit(&client, json!({ "name": "Alice", "choices": ["A", "B", "C"] })).await;
    submit(&client, json!({ "name": "Bob", "choices": ["B"] })).await;

    let (status, body) = submit(&client, json!({ "name": "Alice", "choices": ["X"] })).await;
    assert_eq!(status, Status::Ok);
    assert_eq!(body["users"], json!([
        { "name": "Alice", "choices": ["X"] },
        { "name": "Bob", "choices": ["B"] }
    ]));
}

#[rocket::async_test]
async fn invalid_submissions_are_rejected() {
    let client = client(ChoicePolicy::ExactlyThree).await;
    submit(&client, json!({ "name": "Alice", "choices": ["A", "B", "C"] })).await;

    let rejected = [
        json!({ "name": "", "choices": ["A", "B", "C"] }),
        json!({ "choices": ["A", "B", "C"] }),
        json!({ "name": "Alice", "choices": ["X"] }),
        json!({ "name": "Alice", "choices": ["A", "B", "C", "D"] }),
        json!({ "name": "Alice" }),
        json!({ "name": "Alice", "choices": "ABC" }),
        json!({ "name": 7, "choices": ["A", "B", "C"] }),
        json!(["Alice", "A", "B", "C"]),
    ];

    for body in rejected {
        let (status, error) = submit(&client, body.clone()).await;
        assert_eq!(status, Status::BadRequest, "accepted {body}");
        assert_eq!(error, json!({ "error": "Invalid data" }));
    }

    let (_, users) = data(&client).await;
    assert_eq!(users, json!([{ "name": "Alice", "choices": ["A", "B", "C"] }]));
}

#[rocket::async_test]
async fn malformed_json_is_invalid_data() {
    let client = client(ChoicePolicy::ExactlyThree).await;
    let response = client
        .post("/api/submit")
        .header(ContentType::JSON)
        .body("{ name: Alice")
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::BadRequest);
    assert_eq!(response.into_json::<Value>().await, Some(json!({ "error": "Invalid data" })));
}

#[rocket::async_test]
async fn single_choice_policy() {
    let client = client(ChoicePolicy::AtLeastOne).await;

    let (status, _) = submit(&client, json!({ "name": "Alice", "choices": ["X"] })).await;
    assert_eq!(status, Status::Ok);

    let (status, _) = submit(&client, json!({ "name": "Bob", "choices": [] })).await;
    assert_eq!(status, Status::BadRequest);

    let (_, users) = data(&client).await;
    assert_eq!(users.as_array().map(Vec::len), Some(1));
}

#[rocket::async_test]
async fn reset_clears_everything() {
    let client = client(ChoicePolicy::ExactlyThree).await;
    submit(&client, json!({ "name": "Alice", "choices": ["A", "B", "C"] })).await;

    let response = client.post("/api/reset").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.into_json::<Value>().await, Some(json!({ "success": true })));

    let (_, users) = data(&client).await;
    assert_eq!(users, json!([]));
}

#[rocket::async_test]
async fn reset_route_can_be_disabled() {
    let client = client_with(Arc::new(MemoryBackend), ChoicePolicy::ExactlyThree, false).await;
    submit(&client, json!({ "name": "Alice", "choices": ["A", "B", "C"] })).await;

    let response = client.post("/api/reset").dispatch().await;
    assert_eq!(response.status(), Status::NotFound);

    let (_, users) = data(&client).await;
    assert_eq!(users.as_array().map(Vec::len), Some(1));
}

#[rocket::async_test]
async fn file_backend_survives_restart() {
    let path = scratch_file();

    {
        let client = client_with(Arc::new(FileBackend::new(&path)), ChoicePolicy::ExactlyThree, true).await;
        submit(&client, json!({ "name": "Alice", "choices": ["A", "B", "C"] })).await;
        submit(&client, json!({ "name": "Bob", "choices": ["B", "C", "A"] })).await;
    }

    let on_disk: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk.as_array().map(Vec::len), Some(2));

    let client = client_with(Arc::new(FileBackend::new(&path)), ChoicePolicy::ExactlyThree, true).await;
    let (_, users) = data(&client).await;
    assert_eq!(users, json!([
        { "name": "Alice", "choices": ["A", "B", "C"] },
        { "name": "Bob", "choices": ["B", "C", "A"] }
    ]));
}

#[rocket::async_test]
async fn corrupt_file_starts_empty() {
    let path = scratch_file();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "not json at all").unwrap();

    let client = client_with(Arc::new(FileBackend::new(&path)), ChoicePolicy::ExactlyThree, true).await;
    let (status, users) = data(&client).await;
    assert_eq!(status, Status::Ok);
    assert_eq!(users, json!([]));

    let (status, _) = submit(&client, json!({ "name": "Alice", "choices": ["A", "B", "C"] })).await;
    assert_eq!(status, Status::Ok);
}

#[rocket::async_test]
async fn unconfigured_database_reports_errors() {
    let client = client_with(Arc::new(PostgresBackend::unconfigured()), ChoicePolicy::ExactlyThree, true).await;

    let (status, body) = data(&client).await;
    assert_eq!(status, Status::InternalServerError);
    assert_eq!(body, json!({ "error": "Failed to fetch data" }));

    let (status, body) = submit(&client, json!({ "name": "Alice", "choices": ["A", "B", "C"] })).await;
    assert_eq!(status, Status::InternalServerError);
    assert_eq!(body, json!({ "error": "Failed to save" }));

    let (status, body) = submit(&client, json!({ "name": "", "choices": ["A", "B", "C"] })).await;
    assert_eq!(status, Status::BadRequest);
    assert_eq!(body, json!({ "error": "Invalid data" }));

    let response = client.post("/api/reset").dispatch().await;
    assert_eq!(response.status(), Status::InternalServerError);

    // the front page never touches the database
    let response = client.get("/").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
}

#[rocket::async_test]
async fn serves_front_page_with_cors() {
    let client = client(ChoicePolicy::ExactlyThree).await;

    let response = client.get("/").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.content_type(), Some(ContentType::HTML));
    assert_eq!(response.headers().get_one("Access-Control-Allow-Origin"), Some("*"));
    assert!(response.into_string().await.unwrap().contains("/api/submit"));

    let response = client.get("/index.html").dispatch().await;
    assert_eq!(response.status(), Status::Ok);

    let response = client.get("/missing.css").dispatch().await;
    assert_eq!(response.status(), Status::NotFound);

    let response = client.options("/api/submit").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.headers().get_one("Access-Control-Allow-Origin"), Some("*"));
    assert_eq!(response.headers().get_one("Access-Control-Allow-Methods"), Some("GET, POST, OPTIONS"));
}
