//! End-to-end HTTP tests for the users API over the in-memory repository.
//!
//! The app is assembled the same way the server assembles it: trace
//! middleware, JSON error handler and the `/api` scope.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use user_registry::Trace;
use user_registry::domain::TRACE_ID_HEADER;
use user_registry::domain::ports::FixtureUserRepository;
use user_registry::inbound::http::error::json_error_handler;
use user_registry::inbound::http::state::HttpState;
use user_registry::inbound::http::users::{add_user, list_users};

#[fixture]
fn state() -> HttpState {
    HttpState::from_repository(Arc::new(FixtureUserRepository::new()))
}

async fn init_app(
    state: HttpState,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .wrap(Trace)
            .service(web::scope("/api").service(list_users).service(add_user)),
    )
    .await
}

fn post_users(body: Value) -> actix_http::Request {
    actix_test::TestRequest::post()
        .uri("/api/users")
        .set_json(body)
        .to_request()
}

fn get_users() -> actix_http::Request {
    actix_test::TestRequest::get().uri("/api/users").to_request()
}

#[rstest]
#[actix_web::test]
async fn empty_store_lists_empty_array(state: HttpState) {
    let app = init_app(state).await;

    let response = actix_test::call_service(&app, get_users()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, json!([]));
}

#[rstest]
#[actix_web::test]
async fn created_user_appears_in_listing(state: HttpState) {
    let app = init_app(state).await;

    let response = actix_test::call_service(
        &app,
        post_users(json!({ "username": "alice", "email": "a@x.com" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = actix_test::read_body_json(response).await;
    assert_eq!(created["message"], "User added");
    let id = created["id"].as_i64().expect("integer id");

    let listed: Value = actix_test::call_and_read_body_json(&app, get_users()).await;
    let users = listed.as_array().expect("array body");
    assert_eq!(users.len(), 1);
    assert_eq!(
        users[0],
        json!({ "id": id, "username": "alice", "email": "a@x.com" })
    );
}

#[rstest]
#[actix_web::test]
async fn sequential_adds_get_increasing_ids(state: HttpState) {
    let app = init_app(state).await;

    let first: Value = actix_test::call_and_read_body_json(
        &app,
        post_users(json!({ "username": "alice", "email": "a@x.com" })),
    )
    .await;
    let second: Value = actix_test::call_and_read_body_json(
        &app,
        post_users(json!({ "username": "bob", "email": "b@x.com" })),
    )
    .await;

    let first_id = first["id"].as_i64().expect("first id");
    let second_id = second["id"].as_i64().expect("second id");
    assert!(second_id > first_id, "{second_id} should exceed {first_id}");

    let listed: Value = actix_test::call_and_read_body_json(&app, get_users()).await;
    let ids: Vec<i64> = listed
        .as_array()
        .expect("array body")
        .iter()
        .map(|user| user["id"].as_i64().expect("id"))
        .collect();
    assert_eq!(ids, vec![first_id, second_id]);
}

#[rstest]
#[actix_web::test]
async fn missing_email_is_rejected_without_insert(state: HttpState) {
    let app = init_app(state).await;

    let response = actix_test::call_service(&app, post_users(json!({ "username": "bob" }))).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["message"], "missing required field: email");
    assert_eq!(
        body["details"],
        json!({ "field": "email", "code": "missing_field" })
    );

    let listed: Value = actix_test::call_and_read_body_json(&app, get_users()).await;
    assert_eq!(listed, json!([]));
}

#[rstest]
#[actix_web::test]
async fn array_body_is_rejected_without_insert(state: HttpState) {
    let app = init_app(state).await;

    let response =
        actix_test::call_service(&app, post_users(json!(["alice", "a@x.com"]))).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["code"], "malformed_json");

    let listed: Value = actix_test::call_and_read_body_json(&app, get_users()).await;
    assert_eq!(listed, json!([]));
}

#[rstest]
#[case(json!({ "username": "alice", "email": "other@x.com" }), "username")]
#[case(json!({ "username": "other", "email": "a@x.com" }), "email")]
#[actix_web::test]
async fn duplicates_conflict_on_the_offending_field(
    state: HttpState,
    #[case] duplicate: Value,
    #[case] field: &str,
) {
    let app = init_app(state).await;
    let seeded = actix_test::call_service(
        &app,
        post_users(json!({ "username": "alice", "email": "a@x.com" })),
    )
    .await;
    assert_eq!(seeded.status(), StatusCode::CREATED);

    let response = actix_test::call_service(&app, post_users(duplicate)).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], "duplicate");
}

#[rstest]
#[actix_web::test]
async fn every_response_carries_a_trace_id(state: HttpState) {
    let app = init_app(state).await;

    let ok = actix_test::call_service(&app, get_users()).await;
    assert!(ok.headers().contains_key(TRACE_ID_HEADER));

    let rejected = actix_test::call_service(&app, post_users(json!({}))).await;
    let header = rejected
        .headers()
        .get(TRACE_ID_HEADER)
        .expect("trace id on error")
        .to_str()
        .expect("ascii header")
        .to_owned();
    let body: Value = actix_test::read_body_json(rejected).await;
    assert_eq!(body["traceId"], header.as_str());
}

#[rstest]
#[actix_web::test]
async fn smoke_test_user_round_trip(state: HttpState) {
    let app = init_app(state).await;

    let created: Value = actix_test::call_and_read_body_json(
        &app,
        post_users(json!({ "username": "smoke_tester", "email": "tester@example.com" })),
    )
    .await;
    assert_eq!(created["message"], "User added");

    let listed: Value = actix_test::call_and_read_body_json(&app, get_users()).await;
    let found = listed
        .as_array()
        .expect("array body")
        .iter()
        .any(|user| user["username"] == "smoke_tester" && user["id"] == created["id"]);
    assert!(found, "created user should be listed");
}
