//! HTTP-level tests for the `/salaries` endpoints.
//!
//! These run against the in-memory salary store and need no database.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, build_offline_app, csv_file, csv_row, post_json, post_json_auth,
    post_multipart_auth, salary, user_token, InMemorySalaryStore,
};
use serde_json::json;

const UPLOAD: &str = "/api/v1/salaries";
const FILTER: &str = "/api/v1/salaries/filter";

// ---------------------------------------------------------------------------
// Upload
// ---------------------------------------------------------------------------

#[tokio::test]
async fn admin_upload_replaces_stored_salaries() {
    let store = Arc::new(InMemorySalaryStore::with_records(vec![salary(
        "900", "USD", "Junior", "1", "Old",
    )]));
    let app = build_offline_app(Arc::clone(&store));

    let file = csv_file(&[
        csv_row("1500 USD", "Middle", "3", "Belarus", "B2"),
        csv_row("2000 EUR", "Senior", "6", "Poland", "C1"),
    ]);
    let response =
        post_multipart_auth(app, UPLOAD, &[("file", "salaries.csv", file.as_slice())], &admin_token()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["totalRecords"], 2);
    assert_eq!(json["data"]["skippedRecords"], 0);
    assert_eq!(json["data"]["errors"], json!([]));

    let stored = store.stored();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].amount, "1500");
    assert_eq!(stored[0].currency, "USD");
    assert_eq!(stored[1].country, "Poland");
}

#[tokio::test]
async fn invalid_rows_are_reported_not_stored() {
    let store = Arc::new(InMemorySalaryStore::default());
    let app = build_offline_app(Arc::clone(&store));

    let file = csv_file(&[
        csv_row("1500 USD", "Middle", "3", "Belarus", "B2"),
        csv_row("1500", "Middle", "3", "Belarus", "B2"),
        csv_row("1500 USD", "", "3", "Belarus", "B2"),
    ]);
    let response =
        post_multipart_auth(app, UPLOAD, &[("file", "salaries.csv", file.as_slice())], &admin_token()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["totalRecords"], 3);
    assert_eq!(json["data"]["skippedRecords"], 2);
    assert_eq!(
        json["data"]["errors"],
        json!([
            "the amount field has more elements than expected",
            "Line 3 is not valid"
        ])
    );
    assert_eq!(store.stored().len(), 1);
}

#[tokio::test]
async fn upload_without_file_field_is_rejected() {
    let app = build_offline_app(Arc::new(InMemorySalaryStore::default()));

    let response = post_multipart_auth(
        app,
        UPLOAD,
        &[("attachment", "salaries.csv", b"irrelevant".as_slice())],
        &admin_token(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn structurally_broken_csv_is_a_bad_request() {
    let app = build_offline_app(Arc::new(InMemorySalaryStore::default()));

    // Data row narrower than the header.
    let file = b"a,b,c\n1,2\n".to_vec();
    let response =
        post_multipart_auth(app, UPLOAD, &[("file", "broken.csv", file.as_slice())], &admin_token()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_UPLOAD");
}

#[tokio::test]
async fn store_failure_is_an_internal_error() {
    let app = build_offline_app(Arc::new(InMemorySalaryStore::failing()));

    let file = csv_file(&[csv_row("1500 USD", "Middle", "3", "Belarus", "B2")]);
    let response =
        post_multipart_auth(app, UPLOAD, &[("file", "salaries.csv", file.as_slice())], &admin_token()).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INTERNAL_ERROR");
}

#[tokio::test]
async fn upload_requires_admin_role() {
    let store = Arc::new(InMemorySalaryStore::default());
    let file = csv_file(&[csv_row("1500 USD", "Middle", "3", "Belarus", "B2")]);

    let response = post_multipart_auth(
        build_offline_app(Arc::clone(&store)),
        UPLOAD,
        &[("file", "salaries.csv", file.as_slice())],
        &user_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_multipart_auth(
        build_offline_app(Arc::clone(&store)),
        UPLOAD,
        &[("file", "salaries.csv", file.as_slice())],
        "not-a-token",
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    assert!(store.stored().is_empty());
}

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

fn seeded_store() -> Arc<InMemorySalaryStore> {
    Arc::new(InMemorySalaryStore::with_records(vec![
        salary("1500", "USD", "Junior", "1", "Belarus"),
        salary("1500", "EUR", "Junior", "1", "Belarus"),
        salary("100000", "RUS", "Middle", "4", "Russia"),
        salary("1500", "GBP", "Junior", "1", "Belarus"),
    ]))
}

#[tokio::test]
async fn empty_condition_returns_all_convertible_salaries_in_usd() {
    let app = build_offline_app(seeded_store());

    let response = post_json_auth(app, FILTER, json!({}), &user_token()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json["data"],
        json!([
            { "amount": "1500", "seniority": "Junior", "years": "1", "country": "Belarus" },
            { "amount": "1699", "seniority": "Junior", "years": "1", "country": "Belarus" },
            { "amount": "1400", "seniority": "Middle", "years": "4", "country": "Russia" }
        ])
    );
}

#[tokio::test]
async fn condition_fields_narrow_the_result() {
    let app = build_offline_app(seeded_store());

    let response = post_json_auth(
        app,
        FILTER,
        json!({ "amount": "1500", "seniority": "Junior", "years": "1", "country": "Belarus" }),
        &user_token(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let amounts: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["amount"].as_str().unwrap())
        .collect();
    assert_eq!(amounts, vec!["1500", "1699"]);
}

#[tokio::test]
async fn legacy_field_names_are_accepted() {
    let app = build_offline_app(seeded_store());

    let response = post_json_auth(
        app,
        FILTER,
        json!({ "levelOfSeniority": "Middle", "yearsTotal": "4" }),
        &admin_token(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["country"], "Russia");
}

#[tokio::test]
async fn no_match_yields_empty_data() {
    let app = build_offline_app(seeded_store());

    let response =
        post_json_auth(app, FILTER, json!({ "country": "Atlantis" }), &user_token()).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], json!([]));
}

#[tokio::test]
async fn filter_requires_authentication() {
    let app = build_offline_app(seeded_store());

    let response = post_json(app, FILTER, json!({})).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}
