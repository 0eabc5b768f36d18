use axum::http::StatusCode;
use serde_json::{Value, json};

mod common;
use common::{Fixtures, build_test_app, sample_fixtures};

fn filenames(items: &Value) -> Vec<String> {
    items
        .as_array()
        .expect("array of records")
        .iter()
        .map(|item| item["filename"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn home_returns_greeting() {
    let app = build_test_app(Fixtures::new());

    let response = app.server.get("/").await;
    response.assert_status_ok();
    assert!(response.text().contains("image API"));
}

#[tokio::test]
async fn list_all_with_global_limit_omits_later_categories() {
    let app = build_test_app(sample_fixtures());

    let response = app.server.get("/images").add_query_param("limit", 2).await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(
        body,
        json!({
            "components": [
                {
                    "url": "http://images.test/images/components/a.png",
                    "filename": "a.png",
                    "tags": ["joint"],
                    "category": "components"
                },
                {
                    "url": "http://images.test/images/components/b.jpg",
                    "filename": "b.jpg",
                    "tags": [],
                    "category": "components"
                }
            ]
        })
    );
}

#[tokio::test]
async fn list_all_accepts_repeated_and_comma_separated_tags() {
    let app = build_test_app(sample_fixtures());

    let response = app
        .server
        .get("/images")
        .add_query_params([("tag", "hypar"), ("tag", "JOINT,nothing")])
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(filenames(&body["components"]), ["a.png"]);
    assert_eq!(filenames(&body["precedents"]), ["c.webp"]);
}

#[tokio::test]
async fn list_all_category_filter_limits_buckets() {
    let app = build_test_app(sample_fixtures());

    let response = app
        .server
        .get("/images")
        .add_query_param("categories", "precedents,missing")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let object = body.as_object().expect("bucketed object");
    assert_eq!(object.keys().collect::<Vec<_>>(), ["precedents"]);
    assert_eq!(filenames(&body["precedents"]), ["c.webp", "d.gif"]);
}

#[tokio::test]
async fn invalid_limit_is_bad_request() {
    let app = build_test_app(sample_fixtures());

    let response = app.server.get("/images").add_query_param("limit", 0).await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["error"]["kind"], "invalid_argument");
    assert_eq!(body["error"]["message"], "limit must be >= 1");
    assert_eq!(body["error"]["status"], 400);
}

#[tokio::test]
async fn missing_tag_store_reports_empty_tags() {
    let app = build_test_app(
        Fixtures::new().files("components", &["a.png", "b.jpg"]),
    );

    let response = app.server.get("/images/components").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(filenames(&body), ["a.png", "b.jpg"]);
    for item in body.as_array().unwrap() {
        assert_eq!(item["tags"], json!([]));
    }
}

#[tokio::test]
async fn single_category_applies_tag_filter_and_local_limit() {
    let app = build_test_app(sample_fixtures());

    let response = app
        .server
        .get("/images/precedents")
        .add_query_param("tag", "SCISSOR,kinetic")
        .add_query_param("limit", 1)
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(filenames(&body), ["c.webp"]);
    assert_eq!(body[0]["category"], "precedents");
    assert_eq!(body[0]["tags"], json!(["Hypar", "kinetic"]));
}

#[tokio::test]
async fn unknown_or_empty_category_is_not_found() {
    let app = build_test_app(sample_fixtures().files("widgets", &["readme.txt"]));

    for path in ["/images/widgets", "/images/nonexistent"] {
        let response = app.server.get(path).await;
        response.assert_status(StatusCode::NOT_FOUND);

        let body: Value = response.json();
        assert_eq!(body["error"]["kind"], "not_found");
        assert_eq!(body["error"]["message"], "Category not found or empty");
    }
}

#[tokio::test]
async fn search_requires_tag() {
    let app = build_test_app(sample_fixtures());

    let response = app.server.get("/images-search").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "tag query parameter is required");
}

#[tokio::test]
async fn search_spans_categories_with_global_limit() {
    let app = build_test_app(sample_fixtures());

    let response = app
        .server
        .get("/images-search")
        .add_query_param("tag", "joint,hypar")
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(filenames(&body), ["a.png", "c.webp"]);

    let response = app
        .server
        .get("/images-search")
        .add_query_param("tag", "joint,hypar")
        .add_query_param("limit", 1)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(filenames(&body), ["a.png"]);
}

#[tokio::test]
async fn image_bytes_are_served_for_catalogued_files() {
    let app = build_test_app(sample_fixtures());

    let response = app.server.get("/images/components/a.png").await;
    response.assert_status_ok();
    assert_eq!(&response.as_bytes()[..], b"bytes of a.png");

    let response = app.server.get("/images/components/notes.txt").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = app.server.get("/images/components/missing.png").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn urls_follow_request_without_public_base() {
    let app = build_test_app(
        Fixtures::new()
            .without_public_base()
            .files("components", &["a.png"]),
    );

    let response = app.server.get("/images/components").await;
    response.assert_status_ok();

    let body: Value = response.json();
    let url = body[0]["url"].as_str().expect("url string");
    assert!(url.starts_with("http"));
    assert!(url.ends_with("/images/components/a.png"));
}

#[tokio::test]
async fn unknown_route_is_json_not_found() {
    let app = build_test_app(Fixtures::new());

    let response = app.server.get("/nope/deeper/still").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["error"]["kind"], "not_found");
}
