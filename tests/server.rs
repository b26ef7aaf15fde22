mod support;

use reviewdash::{routes, ApiClient, ApiStore, AppState};
use serde_json::{json, Value};

use support::Upstream;

/// Starts the state server in front of `upstream`, returns its base URL.
async fn start(upstream: &Upstream) -> String {
    let store = ApiStore::new(ApiClient::new(upstream.start().await));
    support::serve(routes::router().with_state(AppState { store })).await
}

async fn get(url: String) -> (u16, Value) {
    let response = reqwest::get(url).await.unwrap();
    let status = response.status().as_u16();
    (status, response.json().await.unwrap_or(Value::Null))
}

async fn post(url: String) -> (u16, Value) {
    let response = reqwest::Client::new().post(url).send().await.unwrap();
    let status = response.status().as_u16();
    (status, response.json().await.unwrap_or(Value::Null))
}

#[tokio::test]
async fn lists_every_resource_as_idle() {
    let server = start(&Upstream::new()).await;

    let (status, body) = get(format!("{server}/resources")).await;
    assert_eq!(status, 200);

    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 20);
    assert_eq!(entries[0]["resource"], "info");
    assert_eq!(entries[0]["path"], "/");
    assert!(entries.iter().all(|e| e["status"] == "idle"));
    assert_eq!(entries[4]["record"], json!({"data": null, "loading": false, "error": null}));
}

#[tokio::test]
async fn refresh_returns_the_settled_record() {
    let upstream = Upstream::new();
    upstream.json("/games/worst-rated", json!([{"asin": "W1", "avg_rating": 1.2}]));
    let server = start(&upstream).await;

    let (status, body) = post(format!("{server}/resources/games-worst-rated/refresh")).await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "succeeded");
    assert_eq!(body["record"]["data"][0]["asin"], "W1");

    let (_, body) = get(format!("{server}/resources/games-worst-rated")).await;
    assert_eq!(body["record"]["loading"], false);
}

#[tokio::test]
async fn failed_refresh_is_still_a_successful_response() {
    let upstream = Upstream::new();
    upstream.status("/statistics/verified", 500);
    let server = start(&upstream).await;

    let (status, body) = post(format!("{server}/resources/statistics-verified/refresh")).await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "failed");
    assert_eq!(body["record"]["error"], "Error 500");
}

#[tokio::test]
async fn unknown_names_are_not_found() {
    let server = start(&Upstream::new()).await;

    assert_eq!(get(format!("{server}/resources/nope")).await.0, 404);
    assert_eq!(post(format!("{server}/pages/nope/refresh")).await.0, 404);
    assert_eq!(get(format!("{server}/products/best-sellers")).await.0, 404);
    assert_eq!(get(format!("{server}/product-details/X1")).await.0, 404);
}

#[tokio::test]
async fn limit_is_validated_and_forwarded() {
    let upstream = Upstream::new();
    upstream.json("/products/top-rated-names", json!({"products": []}));
    let server = start(&upstream).await;

    let (status, _) = post(format!(
        "{server}/resources/products-top-rated-names/refresh?limit=0"
    ))
    .await;
    assert_eq!(status, 400);

    let (status, body) = post(format!(
        "{server}/resources/products-top-rated-names/refresh?limit=20"
    ))
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["record"]["data"], json!([]));
    assert_eq!(upstream.requests(), vec!["/products/top-rated-names?limit=20"]);
}

#[tokio::test]
async fn games_page_feeds_the_ranking_view() {
    let upstream = Upstream::new();
    upstream.json(
        "/games/top-rated",
        json!([{"asin": "X1", "avg_rating": 4.8}, {"asin": "X2", "rating": 4.1}]),
    );
    upstream.json(
        "/products/top-rated-names",
        json!({"products": [{"asin": "X2", "product_name": "Gadget"}]}),
    );
    let server = start(&upstream).await;

    let (_, before) = get(format!("{server}/products/top-rated")).await;
    assert_eq!(before["products"], Value::Null);

    let (status, records) = post(format!("{server}/pages/games/refresh")).await;
    assert_eq!(status, 200);
    assert_eq!(records.as_array().unwrap().len(), 5);

    let (status, view) = get(format!("{server}/products/top-rated")).await;
    assert_eq!(status, 200);
    assert_eq!(view["loading"], false);
    assert_eq!(view["error"], Value::Null);
    assert_eq!(view["products"][0]["product_name"], "X1");
    assert_eq!(view["products"][0]["avg_rating"], 4.8);
    assert_eq!(view["products"][1]["product_name"], "Gadget");
    assert_eq!(view["products"][1]["rating"], 4.1);
}

#[tokio::test]
async fn product_detail_refresh_populates_the_lookup() {
    let upstream = Upstream::new();
    upstream.json("/products/B01", json!({"title": "Console", "asin": "B01", "price": "$299"}));
    let server = start(&upstream).await;

    let (status, body) = post(format!("{server}/product-details/B01/refresh")).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["title"], "Console");
    assert_eq!(body["loading"], false);

    let (status, body) = get(format!("{server}/product-details/B01")).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["price"], "$299");
}

#[tokio::test]
async fn rows_are_normalized_for_tables() {
    let upstream = Upstream::new();
    upstream.json("/temporal/day-of-week", json!([{"day_of_week": 2, "review_count": 40}]));
    upstream.json("/statistics/global", json!({"total_reviews": 1200}));
    let server = start(&upstream).await;

    post(format!("{server}/pages/temporal/refresh")).await;
    post(format!("{server}/resources/statistics-global/refresh")).await;

    let (status, rows) = get(format!("{server}/resources/temporal-day-of-week/rows")).await;
    assert_eq!(status, 200);
    assert_eq!(rows, json!([{"period": "Tue", "count": 40}]));

    let (_, raw) = get(format!("{server}/resources/statistics-global/rows")).await;
    assert_eq!(raw, json!({"total_reviews": 1200}));

    let (_, empty) = get(format!("{server}/resources/temporal-monthly/rows")).await;
    assert_eq!(empty, json!([]));
}
