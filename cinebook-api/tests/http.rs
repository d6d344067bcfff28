//! End-to-end checks of the HTTP surface against a real router.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use cinebook_api::{app, AppState};
use cinebook_core::BookingStore;
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_app() -> (Router, Arc<BookingStore>) {
    let store = Arc::new(BookingStore::new());
    let router = app(AppState {
        store: Arc::clone(&store),
    });
    (router, store)
}

async fn get(router: Router, uri: &str) -> (StatusCode, String) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, String) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn booking_round_trip() {
    let (router, store) = test_app();
    store
        .add_movies(["AKIRA".to_string()].into_iter().collect())
        .unwrap();
    store
        .add_theaters(["Rex".to_string()].into_iter().collect())
        .unwrap();
    store.add_theaters_to_movie(1, [1].into_iter().collect()).unwrap();

    let (status, body) = get(router.clone(), "/api/listmovies").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "1,AKIRA\r\n");

    let (status, body) = get(router.clone(), "/api/listtheaters_1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "1,Rex\r\n");

    let (status, body) = get(router.clone(), "/api/book_1_1_0_1_2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Booking OK\r\n");

    let (status, body) = get(router.clone(), "/api/listseats_1_1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "3,4,5,6,7,8,9,10,11,12,13,14,15,16,17,18,19\r\n");

    let (status, body) = get(router.clone(), "/api/book_1_1_2_3").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, "Seats not available\r\n");

    let (status, _) = get(router, "/api/book_1_1_25").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_commands_are_bad_requests() {
    let (router, _store) = test_app();

    let (status, body) = get(router.clone(), "/api/frobnicate").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Invalid request\r\n");

    let (status, _) = get(router.clone(), "/api/book_1_1_5_5").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(router, "/api/listtheaters_x").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn admin_builds_the_catalog() {
    let (router, _store) = test_app();

    let (status, body) = post_json(
        router.clone(),
        "/admin/movies",
        json!({"names": ["Stalker", "Solaris"]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let parsed: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed["ids"], json!([1, 2]));

    let (status, _) = post_json(
        router.clone(),
        "/admin/theaters",
        json!({"names": ["Odeon"]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = post_json(
        router.clone(),
        "/admin/movies/1/theaters",
        json!({"theater_ids": [1]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(router, "/api/listseats_1_1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "0,1,2,3,4,5,6,7,8,9,10,11,12,13,14,15,16,17,18,19\r\n");
}

#[tokio::test]
async fn admin_conflicts_and_missing_ids() {
    let (router, store) = test_app();
    store
        .add_movies(["Stalker".to_string()].into_iter().collect())
        .unwrap();
    store
        .add_theaters(["Odeon".to_string()].into_iter().collect())
        .unwrap();
    store.add_theaters_to_movie(1, [1].into_iter().collect()).unwrap();

    let (status, _) = post_json(
        router.clone(),
        "/admin/movies",
        json!({"names": ["Stalker"]}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = post_json(
        router.clone(),
        "/admin/movies/1/theaters",
        json!({"theater_ids": [1]}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = post_json(
        router.clone(),
        "/admin/movies/42/theaters",
        json!({"theater_ids": [1]}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = post_json(router.clone(), "/admin/clear", json!({})).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(router, "/api/listmovies").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "");
}
