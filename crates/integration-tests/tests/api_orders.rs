//! Order placement and tracking endpoints.

use axum::http::StatusCode;
use quickbite_core::Price;
use quickbite_integration_tests::{TICK, TestApp, price};
use serde_json::json;

#[tokio::test]
async fn test_empty_cart_cannot_be_ordered() {
    let app = TestApp::new();
    let (status, body) = app.post_empty("/orders").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("cart"));
}

#[tokio::test]
async fn test_place_order_clears_cart() {
    let app = TestApp::new();
    app.post("/cart/add", json!({ "item_id": 4, "quantity": 2 }))
        .await;

    let (status, order) = app.post_empty("/orders").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(price(&order["subtotal"]), Price::from_cents(2598));
    assert_eq!(price(&order["deliveryFee"]), Price::from_cents(299));
    assert_eq!(price(&order["total"]), Price::from_cents(2897));
    assert_eq!(order["itemCount"], 2);
    assert_eq!(order["stage"], "confirmed");
    assert_eq!(order["estimatedDelivery"], "20-25 mins");

    let (_, cart) = app.get("/cart").await;
    assert_eq!(cart["itemCount"], 0);
}

#[tokio::test(start_paused = true)]
async fn test_order_tracking_progresses_to_delivered() {
    let app = TestApp::new();
    app.post("/cart/add", json!({ "item_id": 1 })).await;
    let (_, order) = app.post_empty("/orders").await;
    let uri = format!("/orders/{}", order["id"].as_str().unwrap());

    // Sample between ticks rather than on them
    tokio::time::sleep(TICK / 10).await;
    let mut seen = Vec::new();
    for _ in 0..4 {
        tokio::time::sleep(TICK).await;
        let (status, tracked) = app.get(&uri).await;
        assert_eq!(status, StatusCode::OK);
        seen.push(tracked["stage"].as_str().unwrap().to_string());
    }

    assert_eq!(seen, ["preparing", "on_the_way", "delivered", "delivered"]);

    let (_, delivered) = app.get(&uri).await;
    assert_eq!(delivered["estimatedDelivery"], "Delivered!");
    assert_eq!(delivered["progress"], 1.0);
    let stages = delivered["stages"].as_array().unwrap();
    assert_eq!(stages.len(), 4);
    assert!(stages.iter().all(|s| s["completed"] == true));
}

#[tokio::test]
async fn test_unknown_order_is_not_found() {
    let app = TestApp::new();
    let (status, _) = app
        .get("/orders/00000000-0000-4000-8000-000000000000")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_order_id_is_rejected() {
    let app = TestApp::new();
    let (status, body) = app.get("/orders/not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Bad request"));
}
