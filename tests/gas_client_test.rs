use bistro_order::core::catalog::load_promotions;
use bistro_order::domain::model::{ReservationRequest, ReservationStatus};
use bistro_order::{Catalog, GasClient, OrderBackend, OrderError};
use httpmock::prelude::*;
use serde_json::json;

fn request() -> ReservationRequest {
    ReservationRequest {
        name: "王小明".to_string(),
        phone: "0912345678".to_string(),
        date: "2026-10-20".to_string(),
        time: "18:00".to_string(),
        pax: 2,
        items: "[]".to_string(),
        total_amount: 0,
        request_token: Some("token-1".to_string()),
    }
}

#[tokio::test]
async fn test_restaurant_items_are_decoded() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/exec")
            .query_param("action", "getRestaurantItems");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "success": true,
                "data": [
                    {
                        "id": 1, "name": "青醬雞肉", "price": "150", "category": "義大利麵",
                        "tags": "spicy, chicken", "hasNoodleSelection": "TRUE", "allowCombo": true
                    },
                    { "id": "d1", "name": "紅茶", "price": 40, "category": "飲品", "isDrink": 1 }
                ]
            }));
    });

    let client = GasClient::new(server.url("/exec"));
    let items = client.restaurant_items().await.unwrap();

    mock.assert();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, "1");
    assert_eq!(items[0].price, 150);
    assert!(items[0].has_noodle_selection);
    assert!(items[0].is_spicy());
    assert!(items[1].is_drink);
}

#[tokio::test]
async fn test_make_reservation_returns_receipt() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/exec")
            .query_param("action", "makeReservation")
            .query_param_exists("data");
        then.status(200).json_body(json!({
            "success": true,
            "reservationId": 42,
            "tableId": "A3"
        }));
    });

    let client = GasClient::new(server.url("/exec"));
    let receipt = client.make_reservation(&request()).await.unwrap();

    mock.assert();
    assert_eq!(receipt.reservation_id, "42");
    assert_eq!(receipt.table_id, "A3");
}

#[tokio::test]
async fn test_backend_rejection_is_surfaced() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).query_param("action", "makeReservation");
        then.status(200)
            .json_body(json!({ "success": false, "error": "該時段已客滿" }));
    });

    let client = GasClient::new(server.url("/exec"));
    let err = client.make_reservation(&request()).await.unwrap_err();

    assert!(matches!(&err, OrderError::BackendRejection { message } if message == "該時段已客滿"));
    assert_eq!(err.user_friendly_message(), "訂位失敗: 該時段已客滿");
}

#[tokio::test]
async fn test_success_without_reservation_id_is_decode_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).query_param("action", "makeReservation");
        then.status(200).json_body(json!({ "success": true }));
    });

    let client = GasClient::new(server.url("/exec"));
    let err = client.make_reservation(&request()).await.unwrap_err();
    assert!(matches!(err, OrderError::Decode { .. }));
}

#[tokio::test]
async fn test_server_error_is_transport_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/exec");
        then.status(500).body("Internal Server Error");
    });

    let client = GasClient::new(server.url("/exec"));
    let err = client.reservations().await.unwrap_err();

    assert!(matches!(err, OrderError::Transport(_)));
    assert!(err.is_retryable());
    assert_eq!(err.user_friendly_message(), "網路錯誤，請稍後再試");
}

#[tokio::test]
async fn test_non_json_body_is_decode_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/exec");
        then.status(200).body("<html>login required</html>");
    });

    let client = GasClient::new(server.url("/exec"));
    let err = client.stats().await.unwrap_err();
    assert!(matches!(err, OrderError::Decode { endpoint, .. } if endpoint == "getStats"));
}

#[tokio::test]
async fn test_member_lookup_and_missing_member() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET)
            .query_param("action", "getMember")
            .query_param("lineId", "phone:0912345678");
        then.status(200).json_body(json!({
            "success": true,
            "data": { "id": 7, "lineId": "phone:0912345678", "name": "王小明", "phone": "0912345678", "points": "120" }
        }));
    });
    server.mock(|when, then| {
        when.method(GET)
            .query_param("action", "getMember")
            .query_param("lineId", "phone:0999999999");
        then.status(200).json_body(json!({ "success": true, "data": null }));
    });

    let client = GasClient::new(server.url("/exec"));

    let member = client.member("phone:0912345678").await.unwrap().unwrap();
    assert_eq!(member.id, "7");
    assert_eq!(member.points, 120);
    assert!(!member.is_admin);

    assert!(client.member("phone:0999999999").await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_status_sends_id_and_status() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .query_param("action", "updateReservationStatus")
            .query_param("id", "5")
            .query_param("status", "Confirmed");
        then.status(200).json_body(json!({ "success": true }));
    });

    let client = GasClient::new(server.url("/exec"));
    client
        .update_reservation_status("5", ReservationStatus::Confirmed)
        .await
        .unwrap();
    mock.assert();
}

#[tokio::test]
async fn test_catalog_and_promotions_degrade_to_empty() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/exec");
        then.status(503);
    });

    let client = GasClient::new(server.url("/exec"));

    let catalog = Catalog::load(&client).await;
    assert!(catalog.is_empty());
    assert!(load_promotions(&client).await.is_empty());
}

#[test]
fn test_with_timeout_builds_client() {
    let client = GasClient::with_timeout(
        "https://script.google.com/macros/s/x/exec",
        Some(std::time::Duration::from_secs(5)),
    )
    .unwrap();
    assert_eq!(client.endpoint(), "https://script.google.com/macros/s/x/exec");
}
