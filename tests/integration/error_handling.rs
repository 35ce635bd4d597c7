//! Failure paths that involve the session or the number of attempts.

use crate::integration::mock_server::MockServerFixture;
use serde_json::json;

#[tokio::test]
async fn test_unauthorized_envelope_message_wins_and_session_clears() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_authorized(
            "GET",
            "/api/auth/me",
            "abc",
            401,
            json!({ "success": false, "message": "Token expirado", "code": 401 }),
        )
        .await;

    let client = fixture.client();
    client.session().set("abc");

    let envelope = client.auth().profile().wait().await.unwrap();
    assert!(!envelope.success);
    assert_eq!(envelope.message, "Token expirado");
    assert_eq!(envelope.code, 401);
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn test_server_error_is_attempted_once() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_raw("GET", "/api/quotes/4/items", 500, "boom")
        .await;

    let client = fixture.client();
    client.session().set("abc");

    let envelope = client.quotes().items(4).wait().await.unwrap();
    assert_eq!(envelope.message, "Error interno del servidor");
    assert_eq!(envelope.code, 500);
    assert!(client.session().is_authenticated());
    // exactly one hit: failures are never retried
    mock.assert_async().await;
}

#[tokio::test]
async fn test_forbidden_keeps_session() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_json("PATCH", "/api/products/3/stock", 403, json!({ "error": "forbidden" }))
        .await;

    let client = fixture.client();
    client.session().set("abc");

    let envelope = client.products().update_stock(3, 40).wait().await.unwrap();
    assert!(!envelope.success);
    assert_eq!(envelope.message, "Acceso denegado");
    assert_eq!(envelope.code, 403);
    assert_eq!(client.session().get().as_deref(), Some("abc"));
}

#[tokio::test]
async fn test_connection_refused_is_not_offline() {
    let client = chancafe_client::ApiClient::builder()
        .config(chancafe_client::ClientConfig::for_environment(
            chancafe_client::Environment::Production,
        ))
        .base_url("http://127.0.0.1:1/api/")
        .build()
        .unwrap();

    let envelope = client.suppliers().active().wait().await.unwrap();
    assert!(!envelope.success);
    assert_eq!(envelope.code, 500);
    assert!(envelope.message.starts_with("Error de conexión: "));
}
