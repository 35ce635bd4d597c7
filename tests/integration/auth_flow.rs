//! Session lifecycle: login, bearer decoration, 401 invalidation and logout.

use crate::integration::mock_server::MockServerFixture;
use chancafe_client::models::LoginRequest;
use chancafe_client::transport::TransportConfig;
use chancafe_client::{ConnectivityProbe, NetworkMonitor};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn test_login_stores_token() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_anonymous(
            "POST",
            "/api/auth/login",
            json!({
                "success": true,
                "message": "ok",
                "data": {
                    "user": { "id": 1, "name": "Ana", "email": "ana@chancafe.com", "role": "admin" },
                    "token": "abc"
                },
                "code": 200
            }),
        )
        .await;

    let client = fixture.client();
    let envelope = client
        .auth()
        .login(&LoginRequest::new("ana@chancafe.com", "secreto"))
        .wait()
        .await
        .unwrap();

    assert!(envelope.success);
    assert_eq!(envelope.message, "Login exitoso");
    assert_eq!(envelope.data.unwrap().user.unwrap().role.as_deref(), Some("admin"));
    assert_eq!(client.session().get().as_deref(), Some("abc"));
    assert!(client.auth().is_authenticated());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_login_with_held_token_still_sends_bearer() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_authorized(
            "POST",
            "/api/auth/login",
            "old",
            200,
            json!({ "success": true, "data": { "token": "new" }, "code": 200 }),
        )
        .await;

    let client = fixture.client();
    client.session().set("old");
    let envelope = client
        .auth()
        .login(&LoginRequest::new("ana@chancafe.com", "secreto"))
        .wait()
        .await
        .unwrap();

    assert!(envelope.success, "{}", envelope.message);
    assert_eq!(client.session().get().as_deref(), Some("new"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_rejected_login_keeps_session_empty() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_json(
            "POST",
            "/api/auth/login",
            401,
            json!({ "success": false, "message": "Credenciales inválidas", "code": 401 }),
        )
        .await;

    let client = fixture.client();
    let envelope = client
        .auth()
        .login(&LoginRequest::new("ana@chancafe.com", "mala"))
        .wait()
        .await
        .unwrap();

    assert!(!envelope.success);
    assert_eq!(envelope.message, "Credenciales inválidas");
    assert_eq!(envelope.code, 401);
    assert_eq!(client.session().get(), None);
}

#[tokio::test]
async fn test_unauthorized_response_clears_session() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_authorized("GET", "/api/clients", "abc", 401, json!({ "error": "expired" }))
        .await;

    let client = fixture.client();
    client.session().set("abc");

    let envelope = client.clients().list().wait().await.unwrap();
    assert!(!envelope.success);
    assert_eq!(envelope.message, "No autorizado - Sesión expirada");
    assert_eq!(envelope.code, 401);
    assert_eq!(client.session().get(), None);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_no_header_without_token() {
    let fixture = MockServerFixture::new().await;
    // only header-less requests match; anything else gets mockito's 501
    let _mock = fixture
        .mock_anonymous(
            "GET",
            "/api/products",
            json!({ "success": true, "message": "ok", "data": [], "code": 200 }),
        )
        .await;

    let client = fixture.client();
    let first = client.products().list().wait().await.unwrap();
    assert!(first.success);

    // an empty token counts as no token
    client.session().set("");
    let second = client.products().list().wait().await.unwrap();
    assert!(second.success, "{}", second.message);
}

#[tokio::test]
async fn test_profile_without_session_is_not_sent() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture.mock_unreachable("GET", "/api/auth/me").await;

    let envelope = fixture.client().auth().profile().wait().await.unwrap();
    assert!(!envelope.success);
    assert_eq!(envelope.message, "No hay sesión activa");
    assert_eq!(envelope.code, 401);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_logout_clears_session_even_on_server_error() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_raw("POST", "/api/auth/logout", 500, "Internal Server Error")
        .await;

    let client = fixture.client();
    client.session().set("abc");

    let envelope = client.auth().logout().wait().await.unwrap();
    assert!(envelope.success);
    assert_eq!(envelope.message, "Sesión cerrada localmente");
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn test_logout_round_trip() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_authorized(
            "POST",
            "/api/auth/logout",
            "abc",
            200,
            json!({ "success": true, "message": "bye", "code": 200 }),
        )
        .await;

    let client = fixture.client();
    client.session().set("abc");

    let envelope = client.auth().logout().wait().await.unwrap();
    assert_eq!(envelope.message, "Sesión cerrada exitosamente");
    assert!(!client.session().is_authenticated());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_logout_without_session_sends_nothing() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture.mock_unreachable("POST", "/api/auth/logout").await;

    let envelope = fixture.client().auth().logout().wait().await.unwrap();
    assert!(envelope.success);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_offline_logout_clears_locally() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture.mock_unreachable("POST", "/api/auth/logout").await;

    let monitor = Arc::new(NetworkMonitor::new(false));
    let client = fixture.client_with_probe(monitor.clone() as Arc<dyn ConnectivityProbe>);
    client.session().set("abc");

    let envelope = client.auth().logout().wait().await.unwrap();
    assert!(envelope.success);
    assert_eq!(envelope.message, "Sesión cerrada localmente");
    assert_eq!(client.session().get(), None);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_rebuilt_transport_keeps_bearer_header() {
    let first = MockServerFixture::new().await;
    let second = MockServerFixture::new().await;
    let before = first.mock_unreachable("GET", "/api/suppliers").await;
    let after = second
        .mock_authorized(
            "GET",
            "/api/suppliers",
            "abc",
            200,
            json!({ "success": true, "message": "ok", "data": [{ "id": 4, "name": "Molinos SAC" }], "code": 200 }),
        )
        .await;

    let client = first.client();
    client.session().set("abc");
    client
        .rebuild_transport(TransportConfig::new(second.base_url.as_str()))
        .unwrap();

    let envelope = client.suppliers().list().wait().await.unwrap();
    assert!(envelope.success, "{}", envelope.message);
    assert_eq!(envelope.data.map(|s| s.len()), Some(1));
    before.assert_async().await;
    after.assert_async().await;
}
