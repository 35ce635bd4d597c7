//! Repository operations against a mock backend.

use crate::integration::mock_server::MockServerFixture;
use chancafe_client::models::{Client, CreditApproval};
use chancafe_client::{ClientViewModel, ConnectivityProbe, NetworkMonitor};
use mockito::Matcher;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_offline_short_circuits_without_a_request() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture.mock_unreachable("GET", "/api/quotes").await;

    let monitor = Arc::new(NetworkMonitor::new(false));
    let client = fixture.client_with_probe(monitor.clone() as Arc<dyn ConnectivityProbe>);
    client.session().set("abc");

    let envelope = client.quotes().list().wait().await.unwrap();
    assert!(!envelope.success);
    assert_eq!(envelope.code, 0);
    assert_eq!(envelope.message, "No hay conexión a internet");
    assert!(envelope.data.is_none());
    // offline never touches the session
    assert!(client.session().is_authenticated());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_back_online_dispatches_again() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_json(
            "GET",
            "/api/categories/tree",
            200,
            json!({
                "success": true,
                "data": [{ "id": 1, "name": "Bebidas", "children": [{ "id": 2, "name": "Café" }] }]
            }),
        )
        .await;

    let monitor = Arc::new(NetworkMonitor::new(false));
    let client = fixture.client_with_probe(monitor.clone() as Arc<dyn ConnectivityProbe>);

    let offline = client.categories().tree().wait().await.unwrap();
    assert_eq!(offline.code, 0);

    monitor.set_online(true);
    let online = client.categories().tree().wait().await.unwrap();
    assert!(online.success, "{}", online.message);
    let tree = online.data.unwrap();
    assert_eq!(tree[0].children.len(), 1);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_republishes_with_local_message() {
    let fixture = MockServerFixture::new().await;
    let mock = {
        let mut server = fixture.server.lock().await;
        server
            .mock("POST", "/api/clients")
            .match_body(Matcher::PartialJson(json!({
                "first_name": "Ana",
                "document_number": "45871236"
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "success": true,
                    "message": "created",
                    "data": { "id": 12, "first_name": "Ana", "document_number": "45871236", "credit_limit": "1500.50" },
                    "code": 201
                })
                .to_string(),
            )
            .create_async()
            .await
    };

    let client = fixture.client();
    let draft = Client {
        first_name: Some("Ana".into()),
        document_number: Some("45871236".into()),
        ..Default::default()
    };
    let envelope = client.clients().create(&draft).wait().await.unwrap();

    assert!(envelope.success);
    assert_eq!(envelope.message, "Cliente creado exitosamente");
    assert_eq!(envelope.code, 201);
    let created = envelope.data.unwrap();
    assert_eq!(created.id, Some(12));
    assert_eq!(created.credit_limit, Some(1500.50));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_blank_search_is_rejected_locally() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture.mock_unreachable("GET", "/api/products/search").await;

    let envelope = fixture.client().products().search("   ").wait().await.unwrap();
    assert!(!envelope.success);
    assert_eq!(envelope.code, 400);
    assert_eq!(envelope.message, "Término de búsqueda requerido");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_offline_blank_search_reports_offline() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture.mock_unreachable("GET", "/api/suppliers/search").await;

    let monitor = Arc::new(NetworkMonitor::new(false));
    let client = fixture.client_with_probe(monitor as Arc<dyn ConnectivityProbe>);

    let envelope = client.suppliers().search("  ").wait().await.unwrap();
    assert!(!envelope.success);
    assert_eq!(envelope.code, 0);
    assert_eq!(envelope.message, "No hay conexión a internet");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_search_sends_trimmed_query() {
    let fixture = MockServerFixture::new().await;
    let mock = {
        let mut server = fixture.server.lock().await;
        server
            .mock("GET", Matcher::Regex(r"^/api/products/search".into()))
            .match_query(Matcher::UrlEncoded("q".into(), "café andino".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({ "success": true, "data": [{ "id": 3, "name": "Café Andino 1kg" }] })
                    .to_string(),
            )
            .create_async()
            .await
    };

    let envelope = fixture
        .client()
        .products()
        .search("  café andino ")
        .wait()
        .await
        .unwrap();
    assert!(envelope.success, "{}", envelope.message);
    assert_eq!(envelope.message, "Productos encontrados");
    assert_eq!(envelope.data.unwrap()[0].name.as_deref(), Some("Café Andino 1kg"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_credit_approval_sends_camel_case_body() {
    let fixture = MockServerFixture::new().await;
    let mock = {
        let mut server = fixture.server.lock().await;
        server
            .mock("PATCH", "/api/credit-requests/7/approve")
            .match_body(Matcher::Json(json!({
                "approvedAmount": 5000.0,
                "approvedTerms": 30,
                "approvalConditions": "Pago quincenal"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({ "success": true, "data": { "id": 7, "status": "approved" }, "code": 200 })
                    .to_string(),
            )
            .create_async()
            .await
    };

    let client = fixture.client();
    client.session().set("abc");
    let approval = CreditApproval {
        approved_amount: 5000.0,
        approved_terms: 30,
        approval_conditions: Some("Pago quincenal".into()),
        notes: None,
    };
    let envelope = client.credit_requests().approve(7, &approval).wait().await.unwrap();

    assert!(envelope.success, "{}", envelope.message);
    assert_eq!(envelope.message, "Solicitud de crédito aprobada exitosamente");
    assert_eq!(envelope.data.unwrap().status.as_deref(), Some("approved"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_delete_succeeds_without_payload() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_json(
            "DELETE",
            "/api/products/9",
            200,
            json!({ "success": true, "message": "deleted", "data": null }),
        )
        .await;

    let envelope = fixture.client().products().delete(9).wait().await.unwrap();
    assert!(envelope.success);
    assert_eq!(envelope.code, 200);
    assert!(envelope.data.is_none());
}

async fn until_idle(vm: &ClientViewModel, key: &'static str) {
    for _ in 0..100 {
        if !vm.state(key).snapshot().is_loading {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("{} never stopped loading", key);
}

#[tokio::test]
async fn test_view_model_projects_success() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_json(
            "GET",
            "/api/clients/active",
            200,
            json!({ "success": true, "message": "ok", "data": [{ "id": 1 }, { "id": 2 }], "code": 200 }),
        )
        .await;

    let vm = ClientViewModel::new(fixture.client().clients());
    let outcome = vm.active_clients();
    assert!(vm.state(ClientViewModel::ACTIVE).snapshot().is_loading);

    let envelope = outcome.wait().await.unwrap();
    assert_eq!(envelope.data.map(|c| c.len()), Some(2));
    until_idle(&vm, ClientViewModel::ACTIVE).await;

    let snap = vm.state(ClientViewModel::ACTIVE).snapshot();
    assert_eq!(
        snap.success_message.as_deref(),
        Some("Clientes activos obtenidos exitosamente")
    );
    assert_eq!(snap.error_message, None);
}

#[tokio::test]
async fn test_view_model_projects_offline_error() {
    let fixture = MockServerFixture::new().await;
    let monitor = Arc::new(NetworkMonitor::new(false));
    let client = fixture.client_with_probe(monitor as Arc<dyn ConnectivityProbe>);

    let vm = ClientViewModel::new(client.clients());
    let _ = vm.client(5);
    until_idle(&vm, ClientViewModel::DETAIL).await;

    let snap = vm.state(ClientViewModel::DETAIL).snapshot();
    assert_eq!(snap.error_message.as_deref(), Some("No hay conexión a internet"));
    assert_eq!(snap.success_message, None);

    vm.clear_messages(ClientViewModel::DETAIL);
    assert_eq!(
        vm.state(ClientViewModel::DETAIL).snapshot().error_message,
        None
    );
}
