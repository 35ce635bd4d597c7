//! Call execution against a mock backend: decoding, pass-through and classification.

use crate::integration::mock_server::MockServerFixture;
use chancafe_client::models::Client;
use chancafe_client::{ApiCallback, ApiClient, ApiRequest, ClientConfig, Environment, Outcome};
use serde_json::json;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Recorder {
    events: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl ApiCallback<Vec<Client>> for Recorder {
    fn on_success(&mut self, data: Option<Vec<Client>>) {
        let n = data.map(|d| d.len()).unwrap_or_default();
        self.events.lock().unwrap().push(format!("success:{}", n));
    }

    fn on_error(&mut self, message: String, code: i32) {
        self.events
            .lock()
            .unwrap()
            .push(format!("error:{}:{}", code, message));
    }

    fn on_loading(&mut self) {
        self.events.lock().unwrap().push("loading".into());
    }
}

#[tokio::test]
async fn test_success_reaches_callback_once() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_json(
            "GET",
            "/api/clients",
            200,
            json!({
                "success": true,
                "message": "ok",
                "data": [{ "id": 1, "first_name": "Ana" }, { "id": 2 }],
                "code": 200
            }),
        )
        .await;

    let client = fixture.client();
    let recorder = Recorder::default();
    let handle = client
        .executor()
        .execute::<Vec<Client>, _>(ApiRequest::get("clients"), recorder.clone());

    // on_loading runs before execute returns
    assert_eq!(recorder.events().first().map(String::as_str), Some("loading"));

    handle.join().await.unwrap();
    assert_eq!(recorder.events(), vec!["loading", "success:2"]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_server_reported_failure_is_passed_through() {
    let fixture = MockServerFixture::new().await;
    let _ok_status = fixture
        .mock_json(
            "POST",
            "/api/clients",
            200,
            json!({ "success": false, "message": "Documento ya registrado", "code": 409 }),
        )
        .await;
    let _bad_status = fixture
        .mock_json(
            "PUT",
            "/api/clients/3",
            422,
            json!({ "success": false, "message": "Email inválido" }),
        )
        .await;

    let executor = fixture.client().executor().clone();

    let outcome: Outcome<Client> = executor
        .execute_async(&ApiRequest::post("clients").json(&json!({ "first_name": "Ana" })))
        .await;
    assert_eq!(
        outcome,
        Outcome::Failure {
            message: "Documento ya registrado".into(),
            code: 409
        }
    );

    // missing code falls back to the HTTP status
    let outcome: Outcome<Client> = executor
        .execute_async(&ApiRequest::put("clients/{id}").path_param("id", 3).json(&json!({})))
        .await;
    assert_eq!(
        outcome,
        Outcome::Failure {
            message: "Email inválido".into(),
            code: 422
        }
    );
}

#[tokio::test]
async fn test_statuses_without_envelope_are_classified() {
    let cases = [
        (400, "Datos inválidos"),
        (403, "Acceso denegado"),
        (404, "Recurso no encontrado"),
        (500, "Error interno del servidor"),
        (503, "Servicio no disponible"),
        (418, "Error del servidor: 418"),
    ];

    for (status, message) in cases {
        let fixture = MockServerFixture::new().await;
        let _mock = fixture
            .mock_raw("GET", "/api/products", status, "<html>upstream error</html>")
            .await;
        let outcome: Outcome<Vec<Client>> = fixture
            .client()
            .executor()
            .execute_async(&ApiRequest::get("products"))
            .await;
        assert_eq!(
            outcome,
            Outcome::Failure {
                message: message.to_string(),
                code: status as i32
            },
            "status {}",
            status
        );
    }
}

#[tokio::test]
async fn test_malformed_success_body_is_a_transport_failure() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture.mock_raw("GET", "/api/clients", 200, "not json").await;

    let outcome: Outcome<Vec<Client>> = fixture
        .client()
        .executor()
        .execute_async(&ApiRequest::get("clients"))
        .await;
    match outcome {
        Outcome::Failure { message, code } => {
            assert_eq!(code, 500);
            assert!(message.starts_with("Error de conexión: "), "{}", message);
        }
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_host_is_a_transport_failure() {
    let client = ApiClient::builder()
        .config(ClientConfig::for_environment(Environment::Production))
        .base_url("http://127.0.0.1:1/api/")
        .build()
        .unwrap();
    client.session().set("abc");

    let recorder = Recorder::default();
    client
        .executor()
        .execute::<Vec<Client>, _>(ApiRequest::get("clients"), recorder.clone())
        .join()
        .await
        .unwrap();

    let events = recorder.events();
    assert_eq!(events.len(), 2);
    assert!(events[1].starts_with("error:500:Error de conexión: "), "{:?}", events);
    // a transport failure never touches the session
    assert!(client.session().is_authenticated());
}
