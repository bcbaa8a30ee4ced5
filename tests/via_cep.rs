use client_registry::lookup::{AddressLookup, LookupError, ViaCepGateway};
use client_registry::models::Address;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway(server: &MockServer) -> ViaCepGateway {
    ViaCepGateway::new(format!("{}/ws", server.uri()), "json")
}

#[tokio::test]
async fn resolves_and_renames_fields() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ws/01001000/json"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "cep": "01001-000",
            "logradouro": "Praça da Sé",
            "complemento": "lado ímpar",
            "bairro": "Sé",
            "localidade": "São Paulo",
            "uf": "SP",
            "ibge": "3550308",
            "gia": "1004",
            "ddd": "11",
            "siafi": "7107"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let address = gateway(&server).lookup("01001000").await.unwrap();

    assert_eq!(
        address,
        Address {
            postal_code: "01001-000".to_string(),
            state: "SP".to_string(),
            city: "São Paulo".to_string(),
            district: "Sé".to_string(),
            street: "Praça da Sé".to_string(),
        }
    );
}

#[tokio::test]
async fn not_found_marker_is_a_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ws/99999999/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "erro": true })))
        .mount(&server)
        .await;

    let result = gateway(&server).lookup("99999999").await;

    assert!(matches!(result, Err(LookupError::NotFound(code)) if code == "99999999"));
}

#[tokio::test]
async fn http_errors_are_failures() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_string("<h1>Bad Request</h1>"))
        .mount(&server)
        .await;

    let result = gateway(&server).lookup("0100100A").await;

    assert!(matches!(result, Err(LookupError::Status(status)) if status.as_u16() == 400));
}

#[tokio::test]
async fn malformed_documents_are_failures() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = gateway(&server).lookup("01001000").await;

    assert!(matches!(result, Err(LookupError::Malformed(_))));
}

#[tokio::test]
async fn documents_without_an_address_are_failures() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ws/01001000/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ws/02002000/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "message": "rate limited" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ws/03003000/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    let gateway = gateway(&server);
    for code in ["01001000", "02002000", "03003000"] {
        let result = gateway.lookup(code).await;
        assert!(matches!(result, Err(LookupError::Malformed(_))), "{code}: {result:?}");
    }
}

#[tokio::test]
async fn unreachable_service_is_a_failure() {
    let gateway = ViaCepGateway::new("http://127.0.0.1:1/ws", "json");

    let result = gateway.lookup("01001000").await;

    assert!(matches!(result, Err(LookupError::Request(_))));
}

#[tokio::test]
async fn repeated_lookups_are_not_cached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ws/01001000/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "cep": "01001-000",
            "logradouro": "Praça da Sé",
            "bairro": "Sé",
            "localidade": "São Paulo",
            "uf": "SP"
        })))
        .expect(2)
        .mount(&server)
        .await;

    let gateway = gateway(&server);
    gateway.lookup("01001000").await.unwrap();
    gateway.lookup("01001000").await.unwrap();
}
