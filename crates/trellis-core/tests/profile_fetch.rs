use trellis_core::config::ProfileConfig;
use trellis_core::profile::{ProfileClient, UserId};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> ProfileConfig {
    ProfileConfig {
        api_base: server.uri(),
        ..ProfileConfig::default()
    }
}

#[tokio::test]
async fn test_fetch_sends_jwt_header_and_decodes_profile() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/"))
        .and(header("authorization", "JWT user-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "_id": 1,
            "fullname": "Moustapha Amadou Diouf"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ProfileClient::new(&config_for(&server), "user-42").unwrap();
    let profile = client.fetch_current_user().await.unwrap();

    assert_eq!(profile.id, UserId::Number(1));
    assert_eq!(profile.full_name, "Moustapha Amadou Diouf");
}

#[tokio::test]
async fn test_fetch_reports_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = ProfileClient::new(&config_for(&server), "bad").unwrap();
    let err = client.fetch_current_user().await.unwrap_err();

    assert!(err.to_string().contains("401"), "{err:#}");
}

#[tokio::test]
async fn test_fetch_reports_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = ProfileClient::new(&config_for(&server), "t").unwrap();
    let err = client.fetch_current_user().await.unwrap_err();

    assert!(format!("{err:#}").contains("decode"), "{err:#}");
}
