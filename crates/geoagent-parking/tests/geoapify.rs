//! Integration tests for the parking adaptor against a wiremock Geoapify
//! stand-in.

use geoagent_core::{handle_message, ChannelSink, ParkingRequest, ProviderResult, Reply};
use geoagent_parking::{GeoapifyClient, ParkingAdaptor, HEADER, NO_OPTIONS_MESSAGE};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> GeoapifyClient {
    GeoapifyClient::new("test-key", base_url, 60, "geoagent-test/0.1")
        .expect("client construction should not fail")
}

fn endpoint(server: &MockServer) -> String {
    format!("{}/v2/places", server.uri())
}

fn request(max_result: u32) -> ParkingRequest {
    ParkingRequest {
        latitude: 37.78,
        longitude: -122.42,
        radius: 2.0,
        max_result,
    }
}

fn places(names: &[&str]) -> serde_json::Value {
    let features: Vec<_> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            json!({
                "type": "Feature",
                "properties": {
                    "name": name,
                    "formatted": format!("{name}, {i} Market St, San Francisco"),
                    "datasource": { "raw": { "capacity": 100 + i } }
                }
            })
        })
        .collect();
    json!({ "type": "FeatureCollection", "features": features })
}

#[tokio::test]
async fn fetch_parking_sends_geoapify_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/places"))
        .and(query_param("categories", "parking"))
        .and(query_param("filter", "circle:-122.42,37.78,3218"))
        .and(query_param("bias", "proximity:-122.42,37.78"))
        .and(query_param("limit", "15"))
        .and(query_param("apiKey", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(places(&[])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&endpoint(&server));
    let result = client
        .fetch_parking(37.78, -122.42, 3218.0, 15)
        .await
        .unwrap();

    assert_eq!(result, ProviderResult::Payload(places(&[])));
}

#[tokio::test]
async fn fetch_parking_returns_empty_sentinel_on_non_200() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "Unauthorized" })))
        .mount(&server)
        .await;

    let client = test_client(&endpoint(&server));
    let result = client.fetch_parking(37.78, -122.42, 3218.0, 15).await;

    assert!(
        matches!(result, Ok(ProviderResult::Empty)),
        "expected empty sentinel, got: {result:?}"
    );
}

#[tokio::test]
async fn fetch_parking_absorbs_network_failure() {
    let client = test_client("http://127.0.0.1:1/v2/places");
    let result = client.fetch_parking(37.78, -122.42, 3218.0, 15).await;

    assert!(
        matches!(result, Ok(ProviderResult::Empty)),
        "expected empty sentinel, got: {result:?}"
    );
}

#[tokio::test]
async fn handler_converts_miles_to_meters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("filter", "circle:-122.42,37.78,3218"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(places(&["A", "B"])))
        .expect(1)
        .mount(&server)
        .await;

    let adaptor = ParkingAdaptor::new(test_client(&endpoint(&server)));
    let (sink, _rx) = ChannelSink::new();

    let reply = handle_message(&adaptor, &sink, "sender", request(5)).await;

    assert!(matches!(reply, Reply::SelectFromOptions { .. }), "{reply:?}");
}

#[tokio::test]
async fn two_places_yield_header_and_two_options() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(places(&["Fifth & Mission", "Union Square"])),
        )
        .mount(&server)
        .await;

    let adaptor = ParkingAdaptor::new(test_client(&endpoint(&server)));
    let (sink, mut rx) = ChannelSink::new();

    let reply = handle_message(&adaptor, &sink, "agent1q-orchestrator", request(10)).await;

    match &reply {
        Reply::SelectFromOptions { options, .. } => {
            assert_eq!(options.len(), 3);
            assert_eq!(options[0].value, HEADER);
            assert!(options[1].value.contains("Fifth & Mission has 100 spaces"));
            assert!(options[2].value.contains("Union Square has 101 spaces"));
        }
        other => panic!("expected options reply, got: {other:?}"),
    }
    let sent = rx.recv().await.unwrap();
    assert_eq!(sent.to, "agent1q-orchestrator");
    assert_eq!(sent.reply, reply);
}

#[tokio::test]
async fn single_place_yields_final_reply() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(places(&["Lonely Lot"])))
        .mount(&server)
        .await;

    let adaptor = ParkingAdaptor::new(test_client(&endpoint(&server)));
    let (sink, _rx) = ChannelSink::new();

    let reply = handle_message(&adaptor, &sink, "sender", request(10)).await;

    match reply {
        Reply::Final { message, .. } => assert_eq!(message, NO_OPTIONS_MESSAGE),
        other => panic!("expected final reply, got: {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_provider_yields_final_reply_not_error() {
    let adaptor = ParkingAdaptor::new(test_client("http://127.0.0.1:1/v2/places"));
    let (sink, mut rx) = ChannelSink::new();

    let reply = handle_message(&adaptor, &sink, "sender", request(10)).await;

    assert!(matches!(reply, Reply::Final { .. }), "{reply:?}");
    assert!(reply.request_id().is_some());
    assert_eq!(rx.recv().await.unwrap().reply, reply);
}

#[tokio::test]
async fn malformed_payload_yields_error_reply() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "features": "nope" })))
        .mount(&server)
        .await;

    let adaptor = ParkingAdaptor::new(test_client(&endpoint(&server)));
    let (sink, _rx) = ChannelSink::new();

    let reply = handle_message(&adaptor, &sink, "sender", request(10)).await;

    match reply {
        Reply::Error { message } => {
            assert!(message.starts_with("malformed provider response"), "{message}");
        }
        other => panic!("expected error reply, got: {other:?}"),
    }
}
