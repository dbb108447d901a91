use serde_json::{json, Value};

use super::*;

fn station(title: &str, distance: f64, cost: Value, connections: &[&str]) -> Value {
    let connections: Vec<Value> = connections
        .iter()
        .map(|t| json!({ "ID": 1, "ConnectionType": { "ID": 25, "Title": t } }))
        .collect();
    json!({
        "ID": 1001,
        "AddressInfo": { "Title": title, "Distance": distance, "Town": "Newark" },
        "UsageCost": cost,
        "Connections": connections,
    })
}

fn payload(stations: Vec<Value>) -> ProviderResult {
    ProviderResult::Payload(Value::Array(stations))
}

fn texts(result: &ProviderResult) -> Vec<String> {
    normalize_chargers(result)
        .unwrap()
        .into_iter()
        .map(|line| line.text)
        .collect()
}

#[test]
fn formats_single_station_line() {
    let result = payload(vec![station(
        "Main St Garage",
        3.456,
        json!("$0.30/kWh"),
        &["CCS (Type 1)", "CHAdeMO"],
    )]);

    let lines = normalize_chargers(&result).unwrap();

    assert_eq!(
        lines,
        vec![ChargerLine {
            index: 0,
            text: "● EV charger: Main St Garage , located 3.46 miles from your location\n\
                 ● Usage cost $0.30/kWh;\n\
                 ● Type - CCS (Type 1), CHAdeMO"
                .to_owned()
        }]
    );
}

#[test]
fn connection_types_accumulate_across_stations() {
    let result = payload(vec![
        station("First", 1.0, json!("Free"), &["A"]),
        station("Second", 2.0, json!("Free"), &["B"]),
    ]);

    let lines = texts(&result);

    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("● Type - A"), "{}", lines[0]);
    assert!(lines[1].contains('A') && lines[1].contains('B'));
    assert!(lines[1].ends_with("● Type - A, B"), "{}", lines[1]);
}

#[test]
fn stations_without_connections_are_skipped() {
    let result = payload(vec![
        station("Empty", 0.5, json!("Free"), &[]),
        station("Useful", 0.7, json!("Free"), &["Type 2"]),
    ]);

    let lines = texts(&result);

    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("Useful"));
}

#[test]
fn null_usage_cost_renders_as_unknown() {
    let result = payload(vec![station("Depot", 4.0, Value::Null, &["J1772"])]);
    let lines = texts(&result);
    assert!(lines[0].contains("● Usage cost unknown;"), "{}", lines[0]);
}

#[test]
fn numeric_usage_cost_renders_as_json_number() {
    let result = payload(vec![station("Depot", 4.0, json!(0.25), &["J1772"])]);
    let lines = texts(&result);
    assert!(lines[0].contains("● Usage cost 0.25;"), "{}", lines[0]);
}

#[test]
fn missing_usage_cost_key_is_malformed() {
    let result = ProviderResult::Payload(json!([{
        "AddressInfo": { "Title": "Depot", "Distance": 1.0 },
        "Connections": [{ "ConnectionType": { "Title": "J1772" } }],
    }]));
    let err = normalize_chargers(&result).unwrap_err();
    assert!(matches!(err, NormalizeError::MalformedProviderResponse { .. }));
}

#[test]
fn skipped_station_keeps_its_payload_index() {
    let result = payload(vec![
        station("NoConn", 0.5, json!("Free"), &[]),
        station("Real", 0.7, json!("Free"), &["CCS"]),
    ]);

    let lines = normalize_chargers(&result).unwrap();

    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].index, 1);
    assert!(lines[0].text.contains("Real"));
}

#[test]
fn distance_is_rounded_to_two_decimals() {
    let result = payload(vec![station("Depot", 12.0, json!("Free"), &["J1772"])]);
    let lines = texts(&result);
    assert!(lines[0].contains("located 12.00 miles"), "{}", lines[0]);
}

#[test]
fn preserves_provider_order() {
    let result = payload(vec![
        station("Zeta", 9.0, json!("Free"), &["A"]),
        station("Alpha", 1.0, json!("Free"), &["A"]),
    ]);
    let lines = texts(&result);
    assert!(lines[0].contains("Zeta"));
    assert!(lines[1].contains("Alpha"));
}

#[test]
fn empty_sentinel_and_empty_array_yield_no_lines() {
    assert!(normalize_chargers(&ProviderResult::Empty).unwrap().is_empty());
    assert!(normalize_chargers(&payload(vec![])).unwrap().is_empty());
}

#[test]
fn non_array_payload_is_malformed() {
    let result = ProviderResult::Payload(json!({ "error": "invalid key" }));
    let err = normalize_chargers(&result).unwrap_err();
    assert!(matches!(err, NormalizeError::MalformedProviderResponse { .. }));
}

#[test]
fn missing_connection_title_is_malformed() {
    let result = ProviderResult::Payload(json!([{
        "AddressInfo": { "Title": "Depot", "Distance": 1.0 },
        "UsageCost": "Free",
        "Connections": [{ "ConnectionType": null }],
    }]));
    assert!(normalize_chargers(&result).is_err());
}

#[test]
fn missing_connections_field_is_malformed() {
    let result = ProviderResult::Payload(json!([{
        "AddressInfo": { "Title": "Depot", "Distance": 1.0 },
        "UsageCost": "Free",
    }]));
    assert!(normalize_chargers(&result).is_err());
}
