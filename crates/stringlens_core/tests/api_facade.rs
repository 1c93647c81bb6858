use serde_json::json;
use stringlens_core::api::{
    ErrorResponse, FilteredListResponse, NaturalLanguageListResponse, RecordResponse,
};
use stringlens_core::db::open_db_in_memory;
use stringlens_core::{content_hash, ApiResponse, StringApi};

#[test]
fn create_returns_201_with_record_shape() {
    let conn = open_db_in_memory().unwrap();
    let api = StringApi::new(&conn);

    let response = api.create_string(r#"{"value": "hello world"}"#);
    assert_eq!(response.status, 201);

    let body = response.body.clone().unwrap();
    assert_eq!(body["id"], json!(content_hash("hello world")));
    assert_eq!(body["value"], json!("hello world"));
    assert_eq!(body["properties"]["length"], json!(11));
    assert_eq!(body["properties"]["word_count"], json!(2));
    assert_eq!(body["properties"]["is_palindrome"], json!(false));
    assert_eq!(body["properties"]["character_frequency_map"]["l"], json!(3));
    assert!(body["created_at"].is_string());

    let record: RecordResponse = decode(&response);
    assert_eq!(record.id, record.properties.sha256_hash);
}

#[test]
fn duplicate_create_returns_409() {
    let conn = open_db_in_memory().unwrap();
    let api = StringApi::new(&conn);

    api.create_string(r#"{"value": "hello world"}"#);
    let response = api.create_string(r#"{"value": "hello world"}"#);
    assert_eq!(response.status, 409);

    let error: ErrorResponse = decode(&response);
    assert_eq!(error.detail, "String already exists in the system");
}

#[test]
fn non_string_payload_returns_422_without_storing() {
    let conn = open_db_in_memory().unwrap();
    let api = StringApi::new(&conn);

    let response = api.create_string(r#"{"value": 123}"#);
    assert_eq!(response.status, 422);

    let listing: FilteredListResponse = decode(&api.list_strings(Vec::<(String, String)>::new()));
    assert_eq!(listing.count, 0);
}

#[test]
fn get_returns_200_or_404() {
    let conn = open_db_in_memory().unwrap();
    let api = StringApi::new(&conn);
    api.create_string(r#"{"value": "hello world"}"#);

    let found = api.get_string("hello world");
    assert_eq!(found.status, 200);
    let record: RecordResponse = decode(&found);
    assert_eq!(record.value, "hello world");

    let missing = api.get_string("goodbye world");
    assert_eq!(missing.status, 404);
}

#[test]
fn list_without_filters_returns_everything() {
    let conn = open_db_in_memory().unwrap();
    let api = StringApi::new(&conn);
    api.create_string(r#"{"value": "hello world"}"#);
    api.create_string(r#"{"value": "level"}"#);

    let response = api.list_strings(Vec::<(String, String)>::new());
    assert_eq!(response.status, 200);
    let listing: FilteredListResponse = decode(&response);
    assert_eq!(listing.count, 2);
    assert_eq!(listing.data.len(), 2);
    assert_eq!(response.body.unwrap()["filters_applied"], json!({}));
}

#[test]
fn list_with_palindrome_filter_returns_level_only() {
    let conn = open_db_in_memory().unwrap();
    let api = StringApi::new(&conn);
    api.create_string(r#"{"value": "hello world"}"#);
    api.create_string(r#"{"value": "level"}"#);

    let response = api.list_strings([("is_palindrome", "true")]);
    assert_eq!(response.status, 200);
    let listing: FilteredListResponse = decode(&response);
    assert_eq!(listing.count, 1);
    assert_eq!(listing.data[0].value, "level");
    assert_eq!(
        response.body.unwrap()["filters_applied"],
        json!({ "is_palindrome": true })
    );
}

#[test]
fn list_with_malformed_parameter_returns_422() {
    let conn = open_db_in_memory().unwrap();
    let api = StringApi::new(&conn);

    let response = api.list_strings([("min_length", "five")]);
    assert_eq!(response.status, 422);
    let error: ErrorResponse = decode(&response);
    assert!(error.detail.contains("min_length"));
}

#[test]
fn list_with_negative_length_bounds_returns_200() {
    let conn = open_db_in_memory().unwrap();
    let api = StringApi::new(&conn);
    api.create_string(r#"{"value": "hello world"}"#);
    api.create_string(r#"{"value": "level"}"#);

    let response = api.list_strings([("min_length", "-1")]);
    assert_eq!(response.status, 200);
    let listing: FilteredListResponse = decode(&response);
    assert_eq!(listing.count, 2);
    assert_eq!(listing.filters_applied.min_length, Some(-1));

    let response = api.list_strings([("max_length", "-1")]);
    assert_eq!(response.status, 200);
    let listing: FilteredListResponse = decode(&response);
    assert_eq!(listing.count, 0);
}

#[test]
fn oversized_longer_than_query_returns_empty_listing() {
    let conn = open_db_in_memory().unwrap();
    let api = StringApi::new(&conn);
    api.create_string(r#"{"value": "level"}"#);

    let response = api.filter_by_natural_language("strings longer than 99999999999 characters");
    assert_eq!(response.status, 200);
    let listing: NaturalLanguageListResponse = decode(&response);
    assert_eq!(listing.count, 0);
    assert_eq!(
        listing.interpreted_query.parsed_filters.min_length,
        Some(100_000_000_000)
    );
}

#[test]
fn natural_language_filter_reports_interpretation() {
    let conn = open_db_in_memory().unwrap();
    let api = StringApi::new(&conn);
    api.create_string(r#"{"value": "hello world"}"#);
    api.create_string(r#"{"value": "level"}"#);

    let response = api.filter_by_natural_language("all single word palindromic strings");
    assert_eq!(response.status, 200);
    assert_eq!(
        response.body.clone().unwrap()["interpreted_query"],
        json!({
            "original": "all single word palindromic strings",
            "parsed_filters": { "word_count": 1, "is_palindrome": true }
        })
    );

    let listing: NaturalLanguageListResponse = decode(&response);
    assert_eq!(listing.count, 1);
    assert_eq!(listing.data[0].value, "level");
}

#[test]
fn untranslatable_query_returns_400() {
    let conn = open_db_in_memory().unwrap();
    let api = StringApi::new(&conn);

    let response = api.filter_by_natural_language("gibberish with no recognizable pattern");
    assert_eq!(response.status, 400);
    let error: ErrorResponse = decode(&response);
    assert_eq!(error.detail, "Unable to parse natural language query");
}

#[test]
fn delete_returns_204_with_empty_body_then_404() {
    let conn = open_db_in_memory().unwrap();
    let api = StringApi::new(&conn);
    api.create_string(r#"{"value": "hello world"}"#);

    let deleted = api.delete_string("hello world");
    assert_eq!(deleted.status, 204);
    assert!(deleted.body.is_none());

    assert_eq!(api.delete_string("hello world").status, 404);
    assert_eq!(api.get_string("hello world").status, 404);
}

#[test]
fn records_persist_across_file_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("persist.db");

    {
        let conn = stringlens_core::db::open_db(&path).unwrap();
        let api = StringApi::new(&conn);
        assert_eq!(api.create_string(r#"{"value": "racecar"}"#).status, 201);
    }

    let conn = stringlens_core::db::open_db(&path).unwrap();
    let api = StringApi::new(&conn);
    let record: RecordResponse = decode(&api.get_string("racecar"));
    assert!(record.properties.is_palindrome);
}

fn decode<T: serde::de::DeserializeOwned>(response: &ApiResponse) -> T {
    serde_json::from_value(response.body.clone().expect("response should have a body"))
        .expect("body should decode")
}
