//! HTTP data source against a mock server.

use std::sync::Arc;

use placement_archive::error::{AppError, LoadError};
use placement_archive::models::{Config, Edition, HttpConfig};
use placement_archive::services::PlacementStore;
use placement_archive::storage::{DataSource, HttpSource};
use pretty_assertions::assert_eq;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COMPANIES_2025: &str = r#"[
    {"Company Name": "Acme", "Profile": "SDE", "Job Location": "Pune", "Eligibility": "YYN"},
    {"Company Name": "Globex", "Profile": "Analyst", "Eligibility": "NNY"}
]"#;

fn store_for(server: &MockServer) -> PlacementStore {
    let mut config = Config::default();
    config.source.base_url = Some(format!("{}/archive", server.uri()));
    PlacementStore::from_config(config).unwrap()
}

#[tokio::test]
async fn fetches_under_base_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/archive/data/2025/company_data.json"))
        .and(header("user-agent", HttpConfig::default().user_agent.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string(COMPANIES_2025))
        .expect(1)
        .mount(&server)
        .await;

    let source = HttpSource::new(&format!("{}/archive", server.uri()), &HttpConfig::default()).unwrap();
    let bytes = source.fetch("/data/2025/company_data.json").await.unwrap();
    assert_eq!(bytes, COMPANIES_2025.as_bytes());
}

#[tokio::test]
async fn non_success_status_is_load_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/archive/data/2025/resumes.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let source = HttpSource::new(&format!("{}/archive/", server.uri()), &HttpConfig::default()).unwrap();
    let err = source.fetch("data/2025/resumes.json").await.unwrap_err();
    assert_eq!(err, LoadError::status("data/2025/resumes.json", 404));
}

#[tokio::test]
async fn store_fetches_each_dataset_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/archive/data/2025/company_data.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(COMPANIES_2025)
                .set_delay(std::time::Duration::from_millis(50)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server);
    let (a, b, c) = tokio::join!(
        store.companies(Edition::Y2025),
        store.companies(Edition::Y2025),
        store.companies(Edition::Y2025),
    );
    let (a, b, c) = (a.unwrap(), b.unwrap(), c.unwrap());
    assert!(Arc::ptr_eq(&a, &b) && Arc::ptr_eq(&b, &c));
    assert_eq!(a.len(), 2);

    let again = store.companies(Edition::Y2025).await.unwrap();
    assert!(Arc::ptr_eq(&a, &again));
}

#[tokio::test]
async fn company_detail_attributes_notices() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/archive/data/2025/company_data.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(COMPANIES_2025))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/archive/data/timeline.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"[{"id": 4, "title": "Globex interview slots", "description": "",
                 "created_at": "2025-01-09 18:30:00", "tags": "Interview"}]"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server);
    let detail = store.company_detail(Edition::Y2025, "1").await.unwrap();
    assert_eq!(detail.company.company_name, "Globex");
    assert_eq!(detail.events.len(), 1);
    assert_eq!(detail.events[0].title, "Globex interview slots");

    let acme = store.company_detail(Edition::Y2025, "0").await.unwrap();
    assert!(acme.events.is_empty());

    let missing = store.company_detail(Edition::Y2025, "2").await.unwrap_err();
    assert!(missing.is_not_found());
}

#[tokio::test]
async fn server_error_is_retried_on_next_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/archive/data/2025/company_data.json"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/archive/data/2025/company_data.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(COMPANIES_2025))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server);
    let err = store.companies(Edition::Y2025).await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Load(LoadError::Status { status: 500, .. })
    ));

    let companies = store.companies(Edition::Y2025).await.unwrap();
    assert_eq!(companies[0].company_name, "Acme");
}

#[tokio::test]
async fn caller_provided_client_is_used() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/archive/data/2025/company_data.json"))
        .and(header("x-archive-mirror", "campus"))
        .respond_with(ResponseTemplate::new(200).set_body_string(COMPANIES_2025))
        .expect(1)
        .mount(&server)
        .await;

    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        "x-archive-mirror",
        reqwest::header::HeaderValue::from_static("campus"),
    );
    let client = reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .unwrap();

    let source = HttpSource::with_client(&format!("{}/archive", server.uri()), client).unwrap();
    assert_eq!(source.describe(), format!("{}/archive/", server.uri()));
    let bytes = source.fetch("data/2025/company_data.json").await.unwrap();
    assert_eq!(bytes, COMPANIES_2025.as_bytes());
}
