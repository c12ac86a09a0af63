use httpmock::prelude::*;
use leads_etl::domain::model::DelayPolicy;
use leads_etl::{EtlEngine, LeadPipeline, LocalStorage, Settings};
use tempfile::TempDir;
use tokio_test::assert_ok;

fn settings_for(server: &MockServer, output_path: &str) -> Settings {
    let mut settings = Settings::new("test-key");
    settings.search_endpoint = server.url("/nearby");
    settings.details_endpoint = server.url("/details");
    settings.categories = vec!["cafe".to_string()];
    settings.keywords = vec![];
    settings.delays = DelayPolicy::none();
    settings.output_path = output_path.to_string();
    settings
}

#[tokio::test]
async fn test_end_to_end_single_cafe() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let search_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/nearby")
            .query_param("type", "cafe")
            .query_param("location", "43.6532,-79.3832")
            .query_param("radius", "50000");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "results": [{"place_id": "p1", "rating": 3.8, "user_ratings_total": 50}],
                "status": "OK"
            }));
    });
    let details_mock = server.mock(|when, then| {
        when.method(GET).path("/details").query_param("place_id", "p1");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "result": {
                    "name": "Joe's Cafe",
                    "rating": 3.8,
                    "user_ratings_total": 50,
                    "formatted_address": "1 Main St",
                    "website": "",
                    "types": ["cafe"],
                    "geometry": {"location": {"lat": 43.65, "lng": -79.38}}
                },
                "status": "OK"
            }));
    });

    let settings = settings_for(&server, &output_path);
    let storage = LocalStorage::new(output_path.clone());
    let engine = EtlEngine::new(LeadPipeline::new(storage, settings));

    let summary = engine.run().await?;

    search_mock.assert();
    details_mock.assert();
    assert_eq!(summary.leads_exported, 1);

    let full_path = std::path::Path::new(&output_path).join("leads.csv");
    assert_eq!(summary.output_path.as_deref(), full_path.to_str());

    let mut reader = csv::Reader::from_path(&full_path)?;
    let headers = reader.headers()?.clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["name", "rating", "reviews", "address", "website", "type", "lat", "lng"]
    );

    let rows: Vec<csv::StringRecord> = reader.records().collect::<Result<_, _>>()?;
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][0], "Joe's Cafe");
    assert_eq!(&rows[0][1], "3.8");
    assert_eq!(&rows[0][2], "50");
    assert_eq!(&rows[0][3], "1 Main St");
    assert_eq!(&rows[0][4], "");
    assert_eq!(&rows[0][5], "cafe");

    Ok(())
}

#[tokio::test]
async fn test_place_found_by_category_and_keyword_is_exported_once() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let body = serde_json::json!({
        "results": [
            {"place_id": "shared", "rating": 3.2, "user_ratings_total": 310},
            {"place_id": "popular", "rating": 4.7, "user_ratings_total": 2200}
        ],
        "status": "OK"
    });
    let category_mock = server.mock(|when, then| {
        when.method(GET).path("/nearby").query_param("type", "cafe");
        then.status(200).json_body(body.clone());
    });
    let keyword_mock = server.mock(|when, then| {
        when.method(GET).path("/nearby").query_param("keyword", "local");
        then.status(200).json_body(body.clone());
    });
    let details_mock = server.mock(|when, then| {
        when.method(GET).path("/details").query_param("place_id", "shared");
        then.status(200).json_body(serde_json::json!({
            "result": {"name": "Shared Spot", "types": ["cafe", "store"]},
            "status": "OK"
        }));
    });
    let popular_details = server.mock(|when, then| {
        when.method(GET).path("/details").query_param("place_id", "popular");
        then.status(200).json_body(serde_json::json!({"result": {}}));
    });

    let mut settings = settings_for(&server, &output_path);
    settings.keywords = vec!["local".to_string()];
    let storage = LocalStorage::new(output_path.clone());
    let engine = EtlEngine::new(LeadPipeline::new(storage, settings));

    let summary = assert_ok!(engine.run().await);

    category_mock.assert();
    keyword_mock.assert();
    details_mock.assert_hits(2);
    popular_details.assert_hits(0);
    assert_eq!(summary.leads_exported, 1);

    let csv = std::fs::read_to_string(std::path::Path::new(&output_path).join("leads.csv"))?;
    assert_eq!(csv.lines().count(), 2);
    assert!(csv.contains("Shared Spot"));
    assert!(csv.contains("\"cafe, store\""));
    assert!(!csv.contains("popular"));

    Ok(())
}

#[tokio::test]
async fn test_no_qualifying_places_writes_no_file() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let search_mock = server.mock(|when, then| {
        when.method(GET).path("/nearby");
        then.status(200).json_body(serde_json::json!({
            "results": [{"place_id": "famous", "rating": 4.5, "user_ratings_total": 100}],
            "status": "OK"
        }));
    });

    let settings = settings_for(&server, &output_path);
    let storage = LocalStorage::new(output_path.clone());
    let engine = EtlEngine::new(LeadPipeline::new(storage, settings));

    let summary = engine.run().await?;

    search_mock.assert();
    assert_eq!(summary.leads_exported, 0);
    assert!(summary.output_path.is_none());
    assert!(!std::path::Path::new(&output_path).join("leads.csv").exists());

    Ok(())
}

#[tokio::test]
async fn test_denied_request_is_an_empty_result() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let search_mock = server.mock(|when, then| {
        when.method(GET).path("/nearby");
        then.status(200).json_body(serde_json::json!({
            "results": [],
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid."
        }));
    });

    let settings = settings_for(&server, &output_path);
    let engine = EtlEngine::new(LeadPipeline::new(
        LocalStorage::new(output_path.clone()),
        settings,
    ));

    let summary = engine.run().await?;

    search_mock.assert();
    assert!(summary.output_path.is_none());

    Ok(())
}

#[tokio::test]
async fn test_unreachable_api_aborts_run() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let mut settings = Settings::new("test-key");
    settings.search_endpoint = "http://127.0.0.1:9/nearby".to_string();
    settings.details_endpoint = "http://127.0.0.1:9/details".to_string();
    settings.categories = vec!["cafe".to_string()];
    settings.keywords = vec![];
    settings.delays = DelayPolicy::none();
    settings.output_path = output_path.clone();

    let engine = EtlEngine::new(LeadPipeline::new(
        LocalStorage::new(output_path.clone()),
        settings,
    ));

    let err = engine.run().await.unwrap_err();

    assert!(matches!(err, leads_etl::EtlError::ApiError(_)));
    assert!(!std::path::Path::new(&output_path).join("leads.csv").exists());
}
