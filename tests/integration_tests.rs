//! End-to-end tests against fixture GIS servers.
//!
//! Each county adapter is pointed at a mockito server standing in for the
//! real ArcGIS REST deployment, then driven through the registry the way the
//! CLI drives it.

use std::sync::Arc;

use mockito::Matcher;
use tempfile::tempdir;

use parcel_scout::counties::{
    CountyAdapter, CountyRegistry, HillsboroughAdapter, ManateeAdapter, PascoAdapter,
    PinellasAdapter,
};
use parcel_scout::models::{CountyId, SectionFlags};
use parcel_scout::report::generate_report;
use parcel_scout::utils::HttpClient;

fn feature_body(attributes: serde_json::Value) -> String {
    serde_json::json!({ "features": [{ "attributes": attributes }] }).to_string()
}

const EMPTY_FEATURES: &str = r#"{"features": []}"#;

#[tokio::test]
async fn hillsborough_lookup_maps_owner_and_defaults() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/query")
        .match_query(Matcher::UrlEncoded(
            "where".into(),
            "FOLIONUM='1926050030'".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(feature_body(serde_json::json!({
            "FOLIONUM": "1926050030",
            "OWNERNAME": "ACME LLC",
            "SITUSADD1": "100 MAIN ST",
            "ACRES": 2.5,
            "ASSD_TOT": 350000
        })))
        .create_async()
        .await;

    let adapter = HillsboroughAdapter::with_endpoint(
        HttpClient::new(),
        format!("{}/query", server.url()),
    );

    let mut registry = CountyRegistry::new();
    registry.register(Arc::new(adapter));

    let result = registry
        .lookup_property("Hillsborough", "1926050030")
        .await;

    mock.assert_async().await;
    assert!(result.is_success(), "error: {:?}", result.error());

    let record = result.record().unwrap();
    assert_eq!(record.county, CountyId::Hillsborough);
    assert_eq!(record.owner, "ACME LLC");
    assert_eq!(record.address, "100 MAIN ST");
    assert_eq!(record.acres, 2.5);
    assert_eq!(record.assessed_total, 350000.0);
    // Schema defaults fill absent fields
    assert_eq!(record.city, "TAMPA");
    assert!(record.zoning.contains("Contact"));
}

#[tokio::test]
async fn hillsborough_separators_normalized_before_query() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/query")
        .match_query(Matcher::UrlEncoded(
            "where".into(),
            "FOLIONUM='1926050030'".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(feature_body(serde_json::json!({ "OWNERNAME": "ACME LLC" })))
        .create_async()
        .await;

    let adapter = HillsboroughAdapter::with_endpoint(
        HttpClient::new(),
        format!("{}/query", server.url()),
    );

    let record = adapter.lookup("19-26-05 0030.").await.unwrap();

    mock.assert_async().await;
    assert_eq!(record.owner, "ACME LLC");
}

#[tokio::test]
async fn hillsborough_outage_not_reported_as_missing_parcel() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/query")
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let adapter = HillsboroughAdapter::with_endpoint(
        HttpClient::new(),
        format!("{}/query", server.url()),
    );

    let mut registry = CountyRegistry::new();
    registry.register(Arc::new(adapter));

    let result = registry
        .lookup_property("Hillsborough", "1926050030")
        .await;

    mock.assert_async().await;
    assert!(!result.is_success());
    let error = result.error().unwrap();
    assert!(error.contains("API error"), "error was: {}", error);
    assert!(!error.contains("not found"), "error was: {}", error);
}

#[tokio::test]
async fn manatee_lookup_returns_owner_and_address() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/query")
        .match_query(Matcher::UrlEncoded(
            "where".into(),
            "PIN='1234567890'".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(feature_body(serde_json::json!({
            "PIN": "1234567890",
            "PRIMARY_ADDRESS": "500 BAY DR",
            "PROP_CITYNAME": "BRADENTON",
            "OWNER": "BAYSIDE HOLDINGS LLC",
            "JUST_VALUE": 925000,
            "FUTURE_LAND_USE": "RES-6"
        })))
        .create_async()
        .await;

    let adapter =
        ManateeAdapter::with_endpoint(HttpClient::new(), format!("{}/query", server.url()));

    let mut registry = CountyRegistry::new();
    registry.register(Arc::new(adapter));

    let result = registry.lookup_property("Manatee", "1234567890").await;

    mock.assert_async().await;
    assert!(result.is_success(), "error: {:?}", result.error());

    let record = result.record().unwrap();
    assert_eq!(record.county, CountyId::Manatee);
    assert!(!record.owner.is_empty());
    assert!(!record.address.is_empty());
    assert_eq!(record.owner, "BAYSIDE HOLDINGS LLC");
    assert_eq!(record.city, "BRADENTON");
    assert_eq!(record.assessed_total, 925000.0);
}

#[tokio::test]
async fn unknown_county_fails_closed_without_requests() {
    let registry = CountyRegistry::new();

    let result = registry.lookup_property("Atlantis", "12345").await;

    assert!(!result.is_success());
    let error = result.error().unwrap();
    assert!(error.contains("Atlantis"), "error was: {}", error);
    assert!(error.contains("not supported"));
}

#[tokio::test]
async fn pasco_exhausts_all_candidates_before_not_found() {
    let mut server = mockito::Server::new_async().await;

    // Two field names times two identifier variants
    let mock = server
        .mock("GET", "/query")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(EMPTY_FEATURES)
        .expect(4)
        .create_async()
        .await;

    let adapter =
        PascoAdapter::with_endpoint(HttpClient::new(), format!("{}/query", server.url()));

    let result = adapter.lookup("12-34-56-78-901-234-5678").await;

    mock.assert_async().await;
    let err = result.unwrap_err();
    assert!(err.to_string().contains("not found"), "err: {}", err);
}

#[tokio::test]
async fn pasco_clean_miss_among_errors_still_not_found() {
    let mut server = mockito::Server::new_async().await;

    // Earlier-created mocks with unmet expectations match first, so this must
    // precede the catch-all for only the raw-PARCELID attempt to error
    let broken = server
        .mock("GET", "/query")
        .match_query(Matcher::UrlEncoded(
            "where".into(),
            "PARCELID='12-34-56-78-901-234-5678'".into(),
        ))
        .with_status(500)
        .create_async()
        .await;

    let empties = server
        .mock("GET", "/query")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(EMPTY_FEATURES)
        .expect(3)
        .create_async()
        .await;

    let adapter =
        PascoAdapter::with_endpoint(HttpClient::new(), format!("{}/query", server.url()));

    let err = adapter.lookup("12-34-56-78-901-234-5678").await.unwrap_err();

    broken.assert_async().await;
    empties.assert_async().await;
    // A candidate answered cleanly, so the parcel really was not found
    assert!(err.to_string().contains("not found"), "err: {}", err);
}

#[tokio::test]
async fn pasco_second_candidate_wins() {
    let mut server = mockito::Server::new_async().await;

    let miss = server
        .mock("GET", "/query")
        .match_query(Matcher::UrlEncoded(
            "where".into(),
            "PARCELID='12-34-56-78-901-234-5678'".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(EMPTY_FEATURES)
        .create_async()
        .await;

    let hit = server
        .mock("GET", "/query")
        .match_query(Matcher::UrlEncoded(
            "where".into(),
            "PARCELID='123456789012345678'".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(feature_body(serde_json::json!({
            "OWNERNAME": "RIVER RANCH TRUST"
        })))
        .create_async()
        .await;

    let adapter =
        PascoAdapter::with_endpoint(HttpClient::new(), format!("{}/query", server.url()));

    let record = adapter.lookup("12-34-56-78-901-234-5678").await.unwrap();

    miss.assert_async().await;
    hit.assert_async().await;
    assert_eq!(record.owner, "RIVER RANCH TRUST");
}

#[tokio::test]
async fn pasco_transport_error_advances_to_next_candidate() {
    let mut server = mockito::Server::new_async().await;

    let broken = server
        .mock("GET", "/query")
        .match_query(Matcher::UrlEncoded(
            "where".into(),
            "PARCELID='12-34-56-78-901-234-5678'".into(),
        ))
        .with_status(500)
        .create_async()
        .await;

    let hit = server
        .mock("GET", "/query")
        .match_query(Matcher::UrlEncoded(
            "where".into(),
            "PARCELID='123456789012345678'".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(feature_body(serde_json::json!({ "OWNERNAME": "STILL FOUND" })))
        .create_async()
        .await;

    let adapter =
        PascoAdapter::with_endpoint(HttpClient::new(), format!("{}/query", server.url()));

    let record = adapter.lookup("12-34-56-78-901-234-5678").await.unwrap();

    broken.assert_async().await;
    hit.assert_async().await;
    assert_eq!(record.owner, "STILL FOUND");
}

#[tokio::test]
async fn pinellas_two_step_join_merges_both_layers() {
    let mut server = mockito::Server::new_async().await;

    let parcel = server
        .mock("GET", "/parcel")
        .match_query(Matcher::UrlEncoded(
            "where".into(),
            "PGIS.PGIS.AccelaParcels.PARCELID='03-32-16-11737-001-0010'".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(feature_body(serde_json::json!({
            "PGIS.PGIS.Parcels.OBJECTID": 42,
            "PGIS.PGIS.AccelaParcels.ZONECLASS": "RM",
            "PGIS.PGIS.AccelaParcels.STATEDAREA": "1.20 AC",
            "PGIS.PGIS.AccelaParcels.JURISDICTION": "CLEARWATER"
        })))
        .create_async()
        .await;

    let related = server
        .mock("GET", "/related")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("objectIds".into(), "42".into()),
            Matcher::UrlEncoded("relationshipId".into(), "0".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            serde_json::json!({
                "relatedRecordGroups": [{
                    "relatedRecords": [{
                        "attributes": {
                            "OWNERNAME": "GULF COAST LLC",
                            "JUSTVAL": 725000
                        }
                    }]
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let adapter = PinellasAdapter::with_endpoints(
        HttpClient::new(),
        format!("{}/parcel", server.url()),
        format!("{}/related", server.url()),
    );

    let record = adapter.lookup("03-32-16-11737-001-0010").await.unwrap();

    parcel.assert_async().await;
    related.assert_async().await;
    assert_eq!(record.zoning, "RM");
    assert_eq!(record.acres, 1.2);
    assert_eq!(record.city, "CLEARWATER");
    assert_eq!(record.owner, "GULF COAST LLC");
    assert_eq!(record.assessed_total, 725000.0);
}

#[tokio::test]
async fn pinellas_empty_related_records_still_succeeds() {
    let mut server = mockito::Server::new_async().await;

    let parcel = server
        .mock("GET", "/parcel")
        .match_query(Matcher::UrlEncoded(
            "where".into(),
            "PGIS.PGIS.AccelaParcels.PARCELID='03-32-16-11737-001-0010'".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(feature_body(serde_json::json!({
            "PGIS.PGIS.Parcels.OBJECTID": 42,
            "PGIS.PGIS.AccelaParcels.ZONECLASS": "C-2"
        })))
        .create_async()
        .await;

    let related = server
        .mock("GET", "/related")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"relatedRecordGroups": []}"#)
        .create_async()
        .await;

    let adapter = PinellasAdapter::with_endpoints(
        HttpClient::new(),
        format!("{}/parcel", server.url()),
        format!("{}/related", server.url()),
    );

    let record = adapter.lookup("03-32-16-11737-001-0010").await.unwrap();

    parcel.assert_async().await;
    related.assert_async().await;
    // Appraiser fields default; the lookup is still a success
    assert_eq!(record.zoning, "C-2");
    assert_eq!(record.owner, "");
    assert_eq!(record.assessed_total, 0.0);
    assert_eq!(record.year_built, "");
}

#[tokio::test]
async fn pinellas_not_found_links_to_appraiser_site() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/parcel")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(EMPTY_FEATURES)
        .expect(4)
        .create_async()
        .await;

    let adapter = PinellasAdapter::with_endpoints(
        HttpClient::new(),
        format!("{}/parcel", server.url()),
        format!("{}/related", server.url()),
    );

    let err = adapter
        .lookup("03-32-16-11737-001-0010")
        .await
        .unwrap_err();

    mock.assert_async().await;
    assert!(err.to_string().contains("pcpao.gov"));
}

#[tokio::test]
async fn lookup_result_serializes_with_status_tag() {
    let registry = CountyRegistry::new();
    let result = registry.lookup_property("Atlantis", "x").await;

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["status"], "failure");
    assert!(json["error"].as_str().unwrap().contains("Atlantis"));
}

#[tokio::test]
async fn lookup_then_report_end_to_end() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/query")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(feature_body(serde_json::json!({
            "OWNERNAME": "ACME LLC",
            "SITUSADD1": "100 MAIN ST",
            "SCITY": "TAMPA",
            "ACRES": 2.5,
            "ASSD_TOT": 350000,
            "SALE1_DATE": "2023-06-01",
            "SALE1_AMT": 410000
        })))
        .create_async()
        .await;

    let adapter = HillsboroughAdapter::with_endpoint(
        HttpClient::new(),
        format!("{}/query", server.url()),
    );

    let mut registry = CountyRegistry::new();
    registry.register(Arc::new(adapter));

    let result = registry
        .lookup_property("hillsborough", "1926050030")
        .await;
    let record = result.record().expect("lookup should succeed");

    let dir = tempdir().unwrap();
    let path = dir.path().join("report.xlsx");
    let saved = generate_report(record, None, SectionFlags::all(), &path).unwrap();

    assert!(saved.exists());
    assert!(saved.metadata().unwrap().len() > 0);
}
