use std::fmt;

use anyhow::Context;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use cucumber::{given, then, when, World as _};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;
use travel_survey::{db::TripStore, routes::create_router, state::AppState};

#[derive(Debug, cucumber::World, Default)]
struct SurveyWorld {
    app: Option<TestApp>,
    last_status: Option<StatusCode>,
}

impl SurveyWorld {
    fn app(&self) -> &TestApp {
        self.app.as_ref().expect("store must be initialised first")
    }
}

struct TestApp {
    router: Router,
    _root: TempDir,
}

impl fmt::Debug for TestApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestApp").finish()
    }
}

impl TestApp {
    async fn new() -> anyhow::Result<Self> {
        let root = TempDir::new().context("create temp dir for bdd world")?;
        let store = TripStore::new(root.path().join("bdd.sqlite"));
        store.bootstrap().await?;
        Ok(Self {
            router: create_router(AppState::new(store)),
            _root: root,
        })
    }

    async fn send(&self, request: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        Ok((status, serde_json::from_slice(&bytes)?))
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request");
        self.send(request).await.expect("GET request")
    }

    async fn post(&self, body: &Value) -> StatusCode {
        let request = Request::builder()
            .method("POST")
            .uri("/api/trips")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request");
        self.send(request).await.expect("POST request").0
    }
}

fn trip(mode: &str, distance: f64, start: &str) -> Value {
    json!({
        "trip_number": 1,
        "origin_lat": 51.5072,
        "origin_long": -0.1276,
        "start_time": start,
        "destination_lat": 51.5155,
        "destination_long": -0.0922,
        "end_time": start,
        "mode": mode,
        "distance": distance,
        "purpose": "commute",
        "companions": 0,
        "frequency": "weekdays",
        "cost": 1.75
    })
}

#[given("a fresh travel survey store")]
async fn given_fresh_store(world: &mut SurveyWorld) {
    world.app = Some(TestApp::new().await.expect("test app"));
    world.last_status = None;
}

#[when(regex = r#"^I record a \"([^\"]+)\" trip of ([\d.]+) km starting \"([^\"]+)\"$"#)]
async fn when_record_trip(world: &mut SurveyWorld, mode: String, distance: f64, start: String) {
    let status = world.app().post(&trip(&mode, distance, &start)).await;
    world.last_status = Some(status);
}

#[when(regex = r#"^I record a trip without the \"([^\"]+)\" field$"#)]
async fn when_record_incomplete(world: &mut SurveyWorld, field: String) {
    let mut body = trip("car", 1.0, "2024-05-01T08:00:00");
    body.as_object_mut()
        .expect("trip body is an object")
        .remove(&field);
    let status = world.app().post(&body).await;
    world.last_status = Some(status);
}

#[then(regex = r"^the API accepted the last request with status (\d+)$")]
async fn then_last_status(world: &mut SurveyWorld, expected: u16) {
    let status = world.last_status.expect("a request must have been sent");
    assert_eq!(status.as_u16(), expected);
}

#[then(regex = r"^the listing contains (\d+) trips$")]
async fn then_listing_len(world: &mut SurveyWorld, expected: usize) {
    let (status, listed) = world.app().get("/api/trips").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(expected));
}

#[then(regex = r"^the stats report (\d+) trips over ([\d.]+) km$")]
async fn then_stats_totals(world: &mut SurveyWorld, trips: u64, distance: f64) {
    let (_, stats) = world.app().get("/api/admin/stats").await;
    assert_eq!(stats["totalTrips"].as_u64(), Some(trips));
    let total = stats["totalDistance"].as_f64().expect("numeric total");
    assert!((total - distance).abs() < 1e-9, "total distance was {total}");
}

#[then(regex = r#"^the stats count (\d+) \"([^\"]+)\" trips$"#)]
async fn then_mode_count(world: &mut SurveyWorld, count: u64, mode: String) {
    let (_, stats) = world.app().get("/api/admin/stats").await;
    assert_eq!(stats["modeStats"][mode.as_str()].as_u64(), Some(count));
}

#[then(regex = r"^the stats contain (\d+) trip chains$")]
async fn then_chain_count(world: &mut SurveyWorld, count: usize) {
    let (_, stats) = world.app().get("/api/admin/stats").await;
    assert_eq!(stats["tripChains"].as_array().map(Vec::len), Some(count));
}

#[then(regex = r"^the exported trip has distance ([\d.]+) and no coordinates$")]
async fn then_export_anonymized(world: &mut SurveyWorld, distance: f64) {
    let (status, exported) = world.app().get("/api/admin/export").await;
    assert_eq!(status, StatusCode::OK);
    let record = exported[0].as_object().expect("exported record");
    assert_eq!(record["distance"].as_f64(), Some(distance));
    assert!(!record.contains_key("origin_lat"));
    assert!(!record.contains_key("destination_long"));
    assert!(!record.contains_key("id"));
}

#[tokio::main]
async fn main() {
    SurveyWorld::cucumber()
        .fail_on_skipped()
        .with_default_cli()
        .run("tests/features")
        .await;
}
