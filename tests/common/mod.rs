//! Mock SchoolHub backend for integration tests.
//!
//! Serves a small slice of the REST API on an ephemeral port and counts
//! every request by `"METHOD /path"` so tests can assert how many calls
//! reached the server.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use schoolhub::prelude::*;
use schoolhub::auth::MemorySessionStorage;
use serde_json::{Value, json};

pub const PASSWORD: &str = "password123";
pub const VALID_TOKEN: &str = "valid-token";

#[derive(Clone, Default)]
pub struct Hits(Arc<Mutex<HashMap<String, usize>>>);

impl Hits {
    fn record(&self, key: &str) {
        *self.0.lock().unwrap().entry(key.to_string()).or_default() += 1;
    }

    pub fn count(&self, key: &str) -> usize {
        self.0.lock().unwrap().get(key).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.lock().unwrap().values().sum()
    }
}

pub struct MockBackend {
    pub base_url: String,
    pub hits: Hits,
}

pub struct TestClient {
    pub client: ApiClient,
    pub storage: Arc<MemorySessionStorage>,
    pub backend: MockBackend,
}

pub fn user_json() -> Value {
    json!({
        "id": "u-1",
        "name": "Grace Hopper",
        "email": "grace@school.edu",
        "role": "ADMIN"
    })
}

pub fn student_json(id: &str) -> Value {
    let first: String = FirstName().fake();
    let last: String = LastName().fake();
    json!({
        "id": id,
        "admissionNumber": format!("ADM-{id}"),
        "firstName": first,
        "lastName": last,
        "classId": "c-1",
        "sectionId": "",
        "status": "ACTIVE"
    })
}

fn unauthorized(body: Value) -> Response {
    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {VALID_TOKEN}"))
}

async fn login(State(hits): State<Hits>, Json(body): Json<Value>) -> Response {
    hits.record("POST /auth/login");
    if body["password"] != PASSWORD {
        return unauthorized(json!({"error": "Invalid email or password"}));
    }
    Json(json!({"user": user_json(), "token": VALID_TOKEN})).into_response()
}

async fn me(State(hits): State<Hits>, headers: HeaderMap) -> Response {
    hits.record("GET /auth/me");
    if !authorized(&headers) {
        return unauthorized(json!({}));
    }
    Json(json!({"data": user_json()})).into_response()
}

async fn change_password(State(hits): State<Hits>) -> Json<Value> {
    hits.record("PUT /auth/change-password");
    Json(json!({"message": "Password changed successfully"}))
}

async fn list_students(
    State(hits): State<Hits>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    hits.record("GET /students");
    let data = match params.get("search").map(String::as_str) {
        Some("John") => vec![],
        _ => vec![student_json("s-1"), student_json("s-2")],
    };
    let total = data.len();
    Json(json!({
        "data": data,
        "pagination": {"page": 1, "limit": 20, "total": total, "totalPages": 1}
    }))
}

async fn get_student(State(hits): State<Hits>, Path(id): Path<String>) -> Response {
    hits.record("GET /students/{id}");
    if id == "missing" {
        return (StatusCode::NOT_FOUND, Json(json!({"message": "Student not found"})))
            .into_response();
    }
    Json(json!({"data": student_json(&id)})).into_response()
}

async fn list_buildings(State(hits): State<Hits>) -> Json<Value> {
    hits.record("GET /hostel/buildings");
    Json(json!({"data": [{"id": "b-1", "name": "North Wing", "gender": "MALE", "totalRooms": 12}]}))
}

async fn create_building(State(hits): State<Hits>, Json(body): Json<Value>) -> Response {
    hits.record("POST /hostel/buildings");
    if body["name"] == "North Wing" {
        return (
            StatusCode::CONFLICT,
            Json(json!({"error": "A building with this name already exists"})),
        )
            .into_response();
    }
    let mut building = body;
    building["id"] = json!("b-2");
    building["totalRooms"] = json!(0);
    (StatusCode::CREATED, Json(json!({"data": building}))).into_response()
}

async fn dashboard(State(hits): State<Hits>) -> Json<Value> {
    hits.record("GET /reports/dashboard");
    tokio::time::sleep(Duration::from_millis(50)).await;
    Json(json!({"data": {"totalStudents": 420, "totalTeachers": 31, "attendanceToday": 91.5}}))
}

async fn expired(State(hits): State<Hits>) -> Response {
    hits.record("GET /notices");
    tokio::time::sleep(Duration::from_millis(20)).await;
    unauthorized(json!({}))
}

pub async fn spawn_backend() -> MockBackend {
    let hits = Hits::default();
    let api = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
        .route("/auth/change-password", put(change_password))
        .route("/students", get(list_students))
        .route("/students/{id}", get(get_student))
        .route("/hostel/buildings", get(list_buildings).post(create_building))
        .route("/reports/dashboard", get(dashboard))
        .route("/notices", get(expired))
        .with_state(hits.clone());
    let router = Router::new().nest("/api", api);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    MockBackend {
        base_url: format!("http://{addr}/api"),
        hits,
    }
}

pub async fn test_client() -> TestClient {
    let backend = spawn_backend().await;
    let storage = Arc::new(MemorySessionStorage::new());
    let sessions = SessionManager::new(storage.clone());
    let client = ApiClient::new(
        ApiConfig::with_base_url(&backend.base_url),
        sessions,
        QueryCache::default(),
    )
    .unwrap();
    TestClient {
        client,
        storage,
        backend,
    }
}

/// A client already signed in through the mock backend.
pub async fn logged_in_client() -> TestClient {
    let test = test_client().await;
    AuthApi::login(&test.client, &LoginRequest::new("grace@school.edu", PASSWORD))
        .await
        .unwrap();
    test
}
