// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared test helpers: an in-process marketplace API and app builders.

#![allow(dead_code)]

use axum::{
    body::Body,
    extract::{Multipart, Path, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use chrono::Utc;
use motormarket::api::ApiClient;
use motormarket::config::Config;
use motormarket::routes::create_router;
use motormarket::AppState;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const API_SECRET: &str = "test_api_secret";
pub const PASSWORD: &str = "correct-horse";
pub const REFRESH_TOKEN: &str = "refresh-1";
const SIGNING_KEY: &[u8] = b"mock_api_signing_key_32_bytes!!!";

/// State of the fake marketplace API.
pub struct MockApi {
    /// Every request as "METHOD /path", in arrival order.
    pub hits: Mutex<Vec<String>>,
    /// The only access token protected endpoints accept.
    pub valid_access_token: Mutex<String>,
    /// Whether `/auth/refresh-token` accepts `REFRESH_TOKEN`.
    pub refresh_ok: AtomicBool,
    /// Reject every bearer token, even freshly refreshed ones.
    pub reject_all_tokens: AtomicBool,
    /// Image id whose DELETE fails with 500.
    pub failing_image: Mutex<Option<String>>,
    /// Ids of the images attached to every vehicle.
    pub images: Mutex<Vec<String>>,
    /// Files received across all image uploads.
    pub uploaded_files: AtomicUsize,
    minted: AtomicUsize,
}

impl MockApi {
    fn new() -> Self {
        let mock = Self {
            hits: Mutex::new(Vec::new()),
            valid_access_token: Mutex::new(String::new()),
            refresh_ok: AtomicBool::new(true),
            reject_all_tokens: AtomicBool::new(false),
            failing_image: Mutex::new(None),
            images: Mutex::new(vec!["img-1".to_string()]),
            uploaded_files: AtomicUsize::new(0),
            minted: AtomicUsize::new(0),
        };
        let token = mock.mint(3600);
        *mock.valid_access_token.lock().unwrap() = token;
        mock
    }

    /// A token expiring `ttl_secs` from now; every call yields a new string.
    pub fn mint(&self, ttl_secs: i64) -> String {
        let n = self.minted.fetch_add(1, Ordering::SeqCst);
        let claims = json!({
            "sub": format!("u1-{n}"),
            "exp": Utc::now().timestamp() + ttl_secs,
        });
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SIGNING_KEY),
        )
        .unwrap()
    }

    /// Replace the images every vehicle reports.
    pub fn set_images(&self, ids: &[&str]) {
        *self.images.lock().unwrap() = ids.iter().map(|id| id.to_string()).collect();
    }

    pub fn access_token(&self) -> String {
        self.valid_access_token.lock().unwrap().clone()
    }

    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }

    pub fn count(&self, hit: &str) -> usize {
        self.hits().iter().filter(|h| h.as_str() == hit).count()
    }

    pub fn count_prefix(&self, prefix: &str) -> usize {
        self.hits().iter().filter(|h| h.starts_with(prefix)).count()
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        if self.reject_all_tokens.load(Ordering::SeqCst) {
            return false;
        }
        let expected = format!("Bearer {}", self.access_token());
        headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .map(|h| h == expected)
            .unwrap_or(false)
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Invalid or expired token" })),
    )
        .into_response()
}

pub fn user_json() -> Value {
    json!({ "id": "u1", "name": "Ana Souza", "email": "ana@example.com", "phone": "+5511987654321" })
}

pub fn vehicle_json(id: &str) -> Value {
    json!({
        "id": id,
        "brand": "Toyota",
        "model": "Corolla",
        "year": 2019,
        "price": 15500.0,
        "mileage": 42000,
        "fuel": "gasoline",
        "transmission": "automatic",
        "images": [{ "id": "img-1", "url": "https://cdn.example.com/img-1.jpg" }],
        "seller": { "id": "u1", "name": "Ana Souza", "phone": "+55 11 98765-4321" }
    })
}

async fn record(State(mock): State<Arc<MockApi>>, request: Request, next: Next) -> Response {
    mock.hits
        .lock()
        .unwrap()
        .push(format!("{} {}", request.method(), request.uri().path()));
    next.run(request).await
}

async fn login(
    State(mock): State<Arc<MockApi>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let secret = format!("Bearer {API_SECRET}");
    if headers.get(header::AUTHORIZATION).and_then(|h| h.to_str().ok()) != Some(secret.as_str()) {
        return (StatusCode::FORBIDDEN, "missing server secret").into_response();
    }
    if body["password"] != PASSWORD {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid credentials" })),
        )
            .into_response();
    }

    Json(json!({
        "user": user_json(),
        "accessToken": mock.access_token(),
        "refreshToken": REFRESH_TOKEN,
    }))
    .into_response()
}

async fn register(
    State(mock): State<Arc<MockApi>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let secret = format!("Bearer {API_SECRET}");
    if headers.get(header::AUTHORIZATION).and_then(|h| h.to_str().ok()) != Some(secret.as_str()) {
        return (StatusCode::FORBIDDEN, "missing server secret").into_response();
    }
    if body.get("confirmPassword").is_some() {
        return (StatusCode::BAD_REQUEST, "unexpected field").into_response();
    }

    (
        StatusCode::CREATED,
        Json(json!({
            "user": user_json(),
            "accessToken": mock.access_token(),
            "refreshToken": REFRESH_TOKEN,
        })),
    )
        .into_response()
}

async fn refresh_token(State(mock): State<Arc<MockApi>>, Json(body): Json<Value>) -> Response {
    if !mock.refresh_ok.load(Ordering::SeqCst) || body["refreshToken"] != REFRESH_TOKEN {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid refresh token" })),
        )
            .into_response();
    }

    let token = mock.mint(3600);
    *mock.valid_access_token.lock().unwrap() = token.clone();
    Json(json!({ "accessToken": token })).into_response()
}

async fn list_vehicles() -> Json<Value> {
    Json(json!({
        "vehicles": [vehicle_json("v1")],
        "total": 1,
        "page": 1,
        "totalPages": 1
    }))
}

async fn get_vehicle(Path(id): Path<String>) -> Response {
    if id == "missing" {
        return (StatusCode::NOT_FOUND, Json(json!({ "message": "Vehicle not found" })))
            .into_response();
    }
    Json(vehicle_json(&id)).into_response()
}

async fn create_vehicle(State(mock): State<Arc<MockApi>>, headers: HeaderMap) -> Response {
    if !mock.authorized(&headers) {
        return unauthorized();
    }
    (StatusCode::CREATED, Json(vehicle_json("v-new"))).into_response()
}

async fn update_vehicle(
    State(mock): State<Arc<MockApi>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if !mock.authorized(&headers) {
        return unauthorized();
    }
    Json(vehicle_json(&id)).into_response()
}

async fn delete_vehicle(State(mock): State<Arc<MockApi>>, headers: HeaderMap) -> Response {
    if !mock.authorized(&headers) {
        return unauthorized();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn delete_image(
    State(mock): State<Arc<MockApi>>,
    headers: HeaderMap,
    Path((_id, image_id)): Path<(String, String)>,
) -> Response {
    if !mock.authorized(&headers) {
        return unauthorized();
    }
    if mock.failing_image.lock().unwrap().as_deref() == Some(image_id.as_str()) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "Storage unavailable" })),
        )
            .into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn upload_images(
    State(mock): State<Arc<MockApi>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    if !mock.authorized(&headers) {
        return unauthorized();
    }
    let mut files = 0;
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("images") {
            files += 1;
        }
    }
    mock.uploaded_files.fetch_add(files, Ordering::SeqCst);
    (StatusCode::CREATED, Json(json!({ "uploaded": files }))).into_response()
}

async fn list_images(State(mock): State<Arc<MockApi>>, Path(_id): Path<String>) -> Json<Value> {
    let images: Vec<Value> = mock
        .images
        .lock()
        .unwrap()
        .iter()
        .map(|id| json!({ "id": id, "url": format!("https://cdn.example.com/{id}.jpg") }))
        .collect();
    Json(Value::Array(images))
}

/// Start the fake API on an ephemeral port. Returns its base URL.
pub async fn spawn_mock_api() -> (String, Arc<MockApi>) {
    let mock = Arc::new(MockApi::new());

    let app = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/refresh-token", post(refresh_token))
        .route("/auth/forgot-password", post(|| async { StatusCode::NO_CONTENT }))
        .route(
            "/auth/reset-password/{token}",
            post(|| async { StatusCode::NO_CONTENT }),
        )
        .route("/vehicles", get(list_vehicles).post(create_vehicle))
        .route(
            "/vehicles/{id}",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
        .route("/vehicles/{id}/images", post(upload_images))
        .route("/vehicles/{id}/images/{image_id}", delete(delete_image))
        .route("/images/{id}", get(list_images))
        .layer(middleware::from_fn_with_state(mock.clone(), record))
        .with_state(mock.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), mock)
}

/// API client for the mock.
pub fn api_client(base_url: &str) -> ApiClient {
    ApiClient::new(base_url, API_SECRET)
}

/// Create the front-end app pointed at the mock API.
pub fn create_test_app(base_url: &str) -> (Router, Arc<AppState>) {
    let mut config = Config::test_default();
    config.api_base_url = base_url.to_string();
    config.api_secret = API_SECRET.to_string();

    let state = Arc::new(AppState::new(config));
    (create_router(state.clone()), state)
}

/// All `Set-Cookie` header values of a response.
pub fn set_cookie_headers(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect()
}

/// The `Set-Cookie` header for `name`, if any.
pub fn find_cookie(headers: &[String], name: &str) -> Option<String> {
    headers
        .iter()
        .find(|value| value.starts_with(&format!("{name}=")))
        .cloned()
}

/// A `Cookie` request header carrying a full session.
pub fn session_cookie_header(access_token: &str) -> String {
    let user = urlencoding::encode(&user_json().to_string()).into_owned();
    format!("user={user}; accessToken={access_token}; refreshToken={REFRESH_TOKEN}")
}

/// Multipart body builder for listing submissions.
pub struct MultipartBody {
    boundary: &'static str,
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self {
            boundary: "motormarket-test-boundary",
            body: Vec::new(),
        }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                self.boundary, name, value
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                self.boundary, name, file_name, content_type
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn vehicle_fields(self) -> Self {
        self.text("brand", "Toyota")
            .text("model", "Corolla")
            .text("year", "2019")
            .text("price", "15500")
            .text("mileage", "42000")
            .text("fuel", "gasoline")
            .text("transmission", "automatic")
    }

    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    pub fn into_body(mut self) -> Body {
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        Body::from(self.body)
    }
}
