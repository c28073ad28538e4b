//! Shared test harness: stub providers and an app builder mirroring the
//! production router construction in `main.rs`, so integration tests
//! exercise the same middleware stack (CORS, request ID, timeout, tracing,
//! panic recovery) that production uses.

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use bytes::Bytes;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use verde_api::config::ServerConfig;
use verde_api::router::build_app_router;
use verde_api::state::AppState;
use verde_core::identify::Identification;
use verde_providers::{
    BackgroundRemover, FetchError, ImageFetcher, ImageSynthesizer, SpeciesIdentifier, Translator,
};
use verde_storage::{ImageStore, StorageError};

pub const TEST_IMAGE_URL: &str = "https://images.example/generated.png";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

// ---------------------------------------------------------------------------
// Stub providers
// ---------------------------------------------------------------------------

/// Canned outcomes for every external collaborator.
///
/// The default is the all-success scenario; tests knock out individual
/// steps to exercise the degradation paths.
#[derive(Clone)]
pub struct StubProviders {
    pub identification: Option<Identification>,
    pub synthesized_url: Option<String>,
    pub removed_bytes: Option<Bytes>,
    pub translation: Option<String>,
}

impl Default for StubProviders {
    fn default() -> Self {
        Self {
            identification: Some(Identification {
                scientific_name: "Rosa chinensis".to_string(),
                confidence: 87.0,
            }),
            synthesized_url: Some(TEST_IMAGE_URL.to_string()),
            removed_bytes: Some(Bytes::from_static(b"removed-bg-png")),
            translation: Some("월계화".to_string()),
        }
    }
}

struct StubIdentifier(Option<Identification>);

#[async_trait]
impl SpeciesIdentifier for StubIdentifier {
    async fn identify(&self, _image: Bytes) -> Option<Identification> {
        self.0.clone()
    }
}

struct StubSynthesizer(Option<String>);

#[async_trait]
impl ImageSynthesizer for StubSynthesizer {
    async fn synthesize(&self, _species: &str) -> Option<String> {
        self.0.clone()
    }
}

struct StubRemover(Option<Bytes>);

#[async_trait]
impl BackgroundRemover for StubRemover {
    async fn remove_background(&self, _image_url: &str) -> Option<Bytes> {
        self.0.clone()
    }
}

struct StubTranslator(Option<String>);

#[async_trait]
impl Translator for StubTranslator {
    async fn translate(&self, _scientific_name: &str) -> Option<String> {
        self.0.clone()
    }
}

struct StubFetcher;

#[async_trait]
impl ImageFetcher for StubFetcher {
    async fn fetch_image(&self, _url: &str) -> Result<Bytes, FetchError> {
        Ok(Bytes::from_static(b"original-png"))
    }
}

/// In-memory [`ImageStore`] recording uploads and producing the production
/// public-URL shape.
pub struct MemoryStore {
    pub uploads: Mutex<Vec<(String, Bytes)>>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            uploads: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ImageStore for MemoryStore {
    async fn put_png(&self, filename: &str, bytes: Bytes) -> Result<String, StorageError> {
        self.uploads
            .lock()
            .unwrap()
            .push((filename.to_string(), bytes));
        Ok(format!(
            "https://verde-test.s3.ap-northeast-2.amazonaws.com/plantimage/generated/{filename}"
        ))
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build the application with all-success stub providers.
#[allow(dead_code)]
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, StubProviders::default()).0
}

/// Build the application with the given stub outcomes, also returning the
/// memory store so tests can inspect uploads.
pub fn build_test_app_with(pool: PgPool, providers: StubProviders) -> (Router, Arc<MemoryStore>) {
    let config = test_config();
    let store = MemoryStore::new();

    let state = AppState {
        pool,
        config: Arc::new(config),
        identifier: Arc::new(StubIdentifier(providers.identification)),
        synthesizer: Arc::new(StubSynthesizer(providers.synthesized_url)),
        remover: Arc::new(StubRemover(providers.removed_bytes)),
        translator: Arc::new(StubTranslator(providers.translation)),
        fetcher: Arc::new(StubFetcher),
        store: store.clone(),
    };

    (build_app_router(state), store)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Issue a GET request against the in-process app.
#[allow(dead_code)]
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

const BOUNDARY: &str = "verde-test-boundary";

/// Build a `POST /identify` multipart request.
///
/// Either part can be omitted to exercise the validation paths.
#[allow(dead_code)]
pub fn identify_request(file: Option<&[u8]>, user_id: Option<&str>) -> Request<Body> {
    let mut body: Vec<u8> = Vec::new();

    if let Some(user_id) = user_id {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(b"Content-Disposition: form-data; name=\"user_id\"\r\n\r\n");
        body.extend_from_slice(user_id.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    if let Some(file) = file {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            b"Content-Disposition: form-data; name=\"file\"; filename=\"plant.jpg\"\r\n",
        );
        body.extend_from_slice(b"Content-Type: image/jpeg\r\n\r\n");
        body.extend_from_slice(file);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/identify")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Collect a response body into parsed JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
