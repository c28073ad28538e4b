//! Integration tests for `POST /identify`: the full pipeline against stub
//! providers and a real database.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app_with, identify_request, StubProviders};
use sqlx::PgPool;
use tower::ServiceExt;

const ROSE_JPEG: &[u8] = b"not-really-a-jpeg-but-bytes-pass-through";

async fn table_count(pool: &PgPool, table: &str) -> i64 {
    let row: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap();
    row.0
}

// ---------------------------------------------------------------------------
// Success path
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn successful_identify_returns_full_response(pool: PgPool) {
    let (app, store) = build_test_app_with(pool.clone(), StubProviders::default());

    let response = app
        .oneshot(identify_request(Some(ROSE_JPEG), Some("7")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["plant_name_en"], "Rosa chinensis");
    assert_eq!(json["plant_name_kr"], "월계화");
    assert_eq!(json["confidence"], 87.0);
    assert_eq!(
        json["image_url"],
        "https://verde-test.s3.ap-northeast-2.amazonaws.com/plantimage/generated/dalle_Rosa chinensis.png"
    );
    assert_eq!(
        json["removed_bg_image_url"],
        "https://verde-test.s3.ap-northeast-2.amazonaws.com/plantimage/generated/removedbg_Rosa chinensis.png"
    );

    // Both variants were uploaded.
    let uploads = store.uploads.lock().unwrap();
    assert_eq!(uploads.len(), 2);
    assert_eq!(uploads[0].0, "dalle_Rosa chinensis.png");
    assert_eq!(uploads[1].0, "removedbg_Rosa chinensis.png");
    drop(uploads);

    // Exactly one row in each table.
    assert_eq!(table_count(&pool, "plants").await, 1);
    assert_eq!(table_count(&pool, "user_plants").await, 1);
    assert_eq!(table_count(&pool, "uploaded_plant_photos").await, 1);
    assert_eq!(table_count(&pool, "image_metadata").await, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn repeat_identify_reuses_plant_but_appends_logs(pool: PgPool) {
    let (app, _store) = build_test_app_with(pool.clone(), StubProviders::default());

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(identify_request(Some(ROSE_JPEG), Some("7")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(table_count(&pool, "plants").await, 1);
    assert_eq!(table_count(&pool, "user_plants").await, 1);
    assert_eq!(table_count(&pool, "uploaded_plant_photos").await, 2);
    assert_eq!(table_count(&pool, "image_metadata").await, 2);
}

// ---------------------------------------------------------------------------
// Unknown plant
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_plant_returns_fallback_and_writes_nothing(pool: PgPool) {
    let providers = StubProviders {
        identification: None,
        ..StubProviders::default()
    };
    let (app, store) = build_test_app_with(pool.clone(), providers);

    let response = app
        .oneshot(identify_request(Some(ROSE_JPEG), Some("7")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["plant_name_en"], "Unknown");
    assert_eq!(json["plant_name_kr"], "알 수 없음");
    assert_eq!(json["confidence"], serde_json::Value::Null);
    assert_eq!(json["image_url"], serde_json::Value::Null);
    assert_eq!(json["removed_bg_image_url"], serde_json::Value::Null);

    // No uploads and no database writes at all.
    assert!(store.uploads.lock().unwrap().is_empty());
    assert_eq!(table_count(&pool, "plants").await, 0);
    assert_eq!(table_count(&pool, "user_plants").await, 0);
    assert_eq!(table_count(&pool, "uploaded_plant_photos").await, 0);
    assert_eq!(table_count(&pool, "image_metadata").await, 0);
}

// ---------------------------------------------------------------------------
// Degradation paths
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn removal_failure_still_returns_original_image(pool: PgPool) {
    let providers = StubProviders {
        removed_bytes: None,
        ..StubProviders::default()
    };
    let (app, store) = build_test_app_with(pool.clone(), providers);

    let response = app
        .oneshot(identify_request(Some(ROSE_JPEG), Some("7")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["plant_name_en"], "Rosa chinensis");
    assert!(json["image_url"].is_string());
    assert_eq!(json["removed_bg_image_url"], serde_json::Value::Null);

    // Only the original was uploaded.
    assert_eq!(store.uploads.lock().unwrap().len(), 1);

    // The identification is still fully persisted.
    assert_eq!(table_count(&pool, "uploaded_plant_photos").await, 1);
    let metadata: (Option<String>, Option<String>) =
        sqlx::query_as("SELECT dalle_url, removed_url FROM image_metadata")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(metadata.0.is_some());
    assert!(metadata.1.is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn synthesis_failure_skips_images_but_persists_identification(pool: PgPool) {
    let providers = StubProviders {
        synthesized_url: None,
        ..StubProviders::default()
    };
    let (app, store) = build_test_app_with(pool.clone(), providers);

    let response = app
        .oneshot(identify_request(Some(ROSE_JPEG), Some("7")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["plant_name_en"], "Rosa chinensis");
    assert_eq!(json["confidence"], 87.0);
    assert_eq!(json["image_url"], serde_json::Value::Null);
    assert_eq!(json["removed_bg_image_url"], serde_json::Value::Null);

    // Background removal and upload never ran.
    assert!(store.uploads.lock().unwrap().is_empty());

    // The identification itself is still recorded.
    assert_eq!(table_count(&pool, "plants").await, 1);
    assert_eq!(table_count(&pool, "uploaded_plant_photos").await, 1);
    assert_eq!(table_count(&pool, "image_metadata").await, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn translation_failure_falls_back_to_unknown_korean_name(pool: PgPool) {
    let providers = StubProviders {
        translation: None,
        ..StubProviders::default()
    };
    let (app, _store) = build_test_app_with(pool.clone(), providers);

    let response = app
        .oneshot(identify_request(Some(ROSE_JPEG), Some("7")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["plant_name_en"], "Rosa chinensis");
    assert_eq!(json["plant_name_kr"], "알 수 없음");
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_file_returns_422(pool: PgPool) {
    let (app, _store) = build_test_app_with(pool.clone(), StubProviders::default());

    let response = app
        .oneshot(identify_request(None, Some("7")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNPROCESSABLE_ENTITY");

    assert_eq!(table_count(&pool, "image_metadata").await, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_user_id_returns_422(pool: PgPool) {
    let (app, _store) = build_test_app_with(pool, StubProviders::default());

    let response = app
        .oneshot(identify_request(Some(ROSE_JPEG), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn non_integer_user_id_returns_422(pool: PgPool) {
    let (app, _store) = build_test_app_with(pool, StubProviders::default());

    let response = app
        .oneshot(identify_request(Some(ROSE_JPEG), Some("not-a-number")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("user_id must be an integer"));
}
