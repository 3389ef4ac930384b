//! HTTP API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Saved page images and region crops are served as static files under
//! `/uploads`, `/stamps`, and `/signatures`.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Build the archive API router.
///
/// NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
pub fn api_router(ctx: ApiContext) -> Router {
    let uploads = ServeDir::new(&ctx.uploads_dir);
    let stamps = ServeDir::new(&ctx.stamps_dir);
    let signatures = ServeDir::new(&ctx.signatures_dir);

    Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/save-image", post(endpoints::documents::save_image))
        .route("/classify", post(endpoints::process::classify))
        .route("/detect-fields", post(endpoints::process::detect_fields))
        .route("/detect-stamp", post(endpoints::detect::detect_stamp))
        .route("/detect-signature", post(endpoints::detect::detect_signature))
        .route(
            "/documents",
            get(endpoints::documents::list).post(endpoints::documents::create),
        )
        .route(
            "/documents/:id",
            get(endpoints::documents::detail).delete(endpoints::documents::delete),
        )
        .route("/documents/:id/history", get(endpoints::documents::history))
        .route("/document-types", get(endpoints::documents::document_types))
        .route("/search", get(endpoints::documents::search))
        .route("/statistics", get(endpoints::documents::statistics))
        .route("/export/csv", get(endpoints::export::csv))
        .route("/export/json", get(endpoints::export::json))
        .nest_service("/uploads", uploads)
        .nest_service("/stamps", stamps)
        .nest_service("/signatures", signatures)
        .with_state(ctx)
        // Desktop UI runs on a different origin during development
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use base64::Engine;
    use tower::ServiceExt;

    use crate::db::DocumentStore;
    use crate::pipeline::detect::MockRegionDetector;
    use crate::pipeline::orchestrator::DocumentPipeline;
    use crate::pipeline::vision::MockVisionCapability;

    fn test_ctx_with(
        responses: Vec<String>,
        detector: MockRegionDetector,
    ) -> (ApiContext, tempfile::TempDir) {
        let tmp = tempfile::tempdir().unwrap();
        let store = Arc::new(DocumentStore::new(tmp.path().join("archive.db")).unwrap());
        let pipeline = Arc::new(DocumentPipeline::new(Arc::new(
            MockVisionCapability::with_responses(responses),
        )));
        let ctx = ApiContext::new(
            store,
            pipeline,
            Arc::new(detector),
            tmp.path().join("uploads"),
            tmp.path().join("stamps"),
            tmp.path().join("signatures"),
            tmp.path().join("exports"),
        );
        (ctx, tmp)
    }

    fn test_ctx(responses: Vec<String>) -> (ApiContext, tempfile::TempDir) {
        test_ctx_with(responses, MockRegionDetector::miss())
    }

    fn page_data_url() -> String {
        let jpeg: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0xFF, 0xD9];
        format!(
            "data:image/jpeg;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(jpeg)
        )
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn response_json(response: axum::http::Response<Body>) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn health_response_shape() {
        let (ctx, _tmp) = test_ctx(vec![]);
        let app = api_router(ctx);

        let response = app.oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["status"], "ok");
        assert!(!json["version"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn classify_returns_external_label_and_fixed_confidence() {
        let (ctx, _tmp) = test_ctx(vec!["Medical Leave".to_string()]);
        let app = api_router(ctx);

        let req = json_request(
            "POST",
            "/classify",
            serde_json::json!({"images": [page_data_url()]}),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["letterType"], "medical-leave");
        assert_eq!(json["confidence"], 0.85);
    }

    #[tokio::test]
    async fn classify_without_images_is_bad_request() {
        let (ctx, _tmp) = test_ctx(vec![]);
        let app = api_router(ctx);

        let req = json_request("POST", "/classify", serde_json::json!({"images": []}));
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = response_json(response).await;
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn detect_fields_response_shape() {
        let (ctx, _tmp) = test_ctx(vec![
            "Medical Leave".to_string(),
            r#"{"name": "K. Ramesh"}"#.to_string(),
        ]);
        let app = api_router(ctx);

        let req = json_request(
            "POST",
            "/detect-fields",
            serde_json::json!({"images": [page_data_url()]}),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["documentType"], "medical_leave");
        assert_eq!(json["status"], "validated");
        assert_eq!(json["parsedFields"]["name"], "K. Ramesh");
        assert_eq!(json["parsedFields"]["rank"], "NONE");
        assert!(json["rawText"].as_str().unwrap().contains("Ramesh"));
    }

    #[tokio::test]
    async fn save_image_persists_the_page() {
        let (ctx, _tmp) = test_ctx(vec![]);
        let app = api_router(ctx);

        let req = json_request(
            "POST",
            "/save-image",
            serde_json::json!({"image": page_data_url()}),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        let path = json["imagePath"].as_str().unwrap();
        assert!(path.ends_with(".jpg"));
        assert!(std::path::Path::new(path).exists());
    }

    #[tokio::test]
    async fn document_crud_round_trip() {
        let (ctx, _tmp) = test_ctx(vec![]);

        let create_body = serde_json::json!({
            "caseId": "CASE-042",
            "documentType": "medical_leave",
            "parsedFields": {"name": "K. Ramesh"},
            "extractedText": "raw model output"
        });
        let app = api_router(ctx.clone());
        let response = app
            .oneshot(json_request("POST", "/documents", create_body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let created = response_json(response).await;
        let id = created["id"].as_str().unwrap().to_string();
        assert_eq!(created["caseId"], "CASE-042");
        assert_eq!(created["documentType"], "medical_leave");
        assert_eq!(created["fields"]["phoneNumber"], "NONE");
        // Responses use the same camelCase keys as the request DTOs.
        assert!(created["createdAt"].is_string());
        assert!(created.get("case_id").is_none());

        let app = api_router(ctx.clone());
        let response = app.oneshot(get_request("/documents")).await.unwrap();
        let listing = response_json(response).await;
        assert_eq!(listing["total"], 1);

        let app = api_router(ctx.clone());
        let response = app
            .oneshot(get_request(&format!("/documents/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let app = api_router(ctx.clone());
        let response = app
            .oneshot(get_request(&format!("/documents/{id}/history")))
            .await
            .unwrap();
        let history = response_json(response).await;
        assert_eq!(history["history"].as_array().unwrap().len(), 1);
        assert_eq!(history["history"][0]["action"], "INSERT");
        assert_eq!(history["history"][0]["documentId"], id);

        let app = api_router(ctx.clone());
        let req = Request::builder()
            .method("DELETE")
            .uri(format!("/documents/{id}"))
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let app = api_router(ctx);
        let response = app
            .oneshot(get_request(&format!("/documents/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn create_rejects_unknown_type() {
        let (ctx, _tmp) = test_ctx(vec![]);
        let app = api_router(ctx);

        let body = serde_json::json!({
            "caseId": "CASE-1",
            "documentType": "transfer_order",
            "parsedFields": {}
        });
        let response = app
            .oneshot(json_request("POST", "/documents", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn detail_with_invalid_id_is_bad_request() {
        let (ctx, _tmp) = test_ctx(vec![]);
        let app = api_router(ctx);

        let response = app
            .oneshot(get_request("/documents/not-a-uuid"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn search_filters_by_type() {
        let (ctx, _tmp) = test_ctx(vec![]);

        for (case_id, doc_type) in [("CASE-A", "medical_leave"), ("CASE-B", "reward_letter")] {
            let app = api_router(ctx.clone());
            let body = serde_json::json!({
                "caseId": case_id,
                "documentType": doc_type,
                "parsedFields": {}
            });
            let response = app
                .oneshot(json_request("POST", "/documents", body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let app = api_router(ctx.clone());
        let response = app
            .oneshot(get_request("/search?q=CASE&type=reward_letter"))
            .await
            .unwrap();
        let json = response_json(response).await;
        assert_eq!(json["total"], 1);
        assert_eq!(json["documents"][0]["caseId"], "CASE-B");

        let app = api_router(ctx);
        let response = app
            .oneshot(get_request("/search?q=CASE&type=bogus"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn document_types_lists_the_closed_set() {
        let (ctx, _tmp) = test_ctx(vec![]);
        let app = api_router(ctx);

        let response = app.oneshot(get_request("/document-types")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        let types = json.as_array().unwrap();
        assert_eq!(types.len(), 5);
        let medical = types
            .iter()
            .find(|t| t["documentType"] == "medical_leave")
            .unwrap();
        assert_eq!(medical["externalLabel"], "medical-leave");
        assert_eq!(medical["fields"].as_array().unwrap().len(), 7);
        assert!(medical["fields"][0]["description"].is_string());
    }

    #[tokio::test]
    async fn statistics_response_shape() {
        let (ctx, _tmp) = test_ctx(vec![]);
        let app = api_router(ctx);

        let response = app.oneshot(get_request("/statistics")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["total_documents"], 0);
        assert!(json["documents_by_type"].is_object());
        assert!(json["documents_by_status"].is_object());
    }

    #[tokio::test]
    async fn detect_stamp_miss_returns_empty_path() {
        let (ctx, _tmp) = test_ctx_with(vec![], MockRegionDetector::miss());
        let app = api_router(ctx);

        let req = json_request(
            "POST",
            "/detect-stamp",
            serde_json::json!({"images": [page_data_url()]}),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["stampImagePath"], "");
    }

    #[tokio::test]
    async fn detect_signature_hit_returns_crop_path() {
        let (ctx, _tmp) = test_ctx_with(
            vec![],
            MockRegionDetector::hit("signatures/signature_1.jpg"),
        );
        let app = api_router(ctx);

        let req = json_request(
            "POST",
            "/detect-signature",
            serde_json::json!({"images": [page_data_url()]}),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["signatureImagePath"], "signatures/signature_1.jpg");
    }

    #[tokio::test]
    async fn export_csv_writes_a_file() {
        let (ctx, _tmp) = test_ctx(vec![]);

        let app = api_router(ctx.clone());
        let body = serde_json::json!({
            "caseId": "CASE-EXP",
            "documentType": "medical_leave",
            "parsedFields": {"name": "K. Ramesh"}
        });
        app.oneshot(json_request("POST", "/documents", body))
            .await
            .unwrap();

        let app = api_router(ctx);
        let response = app.oneshot(get_request("/export/csv")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["documentCount"], 1);
        let path = json["exportPath"].as_str().unwrap();
        assert!(path.ends_with(".csv"));
        assert!(std::path::Path::new(path).exists());
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let (ctx, _tmp) = test_ctx(vec![]);
        let app = api_router(ctx);

        let response = app.oneshot(get_request("/nonexistent")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
