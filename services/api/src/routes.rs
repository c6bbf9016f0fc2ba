use crate::infra::AppState;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use pim_match::analysis::{analyze_payload, Analysis};
use pim_match::catalog::{CatalogImporter, CatalogStore, CatalogSummary};
use pim_match::error::AppError;
use pim_match::mentions::ExtractionPayload;
use serde::Serialize;
use serde_json::{json, Value};
use std::io::Cursor;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub(crate) struct MatchResponse {
    pub(crate) catalog_entries: usize,
    #[serde(flatten)]
    pub(crate) analysis: Analysis,
}

pub(crate) fn with_match_routes(catalog: Arc<CatalogStore>) -> Router {
    Router::new()
        .route(
            "/api/v1/catalog",
            get(catalog_summary_endpoint).put(catalog_replace_endpoint),
        )
        .route("/api/v1/match", post(match_endpoint))
        .with_state(catalog)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn catalog_summary_endpoint(
    State(catalog): State<Arc<CatalogStore>>,
) -> Json<CatalogSummary> {
    Json(catalog.snapshot().summary())
}

/// Replaces the active catalog with the uploaded CSV. Batches already running keep
/// the snapshot they started with.
pub(crate) async fn catalog_replace_endpoint(
    State(catalog): State<Arc<CatalogStore>>,
    body: String,
) -> Result<Json<CatalogSummary>, AppError> {
    let next = CatalogImporter::from_reader(Cursor::new(body.into_bytes()))?;
    let summary = next.summary();
    catalog.replace(next);
    Ok(Json(summary))
}

/// Accepts either the extraction object itself or `{"result": "<raw model text>"}`.
pub(crate) async fn match_endpoint(
    State(catalog): State<Arc<CatalogStore>>,
    Json(body): Json<Value>,
) -> Result<Json<MatchResponse>, AppError> {
    let extraction = extraction_from_body(body)?;
    let snapshot = catalog.snapshot();
    let analysis = analyze_payload(extraction, &snapshot);

    Ok(Json(MatchResponse {
        catalog_entries: snapshot.len(),
        analysis,
    }))
}

fn extraction_from_body(body: Value) -> Result<ExtractionPayload, AppError> {
    let raw_result = match &body {
        Value::Object(fields) if !fields.contains_key("products") => fields
            .get("result")
            .and_then(Value::as_str)
            .map(str::to_owned),
        _ => None,
    };

    let extraction = match raw_result {
        Some(raw) => ExtractionPayload::parse(&raw)?,
        None => ExtractionPayload::from_value(body)?,
    };
    Ok(extraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use pim_match::catalog::CatalogRecord;
    use pim_match::Catalog;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn widgets() -> Arc<CatalogStore> {
        Arc::new(CatalogStore::new(Catalog::from_records(vec![
            CatalogRecord::new("Widget A", "100"),
            CatalogRecord::new("Widget B", "200"),
        ])))
    }

    fn app(catalog: Arc<CatalogStore>, ready: bool) -> Router {
        let handle = PrometheusBuilder::new().build_recorder().handle();
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(handle),
        };
        with_match_routes(catalog).layer(Extension(state))
    }

    async fn read_json_body(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).expect("serialize body")))
            .expect("request builds")
    }

    #[tokio::test]
    async fn match_route_returns_table_and_ledger() {
        let response = app(widgets(), true)
            .oneshot(json_request(
                "POST",
                "/api/v1/match",
                json!({
                    "customer_name": "Dana Ruiz",
                    "products": [
                        {"part_name": "widget a", "part_id": "", "quantity": "3"},
                        {"part_name": "Gadget", "part_id": "", "quantity": "1"}
                    ],
                    "discount_mentioned": false
                }),
            ))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["catalog_entries"], 2);
        assert_eq!(payload["report"]["ledger"], "100 3");
        assert_eq!(payload["report"]["tally"]["no_match"], 1);
        assert_eq!(payload["extraction"]["customer_name"], "Dana Ruiz");
        let table = payload["report"]["table"].as_str().expect("table text");
        assert!(table.ends_with("No Match     Gadget         -            1"));
    }

    #[tokio::test]
    async fn match_route_accepts_raw_model_result() {
        let raw = "```json\n{\"products\": [{\"part_name\": \"\", \"part_id\": 200, \"quantity\": 4}]}\n```";
        let response = app(widgets(), true)
            .oneshot(json_request(
                "POST",
                "/api/v1/match",
                json!({ "result": raw }),
            ))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["report"]["ledger"], "200 4");
    }

    #[tokio::test]
    async fn malformed_batch_is_unprocessable() {
        let response = app(widgets(), true)
            .oneshot(json_request(
                "POST",
                "/api/v1/match",
                json!({ "products": "Widget A" }),
            ))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let payload = read_json_body(response).await;
        assert!(payload["error"]
            .as_str()
            .expect("error message")
            .contains("products"));
    }

    #[tokio::test]
    async fn catalog_upload_replaces_snapshot() {
        let catalog = widgets();
        let router = app(catalog.clone(), true);

        let response = router
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/api/v1/catalog")
                    .header(header::CONTENT_TYPE, "text/csv")
                    .body(Body::from("part_name,part_id\nFlange Adapter,0300\nGasket\n"))
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["entries"], 2);
        assert_eq!(payload["entries_without_identifier"], 1);
        assert_eq!(catalog.snapshot().entries()[0].identifier(), "0300");
    }

    #[tokio::test]
    async fn catalog_summary_reports_entry_count() {
        let response = app(widgets(), true)
            .oneshot(
                Request::builder()
                    .uri("/api/v1/catalog")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        let payload = read_json_body(response).await;
        assert_eq!(payload["entries"], 2);
        assert!(payload.get("loaded_at").is_some());
    }

    #[tokio::test]
    async fn readiness_reflects_startup_state() {
        let response = app(widgets(), false)
            .oneshot(
                Request::builder()
                    .uri("/ready")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
