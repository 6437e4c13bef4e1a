use crate::error::AppError;
use crate::infra::{deserialize_optional_date, evaluation_date, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::NaiveDate;
use credit_qa::quality::engine::{
    generate_quality_dashboard, QualityDashboard, QuickCheck, QuickCheckResult,
};
use credit_qa::quality::{CreditReport, DisputeLetter};
use credit_qa::QualityAssuranceResult;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AssessRequest {
    pub(crate) report: CreditReport,
    #[serde(default)]
    pub(crate) dispute_letter: Option<DisputeLetter>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuickCheckRequest {
    pub(crate) report: CreditReport,
    #[serde(default)]
    pub(crate) dispute_letter: Option<DisputeLetter>,
    #[serde(default)]
    pub(crate) checks: Vec<QuickCheck>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DashboardRequest {
    pub(crate) history: Vec<QualityAssuranceResult>,
}

pub(crate) fn quality_routes() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/quality/assess", post(assess_endpoint))
        .route("/api/v1/quality/quick", post(quick_check_endpoint))
        .route("/api/v1/quality/dashboard", post(dashboard_endpoint))
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

/// Assessments fan out over OS threads, so they run off the async executor.
pub(crate) async fn assess_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<AssessRequest>,
) -> Result<Json<QualityAssuranceResult>, AppError> {
    let AssessRequest {
        report,
        dispute_letter,
        today,
    } = payload;
    let today = evaluation_date(today);
    let engine = state.engine.clone();

    let result = tokio::task::spawn_blocking(move || {
        engine.assess_quality(&report, dispute_letter.as_ref(), today)
    })
    .await?;

    info!(
        score = result.overall_score,
        grade = result.overall_grade.label(),
        alerts = result.alerts.len(),
        "quality assessment served"
    );
    Ok(Json(result))
}

pub(crate) async fn quick_check_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<QuickCheckRequest>,
) -> Result<Json<QuickCheckResult>, AppError> {
    let QuickCheckRequest {
        report,
        dispute_letter,
        checks,
        today,
    } = payload;
    let today = evaluation_date(today);
    let engine = state.engine.clone();

    let result = tokio::task::spawn_blocking(move || {
        engine.quick_quality_check(&report, dispute_letter.as_ref(), &checks, today)
    })
    .await?;

    Ok(Json(result))
}

pub(crate) async fn dashboard_endpoint(
    Json(payload): Json<DashboardRequest>,
) -> Result<Json<QualityDashboard>, AppError> {
    let dashboard = generate_quality_dashboard(&payload.history)?;
    Ok(Json(dashboard))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use credit_qa::quality::engine::{HealthStatus, QualityGrade};
    use credit_qa::{QualityAssuranceEngine, QualityConfig};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state(ready: bool) -> AppState {
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            engine: Arc::new(QualityAssuranceEngine::new(QualityConfig::default())),
        }
    }

    fn app(ready: bool) -> Router {
        quality_routes().layer(Extension(state(ready)))
    }

    fn sample_report() -> serde_json::Value {
        json!({
            "personalInfo": { "name": "Dana Reyes", "ssn": "345-67-8901" },
            "creditScores": {
                "experian": { "score": 702, "bureau": "experian", "date": "2025-05-01" },
                "equifax": { "score": 698, "bureau": "equifax", "date": "2025-05-01" },
                "transunion": { "score": 705, "bureau": "transunion", "date": "2025-05-01" }
            },
            "accounts": [{
                "creditor": "Discover",
                "accountNumber": "****9012",
                "accountType": "credit_card",
                "balance": 2500.0,
                "creditLimit": 2000.0,
                "status": "current",
                "dateOpened": "2018-04-01",
                "lastReported": "2025-05-01"
            }]
        })
    }

    async fn post_json(router: Router, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds");
        let response = router.oneshot(request).await.expect("router responds");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn readiness_reflects_startup_flag() {
        let request = Request::builder()
            .uri("/ready")
            .body(Body::empty())
            .expect("request builds");
        let response = app(false).oneshot(request).await.expect("router responds");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn assess_endpoint_grades_the_report() {
        let (status, body) = post_json(
            app(true),
            "/api/v1/quality/assess",
            json!({ "report": sample_report(), "today": "2025-06-01" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["assessedOn"], "2025-06-01");
        let score = body["overallScore"].as_f64().expect("numeric score");
        assert!((0.0..100.0).contains(&score));
        let grade: QualityGrade =
            serde_json::from_value(body["overallGrade"].clone()).expect("grade label");
        assert_eq!(grade, QualityGrade::from_score(score));
        assert!(body["compliance"].is_null());
    }

    #[tokio::test]
    async fn quick_check_flags_over_limit_balance() {
        let (status, body) = post_json(
            app(true),
            "/api/v1/quality/quick",
            json!({
                "report": sample_report(),
                "checks": ["consistency"],
                "today": "2025-06-01"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let alerts = body["criticalAlerts"].as_array().expect("alert list");
        assert!(alerts
            .iter()
            .filter_map(|line| line.as_str())
            .any(|line| line.contains("balance exceeds credit limit")));
    }

    #[tokio::test]
    async fn dashboard_endpoint_rejects_empty_history() {
        let (status, body) =
            post_json(app(true), "/api/v1/quality/dashboard", json!({ "history": [] })).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]
            .as_str()
            .expect("error message")
            .contains("empty"));
    }

    #[tokio::test]
    async fn dashboard_endpoint_summarises_history() {
        let report: CreditReport = serde_json::from_value(sample_report()).expect("report");
        let engine = QualityAssuranceEngine::new(QualityConfig::default());
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date");
        let history = vec![engine.assess_quality(&report, None, today)];

        let Json(dashboard) = dashboard_endpoint(Json(DashboardRequest { history }))
            .await
            .expect("dashboard builds");

        assert_eq!(dashboard.assessments, 1);
        assert_eq!(dashboard.latest_assessed_on, today);
        assert_eq!(
            dashboard.overall_health,
            HealthStatus::from_score(dashboard.latest_score)
        );
    }
}
