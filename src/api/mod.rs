use axum::{
    Router,
    extract::{Json, Query},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::core::{
    AllocationState, AxisBounds, ChartArea, Dataset, OverlayController, ParameterError,
    PointerEvent, Projection, ProjectionSummary, project,
};

pub mod cli;

use cli::{Cli, PointerReport, ProjectionRequest, build_request, pointer_report};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    principal: Option<f64>,
    loan_length: Option<u32>,
    interest_rate: Option<f64>,
    additional_principal: Option<f64>,

    investment_start: Option<f64>,
    #[serde(alias = "monthlyInvestment")]
    additional_investment: Option<f64>,
    #[serde(alias = "annualROI")]
    annual_roi: Option<f64>,

    additional_payment: Option<f64>,
    investment_proportion: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CrosshairPayload {
    chart_area: ChartArea,
    event: PointerEvent,
    x_max: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    labels: Vec<u32>,
    datasets: Vec<Dataset>,
    axis_bounds: AxisBounds,
    summary: ProjectionSummary,
    allocation: Option<AllocationState>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .route("/api/crosshair", post(crosshair_handler))
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "projection HTTP API listening");

    axum::serve(listener, app).await
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn project_get_handler(Query(payload): Query<ProjectPayload>) -> Response {
    project_handler_impl(payload)
}

async fn project_post_handler(Json(payload): Json<ProjectPayload>) -> Response {
    project_handler_impl(payload)
}

fn project_handler_impl(payload: ProjectPayload) -> Response {
    let request = match request_from_payload(payload) {
        Ok(request) => request,
        Err(err) => {
            warn!(%err, "rejected projection request");
            return error_response(StatusCode::BAD_REQUEST, &err.to_string());
        }
    };

    let projection = project(
        &request.loan,
        &request.investment,
        request.allocation.as_ref(),
    );
    json_response(
        StatusCode::OK,
        build_project_response(&projection, request.allocation),
    )
}

async fn crosshair_handler(Json(payload): Json<CrosshairPayload>) -> Response {
    match evaluate_crosshair(&payload) {
        Ok(report) => json_response(StatusCode::OK, report),
        Err(err) => {
            warn!(%err, "rejected crosshair request");
            error_response(StatusCode::BAD_REQUEST, &err.to_string())
        }
    }
}

fn evaluate_crosshair(payload: &CrosshairPayload) -> Result<PointerReport, ParameterError> {
    payload.chart_area.validate()?;
    let mut controller = OverlayController::new();
    controller.handle_pointer_event(payload.event, payload.chart_area);
    Ok(pointer_report(&controller, payload.chart_area, payload.x_max))
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn request_from_json(json: &str) -> Result<ProjectionRequest, String> {
    let payload = serde_json::from_str::<ProjectPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    request_from_payload(payload).map_err(|e| e.to_string())
}

fn request_from_payload(payload: ProjectPayload) -> Result<ProjectionRequest, ParameterError> {
    let mut cli = Cli::default();

    if let Some(v) = payload.principal {
        cli.principal = v;
    }
    if let Some(v) = payload.loan_length {
        cli.loan_length = v;
    }
    if let Some(v) = payload.interest_rate {
        cli.interest_rate = v;
    }
    if let Some(v) = payload.additional_principal {
        cli.additional_principal = v;
    }
    if let Some(v) = payload.investment_start {
        cli.investment_start = v;
    }
    if let Some(v) = payload.additional_investment {
        cli.additional_investment = v;
    }
    if let Some(v) = payload.annual_roi {
        cli.annual_roi = v;
    }
    cli.additional_payment = payload.additional_payment;
    cli.investment_proportion = payload.investment_proportion;

    build_request(&cli)
}

pub fn build_project_response(
    projection: &Projection,
    allocation: Option<AllocationState>,
) -> ProjectResponse {
    ProjectResponse {
        labels: projection.months.clone(),
        datasets: projection.datasets(),
        axis_bounds: projection.axis_bounds,
        summary: projection.summary,
        allocation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SeriesKind;

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn request_from_json_parses_web_keys() {
        let json = r#"{
          "principal": 450000,
          "loanLength": 25,
          "interestRate": 5.25,
          "additionalPrincipal": 150,
          "investmentStart": 20000,
          "monthlyInvestment": 750,
          "annualROI": -2.5
        }"#;
        let request = request_from_json(json).expect("json should parse");

        assert_approx(request.loan.principal, 450_000.0);
        assert_eq!(request.loan.loan_length_years, 25);
        assert_approx(request.loan.annual_interest_rate_percent, 5.25);
        assert_approx(request.loan.additional_principal, 150.0);
        assert_approx(request.investment.investment_start, 20_000.0);
        assert_approx(request.investment.additional_investment, 750.0);
        assert_approx(request.investment.annual_roi_percent, -2.5);
        assert_eq!(request.allocation, None);
    }

    #[test]
    fn empty_payload_uses_application_defaults() {
        let request = request_from_json("{}").expect("defaults are valid");
        assert_approx(request.loan.principal, 1_000_000.0);
        assert_eq!(request.loan.loan_length_years, 30);
        assert_approx(request.loan.annual_interest_rate_percent, 2.0);
        assert_approx(request.investment.additional_investment, 500.0);
        assert_approx(request.investment.annual_roi_percent, 10.0);
    }

    #[test]
    fn request_from_json_builds_allocation() {
        let json = r#"{ "additionalPayment": 1000, "investmentProportion": 35 }"#;
        let allocation = request_from_json(json)
            .expect("json should parse")
            .allocation
            .expect("allocator variant");
        assert_approx(allocation.additional_principal, 650.0);
        assert_approx(allocation.additional_investment, 350.0);
    }

    #[test]
    fn request_from_json_rejects_invalid_values() {
        let err = request_from_json(r#"{ "principal": -5 }"#).expect_err("negative principal");
        assert!(err.contains("principal"));

        let err = request_from_json(r#"{ "loanLength": 400000000 }"#).expect_err("term too long");
        assert_eq!(err, "loanLengthYears must be between 1 and 100");

        let err = request_from_json(r#"{ "loanLength": "ten" }"#).expect_err("bad type");
        assert!(err.contains("Invalid API JSON payload"));
    }

    #[test]
    fn project_response_serialization_contains_expected_fields() {
        let request = request_from_json(r#"{ "loanLength": 2 }"#).expect("valid");
        let projection = project(&request.loan, &request.investment, None);
        let response = build_project_response(&projection, request.allocation);

        assert_eq!(response.labels.len(), 24);
        assert_eq!(response.datasets[0].kind, SeriesKind::OutstandingBalance);

        let json = serde_json::to_string(&response).expect("response should serialize");
        assert!(json.contains("\"labels\""));
        assert!(json.contains("\"datasets\""));
        assert!(json.contains("\"axisBounds\""));
        assert!(json.contains("\"yMax\""));
        assert!(json.contains("\"kind\":\"portfolio-value\""));
        assert!(json.contains("\"label\":\"Total Interest Paid\""));
        assert!(json.contains("\"payoffMonth\""));
        assert!(json.contains("\"allocation\":null"));
    }

    #[test]
    fn crosshair_payload_evaluates_single_event() {
        let payload: CrosshairPayload = serde_json::from_str(
            r#"{
              "chartArea": { "top": 0, "bottom": 300, "left": 40, "right": 640 },
              "event": { "type": "move", "x": 340, "y": 150 },
              "xMax": 444
            }"#,
        )
        .expect("payload should parse");
        let report = evaluate_crosshair(&payload).expect("valid area");
        assert!(report.pointer.should_draw_crosshair);
        assert_eq!(report.month, Some(222));
        assert_eq!(report.crosshair.map(|line| line.to_y), Some(0.0));

        let payload: CrosshairPayload = serde_json::from_str(
            r#"{
              "chartArea": { "top": 0, "bottom": 300, "left": 40, "right": 640 },
              "event": { "type": "leave" }
            }"#,
        )
        .expect("payload should parse");
        let report = evaluate_crosshair(&payload).expect("valid area");
        assert!(!report.pointer.should_draw_crosshair);
        assert!(report.crosshair.is_none());
        assert_eq!(report.month, None);
    }

    #[test]
    fn crosshair_payload_rejects_inverted_area() {
        let payload: CrosshairPayload = serde_json::from_str(
            r#"{
              "chartArea": { "top": 300, "bottom": 0, "left": 40, "right": 640 },
              "event": { "type": "move", "x": 340, "y": 150 }
            }"#,
        )
        .expect("payload should parse");
        assert_eq!(
            evaluate_crosshair(&payload).map(|r| r.pointer),
            Err(ParameterError::InvalidChartArea)
        );
    }
}
