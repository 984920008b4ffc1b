//! AWS Lambda handler backing the site's loan calculator
//!
//! Accepts a scenario via JSON and returns the per-year projection, the
//! threshold-crossing summary, and optionally a balance trajectory and a
//! combined two-loan view.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use chrono::Datelike;
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use serde::{Deserialize, Serialize};

use repayment_engine::{
    BalanceTrajectory, CombinedYear, EngineError, PlanId, Scenario, ScenarioRunner,
    ThresholdCrossing, YearProjection,
};
use repayment_engine::projection::ProjectionSummary;

/// Input for one calculation
#[derive(Debug, Deserialize)]
pub struct CalculationRequest {
    /// Annual salary today
    pub salary: f64,

    /// Annual salary growth percentage (default: 0)
    #[serde(default)]
    pub growth_pct: f64,

    /// Plan id, e.g. "plan2" or "postgraduate"
    pub plan: String,

    /// First projected calendar year (default: current year)
    #[serde(default = "default_start_year")]
    pub start_year: i32,

    /// Projection horizon in years (default: 10)
    #[serde(default = "default_horizon_years")]
    pub horizon_years: u32,

    /// Opening balance; enables the interest simulation
    #[serde(default)]
    pub initial_balance: Option<f64>,

    /// Second plan id; enables the combined two-loan view
    #[serde(default)]
    pub second_plan: Option<String>,
}

fn default_start_year() -> i32 {
    chrono::Utc::now().year()
}

fn default_horizon_years() -> u32 {
    10
}

/// Output of one calculation
#[derive(Debug, Serialize)]
pub struct CalculationResponse {
    pub plan: String,
    pub projection: Vec<YearProjection>,
    pub summary: ProjectionSummary,
    pub crossing: ThresholdCrossing,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<BalanceTrajectory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combined: Option<Vec<CombinedYear>>,
    pub execution_time_ms: u64,
}

fn error_response(status: u16, message: &str) -> Response<Body> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Body::Text(format!(r#"{{"error":"{}"}}"#, message)))
        .unwrap()
}

fn json_response(body: &CalculationResponse) -> Response<Body> {
    Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
        .body(Body::Text(serde_json::to_string(body).unwrap()))
        .unwrap()
}

/// Map engine errors to HTTP status codes: bad input is the caller's fault
fn engine_error_response(err: &EngineError) -> Response<Body> {
    let status = match err {
        EngineError::InvalidScenario(_) | EngineError::UnknownPlan(_) => 400,
    };
    error_response(status, &err.to_string())
}

/// Lambda handler function
async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let start = std::time::Instant::now();

    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(Response::builder()
            .status(200)
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "POST, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .body(Body::Empty)
            .unwrap());
    }

    // Parse request body
    let body = event.body();
    let body_str = match body {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };

    let request: CalculationRequest = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => {
            log::warn!("rejected request body: {}", e);
            return Ok(error_response(400, &format!("Invalid JSON: {}", e)));
        }
    };

    let plan = match PlanId::parse(&request.plan) {
        Ok(p) => p,
        Err(e) => return Ok(engine_error_response(&e)),
    };

    let scenario = Scenario::with_horizon(
        request.salary,
        request.growth_pct,
        plan,
        request.start_year,
        request.horizon_years,
    );

    let runner = ScenarioRunner::new();

    let outcome = match request.initial_balance {
        Some(balance) => runner.run_with_balance(&scenario, balance),
        None => runner.run(&scenario),
    };
    let outcome = match outcome {
        Ok(o) => o,
        Err(e) => return Ok(engine_error_response(&e)),
    };

    let combined = match &request.second_plan {
        Some(second) => {
            let plan_b = match PlanId::parse(second) {
                Ok(p) => p,
                Err(e) => return Ok(engine_error_response(&e)),
            };
            match runner.run_combined(&scenario, plan, plan_b) {
                Ok(rows) => Some(rows),
                Err(e) => return Ok(engine_error_response(&e)),
            }
        }
        None => None,
    };

    let response = CalculationResponse {
        plan: plan.to_string(),
        summary: outcome.projection.summary(),
        projection: outcome.projection.years,
        crossing: outcome.crossing,
        balance: outcome.balance,
        combined,
        execution_time_ms: start.elapsed().as_millis() as u64,
    };

    Ok(json_response(&response))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
