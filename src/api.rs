//! HTTP routing for the calculator API
//!
//! Framework-free request handling over `lambda_http` request/response types:
//! - `POST /api/calculate` - run a projection from a JSON assumptions body
//! - `GET /api/health` - liveness probe
//! - `OPTIONS *` - CORS preflight, headers only
//!
//! Every response carries the CORS headers.

use lambda_http::http::{self, Method, StatusCode};
use lambda_http::{Body, Request, Response};
use serde::Serialize;

use crate::error::RoiError;
use crate::report::calculate;

pub const CALCULATE_PATH: &str = "/api/calculate";
pub const HEALTH_PATH: &str = "/api/health";

const ALLOW_ORIGIN: &str = "*";
const ALLOW_METHODS: &str = "GET, POST, OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type";

#[derive(Debug, Serialize)]
struct HealthBody {
    status: &'static str,
}

fn with_cors(status: StatusCode) -> http::response::Builder {
    Response::builder()
        .status(status)
        .header("Access-Control-Allow-Origin", ALLOW_ORIGIN)
        .header("Access-Control-Allow-Methods", ALLOW_METHODS)
        .header("Access-Control-Allow-Headers", ALLOW_HEADERS)
}

fn text_response(status: StatusCode, text: String) -> Result<Response<Body>, http::Error> {
    with_cors(status)
        .header("Content-Type", "application/json")
        .body(Body::Text(text))
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Result<Response<Body>, http::Error> {
    match serde_json::to_string(body) {
        Ok(text) => text_response(status, text),
        Err(e) => {
            log::error!("Failed to serialize response: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("Failed to serialize response: {}", e),
            )
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Result<Response<Body>, http::Error> {
    let text = serde_json::json!({ "error": message }).to_string();
    text_response(status, text)
}

/// Route one request to its handler
pub fn handle(event: &Request) -> Result<Response<Body>, http::Error> {
    let method = event.method();
    let path = event.uri().path().trim_end_matches('/');

    log::info!("{} {}", method, event.uri().path());

    if method == Method::OPTIONS {
        return with_cors(StatusCode::OK).body(Body::Empty);
    }

    match path {
        CALCULATE_PATH if method == Method::POST => handle_calculate(event.body()),
        HEALTH_PATH if method == Method::GET => {
            json_response(StatusCode::OK, &HealthBody { status: "healthy" })
        }
        CALCULATE_PATH | HEALTH_PATH => {
            error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
        }
        _ => error_response(StatusCode::NOT_FOUND, "Not found"),
    }
}

fn handle_calculate(body: &Body) -> Result<Response<Body>, http::Error> {
    let bytes: &[u8] = match body {
        Body::Text(s) => s.as_bytes(),
        Body::Binary(b) => b.as_slice(),
        Body::Empty => b"",
    };

    // An empty body asks for the defaults
    let input: serde_json::Value = if bytes.iter().all(u8::is_ascii_whitespace) {
        serde_json::Value::Object(Default::default())
    } else {
        match serde_json::from_slice(bytes) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("Rejected malformed JSON body: {}", e);
                return error_response(StatusCode::BAD_REQUEST, &format!("Invalid JSON: {}", e));
            }
        }
    };

    match calculate(&input) {
        Ok(report) => json_response(StatusCode::OK, &report),
        Err(e) => {
            let status = StatusCode::from_u16(e.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            match &e {
                RoiError::InvalidAssumptions { .. } => log::warn!("Rejected assumptions: {}", e),
                RoiError::Computation(_) => log::error!("Calculation failed: {}", e),
            }
            error_response(status, &e.to_string())
        }
    }
}
