//! AWS Lambda handler for the ROI calculator API
//!
//! Serves `POST /api/calculate`, `GET /api/health` and CORS preflight through
//! Lambda Function URLs or API Gateway.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use school_roi::api;

async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let start = std::time::Instant::now();
    let response = api::handle(&event)?;
    log::debug!(
        "{} {} -> {} in {:?}",
        event.method(),
        event.uri().path(),
        response.status(),
        start.elapsed()
    );
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
