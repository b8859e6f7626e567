use actix_multipart::Multipart;
use actix_web::{get, post, web, HttpResponse};
use serde::Serialize;

use crate::schema::FormOptions;

use super::error::ApiError;
use super::multipart::read_submission;
use super::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// GET /health
#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /api/job-request/options - option sets, market hierarchy and
/// defaults for rendering the form.
#[get("/options")]
pub async fn form_options() -> HttpResponse {
    HttpResponse::Ok().json(FormOptions::current())
}

/// POST /api/job-request - submit a job setup request.
///
/// Expects `multipart/form-data` with the form's text fields and the file
/// parts `po` and `estimate`. Responds `{ "id" }` on success.
#[post("")]
pub async fn create_job_request(
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let form = read_submission(payload, state.max_upload_bytes).await?;
    log::debug!(
        "Decoded submission with {} fields and {} files",
        form.fields.len(),
        form.files.len()
    );

    let receipt = state.pipeline.submit(form).await?;
    Ok(HttpResponse::Ok().json(receipt))
}
