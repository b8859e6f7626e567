//! HTTP surface for the job setup form.

pub mod error;
pub mod handlers;
pub mod multipart;

use std::sync::Arc;

use actix_web::web;

use crate::config::DEFAULT_MAX_UPLOAD_BYTES;
use crate::pipeline::SubmissionPipeline;

pub use error::ApiError;

/// Shared state handed to every handler.
pub struct AppState {
    pub pipeline: Arc<SubmissionPipeline>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(pipeline: Arc<SubmissionPipeline>) -> Self {
        Self {
            pipeline,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }
}

/// Registers every route. The caller provides `web::Data<AppState>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::health)
        .service(
            web::scope("/api/job-request")
                .service(handlers::form_options)
                .service(handlers::create_job_request),
        );
}
