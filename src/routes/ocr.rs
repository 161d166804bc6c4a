//! Recognition endpoint
//!
//! `POST /api` is the whole request pipeline: admit the job through the
//! gate, walk the multipart body staging the image and resolving the
//! language, invoke the engine, and wrap its output in the result
//! envelope. Cleanup is not handled here at all; the admission token and
//! the job's staging directory release themselves on drop, so every exit
//! path (errors and client disconnects included) converges on the same
//! teardown.

use axum::{
    extract::{Multipart, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::error::AppError;
use crate::job::Job;
use crate::lang::Language;
use crate::state::AppState;

/// Success body: engine output wrapped under a `result` key
#[derive(Serialize)]
pub struct ResultEnvelope {
    pub result: Value,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(recognize))
        .route("/languages", get(list_languages))
}

/// GET /api/languages
///
/// Enumerate the supported languages so clients need not hardcode them.
async fn list_languages(State(state): State<AppState>) -> Json<Vec<Language>> {
    Json(state.languages().list().collect())
}

/// POST /api
///
/// Multipart parts, in whatever order the client sends them:
/// - `lang`: a user-facing language code from the language table
/// - `file`: the image payload; the filename only contributes the
///   staged file's extension
async fn recognize(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResultEnvelope>, AppError> {
    // Backpressure, not failure: a full gate parks the request here
    let _token = state.gate().acquire().await?;

    let mut job = Job::new()?;
    let mut language: Option<Language> = None;

    tracing::debug!(
        job = %job.id(),
        running = state.gate().limit() - state.gate().available(),
        "job admitted"
    );

    while let Some(mut field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "lang" => {
                let code = field.text().await?;
                if code.is_empty() {
                    return Err(AppError::EmptyLanguage);
                }
                let lang = state
                    .languages()
                    .resolve(&code)
                    .copied()
                    .ok_or_else(|| AppError::UnknownLanguage(code.clone()))?;
                job.set_lang(&code);
                language = Some(lang);
            }
            "file" => {
                let filename = field.file_name().map(|s| s.to_string());
                let path = job.stage_path(filename.as_deref());

                let mut staged = File::create(&path).await?;
                while let Some(chunk) = field.chunk().await? {
                    staged.write_all(&chunk).await?;
                }
                staged.flush().await?;

                tracing::info!(
                    job = %job.id(),
                    filename = ?filename,
                    staged = %path.display(),
                    "image uploaded"
                );
            }
            _ => {
                tracing::debug!(job = %job.id(), part = %name, "ignoring unknown part");
            }
        }
    }

    let language = language.ok_or(AppError::MissingPart("lang"))?;
    let image = job.staged().ok_or(AppError::MissingPart("file"))?;

    let result = state
        .engine()
        .recognize(image, language.locale)
        .await
        .map_err(|e| {
            tracing::error!(
                job = %job.id(),
                lang = job.lang().unwrap_or("?"),
                staged = %image.display(),
                elapsed = ?job.elapsed(),
                "engine invocation failed: {}",
                e
            );
            e
        })?;

    tracing::info!(
        job = %job.id(),
        lang = job.lang().unwrap_or("?"),
        elapsed = ?job.elapsed(),
        "recognition complete"
    );

    Ok(Json(ResultEnvelope { result }))
}
