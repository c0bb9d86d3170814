use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::application::Application;
use crate::render::compiler::LatexCompiler;
use crate::render::packaging::DocumentKind;
use crate::render::pipeline::{generate_package, generate_preview};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct PreviewQuery {
    #[serde(default)]
    pub doc: String,
}

/// POST /api/v1/documents
/// Compiles the resume and cover letter and returns them as a zip download.
pub async fn handle_generate_documents(
    State(state): State<AppState>,
    Json(app): Json<Application>,
) -> Result<impl IntoResponse, AppError> {
    // Compiler lookup happens before any working directory is created.
    let compiler =
        LatexCompiler::locate(&state.config.pdflatex_bin, state.config.compile_timeout)?;
    let (archive, filename) = generate_package(&state.templates, &compiler, &app).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        archive,
    ))
}

/// POST /api/v1/documents/preview?doc=resume|cover
/// Compiles a single artifact and returns it for inline display.
pub async fn handle_preview_document(
    State(state): State<AppState>,
    Query(query): Query<PreviewQuery>,
    Json(app): Json<Application>,
) -> Result<impl IntoResponse, AppError> {
    let kind = DocumentKind::parse(&query.doc).ok_or_else(|| {
        AppError::Validation("invalid doc (use doc=resume or doc=cover)".to_string())
    })?;

    let compiler =
        LatexCompiler::locate(&state.config.pdflatex_bin, state.config.compile_timeout)?;
    let (pdf, filename) = generate_preview(&state.templates, &compiler, &app, kind).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{filename}\""),
            ),
            (header::CACHE_CONTROL, "no-store".to_string()),
        ],
        pdf,
    ))
}
