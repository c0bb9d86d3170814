//! Document-generation pipeline: compose → compile → package.
//!
//! The pipeline reads the application record, never mutates it, and returns
//! only finished bytes. The first failure aborts the request; no partial or
//! truncated artifact is ever returned.

use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;
use crate::models::application::Application;
use crate::render::compiler::LatexCompiler;
use crate::render::cover_letter::compose_cover_letter;
use crate::render::packaging::{package_documents, sanitize_file_part, DocumentKind};
use crate::render::resume::compose_resume;
use crate::render::templates::TemplateStore;

const RESUME_DOC: &str = "resume";
const COVER_DOC: &str = "cover_letter";

/// Compiles both artifacts and bundles them into a zip archive.
/// Returns the archive bytes and its download filename.
pub async fn generate_package(
    store: &TemplateStore,
    compiler: &LatexCompiler,
    app: &Application,
) -> Result<(Vec<u8>, String), AppError> {
    let resume_tex = compose_resume(&app.resume, store)?;
    let cover_tex = compose_cover_letter(&app.resume, app.cover_letter.as_ref(), store)?;

    // Two isolated invocations: a fault in one cannot corrupt the other's inputs.
    let resume_pdf = compiler.compile(store, RESUME_DOC, &resume_tex).await?;
    let cover_pdf = compiler.compile(store, COVER_DOC, &cover_tex).await?;

    let name_part = sanitize_file_part(&app.resume.name, "Resume");
    let resume_name = format!("{name_part}_Resume.pdf");
    let cover_name = format!("{name_part}_Cover_Letter.pdf");
    let archive = package_documents(&resume_pdf, &cover_pdf, &resume_name, &cover_name)?;

    let position_part = sanitize_file_part(&app.job_title, "position");
    let company_part = sanitize_file_part(&app.company, "company");
    let archive_name = format!("{position_part}_{company_part}.zip");

    info!("Packaged {resume_name} and {cover_name} into {archive_name}");
    Ok((archive, archive_name))
}

/// Compiles a single artifact for inline preview. No archiving.
pub async fn generate_preview(
    store: &TemplateStore,
    compiler: &LatexCompiler,
    app: &Application,
    kind: DocumentKind,
) -> Result<(Bytes, String), AppError> {
    let name_part = sanitize_file_part(&app.resume.name, "Resume");

    match kind {
        DocumentKind::Resume => {
            let tex = compose_resume(&app.resume, store)?;
            let pdf = compiler.compile(store, RESUME_DOC, &tex).await?;
            Ok((pdf, format!("{name_part}_Resume.pdf")))
        }
        DocumentKind::CoverLetter => {
            let tex = compose_cover_letter(&app.resume, app.cover_letter.as_ref(), store)?;
            let pdf = compiler.compile(store, COVER_DOC, &tex).await?;
            Ok((pdf, format!("{name_part}_Cover.pdf")))
        }
    }
}
