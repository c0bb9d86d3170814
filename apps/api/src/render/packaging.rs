//! Output packaging: zip assembly and download file naming.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::errors::AppError;

/// Which artifact a preview request selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Resume,
    CoverLetter,
}

impl DocumentKind {
    /// Parses the `doc` query selector. Accepts the spellings the frontend
    /// has historically sent; an empty selector defaults to the resume.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "" | "resume" => Some(DocumentKind::Resume),
            "cover" | "cover_letter" | "coverletter" => Some(DocumentKind::CoverLetter),
            _ => None,
        }
    }
}

/// Bundles the two compiled artifacts into a single in-memory zip archive.
pub fn package_documents(
    resume_pdf: &[u8],
    cover_pdf: &[u8],
    resume_name: &str,
    cover_name: &str,
) -> Result<Vec<u8>, AppError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for (name, data) in [(resume_name, resume_pdf), (cover_name, cover_pdf)] {
        writer
            .start_file(name, options)
            .map_err(|e| AppError::Packaging(format!("Failed to add {name} to archive: {e}")))?;
        writer
            .write_all(data)
            .map_err(|e| AppError::Packaging(format!("Failed to write {name} to archive: {e}")))?;
    }

    let cursor = writer
        .finish()
        .map_err(|e| AppError::Packaging(format!("Failed to finish archive: {e}")))?;
    Ok(cursor.into_inner())
}

/// Reduces a free-text value to a filename-safe part: ASCII alphanumerics
/// are kept, any run of other characters collapses to a single underscore,
/// and the fallback is used when nothing survives.
pub fn sanitize_file_part(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return fallback.to_string();
    }

    let mut out = String::with_capacity(trimmed.len());
    let mut prev_underscore = false;
    for ch in trimmed.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch);
            prev_underscore = false;
        } else if !prev_underscore {
            out.push('_');
            prev_underscore = true;
        }
    }

    let out = out.trim_matches('_');
    if out.is_empty() {
        fallback.to_string()
    } else {
        out.to_string()
    }
}
