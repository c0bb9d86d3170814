//! Cover-letter section composers and assembler.
//!
//! Layout: head fragment → applicant header → address block → greeting →
//! paragraphs → closing. Every dynamic field is optional; blank values fall
//! back to the documented defaults rather than producing broken markup.

use chrono::Local;

use crate::errors::AppError;
use crate::models::application::{CoverLetter, ResumeData};
use crate::render::escape::{escape, escape_multiline};
use crate::render::resume::applicant_header;
use crate::render::templates::{self, TemplateStore};

/// Assembles the complete cover-letter document.
///
/// An entirely absent letter still yields a valid document (head fragment +
/// terminator only), so the pipeline always produces a cover-letter artifact.
pub fn compose_cover_letter(
    resume: &ResumeData,
    letter: Option<&CoverLetter>,
    store: &TemplateStore,
) -> Result<String, AppError> {
    let head = store.load(templates::COVER_LETTER_HEAD)?;

    let Some(letter) = letter else {
        return Ok(format!("{head}\\end{{document}}\n"));
    };

    let mut doc = head;
    doc.push_str(&applicant_header(resume));
    doc.push_str("\n\\vspace{18pt}\n");
    doc.push_str(&address_block(letter));
    doc.push_str(&greeting(letter));
    doc.push_str(&paragraphs(letter));
    doc.push_str(&closing(letter));
    Ok(doc)
}

/// Current date on its own line, then hiring manager, company, and location
/// lines. Each of the three is omitted independently when its field is blank.
fn address_block(letter: &CoverLetter) -> String {
    let mut lines = vec![format!(
        "\\noindent {}\\\\",
        Local::now().format("%B %-d, %Y")
    )];
    for value in [
        &letter.hiring_manager_name,
        &letter.company,
        &letter.location,
    ] {
        let value = value.trim();
        if !value.is_empty() {
            lines.push(format!("{}\\\\", escape(value)));
        }
    }
    format!("\n{}\n \\vspace{{40pt}}\n", lines.join("\n"))
}

/// Uses the explicit greeting when present, otherwise synthesizes one from
/// the hiring-manager name, falling back to "Dear Hiring Manager,".
fn greeting(letter: &CoverLetter) -> String {
    let explicit = letter.greeting.trim();
    let manager = letter.hiring_manager_name.trim();

    let greeting = if !explicit.is_empty() {
        explicit.to_string()
    } else if !manager.is_empty() {
        format!("Dear {manager},")
    } else {
        "Dear Hiring Manager,".to_string()
    };

    format!("\\noindent {}\n \\\\ \\vspace{{20pt}}\n", escape(&greeting))
}

/// Each non-blank paragraph becomes a `\noindent` block with internal
/// newlines converted to forced breaks. Blank paragraphs are skipped
/// entirely rather than rendered as empty blocks.
fn paragraphs(letter: &CoverLetter) -> String {
    let mut out = String::new();
    for paragraph in &letter.paragraphs {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            continue;
        }
        out.push_str("\\noindent ");
        out.push_str(&escape_multiline(paragraph));
        out.push_str("\n \\\\ \\vspace{10pt}\n");
    }
    out
}

/// Sanitized closing text followed by the document terminator. With no
/// closing text only the terminator is emitted.
fn closing(letter: &CoverLetter) -> String {
    let closing = letter.closing.trim();
    if closing.is_empty() {
        return "\\end{document}\n".to_string();
    }
    format!(
        "\\vspace{{12pt}}\n\\noindent {}\n\\end{{document}}\n",
        escape_multiline(closing)
    )
}
