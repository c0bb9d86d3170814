//! Resume section composers and assembler.
//!
//! Each composer merges one slice of `ResumeData` with its boilerplate
//! fragment and returns a markup string. Dynamic content is escaped exactly
//! once here; the fragments themselves are trusted. `compose_resume` joins
//! the sections in the fixed order the document class expects.

use crate::errors::AppError;
use crate::models::application::ResumeData;
use crate::render::escape::escape;
use crate::render::templates::{self, TemplateStore};

/// Formats the applicant identity into a centered header block.
/// Missing fields produce empty link text rather than dropping the field.
pub fn applicant_header(data: &ResumeData) -> String {
    format!(
        "\n\\begin{{center}}\n    \\textbf{{\\Huge \\scshape {name}}} \\\\ \\vspace{{1pt}}\n    \\small {phone} $|$ \\href{{mailto:{email}}}{{\\underline{{{email}}}}} $|$\n    \\href{{https:/{linkedin}}}{{\\underline{{{linkedin}}}}} $|$\n    \\href{{https:/{github}}}{{\\underline{{{github}}}}}\n\\end{{center}}\n",
        name = escape(&data.name),
        phone = escape(&data.phone),
        email = escape(&data.email),
        linkedin = escape(&data.linkedin),
        github = escape(&data.github),
    )
}

/// Objective section: fragment + escaped objective text + closing markup.
pub fn objective(data: &ResumeData, store: &TemplateStore) -> Result<String, AppError> {
    let template = store.load(templates::RESUME_OBJECTIVE)?;
    Ok(format!(
        "{template}{}\n}} \\end{{itemize}}\n",
        escape(&data.objective)
    ))
}

/// Education section: fragment + comma-joined course list. An empty list
/// yields an empty joined segment inside the still-present wrapper.
pub fn education(data: &ResumeData, store: &TemplateStore) -> Result<String, AppError> {
    let template = store.load(templates::RESUME_EDUCATION)?;
    let courses = data
        .relevant_courses
        .iter()
        .map(|course| escape(course))
        .collect::<Vec<_>>()
        .join(", ");
    Ok(format!("{template}{courses}}} \n \\resumeSubHeadingListEnd"))
}

/// Skills section: one bolded line per category, in list order.
pub fn skills(data: &ResumeData, store: &TemplateStore) -> Result<String, AppError> {
    let template = store.load(templates::RESUME_SKILLS)?;

    let mut body = String::new();
    for category in &data.skill_categories {
        let list = category
            .cat_skills
            .iter()
            .map(|skill| escape(skill))
            .collect::<Vec<_>>()
            .join(", ");
        body.push_str(&format!(
            "\\textbf{{ {} }}{{: {} }} \\\\ \n",
            escape(&category.cat_title),
            list
        ));
    }

    Ok(format!("{template}{body}}}}} \n \\end{{itemize}}"))
}

/// Projects section: one heading block per project, each point its own item.
pub fn projects(data: &ResumeData, store: &TemplateStore) -> Result<String, AppError> {
    let template = store.load(templates::RESUME_PROJECTS)?;

    let mut body = String::new();
    for project in &data.projects {
        body.push_str("\\resumeProjectHeading {\\textbf {");
        body.push_str(&escape(&project.project_title));
        body.push_str("} $|$ \\emph{ \n");
        body.push_str(&escape(&project.project_tech));
        body.push_str("}}{ \n");
        body.push_str(&escape(&project.project_date));
        body.push_str("} \n");

        body.push_str("\\resumeItemListStart");
        for point in project.project_points.iter() {
            body.push_str("\\resumeItem{");
            body.push_str(&escape(point));
            body.push_str("}\n");
        }
        body.push_str("\\resumeItemListEnd \n");
    }

    Ok(format!("{template}{body}\\resumeSubHeadingListEnd \n"))
}

/// Work section: structurally identical to projects, with the date range
/// formed by joining start and end dates.
pub fn work(data: &ResumeData, store: &TemplateStore) -> Result<String, AppError> {
    let template = store.load(templates::RESUME_WORK)?;

    let mut body = String::new();
    for job in &data.jobs {
        body.push_str("\\resumeSubheading \n {");
        body.push_str(&escape(&job.job_title));
        body.push_str("}{");
        body.push_str(&escape(&format!(
            "{} -- {}",
            job.job_start_date, job.job_end_date
        )));
        body.push_str("}{");
        body.push_str(&escape(&job.job_employer));
        body.push_str("}{");
        body.push_str(&escape(&job.job_location));
        body.push_str("} \n \\resumeItemListStart");

        for point in job.job_points.iter() {
            body.push_str("\\resumeItem{");
            body.push_str(&escape(point));
            body.push_str("}\n");
        }
        body.push_str("\\resumeItemListEnd \n");
    }

    Ok(format!(
        "\\vspace{{-10pt}}{template}{body}\\resumeSubHeadingListEnd \n"
    ))
}

/// Assembles the complete resume document in the fixed section order:
/// head → header → objective → education → skills → projects → work.
/// The first composer error aborts assembly; no partial document is returned.
pub fn compose_resume(data: &ResumeData, store: &TemplateStore) -> Result<String, AppError> {
    let head = store.load(templates::RESUME_HEAD)?;
    let header = applicant_header(data);
    let objective = objective(data, store)?;
    let education = education(data, store)?;
    let skills = skills(data, store)?;
    let projects = projects(data, store)?;
    let work = work(data, store)?;

    Ok(format!(
        "{head}{header}{objective}{education}{skills}{projects}{work}\\end{{document}}"
    ))
}
